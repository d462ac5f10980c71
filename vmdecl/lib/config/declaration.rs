//! The raw VM declaration as written by the user.
//!
//! Every field is optional or defaulted here. Required fields and value ranges are enforced when
//! the declaration is resolved, so that all problems can be reported together.

use std::{fmt, net::Ipv4Addr};

use getset::Getters;
use semver::VersionReq;
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;

use super::DEFAULT_NFS_VERSION;

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A static VM declaration.
///
/// ## Examples
///
/// ```
/// use vmdecl::config::{Declaration, ImageDecl, NetworkDecl, ProviderDecl};
///
/// let declaration = Declaration::builder()
///     .image(ImageDecl::builder().name("org/image-14").build())
///     .networks(vec![NetworkDecl::forwarded_port(7007, 7007)])
///     .provider(ProviderDecl::builder().memory(4096).cpus(8).build())
///     .build();
///
/// assert_eq!(declaration.get_networks().len(), 1);
/// ```
#[derive(Debug, Default, Clone, Serialize, Deserialize, TypedBuilder, PartialEq, Getters)]
#[serde(deny_unknown_fields)]
#[getset(get = "pub with_prefix")]
pub struct Declaration {
    /// The base image to boot from.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    pub(super) image: Option<ImageDecl>,

    /// The host cache block, applied only when the cache plugin is available.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    pub(super) cache: Option<CacheDecl>,

    /// The network attachments, in order.
    #[serde(default)]
    #[builder(default)]
    pub(super) networks: Vec<NetworkDecl>,

    /// The ssh settings.
    #[serde(default)]
    #[builder(default)]
    pub(super) ssh: SshDecl,

    /// The provider resource limits.
    #[serde(default)]
    #[builder(default)]
    pub(super) provider: ProviderDecl,

    /// The post-boot provisioners, in order.
    #[serde(default)]
    #[builder(default)]
    pub(super) provisioners: Vec<ProvisionerDecl>,
}

/// The base image a VM boots from.
#[derive(Debug, Default, Clone, Serialize, Deserialize, TypedBuilder, PartialEq, Eq, Getters)]
#[serde(deny_unknown_fields)]
#[getset(get = "pub with_prefix")]
pub struct ImageDecl {
    /// The image identifier, e.g. `org/image-14`.
    #[serde(default)]
    #[builder(setter(transform = |name: impl AsRef<str>| name.as_ref().to_string()))]
    pub(super) name: String,

    /// Where the image can be fetched from.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(transform = |url: impl AsRef<str>| Some(url.as_ref().to_string())))]
    pub(super) url: Option<String>,

    /// The acceptable image versions.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    pub(super) version: Option<VersionReq>,
}

/// The host cache block.
#[derive(Debug, Default, Clone, Serialize, Deserialize, TypedBuilder, PartialEq, Eq, Getters)]
#[serde(deny_unknown_fields)]
#[getset(get = "pub with_prefix")]
pub struct CacheDecl {
    /// How widely cached packages are shared.
    #[serde(default)]
    #[builder(default)]
    pub(super) scope: CacheScope,

    /// The options used to mount the cache into the guest.
    #[serde(default)]
    #[builder(default)]
    pub(super) mount: MountOptions,
}

/// How widely cached packages are shared between VMs.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum CacheScope {
    /// Shared by every VM booted from the same base image.
    #[default]
    Box,

    /// Private to a single VM.
    Machine,
}

/// NFS mount options for the cache folder.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, TypedBuilder, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MountOptions {
    /// Read-write or read-only.
    #[serde(default)]
    #[builder(default)]
    pub mode: MountMode,

    /// The NFS protocol version.
    #[serde(default = "MountOptions::default_nfs_version")]
    #[builder(default = MountOptions::default_nfs_version())]
    pub nfs_version: u8,

    /// The transport the mount uses.
    #[serde(default)]
    #[builder(default)]
    pub transport: Protocol,

    /// Whether NFS file locking is enabled.
    #[serde(default)]
    #[builder(default)]
    pub lock: bool,
}

/// The access mode of a mount.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MountMode {
    /// Read-write.
    #[default]
    Rw,

    /// Read-only.
    Ro,
}

/// A transport protocol.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TCP.
    #[default]
    Tcp,

    /// UDP.
    Udp,
}

/// A network attachment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum NetworkDecl {
    /// A host-only network with a static address.
    PrivateNetwork {
        /// The static guest address.
        ip: Ipv4Addr,

        /// The network prefix length.
        #[serde(skip_serializing_if = "Option::is_none", default)]
        prefix: Option<u8>,
    },

    /// A guest port forwarded to a host port.
    ForwardedPort {
        /// The port inside the guest.
        guest: u16,

        /// The port on the host.
        host: u16,

        /// The forwarded protocol.
        #[serde(default)]
        protocol: Protocol,
    },
}

/// The ssh settings.
#[derive(Debug, Default, Clone, Copy, Serialize, Deserialize, TypedBuilder, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SshDecl {
    /// Whether the host ssh agent is forwarded into the guest.
    #[serde(default)]
    #[builder(default)]
    pub forward_agent: bool,
}

/// The provider resource limits.
///
/// Values are signed so that negative numbers surface as configuration violations instead of
/// parse errors.
#[derive(Debug, Default, Clone, Serialize, Deserialize, TypedBuilder, PartialEq, Eq, Getters)]
#[serde(deny_unknown_fields)]
#[getset(get = "pub with_prefix")]
pub struct ProviderDecl {
    /// The provider name, e.g. `virtualbox`.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(transform = |name: impl AsRef<str>| Some(name.as_ref().to_string())))]
    pub(super) name: Option<String>,

    /// The memory size in MiB.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    pub(super) memory: Option<i64>,

    /// The number of CPUs.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default, setter(strip_option))]
    pub(super) cpus: Option<i64>,
}

/// A post-boot shell provisioner.
#[derive(Debug, Clone, Serialize, Deserialize, TypedBuilder, PartialEq, Eq, Getters)]
#[serde(deny_unknown_fields)]
#[getset(get = "pub with_prefix")]
pub struct ProvisionerDecl {
    /// The script to execute.
    #[serde(default)]
    #[builder(setter(transform = |path: impl AsRef<str>| path.as_ref().to_string()))]
    pub(super) path: String,

    /// Whether the script runs with elevated privileges.
    #[serde(default = "ProvisionerDecl::default_privileged")]
    #[builder(default = ProvisionerDecl::default_privileged())]
    pub(super) privileged: bool,

    /// The arguments passed to the script.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    #[builder(default)]
    pub(super) args: Vec<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl MountOptions {
    /// Returns the default NFS protocol version.
    pub fn default_nfs_version() -> u8 {
        DEFAULT_NFS_VERSION
    }

    /// Renders the options in the order an NFS mount expects them, e.g.
    /// `["rw", "vers=3", "tcp", "nolock"]`.
    pub fn to_mount_args(&self) -> Vec<String> {
        vec![
            self.mode.to_string(),
            format!("vers={}", self.nfs_version),
            self.transport.to_string(),
            if self.lock { "lock" } else { "nolock" }.to_string(),
        ]
    }
}

impl NetworkDecl {
    /// Creates a private network declaration with the default prefix.
    pub fn private_network(ip: Ipv4Addr) -> Self {
        Self::PrivateNetwork { ip, prefix: None }
    }

    /// Creates a TCP forwarded port declaration.
    pub fn forwarded_port(guest: u16, host: u16) -> Self {
        Self::ForwardedPort {
            guest,
            host,
            protocol: Protocol::Tcp,
        }
    }
}

impl ProvisionerDecl {
    /// Provisioners run privileged unless told otherwise.
    pub fn default_privileged() -> bool {
        true
    }
}

//--------------------------------------------------------------------------------------------------
// Trait Implementations
//--------------------------------------------------------------------------------------------------

impl Default for MountOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl fmt::Display for MountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rw => write!(f, "rw"),
            Self::Ro => write!(f, "ro"),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tcp => write!(f, "tcp"),
            Self::Udp => write!(f, "udp"),
        }
    }
}

impl fmt::Display for CacheScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Box => write!(f, "box"),
            Self::Machine => write!(f, "machine"),
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
