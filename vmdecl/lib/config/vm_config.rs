//! The resolved VM configuration handed to a VM driver.

use getset::{CopyGetters, Getters};
use ipnetwork::Ipv4Network;
use semver::VersionReq;
use serde::{Serialize, Serializer};
use typed_path::Utf8UnixPathBuf;

use super::{CacheScope, MountOptions, PortPair, Protocol};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// A fully resolved and validated VM configuration.
///
/// Values of this type can only be produced by [`resolve`](super::resolve) and expose no
/// mutators.
#[derive(Debug, Clone, PartialEq, Serialize, Getters, CopyGetters)]
pub struct VmConfig {
    /// The base image to boot from.
    #[getset(get = "pub with_prefix")]
    pub(super) base_image: BaseImage,

    /// The cache mount, present only when the cache plugin is available and a cache was declared.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[getset(get = "pub with_prefix")]
    pub(super) cache_config: Option<CacheConfig>,

    /// The network attachments, in declaration order.
    #[getset(get = "pub with_prefix")]
    pub(super) networks: Vec<Network>,

    /// Whether the host ssh agent is forwarded into the guest.
    #[getset(get_copy = "pub with_prefix")]
    pub(super) ssh_agent_forwarding: bool,

    /// The provider resource limits.
    #[getset(get = "pub with_prefix")]
    pub(super) provider_resources: ProviderResources,

    /// The post-boot provisioners, in declaration order.
    #[getset(get = "pub with_prefix")]
    pub(super) provisioners: Vec<Provisioner>,
}

/// The template image a VM boots from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
#[getset(get = "pub with_prefix")]
pub struct BaseImage {
    /// The image identifier.
    pub(super) name: String,

    /// Where the image is fetched from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) url: Option<String>,

    /// The acceptable image versions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(super) version: Option<VersionReq>,
}

/// The resolved host cache mount.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, CopyGetters)]
pub struct CacheConfig {
    /// How widely cached packages are shared.
    #[getset(get_copy = "pub with_prefix")]
    pub(super) scope: CacheScope,

    /// The structured mount options.
    #[getset(get_copy = "pub with_prefix")]
    pub(super) mount: MountOptions,

    /// The mount options rendered for the NFS client.
    #[getset(get = "pub with_prefix")]
    pub(super) mount_options: Vec<String>,
}

/// A resolved network attachment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Network {
    /// A host-only network with a static address.
    PrivateNetwork {
        /// The static address and its prefix.
        network: Ipv4Network,
    },

    /// A guest port forwarded to a host port.
    ForwardedPort {
        /// The port mapping, written as `host:guest`.
        ports: PortPair,

        /// The forwarded protocol.
        protocol: Protocol,
    },
}

/// The resolved provider resource limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, CopyGetters)]
pub struct ProviderResources {
    /// The provider name.
    #[getset(get = "pub with_prefix")]
    pub(super) provider: String,

    /// The memory size in MiB.
    #[getset(get_copy = "pub with_prefix")]
    pub(super) memory_mib: u32,

    /// The number of CPUs.
    #[getset(get_copy = "pub with_prefix")]
    pub(super) cpus: u32,
}

/// A resolved post-boot shell provisioner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters, CopyGetters)]
pub struct Provisioner {
    /// The script to execute.
    #[serde(serialize_with = "serialize_path")]
    #[getset(get = "pub with_prefix")]
    pub(super) path: Utf8UnixPathBuf,

    /// Whether the script runs with elevated privileges.
    #[getset(get_copy = "pub with_prefix")]
    pub(super) privileged: bool,

    /// The arguments passed to the script.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    #[getset(get = "pub with_prefix")]
    pub(super) args: Vec<String>,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl VmConfig {
    /// Returns the forwarded port mappings in declaration order.
    pub fn forwarded_ports(&self) -> impl Iterator<Item = (PortPair, Protocol)> + '_ {
        self.networks.iter().filter_map(Network::as_forwarded_port)
    }

    /// Returns the private networks in declaration order.
    pub fn private_networks(&self) -> impl Iterator<Item = Ipv4Network> + '_ {
        self.networks.iter().filter_map(|network| match network {
            Network::PrivateNetwork { network } => Some(*network),
            Network::ForwardedPort { .. } => None,
        })
    }
}

impl Network {
    /// Returns the port mapping and protocol if this is a forwarded port.
    pub fn as_forwarded_port(&self) -> Option<(PortPair, Protocol)> {
        match self {
            Self::ForwardedPort { ports, protocol } => Some((*ports, *protocol)),
            Self::PrivateNetwork { .. } => None,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions: Serialization helpers
//--------------------------------------------------------------------------------------------------

fn serialize_path<S>(path: &Utf8UnixPathBuf, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(path.as_str())
}
