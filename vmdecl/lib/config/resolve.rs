use ipnetwork::Ipv4Network;

use crate::{ConfigViolation, VmdeclError, VmdeclResult};

use super::{
    declaration::{Declaration, NetworkDecl},
    BaseImage, CacheConfig, Network, PortPair, ProviderResources, Provisioner, VmConfig,
    DEFAULT_MEMORY_MIB, DEFAULT_NUM_CPUS, DEFAULT_PRIVATE_NETWORK_PREFIX, DEFAULT_PROVIDER,
};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The optional capabilities reported by the hosting environment.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Capabilities {
    /// Whether the optional cache plugin is present.
    pub cache_plugin: bool,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Capabilities {
    /// Creates capabilities with the cache plugin present or absent.
    pub fn with_cache_plugin(cache_plugin: bool) -> Self {
        Self { cache_plugin }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolves a declaration into a validated VM configuration.
///
/// The cache block is only carried into the result when `capabilities.cache_plugin` is set.
/// Resolution is pure: the same declaration and capabilities always give the same result or the
/// same error.
///
/// ## Examples
///
/// ```
/// use vmdecl::config::{self, Capabilities, Declaration, ImageDecl, NetworkDecl, PortPair};
///
/// let declaration = Declaration::builder()
///     .image(ImageDecl::builder().name("org/image-14").build())
///     .networks(vec![NetworkDecl::forwarded_port(7007, 7007)])
///     .build();
///
/// let config = config::resolve(&declaration, Capabilities::default()).unwrap();
/// let (ports, _) = config.forwarded_ports().next().unwrap();
/// assert_eq!(ports, PortPair::with_same(7007));
/// ```
pub fn resolve(declaration: &Declaration, capabilities: Capabilities) -> VmdeclResult<VmConfig> {
    declaration.validate()?;

    // `validate` has already rejected every value that could fail below
    let Some(image) = declaration.image.as_ref() else {
        return Err(VmdeclError::InvalidConfiguration(vec![
            ConfigViolation::MissingBaseImage,
        ]));
    };

    tracing::debug!(image = %image.name, "resolving declaration");

    let base_image = BaseImage {
        name: image.name.trim().to_string(),
        url: image.url.clone(),
        version: image.version.clone(),
    };

    let cache_config = match (&declaration.cache, capabilities.cache_plugin) {
        (Some(cache), true) => Some(CacheConfig {
            scope: cache.scope,
            mount: cache.mount,
            mount_options: cache.mount.to_mount_args(),
        }),
        (Some(_), false) => {
            tracing::debug!("cache plugin not available, skipping cache configuration");
            None
        }
        (None, _) => None,
    };

    let networks = declaration
        .networks
        .iter()
        .map(resolve_network)
        .collect::<VmdeclResult<Vec<_>>>()?;

    let provider = &declaration.provider;
    let provider_resources = ProviderResources {
        provider: provider
            .name
            .clone()
            .unwrap_or_else(|| DEFAULT_PROVIDER.to_string()),
        memory_mib: resolve_resource(provider.memory, DEFAULT_MEMORY_MIB)?,
        cpus: resolve_resource(provider.cpus, DEFAULT_NUM_CPUS)?,
    };

    let provisioners = declaration
        .provisioners
        .iter()
        .map(|provisioner| Provisioner {
            path: provisioner.path.trim().into(),
            privileged: provisioner.privileged,
            args: provisioner.args.clone(),
        })
        .collect();

    Ok(VmConfig {
        base_image,
        cache_config,
        networks,
        ssh_agent_forwarding: declaration.ssh.forward_agent,
        provider_resources,
        provisioners,
    })
}

fn resolve_network(network: &NetworkDecl) -> VmdeclResult<Network> {
    match network {
        NetworkDecl::PrivateNetwork { ip, prefix } => {
            let prefix = prefix.unwrap_or(DEFAULT_PRIVATE_NETWORK_PREFIX);
            let network = Ipv4Network::new(*ip, prefix).map_err(VmdeclError::custom)?;

            Ok(Network::PrivateNetwork { network })
        }
        NetworkDecl::ForwardedPort {
            guest,
            host,
            protocol,
        } => Ok(Network::ForwardedPort {
            ports: PortPair::from_ports(*host, *guest),
            protocol: *protocol,
        }),
    }
}

fn resolve_resource(value: Option<i64>, default: u32) -> VmdeclResult<u32> {
    let resource = value
        .map(u32::try_from)
        .transpose()
        .map_err(VmdeclError::custom)?;

    Ok(resource.unwrap_or(default))
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
