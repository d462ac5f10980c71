//! Declaration validation

use std::collections::HashMap;

use crate::{ConfigViolation, VmdeclError, VmdeclResult};

use super::{
    declaration::{Declaration, NetworkDecl},
    PortPair, Protocol, SUPPORTED_NFS_VERSIONS,
};

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl Declaration {
    /// Checks the declaration against every configuration invariant.
    ///
    /// All violations are collected and returned together in a single
    /// [`VmdeclError::InvalidConfiguration`], in declaration order:
    /// - The base image is present and named
    /// - Forwarded ports use non-zero ports and do not share a host port and protocol
    /// - Private network prefixes are in range
    /// - Provider resources are positive
    /// - The cache mount uses a supported NFS version
    /// - Provisioners name a script
    pub fn validate(&self) -> VmdeclResult<()> {
        let mut violations = Vec::new();

        self.validate_image(&mut violations);
        self.validate_cache(&mut violations);
        self.validate_networks(&mut violations);
        self.validate_provider(&mut violations);
        self.validate_provisioners(&mut violations);

        if violations.is_empty() {
            Ok(())
        } else {
            Err(VmdeclError::InvalidConfiguration(violations))
        }
    }

    fn validate_image(&self, violations: &mut Vec<ConfigViolation>) {
        match &self.image {
            Some(image) if !image.name.trim().is_empty() => {
                if let Some(url) = &image.url {
                    if url.trim().is_empty() {
                        violations.push(ConfigViolation::EmptyImageUrl);
                    }
                }
            }
            _ => violations.push(ConfigViolation::MissingBaseImage),
        }
    }

    /// The cache block is checked even when the plugin is absent, so a declaration is valid or
    /// invalid regardless of the host it is resolved on.
    fn validate_cache(&self, violations: &mut Vec<ConfigViolation>) {
        if let Some(cache) = &self.cache {
            let version = cache.mount.nfs_version;
            if !SUPPORTED_NFS_VERSIONS.contains(&version) {
                violations.push(ConfigViolation::UnsupportedNfsVersion(version));
            }
        }
    }

    fn validate_networks(&self, violations: &mut Vec<ConfigViolation>) {
        // Host port and protocol to the guest port that claimed it first
        let mut used_ports: HashMap<(u16, Protocol), u16> = HashMap::new();

        for network in &self.networks {
            match network {
                NetworkDecl::PrivateNetwork { ip, prefix } => {
                    if let Some(prefix) = prefix {
                        if *prefix > 32 {
                            violations.push(ConfigViolation::InvalidNetworkPrefix {
                                ip: ip.to_string(),
                                prefix: *prefix,
                            });
                        }
                    }
                }
                NetworkDecl::ForwardedPort {
                    guest,
                    host,
                    protocol,
                } => {
                    let ports = PortPair::from_ports(*host, *guest);
                    if ports.has_zero_port() {
                        violations.push(ConfigViolation::ZeroPort(ports.to_string()));
                        continue;
                    }

                    if let Some(first_guest) = used_ports.get(&(*host, *protocol)) {
                        violations.push(ConfigViolation::HostPortCollision {
                            host: *host,
                            protocol: protocol.to_string(),
                            first_guest: *first_guest,
                            second_guest: *guest,
                        });
                    } else {
                        used_ports.insert((*host, *protocol), *guest);
                    }
                }
            }
        }
    }

    fn validate_provider(&self, violations: &mut Vec<ConfigViolation>) {
        let resources = [
            ("memory", self.provider.memory),
            ("cpus", self.provider.cpus),
        ];

        for (resource, value) in resources {
            let Some(value) = value else {
                continue;
            };

            if value <= 0 {
                violations.push(ConfigViolation::NonPositiveResource { resource, value });
            } else if u32::try_from(value).is_err() {
                violations.push(ConfigViolation::ResourceOutOfRange { resource, value });
            }
        }
    }

    fn validate_provisioners(&self, violations: &mut Vec<ConfigViolation>) {
        for (index, provisioner) in self.provisioners.iter().enumerate() {
            if provisioner.path.trim().is_empty() {
                violations.push(ConfigViolation::EmptyProvisionerPath(index));
            }
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;
    use crate::config::{CacheDecl, ImageDecl, MountOptions, ProviderDecl, ProvisionerDecl};

    fn violations_of(declaration: &Declaration) -> Vec<ConfigViolation> {
        match declaration.validate() {
            Err(VmdeclError::InvalidConfiguration(violations)) => violations,
            Err(e) => panic!("unexpected error: {e}"),
            Ok(()) => Vec::new(),
        }
    }

    fn image() -> ImageDecl {
        ImageDecl::builder().name("org/image-14").build()
    }

    #[test]
    fn test_validate_missing_image() {
        let declaration = Declaration::builder().build();
        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::MissingBaseImage]
        );

        let declaration = Declaration::builder()
            .image(ImageDecl::builder().name("   ").build())
            .build();
        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::MissingBaseImage]
        );
    }

    #[test]
    fn test_validate_empty_image_url() {
        let declaration = Declaration::builder()
            .image(ImageDecl::builder().name("org/image-14").url("").build())
            .build();

        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::EmptyImageUrl]
        );
    }

    #[test]
    fn test_validate_host_port_collision() {
        let declaration = Declaration::builder()
            .image(image())
            .networks(vec![
                NetworkDecl::forwarded_port(80, 8080),
                NetworkDecl::forwarded_port(81, 8080),
            ])
            .build();

        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::HostPortCollision {
                host: 8080,
                protocol: "tcp".to_string(),
                first_guest: 80,
                second_guest: 81,
            }]
        );
    }

    #[test]
    fn test_validate_same_host_port_on_different_protocols() {
        let declaration = Declaration::builder()
            .image(image())
            .networks(vec![
                NetworkDecl::forwarded_port(53, 5353),
                NetworkDecl::ForwardedPort {
                    guest: 53,
                    host: 5353,
                    protocol: Protocol::Udp,
                },
            ])
            .build();

        assert!(declaration.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_port() {
        let declaration = Declaration::builder()
            .image(image())
            .networks(vec![NetworkDecl::forwarded_port(0, 8080)])
            .build();

        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::ZeroPort("8080:0".to_string())]
        );
    }

    #[test]
    fn test_validate_private_network_prefix() {
        let declaration = Declaration::builder()
            .image(image())
            .networks(vec![NetworkDecl::PrivateNetwork {
                ip: Ipv4Addr::new(192, 168, 77, 77),
                prefix: Some(33),
            }])
            .build();

        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::InvalidNetworkPrefix {
                ip: "192.168.77.77".to_string(),
                prefix: 33,
            }]
        );
    }

    #[test]
    fn test_validate_provider_resources() {
        let declaration = Declaration::builder()
            .image(image())
            .provider(ProviderDecl::builder().memory(0).cpus(-2).build())
            .build();

        assert_eq!(
            violations_of(&declaration),
            vec![
                ConfigViolation::NonPositiveResource {
                    resource: "memory",
                    value: 0
                },
                ConfigViolation::NonPositiveResource {
                    resource: "cpus",
                    value: -2
                },
            ]
        );

        let declaration = Declaration::builder()
            .image(image())
            .provider(ProviderDecl::builder().memory(i64::from(u32::MAX) + 1).build())
            .build();

        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::ResourceOutOfRange {
                resource: "memory",
                value: i64::from(u32::MAX) + 1
            }]
        );
    }

    #[test]
    fn test_validate_cache_nfs_version() {
        let declaration = Declaration::builder()
            .image(image())
            .cache(
                CacheDecl::builder()
                    .mount(MountOptions::builder().nfs_version(5).build())
                    .build(),
            )
            .build();

        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::UnsupportedNfsVersion(5)]
        );
    }

    #[test]
    fn test_validate_empty_provisioner_path() {
        let declaration = Declaration::builder()
            .image(image())
            .provisioners(vec![
                ProvisionerDecl::builder().path("setup.sh").build(),
                ProvisionerDecl::builder().path("").build(),
            ])
            .build();

        assert_eq!(
            violations_of(&declaration),
            vec![ConfigViolation::EmptyProvisionerPath(1)]
        );
    }

    #[test]
    fn test_validate_collects_all_violations() {
        let declaration = Declaration::builder()
            .networks(vec![
                NetworkDecl::forwarded_port(7007, 7007),
                NetworkDecl::forwarded_port(7008, 7007),
            ])
            .provider(ProviderDecl::builder().memory(0).build())
            .build();

        let violations = violations_of(&declaration);
        assert_eq!(violations.len(), 3);
        assert_eq!(violations[0], ConfigViolation::MissingBaseImage);
    }
}
