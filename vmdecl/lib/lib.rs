//! `vmdecl` resolves declarative virtual machine definitions into validated configurations.
//!
//! # Overview
//!
//! A declaration names a base image, an optional host cache mount, private networks and
//! forwarded ports, ssh agent forwarding, provider resource limits and post-boot shell
//! provisioners. `vmdecl` turns that declaration into an immutable [`config::VmConfig`] and hands
//! it to a [`management::driver::VmDriver`], which owns the actual provisioning.
//!
//! Resolution is a pure, synchronous step. The cache block is merged in only when the hosting
//! environment reports the cache plugin as available.
//!
//! # Usage Example
//!
//! ```rust
//! use vmdecl::{
//!     config::{self, Capabilities},
//!     management::{
//!         declaration,
//!         driver::{PlanDriver, PlanFormat, VmDriver},
//!     },
//! };
//!
//! # fn main() -> vmdecl::VmdeclResult<()> {
//! let declaration = declaration::from_yaml_str(
//!     r#"
//! image: { name: org/image-14 }
//! networks:
//!   - private_network: { ip: 192.168.77.77 }
//!   - forwarded_port: { guest: 7007, host: 7007 }
//! provider: { memory: 4096, cpus: 8 }
//! provisioners:
//!   - { path: script/path, privileged: false }
//! "#,
//! )
//! .map_err(vmdecl::VmdeclError::custom)?;
//!
//! let config = config::resolve(&declaration, Capabilities::default())?;
//!
//! let mut driver = PlanDriver::new(std::io::sink(), PlanFormat::Json);
//! driver.provision(&config)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Declaration types, validation and resolution
//! - [`management`] - Declaration files, scaffolding and the driver seam
//! - [`utils`] - Shared constants

#![warn(missing_docs)]

mod error;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub mod cli;
pub mod config;
pub mod management;
pub mod utils;

pub use error::*;
