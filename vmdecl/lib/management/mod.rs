//! Loading, scaffolding and handing off VM declarations.

pub mod declaration;
pub mod driver;
pub mod init;
