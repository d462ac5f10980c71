//! Declaration and resolved configuration types.

mod declaration;
mod defaults;
mod port_pair;
mod resolve;
mod validate;
mod vm_config;

//--------------------------------------------------------------------------------------------------
// Exports
//--------------------------------------------------------------------------------------------------

pub use declaration::*;
pub use defaults::*;
pub use port_pair::*;
pub use resolve::*;
pub use vm_config::*;
