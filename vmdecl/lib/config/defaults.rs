//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The default number of vCPUs to give the VM.
pub const DEFAULT_NUM_CPUS: u32 = 1;

/// The default amount of memory in MiB to give the VM.
pub const DEFAULT_MEMORY_MIB: u32 = 1024;

/// The default provider that consumes the resolved configuration.
pub const DEFAULT_PROVIDER: &str = "virtualbox";

/// The default prefix length for a private network address.
pub const DEFAULT_PRIVATE_NETWORK_PREFIX: u8 = 24;

/// The default NFS protocol version for the cache mount.
pub const DEFAULT_NFS_VERSION: u8 = 3;

/// The NFS protocol versions a cache mount may use.
pub const SUPPORTED_NFS_VERSIONS: [u8; 3] = [2, 3, 4];
