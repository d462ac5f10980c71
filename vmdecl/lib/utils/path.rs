//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

/// The default file name of a VM declaration.
pub const VMDECL_CONFIG_FILENAME: &str = "vmdecl.yaml";

/// The environment variable the hosting environment uses to report the cache plugin.
pub const VMDECL_CACHE_PLUGIN_ENV_VAR: &str = "VMDECL_CACHE_PLUGIN";
