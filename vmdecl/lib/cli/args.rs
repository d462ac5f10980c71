use std::path::PathBuf;

use clap::{Args, Parser};

use crate::{
    cli::styles,
    config::Capabilities,
    management::driver::PlanFormat,
    utils::{VMDECL_CACHE_PLUGIN_ENV_VAR, VMDECL_CONFIG_FILENAME},
};

//-------------------------------------------------------------------------------------------------
// Types
//-------------------------------------------------------------------------------------------------

/// `vmdecl` resolves declarative virtual machine definitions for a VM driver
#[derive(Debug, Parser)]
#[command(name = "vmdecl", author, version, styles=styles::styles())]
pub struct VmdeclArgs {
    /// The subcommand to run
    #[command(subcommand)]
    pub subcommand: Option<VmdeclSubcommand>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands for working with declarations
#[derive(Debug, Parser)]
pub enum VmdeclSubcommand {
    /// Write a starter declaration
    #[command(name = "init")]
    Init {
        /// Directory to write the declaration to
        #[arg(name = "PATH")]
        path: Option<PathBuf>,
    },

    /// Check a declaration against every configuration invariant
    #[command(name = "validate")]
    Validate {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Resolve a declaration and print the configuration handed to the VM driver
    #[command(name = "resolve")]
    Resolve {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = PlanFormat::Json)]
        format: PlanFormat,
    },
}

/// Where to read the declaration from and what the host supports
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Project directory containing the declaration
    #[arg(short, long)]
    pub path: Option<PathBuf>,

    /// Declaration file name
    #[arg(short = 'f', long = "file", default_value = VMDECL_CONFIG_FILENAME)]
    pub file: String,

    /// Whether the cache plugin is available on this host
    #[arg(
        long,
        env = VMDECL_CACHE_PLUGIN_ENV_VAR,
        default_value_t = false,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true"
    )]
    pub cache_plugin: bool,
}

//-------------------------------------------------------------------------------------------------
// Methods
//-------------------------------------------------------------------------------------------------

impl SourceArgs {
    /// Returns the capabilities reported by the hosting environment.
    pub fn capabilities(&self) -> Capabilities {
        Capabilities::with_cache_plugin(self.cache_plugin)
    }
}

//-------------------------------------------------------------------------------------------------
// Tests
//-------------------------------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn test_resolve_args() {
        std::env::remove_var(VMDECL_CACHE_PLUGIN_ENV_VAR);

        let args = VmdeclArgs::parse_from([
            "vmdecl",
            "resolve",
            "--path",
            "/tmp/project",
            "--format",
            "yaml",
            "--cache-plugin",
        ]);

        match args.subcommand {
            Some(VmdeclSubcommand::Resolve { source, format }) => {
                assert_eq!(source.path, Some(PathBuf::from("/tmp/project")));
                assert_eq!(source.file, VMDECL_CONFIG_FILENAME);
                assert_eq!(format, PlanFormat::Yaml);
                assert!(source.capabilities().cache_plugin);
            }
            other => panic!("unexpected subcommand: {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_cache_plugin_defaults_off() {
        std::env::remove_var(VMDECL_CACHE_PLUGIN_ENV_VAR);

        let args = VmdeclArgs::parse_from(["vmdecl", "validate", "-f", "vm.toml"]);
        match args.subcommand {
            Some(VmdeclSubcommand::Validate { source }) => {
                assert_eq!(source.file, "vm.toml");
                assert_eq!(source.capabilities(), Capabilities::default());
            }
            other => panic!("unexpected subcommand: {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_cache_plugin_from_env() {
        std::env::set_var(VMDECL_CACHE_PLUGIN_ENV_VAR, "true");
        let args = VmdeclArgs::parse_from(["vmdecl", "validate"]);
        std::env::remove_var(VMDECL_CACHE_PLUGIN_ENV_VAR);

        match args.subcommand {
            Some(VmdeclSubcommand::Validate { source }) => {
                assert!(source.capabilities().cache_plugin);
            }
            other => panic!("unexpected subcommand: {other:?}"),
        }
    }

    #[test]
    #[serial]
    fn test_verbose_short_flag() {
        std::env::remove_var(VMDECL_CACHE_PLUGIN_ENV_VAR);

        let args = VmdeclArgs::parse_from(["vmdecl", "-v", "validate"]);
        assert!(args.verbose);

        let args = VmdeclArgs::parse_from(["vmdecl", "resolve", "--verbose"]);
        assert!(args.verbose);

        let version = VmdeclArgs::try_parse_from(["vmdecl", "-V"]).unwrap_err();
        assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
    }
}
