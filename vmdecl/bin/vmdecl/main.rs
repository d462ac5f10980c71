mod handlers;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use vmdecl::{
    cli::{VmdeclArgs, VmdeclSubcommand},
    VmdeclResult,
};

//--------------------------------------------------------------------------------------------------
// Functions: main
//--------------------------------------------------------------------------------------------------

fn main() -> VmdeclResult<()> {
    // Parse command line arguments
    let args = VmdeclArgs::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match args.subcommand {
        Some(VmdeclSubcommand::Init { path }) => {
            handlers::init_subcommand(path)?;
        }
        Some(VmdeclSubcommand::Validate { source }) => {
            handlers::validate_subcommand(source)?;
        }
        Some(VmdeclSubcommand::Resolve { source, format }) => {
            handlers::resolve_subcommand(source, format)?;
        }
        None => {
            VmdeclArgs::command().print_help()?;
        }
    }

    Ok(())
}
