use std::{io, path::PathBuf};

use vmdecl::{
    cli::{AnsiStyles, SourceArgs},
    config::{self, VmConfig},
    management::{
        declaration,
        driver::{PlanDriver, PlanFormat, VmDriver},
        init,
    },
    VmdeclError, VmdeclResult,
};

//--------------------------------------------------------------------------------------------------
// Functions: Handlers
//--------------------------------------------------------------------------------------------------

pub fn init_subcommand(path: Option<PathBuf>) -> VmdeclResult<()> {
    let config_path = init::init(path.as_deref())?;
    println!(
        "{} {}",
        "created".valid(),
        config_path.display().to_string().literal()
    );

    Ok(())
}

pub fn validate_subcommand(source: SourceArgs) -> VmdeclResult<()> {
    let config = resolve_source(&source)?;
    println!(
        "{} {} ({} networks, {} provisioners)",
        "valid".valid(),
        config.get_base_image().get_name().literal(),
        config.get_networks().len(),
        config.get_provisioners().len()
    );

    Ok(())
}

pub fn resolve_subcommand(source: SourceArgs, format: PlanFormat) -> VmdeclResult<()> {
    let config = resolve_source(&source)?;

    let mut driver = PlanDriver::new(io::stdout().lock(), format);
    driver.provision(&config)
}

//--------------------------------------------------------------------------------------------------
// Functions: Helpers
//--------------------------------------------------------------------------------------------------

/// Loads and resolves a declaration, reporting every violation before exiting on failure.
fn resolve_source(source: &SourceArgs) -> VmdeclResult<VmConfig> {
    let declaration = declaration::load(source.path.as_deref(), Some(&source.file))?;

    match config::resolve(&declaration, source.capabilities()) {
        Err(VmdeclError::InvalidConfiguration(violations)) => {
            eprintln!("{}", "invalid configuration".error());
            for violation in &violations {
                eprintln!("  - {}", violation);
            }
            std::process::exit(1);
        }
        result => result,
    }
}
