//! Locating and parsing declaration files.
//!
//! Declarations are YAML by default. A file with a `.toml` extension is parsed as TOML.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{config::Declaration, utils::VMDECL_CONFIG_FILENAME, VmdeclError, VmdeclResult};

//--------------------------------------------------------------------------------------------------
// Types
//--------------------------------------------------------------------------------------------------

/// The syntax a declaration file is written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclarationFormat {
    /// YAML.
    Yaml,

    /// TOML.
    Toml,
}

//--------------------------------------------------------------------------------------------------
// Methods
//--------------------------------------------------------------------------------------------------

impl DeclarationFormat {
    /// Picks the format from a file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Self::Toml,
            _ => Self::Yaml,
        }
    }
}

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Resolves the full path of a declaration file.
///
/// ## Arguments
///
/// * `project_dir` - Optional project directory (defaults to the current directory)
/// * `config_file` - Optional file name relative to the project directory (defaults to
///   `vmdecl.yaml`)
///
/// ## Returns
///
/// The path of the declaration, or `DeclarationNotFound` if no file exists there.
pub fn resolve_declaration_path(
    project_dir: Option<&Path>,
    config_file: Option<&str>,
) -> VmdeclResult<PathBuf> {
    let project_dir = project_dir.unwrap_or_else(|| Path::new("."));
    let config_file = config_file.unwrap_or(VMDECL_CONFIG_FILENAME);
    let full_path = project_dir.join(config_file);

    if !full_path.is_file() {
        return Err(VmdeclError::DeclarationNotFound(
            full_path.display().to_string(),
        ));
    }

    Ok(full_path)
}

/// Loads and parses the declaration file of a project.
pub fn load(project_dir: Option<&Path>, config_file: Option<&str>) -> VmdeclResult<Declaration> {
    let path = resolve_declaration_path(project_dir, config_file)?;
    tracing::debug!(path = %path.display(), "loading declaration");

    let contents = fs::read_to_string(&path)?;
    parse(&contents, DeclarationFormat::from_path(&path))
        .map_err(|e| VmdeclError::DeclarationParse(format!("{}: {e}", path.display())))
}

/// Parses a declaration written in the given format.
pub fn parse(contents: &str, format: DeclarationFormat) -> anyhow::Result<Declaration> {
    let declaration = match format {
        DeclarationFormat::Yaml => from_yaml_str(contents)?,
        DeclarationFormat::Toml => from_toml_str(contents)?,
    };

    Ok(declaration)
}

/// Parses a YAML declaration.
pub fn from_yaml_str(contents: &str) -> Result<Declaration, serde_yaml::Error> {
    // An empty document declares nothing
    if contents.trim().is_empty() {
        return Ok(Declaration::default());
    }

    serde_yaml::from_str(contents)
}

/// Parses a TOML declaration.
pub fn from_toml_str(contents: &str) -> Result<Declaration, toml::de::Error> {
    toml::from_str(contents)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
