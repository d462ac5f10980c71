use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{utils::VMDECL_CONFIG_FILENAME, VmdeclError, VmdeclResult};

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const DEFAULT_DECLARATION: &str = r#"# The image the VM boots from
image:
  name: org/image-14
  url: https://images.example.com/org/image-14.box

# Only applied when the cache plugin is available
cache:
  scope: box
  mount:
    mode: rw
    nfs_version: 3
    transport: tcp
    lock: false

networks:
  - private_network:
      ip: 192.168.77.77
  - forwarded_port:
      guest: 7007
      host: 7007

ssh:
  forward_agent: true

provider:
  name: virtualbox
  memory: 4096
  cpus: 8

provisioners:
  - path: script/provision.sh
    privileged: false
"#;

//--------------------------------------------------------------------------------------------------
// Functions
//--------------------------------------------------------------------------------------------------

/// Writes a starter declaration into the project directory.
///
/// The directory is created if it does not exist. An existing declaration is never overwritten.
///
/// ## Returns
///
/// The path of the written declaration.
pub fn init(project_dir: Option<&Path>) -> VmdeclResult<PathBuf> {
    let project_dir = project_dir.unwrap_or_else(|| Path::new("."));
    let config_path = project_dir.join(VMDECL_CONFIG_FILENAME);

    if config_path.exists() {
        return Err(VmdeclError::DeclarationAlreadyExists(
            config_path.display().to_string(),
        ));
    }

    fs::create_dir_all(project_dir)?;
    fs::write(&config_path, DEFAULT_DECLARATION)?;

    tracing::info!(path = %config_path.display(), "created declaration");

    Ok(config_path)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------
