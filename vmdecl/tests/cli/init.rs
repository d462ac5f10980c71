use std::{fs, process::Command};

use tempfile::TempDir;

//--------------------------------------------------------------------------------------------------
// Function: Helper
//--------------------------------------------------------------------------------------------------

/// Create a temporary directory for testing
fn create_temp_dir() -> (TempDir, std::path::PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let temp_path = temp_dir.path().to_path_buf();
    (temp_dir, temp_path)
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[test]
fn integration_test_init_command_with_path() {
    let (_temp_dir, temp_path) = create_temp_dir();

    let output = Command::new(env!("CARGO_BIN_EXE_vmdecl"))
        .arg("init")
        .arg(&temp_path)
        .output()
        .expect("Failed to execute vmdecl init command");

    assert!(
        output.status.success(),
        "vmdecl init failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let config_path = temp_path.join("vmdecl.yaml");
    assert!(config_path.is_file(), "vmdecl.yaml should exist");

    let contents = fs::read_to_string(config_path).unwrap();
    assert!(contents.contains("image:"), "declaration should name an image");
    assert!(
        contents.contains("provisioners:"),
        "declaration should have provisioners"
    );
}

#[test]
fn integration_test_init_command_current_dir() {
    let (_temp_dir, temp_path) = create_temp_dir();

    let output = Command::new(env!("CARGO_BIN_EXE_vmdecl"))
        .arg("init")
        .current_dir(&temp_path)
        .output()
        .expect("Failed to execute vmdecl init command");

    assert!(output.status.success());
    assert!(temp_path.join("vmdecl.yaml").is_file());
}

#[test]
fn integration_test_init_command_existing_declaration() {
    let (_temp_dir, temp_path) = create_temp_dir();
    fs::write(temp_path.join("vmdecl.yaml"), "image: { name: mine }\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_vmdecl"))
        .arg("init")
        .arg(&temp_path)
        .output()
        .expect("Failed to execute vmdecl init command");

    assert!(!output.status.success());
    assert_eq!(
        fs::read_to_string(temp_path.join("vmdecl.yaml")).unwrap(),
        "image: { name: mine }\n"
    );
}
