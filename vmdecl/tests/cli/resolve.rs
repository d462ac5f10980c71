use std::{fs, path::Path, process::Command};

use tempfile::TempDir;

//--------------------------------------------------------------------------------------------------
// Constants
//--------------------------------------------------------------------------------------------------

const DECLARATION: &str = r#"
image:
  name: org/image-14
cache:
  scope: box
networks:
  - private_network: { ip: 192.168.77.77 }
  - forwarded_port: { guest: 7007, host: 7007 }
provider:
  memory: 4096
  cpus: 8
provisioners:
  - path: script/path
    privileged: false
"#;

//--------------------------------------------------------------------------------------------------
// Function: Helper
//--------------------------------------------------------------------------------------------------

fn write_declaration(dir: &Path, contents: &str) {
    fs::write(dir.join("vmdecl.yaml"), contents).expect("Failed to write declaration");
}

fn vmdecl(dir: &Path) -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_vmdecl"));
    command
        .current_dir(dir)
        .env_remove("VMDECL_CACHE_PLUGIN")
        .env("TERM", "dumb");
    command
}

//--------------------------------------------------------------------------------------------------
// Tests
//--------------------------------------------------------------------------------------------------

#[test]
fn integration_test_resolve_outputs_json_plan() {
    let temp_dir = TempDir::new().unwrap();
    write_declaration(temp_dir.path(), DECLARATION);

    let output = vmdecl(temp_dir.path()).arg("resolve").output().unwrap();
    assert!(
        output.status.success(),
        "vmdecl resolve failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(plan["base_image"]["name"], "org/image-14");
    assert_eq!(plan["networks"][1]["forwarded_port"]["ports"], "7007:7007");
    assert_eq!(plan["provider_resources"]["memory_mib"], 4096);
    assert_eq!(plan["provider_resources"]["cpus"], 8);
    assert!(plan.get("cache_config").is_none());
}

#[test]
fn integration_test_resolve_with_cache_plugin_env() {
    let temp_dir = TempDir::new().unwrap();
    write_declaration(temp_dir.path(), DECLARATION);

    let output = vmdecl(temp_dir.path())
        .arg("resolve")
        .arg("--format")
        .arg("yaml")
        .env("VMDECL_CACHE_PLUGIN", "true")
        .output()
        .unwrap();
    assert!(output.status.success());

    let plan: serde_yaml::Value = serde_yaml::from_slice(&output.stdout).unwrap();
    assert_eq!(
        plan["cache_config"]["mount_options"],
        serde_yaml::from_str::<serde_yaml::Value>("[rw, vers=3, tcp, nolock]").unwrap()
    );
}

#[test]
fn integration_test_validate_reports_violations() {
    let temp_dir = TempDir::new().unwrap();
    write_declaration(
        temp_dir.path(),
        r#"
networks:
  - forwarded_port: { guest: 80, host: 8080 }
  - forwarded_port: { guest: 81, host: 8080 }
provider:
  memory: 0
"#,
    );

    let output = vmdecl(temp_dir.path()).arg("validate").output().unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid configuration"));
    assert!(stderr.contains("base image is missing or empty"));
    assert!(stderr.contains("host port 8080/tcp"));
    assert!(stderr.contains("provider resource 'memory' must be positive"));
}

#[test]
fn integration_test_validate_accepts_valid_declaration() {
    let temp_dir = TempDir::new().unwrap();
    write_declaration(temp_dir.path(), DECLARATION);

    let output = vmdecl(temp_dir.path()).arg("validate").output().unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("valid org/image-14"));
}

#[test]
fn integration_test_validate_missing_declaration() {
    let temp_dir = TempDir::new().unwrap();

    let output = vmdecl(temp_dir.path()).arg("validate").output().unwrap();
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("declaration not found"));
}
