//! CLI smoke tests for the tasktracker-server binary.

use std::path::Path;
use std::process::{Command, Stdio};
use std::time::Duration;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

fn run_server(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_tasktracker-server"))
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .expect("Failed to execute tasktracker-server")
}

/// Config rooted in a temp home so nothing touches the real user directory.
fn write_config(dir: &Path, name: &str, body: &str) -> String {
    let home = dir.join("home").to_string_lossy().replace('\\', "/");
    let content = format!(
        "server:\n  home_dir: \"{home}\"\n  host: \"127.0.0.1\"\n  port: 8080\n\nlogging:\n  default:\n    console_level: error\n    file: \"\"\n{body}"
    );
    let path = dir.join(name);
    std::fs::write(&path, content).expect("Failed to write config file");
    path.to_string_lossy().to_string()
}

fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

#[test]
fn test_cli_help_command() {
    let output = run_server(&["--help"]);
    assert!(output.status.success(), "Help command should succeed");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tasktracker-server") || stdout.contains("TaskTracker"));
    assert!(stdout.contains("Usage:"));
    assert!(stdout.contains("run"), "Should contain 'run' subcommand");
    assert!(stdout.contains("check"), "Should contain 'check' subcommand");
    assert!(stdout.contains("--config"));
    assert!(stdout.contains("--mock"));
}

#[test]
fn test_cli_version_command() {
    let output = run_server(&["--version"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tasktracker-server"));
    assert!(stdout.contains("0.1.0"));
}

#[test]
fn test_cli_invalid_command() {
    let output = run_server(&["invalid-command"]);
    assert!(!output.status.success(), "Invalid command should fail");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("error"), "Unexpected stderr: {stderr}");
}

#[test]
fn test_cli_missing_config_file() {
    let output = run_server(&["-c", "/nonexistent/config.yaml", "check"]);
    assert!(!output.status.success(), "Should fail with missing config");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("config file not found"),
        "Should mention config file issue: {stderr}"
    );
}

#[test]
fn test_cli_invalid_yaml() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("invalid.yaml");
    std::fs::write(&config_path, "invalid: yaml: content: [unclosed").unwrap();

    let output = run_server(&["--config", config_path.to_str().unwrap(), "check"]);
    assert!(!output.status.success(), "Should fail with invalid YAML");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("failed to load config"),
        "Should mention config loading issue: {stderr}"
    );
}

#[test]
fn test_cli_unknown_module_key_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        temp_dir.path(),
        "bad-module.yaml",
        "\nmodules:\n  tasktracker:\n    seed_everything: true\n",
    );

    let output = run_server(&["--config", &config_path, "--mock", "check"]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("invalid config for module 'tasktracker'"),
        "Unexpected stderr: {stderr}"
    );
}

#[test]
fn test_cli_check_with_sqlite_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        temp_dir.path(),
        "valid.yaml",
        "\ndatabase:\n  url: \"sqlite://database/tt.db\"\n  max_conns: 2\n",
    );

    let output = run_server(&["--config", &config_path, "check"]);
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "Should succeed with valid config\nSTDOUT: {stdout}\nSTDERR: {stderr}"
    );
    assert!(stdout.contains("Configuration check passed"));

    // relative sqlite paths land under home_dir
    assert!(temp_dir.path().join("home/database/tt.db").exists());
}

#[test]
fn test_cli_mock_flag_overrides_database() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(
        temp_dir.path(),
        "mock.yaml",
        "\ndatabase:\n  url: \"postgresql://localhost/nonexistent\"\n",
    );

    let output = run_server(&["--config", &config_path, "--mock", "check"]);
    assert!(
        output.status.success(),
        "Should succeed with mock database: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let output = run_server(&["--config", &config_path, "check"]);
    assert!(!output.status.success(), "postgres is not compiled in");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unsupported database type"), "{stderr}");
}

#[test]
fn test_cli_print_config_applies_overrides() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), "print.yaml", "");

    let output = run_server(&["--config", &config_path, "--port", "9123", "--print-config"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("port: 9123"), "{stdout}");
}

#[test]
fn test_cli_subcommand_help() {
    let output = run_server(&["run", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Start the server"));

    let output = run_server(&["check", "--help"]);
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Check configuration"));
}

#[tokio::test]
async fn test_cli_run_serves_health_and_seeded_users() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write_config(temp_dir.path(), "run.yaml", "");
    let port = free_port();

    let mut child = tokio::process::Command::new(env!("CARGO_BIN_EXE_tasktracker-server"))
        .args(["--config", &config_path, "--mock", "--port", &port.to_string(), "run"])
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .expect("Failed to spawn tasktracker-server");

    let get = |path: &'static str| async move {
        let mut stream = tokio::net::TcpStream::connect(("127.0.0.1", port)).await?;
        let req = format!("GET {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
        stream.write_all(req.as_bytes()).await?;
        let mut raw = String::new();
        stream.read_to_string(&mut raw).await?;
        Ok::<_, std::io::Error>(raw)
    };

    let mut health = None;
    for _ in 0..50 {
        if let Ok(raw) = get("/health").await {
            health = Some(raw);
            break;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    let health = health.expect("server did not come up");
    assert!(health.starts_with("HTTP/1.1 200"), "{health}");
    assert!(health.contains("\"status\":\"ok\""));

    let users = get("/api/users").await.unwrap();
    assert!(users.starts_with("HTTP/1.1 200"), "{users}");
    assert!(users.contains("alice@example.com"), "{users}");

    child.kill().await.unwrap();
}
