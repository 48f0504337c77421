//! End-to-end checks of the `cityweather` binary's exit policy.
//!
//! None of these reach the real weather service: config failures stop the run
//! before any request, and fetch failures target a closed local port.

use std::{
    fs,
    io::Write,
    net::TcpListener,
    path::Path,
    process::{Command, Output, Stdio},
};
use tempfile::TempDir;

fn cityweather(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cityweather"))
        .args(args)
        .current_dir(dir)
        .env_remove("RUST_LOG")
        .output()
        .expect("binary should start")
}

fn closed_port_endpoint() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}/data/2.5/weather")
}

#[test]
fn missing_config_exits_with_failure_before_fetching() {
    let dir = TempDir::new().unwrap();

    let out = cityweather(dir.path(), &["Paris"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert!(!out.status.success());
    assert!(!stdout.contains("Fetching weather data"));
    assert!(stderr.contains("Could not load configuration"));
    assert!(stderr.contains("config.json"));
    assert!(!dir.path().join("output.json").exists());
}

#[test]
fn malformed_config_exits_with_failure_before_fetching() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), "{ not json").unwrap();

    let out = cityweather(dir.path(), &["Paris"]);
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert!(!out.status.success());
    assert!(!stdout.contains("Fetching weather data"));
    assert!(stderr.contains("Failed to parse config file"));
}

#[test]
fn fetch_failure_still_exits_successfully() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"api_key": "KEY"}"#).unwrap();
    let endpoint = closed_port_endpoint();

    let out = cityweather(dir.path(), &["--endpoint", &endpoint, "Paris"]);
    let stdout = String::from_utf8_lossy(&out.stdout);

    assert!(out.status.success());
    assert!(stdout.contains("Fetching weather data for Paris..."));
    assert!(stdout.contains("Error fetching weather data:"));
    assert!(!dir.path().join("output.json").exists());
}

#[test]
fn explicit_config_path_is_honoured() {
    let dir = TempDir::new().unwrap();
    let nested = dir.path().join("settings");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("weather.json"), r#"{"api_key": "KEY"}"#).unwrap();
    let endpoint = closed_port_endpoint();

    let out = cityweather(
        dir.path(),
        &["--config", "settings/weather.json", "--endpoint", &endpoint, "show", "Oslo"],
    );

    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("Fetching weather data for Oslo..."));
}

#[test]
fn piped_city_answers_the_prompt() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("config.json"), r#"{"api_key": "PIPED-KEY"}"#).unwrap();
    let endpoint = closed_port_endpoint();

    let mut child = Command::new(env!("CARGO_BIN_EXE_cityweather"))
        .args(["--endpoint", &endpoint])
        .current_dir(dir.path())
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("binary should start");

    child.stdin.take().unwrap().write_all(b"Paris\n").unwrap();
    let out = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&out.stdout);
    let stderr = String::from_utf8_lossy(&out.stderr);

    assert!(out.status.success());
    assert!(stdout.contains("Enter city name to get weather forecast:"));
    assert!(stdout.contains("Fetching weather data for Paris..."));
    assert!(stdout.contains("Error fetching weather data:"));
    assert!(!stdout.contains("PIPED-KEY"));
    assert!(!stderr.contains("PIPED-KEY"));
}
