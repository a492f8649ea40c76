/// Smoke tests to verify the binary runs without panicking
use std::path::PathBuf;
use std::process::Command;

fn lifegrid(args: &[&str]) -> std::process::Output {
    Command::new("cargo")
        .args(["run", "--quiet", "--"])
        .args(args)
        .output()
        .expect("Failed to execute cargo run")
}

/// Empty settings file so a local ~/.config/lifegrid does not leak in
fn empty_config(tag: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("lifegrid-smoke-{}-{tag}.toml", std::process::id()));
    std::fs::write(&path, "").expect("Failed to write empty config");
    path
}

#[test]
fn binary_shows_help() {
    let output = lifegrid(&["--help"]);

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("lifegrid"), "Help output should mention lifegrid");
    assert!(stdout.contains("print"), "Help output should list the print subcommand");
}

#[test]
fn binary_shows_version() {
    let output = lifegrid(&["--version"]);

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn invalid_subcommand_fails_gracefully() {
    let output = lifegrid(&["nonexistent-command"]);

    assert!(
        !output.status.success(),
        "Invalid subcommand should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Invalid subcommand should not cause panic"
    );
}

#[test]
fn print_blinker_oscillates() {
    let output = lifegrid(&[
        "--config", "Cargo.toml.missing", "print", "-p", "blinker", "-g", "2", "-W", "5", "-H", "5",
    ]);
    // explicit settings file that does not exist is an error
    assert!(!output.status.success());

    let config = empty_config("print");
    let config = config.to_str().unwrap();
    let output = lifegrid(&["--config", config, "print", "-p", "blinker", "-g", "2", "-W", "5", "-H", "5"]);
    assert!(
        output.status.success(),
        "print failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    let rows: Vec<&str> = stdout.lines().collect();
    assert_eq!(rows[2], ".###.");
    assert!(rows[5].contains("generation 2"));
    assert!(rows[5].contains("cycle at 2"));
}

#[test]
fn unknown_pattern_is_reported() {
    let config = empty_config("unknown");
    let output = lifegrid(&["--config", config.to_str().unwrap(), "print", "-p", "no-such-shape"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("unknown pattern: no-such-shape"));
    assert!(!stderr.contains("panicked at"));
}

#[test]
fn patterns_lists_library() {
    let config = empty_config("patterns");
    let output = lifegrid(&["--config", config.to_str().unwrap(), "patterns"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("glider"));
    assert!(stdout.contains("gosper-gun"));
}

#[test]
fn infinite_interval_is_rejected() {
    let config = empty_config("interval");
    let output = lifegrid(&["--config", config.to_str().unwrap(), "run", "--interval", "inf"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid duration"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked at"));
}
