use std::process::Command;

#[test]
fn help_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swiper"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute swiper");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("maximized windows"));
}

#[test]
fn version_exits_successfully() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swiper"));
    cmd.arg("--version");

    // Act
    let output = cmd.output().expect("failed to execute swiper");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("swiper"));
}

#[test]
fn switch_requires_a_direction() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swiper"));
    cmd.arg("switch");

    // Act
    let output = cmd.output().expect("failed to execute swiper");

    // Assert
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Usage"));
}

#[test]
fn switch_help_lists_both_directions() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swiper"));
    cmd.args(["switch", "--help"]);

    // Act
    let output = cmd.output().expect("failed to execute swiper");

    // Assert
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("prev"));
    assert!(stdout.contains("next"));
}

#[test]
fn daemon_is_hidden_from_help() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swiper"));
    cmd.arg("--help");

    // Act
    let output = cmd.output().expect("failed to execute swiper");

    // Assert
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        !stdout
            .lines()
            .any(|line| line.trim_start().starts_with("daemon"))
    );
}

#[test]
fn spy_rejects_non_numeric_interval() {
    // Arrange
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_swiper"));
    cmd.args(["debug", "spy", "--interval-ms", "fast"]);

    // Act
    let output = cmd.output().expect("failed to execute swiper");

    // Assert
    assert!(!output.status.success());
}
