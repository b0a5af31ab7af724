//! Integration tests for command mode (-c/--command flag)

use std::io::Write;
use std::process::{Command, Stdio};

fn cellgrid() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_cellgrid"));
    // Tests must not depend on a user's ~/.config/cellgrid/config.toml.
    cmd.arg("--no-config");
    cmd
}

fn run_command(args: &[&str]) -> (String, String, i32) {
    let output = cellgrid()
        .args(args)
        .output()
        .expect("Failed to execute command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let exit_code = output.status.code().unwrap_or(-1);

    (stdout, stderr, exit_code)
}

#[test]
fn test_numeric_literal() {
    let (stdout, _, code) = run_command(&["-c", "A1 = 5"]);
    assert_eq!(stdout, "A1 = 5\n");
    assert_eq!(code, 0);
}

#[test]
fn test_formula_and_propagation() {
    let (stdout, _, code) = run_command(&[
        "-c",
        "A1 = 3; A2 = 4; A3 = =A1+A2; A4 = =A3+A1; A1 = 10",
    ]);
    assert_eq!(
        stdout,
        "A1 = 3\nA2 = 4\nA3 = 7\nA4 = 10\nA1 = 10\nA3 = 14\nA4 = 24\n"
    );
    assert_eq!(code, 0);
}

#[test]
fn test_repeated_command_flags() {
    let (stdout, _, code) = run_command(&["-c", "B1 = 2", "-c", "get B1"]);
    assert_eq!(stdout, "B1 = 2\nB1: \"2\" -> 2\n");
    assert_eq!(code, 0);
}

#[test]
fn test_formula_errors_are_values() {
    let (stdout, _, code) = run_command(&[
        "-c",
        "A1 = =A1+A2; B1 = =A1+B2+C3; C1 = =Z99+A1",
    ]);
    assert_eq!(stdout, "A1 = ERROR\nB1 = ERROR\nC1 = ERROR\n");
    assert_eq!(code, 0);
}

#[test]
fn test_invalid_cell_id_exits_with_error() {
    let (stdout, stderr, code) = run_command(&["-c", "A1 = 1; K1 = 5; A2 = 2"]);
    assert_eq!(stdout, "A1 = 1\n");
    assert!(stderr.contains("Error:"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_dimensions_flags() {
    let (stdout, _, code) = run_command(&["--rows", "2", "--cols", "2", "-c", "B2 = 1; show"]);
    assert_eq!(stdout, "B2 = 1\n  A         B\n1\n2           1\n");
    assert_eq!(code, 0);

    let (_, stderr, code) = run_command(&["--cols", "27", "-c", "show"]);
    assert!(stderr.contains("Invalid grid dimensions"), "stderr: {stderr}");
    assert_eq!(code, 1);

    let (_, stderr, code) = run_command(&["--rows", "18446744073709551615", "-c", "show"]);
    assert!(stderr.contains("Invalid grid dimensions"), "stderr: {stderr}");
    assert_eq!(code, 1);
}

#[test]
fn test_json_output() {
    let (stdout, _, code) = run_command(&["--json", "-c", "A1 = 1; A2 = =A1+A1"]);
    assert_eq!(
        stdout,
        "[{\"id\":\"A1\",\"value\":1.0}]\n[{\"id\":\"A2\",\"value\":2.0}]\n"
    );
    assert_eq!(code, 0);
}

#[test]
fn test_interactive_mode_reads_stdin() {
    let mut child = cellgrid()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .expect("Failed to spawn");
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"select A1\nedit 7\nbogus\nclear\nedit 1\nget A1\nquit\nA1 = 9\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert_eq!(
        stdout,
        "Selected A1\nA1: \"\" -> \nA1 = 7\nError: Unknown command: bogus (try `help`)\n\
         Cleared\nError: No cell selected (use `select <ID>` first)\nA1: \"\" -> \n"
    );
    assert!(output.status.success());
}

#[test]
fn test_interactive_mode_stops_when_stdout_is_closed() {
    let mut child = cellgrid()
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to spawn");
    drop(child.stdout.take());

    let mut stdin = child.stdin.take().unwrap();
    // The child may already have exited, so the write itself can fail.
    let _ = stdin.write_all(b"A1 = 1\nA2 = 2\nshow\n");
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(output.status.code(), Some(1), "stderr: {stderr}");
    assert!(stderr.contains("Error:"), "stderr: {stderr}");
}
