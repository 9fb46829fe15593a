// Test code uses unwrap/expect for clarity - panics provide good test failure messages
#![allow(clippy::unwrap_used, clippy::expect_used)]

//! End-to-end tests for the `nikl` binary.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use pretty_assertions::assert_eq;

fn nikl() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_nikl"));
    cmd.env_remove("RUST_LOG");
    cmd
}

fn run_script(source: &str) -> Output {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("script.nk");
    std::fs::write(&path, source).unwrap();
    run_path(&path, &[])
}

fn run_path(path: &Path, flags: &[&str]) -> Output {
    nikl()
        .args(flags)
        .arg("--color=never")
        .arg(path)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8(output.stdout.clone()).unwrap()
}

fn stderr(output: &Output) -> String {
    String::from_utf8(output.stderr.clone()).unwrap()
}

#[test]
fn runs_a_script() {
    let output = run_script("let a = [1, 2, 3]\nprint(len(a))\n");
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "3\n");
}

#[test]
fn iterates_map_pairs_in_insertion_order() {
    let output = run_script(
        "let m = {\"a\": 1, \"b\": 2}\nfor k, v in m {\n    print(k, v)\n}\n",
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "a 1\nb 2\n");
}

#[test]
fn runtime_error_exits_nonzero_with_diagnostic() {
    let output = run_script("print(\"before\")\nmissing(1)\nprint(\"after\")\n");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "before\n");
    let err = stderr(&output);
    assert!(err.contains("NameError"), "{err}");
    assert!(err.contains("script.nk"), "{err}");
}

#[test]
fn parse_error_runs_nothing() {
    let output = run_script("print(1)\nlet = 2\n");
    assert_eq!(output.status.code(), Some(1));
    assert_eq!(stdout(&output), "");
    assert!(stderr(&output).contains("ParseError"));
}

#[test]
fn directory_runs_its_entry_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("main.nk"), "print(\"from main\")\n").unwrap();
    let output = run_path(dir.path(), &[]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "from main\n");
}

#[test]
fn missing_file_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let output = run_path(&dir.path().join("absent.nk"), &[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("cannot find file"));
}

#[test]
fn max_depth_option_limits_recursion() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deep.nk");
    std::fs::write(&path, "fn down(n) {\n    return down(n + 1)\n}\ndown(0)\n").unwrap();
    let output = run_path(&path, &["--max-depth=64"]);
    assert_eq!(output.status.code(), Some(1));
    let err = stderr(&output);
    assert!(err.contains("StackOverflow"), "{err}");
    assert!(err.contains("more calls"), "{err}");
}

#[test]
fn showcase_script() {
    let source = r#"
fn make_counter() {
    let count = 0
    fn next() {
        count = count + 1
        return count
    }
    return next
}

let tick = make_counter()
tick()
print(tick() * 21)

let pets = {"cats": 3, "dogs": 1}
pets["cats"] = pets["cats"] + 1
print(len(pets) + 1)
print(1 < 2, 2 < 1)
"#;
    let output = run_script(source);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "42\n3\nTrue False\n");
}

#[test]
fn repl_over_stdin() {
    let mut child = nikl()
        .arg("--color=never")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"let x = 2\nprint(x * 21)\nprint(nope)\nprint(\"still here\")\nexit\n")
        .unwrap();
    let output = child.wait_with_output().unwrap();

    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.starts_with("Welcome to Nikl REPL!\n"), "{out}");
    assert!(out.contains("42\n"), "{out}");
    assert!(out.contains("still here\n"), "{out}");
    assert!(stderr(&output).contains("NameError"));
}

#[test]
fn lex_command_lists_tokens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tokens.nk");
    std::fs::write(&path, "let x = 1").unwrap();
    let output = nikl().arg("lex").arg(&path).output().unwrap();
    assert!(output.status.success());
    let out = stdout(&output);
    assert!(out.contains("Ident(\"x\")"), "{out}");
    assert!(out.contains("Int(1)"), "{out}");
}

#[test]
fn unknown_option_is_rejected() {
    let output = nikl().arg("--frobnicate").output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unknown option"));
}

#[test]
fn extra_arguments_are_rejected() {
    let output = nikl().args(["run", "a.nk", "b.nk"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unexpected argument 'b.nk'"));

    let output = nikl().args(["a.nk", "junk"]).output().unwrap();
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains("unexpected argument 'junk'"));
}

#[test]
fn version_prints_package_version() {
    let output = nikl().arg("version").output().unwrap();
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("nikl "));
}
