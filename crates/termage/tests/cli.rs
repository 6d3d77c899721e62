use std::io::Write;
use std::process::{Command, Output, Stdio};

fn termage(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_termage"))
        .args(args)
        .env_remove("RUST_LOG")
        .stdin(Stdio::null())
        .output()
        .expect("binary runs")
}

fn stdout(output: &Output) -> String {
    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_render_term_mode() {
    let out = termage(&["--output", "term", "render", "[u]RAD[/u]"]);
    assert_eq!(stdout(&out), "\x1b[4mRAD\x1b[24m\n");
}

#[test]
fn test_render_text_mode() {
    let out = termage(&["render", "[color=red]Stay RAD![/color]", "--output", "text"]);
    assert_eq!(stdout(&out), "Stay RAD!\n");
}

#[test]
fn test_render_from_stdin() {
    let mut child = Command::new(env!("CARGO_BIN_EXE_termage"))
        .args(["--output", "term", "render"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(b"[b]piped[/b]\n")
        .unwrap();
    let out = child.wait_with_output().unwrap();
    assert_eq!(stdout(&out), "\x1b[1mpiped\x1b[22m\n");
}

#[test]
fn test_strip_keeps_unknown_brackets() {
    let out = termage(&["--output", "term", "strip", "[b]a[/b] [[x]]"]);
    assert_eq!(stdout(&out), "a [[x]]\n");
}

#[test]
fn test_alert_with_width() {
    let out = termage(&[
        "--output", "text", "--width", "40", "alert", "hi", "--kind", "danger", "-w", "6",
    ]);
    assert_eq!(stdout(&out), "      \n  hi  \n      \n");
}

#[test]
fn test_alert_rejects_unknown_kind() {
    let out = termage(&["alert", "hi", "--kind", "fatal"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("fatal"));
}

#[test]
fn test_heading_and_rule() {
    let out = termage(&["--output", "text", "--width", "6", "heading", "Hi", "--size", "2"]);
    assert_eq!(stdout(&out), "┌────┐\n│Hi  │\n└────┘\n\n");

    let out = termage(&["--output", "text", "--width", "10", "rule", "ab", "--right"]);
    assert_eq!(stdout(&out), "──── ab ──\n");
}

#[test]
fn test_theme_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mine.yaml");
    std::fs::write(&path, "colors:\n  danger: magenta\n").unwrap();

    let out = termage(&[
        "--output",
        "term",
        "--theme",
        path.to_str().unwrap(),
        "render",
        "[color=danger]x[/color]",
    ]);
    assert_eq!(stdout(&out), "\x1b[35mx\x1b[39m\n");
}

#[test]
fn test_missing_theme_file_fails() {
    let out = termage(&["--theme", "/nonexistent/theme.yaml", "render", "x"]);
    assert!(!out.status.success());
    assert!(String::from_utf8_lossy(&out.stderr).contains("loading theme"));
}
