//! Integration tests for the swat REPL.
//!
//! These tests run scripts through the REPL and verify behavior.

use swat_kernel::{KernelConfig, LoadOutcome};
use swat_repl::Repl;
use tempfile::TempDir;

/// Helper to run multiple lines through a REPL and collect outputs.
fn run_script(repl: &mut Repl, script: &str) -> Vec<String> {
    let mut outputs = Vec::new();

    for line in script.lines() {
        // Skip comments and empty lines
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        match repl.process_line(line) {
            Ok(Some(output)) => outputs.push(output),
            Ok(None) => {}
            Err(e) => outputs.push(format!("ERROR: {}", e)),
        }
    }

    outputs
}

fn transient_script(script: &str) -> Vec<String> {
    let mut repl = Repl::new().expect("Failed to create REPL");
    run_script(&mut repl, script)
}

// ============================================================================
// Pipelines
// ============================================================================

#[test]
fn echo_prints_without_trailing_newline() {
    let outputs = transient_script("echo hello world");
    assert_eq!(outputs, vec!["hello world"]);
}

#[test]
fn pipeline_through_builtins() {
    let outputs = transient_script(
        r#"
        write /notes.txt alpha beta gamma
        cat /notes.txt | upper
    "#,
    );
    assert_eq!(outputs, vec!["ALPHA BETA GAMMA"]);
}

#[test]
fn redirect_then_read_back() {
    let outputs = transient_script(
        r#"
        echo first > /log.txt
        echo second >> /log.txt
        cat /log.txt
    "#,
    );
    assert_eq!(outputs, vec!["first\nsecond"]);
}

#[test]
fn unknown_command_shows_error_and_code() {
    let outputs = transient_script("frobnicate");
    assert_eq!(outputs, vec!["Command not found: frobnicate\n[exit 127]"]);
}

#[test]
fn grep_without_match_exits_one_quietly() {
    let outputs = transient_script("echo abc | grep zzz");
    assert_eq!(outputs, vec!["[exit 1]"]);
}

// ============================================================================
// Meta-commands
// ============================================================================

#[test]
fn history_meta_command() {
    let outputs = transient_script(
        r#"
        pwd
        cd /tmp
        /history
    "#,
    );
    assert_eq!(outputs.last().map(String::as_str), Some("    1  pwd\n    2  cd /tmp"));
}

#[test]
fn dump_shows_state_json() {
    let outputs = transient_script(
        r#"
        write /a.txt hi
        /dump
    "#,
    );
    let dump: serde_json::Value =
        serde_json::from_str(outputs.last().expect("dump output")).expect("valid json");
    assert_eq!(dump["files"]["/a.txt"]["content"], "hi");
    assert_eq!(dump["cwd"], "/");
}

#[test]
fn reset_clears_files() {
    let outputs = transient_script(
        r#"
        write /a.txt hi
        /reset
        ls /
    "#,
    );
    assert_eq!(outputs, vec!["State cleared."]);
}

#[test]
fn tools_lists_builtins_in_order() {
    let outputs = transient_script("/tools");
    assert!(outputs[0].starts_with("echo cat ls pwd cd"));
}

#[test]
fn unknown_meta_command() {
    let outputs = transient_script("/nope");
    assert!(outputs[0].starts_with("Unknown command: /nope"));
}

// ============================================================================
// Persistence
// ============================================================================

#[test]
fn state_survives_repl_restart() {
    let dir = TempDir::new().expect("tempdir");
    let config = || KernelConfig::persistent("repl").with_data_dir(dir.path());

    let mut first = Repl::with_config(config()).expect("first repl");
    assert_eq!(first.load_outcome(), &LoadOutcome::Fresh);
    run_script(&mut first, "write /keep.txt kept\ncd /work");
    drop(first);

    let mut second = Repl::with_config(config()).expect("second repl");
    assert_eq!(second.load_outcome(), &LoadOutcome::Restored { files: 1 });
    let outputs = run_script(&mut second, "pwd\ncat /keep.txt");
    assert_eq!(outputs, vec!["/work", "kept"]);
}
