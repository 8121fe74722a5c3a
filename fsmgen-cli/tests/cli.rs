//! End-to-end tests for the fsmgen binary.

#![allow(deprecated)] // Command::cargo_bin

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const BREAKER: &str = r##"
use fsmgen::Declaration;

#[derive(Declaration)]
struct CbmDeclaration {
    #[on = r#"Try:"HalfOpened""#]
    Opened: (),
    #[on = r#"Success:"Closed",Failure:"Opened""#]
    HalfOpened: (),
    #[on = r#"Failure:"Opened",Panic:"Terminal",Error:"Terminal""#]
    Closed: (),
    Terminal: (),
}
"##;

const DANGLING: &str = r##"
mod nested {
    struct SomeDeclaration {
        #[on = r#"Aa:"HalfOpened""#]
        First: (),
        #[on = r#"Success:"Closed", Zz:"Fourth""#]
        HalfOpened: (),
        Closed: (),
    }
}
"##;

fn fsmgen(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("fsmgen").unwrap();
    cmd.arg("--dir").arg(dir).env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

fn workspace(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, contents) in files {
        fs::write(dir.path().join(name), contents).unwrap();
    }
    dir
}

// ============================================================================
// Generation
// ============================================================================

#[test]
fn test_generates_machine_next_to_declaration() {
    let dir = workspace(&[("breaker.rs", BREAKER)]);

    fsmgen(dir.path())
        .args(["--type", "CbmDeclaration"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let text = fs::read_to_string(dir.path().join("cbm.fsm.rs")).unwrap();
    assert!(text.starts_with(
        "// Code generated by fsmgen from `CbmDeclaration` in module `breaker`. DO NOT EDIT.\n"
    ));
    assert!(text.contains("pub trait CbmOperator"));
    assert!(text.contains("impl ::fsmgen::Machine for Cbm"));
}

#[test]
fn test_verbose_prints_description() {
    let dir = workspace(&[("breaker.rs", BREAKER)]);

    fsmgen(dir.path())
        .args(["--type", "CbmDeclaration", "-v"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("digraph Cbm {\n"))
        .stdout(predicate::str::contains("\tClosed -> Terminal [label=\"Error, Panic\"];\n"))
        .stdout(predicate::str::contains("\tTerminal [shape=Msquare];\n"));
}

#[test]
fn test_options_reach_generated_code() {
    let dir = workspace(&[("breaker.rs", BREAKER)]);

    fsmgen(dir.path())
        .args(["--type", "CbmDeclaration", "--asynchronous", "--crate-path", "crate::fsm"])
        .assert()
        .success();

    let text = fs::read_to_string(dir.path().join("cbm.fsm.rs")).unwrap();
    assert!(text.contains("pub trait CbmAsyncOperator"));
    assert!(text.contains("impl crate::fsm::Machine for Cbm"));
}

#[test]
fn test_min_event_len_matches_derive_attribute() {
    let switch = r##"
#[derive(fsmgen::Declaration)]
#[declaration(min_event_len = 1)]
struct SwitchDeclaration {
    #[on = r#"T:"On""#]
    Off: (),
    #[on = r#"T:"Off""#]
    On: (),
}
"##;
    let dir = workspace(&[("switch.rs", switch)]);

    fsmgen(dir.path())
        .args(["--type", "SwitchDeclaration"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("event `T` on state `Off` is shorter than 2 characters"));

    fsmgen(dir.path())
        .args(["--type", "SwitchDeclaration", "--min-event-len", "1"])
        .assert()
        .success();
    assert!(dir.path().join("switch.fsm.rs").is_file());
}

#[test]
fn test_dir_from_environment() {
    let dir = workspace(&[("breaker.rs", BREAKER)]);

    Command::cargo_bin("fsmgen")
        .unwrap()
        .env("FSMGEN_DIR", dir.path())
        .args(["--type", "CbmDeclaration"])
        .assert()
        .success();

    assert!(dir.path().join("cbm.fsm.rs").is_file());
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_naming_policy_fails_before_reading_files() {
    // Not Rust: reading it would be a parse error.
    let dir = workspace(&[("broken.rs", "struct {")]);

    fsmgen(dir.path())
        .args(["--type", "Foo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported type name `Foo`"))
        .stderr(predicate::str::contains("broken.rs").not());
}

#[test]
fn test_missing_declaration_fails() {
    let dir = workspace(&[("breaker.rs", BREAKER)]);

    fsmgen(dir.path())
        .args(["--type", "OtherDeclaration"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("declaration `OtherDeclaration` not found"));
}

#[test]
fn test_failing_machine_does_not_block_others() {
    let dir = workspace(&[("breaker.rs", BREAKER), ("dangling.rs", DANGLING)]);

    fsmgen(dir.path())
        .args(["--type", "SomeDeclaration,CbmDeclaration"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "(HalfOpened) -[Zz]-> (Fourth) is declared, but there is no such destination state as `Fourth`",
        ))
        .stderr(predicate::str::contains("dangling.rs:"))
        .stderr(predicate::str::contains("1 of 2 machines failed to generate"));

    assert!(dir.path().join("cbm.fsm.rs").is_file());
    assert!(!dir.path().join("some.fsm.rs").exists());
}

#[test]
fn test_type_is_required() {
    let dir = workspace(&[]);

    fsmgen(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("--type"));
}
