//! CLI integration tests using assert_cmd.
//!
//! No database or network access; every test drives the compiled binary
//! directly. Hunt tests are seeded so they run in bounded time.

use assert_cmd::Command;
use predicates::prelude::*;

fn primeforge() -> Command {
    Command::cargo_bin("primeforge").unwrap()
}

/// 2^127 - 1 in hex: a known prime comfortably inside 512 bits.
const M127_HEX: &str = "7fffffffffffffffffffffffffffffff";

// --- Help and arg validation ---

#[test]
fn help_shows_all_subcommands() {
    primeforge()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("test").and(predicate::str::contains("hunt")));
}

#[test]
fn help_shows_global_options() {
    primeforge().arg("--help").assert().success().stdout(
        predicate::str::contains("--mr-rounds")
            .and(predicate::str::contains("--seed"))
            .and(predicate::str::contains("--threads"))
            .and(predicate::str::contains("--json")),
    );
}

#[test]
fn help_hunt_shows_count() {
    primeforge()
        .args(["hunt", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--count"));
}

#[test]
fn unknown_subcommand_fails() {
    primeforge()
        .arg("nonexistent")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized subcommand"));
}

// --- test subcommand ---

#[test]
fn test_classifies_known_prime() {
    primeforge()
        .args(["--seed", "1", "test", M127_HEX])
        .assert()
        .success()
        .stdout(predicate::str::contains("probably prime"));
}

#[test]
fn test_classifies_known_composite() {
    // 561, the smallest Carmichael number, as hex
    primeforge()
        .args(["--seed", "1", "test", "0x231"])
        .assert()
        .success()
        .stdout(predicate::str::contains("composite"));
}

#[test]
fn test_emits_json_report() {
    primeforge()
        .args(["--seed", "1", "--json", "test", "0x231"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("\"verdict\":\"composite\"")
                .and(predicate::str::contains("\"rounds\":10")),
        );
}

#[test]
fn test_rejects_malformed_hex() {
    primeforge()
        .args(["test", "0xNOTHEX"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid candidate"));
}

// --- hunt subcommand ---

#[test]
fn seeded_hunt_prints_a_full_width_prime() {
    let output = primeforge()
        .args(["--seed", "7", "--mr-rounds", "8", "hunt", "--count", "1"])
        .assert()
        .success()
        .stdout(predicate::str::is_match("^0x[0-9a-f]{128}\n$").unwrap());
    // top hex digit >= 8: the generator forces the 512th bit
    let stdout = String::from_utf8_lossy(&output.get_output().stdout).to_string();
    let top = stdout.as_bytes()[2];
    assert!(
        matches!(top, b'8'..=b'9' | b'a'..=b'f'),
        "hunted prime is not full width: {stdout}"
    );
}
