//! Tests for `ghsecret validate`.

use crate::support::*;
use predicates::prelude::*;
use serde_json::json;

#[test]
fn test_help_lists_commands() {
    let t = Test::new();
    t.cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("handle").and(predicate::str::contains("validate")));
}

#[test]
fn test_validate_valid_properties() {
    let t = Test::new();
    let output = t.validate_stdin(&event_json("Create", "", properties("PlainText", "s3cr3t")));

    assert_success(&output);
    assert_stderr_contains(&output, "resource properties are valid");
    assert_stderr_contains(&output, "acme/widget");
    assert_stderr_contains(&output, "TOKEN");
    assert!(!stderr(&output).contains("s3cr3t"), "plaintext value was printed");
    assert!(stdout(&output).is_empty());
}

#[test]
fn test_validate_shows_store_reference() {
    let t = Test::new();
    let path = t.write(
        "event.json",
        &event_json("Update", "", properties("AWS::SSM::Parameter", "/app/db/password")),
    );

    let output = t
        .cmd()
        .args(["validate", "--event"])
        .arg(path)
        .output()
        .unwrap();

    assert_success(&output);
    assert_stderr_contains(&output, "AWS::SSM::Parameter");
    assert_stderr_contains(&output, "/app/db/password");
}

#[test]
fn test_validate_rejects_empty_secret_name() {
    let t = Test::new();
    let mut props = properties("PlainText", "s3cr3t");
    props["SecretName"] = json!("");

    let output = t.validate_stdin(&event_json("Create", "", props));

    assert_failure(&output);
    assert_stderr_contains(&output, "SecretName is empty");
}

#[test]
fn test_validate_rejects_unknown_source() {
    let t = Test::new();
    let output = t.validate_stdin(&event_json("Create", "", properties("Vault", "x")));

    assert_failure(&output);
    assert_stderr_contains(&output, "invalid SecretResourceType: Vault");
}

#[test]
fn test_validate_rejects_unknown_request_type() {
    let t = Test::new();
    let output = t.validate_stdin(&event_json("Rollback", "", properties("PlainText", "x")));

    assert_failure(&output);
    assert_stderr_contains(&output, "unknown request type: Rollback");
}

#[test]
fn test_validate_rejects_missing_file() {
    let t = Test::new();
    let output = t
        .cmd()
        .args(["validate", "--event", "nope.json"])
        .output()
        .unwrap();

    assert_failure(&output);
}
