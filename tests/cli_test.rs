use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;

#[test]
fn test_cli_end_to_end() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("payproxy"));
    cmd.arg("tests/fixtures/requests.jsonl");

    cmd.assert()
        .success()
        // First line: successful payment.
        .stdout(predicate::str::contains("\"success\":true"))
        .stdout(predicate::str::contains("payment.success"))
        // Second line: reserved declined card.
        .stdout(predicate::str::contains("card_declined"))
        // Third line: unknown credentials.
        .stdout(predicate::str::contains("client_validation_error"))
        // Final audit report.
        .stdout(predicate::str::contains("\"webhookEvents\""))
        .stdout(predicate::str::contains("\"cardLast4\": \"4242\""));

    Ok(())
}

#[test]
fn test_malformed_submission_is_skipped() {
    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(input, "{{\"clientId\": \"client-123\"").unwrap();
    writeln!(
        input,
        r#"{{"clientId":"client-123","clientSecret":"secret-abc","amount":20.00,"cardNumber":"4242424242424242","cvv":"123","expiryDate":"12/28","idempotencyKey":"key-ok"}}"#
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("payproxy"));
    cmd.arg(input.path());

    cmd.assert()
        .success()
        .stderr(predicate::str::contains("Error reading submission"))
        .stdout(predicate::str::contains("\"success\":true"));
}

#[test]
fn test_clients_file_seeds_credentials() {
    let mut clients = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        clients,
        r#"[{{"client_id":"acme","client_secret":"s3cret","name":"Acme Corp","active":true}}]"#
    )
    .unwrap();

    let mut input = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        input,
        r#"{{"clientId":"acme","clientSecret":"s3cret","amount":12.00,"cardNumber":"4242424242424242","cvv":"123","expiryDate":"12/28","idempotencyKey":"key-acme"}}"#
    )
    .unwrap();

    let mut cmd = Command::new(cargo_bin!("payproxy"));
    cmd.arg(input.path()).arg("--clients").arg(clients.path());

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("\"success\":true"))
        .stdout(predicate::str::contains("\"clientId\": \"acme\""));
}
