//! Runs the built binary end to end. `plan` never touches the network, so
//! these need no cluster.

use std::process::Command;

use lplock_crypto::keypair_from_seed;
use lplock_types::Signer;

fn lplock() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_lplock"));
    cmd.env_remove("LPLOCK_RPC_URL")
        .env_remove("LPLOCK_LOG_FORMAT")
        .env("LPLOCK_LOG_LEVEL", "info");
    cmd
}

#[test]
fn plan_prints_only_json_on_stdout() {
    let payer = keypair_from_seed(&[4u8; 32]).unwrap();
    let output = lplock()
        .env("PAYER_SECRET_KEY", payer.to_base58_string())
        .arg("plan")
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let planned: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(planned["payer"], payer.pubkey().to_string());
    assert_eq!(planned["locks"].as_array().map(Vec::len), Some(2));

    let logs = String::from_utf8_lossy(&output.stderr);
    assert!(logs.contains("planning launch"));
}

#[test]
fn json_logs_stay_off_stdout() {
    let payer = keypair_from_seed(&[4u8; 32]).unwrap();
    let output = lplock()
        .env("PAYER_SECRET_KEY", payer.to_base58_string())
        .args(["--log-format", "json", "plan"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let planned: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert!(planned["pool"].is_object());
    assert!(String::from_utf8_lossy(&output.stderr).contains("\"planning launch\""));
}

#[test]
fn missing_payer_key_fails() {
    let output = lplock().env_remove("PAYER_SECRET_KEY").arg("plan").output().unwrap();
    assert!(!output.status.success());
    assert!(output.stdout.is_empty());
}
