use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn unique_temp_dir(prefix: &str) -> PathBuf {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_nanos();
    let dir = std::env::temp_dir().join(format!(
        "fattree-ctl-{prefix}-{}-{nanos}",
        std::process::id()
    ));
    fs::create_dir_all(&dir).expect("create temp dir");
    dir
}

#[test]
fn fattree_ctl_json_lists_every_switch_table() {
    let output = Command::new(env!("CARGO_BIN_EXE_fattree_ctl"))
        .args(["--k", "4", "--json"])
        .output()
        .expect("run fattree_ctl");
    assert!(
        output.status.success(),
        "fattree_ctl failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let v: Value = serde_json::from_slice(&output.stdout).expect("parse stdout json");
    let tables = v.as_array().expect("stdout must be a JSON array");
    assert_eq!(tables.len(), 20);

    let core = tables
        .iter()
        .find(|t| t["name"] == "c_s0")
        .expect("c_s0 table");
    assert_eq!(core["dpid"], "0000000010000000");
    let rules = core["rules"].as_array().expect("rules array");
    assert_eq!(rules.len(), 4);
    assert_eq!(rules[2]["dst"], "10.2.0.0");
    assert_eq!(rules[2]["mask"], "255.255.0.0");
    assert_eq!(rules[2]["out_port"], 3);
    assert_eq!(rules[2]["priority"], 100);

    let upper = tables
        .iter()
        .find(|t| t["name"] == "p0_s2")
        .expect("p0_s2 table");
    let hashed: Vec<u64> = upper["rules"]
        .as_array()
        .expect("rules array")
        .iter()
        .filter(|r| r["kind"] == "uplink_hashed")
        .map(|r| r["out_port"].as_u64().expect("port"))
        .collect();
    assert_eq!(hashed, vec![3, 4]);
}

#[test]
fn fattree_ctl_reads_config_file() {
    let dir = unique_temp_dir("config");
    let cfg = dir.join("ctl.json");
    fs::write(&cfg, r#"{ "k": 6, "link_preset": "legacy" }"#).expect("write config");

    let output = Command::new(env!("CARGO_BIN_EXE_fattree_ctl"))
        .args(["--config", cfg.to_str().unwrap(), "--json"])
        .output()
        .expect("run fattree_ctl");
    assert!(
        output.status.success(),
        "fattree_ctl failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );
    let v: Value = serde_json::from_slice(&output.stdout).expect("parse stdout json");
    // 6 pods * 6 switches + 9 cores
    assert_eq!(v.as_array().map(|a| a.len()), Some(45));

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn fattree_ctl_rejects_odd_k() {
    for k in ["3", "-2"] {
        let output = Command::new(env!("CARGO_BIN_EXE_fattree_ctl"))
            .args(["--k", k])
            .output()
            .expect("run fattree_ctl");
        assert!(!output.status.success(), "k={k} should fail");
        assert!(output.stdout.is_empty());
    }
}
