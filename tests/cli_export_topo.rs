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
fn export_topo_writes_switches_hosts_and_links() {
    let dir = unique_temp_dir("export");
    let out = dir.join("topo.json");

    let output = Command::new(env!("CARGO_BIN_EXE_export_topo"))
        .args(["--k", "4", "--out", out.to_str().unwrap()])
        .output()
        .expect("run export_topo");
    assert!(
        output.status.success(),
        "export_topo failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let raw = fs::read_to_string(&out).expect("read topo.json");
    let v: Value = serde_json::from_str(&raw).expect("parse topo.json");
    assert_eq!(v["k"], 4);
    assert_eq!(v["switches"].as_array().map(|a| a.len()), Some(20));
    assert_eq!(v["hosts"].as_array().map(|a| a.len()), Some(16));
    assert_eq!(v["links"].as_array().map(|a| a.len()), Some(48));

    let core_link = v["links"]
        .as_array()
        .unwrap()
        .iter()
        .find(|l| l["class"] == "core")
        .expect("a core link");
    assert_eq!(core_link["bandwidth_mbps"], 25);
    assert_eq!(core_link["max_queue_size"], 700);

    let _ = fs::remove_dir_all(&dir);
}

#[test]
fn export_topo_legacy_preset_leaves_pod_links_unshaped() {
    let output = Command::new(env!("CARGO_BIN_EXE_export_topo"))
        .args(["--k", "4", "--links", "legacy"])
        .output()
        .expect("run export_topo");
    assert!(output.status.success());

    let v: Value = serde_json::from_slice(&output.stdout).expect("parse stdout json");
    let pod_links: Vec<&Value> = v["links"]
        .as_array()
        .unwrap()
        .iter()
        .filter(|l| l["class"] == "pod")
        .collect();
    assert_eq!(pod_links.len(), 16);
    assert!(pod_links.iter().all(|l| l["bandwidth_mbps"].is_null()));
}
