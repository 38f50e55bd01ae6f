use std::process::Command;

#[test]
fn trace_route_prints_inter_pod_path() {
    let output = Command::new(env!("CARGO_BIN_EXE_trace_route"))
        .args(["--src", "p0_s0_h2", "--dst", "10.3.1.3"])
        .output()
        .expect("run trace_route");
    assert!(
        output.status.success(),
        "trace_route failed: stderr={}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(
        lines,
        vec![
            "p0_s0_h2 -> port 1",
            "p0_s0 -> port 4",
            "p0_s3 -> port 3",
            "c_s2 -> port 4",
            "p3_s3 -> port 2",
            "p3_s1 -> port 2",
            "p3_s1_h3",
        ]
    );
}

#[test]
fn trace_route_fails_for_unknown_destination() {
    let output = Command::new(env!("CARGO_BIN_EXE_trace_route"))
        .args(["--src", "p0_s0_h2", "--dst", "10.0.0.9"])
        .output()
        .expect("run trace_route");
    assert!(!output.status.success());

    let output = Command::new(env!("CARGO_BIN_EXE_trace_route"))
        .args(["--src", "p0_s0", "--dst", "10.0.0.3"])
        .output()
        .expect("run trace_route");
    assert!(!output.status.success());
}
