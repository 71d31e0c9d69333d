use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new("cargo")
        .args([
            "run", "--quiet", "--bin", "sim", "--", "--games", "6", "--seed", "2", "--threads", "2",
        ])
        .current_dir(env!("CARGO_MANIFEST_DIR"))
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    assert_eq!(v["games"], 6);
    assert_eq!(v["placement"], "buffered");
    for difficulty in ["easy", "normal", "hard"] {
        let stats = &v["results"][difficulty];
        assert_eq!(stats["games"], 6);
        let min = stats["min_shots"].as_u64().expect("min_shots");
        let max = stats["max_shots"].as_u64().expect("max_shots");
        assert!(17 <= min && min <= max && max <= 100);
    }
}
