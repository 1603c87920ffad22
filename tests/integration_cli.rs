use std::fs;
use std::path::PathBuf;
use std::process::Command;

fn get_cli_binary() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_camera-launch-cli"))
}

const SCENE: &str = r#"(
    objects: [
        (name: "camera1", kind: Transform, translation: (0.0, 2.0, 0.0)),
        (name: "camera1Shape", kind: CameraShape, parent: Some("camera1")),
        (name: "pCube1", kind: Transform),
    ],
    selection: ["camera1"],
    current_frame: 1,
)"#;

#[test]
fn test_cli_trajectory_table() {
    let output = Command::new(get_cli_binary())
        .args(["trajectory", "--speed", "20", "--angle", "45", "--duration", "3"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("TRAJECTORY RESULTS"), "Should contain summary: {}", stdout);
    assert!(stdout.contains("73"), "Should report 73 samples: {}", stdout);
    // 73 samples shown every 7th frame at 24 fps
    assert!(
        stdout.contains("every 7 frames, 0.292s"),
        "Heading should match the row spacing: {}",
        stdout
    );
}

#[test]
fn test_cli_trajectory_csv_has_one_row_per_frame() {
    let output = Command::new(get_cli_binary())
        .args([
            "trajectory",
            "--velocity", "10", "10", "3",
            "--duration", "1",
            "--gravity", "-9.81",
            "--start-frame", "0",
            "--output", "csv",
        ])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines[0], "frame,time,x,y,z");
    assert_eq!(lines.len(), 26);
    assert_eq!(lines[25], "24,1.0000,10.0000,5.0950,3.0000");
}

#[test]
fn test_cli_trajectory_json() {
    let output = Command::new(get_cli_binary())
        .args(["trajectory", "--duration", "0", "--start", "1", "-2", "3", "--output", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).expect("Should be JSON");
    let samples = value["samples"].as_array().unwrap();
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0]["position"], serde_json::json!([1.0, -2.0, 3.0]));
}

#[test]
fn test_cli_rejects_zero_frame_rate() {
    let output = Command::new(get_cli_binary())
        .args(["trajectory", "--frame-rate", "0"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Zero frame rate should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("frame rate"), "Should explain the failure: {}", stderr);
}

#[test]
fn test_cli_rejects_unrepresentable_frame_ranges() {
    for args in [
        vec!["trajectory", "--duration", "1e20"],
        vec!["trajectory", "--duration", "1", "--start-frame", "9223372036854775807"],
    ] {
        let output = Command::new(get_cli_binary())
            .args(&args)
            .output()
            .expect("Failed to execute command");

        assert!(!output.status.success(), "{:?} should fail", args);
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("invalid configuration"), "Should fail cleanly: {}", stderr);
        assert!(!stderr.contains("panicked"), "Should not panic: {}", stderr);
    }
}

#[test]
fn test_cli_velocity_modes_conflict() {
    let output = Command::new(get_cli_binary())
        .args(["trajectory", "--speed", "5", "--velocity", "1", "2", "3"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Polar and cartesian flags should conflict");
}

#[test]
fn test_cli_until_landing() {
    let output = Command::new(get_cli_binary())
        .args(["trajectory", "--velocity", "0", "9.81", "0", "--until-landing", "--output", "csv"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    // header + 49 frames over two seconds at 24 fps
    assert_eq!(stdout.lines().count(), 50);
}

#[test]
fn test_cli_launch_writes_timeline() {
    let dir = tempfile::tempdir().unwrap();
    let scene = dir.path().join("scene.ron");
    let timeline = dir.path().join("out/timeline.json");
    fs::write(&scene, SCENE).unwrap();

    let output = Command::new(get_cli_binary())
        .args(["launch", "--scene"])
        .arg(&scene)
        .arg("--timeline-out")
        .arg(&timeline)
        .args(["--output", "json"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Command should succeed: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["camera"], "camera1");
    assert_eq!(report["playback_range"]["min_frame"], 1);
    assert_eq!(report["playback_range"]["max_frame"], 73);

    let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&timeline).unwrap()).unwrap();
    let keys = written["curves"]["camera1"]["TranslateY"]["keys"].as_array().unwrap();
    assert_eq!(keys.len(), 73);
    assert_eq!(keys[0]["value"], 2.0);
    assert_eq!(keys[0]["in_tangent"], "Linear");
}

#[test]
fn test_cli_launch_without_camera_fails() {
    let dir = tempfile::tempdir().unwrap();
    let scene = dir.path().join("scene.ron");
    fs::write(&scene, SCENE.replace(r#"selection: ["camera1"]"#, r#"selection: ["pCube1"]"#)).unwrap();

    let output = Command::new(get_cli_binary())
        .args(["launch", "--scene"])
        .arg(&scene)
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Launching a non-camera should fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("is not a camera"), "Should name the problem: {}", stderr);
}

#[test]
fn test_cli_shelf_install_and_uninstall() {
    let dir = tempfile::tempdir().unwrap();
    let registry = dir.path().join("shelves.ron");

    let install = Command::new(get_cli_binary())
        .args(["shelf", "install", "--registry"])
        .arg(&registry)
        .output()
        .expect("Failed to execute command");
    assert!(install.status.success(), "Install should succeed");
    assert!(fs::read_to_string(&registry).unwrap().contains("CameraLaunch"));

    let uninstall = Command::new(get_cli_binary())
        .args(["shelf", "uninstall", "--registry"])
        .arg(&registry)
        .output()
        .expect("Failed to execute command");
    assert!(uninstall.status.success(), "Uninstall should succeed");
    assert!(String::from_utf8_lossy(&uninstall.stdout).contains("removed"));
    assert!(!fs::read_to_string(&registry).unwrap().contains("CameraLaunch"));
}

#[test]
fn test_cli_help() {
    let output = Command::new(get_cli_binary())
        .args(["--help"])
        .output()
        .expect("Failed to execute command");

    assert!(output.status.success(), "Help command should succeed");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("trajectory"), "Should list trajectory command");
    assert!(stdout.contains("launch"), "Should list launch command");
    assert!(stdout.contains("shelf"), "Should list shelf command");
    assert!(stdout.contains("info"), "Should list info command");
}

#[test]
fn test_cli_invalid_command() {
    let output = Command::new(get_cli_binary())
        .args(["invalid-command"])
        .output()
        .expect("Failed to execute command");

    assert!(!output.status.success(), "Invalid command should fail");
}
