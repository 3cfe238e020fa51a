use assert_cmd::Command;
use image::{Rgba, RgbaImage};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn neopix_cmd(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("neopix-diff").unwrap();
    cmd.current_dir(cwd).env_remove("RUST_LOG");
    cmd
}

fn write_png(path: &Path, color: [u8; 4]) {
    RgbaImage::from_pixel(16, 16, Rgba(color)).save(path).unwrap();
}

#[test]
fn no_arguments_prints_help() {
    let temp = TempDir::new().unwrap();
    neopix_cmd(temp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Usage"));
}

#[test]
fn missing_input_creates_nothing() {
    let temp = TempDir::new().unwrap();
    neopix_cmd(temp.path())
        .args(["--threshold", "1", "--dir", "ws"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--input"));

    assert!(!temp.path().join("ws").exists());
}

#[test]
fn first_run_then_identical_second_run() {
    let temp = TempDir::new().unwrap();
    write_png(&temp.path().join("a.png"), [20, 40, 60, 255]);

    neopix_cmd(temp.path())
        .args(["--input", "a.png", "--threshold", "1", "--dir", "./ws"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Baseline created"));

    let ws = temp.path().join("ws");
    assert_eq!(
        fs::read(ws.join("xxx/a.png")).unwrap(),
        fs::read(temp.path().join("a.png")).unwrap()
    );
    assert!(ws.join("yyy/a.png").is_file());
    assert!(ws.join("diff/a.png").is_file());

    neopix_cmd(temp.path())
        .args(["--input", "a.png", "--threshold", "1", "--dir", "./ws"])
        .assert()
        .code(0)
        .stderr(predicate::str::contains("0.00% mismatch"));

    assert!(ws.join("diff/a.png").is_file());
    assert!(image::open(ws.join("diff/a.png")).is_ok());
}

#[test]
fn changed_image_exceeds_threshold() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("shot.png");
    write_png(&input, [0, 0, 0, 255]);

    neopix_cmd(temp.path())
        .args(["-i", "shot.png", "-t", "1"])
        .assert()
        .code(0);

    write_png(&input, [255, 255, 255, 255]);
    neopix_cmd(temp.path())
        .args(["-i", "shot.png", "-t", "1"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("exceeds threshold"));

    // the baseline is untouched, the latest slot holds the new image
    let baseline = image::open(temp.path().join("xxx/shot.png")).unwrap().to_rgba8();
    let latest = image::open(temp.path().join("yyy/shot.png")).unwrap().to_rgba8();
    assert_eq!(*baseline.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
    assert_eq!(*latest.get_pixel(0, 0), Rgba([255, 255, 255, 255]));

    // a generous threshold lets the same change through
    neopix_cmd(temp.path())
        .args(["-i", "shot.png", "-t", "100"])
        .assert()
        .code(0);
}

#[test]
fn change_between_first_and_second_run_is_caught() {
    let temp = TempDir::new().unwrap();
    let input = temp.path().join("a.png");
    write_png(&input, [0, 0, 0, 255]);

    neopix_cmd(temp.path())
        .args(["-i", "a.png", "-m", "colors", "-t", "1"])
        .assert()
        .code(0);

    write_png(&input, [255, 255, 255, 255]);
    neopix_cmd(temp.path())
        .args(["-i", "a.png", "-m", "colors", "-t", "1"])
        .assert()
        .code(1);

    let latest = image::open(temp.path().join("yyy/a.png")).unwrap().to_rgba8();
    assert_eq!(*latest.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
}

#[test]
fn invalid_mode_falls_back_and_completes() {
    let temp = TempDir::new().unwrap();
    write_png(&temp.path().join("a.png"), [1, 2, 3, 255]);

    for _ in 0..2 {
        neopix_cmd(temp.path())
            .args(["-i", "a.png", "-m", "sparkles"])
            .assert()
            .success()
            .stderr(predicate::str::contains("Falling back to default mode: nothing"));
    }
    assert!(temp.path().join("diff/a.png").is_file());
}

#[test]
fn corrupt_image_is_an_operational_error() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("broken.png"), b"not really a png").unwrap();

    neopix_cmd(temp.path())
        .args(["-i", "broken.png"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Could not decode"));

    assert!(temp.path().join("xxx/broken.png").is_file());
    assert!(!temp.path().join("diff/broken.png").exists());
}

#[test]
fn nonexistent_input_fails_without_workspace() {
    let temp = TempDir::new().unwrap();

    neopix_cmd(temp.path())
        .args(["-i", "ghost.png", "-d", "ws"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Input image not found"));

    assert!(!temp.path().join("ws").exists());
}

#[test]
fn settings_file_renames_buckets() {
    let temp = TempDir::new().unwrap();
    let ws = temp.path().join("ws");
    fs::create_dir_all(&ws).unwrap();
    fs::write(
        ws.join("neopix.json"),
        r#"{"baseline_dir": "baseline", "updated_dir": "latest", "diff_dir": "out"}"#,
    )
    .unwrap();
    write_png(&temp.path().join("a.png"), [9, 9, 9, 255]);

    neopix_cmd(temp.path())
        .args(["-i", "a.png", "-d", "ws"])
        .assert()
        .success();

    assert!(ws.join("baseline/a.png").is_file());
    assert!(ws.join("latest/a.png").is_file());
    assert!(ws.join("out/a.png").is_file());
    assert!(!ws.join("xxx").exists());
}

#[test]
fn absolute_input_outside_workspace() {
    let shots = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let input = shots.path().join("page.png");
    write_png(&input, [90, 90, 90, 255]);

    neopix_cmd(work.path())
        .arg("-i")
        .arg(&input)
        .assert()
        .success();

    assert!(work.path().join("xxx/page.png").is_file());
}
