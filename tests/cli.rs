#![cfg(feature = "cli")]

use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn batch_watermark(args: &[&std::ffi::OsStr]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_batch-watermark"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn missing_argument_exits_with_usage() {
    let out = batch_watermark(&[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("Usage"));
}

#[test]
fn help_exits_successfully() {
    let out = batch_watermark(&["--help".as_ref()]);
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stdout).contains("_watermarked"));
}

#[test]
fn nonexistent_directory_exits_one_without_writes() {
    let tmp = TempDir::new().unwrap();
    let missing = tmp.path().join("missing");

    let out = batch_watermark(&[missing.as_os_str()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("not an existing directory"));
    assert!(!tmp.path().join("missing_watermarked").exists());
}

#[test]
fn directory_without_images_exits_one() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("docs");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("notes.txt"), b"text").unwrap();

    let out = batch_watermark(&[dir.as_os_str()]);

    assert_eq!(out.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&out.stderr).contains("no image files found"));
    let output_dir = tmp.path().join("docs_watermarked");
    assert_eq!(fs::read_dir(output_dir).unwrap().count(), 0);
}

#[cfg(unix)]
#[test]
fn per_file_failures_still_exit_zero() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("shots");
    fs::create_dir(&dir).unwrap();
    fs::write(dir.join("a.png"), b"png").unwrap();
    fs::write(dir.join("b.jpg"), b"jpg").unwrap();

    let out = batch_watermark(&["--program".as_ref(), "false".as_ref(), dir.as_os_str()]);

    assert_eq!(out.status.code(), Some(0));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("Failed with error code: 1"));
    assert!(stderr.contains("shots_watermarked"));
}
