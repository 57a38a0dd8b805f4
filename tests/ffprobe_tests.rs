//! Integration tests for the ffprobe service.
//!
//! Tests cover:
//! - Successful runs against a fake ffprobe script
//! - Non-zero exit and unparseable output
//! - Missing binaries and timeouts
//!
//! The fake binaries are shell scripts, so these tests only run on unix.

#![cfg(unix)]

use media_probe::services::ffprobe::{Ffprobe, Probe};
use media_probe::{ProbeError, ProbeErrorKind};
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::TempDir;

/// Write an executable script standing in for ffprobe.
fn fake_ffprobe(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("ffprobe");
    fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    let mut perms = fs::metadata(&path).unwrap().permissions();
    perms.set_mode(0o755);
    fs::set_permissions(&path, perms).unwrap();
    path
}

#[tokio::test]
async fn test_probe_parses_fixture_output() {
    let temp_dir = TempDir::new().unwrap();
    let bin = fake_ffprobe(
        temp_dir.path(),
        r#"echo '{"format":{"duration":"12.50","size":"1048576","bit_rate":"512000"}}'"#,
    );

    let meta = Ffprobe::new(bin)
        .probe(Path::new("/videos/movie.mp4"))
        .await
        .unwrap();

    assert_eq!(meta.duration, 12.5);
    assert_eq!(meta.size, 1_048_576);
    assert_eq!(meta.bit_rate, 512_000);
}

#[tokio::test]
async fn test_probe_passes_arguments_without_shell() {
    let temp_dir = TempDir::new().unwrap();
    let args_file = temp_dir.path().join("args.txt");
    let bin = fake_ffprobe(
        temp_dir.path(),
        &format!(
            r#"for a in "$@"; do printf '%s\n' "$a" >> '{}'; done
echo '{{"format":{{"duration":"1","size":"2","bit_rate":"3"}}}}'"#,
            args_file.display()
        ),
    );

    let tricky = r#"/tmp/my"file $(touch pwned);`x`.mp4"#;
    Ffprobe::new(bin).probe(Path::new(tricky)).await.unwrap();

    let recorded = fs::read_to_string(&args_file).unwrap();
    let args: Vec<&str> = recorded.lines().collect();
    assert_eq!(
        args,
        vec![
            "-v",
            "error",
            "-show_entries",
            "format=duration,size,bit_rate",
            "-of",
            "json",
            tricky,
        ]
    );
}

#[tokio::test]
async fn test_probe_nonzero_exit() {
    let temp_dir = TempDir::new().unwrap();
    let bin = fake_ffprobe(
        temp_dir.path(),
        r#"echo "$7: No such file or directory" >&2; exit 1"#,
    );

    let err = Ffprobe::new(bin)
        .probe(Path::new("/videos/missing.mp4"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ProbeErrorKind::ExecutionFailed);
    let msg = err.to_string();
    assert!(msg.contains("/videos/missing.mp4"));
    assert!(msg.contains("No such file or directory"));
    match err {
        ProbeError::Exit { code, .. } => assert_eq!(code, Some(1)),
        other => panic!("expected exit error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_probe_unparseable_output() {
    let temp_dir = TempDir::new().unwrap();
    let bin = fake_ffprobe(temp_dir.path(), "echo 'not json'");

    let err = Ffprobe::new(bin)
        .probe(Path::new("/videos/odd.mp4"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ProbeErrorKind::ParseFailed);
    let msg = err.to_string();
    assert!(msg.contains("/videos/odd.mp4"));
    assert!(msg.contains("not json"));
}

#[tokio::test]
async fn test_probe_empty_output() {
    let temp_dir = TempDir::new().unwrap();
    let bin = fake_ffprobe(temp_dir.path(), "exit 0");

    let err = Ffprobe::new(bin)
        .probe(Path::new("/videos/quiet.mp4"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ProbeErrorKind::ParseFailed);
    assert!(err.to_string().contains("/videos/quiet.mp4"));
}

#[tokio::test]
async fn test_probe_missing_binary() {
    let temp_dir = TempDir::new().unwrap();
    let err = Ffprobe::new(temp_dir.path().join("no-such-ffprobe"))
        .probe(Path::new("/videos/movie.mp4"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::Launch { .. }));
    assert_eq!(err.kind(), ProbeErrorKind::ExecutionFailed);
    assert!(err.to_string().contains("/videos/movie.mp4"));
}

#[tokio::test]
async fn test_probe_timeout() {
    let temp_dir = TempDir::new().unwrap();
    let bin = fake_ffprobe(temp_dir.path(), "sleep 5");

    let err = Ffprobe::new(bin)
        .with_timeout(Duration::from_millis(200))
        .probe(Path::new("/videos/hung.mp4"))
        .await
        .unwrap_err();

    assert!(matches!(err, ProbeError::TimedOut { .. }));
    assert_eq!(err.kind(), ProbeErrorKind::ExecutionFailed);
}

#[tokio::test]
async fn test_repeated_probe_runs_binary_each_time() {
    let temp_dir = TempDir::new().unwrap();
    let counter = temp_dir.path().join("calls.txt");
    let bin = fake_ffprobe(
        temp_dir.path(),
        &format!(
            r#"echo run >> '{}'
echo '{{"format":{{"duration":"1","size":"2","bit_rate":"3"}}}}'"#,
            counter.display()
        ),
    );

    let ffprobe = Ffprobe::new(bin);
    let path = Path::new("/videos/same.mp4");
    ffprobe.probe(path).await.unwrap();
    ffprobe.probe(path).await.unwrap();

    let calls = fs::read_to_string(&counter).unwrap();
    assert_eq!(calls.lines().count(), 2);
}

#[test]
fn test_is_installed() {
    let temp_dir = TempDir::new().unwrap();
    let bin = fake_ffprobe(
        temp_dir.path(),
        r#"echo "ffprobe version 6.1 Copyright (c) 2007-2023""#,
    );
    let ffprobe = Ffprobe::new(bin);
    assert!(ffprobe.is_installed());
    assert_eq!(
        ffprobe.version().unwrap(),
        "ffprobe version 6.1 Copyright (c) 2007-2023"
    );

    assert!(!Ffprobe::new(temp_dir.path().join("missing")).is_installed());
}
