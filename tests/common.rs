//! Shared test utilities for integration tests.
//!
//! Provides helpers for writing markdown fixtures into temporary
//! directories and for running the built binary.

#![allow(dead_code)]

use anyhow::{Result, bail};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// Writes a markdown fixture into a fresh temporary directory.
///
/// # Arguments
///
/// * `name`: File name of the fixture
/// * `content`: Markdown content
///
/// # Returns
///
/// Temporary directory (kept alive by the caller) and the fixture path
///
/// # Errors
///
/// Returns error if directory creation or the write fails
pub fn write_fixture(name: &str, content: &str) -> Result<(TempDir, PathBuf)> {
    let dir = TempDir::new()?;
    let path = dir.path().join(name);
    std::fs::write(&path, content)?;
    Ok((dir, path))
}

/// Runs the sitemark binary with arguments and optional stdin.
///
/// # Errors
///
/// Returns error if the process cannot be spawned
pub fn run_sitemark(args: &[&str], stdin: Option<&str>) -> Result<Output> {
    let mut child = Command::new(env!("CARGO_BIN_EXE_sitemark"))
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()?;

    {
        let mut pipe = child.stdin.take().expect("stdin should be piped");
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes())?;
        }
    }

    Ok(child.wait_with_output()?)
}

/// Returns stdout of a successful run as UTF8.
///
/// # Errors
///
/// Returns error with stderr attached if the process failed
pub fn stdout_of(output: &Output) -> Result<String> {
    if !output.status.success() {
        bail!(
            "sitemark failed: {}",
            String::from_utf8_lossy(&output.stderr)
        );
    }
    Ok(String::from_utf8(output.stdout.clone())?)
}

/// Converts a path to UTF8 for use as a command argument.
pub fn arg(path: &Path) -> &str {
    path.to_str().expect("Test path should be valid UTF8")
}
