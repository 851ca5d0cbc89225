//! Stamps the binary with the commit and build time shown by `--version`.
//!
//! Release pipelines pass both values in the environment; local builds ask
//! git and the clock.

use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

const HASH_VAR: &str = "JOBSNVISA_BUILD_GIT_HASH";
const TIMESTAMP_VAR: &str = "JOBSNVISA_BUILD_TIMESTAMP";

fn main() {
    println!("cargo:rerun-if-env-changed={HASH_VAR}");
    println!("cargo:rerun-if-env-changed={TIMESTAMP_VAR}");

    let hash = std::env::var(HASH_VAR)
        .ok()
        .or_else(head_commit)
        .unwrap_or_else(|| "unknown".to_string());
    let timestamp = std::env::var(TIMESTAMP_VAR).unwrap_or_else(|_| {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs());
        format!("unix:{secs}")
    });

    println!("cargo:rustc-env={HASH_VAR}={hash}");
    println!("cargo:rustc-env={TIMESTAMP_VAR}={timestamp}");
}

fn head_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    let hash = String::from_utf8(output.stdout).ok()?;
    let hash = hash.trim();
    (output.status.success() && !hash.is_empty()).then(|| hash.to_string())
}
