//! Compile-time build metadata exposed by the CLI.

/// Semver package version from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// VCS commit hash captured at build time.
pub const GIT_COMMIT: &str = env!("JOBSNVISA_BUILD_GIT_HASH");

/// Build timestamp captured at compile time.
pub const BUILD_TIMESTAMP: &str = env!("JOBSNVISA_BUILD_TIMESTAMP");

/// Render the `jobsnvisa --version` block.
pub fn cli_version_text() -> String {
    format!("jobsnvisa {VERSION}\ncommit: {GIT_COMMIT}\nbuilt: {BUILD_TIMESTAMP}")
}
