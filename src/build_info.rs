//! Build-time information
//!
//! Build metadata captured at compile time by `build.rs`. Cargo and rustc
//! values are always present; git values are absent when building outside a
//! checkout.

/// Build timestamp (when the binary was compiled)
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Cargo optimization level (0, 1, 2, 3, s, z)
pub const CARGO_OPT_LEVEL: &str = env!("VERGEN_CARGO_OPT_LEVEL");

/// Target triple (e.g., x86_64-unknown-linux-gnu, x86_64-apple-darwin)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

/// Rust compiler version (e.g., 1.85.0)
pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// Rust channel (stable, beta, or nightly)
pub const RUSTC_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");

pub const GIT_SHA: Option<&str> = option_env!("VERGEN_GIT_SHA");
pub const GIT_BRANCH: Option<&str> = option_env!("VERGEN_GIT_BRANCH");
pub const GIT_DIRTY: Option<&str> = option_env!("VERGEN_GIT_DIRTY");

/// First seven characters of the commit SHA, or "unknown"
pub fn git_sha_short() -> &'static str {
    match GIT_SHA {
        Some(sha) if sha.len() >= 7 && sha.is_char_boundary(7) => &sha[..7],
        Some(sha) if !sha.is_empty() => sha,
        _ => "unknown",
    }
}

pub fn is_git_dirty() -> bool {
    GIT_DIRTY == Some("true")
}

/// Returns a formatted build version string
///
/// Format: `{pkg_version}+{sha}-{target_triple}-opt{opt_level}`
pub fn version_string() -> String {
    format!(
        "{}+{}-{}-opt{}",
        env!("CARGO_PKG_VERSION"),
        git_sha_short(),
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL
    )
}

/// Returns a detailed build info string
pub fn detailed_info() -> String {
    format!(
        "Built: {}\nCommit: {}@{}{}\nTarget: {}\nOptimization: {}\nRustc: {} ({})",
        BUILD_TIMESTAMP,
        GIT_BRANCH.unwrap_or("unknown"),
        git_sha_short(),
        if is_git_dirty() { " (dirty)" } else { "" },
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL,
        RUSTC_SEMVER,
        RUSTC_CHANNEL
    )
}
