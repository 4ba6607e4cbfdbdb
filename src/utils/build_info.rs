/// `--version` text of the CLI.
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("FLOCK_BUILD_HASH"),
    " ",
    env!("FLOCK_BUILD_PROFILE"),
    " built ",
    env!("FLOCK_BUILD_TIMESTAMP"),
    ")"
);

/// Compile-time build metadata produced by `build.rs`.
#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub timestamp: &'static str,
    pub profile: &'static str,
}

/// Returns the statically-embedded build metadata.
pub fn current() -> BuildMetadata {
    BuildMetadata {
        version: env!("CARGO_PKG_VERSION"),
        git_hash: option_env!("FLOCK_BUILD_HASH").unwrap_or("unknown"),
        timestamp: option_env!("FLOCK_BUILD_TIMESTAMP").unwrap_or("unknown"),
        profile: option_env!("FLOCK_BUILD_PROFILE").unwrap_or("unknown"),
    }
}

impl BuildMetadata {
    /// Single-line description, same shape as [`LONG_VERSION`].
    pub fn long_version(&self) -> String {
        format!(
            "{} ({} {} built {})",
            self.version, self.git_hash, self.profile, self.timestamp
        )
    }
}
