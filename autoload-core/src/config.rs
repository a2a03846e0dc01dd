// Autoloader configuration

use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable overriding the directory the manifest search starts from
pub const INSTALL_DIR_ENV: &str = "AUTOLOAD_INSTALL_DIR";

/// How a symbol name is matched against registered namespace prefixes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchStrategy {
    /// Only the first `\`-separated segment is looked up. Registered prefixes with
    /// more than one segment never match.
    #[default]
    FirstSegment,
    /// The longest registered prefix that covers whole leading segments wins.
    LongestPrefix,
}

impl MatchStrategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStrategy::FirstSegment => "first-segment",
            MatchStrategy::LongestPrefix => "longest-prefix",
        }
    }
}

impl FromStr for MatchStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "first-segment" => Ok(MatchStrategy::FirstSegment),
            "longest-prefix" => Ok(MatchStrategy::LongestPrefix),
            other => Err(format!(
                "Unknown match strategy '{}' (expected first-segment or longest-prefix)",
                other
            )),
        }
    }
}

/// Settings used to build and bootstrap a [`crate::Resolver`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AutoloadConfig {
    /// Source file extension, without the dot
    pub extension: String,

    pub strategy: MatchStrategy,

    /// Also merge `autoload-dev.psr-4`
    pub include_dev: bool,

    /// File name searched for while walking up the directory tree
    pub manifest_name: String,

    /// Where the upward search starts (see [`crate::Resolver::install_dir`])
    pub install_dir: Option<PathBuf>,

    /// Skip discovery and read this manifest directly
    pub manifest_path: Option<PathBuf>,
}

fn default_extension() -> String {
    "php".to_string()
}

fn default_manifest_name() -> String {
    "composer.json".to_string()
}

impl Default for AutoloadConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            strategy: MatchStrategy::default(),
            include_dev: false,
            manifest_name: default_manifest_name(),
            install_dir: None,
            manifest_path: None,
        }
    }
}
