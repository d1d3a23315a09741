use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{GoBumpError, Result};

/// Represents the complete configuration for go-bump.
///
/// Covers the Makefile location, the endpoints consulted during resolution,
/// the prerelease policy, and per-call network timeouts.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Path to the build Makefile holding the version variables.
    #[serde(default = "default_makefile")]
    pub makefile: String,

    /// Release listing page scanned for candidate versions.
    #[serde(default = "default_listing_url")]
    pub listing_url: String,

    /// Source archive location, with `{version}` substituted.
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Lines for which rc/beta releases may be selected.
    #[serde(default = "default_prerelease_lines")]
    pub prerelease_lines: Vec<String>,

    /// Timeout for the listing fetch and the archive probe, in seconds.
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Timeout for the full archive download, in seconds.
    #[serde(default = "default_download_timeout")]
    pub download_timeout_secs: u64,
}

fn default_makefile() -> String {
    "golang/Makefile".to_string()
}

fn default_listing_url() -> String {
    "https://pkg.go.dev/std?tab=versions".to_string()
}

fn default_archive_url() -> String {
    "https://dl.google.com/go/go{version}.src.tar.gz".to_string()
}

/// Returns the lines currently tracking prereleases (the active next line).
fn default_prerelease_lines() -> Vec<String> {
    vec!["1.25".to_string()]
}

fn default_fetch_timeout() -> u64 {
    30
}

fn default_download_timeout() -> u64 {
    120
}

impl Default for Config {
    fn default() -> Self {
        Config {
            makefile: default_makefile(),
            listing_url: default_listing_url(),
            archive_url: default_archive_url(),
            prerelease_lines: default_prerelease_lines(),
            fetch_timeout_secs: default_fetch_timeout(),
            download_timeout_secs: default_download_timeout(),
        }
    }
}

impl Config {
    /// Whether prerelease candidates may win resolution for this line.
    pub fn allows_prerelease(&self, line: &str) -> bool {
        self.prerelease_lines.iter().any(|l| l == line)
    }

    /// Archive URL for a concrete version string.
    pub fn archive_url_for(&self, version: &str) -> String {
        self.archive_url.replace("{version}", version)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn download_timeout(&self) -> Duration {
        Duration::from_secs(self.download_timeout_secs)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `gobump.toml` in current directory
/// 3. `.gobump.toml` in user config directory
/// 4. Default configuration if no file found
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./gobump.toml").exists() {
        fs::read_to_string("./gobump.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".gobump.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    toml::from_str(&config_str).map_err(|e| GoBumpError::parse(format!("invalid config: {}", e)))
}
