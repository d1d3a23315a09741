//! Build Makefile parsing and rewrite.
//!
//! Three assignment lines are recognized by key prefix, independent of
//! their order in the file; every other line passes through untouched.
//! The original file is copied to a `.bak` sibling before any mutation.

use crate::error::{GoBumpError, Result};
use regex::{NoExpand, Regex};
use std::fs;
use std::path::{Path, PathBuf};

const MAJOR_MINOR_KEY: &str = "GO_VERSION_MAJOR_MINOR";
const PATCH_KEY: &str = "GO_VERSION_PATCH";
const HASH_KEY: &str = "PKG_HASH";

/// The three version variables held in the Makefile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MakefileVars {
    pub major_minor: String,
    /// Numeric patch for stable releases, or a prerelease suffix like "rc2"
    pub patch: String,
    pub hash: String,
}

impl MakefileVars {
    /// Reassembles the full version string the pipeline is pinned to:
    /// `("1.24", "3")` -> `1.24.3`, `("1.25", "rc2")` -> `1.25rc2`.
    pub fn current_version(&self) -> String {
        if self.patch.contains("rc") || self.patch.contains("beta") {
            format!("{}{}", self.major_minor, self.patch)
        } else {
            format!("{}.{}", self.major_minor, self.patch)
        }
    }
}

/// Reads the three version variables from the Makefile.
///
/// Fails with no side effects: a missing file is `NotFound`, a missing
/// variable is a parse error, and no backup is written on either.
pub fn read_vars(path: &Path) -> Result<MakefileVars> {
    if !path.exists() {
        return Err(GoBumpError::not_found(format!(
            "Makefile not found at {}",
            path.display()
        )));
    }
    let content = fs::read_to_string(path)?;

    Ok(MakefileVars {
        major_minor: capture(&content, MAJOR_MINOR_KEY, r"(\d+\.\d+)")?,
        patch: capture(&content, PATCH_KEY, r"(.+)")?,
        hash: capture(&content, HASH_KEY, r"(.+)")?,
    })
}

/// Splits a target version into the `(major.minor, patch-or-suffix)` pair
/// written to the Makefile.
///
/// `1.24.7` -> `("1.24", "7")`; `1.25rc3` -> `("1.25", "rc3")`. A string
/// that is neither three dot-separated components nor a recognized
/// prerelease is a format error. Notably the bare `1.25` form has no
/// patch component to write.
pub fn split_target(version: &str) -> Result<(String, String)> {
    if version.contains("rc") || version.contains("beta") {
        let re = compile(r"^(\d+\.\d+)(.+)$")?;
        let caps = re.captures(version).ok_or_else(|| {
            GoBumpError::format(format!("invalid prerelease version '{}'", version))
        })?;
        Ok((caps[1].to_string(), caps[2].to_string()))
    } else {
        let parts: Vec<&str> = version.split('.').collect();
        if parts.len() != 3 {
            return Err(GoBumpError::format(format!(
                "invalid version '{}' - expected MAJOR.MINOR.PATCH",
                version
            )));
        }
        Ok((format!("{}.{}", parts[0], parts[1]), parts[2].to_string()))
    }
}

/// Sibling path the original file is backed up to before a rewrite.
pub fn backup_path(path: &Path) -> PathBuf {
    let mut backup = path.as_os_str().to_os_string();
    backup.push(".bak");
    PathBuf::from(backup)
}

/// Rewrites the three variables for `target`, backing the file up first.
///
/// Each substitution replaces the whole value portion of its line, so any
/// trailing content after the key is discarded. Returns the values written.
pub fn write(path: &Path, target: &str, hash: &str) -> Result<MakefileVars> {
    let (major_minor, patch) = split_target(target)?;
    let content = fs::read_to_string(path)?;

    fs::write(backup_path(path), &content)?;

    let content = replace_line(&content, MAJOR_MINOR_KEY, &major_minor)?;
    let content = replace_line(&content, PATCH_KEY, &patch)?;
    let content = replace_line(&content, HASH_KEY, hash)?;
    fs::write(path, content)?;

    Ok(MakefileVars {
        major_minor,
        patch,
        hash: hash.to_string(),
    })
}

fn capture(content: &str, key: &str, value_pattern: &str) -> Result<String> {
    let re = compile(&format!(r"(?m)^{}:={}", regex::escape(key), value_pattern))?;
    re.captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| GoBumpError::parse(format!("{} not found in Makefile", key)))
}

fn replace_line(content: &str, key: &str, value: &str) -> Result<String> {
    let re = compile(&format!(r"(?m)^{}:=.*$", regex::escape(key)))?;
    let line = format!("{}:={}", key, value);
    Ok(re.replace(content, NoExpand(&line)).into_owned())
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| GoBumpError::parse(format!("bad Makefile pattern '{}': {}", pattern, e)))
}
