use crate::error::{GoBumpError, Result};
use std::fmt;

/// Release maturity of a Go version, tagged with the data each kind carries.
///
/// Go's release grammar is not semver: a line ships `1.25beta1`, then
/// `1.25rc1`, then the stable `1.25` (patch 0), then `1.25.1` and so on.
/// rc and beta releases always precede patch 0 of their line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseKind {
    /// Shipped patch release (e.g. `1.24.3`)
    Stable { patch: u32 },
    /// Release candidate (e.g. `1.25rc2`)
    ReleaseCandidate { n: u32 },
    /// Beta preview (e.g. `1.25beta1`)
    Beta { n: u32 },
}

impl ReleaseKind {
    /// The patch slot this release competes for. Stable carries its literal
    /// patch; rc/beta are pre-releases of patch 0 of the line.
    fn effective_patch(&self) -> u32 {
        match self {
            ReleaseKind::Stable { patch } => *patch,
            ReleaseKind::ReleaseCandidate { .. } | ReleaseKind::Beta { .. } => 0,
        }
    }

    /// Maturity rank, higher is closer to shipped: stable > rc > beta.
    fn maturity(&self) -> u8 {
        match self {
            ReleaseKind::Stable { .. } => 2,
            ReleaseKind::ReleaseCandidate { .. } => 1,
            ReleaseKind::Beta { .. } => 0,
        }
    }

    /// Prerelease iteration number; stable releases have none.
    fn iteration(&self) -> u32 {
        match self {
            ReleaseKind::Stable { .. } => 0,
            ReleaseKind::ReleaseCandidate { n } | ReleaseKind::Beta { n } => *n,
        }
    }
}

/// A Go toolchain version pinned to one major.minor line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoVersion {
    /// The major.minor line, e.g. "1.24"
    pub line: String,
    pub kind: ReleaseKind,
}

impl GoVersion {
    /// Parse a version string in Go's release grammar.
    ///
    /// Accepts `1.24.3` (stable), `1.25` (stable, implicit patch 0),
    /// `1.25rc2` and `1.25beta1`. Anything else is a format error.
    pub fn parse(s: &str) -> Result<Self> {
        for marker in ["beta", "rc"] {
            if let Some(idx) = s.find(marker) {
                let line = parse_line(&s[..idx], s)?;
                let n = s[idx + marker.len()..].parse::<u32>().map_err(|_| {
                    GoBumpError::format(format!("invalid prerelease number in '{}'", s))
                })?;
                let kind = match marker {
                    "rc" => ReleaseKind::ReleaseCandidate { n },
                    _ => ReleaseKind::Beta { n },
                };
                return Ok(GoVersion { line, kind });
            }
        }

        let parts: Vec<&str> = s.split('.').collect();
        match parts.len() {
            2 => {
                let line = parse_line(s, s)?;
                Ok(GoVersion {
                    line,
                    kind: ReleaseKind::Stable { patch: 0 },
                })
            }
            3 => {
                let line = parse_line(&format!("{}.{}", parts[0], parts[1]), s)?;
                let patch = parts[2]
                    .parse::<u32>()
                    .map_err(|_| GoBumpError::format(format!("invalid patch in '{}'", s)))?;
                Ok(GoVersion {
                    line,
                    kind: ReleaseKind::Stable { patch },
                })
            }
            _ => Err(GoBumpError::format(format!(
                "unrecognized version '{}'",
                s
            ))),
        }
    }

    /// Whether this version supersedes `current_best`.
    ///
    /// Only meaningful for two versions of the same major.minor line; the
    /// resolver never mixes lines. Comparison order: higher effective patch
    /// wins, then maturity (stable > rc > beta), then prerelease iteration.
    /// A stable release at patch 0 therefore beats every rc/beta of its line.
    pub fn is_newer_than(&self, current_best: &GoVersion) -> bool {
        let (a, b) = (&self.kind, &current_best.kind);
        if a.effective_patch() != b.effective_patch() {
            return a.effective_patch() > b.effective_patch();
        }
        if a.maturity() != b.maturity() {
            return a.maturity() > b.maturity();
        }
        a.iteration() > b.iteration()
    }
}

impl fmt::Display for GoVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ReleaseKind::Stable { patch } => write!(f, "{}.{}", self.line, patch),
            ReleaseKind::ReleaseCandidate { n } => write!(f, "{}rc{}", self.line, n),
            ReleaseKind::Beta { n } => write!(f, "{}beta{}", self.line, n),
        }
    }
}

/// Validates a major.minor line ("N.M", both numeric).
fn parse_line(line: &str, original: &str) -> Result<String> {
    let parts: Vec<&str> = line.split('.').collect();
    let numeric = |p: &&str| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit());
    if parts.len() == 2 && parts.iter().all(numeric) {
        Ok(line.to_string())
    } else {
        Err(GoBumpError::format(format!(
            "unrecognized version '{}'",
            original
        )))
    }
}
