//! Latest-release resolution for a target major.minor line.

use crate::domain::GoVersion;
use crate::error::{GoBumpError, Result};
use crate::listing::ReleaseListing;
use crate::ui;

/// What to resolve: the target line, and whether rc/beta candidates may win.
///
/// The prerelease flag is policy decided by the caller (from the configured
/// set of lines), never inside the resolver itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub line: String,
    pub allow_prerelease: bool,
}

impl ResolutionRequest {
    pub fn new(line: impl Into<String>, allow_prerelease: bool) -> Self {
        ResolutionRequest {
            line: line.into(),
            allow_prerelease,
        }
    }
}

/// Derives the target major.minor line from a packaging branch name.
///
/// Branches are named `<minor>.x` for Go 1 lines: `24.x` -> `1.24`.
/// Returns `None` for any other branch name shape.
pub fn line_from_branch(branch: &str) -> Option<String> {
    let minor = branch.strip_suffix(".x")?;
    if !minor.is_empty() && minor.chars().all(|c| c.is_ascii_digit()) {
        Some(format!("1.{}", minor))
    } else {
        None
    }
}

/// Folds listing candidates into the single latest version for the request.
///
/// The result is independent of document order: candidates are totally
/// ordered within a line, so the fold keeps the unique maximum. An
/// unparsable candidate is skipped rather than failing the run.
pub fn resolve<L: ReleaseListing>(request: &ResolutionRequest, listing: &L) -> Result<GoVersion> {
    let mut best: Option<GoVersion> = None;

    for candidate in listing.candidates(&request.line, request.allow_prerelease)? {
        let Ok(version) = GoVersion::parse(&candidate) else {
            continue;
        };
        if best
            .as_ref()
            .map_or(true, |current| version.is_newer_than(current))
        {
            ui::display_status(&format!("Found candidate: {}", version));
            best = Some(version);
        }
    }

    best.ok_or_else(|| {
        GoBumpError::not_found(format!("no release found for Go {}", request.line))
    })
}
