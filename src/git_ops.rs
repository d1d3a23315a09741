use crate::error::{GoBumpError, Result};
use git2::Repository;

/// Wrapper around git2 Repository for branch discovery.
///
/// The packaging branch name is the source of truth for which Go line to
/// track, so all this tool ever reads from git is the checked-out branch.
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Creates a new GitRepo instance for the current working directory.
    ///
    /// Discovers the git repository in the current directory or parent directories.
    pub fn new() -> Result<Self> {
        let repo = Repository::discover(".")
            .map_err(|e| GoBumpError::not_found(format!("not in a git repository: {}", e)))?;
        Ok(GitRepo { repo })
    }

    /// Name of the currently checked-out branch.
    pub fn current_branch(&self) -> Result<String> {
        let head = self.repo.head()?;
        head.shorthand()
            .map(|name| name.to_string())
            .ok_or_else(|| GoBumpError::not_found("HEAD is not a named branch".to_string()))
    }
}
