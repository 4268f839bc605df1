//! Git — branch and commit extraction via a shell fork.

use std::path::Path;

use thiserror::Error;

use crate::cmd::{self, CmdError};

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Not a git repository (or any of the parent directories): '{dir}'")]
    NotARepository { dir: String },
    #[error("Unexpected git failure ({stderr}): '{dir}'")]
    Unexpected { stderr: String, dir: String },
    #[error(transparent)]
    Cmd(#[from] CmdError),
}

/// Current checkout metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitRevision {
    /// `git describe --always` output — a tag or an abbreviated commit hash.
    pub commit: String,
    pub branch: String,
}

/// Extract the current commit and branch of the repository at `dir`.
pub fn current_revision(dir: impl AsRef<Path>) -> Result<GitRevision, GitError> {
    let dir = dir.as_ref();

    let commit = git_line(dir, "describe --always")?;
    let branch = git_line(dir, "rev-parse --abbrev-ref HEAD")?;

    Ok(GitRevision { commit, branch })
}

fn git_line(dir: &Path, args: &str) -> Result<String, GitError> {
    let output = cmd::run(&format!("git -C '{}' {}", dir.display(), args))?;

    if !output.success() {
        if output.stderr.contains("not a git repository") {
            return Err(GitError::NotARepository {
                dir: dir.display().to_string(),
            });
        }
        return Err(GitError::Unexpected {
            stderr: output.stderr,
            dir: dir.display().to_string(),
        });
    }

    Ok(output.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_directory_is_not_a_repository() {
        let dir = tempfile::tempdir().unwrap();
        let err = current_revision(dir.path()).unwrap_err();
        assert!(matches!(err, GitError::NotARepository { .. }));
    }

    #[test]
    fn test_current_revision_of_fresh_repository() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().display().to_string();

        let init = cmd::run(&format!("git -C '{path}' init -q")).unwrap();
        assert!(init.success(), "git init failed: {}", init.stderr);
        let commit = cmd::run(&format!(
            "git -C '{path}' -c user.email=corvus@test -c user.name=corvus \
             commit -q --allow-empty -m init"
        ))
        .unwrap();
        assert!(commit.success(), "git commit failed: {}", commit.stderr);

        let revision = current_revision(dir.path()).unwrap();
        assert!(!revision.commit.is_empty());
        assert!(!revision.branch.is_empty());
        assert_ne!(revision.branch, "HEAD");
    }
}
