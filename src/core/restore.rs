//! Working-tree restore before a rename run.
//!
//! Every run should start from the last committed state rather than stacking
//! on top of a previous run's output. The restore is a collaborator so the
//! pipeline can be exercised without a real checkout.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::utils::command;

/// Restores tracked files under a directory to their committed state.
pub trait WorkingTreeRestorer {
    /// Restore everything under `root` except the paths in `exclude`.
    fn restore(&self, root: &Path, exclude: &[PathBuf]) -> Result<()>;
}

/// Restores through the `git` CLI.
///
/// Excluded paths are staged first; `git restore --worktree` then resets the
/// working tree from the index, leaving the staged paths as they are.
#[derive(Debug, Default)]
pub struct GitRestorer;

impl GitRestorer {
    pub fn new() -> Self {
        Self
    }
}

fn git_error(err: Error) -> Error {
    let detail = err
        .details
        .get("error")
        .and_then(|v| v.as_str())
        .unwrap_or(&err.message)
        .to_string();
    Error::git_command_failed(detail)
}

impl WorkingTreeRestorer for GitRestorer {
    fn restore(&self, root: &Path, exclude: &[PathBuf]) -> Result<()> {
        if !exclude.is_empty() {
            let args = ["add", "--"]
                .into_iter()
                .map(OsStr::new)
                .chain(exclude.iter().map(|p| p.as_os_str()));
            command::run_in(root, "git", args, "git add").map_err(git_error)?;
        }

        command::run_in(
            root,
            "git",
            ["restore", "--worktree", "--", "."],
            "git restore",
        )
        .map_err(git_error)?;

        Ok(())
    }
}

/// Leaves the working tree alone.
#[derive(Debug, Default)]
pub struct NoopRestorer;

impl WorkingTreeRestorer for NoopRestorer {
    fn restore(&self, _root: &Path, _exclude: &[PathBuf]) -> Result<()> {
        Ok(())
    }
}
