//! Submodule commit pins at two host commits.

use tracing::warn;

use super::error::ErrorKind;
use crate::github::{CommitId, HostingService, RepoId, Tree};

/// Submodule commits pinned by the previous and the current host commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleRange {
    /// Pin at the previous release.
    pub old: CommitId,
    /// Pin at the current release.
    pub new: CommitId,
}

/// Returns the commit pinned at `path`, if the tree has a gitlink there.
pub fn gitlink_commit(tree: &Tree, path: &str) -> Option<CommitId> {
    tree.tree
        .iter()
        .find(|entry| entry.path == path && entry.is_gitlink())
        .map(|entry| CommitId::new(entry.sha.as_str()))
}

/// Finds the submodule commits pinned at `path` by two host commits.
///
/// Fails if either tree lacks the gitlink.
pub async fn resolve_submodule_range(
    service: &dyn HostingService,
    repo: &RepoId,
    old_commit: &CommitId,
    new_commit: &CommitId,
    path: &str,
) -> Result<SubmoduleRange, ErrorKind> {
    let (old_tree, new_tree) = tokio::try_join!(
        service.tree(repo, old_commit),
        service.tree(repo, new_commit)
    )?;

    let old = pinned_commit(&old_tree, old_commit, path)?;
    let new = pinned_commit(&new_tree, new_commit, path)?;
    Ok(SubmoduleRange { old, new })
}

fn pinned_commit(tree: &Tree, commit: &CommitId, path: &str) -> Result<CommitId, ErrorKind> {
    if tree.truncated {
        warn!(commit = commit.short(), "Tree listing was truncated by the API");
    }
    gitlink_commit(tree, path).ok_or_else(|| ErrorKind::SubmoduleNotInTree {
        path: path.to_string(),
        commit: commit.to_string(),
    })
}
