//! Tag to commit resolution.

use tracing::debug;

use crate::github::{CommitId, GitHubError, HostingService, RepoId};

/// Resolves a tag to the commit it references.
///
/// An empty tag name is a not-found error; this is where an unset previous
/// tag surfaces.
pub async fn commit_for_tag(
    service: &dyn HostingService,
    repo: &RepoId,
    tag: &str,
) -> Result<CommitId, GitHubError> {
    if tag.is_empty() {
        return Err(GitHubError::NotFound(format!(
            "tag reference in {repo}: no tag name given"
        )));
    }

    let commit = service.tag_commit(repo, tag).await?;
    debug!(repository = %repo, tag, commit = %commit, "Resolved tag");
    Ok(commit)
}
