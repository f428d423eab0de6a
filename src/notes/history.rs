//! Change list between two commits.

use tracing::debug;

use crate::github::{CommitId, ComparedCommit, GitHubError, HostingService, RepoId};

/// Formats a commit message as a change entry: `* ` plus its first line.
///
/// Commits without a message produce no entry.
pub fn change_entry(message: &str) -> Option<String> {
    message.lines().next().map(|summary| format!("* {summary}"))
}

/// Builds the change entries for compared commits, keeping their order.
pub fn change_set(commits: &[ComparedCommit]) -> Vec<String> {
    commits
        .iter()
        .filter_map(|c| c.commit.message.as_deref())
        .filter_map(change_entry)
        .collect()
}

/// Lists the changes reachable from `head` but not from `base`.
pub async fn changes_between(
    service: &dyn HostingService,
    repo: &RepoId,
    base: &CommitId,
    head: &CommitId,
) -> Result<Vec<String>, GitHubError> {
    let commits = service.compare(repo, base, head).await?;
    let changes = change_set(&commits);
    debug!(
        repository = %repo,
        base = base.short(),
        head = head.short(),
        commits = commits.len(),
        entries = changes.len(),
        "Compared commits"
    );
    Ok(changes)
}
