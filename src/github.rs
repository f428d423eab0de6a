//! GitHub REST API access.

pub mod client;
pub mod error;
pub mod repository;
pub mod types;

#[cfg(test)]
pub(crate) mod test_utils;

use std::future::Future;
use std::pin::Pin;

pub use client::GitHubClient;
pub use error::GitHubError;
pub use repository::{slug_from_remote_url, RepoId, RepoIdError};
pub use types::{CommitId, ComparedCommit, Tree, TreeEntry};

/// Number of hex characters to show in abbreviated commit hashes.
pub const SHORT_HASH_LEN: usize = 8;

/// Boxed future returned by [`HostingService`] methods.
pub type ServiceFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, GitHubError>> + Send + 'a>>;

/// Remote repository hosting operations the release notes are built from.
pub trait HostingService: Send + Sync {
    /// Lists the tag names of every published release, across all pages.
    fn release_tags<'a>(&'a self, repo: &'a RepoId) -> ServiceFuture<'a, Vec<String>>;

    /// Resolves a tag name to the commit it references.
    fn tag_commit<'a>(&'a self, repo: &'a RepoId, tag: &'a str) -> ServiceFuture<'a, CommitId>;

    /// Returns the recursive file tree at a commit.
    fn tree<'a>(&'a self, repo: &'a RepoId, commit: &'a CommitId) -> ServiceFuture<'a, Tree>;

    /// Returns a file's text at a commit, or `None` if the file does not exist.
    fn file_contents<'a>(
        &'a self,
        repo: &'a RepoId,
        path: &'a str,
        commit: &'a CommitId,
    ) -> ServiceFuture<'a, Option<String>>;

    /// Lists the commits reachable from `head` but not from `base`.
    fn compare<'a>(
        &'a self,
        repo: &'a RepoId,
        base: &'a CommitId,
        head: &'a CommitId,
    ) -> ServiceFuture<'a, Vec<ComparedCommit>>;
}
