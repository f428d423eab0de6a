//! Shared test utilities for code built on [`HostingService`].

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use super::types::CommitDetail;
use super::{
    CommitId, ComparedCommit, GitHubError, HostingService, RepoId, ServiceFuture, Tree, TreeEntry,
};

/// In-memory hosting service populated with fixtures.
///
/// Lookups that have no fixture behave like the API does: missing tags,
/// trees and comparisons are `NotFound`, a missing file is `None`, and
/// comparing a commit with itself yields no commits. Operations named with
/// [`failing`](Self::failing) return an API error instead.
///
/// Every call is recorded as `"<operation> <repo>"`; use
/// [`call_handle`](Self::call_handle) to inspect them after the mock has
/// been moved into the code under test.
#[derive(Default)]
pub(crate) struct MockHostingService {
    releases: HashMap<RepoId, Vec<String>>,
    tags: HashMap<(RepoId, String), CommitId>,
    trees: HashMap<(RepoId, CommitId), Tree>,
    files: HashMap<(RepoId, String, CommitId), String>,
    comparisons: HashMap<(RepoId, CommitId, CommitId), Vec<ComparedCommit>>,
    failing: Vec<&'static str>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl MockHostingService {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_releases(mut self, repo: &RepoId, tags: &[&str]) -> Self {
        self.releases
            .insert(repo.clone(), tags.iter().map(ToString::to_string).collect());
        self
    }

    pub(crate) fn with_tag(mut self, repo: &RepoId, tag: &str, commit: &str) -> Self {
        self.tags
            .insert((repo.clone(), tag.to_string()), CommitId::new(commit));
        self
    }

    /// Adds a tree; entries are `(path, type, sha)`.
    pub(crate) fn with_tree(mut self, repo: &RepoId, commit: &str, entries: &[(&str, &str, &str)]) -> Self {
        let tree = Tree {
            sha: format!("tree-{commit}"),
            tree: entries
                .iter()
                .map(|(path, entry_type, sha)| TreeEntry {
                    path: (*path).to_string(),
                    entry_type: (*entry_type).to_string(),
                    sha: (*sha).to_string(),
                })
                .collect(),
            truncated: false,
        };
        self.trees.insert((repo.clone(), CommitId::new(commit)), tree);
        self
    }

    pub(crate) fn with_file(mut self, repo: &RepoId, path: &str, commit: &str, content: &str) -> Self {
        self.files.insert(
            (repo.clone(), path.to_string(), CommitId::new(commit)),
            content.to_string(),
        );
        self
    }

    /// Adds a comparison; `None` messages model commits without a message.
    pub(crate) fn with_comparison(
        mut self,
        repo: &RepoId,
        base: &str,
        head: &str,
        messages: &[Option<&str>],
    ) -> Self {
        let commits = messages
            .iter()
            .enumerate()
            .map(|(i, message)| compared_commit(&format!("{head}-{i}"), *message))
            .collect();
        self.comparisons.insert(
            (repo.clone(), CommitId::new(base), CommitId::new(head)),
            commits,
        );
        self
    }

    /// Makes every call of `operation` fail with an HTTP 500.
    pub(crate) fn failing(mut self, operation: &'static str) -> Self {
        self.failing.push(operation);
        self
    }

    pub(crate) fn call_handle(&self) -> Arc<Mutex<Vec<String>>> {
        self.calls.clone()
    }

    fn record(&self, operation: &'static str, repo: &RepoId) -> Result<(), GitHubError> {
        self.calls
            .lock()
            .unwrap()
            .push(format!("{operation} {repo}"));
        if self.failing.contains(&operation) {
            return Err(GitHubError::ApiRequestFailed {
                status: 500,
                body: format!("{operation} unavailable"),
            });
        }
        Ok(())
    }
}

pub(crate) fn compared_commit(sha: &str, message: Option<&str>) -> ComparedCommit {
    ComparedCommit {
        sha: sha.to_string(),
        commit: CommitDetail {
            message: message.map(ToString::to_string),
        },
    }
}

impl HostingService for MockHostingService {
    fn release_tags<'a>(&'a self, repo: &'a RepoId) -> ServiceFuture<'a, Vec<String>> {
        Box::pin(async move {
            self.record("release_tags", repo)?;
            Ok(self.releases.get(repo).cloned().unwrap_or_default())
        })
    }

    fn tag_commit<'a>(&'a self, repo: &'a RepoId, tag: &'a str) -> ServiceFuture<'a, CommitId> {
        Box::pin(async move {
            self.record("tag_commit", repo)?;
            self.tags
                .get(&(repo.clone(), tag.to_string()))
                .cloned()
                .ok_or_else(|| GitHubError::NotFound(format!("git/ref/tags/{tag}")))
        })
    }

    fn tree<'a>(&'a self, repo: &'a RepoId, commit: &'a CommitId) -> ServiceFuture<'a, Tree> {
        Box::pin(async move {
            self.record("tree", repo)?;
            self.trees
                .get(&(repo.clone(), commit.clone()))
                .cloned()
                .ok_or_else(|| GitHubError::NotFound(format!("git/trees/{commit}")))
        })
    }

    fn file_contents<'a>(
        &'a self,
        repo: &'a RepoId,
        path: &'a str,
        commit: &'a CommitId,
    ) -> ServiceFuture<'a, Option<String>> {
        Box::pin(async move {
            self.record("file_contents", repo)?;
            Ok(self
                .files
                .get(&(repo.clone(), path.to_string(), commit.clone()))
                .cloned())
        })
    }

    fn compare<'a>(
        &'a self,
        repo: &'a RepoId,
        base: &'a CommitId,
        head: &'a CommitId,
    ) -> ServiceFuture<'a, Vec<ComparedCommit>> {
        Box::pin(async move {
            self.record("compare", repo)?;
            if base == head {
                return Ok(Vec::new());
            }
            self.comparisons
                .get(&(repo.clone(), base.clone(), head.clone()))
                .cloned()
                .ok_or_else(|| GitHubError::NotFound(format!("compare/{base}...{head}")))
        })
    }
}
