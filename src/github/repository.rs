//! Repository identities and remote URL parsing.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;
use url::Url;

/// Errors produced while parsing a repository identity.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RepoIdError {
    /// The identity does not split into exactly two non-empty `/` parts.
    #[error("invalid repository format: {0} (expected owner/repo)")]
    InvalidFormat(String),
}

/// A GitHub repository identified by `owner/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    owner: String,
    name: String,
}

impl RepoId {
    /// Creates an identity from its two parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parses an `owner/name` string.
    pub fn parse(slug: &str) -> Result<Self, RepoIdError> {
        match slug.split('/').collect::<Vec<_>>().as_slice() {
            [owner, name] if !owner.is_empty() && !name.is_empty() => Ok(Self::new(*owner, *name)),
            _ => Err(RepoIdError::InvalidFormat(slug.to_string())),
        }
    }

    /// Returns the owning user or organization.
    pub fn owner(&self) -> &str {
        &self.owner
    }

    /// Returns the repository name.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = RepoIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Extracts the `owner/name` slug from a remote URL.
///
/// Handles `https://host/owner/name[.git]`, `ssh://git@host/owner/name[.git]`
/// and the scp-like `git@host:owner/name[.git]`. Returns `None` for anything
/// else, including relative submodule URLs. The slug is not validated; pass it
/// through [`RepoId::parse`] for that.
pub fn slug_from_remote_url(url: &str) -> Option<String> {
    let url = url.trim();
    let url = url.strip_suffix(".git").unwrap_or(url);

    if url.starts_with("http") || url.starts_with("ssh://") {
        let parsed = Url::parse(url).ok()?;
        let segments: Vec<&str> = parsed
            .path_segments()?
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            [.., owner, name] => Some(format!("{owner}/{name}")),
            _ => None,
        }
    } else if let Some(rest) = url.strip_prefix("git@") {
        // scp-like syntax: git@github.com:owner/repo
        rest.split_once(':').map(|(_, path)| path.to_string())
    } else {
        None
    }
}
