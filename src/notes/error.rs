//! Release notes error handling.

use std::fmt;

use thiserror::Error;

use crate::github::{GitHubError, RepoIdError};

/// Step of the release notes computation an error originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Choosing the previous release tag.
    PreviousTag,
    /// Resolving the target tag to a commit.
    TagCommit,
    /// Resolving the previous tag to a commit.
    PreviousTagCommit,
    /// Listing the host repository's commits.
    HostChanges,
    /// Reading the `.gitmodules` declaration.
    SubmoduleDeclaration,
    /// Finding the submodule's pinned commits.
    SubmoduleCommits,
    /// Listing the submodule repository's commits.
    SubmoduleChanges,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Self::PreviousTag => "failed to fetch previous tag",
            Self::TagCommit => "failed to get commit for tag",
            Self::PreviousTagCommit => "failed to get commit for previous tag",
            Self::HostChanges => "failed to get changes",
            Self::SubmoduleDeclaration => "failed to get submodule path and repository",
            Self::SubmoduleCommits => "failed to get submodule commits",
            Self::SubmoduleChanges => "failed to get submodule changes",
        };
        f.write_str(description)
    }
}

/// Underlying cause of a [`NotesError`].
#[derive(Error, Debug)]
pub enum ErrorKind {
    /// A repository identity is not in `owner/repo` form.
    #[error(transparent)]
    InvalidRepository(#[from] RepoIdError),

    /// The hosting service failed or answered not-found.
    #[error(transparent)]
    Remote(#[from] GitHubError),

    /// The submodule path has no gitlink entry in a host commit's tree.
    #[error("submodule {path} not found in the tree of commit {commit}")]
    SubmoduleNotInTree {
        /// Declared submodule path.
        path: String,
        /// Host commit whose tree was searched.
        commit: String,
    },
}

/// A failed release notes run: the stage that failed and why.
#[derive(Error, Debug)]
#[error("{stage}")]
pub struct NotesError {
    stage: Stage,
    #[source]
    kind: ErrorKind,
}

impl NotesError {
    /// Wraps a cause with the stage it happened in.
    pub fn new(stage: Stage, kind: impl Into<ErrorKind>) -> Self {
        Self {
            stage,
            kind: kind.into(),
        }
    }

    /// Returns the failing stage.
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Returns the underlying cause.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns true if the cause is a missing remote resource or tree entry.
    pub fn is_not_found(&self) -> bool {
        match &self.kind {
            ErrorKind::Remote(e) => e.is_not_found(),
            ErrorKind::SubmoduleNotInTree { .. } => true,
            ErrorKind::InvalidRepository(_) => false,
        }
    }
}
