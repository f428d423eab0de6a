//! GitHub REST API payloads and commit identifiers.

use std::fmt;

use serde::Deserialize;

use super::SHORT_HASH_LEN;

/// Full commit hash as reported by the API.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitId(String);

impl CommitId {
    /// Wraps a full commit hash.
    pub fn new(sha: impl Into<String>) -> Self {
        Self(sha.into())
    }

    /// Returns the full hash.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the abbreviated hash, for display only.
    pub fn short(&self) -> &str {
        self.0.get(..SHORT_HASH_LEN).unwrap_or(&self.0)
    }
}

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entry of `GET /repos/{owner}/{repo}/releases`.
#[derive(Debug, Clone, Deserialize)]
pub struct Release {
    /// Tag the release was created from.
    #[serde(default)]
    pub tag_name: Option<String>,
}

/// `GET /repos/{owner}/{repo}/git/ref/{ref}` response.
#[derive(Debug, Clone, Deserialize)]
pub struct GitRef {
    /// Fully qualified reference name.
    #[serde(rename = "ref")]
    pub reference: String,
    /// Object the reference points at.
    pub object: GitObject,
}

/// Object pointed at by a reference or an annotated tag.
#[derive(Debug, Clone, Deserialize)]
pub struct GitObject {
    /// Object hash.
    pub sha: String,
    /// Object kind: `commit`, `tag`, `tree` or `blob`.
    #[serde(rename = "type")]
    pub object_type: String,
}

/// `GET /repos/{owner}/{repo}/git/tags/{sha}` response (annotated tag object).
#[derive(Debug, Clone, Deserialize)]
pub struct TagObject {
    /// Tag object hash.
    pub sha: String,
    /// Object the tag points at.
    pub object: GitObject,
}

/// `GET /repos/{owner}/{repo}/git/trees/{sha}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Tree {
    /// Tree hash.
    #[serde(default)]
    pub sha: String,
    /// Entries of the tree, recursively when requested.
    #[serde(default)]
    pub tree: Vec<TreeEntry>,
    /// Set when the API cut the listing short.
    #[serde(default)]
    pub truncated: bool,
}

/// One entry of a tree listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TreeEntry {
    /// Path relative to the repository root.
    pub path: String,
    /// Entry kind: `blob`, `tree`, or `commit` for a gitlink.
    #[serde(rename = "type")]
    pub entry_type: String,
    /// Object hash (the pinned commit for gitlinks).
    pub sha: String,
}

impl TreeEntry {
    /// Returns true if the entry pins a submodule commit.
    pub fn is_gitlink(&self) -> bool {
        self.entry_type == "commit"
    }
}

/// `GET /repos/{owner}/{repo}/contents/{path}` response for a file.
#[derive(Debug, Clone, Deserialize)]
pub struct FileContent {
    /// Content encoding, normally `base64`.
    #[serde(default)]
    pub encoding: Option<String>,
    /// Encoded content.
    #[serde(default)]
    pub content: Option<String>,
}

/// `GET /repos/{owner}/{repo}/compare/{base}...{head}` response.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Comparison {
    /// Commits reachable from head but not from base.
    #[serde(default)]
    pub commits: Vec<ComparedCommit>,
}

/// One commit of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComparedCommit {
    /// Commit hash.
    pub sha: String,
    /// Git commit data.
    pub commit: CommitDetail,
}

/// Git-level commit data.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CommitDetail {
    /// Full commit message.
    #[serde(default)]
    pub message: Option<String>,
}
