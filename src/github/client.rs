//! GitHub REST API client implementation.

use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, ACCEPT, LINK};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::types::{Comparison, FileContent, GitObject, GitRef, Release, TagObject};
use super::{
    CommitId, ComparedCommit, GitHubError, HostingService, RepoId, ServiceFuture, Tree,
};

/// Public GitHub API endpoint.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// REST API version requested on every call.
const API_VERSION: &str = "2022-11-28";

/// Items requested per page on paginated endpoints.
const PER_PAGE: u32 = 100;

/// Annotated tags pointing at annotated tags are followed at most this deep.
const MAX_TAG_DEPTH: usize = 8;

/// Per-request timeout.
pub(crate) const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// GitHub REST API client.
pub struct GitHubClient {
    /// HTTP client for API requests.
    client: Client,
    /// API root, e.g. `https://api.github.com` or a GHES `/api/v3` URL.
    base_url: Url,
    /// Access token, sent as a bearer token when present.
    token: Option<String>,
}

impl GitHubClient {
    /// Creates a client for the given API root.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, GitHubError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| GitHubError::InvalidApiUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GitHubError::InvalidApiUrl(base_url.to_string()));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("submodule-release-notes/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| GitHubError::NetworkError(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// Lists the tag names of every release, following pagination.
    pub async fn list_release_tags(&self, repo: &RepoId) -> Result<Vec<String>, GitHubError> {
        let mut tags = Vec::new();
        for page in 1.. {
            let mut url = self.repo_endpoint(repo, &["releases"])?;
            set_page(&mut url, page);

            let (releases, has_next): (Vec<Release>, bool) = self.get_page(url).await?;
            debug!(repository = %repo, page, count = releases.len(), "Fetched releases page");
            tags.extend(
                releases
                    .into_iter()
                    .filter_map(|release| release.tag_name)
                    .filter(|name| !name.is_empty()),
            );

            if !has_next {
                break;
            }
        }
        Ok(tags)
    }

    /// Resolves a tag to its commit, peeling annotated tag objects.
    pub async fn get_tag_commit(&self, repo: &RepoId, tag: &str) -> Result<CommitId, GitHubError> {
        if tag.is_empty() {
            return Err(GitHubError::NotFound(format!(
                "tag reference in {repo}: no tag name given"
            )));
        }

        let mut segments = vec!["git", "ref", "tags"];
        segments.extend(tag.split('/'));
        let reference: GitRef = self.get_json(self.repo_endpoint(repo, &segments)?).await?;
        debug!(reference = %reference.reference, sha = %reference.object.sha, "Resolved tag reference");

        let mut object: GitObject = reference.object;
        for _ in 0..MAX_TAG_DEPTH {
            if object.object_type != "tag" {
                return Ok(CommitId::new(object.sha));
            }
            let url = self.repo_endpoint(repo, &["git", "tags", object.sha.as_str()])?;
            let tag_object: TagObject = self.get_json(url).await?;
            debug!(tag_object = %tag_object.sha, target = %tag_object.object.sha, "Peeled annotated tag");
            object = tag_object.object;
        }

        Err(GitHubError::InvalidResponseFormat(format!(
            "tag {tag} is nested deeper than {MAX_TAG_DEPTH} annotated tags"
        )))
    }

    /// Fetches the recursive tree of a commit.
    pub async fn get_tree(&self, repo: &RepoId, commit: &CommitId) -> Result<Tree, GitHubError> {
        let mut url = self.repo_endpoint(repo, &["git", "trees", commit.as_str()])?;
        url.query_pairs_mut().append_pair("recursive", "1");
        self.get_json(url).await
    }

    /// Reads a file at a commit; a 404 yields `None`.
    pub async fn get_file_contents(
        &self,
        repo: &RepoId,
        path: &str,
        commit: &CommitId,
    ) -> Result<Option<String>, GitHubError> {
        let mut segments = vec!["contents"];
        segments.extend(path.split('/'));
        let mut url = self.repo_endpoint(repo, &segments)?;
        url.query_pairs_mut().append_pair("ref", commit.as_str());

        let file: FileContent = match self.get_json(url).await {
            Ok(file) => file,
            Err(GitHubError::NotFound(_)) => return Ok(None),
            Err(e) => return Err(e),
        };

        decode_content(&file).map(Some)
    }

    /// Lists the commits between two commits, following pagination.
    pub async fn compare_commits(
        &self,
        repo: &RepoId,
        base: &CommitId,
        head: &CommitId,
    ) -> Result<Vec<ComparedCommit>, GitHubError> {
        let range = format!("{base}...{head}");
        let mut commits = Vec::new();
        for page in 1.. {
            let mut url = self.repo_endpoint(repo, &["compare", range.as_str()])?;
            set_page(&mut url, page);

            let (comparison, has_next): (Comparison, bool) = self.get_page(url).await?;
            debug!(repository = %repo, page, count = comparison.commits.len(), "Fetched comparison page");
            commits.extend(comparison.commits);

            if !has_next {
                break;
            }
        }
        Ok(commits)
    }

    /// Builds `{base}/repos/{owner}/{repo}/{segments...}`.
    fn repo_endpoint(&self, repo: &RepoId, segments: &[&str]) -> Result<Url, GitHubError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| GitHubError::InvalidApiUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(["repos", repo.owner(), repo.name()])
            .extend(segments);
        Ok(url)
    }

    /// Sends a GET request and maps non-success statuses to errors.
    async fn send(&self, url: Url) -> Result<Response, GitHubError> {
        debug!(url = %url, "Sending request to GitHub API");

        let mut builder = self
            .client
            .get(url.clone())
            .header(ACCEPT, "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION);
        if let Some(ref token) = self.token {
            builder = builder.bearer_auth(token);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| GitHubError::NetworkError(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(GitHubError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|e| {
                debug!("Failed to read error response body: {e}");
                String::new()
            });
            return Err(GitHubError::ApiRequestFailed {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, GitHubError> {
        self.send(url)
            .await?
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponseFormat(e.to_string()))
    }

    /// Fetches one page and reports whether a next page exists.
    async fn get_page<T: DeserializeOwned>(&self, url: Url) -> Result<(T, bool), GitHubError> {
        let response = self.send(url).await?;
        let has_next = has_next_page(response.headers());
        let body = response
            .json()
            .await
            .map_err(|e| GitHubError::InvalidResponseFormat(e.to_string()))?;
        Ok((body, has_next))
    }
}

impl HostingService for GitHubClient {
    fn release_tags<'a>(&'a self, repo: &'a RepoId) -> ServiceFuture<'a, Vec<String>> {
        Box::pin(self.list_release_tags(repo))
    }

    fn tag_commit<'a>(&'a self, repo: &'a RepoId, tag: &'a str) -> ServiceFuture<'a, CommitId> {
        Box::pin(self.get_tag_commit(repo, tag))
    }

    fn tree<'a>(&'a self, repo: &'a RepoId, commit: &'a CommitId) -> ServiceFuture<'a, Tree> {
        Box::pin(self.get_tree(repo, commit))
    }

    fn file_contents<'a>(
        &'a self,
        repo: &'a RepoId,
        path: &'a str,
        commit: &'a CommitId,
    ) -> ServiceFuture<'a, Option<String>> {
        Box::pin(self.get_file_contents(repo, path, commit))
    }

    fn compare<'a>(
        &'a self,
        repo: &'a RepoId,
        base: &'a CommitId,
        head: &'a CommitId,
    ) -> ServiceFuture<'a, Vec<ComparedCommit>> {
        Box::pin(self.compare_commits(repo, base, head))
    }
}

fn set_page(url: &mut Url, page: u32) {
    url.query_pairs_mut()
        .append_pair("per_page", &PER_PAGE.to_string())
        .append_pair("page", &page.to_string());
}

/// Returns true if a `Link` header advertises a `rel="next"` page.
fn has_next_page(headers: &HeaderMap) -> bool {
    headers
        .get_all(LINK)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .any(|link| link.split(';').skip(1).any(|param| param.trim() == "rel=\"next\""))
}

/// Decodes a contents API payload into text.
fn decode_content(file: &FileContent) -> Result<String, GitHubError> {
    let content = file.content.as_deref().unwrap_or_default();
    match file.encoding.as_deref() {
        Some("base64") => {
            // The API wraps base64 payloads at 60 columns.
            let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
            let bytes = STANDARD
                .decode(compact)
                .map_err(|e| GitHubError::InvalidResponseFormat(format!("bad base64 content: {e}")))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        Some("") | None => Ok(content.to_string()),
        Some(other) => Err(GitHubError::InvalidResponseFormat(format!(
            "unsupported content encoding: {other}"
        ))),
    }
}
