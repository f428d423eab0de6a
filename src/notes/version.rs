//! Previous release tag selection by semantic version order.
//!
//! Tags are read as versions after dropping one leading `v`; the `v1` and
//! `v1.2` shorthands are completed with zeros. Tags that do not parse sort
//! before every version, and equal-precedence tags are ordered by name so
//! sorting never depends on the input order.

use std::cmp::Ordering;

use semver::Version;
use tracing::{debug, info};

use crate::github::{GitHubError, HostingService, RepoId};

/// Returns true for prerelease tags, which never take part in ordering.
pub fn is_prerelease(tag: &str) -> bool {
    tag.contains('-')
}

/// Parses a release tag as a semantic version.
pub fn parse_tag_version(tag: &str) -> Option<Version> {
    let raw = tag.strip_prefix('v').unwrap_or(tag);
    let core_end = raw.find(|c: char| c == '-' || c == '+').unwrap_or(raw.len());
    let (core, suffix) = raw.split_at(core_end);

    let completed = match core.matches('.').count() {
        0 => format!("{core}.0.0{suffix}"),
        1 => format!("{core}.0{suffix}"),
        _ => raw.to_string(),
    };
    Version::parse(&completed).ok()
}

/// Compares two tags by version precedence alone.
///
/// Unparseable tags are lower than any version and equal to each other.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    match (parse_tag_version(a), parse_tag_version(b)) {
        (Some(a), Some(b)) => a.cmp_precedence(&b),
        (Some(_), None) => Ordering::Greater,
        (None, Some(_)) => Ordering::Less,
        (None, None) => Ordering::Equal,
    }
}

/// Sorts tags ascending by version, then by name.
pub fn sort_tags<S: AsRef<str>>(tags: &mut [S]) {
    tags.sort_by(|a, b| {
        let (a, b) = (a.as_ref(), b.as_ref());
        compare_versions(a, b).then_with(|| a.cmp(b))
    });
}

/// Picks the tag to compare `target` against from the release tags.
///
/// Prereleases are ignored. With an empty target the greatest tag wins;
/// otherwise the greatest tag strictly below the target, falling back to the
/// greatest tag when none is lower. Returns `None` when no tag is left.
pub fn select_previous_tag<S: AsRef<str>>(target: &str, release_tags: &[S]) -> Option<String> {
    let mut tags: Vec<&str> = release_tags
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| !tag.is_empty() && !is_prerelease(tag))
        .collect();
    sort_tags(&mut tags);
    debug!(?tags, "Sorted release tags");

    let greatest = *tags.last()?;
    if target.is_empty() {
        return Some(greatest.to_string());
    }

    let previous = tags
        .iter()
        .rev()
        .copied()
        .find(|tag| compare_versions(tag, target) == Ordering::Less)
        .unwrap_or(greatest);
    Some(previous.to_string())
}

/// Determines the previous tag of a release.
///
/// An explicit previous tag is returned as is without listing releases.
pub async fn resolve_previous_tag(
    service: &dyn HostingService,
    repo: &RepoId,
    target: &str,
    explicit: &str,
) -> Result<Option<String>, GitHubError> {
    if !explicit.is_empty() {
        return Ok(Some(explicit.to_string()));
    }

    let release_tags = service.release_tags(repo).await?;
    info!(count = release_tags.len(), "Listed release tags");
    Ok(select_previous_tag(target, &release_tags))
}
