//! `.gitmodules` parsing.

use tracing::debug;

use crate::github::{slug_from_remote_url, CommitId, GitHubError, HostingService, RepoId};

/// Location of the submodule manifest in a repository.
pub const GITMODULES_PATH: &str = ".gitmodules";

/// A submodule declared in `.gitmodules`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleDeclaration {
    /// Checkout path inside the host repository.
    pub path: String,
    /// `owner/name` slug taken from the declared URL. Not validated.
    pub repository: String,
}

#[derive(Default)]
struct PendingDeclaration {
    path: Option<String>,
    repository: Option<String>,
}

impl PendingDeclaration {
    fn take(&mut self) -> Option<SubmoduleDeclaration> {
        let pending = std::mem::take(self);
        Some(SubmoduleDeclaration {
            path: pending.path?,
            repository: pending.repository?,
        })
    }
}

/// Parses every complete path/url declaration, in file order.
///
/// A `[submodule "..."]` header closes the previous declaration, so keys of
/// different sections are never paired. Inside one section the last value
/// of a key wins. URLs whose form is not recognized are ignored.
pub fn parse_gitmodules(content: &str) -> Vec<SubmoduleDeclaration> {
    let mut declarations = Vec::new();
    let mut pending = PendingDeclaration::default();

    for line in content.lines().map(str::trim) {
        if line.starts_with('[') {
            declarations.extend(pending.take());
            continue;
        }
        if line.starts_with('#') || line.starts_with(';') {
            continue;
        }

        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        match key.trim() {
            "path" => pending.path = Some(value.trim().to_string()),
            "url" => {
                if let Some(slug) = slug_from_remote_url(value) {
                    pending.repository = Some(slug);
                }
            }
            _ => {}
        }
    }
    declarations.extend(pending.take());

    declarations
}

/// Reads the first submodule declared in `.gitmodules` at a commit.
///
/// A missing manifest, or one without a complete declaration, yields `None`.
pub async fn find_submodule(
    service: &dyn HostingService,
    repo: &RepoId,
    commit: &CommitId,
) -> Result<Option<SubmoduleDeclaration>, GitHubError> {
    let Some(content) = service.file_contents(repo, GITMODULES_PATH, commit).await? else {
        debug!(repository = %repo, commit = commit.short(), "No .gitmodules file");
        return Ok(None);
    };

    let declarations = parse_gitmodules(&content);
    if declarations.len() > 1 {
        debug!(
            count = declarations.len(),
            "Several submodules declared, using the first"
        );
    }
    Ok(declarations.into_iter().next())
}
