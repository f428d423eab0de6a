//! Release notes computation for one release.

use tracing::info;

use super::error::{NotesError, Stage};
use super::report::{ReleaseReport, SubmoduleChanges};
use super::{history, links, locate, manifest, submodule, version};
use crate::github::{CommitId, HostingService, RepoId};

/// Inputs of one release notes run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Host repository.
    pub repository: RepoId,
    /// Tag of the release being described.
    pub tag: String,
    /// Tag to compare against; empty to pick it from the published releases.
    pub previous_tag: String,
    /// Prefix for submodule issue references; empty to use the submodule's `owner/name`.
    pub submodule_link: String,
}

/// Computes the release notes of a single request against a hosting service.
pub struct ReleaseNotesWriter<'a> {
    service: &'a dyn HostingService,
    request: ReleaseRequest,
}

impl<'a> ReleaseNotesWriter<'a> {
    /// Creates a writer for one request.
    pub fn new(service: &'a dyn HostingService, request: ReleaseRequest) -> Self {
        Self { service, request }
    }

    /// Runs every stage and assembles the report.
    ///
    /// The host changes and the submodule branch are fetched concurrently;
    /// the first failure aborts the other.
    pub async fn write(&self) -> Result<ReleaseReport, NotesError> {
        let repo = &self.request.repository;

        let previous_tag = version::resolve_previous_tag(
            self.service,
            repo,
            &self.request.tag,
            &self.request.previous_tag,
        )
        .await
        .map_err(|e| NotesError::new(Stage::PreviousTag, e))?
        .unwrap_or_default();
        info!(previous_tag = %previous_tag, "Previous tag");

        let commit = locate::commit_for_tag(self.service, repo, &self.request.tag)
            .await
            .map_err(|e| NotesError::new(Stage::TagCommit, e))?;
        let previous_commit = locate::commit_for_tag(self.service, repo, &previous_tag)
            .await
            .map_err(|e| NotesError::new(Stage::PreviousTagCommit, e))?;
        info!(commit = %commit, previous_commit = %previous_commit, "Release range");

        let host_changes = async {
            history::changes_between(self.service, repo, &previous_commit, &commit)
                .await
                .map_err(|e| NotesError::new(Stage::HostChanges, e))
        };
        let (changes, submodule) = tokio::try_join!(
            host_changes,
            self.submodule_changes(&previous_commit, &commit)
        )?;

        Ok(ReleaseReport {
            repository: repo.clone(),
            previous_tag,
            changes,
            submodule,
        })
    }

    /// Collects the submodule's changes between the pins of two host commits.
    ///
    /// Returns `None` when the current commit declares no submodule.
    async fn submodule_changes(
        &self,
        previous_commit: &CommitId,
        commit: &CommitId,
    ) -> Result<Option<SubmoduleChanges>, NotesError> {
        let repo = &self.request.repository;

        let declaration = manifest::find_submodule(self.service, repo, commit)
            .await
            .map_err(|e| NotesError::new(Stage::SubmoduleDeclaration, e))?;
        let Some(declaration) = declaration else {
            info!("No submodule repository found");
            return Ok(None);
        };
        info!(path = %declaration.path, repository = %declaration.repository, "Submodule");

        let submodule_repo = RepoId::parse(&declaration.repository)
            .map_err(|e| NotesError::new(Stage::SubmoduleDeclaration, e))?;

        let range = submodule::resolve_submodule_range(
            self.service,
            repo,
            previous_commit,
            commit,
            &declaration.path,
        )
        .await
        .map_err(|e| NotesError::new(Stage::SubmoduleCommits, e))?;
        info!(old = range.old.short(), new = range.new.short(), "Submodule commits");

        let mut changes = history::changes_between(self.service, &submodule_repo, &range.old, &range.new)
            .await
            .map_err(|e| NotesError::new(Stage::SubmoduleChanges, e))?;

        let label = if self.request.submodule_link.is_empty() {
            submodule_repo.to_string()
        } else {
            self.request.submodule_link.clone()
        };
        links::qualify_references(&mut changes, &label);

        Ok(Some(SubmoduleChanges {
            repository: submodule_repo,
            changes,
        }))
    }
}
