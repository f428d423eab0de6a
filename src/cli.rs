//! CLI interface for submodule-release-notes.
//!
//! Every option can also be given through the environment variable a
//! GitHub Action receives it as, so the binary runs unchanged as an action
//! step.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::github::client::DEFAULT_API_URL;
use crate::github::{GitHubClient, RepoId};
use crate::notes::{ReleaseNotesWriter, ReleaseRequest};
use crate::output::OutputFile;
use crate::settings;

/// Name of the step output holding the release notes.
pub const RELEASE_NOTES_OUTPUT: &str = "release_notes";

/// Environment variable consulted when no token is configured.
const FALLBACK_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// submodule-release-notes: release notes including a submodule's changes.
#[derive(Parser, Debug)]
#[command(name = "submodule-release-notes")]
#[command(
    about = "Generates release notes that include the changes of a tracked submodule",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    /// GitHub access token.
    #[arg(long, env = "INPUT_GITHUB_TOKEN", default_value = "", hide_env_values = true)]
    pub github_token: String,

    /// Repository to describe, as owner/repo.
    #[arg(long, env = "INPUT_REPOSITORY", default_value = "")]
    pub repository: String,

    /// Tag of the release.
    #[arg(long, env = "INPUT_TAG", default_value = "")]
    pub tag: String,

    /// Tag to compare against; defaults to the previous published release.
    #[arg(long, env = "INPUT_PREVIOUS_TAG", default_value = "")]
    pub previous_tag: String,

    /// Prefix for the submodule's issue references; defaults to its owner/repo.
    #[arg(long, env = "INPUT_GENERATED_SUBMODULE_LINK", default_value = "")]
    pub generated_submodule_link: String,

    /// GitHub API base URL.
    #[arg(long, env = "GITHUB_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// File receiving the step outputs.
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub output_file: Option<PathBuf>,
}

impl Cli {
    /// Generates the release notes, writes the step output and prints them.
    pub async fn execute(self) -> Result<()> {
        let notes = self.generate().await?;

        if let Some(ref path) = self.output_file {
            let output = OutputFile::new(path);
            output.set_output(RELEASE_NOTES_OUTPUT, &notes)?;
            debug!(path = %output.path().display(), "Wrote step output");
        }

        println!("\n\nRelease notes generated successfully:");
        println!("{notes}");
        Ok(())
    }

    /// Computes the release notes text.
    pub async fn generate(&self) -> Result<String> {
        let request = self.release_request()?;
        let client = GitHubClient::new(&self.api_url, self.token())
            .context("Failed to create GitHub client")?;

        let report = ReleaseNotesWriter::new(&client, request).write().await?;
        Ok(report.render())
    }

    /// Validates the options into a release request.
    pub fn release_request(&self) -> Result<ReleaseRequest> {
        let repository = RepoId::parse(&self.repository)?;
        Ok(ReleaseRequest {
            repository,
            tag: self.tag.clone(),
            previous_tag: self.previous_tag.clone(),
            submodule_link: self.generated_submodule_link.clone(),
        })
    }

    /// Returns the configured token, else `GITHUB_TOKEN` from the environment or settings.
    fn token(&self) -> Option<String> {
        if !self.github_token.is_empty() {
            return Some(self.github_token.clone());
        }
        match settings::get_env_var(FALLBACK_TOKEN_VAR) {
            Ok(token) => Some(token),
            Err(e) => {
                debug!("No GitHub token configured: {e}");
                None
            }
        }
    }
}
