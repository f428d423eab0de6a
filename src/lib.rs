//! # submodule-release-notes
//!
//! Release notes for a GitHub repository that also list the changes of the
//! submodule it tracks.
//!
//! The previous release is chosen by semantic version order, both release
//! tags are resolved to commits, and the host repository's commits between
//! them are listed. When `.gitmodules` declares a submodule, the submodule
//! commits pinned by the two host commits bound a second listing, whose
//! `#123` references are rewritten to `owner/repo#123` so they keep pointing
//! at the submodule repository.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use submodule_release_notes::github::{GitHubClient, RepoId};
//! use submodule_release_notes::notes::{ReleaseNotesWriter, ReleaseRequest};
//!
//! # async fn run() -> anyhow::Result<()> {
//! let client = GitHubClient::new("https://api.github.com", None)?;
//! let request = ReleaseRequest {
//!     repository: RepoId::parse("grafana/beyla")?,
//!     tag: "v2.1.0".to_string(),
//!     previous_tag: String::new(),
//!     submodule_link: String::new(),
//! };
//! let report = ReleaseNotesWriter::new(&client, request).write().await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod cli;
pub mod github;
pub mod notes;
pub mod output;
pub mod settings;

pub use crate::cli::Cli;

/// The current version of submodule-release-notes.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
