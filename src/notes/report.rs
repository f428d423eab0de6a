//! Release report assembly.

use std::fmt;

use crate::github::RepoId;

/// Changes of the tracked submodule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleChanges {
    /// Submodule repository.
    pub repository: RepoId,
    /// Change entries, references already qualified.
    pub changes: Vec<String>,
}

/// Release notes of a host repository and its submodule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseReport {
    /// Host repository.
    pub repository: RepoId,
    /// Tag the release was compared against.
    pub previous_tag: String,
    /// Host change entries.
    pub changes: Vec<String>,
    /// Submodule changes; `None` when no submodule is declared.
    pub submodule: Option<SubmoduleChanges>,
}

impl ReleaseReport {
    /// Renders the report text.
    ///
    /// The submodule section is always present; without a submodule it has
    /// an empty name and no entries.
    pub fn render(&self) -> String {
        let submodule_name = self
            .submodule
            .as_ref()
            .map(|submodule| submodule.repository.to_string())
            .unwrap_or_default();
        let submodule_changes: &[String] = self
            .submodule
            .as_ref()
            .map(|submodule| submodule.changes.as_slice())
            .unwrap_or_default();

        let mut notes = section(&self.repository.to_string(), &self.changes);
        notes.push('\n');
        notes.push_str(&section(&submodule_name, submodule_changes));
        notes
    }
}

impl fmt::Display for ReleaseReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn section(name: &str, changes: &[String]) -> String {
    format!("## Changes from {name}:\n{}\n", changes.join("\n"))
}
