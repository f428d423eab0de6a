//! Release notes for a host repository and its tracked submodule.

pub mod error;
pub mod history;
pub mod links;
pub mod locate;
pub mod manifest;
pub mod report;
pub mod submodule;
pub mod version;
pub mod writer;

pub use error::{ErrorKind, NotesError, Stage};
pub use manifest::SubmoduleDeclaration;
pub use report::{ReleaseReport, SubmoduleChanges};
pub use submodule::SubmoduleRange;
pub use writer::{ReleaseNotesWriter, ReleaseRequest};
