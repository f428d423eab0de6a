//! Qualification of issue and pull request references.

use std::sync::LazyLock;

use regex::{Captures, Regex};

/// A bare `#123` reference, not followed by an ASCII word character.
#[allow(clippy::unwrap_used)]
static ISSUE_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#[0-9]+(?-u:\b)").unwrap());

/// Prefixes every bare reference in `line` with `label`.
///
/// `#42` becomes `org/repo#42` so that it links to the submodule repository
/// when shown in the host repository. Other text is left untouched.
pub fn qualify_line(line: &str, label: &str) -> String {
    ISSUE_REFERENCE
        .replace_all(line, |caps: &Captures<'_>| format!("{label}{}", &caps[0]))
        .into_owned()
}

/// Qualifies the references of every entry in place.
pub fn qualify_references(entries: &mut [String], label: &str) {
    for entry in entries.iter_mut() {
        *entry = qualify_line(entry, label);
    }
}
