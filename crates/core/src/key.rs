//! Storage key derivation for the blob store's restricted key space.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Logical name of the document holding the project collection.
pub const PROJECTS_STORAGE_NAME: &str = "portfolio_projects";

static DISALLOWED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9.\-]").expect("valid regex"));

/// Strips every character outside `[A-Za-z0-9.-]`, keeping the order of the rest.
pub fn sanitize_storage_key(name: &str) -> String {
    DISALLOWED.replace_all(name, "").into_owned()
}

/// A key that has already been through [`sanitize_storage_key`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StorageKey(String);

impl StorageKey {
    pub fn from_logical(name: &str) -> Self {
        Self(sanitize_storage_key(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for StorageKey {
    fn default() -> Self {
        Self::from_logical(PROJECTS_STORAGE_NAME)
    }
}

impl fmt::Display for StorageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
