//! Directory exclusion for cleaning.
//!
//! Names are compared against a directory's bare name, not its path, so an
//! excluded name is skipped at every depth where it appears.

use std::collections::BTreeSet;

/// Directory names that are always excluded unless explicitly disabled.
pub const DEFAULT_EXCLUDES: &[&str] = &["node_modules"];

/// Set of directory names the cleaner will not descend into.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    names: BTreeSet<String>,
}

impl ExclusionSet {
    /// Create an empty exclusion set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with the default excluded names.
    pub fn with_defaults() -> Self {
        Self::from_names(DEFAULT_EXCLUDES.iter().copied())
    }

    /// Create from a list of names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = Self::new();
        set.extend(names);
        set
    }

    /// Add a name. Surrounding whitespace and trailing slashes are dropped so
    /// `vendor/` and `vendor` mean the same directory; empty names are ignored.
    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        let name = name.trim().trim_end_matches(['/', '\\']);
        if name.is_empty() {
            return false;
        }
        self.names.insert(name.to_string())
    }

    pub fn extend<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.insert(name);
        }
    }

    /// Check if a directory with this bare name should be skipped.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Excluded names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.names.iter().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
