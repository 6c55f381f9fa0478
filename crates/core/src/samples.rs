//! Runtime type samples collected by external instrumentation.

use crate::error::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Separator between a closure path and a symbol name in sample keys.
pub const KEY_SEPARATOR: char = '%';

/// Observed type names keyed by `closure_path%name`, e.g.
/// `{"Foo#bar%count": ["Integer"]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuntimeSamples {
    entries: IndexMap<String, Vec<String>>,
}

impl RuntimeSamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key(closure_path: &str, name: &str) -> String {
        format!("{closure_path}{KEY_SEPARATOR}{name}")
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn insert<S: Into<String>>(
        &mut self,
        closure_path: &str,
        name: &str,
        types: impl IntoIterator<Item = S>,
    ) {
        self.entries.insert(
            Self::key(closure_path, name),
            types.into_iter().map(Into::into).collect(),
        );
    }

    /// Raw entry for a key, including empty lists.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    /// Samples for a symbol, or `None` when the entry is absent or empty.
    /// An empty list means "no override", not "no type".
    pub fn types_for(&self, closure_path: &str, name: &str) -> Option<&[String]> {
        self.get(&Self::key(closure_path, name))
            .filter(|types| !types.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
