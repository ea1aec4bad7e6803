// Symbol and file lookup tables
//
// Both indices are built once from the topic tree before any page renders
// and are read-only afterwards. Missing lookups are not errors; the scanner
// falls back to unlinked rendering.

use crate::model::Topic;
use std::collections::HashMap;

/// Mapping from symbol name to its documentation anchor, `<page>#<anchor>`
#[derive(Debug, Default)]
pub struct SymbolIndex {
    entries: HashMap<String, String>,
}

impl SymbolIndex {
    /// Build the index from a topic tree.
    ///
    /// Only sections flagged as symbols are indexed. Duplicate names silently
    /// overwrite, so the last occurrence in tree order wins.
    pub fn build(topics: &[Topic]) -> Self {
        let mut index = Self::default();
        for topic in topics {
            for file in &topic.files {
                for section in &file.sections {
                    if section.is_symbol {
                        index.insert(
                            section.label.clone(),
                            format!("{}#{}", file.page, section.anchor),
                        );
                    }
                }
            }
        }
        index
    }

    /// Insert one symbol, overwriting any previous target
    pub fn insert(&mut self, name: String, target: String) {
        self.entries.insert(name, target);
    }

    /// Look up the anchor URL for a symbol name
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Mapping from an include-style path to its generated page
#[derive(Debug, Default)]
pub struct FileIndex {
    entries: HashMap<String, String>,
}

impl FileIndex {
    /// Build the index from a topic tree
    pub fn build(topics: &[Topic]) -> Self {
        let mut index = Self::default();
        for topic in topics {
            for file in &topic.files {
                index.insert(file.path.clone(), file.page.clone());
            }
        }
        index
    }

    /// Insert one file, overwriting any previous page
    pub fn insert(&mut self, path: String, page: String) {
        self.entries.insert(path, page);
    }

    /// Look up the page for an include path
    pub fn get(&self, path: &str) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
