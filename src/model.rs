// Topic tree model
//
// The navigation hierarchy is topics -> files -> sections. Sections are
// discovered by pre-scanning each header for delimiter comment lines.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::sections::SectionRules;
use serde::Serialize;
use std::path::Path;

/// A named anchor point within one header file
#[derive(Debug, Clone, Serialize)]
pub struct Section {
    /// Label text taken from the delimiter line
    pub label: String,
    /// Anchor id derived from the label
    pub anchor: String,
    /// 1-based line the anchor is placed at
    pub line: u32,
    /// Whether the section names a linkable symbol
    pub is_symbol: bool,
}

/// One header file of the reference, with its pre-scanned sections
#[derive(Debug, Clone, Serialize)]
pub struct SourceFile {
    /// Include-style path relative to the source base directory
    pub path: String,
    /// Generated HTML page name
    pub page: String,
    /// Sections in ascending line order
    pub sections: Vec<Section>,
    /// Raw source text, read once up front
    #[serde(skip_serializing)]
    pub text: String,
}

/// A named grouping of files, the top level of the navigation tree
#[derive(Debug, Clone, Serialize)]
pub struct Topic {
    pub name: String,
    pub files: Vec<SourceFile>,
}

/// Derive an anchor id from a section label.
///
/// Every maximal run of non-alphanumeric characters collapses to a single
/// underscore, so `em::String &` becomes `em_String_`.
pub fn anchor_id(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut in_run = false;
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            in_run = false;
        } else if !in_run {
            out.push('_');
            in_run = true;
        }
    }
    out
}

/// Derive the generated page name for an include-style source path.
///
/// Path separators and dots each become an underscore. Two distinct paths
/// can normalize to the same page name; the last one written wins.
pub fn page_name(path: &str) -> String {
    let mut out: String = path
        .chars()
        .map(|c| match c {
            '/' | '\\' | '.' => '_',
            c => c,
        })
        .collect();
    out.push_str(".html");
    out
}

/// Load the topic tree declared in the config.
///
/// Each file entry is read into memory and pre-scanned for sections. Entries
/// containing glob metacharacters expand to every matching file under the
/// source directory, in sorted order. A missing file aborts the build.
pub fn load_topics(config: &Config, source_dir: &Path, rules: &SectionRules) -> Result<Vec<Topic>> {
    let mut topics = Vec::with_capacity(config.topics.len());

    for topic in &config.topics {
        let mut files = Vec::new();
        for entry in &topic.files {
            for path in resolve_entry(source_dir, entry)? {
                files.push(load_file(source_dir, &path, rules)?);
            }
        }
        topics.push(Topic {
            name: topic.name.clone(),
            files,
        });
    }

    Ok(topics)
}

/// Expand one config file entry to include-style paths
fn resolve_entry(source_dir: &Path, entry: &str) -> Result<Vec<String>> {
    if !entry.contains(['*', '?', '[']) {
        return Ok(vec![entry.to_string()]);
    }

    let pattern = source_dir.join(entry);
    let mut paths = Vec::new();
    for hit in glob::glob(&pattern.to_string_lossy())? {
        let hit = hit?;
        let rel = hit.strip_prefix(source_dir).unwrap_or(&hit);
        paths.push(rel.to_string_lossy().replace('\\', "/"));
    }
    paths.sort();

    if paths.is_empty() {
        return Err(Error::build(format!("pattern matched no files: {}", entry)));
    }
    Ok(paths)
}

fn load_file(source_dir: &Path, path: &str, rules: &SectionRules) -> Result<SourceFile> {
    let full = source_dir.join(path);
    let text = std::fs::read_to_string(&full).map_err(|e| Error::source_read(full, e))?;
    let sections = rules.scan(&text);

    Ok(SourceFile {
        path: path.to_string(),
        page: page_name(path),
        sections,
        text,
    })
}
