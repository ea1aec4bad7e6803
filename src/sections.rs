// Section pre-scan
//
// Headers mark their sections with delimiter comment lines of the form
//
//   //==== Label Text ====
//
// The pre-scan records one section per delimiter, anchored at the line just
// above the delimiter so the anchor lands before the banner, except when the
// delimiter is the very first line.

use crate::error::Result;
use crate::model::{anchor_id, Section};
use regex::Regex;

/// Rules for discovering sections in a header file
#[derive(Debug)]
pub struct SectionRules {
    delimiter: Regex,
    symbol: Regex,
    skip: Vec<String>,
}

impl SectionRules {
    /// Create rules from a symbol pattern and a list of labels to ignore.
    ///
    /// `symbol_pattern` decides which section labels are indexed as linkable
    /// symbols; labels in `skip` (case-insensitive) produce no section at all.
    pub fn new(symbol_pattern: &str, skip: &[String]) -> Result<Self> {
        Ok(Self {
            delimiter: Regex::new(r"^//={3,}\s+(\S(?:.*\S)?)\s+={3,}$")?,
            symbol: Regex::new(symbol_pattern)?,
            skip: skip.iter().map(|s| s.to_lowercase()).collect(),
        })
    }

    /// Scan a source text for section delimiters.
    ///
    /// Returns sections in ascending line order. A delimiter on line n yields
    /// a section at line n-1, except n=1 which stays at line 1.
    pub fn scan(&self, source: &str) -> Vec<Section> {
        let mut sections = Vec::new();

        for (idx, line) in source.lines().enumerate() {
            let n = idx as u32 + 1;
            let Some(caps) = self.delimiter.captures(line) else {
                continue;
            };
            let label = &caps[1];
            if self.skip.contains(&label.to_lowercase()) {
                continue;
            }
            sections.push(Section {
                label: label.to_string(),
                anchor: anchor_id(label),
                line: if n > 1 { n - 1 } else { n },
                is_symbol: self.symbol.is_match(label),
            });
        }

        sections
    }
}
