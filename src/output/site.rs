// Static site generator
//
// Writes the reference to disk: one page per header, the navigation tree
// pages, the index page, search.json, and the static assets.

use crate::error::Result;
use crate::highlight::Highlighter;
use crate::model::Topic;
use crate::output::templates::TemplateEngine;
use rayon::prelude::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for site generation
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Output directory
    pub output_dir: PathBuf,
    /// Title for the index and tree pages
    pub title: String,
    /// Optional HTML fragment for the top of the index page
    pub intro: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("headlamp-docs"),
            title: "API Reference".to_string(),
            intro: None,
        }
    }
}

/// Static site generator
pub struct SiteGenerator {
    config: SiteConfig,
    engine: TemplateEngine,
    verbose: bool,
}

impl SiteGenerator {
    /// Create a new site generator
    pub fn new(config: SiteConfig) -> Result<Self> {
        let engine = TemplateEngine::new()?;
        Ok(Self {
            config,
            engine,
            verbose: false,
        })
    }

    /// Print a line per written file
    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Generate the complete reference site.
    ///
    /// The indices behind `highlighter` are immutable and every file's
    /// output is independent, so source pages render in parallel; all
    /// writes happen sequentially afterwards.
    pub fn generate(&self, topics: &[Topic], highlighter: &Highlighter) -> Result<GenerationReport> {
        let mut report = GenerationReport::default();

        fs::create_dir_all(&self.config.output_dir)?;

        self.copy_assets()?;
        report.assets_copied = true;

        let files: Vec<_> = topics.iter().flat_map(|t| &t.files).collect();
        let pages = files
            .par_iter()
            .map(|file| {
                let fragment = highlighter.render(&file.text, &file.sections);
                let html = self.engine.render_page(&file.path, &fragment)?;
                Ok((file.page.clone(), html))
            })
            .collect::<Result<Vec<_>>>()?;

        for (page, html) in &pages {
            self.write_file(page, html)?;
            report.source_pages += 1;
        }

        let tree = self
            .engine
            .render_tree(topics, -1, &self.config.title)?;
        self.write_file("tree.html", &tree)?;
        report.tree_pages += 1;

        for idx in 0..topics.len() {
            let tree = self
                .engine
                .render_tree(topics, idx as i64, &self.config.title)?;
            self.write_file(&format!("tree{}.html", idx), &tree)?;
            report.tree_pages += 1;
        }

        let index = self.engine.render_index(
            topics,
            &self.config.title,
            self.config.intro.as_deref(),
        )?;
        self.write_file("index.html", &index)?;

        let entries = search_entries(topics);
        report.search_entries = entries.len();
        let json = serde_json::to_string_pretty(&entries)?;
        self.write_file("search.json", &json)?;

        Ok(report)
    }

    /// Write embedded static assets (CSS, JS)
    fn copy_assets(&self) -> Result<()> {
        let css = include_str!("../../assets/style.css");
        self.write_file("style.css", css)?;

        let js = include_str!("../../assets/script.js");
        self.write_file("script.js", js)?;

        Ok(())
    }

    fn write_file(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.config.output_dir.join(name);
        if self.verbose {
            println!("Writing {}", path.display());
        }
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Get the output directory
    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }
}

/// Report of what was generated
#[derive(Debug, Default)]
pub struct GenerationReport {
    pub source_pages: usize,
    pub tree_pages: usize,
    pub search_entries: usize,
    pub assets_copied: bool,
}

impl GenerationReport {
    pub fn summary(&self) -> String {
        format!(
            "Generated {} source pages, {} tree pages, {} search entries, assets: {}",
            self.source_pages,
            self.tree_pages,
            self.search_entries,
            if self.assets_copied { "yes" } else { "no" }
        )
    }
}

/// One row of search.json
#[derive(Debug, Serialize)]
pub struct SearchEntry {
    pub name: String,
    pub kind: String,
    pub path: String,
    pub topic: String,
}

/// Flatten the topic tree into search entries for files and sections
fn search_entries(topics: &[Topic]) -> Vec<SearchEntry> {
    let mut entries = Vec::new();

    for topic in topics {
        for file in &topic.files {
            entries.push(SearchEntry {
                name: file.path.clone(),
                kind: "file".to_string(),
                path: file.page.clone(),
                topic: topic.name.clone(),
            });
            for section in &file.sections {
                entries.push(SearchEntry {
                    name: section.label.clone(),
                    kind: if section.is_symbol { "symbol" } else { "section" }.to_string(),
                    path: format!("{}#{}", file.page, section.anchor),
                    topic: topic.name.clone(),
                });
            }
        }
    }

    entries
}
