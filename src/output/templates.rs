// Template engine for generating HTML output

use crate::error::Result;
use crate::model::Topic;
use tera::{Context, Tera};

/// Template engine wrapping Tera with the embedded page templates
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Create a new template engine with embedded templates
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        tera.add_raw_templates(vec![
            ("base.html", include_str!("../../templates/base.html.tera")),
            ("page.html", include_str!("../../templates/page.html.tera")),
            ("index.html", include_str!("../../templates/index.html.tera")),
            ("tree.html", include_str!("../../templates/tree.html.tera")),
        ])?;

        Ok(Self { tera })
    }

    /// Render one highlighted source page.
    ///
    /// `fragment` is trusted markup from the emitter and is inserted
    /// unescaped; the title is escaped by the template.
    pub fn render_page(&self, path: &str, fragment: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", path);
        context.insert("fragment", fragment);

        Ok(self.tera.render("page.html", &context)?)
    }

    /// Render the main index page listing every topic, file and section
    pub fn render_index(
        &self,
        topics: &[Topic],
        title: &str,
        intro: Option<&str>,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("intro", &intro);
        context.insert("topics", topics);

        Ok(self.tera.render("index.html", &context)?)
    }

    /// Render a navigation tree page.
    ///
    /// `current` selects the topic expanded to its files and sections;
    /// pass -1 for the all-collapsed tree.
    pub fn render_tree(&self, topics: &[Topic], current: i64, title: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("title", title);
        context.insert("topics", topics);
        context.insert("current", &current);

        Ok(self.tera.render("tree.html", &context)?)
    }
}
