// HTML emitter
//
// Turns classified token text into span markup while keeping transitions
// minimal: a wrapper opens only when the category changes, and the previous
// one closes first. Line feeds written here drive the line counter and the
// placement of section anchors.

use crate::highlight::classify::Category;
use crate::model::Section;
use std::fmt::Write as _;

/// Visual style of an inserted hyperlink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Symbol reference in code
    Code,
    /// Symbol reference inside a comment
    Comment,
    /// Include-path reference in a preprocessor line
    File,
}

impl LinkStyle {
    fn css_class(self) -> &'static str {
        match self {
            LinkStyle::Code => "sym",
            LinkStyle::Comment => "symc",
            LinkStyle::File => "inc",
        }
    }
}

/// Streaming HTML writer for one source page fragment
pub(crate) struct Emitter<'a> {
    out: String,
    open: Category,
    line: u32,
    sections: &'a [Section],
    next_section: usize,
}

impl<'a> Emitter<'a> {
    /// Create an emitter over a file's section markers, sorted by line
    pub fn new(sections: &'a [Section]) -> Self {
        Self {
            out: String::new(),
            open: Category::Default,
            line: 1,
            sections,
            next_section: 0,
        }
    }

    /// Switch the open style span, closing the previous one first.
    ///
    /// Default is "no wrapper": switching to it only closes.
    pub fn set_category(&mut self, category: Category) {
        if self.open == category {
            return;
        }
        if self.open.css_class().is_some() {
            self.out.push_str("</span>");
        }
        if let Some(class) = category.css_class() {
            let _ = write!(self.out, "<span class=\"{}\">", class);
        }
        self.open = category;
    }

    /// Write literal source text under the current span.
    ///
    /// The three reserved markup characters are escaped. Every line feed
    /// advances the line counter and flushes any section anchor whose
    /// recorded line has been reached, so anchors land right after the
    /// embedded line feed even in the middle of a multi-line token.
    pub fn text(&mut self, s: &str) {
        for c in s.chars() {
            match c {
                '&' => self.out.push_str("&amp;"),
                '<' => self.out.push_str("&lt;"),
                '>' => self.out.push_str("&gt;"),
                '\n' => {
                    self.out.push('\n');
                    self.line += 1;
                    self.flush_anchors();
                }
                c => self.out.push(c),
            }
        }
    }

    /// Write a hyperlink around escaped text, nested in the current span
    pub fn link(&mut self, style: LinkStyle, href: &str, text: &str) {
        self.out.push_str("<a class=\"");
        self.out.push_str(style.css_class());
        self.out.push_str("\" href=\"");
        self.text(href);
        self.out.push_str("\">");
        self.text(text);
        self.out.push_str("</a>");
    }

    fn flush_anchors(&mut self) {
        while self.next_section < self.sections.len()
            && self.sections[self.next_section].line <= self.line
        {
            let _ = write!(
                self.out,
                "<a id=\"{}\"></a>",
                self.sections[self.next_section].anchor
            );
            self.next_section += 1;
        }
    }

    /// Close any open span, emit markers the text never reached, and return
    /// the finished fragment
    pub fn finish(mut self) -> String {
        self.set_category(Category::Default);
        while self.next_section < self.sections.len() {
            let _ = write!(
                self.out,
                "<a id=\"{}\"></a>",
                self.sections[self.next_section].anchor
            );
            self.next_section += 1;
        }
        self.out
    }
}
