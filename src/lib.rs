//! Headlamp - Generate a cross-linked HTML reference from annotated C++ headers
//!
//! Converts a configured tree of topics and header files into a static HTML
//! site: one syntax-highlighted page per header, with hyperlinks wherever an
//! identifier matches a documented symbol and navigation anchors at section
//! boundaries.

pub mod cli;
pub mod config;
pub mod error;
pub mod highlight;
pub mod index;
pub mod model;
pub mod output;
pub mod sections;

// Re-export main types
pub use config::Config;
pub use error::{Error, Result};
pub use highlight::{Category, Highlighter};
pub use index::{FileIndex, SymbolIndex};
pub use model::{load_topics, Section, SourceFile, Topic};
pub use output::{GenerationReport, SiteConfig, SiteGenerator};
pub use sections::SectionRules;
