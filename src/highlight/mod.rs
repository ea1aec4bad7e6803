// Source-to-HTML highlighting
//
// A single-pass lexical scanner classifies every character of a header into
// a display category, links identifiers that match the symbol index, and
// drops navigation anchors at pre-scanned section boundaries.

pub mod classify;
mod emitter;
mod scanner;

pub use classify::{classify_word, Category};
pub use emitter::LinkStyle;
pub use scanner::{expand_tabs, Highlighter};
