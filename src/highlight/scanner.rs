// Lexical scanner
//
// One left-to-right pass over the expanded text of a header. At each
// position the rules below are tried in order; the first hit consumes the
// token and hands it to the emitter:
//
//   whitespace, line comment, block comment, preprocessor line, string
//   literal, char literal, identifier, numeric literal, brace, fallback.
//
// Malformed input never fails: unterminated comments and literals simply
// run to end of text.

use crate::highlight::classify::{classify_word, Category};
use crate::highlight::emitter::{Emitter, LinkStyle};
use crate::index::{FileIndex, SymbolIndex};
use crate::model::Section;

/// Renders one header's source text into a highlighted HTML fragment
pub struct Highlighter<'a> {
    symbols: &'a SymbolIndex,
    files: &'a FileIndex,
    tab_width: usize,
}

impl<'a> Highlighter<'a> {
    pub fn new(symbols: &'a SymbolIndex, files: &'a FileIndex, tab_width: usize) -> Self {
        Self {
            symbols,
            files,
            tab_width,
        }
    }

    /// Convert source text to an HTML fragment.
    ///
    /// `sections` must be in ascending line order, as produced by the
    /// pre-scan of the same text.
    pub fn render(&self, source: &str, sections: &[Section]) -> String {
        let text = expand_tabs(source, self.tab_width);
        let mut em = Emitter::new(sections);
        self.scan(&text, &mut em);
        em.finish()
    }

    fn scan(&self, text: &str, em: &mut Emitter) {
        let bytes = text.as_bytes();
        let mut i = 0;

        while i < bytes.len() {
            let c = bytes[i];

            if c.is_ascii_whitespace() {
                // Whitespace keeps whatever span is open
                em.text(&text[i..i + 1]);
                i += 1;
                continue;
            }

            if c == b'/' && i + 1 < bytes.len() {
                if bytes[i + 1] == b'/' {
                    let j = line_end(bytes, i + 2);
                    self.write_comment(&text[i..j], em);
                    i = j;
                    continue;
                }
                if bytes[i + 1] == b'*' {
                    let j = match text[i + 2..].find("*/") {
                        Some(p) => i + 2 + p + 2,
                        None => bytes.len(),
                    };
                    self.write_comment(&text[i..j], em);
                    i = j;
                    continue;
                }
            }

            if c == b'#' && at_line_start(bytes, i) {
                em.set_category(Category::Preprocessor);
                let j = line_end(bytes, i + 1);
                let directive = &text[i..j];
                if directive_word(directive) == "include" {
                    self.write_with_file_links(directive, em);
                } else {
                    em.text(directive);
                }
                i = j;
                continue;
            }

            if c == b'"' {
                em.set_category(Category::StringLit);
                let j = literal_end(bytes, i, b'"');
                em.text(&text[i..j]);
                i = j;
                continue;
            }

            if c == b'\'' {
                em.set_category(Category::CharLit);
                let j = literal_end(bytes, i, b'\'');
                em.text(&text[i..j]);
                i = j;
                continue;
            }

            if is_word_start(c) {
                let mut j = i + 1;
                while j < bytes.len() && is_word_byte(bytes[j]) {
                    j += 1;
                }
                let word = &text[i..j];
                if let Some(href) = self.symbols.get(word) {
                    // Symbol links always win over keyword styling
                    em.set_category(Category::Default);
                    em.link(LinkStyle::Code, href, word);
                } else {
                    em.set_category(classify_word(word));
                    em.text(word);
                }
                i = j;
                continue;
            }

            if let Some(j) = match_numeric(bytes, i) {
                em.set_category(Category::Numeric);
                em.text(&text[i..j]);
                i = j;
                continue;
            }

            if c == b'{' || c == b'}' {
                em.set_category(Category::Brace);
                em.text(&text[i..i + 1]);
                i += 1;
                continue;
            }

            let n = text[i..].chars().next().map_or(1, char::len_utf8);
            em.set_category(Category::Default);
            em.text(&text[i..i + n]);
            i += n;
        }
    }

    /// Write a comment, linking any known symbol name found inside it.
    ///
    /// Words inside comments get no keyword or numeric styling; only
    /// symbol-index hits become links, in the comment link style.
    fn write_comment(&self, comment: &str, em: &mut Emitter) {
        em.set_category(Category::Comment);
        let mut rest = comment;
        while !rest.is_empty() {
            let Some((start, end)) = find_word(rest) else {
                em.text(rest);
                return;
            };
            let word = &rest[start..end];
            if let Some(href) = self.symbols.get(word) {
                em.text(&rest[..start]);
                em.link(LinkStyle::Comment, href, word);
            } else {
                em.text(&rest[..end]);
            }
            rest = &rest[end..];
        }
    }

    /// Write an include line, linking each bracketed or quoted filename
    /// that exists in the file index
    fn write_with_file_links(&self, directive: &str, em: &mut Emitter) {
        let mut rest = directive;
        while !rest.is_empty() {
            let Some((start, end)) = find_include_target(rest) else {
                em.text(rest);
                return;
            };
            let name = &rest[start..end];
            if let Some(page) = self.files.get(name) {
                em.text(&rest[..start]);
                em.link(LinkStyle::File, page, name);
            } else {
                em.text(&rest[..end]);
            }
            rest = &rest[end..];
        }
    }
}

/// Expand tabs to spaces up to the next multiple of `width`.
///
/// One forward pass; the column counts characters since the last line feed,
/// so expansion shifts columns but never line numbers.
pub fn expand_tabs(text: &str, width: usize) -> String {
    let width = width.max(1);
    let mut out = String::with_capacity(text.len());
    let mut col = 0usize;
    for c in text.chars() {
        match c {
            '\t' => {
                let n = width - col % width;
                out.extend(std::iter::repeat(' ').take(n));
                col += n;
            }
            '\n' => {
                out.push('\n');
                col = 0;
            }
            c => {
                out.push(c);
                col += 1;
            }
        }
    }
    out
}

/// Index just past the next line feed at or after `from`, or end of text
fn line_end(bytes: &[u8], from: usize) -> usize {
    let mut j = from;
    while j < bytes.len() && bytes[j] != b'\n' {
        j += 1;
    }
    if j < bytes.len() {
        j + 1
    } else {
        j
    }
}

/// True when every character between the previous line feed and `i` is
/// whitespace, making a `#` here a preprocessor directive
fn at_line_start(bytes: &[u8], i: usize) -> bool {
    let mut k = i;
    while k > 0 {
        k -= 1;
        match bytes[k] {
            b'\n' => return true,
            c if c.is_ascii_whitespace() => {}
            _ => return false,
        }
    }
    true
}

/// End of a quoted literal starting at `start`, one past the closing quote.
/// Backslash escapes the next character; an unterminated literal runs to
/// end of text.
fn literal_end(bytes: &[u8], start: usize, quote: u8) -> usize {
    let mut j = start + 1;
    while j < bytes.len() {
        if bytes[j] == b'\\' && j + 1 < bytes.len() {
            j += 2;
            continue;
        }
        if bytes[j] == quote {
            return j + 1;
        }
        j += 1;
    }
    bytes.len()
}

fn is_word_start(c: u8) -> bool {
    c.is_ascii_alphabetic() || c == b'_'
}

fn is_word_byte(c: u8) -> bool {
    c.is_ascii_alphanumeric() || c == b'_'
}

/// First identifier-shaped word in `s`, as byte offsets
fn find_word(s: &str) -> Option<(usize, usize)> {
    let bytes = s.as_bytes();
    let start = bytes.iter().position(|&c| is_word_start(c))?;
    let mut end = start + 1;
    while end < bytes.len() && is_word_byte(bytes[end]) {
        end += 1;
    }
    Some((start, end))
}

/// First `<...>` or `"..."` filename in an include line, as the byte span
/// of its contents. Either closing delimiter ends the target.
fn find_include_target(s: &str) -> Option<(usize, usize)> {
    let open = s.find(['<', '"'])?;
    let close = s[open + 1..].find(['>', '"'])?;
    Some((open + 1, open + 1 + close))
}

/// The directive word after `#` and any whitespace
fn directive_word(directive: &str) -> &str {
    let rest = directive[1..].trim_start_matches(|c: char| c.is_ascii_whitespace());
    let end = rest
        .as_bytes()
        .iter()
        .position(|&c| !is_word_byte(c))
        .unwrap_or(rest.len());
    &rest[..end]
}

/// Longest numeric literal at `start`, or None.
///
/// Integer form: decimal digits or `0x` hex digits, optional `u` then `l`
/// suffixes. Float form: digits with at most one dot, optional exponent,
/// optional `f`. Either way the match is rejected when the next character
/// is alphanumeric or a dot, so malformed adjacent tokens are not split.
fn match_numeric(bytes: &[u8], start: usize) -> Option<usize> {
    let boundary_ok = |end: usize| {
        end >= bytes.len() || {
            let c = bytes[end];
            !c.is_ascii_alphanumeric() && c != b'.'
        }
    };

    if let Some(end) = match_integer(bytes, start) {
        if boundary_ok(end) {
            return Some(end);
        }
    }
    if let Some(end) = match_float(bytes, start) {
        if boundary_ok(end) {
            return Some(end);
        }
    }
    None
}

fn match_integer(bytes: &[u8], start: usize) -> Option<usize> {
    let mut j;
    if bytes[start] == b'0' && start + 1 < bytes.len() && (bytes[start + 1] | 0x20) == b'x' {
        j = start + 2;
        while j < bytes.len() && bytes[j].is_ascii_hexdigit() {
            j += 1;
        }
    } else if bytes[start].is_ascii_digit() {
        j = start + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
    } else {
        return None;
    }

    if j < bytes.len() && (bytes[j] | 0x20) == b'u' {
        j += 1;
    }
    while j < bytes.len() && (bytes[j] | 0x20) == b'l' {
        j += 1;
    }
    Some(j)
}

fn match_float(bytes: &[u8], start: usize) -> Option<usize> {
    let mut j = start;
    while j < bytes.len() && bytes[j].is_ascii_digit() {
        j += 1;
    }
    let int_digits = j - start;

    // A dot is only consumed when digits follow it
    let mut frac_digits = 0;
    if j < bytes.len() && bytes[j] == b'.' {
        let mut k = j + 1;
        while k < bytes.len() && bytes[k].is_ascii_digit() {
            k += 1;
        }
        frac_digits = k - (j + 1);
        if frac_digits > 0 {
            j = k;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    // Exponent only counts with at least one digit after it
    if j < bytes.len() && (bytes[j] | 0x20) == b'e' {
        let mut k = j + 1;
        if k < bytes.len() && (bytes[k] == b'+' || bytes[k] == b'-') {
            k += 1;
        }
        let digits_from = k;
        while k < bytes.len() && bytes[k].is_ascii_digit() {
            k += 1;
        }
        if k > digits_from {
            j = k;
        }
    }

    if j < bytes.len() && (bytes[j] | 0x20) == b'f' {
        j += 1;
    }
    Some(j)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::anchor_id;

    fn indices() -> (SymbolIndex, FileIndex) {
        let mut symbols = SymbolIndex::default();
        symbols.insert(
            "acArray".to_string(),
            "acCore_acArray_h.html#acArray".to_string(),
        );
        symbols.insert(
            "acString".to_string(),
            "acCore_acString_h.html#acString".to_string(),
        );
        symbols.insert("class".to_string(), "kw_clash.html#class".to_string());

        let mut files = FileIndex::default();
        files.insert(
            "acCore/acString.h".to_string(),
            "acCore_acString_h.html".to_string(),
        );
        (symbols, files)
    }

    fn render(source: &str) -> String {
        let (symbols, files) = indices();
        Highlighter::new(&symbols, &files, 8).render(source, &[])
    }

    fn section(label: &str, line: u32) -> Section {
        Section {
            label: label.to_string(),
            anchor: anchor_id(label),
            line,
            is_symbol: true,
        }
    }

    #[test]
    fn test_expand_tabs_to_next_stop() {
        assert_eq!(expand_tabs("a\tb", 8), "a       b");
        assert_eq!(expand_tabs("\tx", 4), "    x");
        assert_eq!(expand_tabs("ab\t\tc", 4), "ab      c");
    }

    #[test]
    fn test_expand_tabs_resets_at_line_feed() {
        assert_eq!(expand_tabs("ab\n\tc", 4), "ab\n    c");
    }

    #[test]
    fn test_expand_tabs_preserves_line_count() {
        let src = "a\tb\nc\td\n";
        let expanded = expand_tabs(src, 8);
        assert_eq!(
            src.matches('\n').count(),
            expanded.matches('\n').count()
        );
    }

    #[test]
    fn test_keywords_are_styled() {
        // The space after the keyword stays inside the open span
        let html = render("class Foo;");
        assert!(html.contains("<span class=\"typ\">class </span>Foo;"));
    }

    #[test]
    fn test_symbol_becomes_code_link() {
        let html = render("acArray<int> a;");
        assert!(html.contains(
            "<a class=\"sym\" href=\"acCore_acArray_h.html#acArray\">acArray</a>"
        ));
    }

    #[test]
    fn test_symbol_wins_over_keyword() {
        // "class" is both a keyword and (here) an indexed symbol; the link
        // must win and no keyword span may wrap it.
        let html = render("class x;");
        assert!(html.contains("<a class=\"sym\" href=\"kw_clash.html#class\">class</a>"));
        assert!(!html.contains("<span class=\"typ\">class</span>"));
    }

    #[test]
    fn test_line_comment_spans_to_eol() {
        let html = render("int x; // trailing\nint y;");
        assert!(html.contains("<span class=\"com\">// trailing\n</span>"));
    }

    #[test]
    fn test_comment_links_known_symbols() {
        let html = render("// see acArray for details\n");
        assert!(html.contains(
            "<a class=\"symc\" href=\"acCore_acArray_h.html#acArray\">acArray</a>"
        ));
        assert!(html.contains("see "));
    }

    #[test]
    fn test_comment_words_get_no_keyword_styling() {
        let html = render("// return int\n");
        assert!(!html.contains("class=\"kw\""));
        assert!(!html.contains("class=\"typ\""));
    }

    #[test]
    fn test_block_comment_unterminated_runs_to_eof() {
        let html = render("/* open\nstill comment");
        assert!(html.contains("<span class=\"com\">"));
        assert!(html.contains("still comment"));
        assert_eq!(html.matches("<span").count(), html.matches("</span>").count());
    }

    #[test]
    fn test_block_comment_terminator_included() {
        let html = render("/* x */int");
        assert!(html.contains("<span class=\"com\">/* x */</span>"));
    }

    #[test]
    fn test_include_links_known_file() {
        let html = render("#include \"acCore/acString.h\"\n");
        assert!(html.contains(
            "<a class=\"inc\" href=\"acCore_acString_h.html\">acCore/acString.h</a>"
        ));
        // The directive text itself stays plain preprocessor text
        assert!(html.contains("<span class=\"pp\">#include "));
    }

    #[test]
    fn test_include_unknown_file_stays_plain() {
        let html = render("#include <stdio.h>\n");
        assert!(!html.contains("<a "));
        assert!(html.contains("&lt;stdio.h&gt;"));
    }

    #[test]
    fn test_bracketed_include_links_known_file() {
        let html = render("#include <acCore/acString.h>\n");
        assert!(html.contains("<a class=\"inc\" href=\"acCore_acString_h.html\">"));
    }

    #[test]
    fn test_directive_requires_line_start() {
        let html = render("int x; #define Y 1\n");
        assert!(!html.contains("class=\"pp\""));
    }

    #[test]
    fn test_directive_after_indent() {
        let html = render("   #define X 1\n");
        assert!(html.contains("<span class=\"pp\">#define X 1\n</span>"));
    }

    #[test]
    fn test_non_include_directive_has_no_file_links() {
        let html = render("#pragma warning \"acCore/acString.h\"\n");
        assert!(!html.contains("class=\"inc\""));
    }

    #[test]
    fn test_string_literal_with_escaped_quote() {
        let html = render(r#"s = "a\"b";"#);
        assert!(html.contains(r#"<span class="str">"a\"b"</span>"#));
    }

    #[test]
    fn test_string_literal_unterminated_runs_to_eof() {
        let html = render("x = \"no end");
        assert!(html.contains("<span class=\"str\">\"no end</span>"));
    }

    #[test]
    fn test_char_literal_distinct_from_string() {
        let html = render("c = 'x'; s = \"y\";");
        assert!(html.contains("<span class=\"chr\">'x'</span>"));
        assert!(html.contains("<span class=\"str\">\"y\"</span>"));
    }

    #[test]
    fn test_hex_with_suffix_is_one_token() {
        let html = render("n = 0xFFu;");
        assert!(html.contains("<span class=\"num\">0xFFu</span>"));
    }

    #[test]
    fn test_float_with_exponent_is_one_token() {
        let html = render("f = 3.14e-2f;");
        assert!(html.contains("<span class=\"num\">3.14e-2f</span>"));
    }

    #[test]
    fn test_long_suffixes() {
        let html = render("n = 10ull;");
        assert!(html.contains("<span class=\"num\">10ull</span>"));
    }

    #[test]
    fn test_identifier_with_digits_never_splits() {
        let html = render("foo123 = 1;");
        assert!(html.contains("foo123"));
        assert!(!html.contains("<span class=\"num\">123</span>"));
    }

    #[test]
    fn test_null_styled_numeric() {
        let html = render("p = NULL;");
        assert!(html.contains("<span class=\"num\">NULL</span>"));
    }

    #[test]
    fn test_braces_styled() {
        let html = render("{x}");
        assert!(html.contains("<span class=\"brc\">{</span>x<span class=\"brc\">}</span>"));
    }

    #[test]
    fn test_adjacent_braces_share_span() {
        let html = render("{}");
        assert_eq!(html.matches("<span class=\"brc\">").count(), 1);
    }

    #[test]
    fn test_whitespace_keeps_open_span() {
        // The space between the braces stays inside the brace span
        let html = render("{ }");
        assert!(html.contains("<span class=\"brc\">{ }</span>"));
    }

    #[test]
    fn test_spans_balance_on_mixed_input() {
        let html = render(
            "#include <acCore/acString.h>\nclass acFoo {\n\tint n; // count\n\tconst char *s = \"x\";\n};\n",
        );
        assert_eq!(html.matches("<span").count(), html.matches("</span>").count());
    }

    #[test]
    fn test_anchor_lands_on_recorded_line() {
        let (symbols, files) = indices();
        let hl = Highlighter::new(&symbols, &files, 8);
        let source = "// intro\n//==== acArray ====\nclass acArray;\n";
        let sections = [section("acArray", 1)];
        let html = hl.render(source, &sections);
        // Line 1 anchor is flushed right after the first line feed
        assert!(html.contains("// intro\n<a id=\"acArray\"></a>"));
    }

    #[test]
    fn test_anchor_inside_block_comment_line() {
        let (symbols, files) = indices();
        let hl = Highlighter::new(&symbols, &files, 8);
        let source = "/* a\nb\nc */\n";
        let sections = [section("acMid", 2)];
        let html = hl.render(source, &sections);
        assert!(html.contains("a\n<a id=\"acMid\"></a>b"));
    }

    #[test]
    fn test_tab_expansion_precedes_token_boundaries() {
        let html = render("\tint x;\n");
        assert!(html.contains("        <span class=\"typ\">int"));
    }
}
