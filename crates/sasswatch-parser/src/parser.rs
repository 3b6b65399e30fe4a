//! Textual `@import` directive scanning
//!
//! Pure text in, ordered specifier list out. Comments are stripped before
//! directive scanning so imports inside comments are never recognized.

use once_cell::sync::Lazy;
use regex::Regex;

static BLOCK_COMMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)/\*.*?\*/").unwrap());

static LINE_COMMENTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"//[^\r\n]*").unwrap());

/// A single- or double-quoted specifier; quotes cannot span lines.
const STRING_LITERAL: &str = r#"(?:'[^'\r\n]*'|"[^"\r\n]*")"#;

/// One `@import` directive: one or more comma-separated quoted specifiers.
static IMPORT_DIRECTIVES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"@import\s*({STRING_LITERAL}(?:\s*,\s*{STRING_LITERAL})*)"
    ))
    .unwrap()
});

static QUOTED_SPECIFIER: Lazy<Regex> = Lazy::new(|| Regex::new(STRING_LITERAL).unwrap());

fn strip_comments(content: &str) -> String {
    let without_blocks = BLOCK_COMMENTS.replace_all(content, "");
    LINE_COMMENTS.replace_all(&without_blocks, "").into_owned()
}

/// Extract every import specifier from stylesheet text, in source order,
/// duplicates preserved. Whitespace (including newlines) around commas and
/// quotes is insignificant.
pub fn parse_imports(content: &str) -> Vec<String> {
    let content = strip_comments(content);
    IMPORT_DIRECTIVES
        .captures_iter(&content)
        .flat_map(|captures| {
            let list = captures.get(1).map_or("", |m| m.as_str());
            // re-scan for the quoted literals rather than splitting on
            // commas, which may also appear inside a specifier
            QUOTED_SPECIFIER
                .find_iter(list)
                // every match is quote-delimited, so one byte off each end
                .map(|literal| {
                    let literal = literal.as_str();
                    literal[1..literal.len() - 1].to_string()
                })
                .collect::<Vec<_>>()
        })
        .collect()
}
