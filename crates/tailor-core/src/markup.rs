//! Markup Normalizer — prepares raw model text for the typst template.
//!
//! Every ASCII punctuation character is backslash-escaped, which makes it
//! literal in typst markup, so nothing the LLM wrote can be read as syntax
//! (`&`, `<` and `>` included). `**emphasis**` then becomes `#strong[...]`.
//! Control characters collapse to spaces.
//!
//! Nested `**` is not supported: matching is leftmost and non-greedy, so
//! `**a **b** c**` bolds `a ` and ` c` rather than nesting.

use std::sync::OnceLock;

use regex::Regex;

fn emphasis_pattern() -> &'static Regex {
    static EMPHASIS_RE: OnceLock<Regex> = OnceLock::new();
    EMPHASIS_RE.get_or_init(|| Regex::new(r"\*\*(.*?)\*\*").expect("valid emphasis regex"))
}

/// Makes `text` literal typst markup.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if c.is_ascii_punctuation() {
            out.push('\\');
            out.push(c);
        } else if c.is_control() {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}

/// Quotes `text` as a typst string literal.
pub fn string_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Escapes `text` and converts `**bold**` into `#strong[bold]`.
///
/// Absent input yields an empty string.
pub fn normalize_opt(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for m in emphasis_pattern().find_iter(text) {
        out.push_str(&escape(&text[last..m.start()]));
        out.push_str("#strong[");
        out.push_str(&escape(&text[m.start() + 2..m.end() - 2]));
        out.push(']');
        last = m.end();
    }
    out.push_str(&escape(&text[last..]));
    out
}

pub fn normalize(text: &str) -> String {
    normalize_opt(Some(text))
}
