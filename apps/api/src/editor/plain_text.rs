//! Plain-text view of a LaTeX resume, used to score a document before and after editing.

use once_cell::sync::Lazy;
use regex::Regex;

static RE_COMMENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)(^|[^\\])%[^\n]*").unwrap());
static RE_LINE_BREAK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\\\(\[[^\]]*\])?").unwrap());
static RE_ESCAPED_CHAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\([#&%$_])").unwrap());
static RE_ENVIRONMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(?:begin|end)\s*\{[^}]*\}(?:\[[^\]]*\])?").unwrap());
static RE_COMMAND: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\[a-zA-Z]+\*?(?:\[[^\]]*\])?").unwrap());
static RE_MARKUP_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[{}~]").unwrap());
static RE_WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Strips the preamble, comments, command names and their option brackets while
/// keeping argument text.
pub fn latex_to_plain_text(document: &str) -> String {
    let body = match document.find(r"\begin{document}") {
        Some(i) => &document[i..],
        None => document,
    };
    let body = match body.find(r"\end{document}") {
        Some(i) => &body[..i],
        None => body,
    };

    let text = RE_COMMENT.replace_all(body, "${1}");
    let text = RE_LINE_BREAK.replace_all(&text, " ");
    let text = RE_ESCAPED_CHAR.replace_all(&text, "${1}");
    let text = RE_ENVIRONMENT.replace_all(&text, " ");
    let text = RE_COMMAND.replace_all(&text, " ");
    let text = RE_MARKUP_CHARS.replace_all(&text, " ");
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}
