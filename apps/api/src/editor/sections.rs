//! Section and sub-entry location inside a LaTeX resume.
//!
//! The document is never parsed into a tree: a section is the byte span from its
//! header to the next boundary marker, and a sub-entry is a span inside that.
//! Everything goes through [`DocumentLocator`] so a real parser can replace the
//! regex scanning without touching the editing policy.
//!
//! Markers on `%`-commented lines are invisible to every lookup here.

use once_cell::sync::Lazy;
use regex::{Match, Regex};
use serde::Serialize;

use crate::editor::EditError;

static RE_SECTION_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(?:section\*?\s*\{|end\{document\})").unwrap());

static RE_SUBSECTION_BOUNDARY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(?:(?:sub)?section\*?\s*\{|end\{document\})").unwrap());

/// `\section` and `\subsection` markers, for structure checks.
pub static RE_STRUCTURE_MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\(?:sub)?section\*?\s*\{").unwrap());

static RE_LANGUAGES_BRACED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\\textbf\s*\{\s*(?i:(?:programming\s+)?languages)\s*\}\s*\{").unwrap()
});

static RE_LANGUAGES_ITEM: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\\item\s+(?i:(?:programming\s+)?languages)\s*:").unwrap());

static RE_RESUME_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\resumeItem\s*\{").unwrap());

static RE_PLAIN_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"\\item\b").unwrap());

/// Skills headers in priority order.
pub static SKILLS_HEADERS: Lazy<Vec<SectionHeader>> = Lazy::new(|| {
    vec![
        SectionHeader::compile(HeaderLevel::Section, "Technical Skills"),
        SectionHeader::compile(HeaderLevel::Section, "Skills"),
        SectionHeader::compile(HeaderLevel::Subsection, "Technical Skills"),
        SectionHeader::compile(HeaderLevel::Subsection, "Skills"),
    ]
});

/// Experience headers in priority order.
pub static EXPERIENCE_HEADERS: Lazy<Vec<SectionHeader>> = Lazy::new(|| {
    vec![
        SectionHeader::compile(HeaderLevel::Section, "Experience"),
        SectionHeader::compile(HeaderLevel::Section, "Work Experience"),
        SectionHeader::compile(HeaderLevel::Section, "Professional Experience"),
        SectionHeader::compile(HeaderLevel::Subsection, "Experience"),
    ]
});

/// Half-open byte range `[start, end)` into a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Borrows the span from `doc`, refusing ranges that fall outside it or
    /// split a UTF-8 sequence.
    pub fn slice<'a>(&self, doc: &'a str) -> Result<&'a str, EditError> {
        doc.get(self.start..self.end)
            .ok_or(EditError::SpanOutOfBounds {
                start: self.start,
                end: self.end,
                len: doc.len(),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderLevel {
    Section,
    Subsection,
}

/// One recognized header spelling, e.g. `\section{Technical Skills}`, with its
/// case-insensitive pattern compiled once.
#[derive(Debug, Clone)]
pub struct SectionHeader {
    pub level: HeaderLevel,
    pattern: Regex,
}

impl SectionHeader {
    fn compile(level: HeaderLevel, name: &str) -> Self {
        let command = match level {
            HeaderLevel::Section => "section",
            HeaderLevel::Subsection => "subsection",
        };
        let spelled = regex::escape(name).replace(' ', r"\s+");
        let pattern =
            Regex::new(&format!(r"(?i)\\{command}\*?\s*\{{\s*{spelled}\s*\}}")).unwrap();
        Self { level, pattern }
    }
}

/// Shapes of sub-entry the editor knows how to extend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubEntry {
    /// `\textbf{Languages}{: ...}` or `\item Languages: ...`
    Languages,
    /// The first `\resumeItem{...}` or `\item ...` line in the region.
    FirstItem,
}

/// A located sub-entry: the whole element plus the editable text inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntrySpan {
    pub entry: Span,
    pub content: Span,
}

pub trait DocumentLocator: Send + Sync {
    /// Region of the first header (in `headers` order) present in `doc`.
    fn locate_section(&self, doc: &str, headers: &[SectionHeader]) -> Option<Span>;

    /// First sub-entry of the given shape inside `region`. Errors when the
    /// entry is present but malformed.
    fn locate_sub_entry(
        &self,
        doc: &str,
        region: Span,
        entry: SubEntry,
    ) -> Result<Option<EntrySpan>, EditError>;
}

/// Regex-based locator over raw LaTeX text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkupLocator;

impl DocumentLocator for MarkupLocator {
    fn locate_section(&self, doc: &str, headers: &[SectionHeader]) -> Option<Span> {
        headers.iter().find_map(|header| {
            let found = first_live(&header.pattern, doc, 0, doc)?;
            let boundary = match header.level {
                HeaderLevel::Section => &*RE_SECTION_BOUNDARY,
                HeaderLevel::Subsection => &*RE_SUBSECTION_BOUNDARY,
            };
            let end = next_live_start(boundary, doc, found.end()).unwrap_or(doc.len());
            Some(Span::new(found.start(), end))
        })
    }

    fn locate_sub_entry(
        &self,
        doc: &str,
        region: Span,
        entry: SubEntry,
    ) -> Result<Option<EntrySpan>, EditError> {
        let text = region.slice(doc)?;
        match entry {
            SubEntry::Languages => {
                if let Some(m) = first_live(&RE_LANGUAGES_BRACED, text, region.start, doc) {
                    let open = region.start + m.end() - 1;
                    let start = region.start + m.start();
                    return braced_entry(doc, start, open, region.end).map(Some);
                }
                Ok(first_live(&RE_LANGUAGES_ITEM, text, region.start, doc).map(|m| {
                    let (start, content_start) = (region.start + m.start(), region.start + m.end());
                    line_entry(doc, start, content_start, region.end)
                }))
            }
            SubEntry::FirstItem => {
                let resume_item = first_live(&RE_RESUME_ITEM, text, region.start, doc);
                let plain_item = first_live(&RE_PLAIN_ITEM, text, region.start, doc);
                match (resume_item, plain_item) {
                    (Some(r), p) if p.map_or(true, |p| r.start() < p.start()) => {
                        let open = region.start + r.end() - 1;
                        braced_entry(doc, region.start + r.start(), open, region.end).map(Some)
                    }
                    (_, Some(p)) => {
                        let (start, content_start) = (region.start + p.start(), region.start + p.end());
                        let found = line_entry(doc, start, content_start, region.end);
                        // A bare `\item` with its text on the next line is not an editable shape
                        Ok((!found.content.is_empty()).then_some(found))
                    }
                    (_, None) => Ok(None),
                }
            }
        }
    }
}

/// First match in `text` that does not sit on a commented line. `text` starts
/// at byte `offset` of `doc`.
fn first_live<'t>(re: &Regex, text: &'t str, offset: usize, doc: &str) -> Option<Match<'t>> {
    re.find_iter(text)
        .find(|m| !is_commented(doc, offset + m.start()))
}

/// Start of the first live match at or after `from`.
fn next_live_start(re: &Regex, doc: &str, from: usize) -> Option<usize> {
    let mut pos = from;
    while let Some(m) = re.find_at(doc, pos) {
        if !is_commented(doc, m.start()) {
            return Some(m.start());
        }
        pos = m.end();
    }
    None
}

/// Whether byte `pos` falls after an unescaped `%` on its line.
fn is_commented(doc: &str, pos: usize) -> bool {
    let line_start = doc[..pos].rfind('\n').map_or(0, |i| i + 1);
    comment_start(&doc[line_start..pos]).is_some()
}

/// Byte index of the first unescaped `%` in `line`.
pub fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'%' => return Some(i),
            _ => {}
        }
        i += 1;
    }
    None
}

/// Length of the prefix of `text` that LaTeX actually typesets at its end:
/// trailing whitespace, a trailing comment and comment-only final lines are
/// excluded. Appending at this offset keeps the addition out of any comment.
pub fn live_text_end(text: &str) -> usize {
    let mut end = text.len();
    loop {
        let body = text[..end].trim_end();
        let line_start = body.rfind('\n').map_or(0, |i| i + 1);
        let line = &body[line_start..];
        let Some(comment) = comment_start(line) else {
            return body.len();
        };
        let kept = line[..comment].trim_end();
        if kept.is_empty() && line_start > 0 {
            end = line_start;
            continue;
        }
        return line_start + kept.len();
    }
}

/// Entry whose content is the brace group opening at `open`.
fn braced_entry(doc: &str, start: usize, open: usize, limit: usize) -> Result<EntrySpan, EditError> {
    let close = matching_brace(doc, open, limit)?;
    Ok(EntrySpan {
        entry: Span::new(start, close + 1),
        content: Span::new(open + 1, close),
    })
}

/// Entry whose content runs from `content_start` to the end of the line, minus
/// a trailing comment, trailing whitespace and a trailing `\\` line break.
fn line_entry(doc: &str, start: usize, content_start: usize, limit: usize) -> EntrySpan {
    let line_end = doc[content_start..limit]
        .find('\n')
        .map(|i| content_start + i)
        .unwrap_or(limit);
    let line = &doc[content_start..line_end];
    let line = comment_start(line).map_or(line, |c| &line[..c]);
    let trimmed = line.trim_end();
    let trimmed = trimmed.strip_suffix(r"\\").unwrap_or(trimmed).trim_end();
    let leading = trimmed.len() - trimmed.trim_start().len();

    EntrySpan {
        entry: Span::new(start, line_end),
        content: Span::new(content_start + leading, content_start + trimmed.len()),
    }
}

/// Byte index of the `}` closing the `{` at `open`, honoring `\{` / `\}` escapes.
/// Only scans up to `limit`.
pub fn matching_brace(doc: &str, open: usize, limit: usize) -> Result<usize, EditError> {
    let bytes = doc.as_bytes();
    if bytes.get(open) != Some(&b'{') {
        return Err(EditError::UnbalancedBraces { offset: open });
    }

    let mut depth = 0usize;
    let mut i = open;
    while i < limit.min(bytes.len()) {
        match bytes[i] {
            b'\\' => i += 1,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(i);
                }
            }
            _ => {}
        }
        i += 1;
    }

    Err(EditError::UnbalancedBraces { offset: open })
}

/// Number of `\section` / `\subsection` markers in `doc`.
pub fn count_structure_markers(doc: &str) -> usize {
    RE_STRUCTURE_MARKER.find_iter(doc).count()
}
