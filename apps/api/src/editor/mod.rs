// Structure-aware LaTeX resume editor.
// Inserts job-relevant terms into existing sections only; never adds or removes
// section markers, and never hands back a half-edited document.

pub mod handlers;
pub mod plain_text;
pub mod sections;
pub mod terms;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::editor::sections::{
    count_structure_markers, live_text_end, DocumentLocator, MarkupLocator, SubEntry,
    EXPERIENCE_HEADERS, SKILLS_HEADERS,
};
use crate::editor::terms::{extract_terms, TermSource};

/// Internal failures while rewriting a located region.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("unbalanced braces in entry starting at byte {offset}")]
    UnbalancedBraces { offset: usize },

    #[error("span {start}..{end} is outside the document (length {len})")]
    SpanOutOfBounds { start: usize, end: usize, len: usize },

    #[error("section marker count changed from {before} to {after}")]
    StructureChanged { before: usize, after: usize },
}

/// Editor settings injected at construction; the editor never reads the environment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub has_external_credential: bool,
    pub term_source: TermSource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditSuggestions {
    pub skills_additions: Vec<String>,
    pub keywords_to_include: Vec<String>,
    pub experience_enhancements: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditResult {
    pub original_document: String,
    pub edited_document: String,
    pub suggestions: EditSuggestions,
    pub changes_made: Vec<String>,
    pub term_source: TermSource,
}

/// Failure record. `original_document` is always the untouched input.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditFailure {
    pub error: String,
    pub original_document: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EditOutcome {
    Edited(EditResult),
    Failed(EditFailure),
}

/// Applies the conservative editing policy through a pluggable locator.
pub struct ResumeEditor<L = MarkupLocator> {
    config: EditorConfig,
    locator: L,
}

impl ResumeEditor<MarkupLocator> {
    pub fn new(config: EditorConfig) -> Self {
        Self::with_locator(config, MarkupLocator)
    }
}

impl<L: DocumentLocator> ResumeEditor<L> {
    pub fn with_locator(config: EditorConfig, locator: L) -> Self {
        if config.has_external_credential {
            info!("External editing credential configured; edits are applied by the local structural editor");
        }
        Self { config, locator }
    }

    /// Never panics and never returns a partially edited document: any internal
    /// failure becomes an [`EditFailure`] carrying the original text.
    pub fn edit_document_for_job(
        &self,
        document: &str,
        job_text: &str,
        resume_text: &str,
    ) -> EditOutcome {
        let terms = extract_terms(job_text, self.config.term_source);
        debug!(
            terms = terms.len(),
            document_bytes = document.len(),
            resume_chars = resume_text.chars().count(),
            "editing document"
        );

        match self.apply_edits(document, &terms) {
            Ok((edited_document, changes_made)) => EditOutcome::Edited(EditResult {
                original_document: document.to_string(),
                edited_document,
                suggestions: build_suggestions(&terms),
                changes_made,
                term_source: self.config.term_source,
            }),
            Err(e) => {
                warn!(error = %e, "document edit failed; returning original");
                EditOutcome::Failed(EditFailure {
                    error: format!("Failed to edit resume: {e}"),
                    original_document: document.to_string(),
                })
            }
        }
    }

    /// Works on a private copy; the caller's document is only replaced on `Ok`.
    fn apply_edits(&self, document: &str, terms: &[String]) -> Result<(String, Vec<String>), EditError> {
        let mut edited = document.to_string();
        let mut changes = Vec::new();

        if terms.is_empty() {
            return Ok((edited, changes));
        }

        if let Some(change) = self.extend_languages(&mut edited, terms)? {
            changes.push(change);
        }
        // Offsets are recomputed because the skills edit may have shifted them
        if let Some(change) = self.enhance_first_experience_item(&mut edited, terms)? {
            changes.push(change);
        }

        let before = count_structure_markers(document);
        let after = count_structure_markers(&edited);
        if before != after {
            return Err(EditError::StructureChanged { before, after });
        }

        Ok((edited, changes))
    }

    /// Appends terms not already listed to the skills region's Languages entry.
    fn extend_languages(&self, doc: &mut String, terms: &[String]) -> Result<Option<String>, EditError> {
        let Some(region) = self.locator.locate_section(doc, &SKILLS_HEADERS) else {
            return Ok(None);
        };
        let Some(found) = self.locator.locate_sub_entry(doc, region, SubEntry::Languages)? else {
            return Ok(None);
        };

        let current = found.content.slice(doc)?;
        let live = &current[..live_text_end(current)];
        let additions: Vec<String> = terms
            .iter()
            .filter(|t| !mentions(live, t))
            .map(|t| escape_latex(t))
            .collect();
        if additions.is_empty() {
            return Ok(None);
        }

        let separator = if live.is_empty() || live.ends_with(':') { " " } else { ", " };
        let insertion = format!("{separator}{}", additions.join(", "));
        let at = found.content.start + live.len();
        doc.insert_str(at, &insertion);

        debug!(entry_start = found.entry.start, added = additions.len(), "extended languages entry");
        Ok(Some(format!(
            "Added {} to the Languages entry of the skills section",
            additions.join(", ")
        )))
    }

    /// Appends a clause naming one new term to the first experience item.
    fn enhance_first_experience_item(
        &self,
        doc: &mut String,
        terms: &[String],
    ) -> Result<Option<String>, EditError> {
        let Some(region) = self.locator.locate_section(doc, &EXPERIENCE_HEADERS) else {
            return Ok(None);
        };
        let Some(found) = self.locator.locate_sub_entry(doc, region, SubEntry::FirstItem)? else {
            return Ok(None);
        };

        let current = found.content.slice(doc)?;
        let live = &current[..live_text_end(current)];
        let Some(term) = terms.iter().find(|t| !mentions(live, t)) else {
            return Ok(None);
        };

        // Keep a closing period at the very end of the sentence
        let body_len = live.strip_suffix('.').map_or(live.len(), str::len);
        let clause = format!(", leveraging {} technologies", escape_latex(term));
        doc.insert_str(found.content.start + body_len, &clause);

        debug!(entry_start = found.entry.start, "enhanced first experience item");
        Ok(Some(format!("Enhanced the first experience entry with {term}")))
    }
}

impl Default for ResumeEditor<MarkupLocator> {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

fn build_suggestions(terms: &[String]) -> EditSuggestions {
    EditSuggestions {
        skills_additions: terms.to_vec(),
        keywords_to_include: terms.to_vec(),
        experience_enhancements: terms
            .first()
            .map(|t| vec![format!("Enhanced experience descriptions with {t}")])
            .unwrap_or_default(),
    }
}

/// Case-insensitive check for `term` as a whole item, in its raw or escaped
/// spelling: `Java` is not mentioned by `JavaScript`, `C` is not mentioned by `C#`.
fn mentions(text: &str, term: &str) -> bool {
    let text = text.to_lowercase();
    [term.to_lowercase(), escape_latex(term).to_lowercase()]
        .iter()
        .any(|needle| contains_whole(&text, needle))
}

fn contains_whole(text: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return false;
    }
    let joins_term = |c: char| c.is_alphanumeric() || matches!(c, '+' | '#');
    text.match_indices(needle).any(|(at, _)| {
        let before = text[..at].chars().next_back();
        let after = text[at + needle.len()..].chars().next();
        !before.is_some_and(joins_term) && !after.is_some_and(joins_term)
    })
}

/// Escapes characters LaTeX treats as special in running text.
fn escape_latex(term: &str) -> String {
    let mut out = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '#' | '&' | '%' | '$' | '_') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
