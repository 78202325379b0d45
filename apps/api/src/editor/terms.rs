//! Relevant-term extraction for the structural editor.

use std::collections::HashSet;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::catalog::STOP_WORDS;
use crate::analysis::normalize::NormalizedText;
use crate::analysis::scoring::catalog_skills_in;

pub const MAX_EDIT_TERMS: usize = 3;

static RE_TERM_TOKEN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Za-z0-9+#.\-]{2,}").unwrap());

/// Where the editor draws its terms from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TermSource {
    /// Catalog skills found in the job text, in catalog order.
    #[default]
    Catalog,
    /// Job-text tokens in order of appearance, minus stop words and numbers.
    Tokens,
}

impl FromStr for TermSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "catalog" => Ok(TermSource::Catalog),
            "tokens" => Ok(TermSource::Tokens),
            other => Err(format!("unknown term source '{other}' (expected catalog|tokens)")),
        }
    }
}

/// Up to [`MAX_EDIT_TERMS`] terms; identical job text always gives the same
/// terms in the same order.
pub fn extract_terms(job_text: &str, source: TermSource) -> Vec<String> {
    match source {
        TermSource::Catalog => catalog_skills_in(&NormalizedText::new(job_text))
            .into_iter()
            .take(MAX_EDIT_TERMS)
            .map(str::to_string)
            .collect(),
        TermSource::Tokens => token_terms(job_text),
    }
}

fn token_terms(job_text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    for m in RE_TERM_TOKEN.find_iter(job_text) {
        // Sentence punctuation, not part of names like "Node.js"
        let token = m.as_str().trim_end_matches(['.', '-']);
        if token.chars().count() < 2 {
            continue;
        }
        let lower = token.to_lowercase();
        if STOP_WORDS.contains(&lower.as_str()) || !token.chars().any(|c| c.is_alphabetic()) {
            continue;
        }
        if seen.insert(lower) {
            terms.push(token.to_string());
        }
        if terms.len() == MAX_EDIT_TERMS {
            break;
        }
    }

    terms
}
