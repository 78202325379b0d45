//! Gap keyword extraction: terms the job asks for that the resume never mentions.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::analysis::catalog::{SECONDARY_TERMS, STOP_WORDS};
use crate::analysis::normalize::NormalizedText;
use crate::analysis::scoring::SkillMatch;

pub const MAX_GAP_KEYWORDS: usize = 8;
const FALLBACK_LIMIT: usize = 5;
const FALLBACK_MIN_CHARS: usize = 4;

/// Skill matches plus the derived gap list.
#[derive(Debug, Clone, Serialize)]
pub struct MatchResult {
    pub found_job_skills: Vec<&'static str>,
    pub found_resume_skills: Vec<&'static str>,
    pub gap_keywords: Vec<String>,
}

impl MatchResult {
    pub fn compute(job: &NormalizedText, resume: &NormalizedText, skills: &SkillMatch) -> Self {
        Self {
            found_job_skills: skills.found_job_skills.clone(),
            found_resume_skills: skills.found_resume_skills.clone(),
            gap_keywords: extract_gap_keywords(job, resume, skills),
        }
    }
}

/// Builds the ordered gap list: missing catalog skills first, then secondary
/// terms, falling back to frequent job-text tokens when both are empty.
///
/// At most [`MAX_GAP_KEYWORDS`] entries, no case-insensitive duplicates.
pub fn extract_gap_keywords(
    job: &NormalizedText,
    resume: &NormalizedText,
    skills: &SkillMatch,
) -> Vec<String> {
    let mut keywords: Vec<String> = skills
        .missing_from_resume()
        .into_iter()
        .map(str::to_string)
        .collect();

    for term in SECONDARY_TERMS {
        let already_skill = skills
            .found_job_skills
            .iter()
            .any(|s| s.eq_ignore_ascii_case(term));
        if job.contains(term) && !already_skill && !resume.contains(term) {
            keywords.push(term.to_string());
        }
    }

    if keywords.is_empty() {
        keywords = frequent_tokens(job, FALLBACK_LIMIT);
    }

    dedup_case_insensitive(keywords)
        .into_iter()
        .take(MAX_GAP_KEYWORDS)
        .collect()
}

/// Most frequent non-stop-word tokens of at least four characters.
/// Ties keep first-occurrence order.
pub fn frequent_tokens(text: &NormalizedText, limit: usize) -> Vec<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    let mut order: Vec<&str> = Vec::new();

    for token in text.tokens() {
        if token.chars().count() < FALLBACK_MIN_CHARS || STOP_WORDS.contains(&token) {
            continue;
        }
        let count = counts.entry(token).or_insert(0);
        if *count == 0 {
            order.push(token);
        }
        *count += 1;
    }

    // Stable sort keeps first-occurrence order among equal counts
    order.sort_by(|a, b| counts[b].cmp(&counts[a]));
    order.into_iter().take(limit).map(str::to_string).collect()
}

fn dedup_case_insensitive(items: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.to_lowercase()))
        .collect()
}
