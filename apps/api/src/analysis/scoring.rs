//! Compatibility scorer: an additive point model comparing resume text to job text.
//!
//! Deterministic and explainable: every component of the final number is kept in
//! [`ScoreBreakdown`], and the only "noise" is a jitter derived from a rolling hash
//! of the job text, so identical inputs always produce identical scores.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::{
    DEGREE_JOB_SIGNALS, DEGREE_RESUME_SIGNALS, ENTRY_JOB_SIGNALS, ENTRY_RESUME_SIGNALS,
    EXPERIENCE_TERMS, PROJECT_SIGNALS, SENIOR_JOB_SIGNALS, SENIOR_RESUME_SIGNALS, SKILL_CATALOG,
};
use crate::analysis::normalize::NormalizedText;

pub const BASE_SCORE: i32 = 30;
pub const MIN_SCORE: i32 = 20;
pub const MAX_SCORE: i32 = 90;

const SKILLS_MAX_POINTS: f64 = 30.0;
const SENIORITY_MATCH_POINTS: i32 = 15;
const SENIORITY_MISMATCH_PENALTY: i32 = -10;
const EDUCATION_POINTS: i32 = 10;
const EXPERIENCE_POINTS_PER_TERM: f64 = 3.0;
const EXPERIENCE_MAX_POINTS: f64 = 15.0;
const PROJECT_POINTS: i32 = 10;
const JITTER_MODULUS: u32 = 5;

/// Per-component view of a score. `final_score` is the clamped sum of the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub base_score: i32,
    pub skills_component: f64,
    pub seniority_component: i32,
    pub education_component: i32,
    pub experience_component: f64,
    pub project_component: i32,
    pub deterministic_jitter: i32,
    pub final_score: i32, // MIN_SCORE – MAX_SCORE
}

/// Catalog skills recognized in each text, in catalog order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SkillMatch {
    pub found_job_skills: Vec<&'static str>,
    pub found_resume_skills: Vec<&'static str>,
}

impl SkillMatch {
    pub fn between(job: &NormalizedText, resume: &NormalizedText) -> Self {
        Self {
            found_job_skills: catalog_skills_in(job),
            found_resume_skills: catalog_skills_in(resume),
        }
    }

    /// Job skills the resume never mentions, in catalog order.
    pub fn missing_from_resume(&self) -> Vec<&'static str> {
        self.found_job_skills
            .iter()
            .filter(|s| !self.found_resume_skills.contains(s))
            .copied()
            .collect()
    }
}

/// Catalog entries whose lower-cased form is a substring of `text`.
pub fn catalog_skills_in(text: &NormalizedText) -> Vec<&'static str> {
    SKILL_CATALOG
        .iter()
        .filter(|skill| text.contains(skill))
        .copied()
        .collect()
}

/// Scores raw resume text against raw job text. Total over all string inputs.
pub fn score(resume_text: &str, job_text: &str) -> ScoreBreakdown {
    let job = NormalizedText::new(job_text);
    let resume = NormalizedText::new(resume_text);
    let skills = SkillMatch::between(&job, &resume);
    score_breakdown(job_text, &job, &resume, &skills)
}

/// Scores already-normalized inputs. `job_raw` feeds the jitter hash, which is
/// computed over the text exactly as the caller supplied it.
pub fn score_breakdown(
    job_raw: &str,
    job: &NormalizedText,
    resume: &NormalizedText,
    skills: &SkillMatch,
) -> ScoreBreakdown {
    let skills_component = skills_points(skills);
    let seniority_component = seniority_points(job, resume);
    let education_component =
        if job.contains_any(DEGREE_JOB_SIGNALS) && resume.contains_any(DEGREE_RESUME_SIGNALS) {
            EDUCATION_POINTS
        } else {
            0
        };
    let experience_component = (resume.count_present(EXPERIENCE_TERMS) as f64
        * EXPERIENCE_POINTS_PER_TERM)
        .min(EXPERIENCE_MAX_POINTS);
    let project_component = if resume.contains_any(PROJECT_SIGNALS) {
        PROJECT_POINTS
    } else {
        0
    };
    let deterministic_jitter = jitter(job_raw);

    let total = BASE_SCORE as f64
        + skills_component
        + seniority_component as f64
        + education_component as f64
        + experience_component
        + project_component as f64
        + deterministic_jitter as f64;

    ScoreBreakdown {
        base_score: BASE_SCORE,
        skills_component,
        seniority_component,
        education_component,
        experience_component,
        project_component,
        deterministic_jitter,
        final_score: (total.round() as i32).clamp(MIN_SCORE, MAX_SCORE),
    }
}

/// `min(30, resume_skills / max(job_skills, 1) * 30)`.
fn skills_points(skills: &SkillMatch) -> f64 {
    let job_count = skills.found_job_skills.len().max(1) as f64;
    let ratio = skills.found_resume_skills.len() as f64 / job_count;
    (ratio * SKILLS_MAX_POINTS).min(SKILLS_MAX_POINTS)
}

/// Senior roles reward a matching signal and penalize its absence; entry-level
/// roles only reward.
fn seniority_points(job: &NormalizedText, resume: &NormalizedText) -> i32 {
    if job.contains_any(SENIOR_JOB_SIGNALS) {
        if resume.contains_any(SENIOR_RESUME_SIGNALS) {
            SENIORITY_MATCH_POINTS
        } else {
            SENIORITY_MISMATCH_PENALTY
        }
    } else if job.contains_any(ENTRY_JOB_SIGNALS) && resume.contains_any(ENTRY_RESUME_SIGNALS) {
        SENIORITY_MATCH_POINTS
    } else {
        0
    }
}

/// Order-dependent 32-bit rolling hash (`hash * 31 + code_unit`, wrapping) over
/// the UTF-16 code units of each part in turn.
pub fn rolling_hash(parts: &[&str]) -> i32 {
    parts
        .iter()
        .flat_map(|part| part.encode_utf16())
        .fold(0_i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
}

/// 0 – 4, derived from the job text only.
pub fn jitter(job_text: &str) -> i32 {
    (rolling_hash(&[job_text]).unsigned_abs() % JITTER_MODULUS) as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    const STRONG_RESUME: &str = "Senior engineer with 8 years of experience. Developed and built \
        Python and React services on AWS, created CI pipelines, managed and led a team. \
        Bachelor degree in CS. Portfolio on GitHub with several projects.";

    const SENIOR_JOB: &str = "Senior Software Engineer. We need Python, React and AWS. \
        A bachelor degree is preferred.";

    #[test]
    fn test_rolling_hash_matches_java_string_hash() {
        assert_eq!(rolling_hash(&["abc"]), 96354);
        assert_eq!(rolling_hash(&[""]), 0);
        // Parts are hashed as one continuous sequence
        assert_eq!(rolling_hash(&["ab", "c"]), rolling_hash(&["abc"]));
    }

    #[test]
    fn test_rolling_hash_wraps_instead_of_overflowing() {
        let long = "z".repeat(10_000);
        let _ = rolling_hash(&[&long]);
        assert!((0..5).contains(&jitter(&long)));
    }

    #[test]
    fn test_job_skills_without_resume_skills_scores_zero_skill_points() {
        let breakdown = score("", "Python, React, AWS");
        assert_eq!(breakdown.skills_component, 0.0);
        assert!(breakdown.final_score >= MIN_SCORE);
        assert!(breakdown.final_score <= BASE_SCORE + 4);

        let job = NormalizedText::new("Python, React, AWS");
        assert_eq!(catalog_skills_in(&job), vec!["Python", "React", "AWS"]);
    }

    #[test]
    fn test_empty_inputs_yield_base_score() {
        let breakdown = score("", "");
        assert_eq!(breakdown.deterministic_jitter, 0);
        assert_eq!(breakdown.final_score, BASE_SCORE);
    }

    #[test]
    fn test_score_is_deterministic() {
        let first = score(STRONG_RESUME, SENIOR_JOB);
        let second = score(STRONG_RESUME, SENIOR_JOB);
        assert_eq!(first, second);
    }

    #[test]
    fn test_strong_resume_clamps_at_upper_band() {
        let breakdown = score(STRONG_RESUME, SENIOR_JOB);
        assert_eq!(breakdown.skills_component, 30.0);
        assert_eq!(breakdown.seniority_component, 15);
        assert_eq!(breakdown.education_component, 10);
        assert_eq!(breakdown.experience_component, 15.0);
        assert_eq!(breakdown.project_component, 10);
        assert_eq!(breakdown.final_score, MAX_SCORE);
    }

    #[test]
    fn test_senior_job_without_signal_is_penalized() {
        let breakdown = score("Python developer", "Lead backend engineer, Python");
        assert_eq!(breakdown.seniority_component, -10);
        assert!(breakdown.final_score >= MIN_SCORE);
    }

    #[test]
    fn test_entry_level_mismatch_has_no_penalty() {
        let breakdown = score("Python developer", "Software engineering intern, Python");
        assert_eq!(breakdown.seniority_component, 0);

        let breakdown = score("Computer science student", "Software engineering intern");
        assert_eq!(breakdown.seniority_component, 15);
    }

    #[test]
    fn test_skill_ratio_is_capped() {
        // Resume knows more catalog skills than the job asks for
        let breakdown = score("Python, Rust, Docker, Redis", "Python required");
        assert_eq!(breakdown.skills_component, 30.0);
    }

    #[test]
    fn test_partial_skill_coverage_is_proportional() {
        let breakdown = score("Python", "Python, Docker, Kubernetes");
        assert!((breakdown.skills_component - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_experience_terms_capped_at_fifteen() {
        let breakdown = score("experience years developed built created managed led", "");
        assert_eq!(breakdown.experience_component, 15.0);

        let breakdown = score("developed and built", "");
        assert_eq!(breakdown.experience_component, 6.0);
    }

    #[test]
    fn test_education_needs_both_sides() {
        assert_eq!(score("Bachelor of Science", "Python").education_component, 0);
        assert_eq!(score("Python", "Degree required").education_component, 0);
        assert_eq!(
            score("Bachelor of Science", "Degree required").education_component,
            10
        );
    }

    #[test]
    fn test_missing_from_resume_keeps_catalog_order() {
        let job = NormalizedText::new("Docker, Python and Kubernetes");
        let resume = NormalizedText::new("python");
        let skills = SkillMatch::between(&job, &resume);
        assert_eq!(skills.missing_from_resume(), vec!["Docker", "Kubernetes"]);
    }
}
