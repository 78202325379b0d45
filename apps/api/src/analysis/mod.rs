// Compatibility analysis: score, gap keywords and weighted recommendations.
// Pure and synchronous; the handlers are the only async surface.

pub mod catalog;
pub mod gaps;
pub mod handlers;
pub mod normalize;
pub mod recommendations;
pub mod scoring;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::analysis::gaps::MatchResult;
use crate::analysis::normalize::NormalizedText;
use crate::analysis::recommendations::{
    plan_recommendations, BudgetPolicy, HashedBudget, ImprovementStep, Recommendation,
};
use crate::analysis::scoring::{score_breakdown, ScoreBreakdown, SkillMatch};

pub const MAX_POTENTIAL_SCORE: i32 = 95;
const SUMMARY_GAP_TERMS: usize = 3;

/// Everything one analysis produces, assembled in a single pass.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub current_score: i32,
    pub potential_score: i32,
    pub score_improvement: i32,
    pub total_potential_improvement: u32,
    pub recommendations: Vec<Recommendation>, // at most 5
    pub keywords_to_add: Vec<String>,         // at most 8
    pub improvement_steps: Vec<ImprovementStep>,
    pub summary: String,
    pub breakdown: ScoreBreakdown,
    pub matches: MatchResult,
    pub budget_strategy: String,
}

/// Runs the scorer, gap extractor and planner with an injected budget policy.
#[derive(Clone)]
pub struct Analyzer {
    budget: Arc<dyn BudgetPolicy>,
}

impl Default for Analyzer {
    fn default() -> Self {
        Self::new(Arc::new(HashedBudget))
    }
}

impl Analyzer {
    pub fn new(budget: Arc<dyn BudgetPolicy>) -> Self {
        Self { budget }
    }

    pub fn budget_strategy(&self) -> &'static str {
        self.budget.name()
    }

    pub fn analyze(&self, resume_text: &str, job_text: &str) -> AnalysisResult {
        let job = NormalizedText::new(job_text);
        let resume = NormalizedText::new(resume_text);
        let skills = SkillMatch::between(&job, &resume);

        // Scorer and gap extractor share no state; order does not matter
        let breakdown = score_breakdown(job_text, &job, &resume, &skills);
        let matches = MatchResult::compute(&job, &resume, &skills);

        let total = self.budget.total_improvement(job_text, resume_text);
        let plan = plan_recommendations(&job, &skills, &matches.gap_keywords, total);

        let current_score = breakdown.final_score;
        let potential_score =
            (current_score + plan.current_impact() as i32).min(MAX_POTENTIAL_SCORE);

        debug!(
            job_skills = matches.found_job_skills.len(),
            resume_skills = matches.found_resume_skills.len(),
            gaps = matches.gap_keywords.len(),
            categories = plan.allocations.len(),
            budget = total,
            score = current_score,
            "analysis complete"
        );

        AnalysisResult {
            current_score,
            potential_score,
            score_improvement: potential_score - current_score,
            total_potential_improvement: plan.total_potential_improvement,
            recommendations: plan.rendered().to_vec(),
            keywords_to_add: matches.gap_keywords.clone(),
            improvement_steps: plan.improvement_steps(),
            summary: build_summary(current_score, &matches.gap_keywords),
            breakdown,
            matches,
            budget_strategy: self.budget_strategy().to_string(),
        }
    }
}

/// One-line verdict banded on the score.
fn build_summary(score: i32, gap_keywords: &[String]) -> String {
    let top: Vec<&str> = gap_keywords
        .iter()
        .take(SUMMARY_GAP_TERMS)
        .map(String::as_str)
        .collect();

    if score >= 75 {
        format!("Strong match ({score}/100). Your resume covers the core requirements of this posting.")
    } else if score >= 50 {
        if top.is_empty() {
            format!("Moderate match ({score}/100). Sharpen how your experience maps to the posting.")
        } else {
            format!("Moderate match ({score}/100). Consider adding: {}.", top.join(", "))
        }
    } else if top.is_empty() {
        format!("Low match ({score}/100). The resume shares little with this posting.")
    } else {
        format!("Low match ({score}/100). Significant gaps: {}.", top.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::recommendations::{FixedBudget, MAX_BUDGET, MIN_BUDGET};
    use crate::analysis::scoring::{MAX_SCORE, MIN_SCORE};

    fn analyze(resume_text: &str, job_text: &str) -> AnalysisResult {
        Analyzer::default().analyze(resume_text, job_text)
    }

    const JOB: &str = "We are hiring a Senior Backend Engineer with 5+ years of experience \
        in Python, Django and PostgreSQL. Experience with Docker and AWS is a plus. \
        A bachelor degree in computer science is required. You will mentor the team \
        and drive project delivery with strong communication skills.";

    const RESUME: &str = "Backend developer, 6 years of experience. Built Django and \
        PostgreSQL services, developed REST endpoints, led a migration project. \
        Bachelor of Science in Computer Science.";

    fn corpus() -> Vec<(&'static str, &'static str)> {
        vec![
            (JOB, RESUME),
            (JOB, ""),
            ("", RESUME),
            ("", ""),
            ("Entry-level intern role, Python and React, portfolio required", "Student"),
            ("Payroll specialist handling reconciliation and audits for clients", "Cashier"),
        ]
    }

    #[test]
    fn test_scores_stay_in_band_for_all_inputs() {
        for (job, resume) in corpus() {
            let result = analyze(resume, job);
            assert!(
                (MIN_SCORE..=MAX_SCORE).contains(&result.current_score),
                "score {} out of band",
                result.current_score
            );
        }
    }

    #[test]
    fn test_potential_score_formula_holds() {
        for (job, resume) in corpus() {
            let result = analyze(resume, job);
            let total = result.total_potential_improvement;
            assert!((MIN_BUDGET..=MAX_BUDGET).contains(&total));
            assert_eq!(
                result.potential_score,
                (result.current_score + total as i32).min(MAX_POTENTIAL_SCORE)
            );
            assert_eq!(
                result.score_improvement,
                result.potential_score - result.current_score
            );
        }
    }

    #[test]
    fn test_response_limits_hold() {
        for (job, resume) in corpus() {
            let result = analyze(resume, job);
            assert!(result.recommendations.len() <= 5);
            assert!(result.recommendations.len() >= 3);
            assert!(result.keywords_to_add.len() <= 8);
            assert_eq!(result.improvement_steps.len(), result.recommendations.len());
        }
    }

    #[test]
    fn test_analysis_is_deterministic() {
        let first = analyze(RESUME, JOB);
        let second = analyze(RESUME, JOB);
        assert_eq!(first.current_score, second.current_score);
        assert_eq!(first.breakdown, second.breakdown);
        assert_eq!(first.keywords_to_add, second.keywords_to_add);
        assert_eq!(
            first.total_potential_improvement,
            second.total_potential_improvement
        );
    }

    #[test]
    fn test_gap_keywords_name_missing_skills() {
        let result = analyze(RESUME, JOB);
        assert!(result.keywords_to_add.contains(&"Python".to_string()));
        assert!(result.keywords_to_add.contains(&"Docker".to_string()));
        assert!(!result.keywords_to_add.contains(&"Django".to_string()));
    }

    #[test]
    fn test_fixed_budget_is_injected() {
        let analyzer = Analyzer::new(Arc::new(FixedBudget::new(12)));
        let result = analyzer.analyze(RESUME, JOB);
        assert_eq!(result.total_potential_improvement, 12);
        assert_eq!(result.budget_strategy, "fixed");
    }

    #[test]
    fn test_summary_bands() {
        assert!(build_summary(80, &[]).starts_with("Strong match"));
        let gaps = vec!["Kafka".to_string()];
        assert!(build_summary(60, &gaps).contains("Kafka"));
        assert!(build_summary(30, &gaps).starts_with("Low match (30/100)"));
    }
}
