//! Recommendation planner: picks advice categories, splits an improvement budget
//! across them and renders human-readable text.
//!
//! Invariant: the impacts of the full allocation always sum to the budget, even
//! though only the first [`MAX_RENDERED`] recommendations are returned to callers.

use serde::{Deserialize, Serialize};

use crate::analysis::catalog::{
    EDUCATION_TRIGGERS, EXPERIENCE_TRIGGERS, LEADERSHIP_TRIGGERS, PROJECT_TRIGGERS,
};
use crate::analysis::normalize::NormalizedText;
use crate::analysis::scoring::{rolling_hash, SkillMatch};

pub const MIN_BUDGET: u32 = 5;
pub const MAX_BUDGET: u32 = 15;
pub const MAX_RENDERED: usize = 5;
const MIN_CATEGORIES: usize = 3;
const SKILL_TERMS_IN_TEXT: usize = 3;
const KEYWORD_TERMS_IN_TEXT: usize = 5;

// ────────────────────────────────────────────────────────────────────────────
// Budget strategies
// ────────────────────────────────────────────────────────────────────────────

/// Chooses the total improvement budget (percentage points) for one analysis.
///
/// Carried in `AppState` as `Arc<dyn BudgetPolicy>`. Implementations must be
/// deterministic in their inputs.
pub trait BudgetPolicy: Send + Sync {
    fn total_improvement(&self, job_text: &str, resume_text: &str) -> u32;

    fn name(&self) -> &'static str;
}

/// Default: `5 + |rolling_hash(job ++ resume)| % 11`.
pub struct HashedBudget;

impl BudgetPolicy for HashedBudget {
    fn total_improvement(&self, job_text: &str, resume_text: &str) -> u32 {
        let span = MAX_BUDGET - MIN_BUDGET + 1;
        MIN_BUDGET + rolling_hash(&[job_text, resume_text]).unsigned_abs() % span
    }

    fn name(&self) -> &'static str {
        "hashed"
    }
}

/// Operator-pinned budget, clamped into the allowed range.
pub struct FixedBudget(u32);

impl FixedBudget {
    pub fn new(points: u32) -> Self {
        Self(points.clamp(MIN_BUDGET, MAX_BUDGET))
    }
}

impl BudgetPolicy for FixedBudget {
    fn total_improvement(&self, _job_text: &str, _resume_text: &str) -> u32 {
        self.0
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Advice category. The last three are generic fillers used when too few of the
/// job-specific categories apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Skills,
    Experience,
    Education,
    Leadership,
    Projects,
    Keywords,
    QuantifyImpact,
    TailorSummary,
    ActionVerbs,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub category: RecommendationCategory,
    pub text: String,
    pub impact: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImprovementStep {
    pub step: u32,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub estimated_time: String,
}

/// Full allocation across every triggered category, before truncation.
#[derive(Debug, Clone)]
pub struct RecommendationPlan {
    pub total_potential_improvement: u32,
    pub allocations: Vec<Recommendation>,
}

impl RecommendationPlan {
    /// The recommendations callers get to see.
    pub fn rendered(&self) -> &[Recommendation] {
        let end = self.allocations.len().min(MAX_RENDERED);
        &self.allocations[..end]
    }

    /// Sum of every allocated impact, rendered or not.
    pub fn current_impact(&self) -> u32 {
        self.allocations.iter().map(|r| r.impact).sum()
    }

    pub fn improvement_steps(&self) -> Vec<ImprovementStep> {
        self.rendered()
            .iter()
            .enumerate()
            .map(|(i, rec)| {
                let (title, priority, estimated_time) = step_profile(rec.category);
                ImprovementStep {
                    step: i as u32 + 1,
                    title: title.to_string(),
                    description: rec.text.clone(),
                    priority,
                    estimated_time: estimated_time.to_string(),
                }
            })
            .collect()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Planning
// ────────────────────────────────────────────────────────────────────────────

/// Detects categories, allocates `total_potential_improvement` across them and
/// renders each recommendation.
pub fn plan_recommendations(
    job: &NormalizedText,
    skills: &SkillMatch,
    gap_keywords: &[String],
    total_potential_improvement: u32,
) -> RecommendationPlan {
    let categories = detect_categories(job, skills, gap_keywords);
    let impacts = allocate_budget(total_potential_improvement, categories.len());

    let allocations = categories
        .into_iter()
        .zip(impacts)
        .map(|(category, impact)| Recommendation {
            category,
            text: render_text(category, skills, gap_keywords),
            impact,
        })
        .collect();

    RecommendationPlan {
        total_potential_improvement,
        allocations,
    }
}

/// Triggered categories in fixed evaluation order, padded with generic advice
/// up to three entries.
pub fn detect_categories(
    job: &NormalizedText,
    skills: &SkillMatch,
    gap_keywords: &[String],
) -> Vec<RecommendationCategory> {
    use RecommendationCategory::*;

    let checks = [
        (Skills, !skills.found_job_skills.is_empty()),
        (Experience, job.contains_any(EXPERIENCE_TRIGGERS)),
        (Education, job.contains_any(EDUCATION_TRIGGERS)),
        (Leadership, job.contains_any(LEADERSHIP_TRIGGERS)),
        (Projects, job.contains_any(PROJECT_TRIGGERS)),
        (Keywords, !gap_keywords.is_empty()),
    ];

    let mut categories: Vec<RecommendationCategory> = checks
        .into_iter()
        .filter(|(_, triggered)| *triggered)
        .map(|(category, _)| category)
        .collect();

    if categories.len() < MIN_CATEGORIES {
        categories.push(QuantifyImpact);
        categories.push(TailorSummary);
    }
    if categories.len() < MIN_CATEGORIES {
        categories.push(ActionVerbs);
    }

    categories
}

/// Integer split of `total` over `slots`; the remainder goes one point each to
/// the leading slots.
pub fn allocate_budget(total: u32, slots: usize) -> Vec<u32> {
    if slots == 0 {
        return Vec::new();
    }
    let slots_u32 = slots as u32;
    let base = total / slots_u32;
    let remainder = (total % slots_u32) as usize;
    (0..slots)
        .map(|i| if i < remainder { base + 1 } else { base })
        .collect()
}

fn render_text(
    category: RecommendationCategory,
    skills: &SkillMatch,
    gap_keywords: &[String],
) -> String {
    use RecommendationCategory::*;

    match category {
        Skills => {
            let missing = skills.missing_from_resume();
            let source = if missing.is_empty() {
                skills.found_job_skills.clone()
            } else {
                missing
            };
            let terms: Vec<&str> = source.into_iter().take(SKILL_TERMS_IN_TEXT).collect();
            format!(
                "Add or strengthen these technical skills from the job posting: {}. Show where you applied each one.",
                terms.join(", ")
            )
        }
        Experience => "Quantify your relevant experience: state time in role and a measurable outcome for each position.".to_string(),
        Education => "Make your education explicit: list your degree, institution and any relevant coursework or certifications.".to_string(),
        Leadership => "Highlight leadership and teamwork: mention teams you led, people you mentored or cross-functional work you coordinated.".to_string(),
        Projects => "Showcase relevant projects with a link to your portfolio or repository, naming the stack and the result.".to_string(),
        Keywords => {
            let terms: Vec<&str> = gap_keywords
                .iter()
                .take(KEYWORD_TERMS_IN_TEXT)
                .map(String::as_str)
                .collect();
            format!(
                "Work these job-description keywords into your resume where they genuinely apply: {}.",
                terms.join(", ")
            )
        }
        QuantifyImpact => "Quantify achievements with concrete numbers such as percentages, time saved or users served.".to_string(),
        TailorSummary => "Tailor your professional summary to mirror the job title and core requirements of this posting.".to_string(),
        ActionVerbs => "Start each bullet point with a strong action verb and keep descriptions to one line.".to_string(),
    }
}

/// (title, priority, estimated time) shown for a category's improvement step.
fn step_profile(category: RecommendationCategory) -> (&'static str, Priority, &'static str) {
    use RecommendationCategory::*;

    match category {
        Skills => ("Update technical skills", Priority::High, "15 minutes"),
        Keywords => ("Incorporate missing keywords", Priority::High, "20 minutes"),
        Experience => ("Strengthen experience descriptions", Priority::High, "45 minutes"),
        Leadership => ("Highlight leadership", Priority::Medium, "30 minutes"),
        Projects => ("Showcase projects", Priority::Medium, "1 hour"),
        QuantifyImpact => ("Quantify achievements", Priority::Medium, "30 minutes"),
        TailorSummary => ("Tailor your summary", Priority::Medium, "15 minutes"),
        Education => ("Clarify education", Priority::Low, "10 minutes"),
        ActionVerbs => ("Sharpen bullet points", Priority::Low, "20 minutes"),
    }
}
