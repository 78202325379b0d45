use std::sync::Arc;

use crate::analysis::recommendations::{BudgetPolicy, FixedBudget, HashedBudget};
use crate::analysis::Analyzer;
use crate::config::Config;
use crate::editor::{EditorConfig, ResumeEditor};

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Analyzer with its budget policy. Default: HashedBudget. Pin via IMPROVEMENT_BUDGET.
    pub analyzer: Analyzer,
    pub editor: Arc<ResumeEditor>,
}

impl AppState {
    pub fn from_config(config: Config) -> Self {
        let budget: Arc<dyn BudgetPolicy> = match config.improvement_budget {
            Some(points) => Arc::new(FixedBudget::new(points)),
            None => Arc::new(HashedBudget),
        };
        let editor = ResumeEditor::new(EditorConfig {
            has_external_credential: config.has_external_credential,
            term_source: config.term_source,
        });

        AppState {
            analyzer: Analyzer::new(budget),
            editor: Arc::new(editor),
            config,
        }
    }
}
