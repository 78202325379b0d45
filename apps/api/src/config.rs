use anyhow::{ensure, Context, Result};

use crate::analysis::recommendations::{MAX_BUDGET, MIN_BUDGET};
use crate::editor::terms::TermSource;

/// Application configuration loaded from environment variables.
/// Startup fails if a variable is present but malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Only the presence of `GROQ_API_KEY` is kept; the key itself is dropped.
    pub has_external_credential: bool,
    pub term_source: TermSource,
    /// Fixed improvement budget. `None` selects the hash-derived budget.
    pub improvement_budget: Option<u32>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 8080,
            rust_log: "info".to_string(),
            has_external_credential: false,
            term_source: TermSource::default(),
            improvement_budget: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from any key lookup; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Config::default();

        if let Some(port) = var("PORT") {
            config.port = port
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?;
        }
        if let Some(level) = var("RUST_LOG") {
            config.rust_log = level;
        }
        config.has_external_credential = var("GROQ_API_KEY").is_some();
        if let Some(source) = var("EDITOR_TERM_SOURCE") {
            config.term_source = source
                .parse::<TermSource>()
                .map_err(anyhow::Error::msg)
                .context("EDITOR_TERM_SOURCE must be 'catalog' or 'tokens'")?;
        }
        if let Some(budget) = var("IMPROVEMENT_BUDGET") {
            let budget = budget
                .trim()
                .parse::<u32>()
                .context("IMPROVEMENT_BUDGET must be a whole number")?;
            ensure!(
                (MIN_BUDGET..=MAX_BUDGET).contains(&budget),
                "IMPROVEMENT_BUDGET must be between {MIN_BUDGET} and {MAX_BUDGET}, got {budget}"
            );
            config.improvement_budget = Some(budget);
        }

        Ok(config)
    }
}
