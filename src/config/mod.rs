pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::fetcher::DEFAULT_USER_AGENT;
#[cfg(feature = "cli")]
use crate::domain::ports::{ConfigProvider, ExtractionStrategy};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use serde::{Deserialize, Serialize};

/// attempt_budget 的上限，CLI 與 TOML 設定共用
pub const MAX_ATTEMPT_BUDGET: u32 = 20;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "address-scout")]
#[command(about = "Find postal addresses on company websites")]
pub struct CliConfig {
    /// Domain list: CSV with a `domain` column, or one domain per line
    #[arg(long, short)]
    pub input_path: String,

    #[arg(long, default_value = "./output")]
    pub output_path: String,

    #[arg(long, default_value = "4")]
    pub attempt_budget: u32,

    #[arg(long, default_value = "5000")]
    pub request_timeout_ms: u64,

    #[arg(long)]
    pub max_domains: Option<usize>,

    #[arg(long, value_enum, default_value = "cascade")]
    pub strategy: ExtractionStrategy,

    #[arg(long, default_value = "150")]
    pub field_value_max_length: usize,

    #[arg(long, help = "Only re-extract fallback pages that look like contact pages")]
    pub confirm_contact_page: bool,

    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Log CPU and memory usage")]
    pub monitor: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn input_path(&self) -> &str {
        &self.input_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn attempt_budget(&self) -> u32 {
        self.attempt_budget
    }

    fn request_timeout_ms(&self) -> u64 {
        self.request_timeout_ms
    }

    fn max_domains(&self) -> Option<usize> {
        self.max_domains
    }

    fn extraction_strategy(&self) -> ExtractionStrategy {
        self.strategy
    }

    fn field_value_max_length(&self) -> usize {
        self.field_value_max_length
    }

    fn confirm_contact_page(&self) -> bool {
        self.confirm_contact_page
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("input_path", &self.input_path)?;
        validation::validate_path("output_path", &self.output_path)?;
        validation::validate_range("attempt_budget", self.attempt_budget, 1, MAX_ATTEMPT_BUDGET)?;
        validation::validate_positive_number("request_timeout_ms", self.request_timeout_ms, 1)?;
        validation::validate_positive_number(
            "field_value_max_length",
            self.field_value_max_length,
            1,
        )?;
        validation::validate_non_empty_string("user_agent", &self.user_agent)?;
        Ok(())
    }
}
