use crate::core::extractor::DEFAULT_FIELD_VALUE_MAX_LENGTH;
use crate::core::fetcher::{DEFAULT_ATTEMPT_BUDGET, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_USER_AGENT};
use crate::domain::ports::{ConfigProvider, ExtractionStrategy};
use std::time::Duration;

/// Resolver knobs, decoupled from where they were configured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    pub attempt_budget: u32,
    pub request_timeout_ms: u64,
    pub max_domains: Option<usize>,
    pub extraction_strategy: ExtractionStrategy,
    pub field_value_max_length: usize,
    pub confirm_contact_page: bool,
    pub user_agent: String,
}

impl ResolverSettings {
    pub fn from_provider<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            attempt_budget: config.attempt_budget(),
            request_timeout_ms: config.request_timeout_ms(),
            max_domains: config.max_domains(),
            extraction_strategy: config.extraction_strategy(),
            field_value_max_length: config.field_value_max_length(),
            confirm_contact_page: config.confirm_contact_page(),
            user_agent: config.user_agent().to_string(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            attempt_budget: DEFAULT_ATTEMPT_BUDGET,
            request_timeout_ms: DEFAULT_REQUEST_TIMEOUT_MS,
            max_domains: None,
            extraction_strategy: ExtractionStrategy::Cascade,
            field_value_max_length: DEFAULT_FIELD_VALUE_MAX_LENGTH,
            confirm_contact_page: false,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}
