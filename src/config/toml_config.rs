use crate::config::MAX_ATTEMPT_BUDGET;
use crate::core::extractor::DEFAULT_FIELD_VALUE_MAX_LENGTH;
use crate::core::fetcher::{DEFAULT_ATTEMPT_BUDGET, DEFAULT_REQUEST_TIMEOUT_MS, DEFAULT_USER_AGENT};
use crate::domain::ports::{ConfigProvider, ExtractionStrategy};
use crate::utils::error::{Result, ScoutError};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^}]+)\}").expect("Failed to compile env var regex"));

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub run: RunInfo,
    pub input: InputConfig,
    pub fetch: Option<FetchConfig>,
    pub extract: Option<ExtractConfig>,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunInfo {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    pub path: String,
    pub max_domains: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    pub attempt_budget: Option<u32>,
    pub request_timeout_ms: Option<u64>,
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractConfig {
    pub strategy: Option<ExtractionStrategy>,
    pub field_value_max_length: Option<usize>,
    pub confirm_contact_page: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub json_logs: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| ScoutError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DOMAIN_LIST})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("run.name", &self.run.name)?;
        validation::validate_path("input.path", &self.input.path)?;
        validation::validate_path("output.path", &self.output.path)?;

        validation::validate_range(
            "fetch.attempt_budget",
            self.attempt_budget(),
            1,
            MAX_ATTEMPT_BUDGET,
        )?;
        validation::validate_positive_number(
            "fetch.request_timeout_ms",
            self.request_timeout_ms(),
            1,
        )?;
        validation::validate_non_empty_string("fetch.user_agent", self.user_agent())?;
        validation::validate_positive_number(
            "extract.field_value_max_length",
            self.field_value_max_length(),
            1,
        )?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.json_logs)
            .unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn input_path(&self) -> &str {
        &self.input.path
    }

    fn output_path(&self) -> &str {
        &self.output.path
    }

    fn attempt_budget(&self) -> u32 {
        self.fetch
            .as_ref()
            .and_then(|f| f.attempt_budget)
            .unwrap_or(DEFAULT_ATTEMPT_BUDGET)
    }

    fn request_timeout_ms(&self) -> u64 {
        self.fetch
            .as_ref()
            .and_then(|f| f.request_timeout_ms)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS)
    }

    fn max_domains(&self) -> Option<usize> {
        self.input.max_domains
    }

    fn extraction_strategy(&self) -> ExtractionStrategy {
        self.extract
            .as_ref()
            .and_then(|e| e.strategy)
            .unwrap_or_default()
    }

    fn field_value_max_length(&self) -> usize {
        self.extract
            .as_ref()
            .and_then(|e| e.field_value_max_length)
            .unwrap_or(DEFAULT_FIELD_VALUE_MAX_LENGTH)
    }

    fn confirm_contact_page(&self) -> bool {
        self.extract
            .as_ref()
            .and_then(|e| e.confirm_contact_page)
            .unwrap_or(false)
    }

    fn user_agent(&self) -> &str {
        self.fetch
            .as_ref()
            .and_then(|f| f.user_agent.as_deref())
            .unwrap_or(DEFAULT_USER_AGENT)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
