pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::{cli::LocalStorage, toml_config::TomlConfig};

pub use crate::app::{run_batch, JsonReportSink};
pub use crate::core::{
    engine::ScoutEngine, extractor::FieldExtractor, fetcher::HttpTransport,
    resolver::DomainResolver, settings::ResolverSettings,
};
pub use crate::domain::model::{Domain, DomainResult, ExtractionResult, ResolutionStatus, RunSummary};
pub use crate::utils::error::{Result, ScoutError};
