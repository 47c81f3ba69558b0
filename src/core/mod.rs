pub mod contact;
pub mod engine;
pub mod extractor;
pub mod fetcher;
pub mod normalizer;
pub mod patterns;
pub mod resolver;
pub mod settings;

pub use crate::domain::model::{Domain, DomainResult, ExtractionResult, RunSummary};
pub use crate::domain::ports::{ConfigProvider, ResultSink, Storage, Transport};
pub use crate::utils::error::Result;
