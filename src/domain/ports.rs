use crate::domain::model::{DomainResult, FetchErrorKind, RunSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum ExtractionStrategy {
    #[default]
    Cascade,
    StructuredFields,
}

pub trait ConfigProvider: Send + Sync {
    fn input_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn attempt_budget(&self) -> u32;
    fn request_timeout_ms(&self) -> u64;
    fn max_domains(&self) -> Option<usize>;
    fn extraction_strategy(&self) -> ExtractionStrategy;
    fn field_value_max_length(&self) -> usize;
    fn confirm_contact_page(&self) -> bool;
    fn user_agent(&self) -> &str;
}

/// 單次 HTTP 請求成功時的回應
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub body: String,
    pub final_url: String,
}

#[derive(Debug, Clone)]
pub struct TransportError {
    pub kind: FetchErrorKind,
    pub message: String,
}

/// 只負責一次請求，重試與協定切換由 `RetryingFetcher` 處理
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(
        &self,
        url: &str,
        timeout: Duration,
    ) -> std::result::Result<TransportResponse, TransportError>;
}

/// 呼叫端擁有的結果輸出
#[async_trait]
pub trait ResultSink: Send {
    async fn accept(&mut self, result: &DomainResult) -> Result<()>;
    async fn finish(&mut self, summary: &RunSummary) -> Result<()>;
}
