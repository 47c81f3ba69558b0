use crate::domain::model::{DomainResult, ExtractionResult, ResolutionStatus, RunSummary};
use crate::domain::ports::{ResultSink, Storage};
use crate::utils::error::Result;
use async_trait::async_trait;
use serde::Serialize;

pub const SUCCESSFUL_FILE: &str = "successful_data.json";
pub const FAILED_FILE: &str = "failed_data.json";
pub const FETCH_LOG_FILE: &str = "fetch_log.txt";

#[derive(Debug, Clone, Serialize)]
struct SuccessRecord {
    domain: String,
    source_url: Option<String>,
    contact_page_used: bool,
    #[serde(flatten)]
    result: ExtractionResult,
}

#[derive(Debug, Clone, Serialize)]
struct FailureRecord {
    domain: String,
    status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reason: Option<String>,
}

/// 收集結果，完成時寫出三個報表檔
pub struct JsonReportSink<S: Storage> {
    storage: S,
    successful: Vec<SuccessRecord>,
    failed: Vec<FailureRecord>,
}

impl<S: Storage> JsonReportSink<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            successful: Vec::new(),
            failed: Vec::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[async_trait]
impl<S: Storage> ResultSink for JsonReportSink<S> {
    async fn accept(&mut self, result: &DomainResult) -> Result<()> {
        let domain = result.domain.to_string();
        match &result.status {
            ResolutionStatus::Resolved { result: extraction } => {
                self.successful.push(SuccessRecord {
                    domain,
                    source_url: result.source_url.clone(),
                    contact_page_used: result.contact_page_used,
                    result: extraction.clone(),
                });
            }
            ResolutionStatus::NoAddressFound => {
                self.failed.push(FailureRecord {
                    domain,
                    status: "failed to get address",
                    reason: None,
                });
            }
            ResolutionStatus::FetchFailed { failure } => {
                self.failed.push(FailureRecord {
                    domain,
                    status: "failed to fetch",
                    reason: Some(failure.to_string()),
                });
            }
        }
        Ok(())
    }

    async fn finish(&mut self, summary: &RunSummary) -> Result<()> {
        let successful = serde_json::to_string_pretty(&self.successful)?;
        self.storage
            .write_file(SUCCESSFUL_FILE, successful.as_bytes())
            .await?;

        let failed = serde_json::to_string_pretty(&self.failed)?;
        self.storage.write_file(FAILED_FILE, failed.as_bytes()).await?;

        let log = format_fetch_log(summary, &chrono::Utc::now().to_rfc3339());
        self.storage.write_file(FETCH_LOG_FILE, log.as_bytes()).await?;

        tracing::info!(
            "💾 Wrote {} resolved and {} failed record(s)",
            self.successful.len(),
            self.failed.len()
        );
        Ok(())
    }
}

fn format_fetch_log(summary: &RunSummary, completed_at: &str) -> String {
    format!(
        "Total domains: {}\n\
         Domains successfully fetched: {}\n\
         Domains failed to fetch: {}\n\
         Domains failed to get address: {}\n\
         Completed at: {}\n",
        summary.total,
        summary.successful,
        summary.failed_to_fetch,
        summary.failed_to_get_address,
        completed_at
    )
}
