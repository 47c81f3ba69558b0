use crate::core::resolver::DomainResolver;
use crate::domain::model::{Domain, DomainResult, RunSummary};
use crate::domain::ports::{ResultSink, Transport};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use async_trait::async_trait;

/// Resolves domains one at a time, in input order, handing each result to
/// the caller's sink.
pub struct ScoutEngine<T: Transport> {
    resolver: DomainResolver<T>,
    max_domains: Option<usize>,
    monitor: SystemMonitor,
}

impl<T: Transport> ScoutEngine<T> {
    pub fn new(resolver: DomainResolver<T>, max_domains: Option<usize>) -> Self {
        Self::new_with_monitoring(resolver, max_domains, false)
    }

    pub fn new_with_monitoring(
        resolver: DomainResolver<T>,
        max_domains: Option<usize>,
        monitor_enabled: bool,
    ) -> Self {
        Self {
            resolver,
            max_domains,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run<S: ResultSink>(&self, domains: Vec<Domain>, sink: &mut S) -> Result<RunSummary> {
        let limit = self.max_domains.unwrap_or(domains.len()).min(domains.len());
        tracing::info!("🚀 Resolving addresses for {} domain(s)", limit);
        self.monitor.log_stats("Start");

        let mut summary = RunSummary::default();
        for (index, domain) in domains.iter().take(limit).enumerate() {
            let result = self.resolver.resolve(domain).await;
            summary.record(&result);
            sink.accept(&result).await?;

            tracing::info!(
                "Domains successfully fetched: {}, failed to fetch: {}, remaining: {}",
                summary.successful,
                summary.failed_to_fetch,
                limit - index - 1
            );
            if self.monitor.is_enabled() {
                self.monitor.log_progress(index + 1, limit);
            }
        }

        sink.finish(&summary).await?;
        self.monitor.log_final_stats();
        tracing::info!(
            "🏁 Done: {} resolved, {} fetch failures, {} without address, {} total",
            summary.successful,
            summary.failed_to_fetch,
            summary.failed_to_get_address,
            summary.total
        );
        Ok(summary)
    }
}

/// In-memory sink; keeps results in input order.
#[async_trait]
impl ResultSink for Vec<DomainResult> {
    async fn accept(&mut self, result: &DomainResult) -> Result<()> {
        self.push(result.clone());
        Ok(())
    }

    async fn finish(&mut self, _summary: &RunSummary) -> Result<()> {
        Ok(())
    }
}
