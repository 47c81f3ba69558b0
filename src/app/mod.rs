pub mod input;
pub mod report;

pub use input::{load_domains, parse_domain_list};
pub use report::JsonReportSink;

use crate::config::cli::LocalStorage;
use crate::core::engine::ScoutEngine;
use crate::core::fetcher::HttpTransport;
use crate::core::resolver::DomainResolver;
use crate::core::settings::ResolverSettings;
use crate::domain::model::RunSummary;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;

/// 載入網域清單、逐一解析，並把報表寫到 output_path
pub async fn run_batch<C: ConfigProvider + ?Sized>(
    config: &C,
    monitor_enabled: bool,
) -> Result<RunSummary> {
    let settings = ResolverSettings::from_provider(config);

    let input = LocalStorage::new(".".to_string());
    let domains = load_domains(&input, config.input_path()).await?;

    let transport = HttpTransport::new(&settings.user_agent)?;
    let resolver = DomainResolver::new(transport, &settings);
    let engine = ScoutEngine::new_with_monitoring(resolver, settings.max_domains, monitor_enabled);

    let mut sink = JsonReportSink::new(LocalStorage::new(config.output_path().to_string()));
    engine.run(domains, &mut sink).await
}
