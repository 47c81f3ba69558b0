use address_scout::core::ConfigProvider;
use address_scout::utils::{logger, validation::Validate};
use address_scout::app::load_domains;
use address_scout::{run_batch, LocalStorage, TomlConfig};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-scout")]
#[command(about = "Address lookup driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "scout-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Override input.max_domains from config
    #[arg(long)]
    max_domains: Option<usize>,

    /// Dry run - show what would be processed without fetching anything
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.json_logs() {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(args.verbose);
    }
    tracing::info!("🚀 Starting TOML-based address scout");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(max) = args.max_domains {
        config.input.max_domains = Some(max);
        tracing::info!("🔧 max_domains overridden to: {}", max);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No requests will be sent");
        perform_dry_run(&config).await?;
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    match run_batch(&config, monitor_enabled).await {
        Ok(summary) => {
            println!("✅ Address lookup completed!");
            println!(
                "   {} resolved, {} failed to fetch, {} without address ({} total)",
                summary.successful,
                summary.failed_to_fetch,
                summary.failed_to_get_address,
                summary.total
            );
            println!("📁 Reports saved to: {}", config.output_path());
        }
        Err(e) => {
            tracing::error!(
                "❌ Address lookup failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 建議: {}", e.recovery_suggestion());

            let exit_code = e.exit_code();
            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Run: {}", config.run.name);
    if let Some(description) = &config.run.description {
        println!("  Description: {}", description);
    }
    println!("  Input: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Strategy: {:?}", config.extraction_strategy());

    if let Some(max_domains) = config.max_domains() {
        println!("  Max Domains: {}", max_domains);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

async fn perform_dry_run(config: &TomlConfig) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let domains = load_domains(&LocalStorage::new(".".to_string()), config.input_path()).await?;
    let planned = config
        .max_domains()
        .unwrap_or(domains.len())
        .min(domains.len());

    println!("📥 Input:");
    println!("  Domains in file: {}", domains.len());
    println!("  Domains to process: {}", planned);
    for domain in domains.iter().take(planned.min(5)) {
        println!("    - {}", domain);
    }
    if planned > 5 {
        println!("    ... and {} more", planned - 5);
    }

    println!();
    println!("📡 Fetching:");
    println!(
        "  Attempts per page: {} (http first, then https)",
        config.attempt_budget()
    );
    println!("  Request timeout: {} ms", config.request_timeout_ms());
    println!("  User-Agent: {}", config.user_agent());

    println!();
    println!("⚙️ Extraction:");
    println!("  Strategy: {:?}", config.extraction_strategy());
    println!("  Field value max length: {}", config.field_value_max_length());
    println!(
        "  Confirm contact page: {}",
        config.confirm_contact_page()
    );

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
