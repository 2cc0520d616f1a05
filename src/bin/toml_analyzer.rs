use anyhow::Context;
use clap::Parser;
use file_analyzer::core::ConfigProvider;
use file_analyzer::utils::summary::{render_summary, SummaryOptions};
use file_analyzer::utils::{logger, validation::Validate};
use file_analyzer::{AnalysisEngine, LocalStorage, ReportPipeline, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-analyzer")]
#[command(about = "File analyzer driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "analyzer.toml")]
    config: String,

    /// Directory to analyze, overrides `analysis.directory`
    directory: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Validate the configuration and show the plan without scanning
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 先載入配置，日誌格式由配置決定
    let mut config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("Failed to load config file '{}'", args.config))?;

    logger::init_logger(config.log_format(), args.verbose);

    tracing::info!("🚀 Starting TOML-based file analyzer");
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    if let Some(directory) = args.directory.clone() {
        tracing::info!("🔧 Directory overridden to: {}", directory);
        config.set_directory(directory);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    tracing::info!("✅ Configuration loaded and validated successfully");
    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No files will be scanned");
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_dir().to_string());
    let display_threshold_mb = config.display_threshold_mb();
    let display_top = config.display_top();
    let extensions = config.extensions().map(<[String]>::to_vec);

    let outcome = match ReportPipeline::new(storage, config) {
        Ok(pipeline) => AnalysisEngine::new_with_monitoring(pipeline, monitor_enabled)
            .run()
            .await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(outcome) => {
            let options = SummaryOptions {
                display_threshold_mb,
                display_top,
                extensions: extensions.as_deref(),
            };
            print!(
                "{}",
                render_summary(
                    &outcome.result.report,
                    &outcome.result.entries,
                    &options,
                    &outcome.output_paths,
                )
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!(
                "❌ Analysis failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Analysis plan:");
    tracing::info!("   Directory: {}", config.directory());
    match config.extensions() {
        Some(extensions) => tracing::info!("   Extensions: {}", extensions.join(", ")),
        None => tracing::info!("   Extensions: all"),
    }
    tracing::info!(
        "   Large files: >= {} MB (top {} in report)",
        config.large_file_threshold_mb(),
        config.report_top()
    );
    if config.report_enabled() {
        let formats: Vec<&str> = config.formats().iter().map(|f| f.extension()).collect();
        tracing::info!(
            "   Report: {}/{} ({})",
            config.output_dir(),
            config.report_name(),
            formats.join(", ")
        );
    } else {
        tracing::info!("   Report: disabled");
    }
}
