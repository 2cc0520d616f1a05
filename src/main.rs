use clap::Parser;
use file_analyzer::core::ConfigProvider;
use file_analyzer::utils::summary::{render_summary, SummaryOptions};
use file_analyzer::utils::{logger, validation::Validate};
use file_analyzer::{AnalysisEngine, CliConfig, LocalStorage, ReportPipeline};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_logger(config.log_format, config.verbose);

    tracing::info!("Starting file-analyzer");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.output_dir().to_string());
    let display_threshold_mb = config.min_size_mb;
    let display_top = config.top;
    let extensions = config.extensions().map(<[String]>::to_vec);
    let monitor_enabled = config.monitor;

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

            eprintln!("Error: {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }
}
