use clap::Parser;
use review_notifier::cli::args::Args;
use review_notifier::commands::{self, handle_notify, EXIT_FATAL};
use review_notifier::config::{self, Config};
use review_notifier::infrastructure::logging::{setup_logging, LoggingConfig};
use review_notifier::notification::DispatchSummary;
use tracing::Level;

fn report_summary(summary: &DispatchSummary) {
    for failure in summary.failures() {
        if let Err(reason) = &failure.result {
            tracing::warn!(
                review_id = %failure.review_id,
                position = failure.position,
                stage = failure.stage.as_deref().unwrap_or("unknown"),
                "{}",
                reason
            );
        }
    }

    tracing::info!(
        total = summary.total,
        delivered = summary.delivered,
        failed = summary.failed,
        skipped = summary.skipped(),
        aborted = summary.aborted,
        "run finished"
    );
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 先加载 .env，日志过滤器才能读到其中的 RUST_LOG
    let env_file = config::load_env_file();

    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    setup_logging(
        LoggingConfig::default()
            .with_level(level)
            .with_format(args.log_format),
    )?;

    config::log_env_file(&env_file);

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            tracing::error!(stage = err.stage(), "{}", err);
            std::process::exit(EXIT_FATAL);
        }
    };
    config.update_from_args(&args);

    let summary = match handle_notify(&args, &config).await {
        Ok(summary) => summary,
        Err(err) => {
            tracing::error!(stage = err.stage(), "{}", err);
            std::process::exit(EXIT_FATAL);
        }
    };

    report_summary(&summary);

    let code = commands::exit_code(&summary);
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
