use clap::Parser;
use filterlist_etl::utils::{logger, validation::Validate};
use filterlist_etl::{CliConfig, EtlEngine, FilterError, FilterListPipeline, LocalStorage};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting filterlist-etl ({} variant)", config.variant);
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        fail(&e);
    }

    let monitor_enabled = config.monitor;
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = FilterListPipeline::new(LocalStorage::current_dir(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            println!("✅ Filter list written to {}", summary.output_path);
            println!(
                "   {} lines read, {} rules written, {} dropped",
                summary.stats.lines_read,
                summary.stats.lines_emitted,
                summary.stats.dropped()
            );
        }
        Err(e) => fail(&e),
    }

    Ok(())
}

fn fail(e: &FilterError) -> ! {
    tracing::error!(
        "❌ Run failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(e.exit_code().max(1));
}
