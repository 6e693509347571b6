use anyhow::Context;
use clap::Parser;
use filterlist_etl::config::toml_config::TomlConfig;
use filterlist_etl::core::pipeline::render_output;
use filterlist_etl::core::ConfigProvider;
use filterlist_etl::utils::{logger, validation::Validate};
use filterlist_etl::{EtlEngine, FilterError, FilterListPipeline, LocalStorage, TransformStats};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "toml_filter")]
#[command(about = "Filter list transform driven by a TOML configuration file")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "filterlist.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Read and transform the source without writing the output file
    #[arg(long)]
    dry_run: bool,

    /// Number of output lines shown by --dry-run
    #[arg(long, default_value = "10")]
    preview: usize,

    /// Print the dry-run report as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct DryRunReport<'a> {
    pipeline: &'a str,
    source: &'a str,
    output: &'a str,
    variant: String,
    stats: &'a TransformStats,
    preview: Vec<&'a str>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 日誌格式要先讀設定才知道，載入失敗時用預設格式
    let config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(args.verbose);
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based filter list transform");
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    display_config_summary(&config, &args);

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let pipeline = FilterListPipeline::new(LocalStorage::current_dir(), config);
    let engine = EtlEngine::new_with_monitoring(pipeline, monitor_enabled);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - output file will not be written");
        let result = match engine.dry_run().await {
            Ok(result) => result,
            Err(e) => fail(&e),
        };

        let config = engine.pipeline().config();
        let rendered = render_output(&result);
        let report = DryRunReport {
            pipeline: &config.pipeline.name,
            source: config.input_path(),
            output: config.output_path(),
            variant: config.variant().to_string(),
            stats: &result.stats,
            preview: rendered.lines().take(args.preview).collect(),
        };

        if args.json {
            let json = serde_json::to_string_pretty(&report)
                .context("failed to serialize dry-run report")?;
            println!("{}", json);
        } else {
            print_dry_run(&report);
        }
        return Ok(());
    }

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

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!(
        "  Pipeline: {} v{}",
        config.pipeline.name,
        config.pipeline.version.as_deref().unwrap_or("-")
    );
    if let Some(description) = &config.pipeline.description {
        println!("  Description: {}", description);
    }
    println!("  Source: {}", config.input_path());
    println!("  Output: {}", config.output_path());
    println!("  Variant: {}", config.variant());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn print_dry_run(report: &DryRunReport<'_>) {
    let stats = report.stats;
    println!("🔍 Dry Run Analysis:");
    println!("  Lines read: {}", stats.lines_read);
    println!(
        "  Dropped: {} ({} blank, {} comment)",
        stats.dropped(),
        stats.blank_dropped,
        stats.comment_dropped
    );
    println!("  Hosts entries rewritten: {}", stats.hosts_rewritten);
    println!("  ^$document appended: {}", stats.suffix_appended);
    println!("  Rules to write: {}", stats.lines_emitted);
    println!();
    println!("📄 Preview of {}:", report.output);
    for line in &report.preview {
        println!("  {}", line);
    }
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
