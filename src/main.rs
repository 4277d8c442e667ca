// src/main.rs

use clap::Parser;
use log::LevelFilter;
use log4rs::{
    append::console::{ConsoleAppender, Target},
    append::file::FileAppender,
    config::{Appender, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
    Config,
};
use std::fs;
use std::sync::Arc;
use telecoop_bills::{
    AppError, BillCollector, BillSink, BillSource, CommandLineInput, DirectoryStore,
    NetTotalExtractor, PdfExtractText, PdfTextSource, PdftotextCommand, PipelineConfig,
    PortalHttpClient, PortalTransport, SaveReport, TextExtraction,
};

/// Routes logs to stderr and to a debug-level file in the temp directory.
///
/// Stdout is left to `--no-download` JSON.
fn setup_logging(verbose: bool) -> Result<(), Box<dyn std::error::Error>> {
    let log_level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let log_file_path = std::env::temp_dir().join("telecoop_bills.log");
    if let Some(parent) = log_file_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let pattern = if verbose {
        "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}"
    } else {
        "{m}{n}"
    };

    let stderr_appender = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(pattern)))
        .build();

    let file_appender = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(
            "{d(%Y-%m-%d %H:%M:%S)} [{l}] - {m}{n}",
        )))
        .build(&log_file_path)?;

    let config = Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr_appender)))
        .appender(
            Appender::builder()
                .filter(Box::new(ThresholdFilter::new(LevelFilter::Debug)))
                .build("file", Box::new(file_appender)),
        )
        .build(
            Root::builder()
                .appender("stderr")
                .appender("file")
                .build(log_level),
        )?;

    log4rs::init_config(config)?;
    log::debug!("Logging initialized. Log file: {}", log_file_path.display());
    Ok(())
}

/// Executes the two-stage pipeline: collect from the portal, then store.
async fn execute_pipeline(config: &PipelineConfig) -> Result<(), AppError> {
    let transport: Arc<dyn PortalTransport> =
        Arc::new(PortalHttpClient::new(config.get_attempts)?);
    let collector = BillCollector::new(Arc::clone(&transport), config);

    let collection = collector.collect(&config.credentials).await?;

    if !config.download {
        let json = serde_json::to_string_pretty(&collection.bills)?;
        println!("{}", json);
        return Ok(());
    }

    let text_source: Box<dyn PdfTextSource> = match config.text_extraction {
        TextExtraction::Builtin => Box::new(PdfExtractText::new()),
        TextExtraction::Pdftotext => Box::new(PdftotextCommand::new()),
    };
    let store = DirectoryStore::new(&config.output_dir, transport, text_source);
    let options = config.save_options();
    let found = collection.bills.len();
    let report = store
        .save_bills(collection.bills, &options, &NetTotalExtractor::new())
        .await?;

    report_completion(config, found, collection.pages_fetched, &report);

    if !report.is_success() {
        return Err(AppError::Storage {
            path: config.output_dir.clone(),
            message: format!("{} bill(s) could not be stored", report.failed.len()),
        });
    }
    Ok(())
}

/// Reports completion to the user with stats.
fn report_completion(config: &PipelineConfig, found: usize, pages: u32, report: &SaveReport) {
    println!("📄 Found {} bill(s) on {} listing page(s).", found, pages);
    println!(
        "✓ {} new bill(s) saved to {} ({} with amount), {} already present",
        report.saved.len(),
        config.output_dir.display(),
        report.amounts_extracted,
        report.skipped.len()
    );
    for failure in &report.failed {
        eprintln!("⚠️  {}: {}", failure.file_name, failure.error);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CommandLineInput::parse();

    setup_logging(cli.verbose)?;

    let config = PipelineConfig::resolve(cli)?;

    execute_pipeline(&config).await?;

    Ok(())
}
