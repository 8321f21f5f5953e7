use api_client::{BackendClient, DirectoryClient, Endpoint, FetchClient, FetchResults};
use clap::{Parser, Subcommand};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use configuration::{Config, LogFormat};
use core_types::ViewModel;
use dashboard_cache::{DashboardCache, RefreshOutcome};
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use normalizer::{Normalizer, NormalizerConfig};
use presentation::{format_millions, format_percent, overview_cards, ExportReport};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// The main entry point for the Tradescope dashboard application.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file, if there is one.
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    let mut config = configuration::load_config_from(&cli.config)?;
    if let Some(format) = cli.log_format {
        config.logging.format = format;
    }
    let _log_guard = configuration::init_tracing(&config.logging);

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(port) = args.port {
                config.server.port = port;
            }
            web_server::run_server(config).await
        }
        Commands::Snapshot(args) => handle_snapshot(args, &config).await,
        Commands::Export(args) => handle_export(args, &config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Trade analytics dashboard: serves, prints and exports the normalized view
/// of the analysis backend's output.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Overrides `logging.format` from the configuration.
    #[arg(long, global = true, value_enum)]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the dashboard web server.
    Serve(ServeArgs),
    /// Fetch every endpoint once and print the dashboard as tables.
    Snapshot(SourceArgs),
    /// Fetch every endpoint once and write the export report to a file.
    Export(ExportArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.port` from the configuration.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct SourceArgs {
    /// Read `<endpoint-name>.json` files from this directory instead of calling the backend.
    #[arg(long)]
    from_dir: Option<PathBuf>,
}

#[derive(Parser)]
struct ExportArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output file. Defaults to a timestamped name in the current directory.
    #[arg(long)]
    out: Option<PathBuf>,
}

// ==============================================================================
// Shared Refresh Logic
// ==============================================================================

fn client_for(args: &SourceArgs, config: &Config) -> Arc<dyn FetchClient> {
    match &args.from_dir {
        Some(dir) => Arc::new(DirectoryClient::new(dir.clone())),
        None => Arc::new(BackendClient::new(&config.backend)),
    }
}

/// Fetches every endpoint concurrently with a progress bar, then normalizes
/// the results into a fresh cache.
async fn load_dashboard(args: &SourceArgs, config: &Config) -> anyhow::Result<RefreshOutcome> {
    let client = client_for(args, config);

    // Set up the progress bar
    let progress_bar = ProgressBar::new(Endpoint::ALL.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )?
            .progress_chars("#>-"),
    );

    // Create a concurrent task for each endpoint
    let tasks: Vec<_> = Endpoint::ALL
        .into_iter()
        .map(|endpoint| {
            let client = Arc::clone(&client);
            let pb_clone = progress_bar.clone();

            tokio::spawn(async move {
                pb_clone.set_message(format!("Fetching {endpoint}..."));
                let result = client.fetch(endpoint).await;
                pb_clone.inc(1);
                (endpoint, result)
            })
        })
        .collect();

    let mut results = FetchResults::new();
    for joined in join_all(tasks).await {
        let (endpoint, result) = joined?;
        if let Err(e) = &result {
            tracing::warn!(%endpoint, error = %e, "Endpoint fetch failed.");
        }
        results.insert(endpoint, result);
    }
    progress_bar.finish_with_message(format!(
        "{}/{} endpoints delivered data",
        results.succeeded(),
        results.len()
    ));

    let cache = DashboardCache::init(Normalizer::new(NormalizerConfig::from(&config.dashboard)));
    Ok(cache.refresh(results).await?)
}

// ==============================================================================
// Snapshot Command Logic
// ==============================================================================

async fn handle_snapshot(args: SourceArgs, config: &Config) -> anyhow::Result<()> {
    let outcome = load_dashboard(&args, config).await?;
    let model = &outcome.model;

    println!("{}", overview_table(model));
    println!("\nTop Export Destinations\n{}", countries_table(&model.export_destinations));
    println!("\nTop Import Sources\n{}", countries_table(&model.import_sources));

    if !model.insights.is_empty() {
        println!("\nInsights\n{}", insights_table(model));
    }

    if !outcome.failures.is_empty() {
        println!("\nWarning: some endpoints failed; their sections show defaults.");
        for failure in &outcome.failures {
            println!("  - {}: {}", failure.endpoint, failure.message);
        }
    }

    Ok(())
}

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn overview_table(model: &ViewModel) -> Table {
    let mut table = new_table(vec!["Metric", "Value", "Detail"]);
    for card in overview_cards(model) {
        table.add_row(vec![card.title.to_string(), card.value, card.subtitle]);
    }
    table
}

fn countries_table(entries: &[core_types::CountryEntry]) -> Table {
    let mut table = new_table(vec!["#", "Country", "Value", "Share", "Score"]);
    for entry in entries {
        table.add_row(vec![
            entry.rank.to_string(),
            entry.country.clone(),
            format_millions(entry.value),
            format_percent(entry.share_of_total),
            format!("{:.1}", entry.performance_score),
        ]);
    }
    table
}

fn insights_table(model: &ViewModel) -> Table {
    let mut table = new_table(vec!["Kind", "Title", "Message"]);
    for insight in &model.insights {
        table.add_row(vec![
            format!("{:?}", insight.kind),
            insight.title.clone(),
            insight.message.clone(),
        ]);
    }
    table
}

// ==============================================================================
// Export Command Logic
// ==============================================================================

async fn handle_export(args: ExportArgs, config: &Config) -> anyhow::Result<()> {
    let outcome = load_dashboard(&args.source, config).await?;
    let report = ExportReport::from_view_model(&outcome.model);

    let path = args
        .out
        .unwrap_or_else(|| Path::new(".").join(report.file_name()));
    tokio::fs::write(&path, report.to_json_pretty()?).await?;

    println!("Report {} written to {}", report.report_id, path.display());
    Ok(())
}
