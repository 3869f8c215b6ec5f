//! catalog-inspector CLI - Browse an Oracle catalog and profile tables
//!
//! Usage:
//!   catalog-inspector [--connection <name>] schemas
//!   catalog-inspector [--connection <name>] tables
//!   catalog-inspector [--connection <name>] columns <TABLE>
//!   catalog-inspector [--connection <name>] table-info <TABLE> [--format json]
//!   catalog-inspector connections
//!
//! Examples:
//!   catalog-inspector --connection dev tables
//!   catalog-inspector table-info ORDERS --format json

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use catalog_inspector::catalog::{
    CatalogInspector, ColumnData, OracleCatalogInspector, TableInformation,
};
use catalog_inspector::config::{LogFormat, Settings};
use catalog_inspector::worker::{WorkerClient, WorkerQueryExecutor};

#[derive(Parser)]
#[command(name = "catalog-inspector")]
#[command(about = "Browse an Oracle catalog and profile table columns")]
#[command(version)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Named connection from the config file
    #[arg(long, global = true)]
    connection: Option<String>,

    /// Path to the worker binary (overrides worker.path)
    #[arg(long, global = true)]
    worker: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all schemas
    Schemas,

    /// List tables visible to the connected user
    Tables,

    /// List the columns of a table
    Columns {
        /// Table name, exactly as stored in the catalog
        table: String,
    },

    /// Profile a table: constraints, column values, numeric statistics
    TableInfo {
        /// Table name, exactly as stored in the catalog
        table: String,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List configured connections
    Connections,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Human-readable summary
    Text,
    /// Full profile as JSON
    Json,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match &cli.config {
        Some(path) => Settings::from_file(path),
        None => Settings::load(),
    };
    let settings = match settings {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_logging(&settings, cli.verbose);

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` wins, then `--verbose`, then `[logging].level`.
fn init_logging(settings: &Settings, verbose: bool) {
    let default_level = if verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    match settings.logging.format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

async fn run(cli: Cli, mut settings: Settings) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Connections = cli.command {
        cmd_connections(&settings);
        return Ok(());
    }

    if let Some(worker) = &cli.worker {
        settings.worker.path = Some(worker.display().to_string());
    }

    let data_source = settings.data_source(cli.connection.as_deref())?;
    tracing::info!("Using connection {}", data_source);

    let client = WorkerClient::spawn_with_settings(&settings).await?;
    let executor = WorkerQueryExecutor::with_client(client, &data_source);
    let inspector = OracleCatalogInspector::new(executor);

    match cli.command {
        Commands::Schemas => print_lines(inspector.get_schemas().await?),
        Commands::Tables => print_lines(inspector.get_tables().await?),
        Commands::Columns { table } => print_lines(inspector.get_columns(&table).await?),
        Commands::TableInfo { table, format } => {
            let info = inspector.get_table_information(&table).await?;
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&info)?),
                OutputFormat::Text => print_table_information(&table, &info),
            }
        }
        Commands::Connections => cmd_connections(&settings),
    }

    Ok(())
}

fn cmd_connections(settings: &Settings) {
    if settings.connections.is_empty() {
        println!("No connections configured.");
        return;
    }
    for (name, conn) in &settings.connections {
        match conn.to_data_source(name) {
            Ok(config) => println!("{}", config),
            Err(e) => println!("{} (unresolved: {})", name, e),
        }
    }
    let timeout = Duration::from_secs(settings.worker.timeout_secs);
    match settings.worker_path() {
        Ok(Some(path)) => println!("\nWorker: {} (timeout {:?})", path.display(), timeout),
        Ok(None) => println!("\nWorker: not configured"),
        Err(e) => println!("\nWorker: unresolved ({})", e),
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

fn print_table_information(table: &str, info: &TableInformation) {
    println!("Table: {}", table);
    println!("Columns: {}", info.column_count());
    println!();

    println!("Constraints:");
    if info.primary_keys().is_empty() {
        println!("  (none)");
    }
    for pk in info.primary_keys() {
        let marker = if pk.is_primary_key() { " [primary key]" } else { "" };
        println!("  {} {}{}", pk.constraint_type, pk.constraint_name, marker);
    }
    println!();

    for column in info.columns() {
        match column.data() {
            ColumnData::Numeric { values, stats } => match stats {
                Some(stats) => println!(
                    "  {:<30} {:<14} rows={:<8} min={} max={} median={}",
                    column.name(),
                    column.data_type(),
                    values.len(),
                    stats.min,
                    stats.max,
                    stats.median
                ),
                None => println!(
                    "  {:<30} {:<14} rows={:<8} (no values)",
                    column.name(),
                    column.data_type(),
                    values.len()
                ),
            },
            ColumnData::Text { values } => println!(
                "  {:<30} {:<14} rows={}",
                column.name(),
                column.data_type(),
                values.len()
            ),
        }
    }
}
