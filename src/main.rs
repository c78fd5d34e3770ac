use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use configuration::{LoggingSettings, OutputFormat};
use render::Renderer;
use serde::Serialize;
use session::{SelectionView, Session, SessionEvent};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

mod interactive;
mod render;

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Sales reporting over a Superstore-style CSV export.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the configuration file.
    #[arg(long, global = true, default_value = "salesboard.toml")]
    config: PathBuf,

    /// The sales CSV to load. Overrides `dataset.path`.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Output format. Overrides `report.format`.
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the records, totals per category and sales per month.
    Overview(OverviewArgs),
    /// Show monthly sales and metrics for one selection.
    Report(ReportArgs),
    /// Pick categories and sub-categories at a prompt.
    Interactive,
}

#[derive(Parser)]
struct OverviewArgs {
    /// Number of records to list. Defaults to `report.overview_rows`.
    #[arg(long)]
    limit: Option<usize>,
}

#[derive(Parser)]
struct ReportArgs {
    /// The category to report on (e.g., "Furniture"). Defaults to the session's initial category.
    #[arg(long)]
    category: Option<String>,

    /// A sub-category within the category. Repeat for several.
    #[arg(long = "sub-category")]
    sub_categories: Vec<String>,
}

fn main() -> Result<()> {
    // Pick up SALESBOARD__* overrides from a local .env file, if any.
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = configuration::load_config(&cli.config)
        .with_context(|| format!("Failed to load configuration from {}", cli.config.display()))?;
    if let Some(data) = cli.data {
        config.dataset.path = data;
    }
    let format = cli.format.unwrap_or(config.report.format);

    let _log_guard = init_tracing(&config.logging)?;

    let store = dataset::load_csv(&config.dataset)
        .with_context(|| format!("Failed to load sales data from {}", config.dataset.path.display()))?;
    let mut session = Session::new(store, config.report.default_category.as_deref())?;
    let renderer = Renderer::new(&config.report);

    match cli.command {
        Commands::Overview(args) => {
            let limit = args.limit.unwrap_or(config.report.overview_rows);
            handle_overview(&session, &renderer, format, limit)
        }
        Commands::Report(args) => handle_report(&mut session, &renderer, format, args),
        Commands::Interactive => {
            let stdin = std::io::stdin();
            interactive::run(&mut session, &renderer, stdin.lock(), std::io::stdout())
        }
    }
}

/// Installs the global subscriber. `RUST_LOG` wins over `logging.level`.
///
/// The returned guard must live until exit so buffered file logs are flushed.
fn init_tracing(settings: &LoggingSettings) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .with_context(|| format!("Invalid logging.level '{}'", settings.level))?;

    match &settings.file {
        Some(path) => {
            let directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("logging.file '{}' does not name a file", path.display()))?;
            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(directory, file_name));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(writer)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init()
                .map_err(|e| anyhow::anyhow!(e.to_string()))?;
            Ok(None)
        }
    }
}

// ==============================================================================
// Command Handlers
// ==============================================================================

fn handle_overview(session: &Session, renderer: &Renderer, format: OutputFormat, limit: usize) -> Result<()> {
    let overview = session.overview()?;
    match format {
        OutputFormat::Table => println!("{}", renderer.overview(session.store().records(), &overview, limit)),
        OutputFormat::Json => print_json(&overview)?,
    }
    Ok(())
}

fn handle_report(session: &mut Session, renderer: &Renderer, format: OutputFormat, args: ReportArgs) -> Result<()> {
    let view = report_view(session, args)?;
    tracing::debug!(?format, phase = ?session.phase(), "Rendering selection.");

    match format {
        OutputFormat::Table => println!("{}", renderer.selection_view(&view)),
        OutputFormat::Json => print_json(&view)?,
    }
    Ok(())
}

/// Runs one interaction cycle: pick the category, then the sub-categories.
fn report_view(session: &mut Session, args: ReportArgs) -> Result<SelectionView> {
    if let Some(category) = args.category {
        session.handle(SessionEvent::CategoryChanged(category))?;
    }
    Ok(session.handle(SessionEvent::SubCategoriesChanged(args.sub_categories))?)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
