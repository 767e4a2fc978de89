use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use job_scout::backend::http::HttpAgentBackend;
use job_scout::config::{BackendSettings, Settings};
use job_scout::models::query::{parse_max_pages, Query, DEFAULT_LOCATION};
use job_scout::search::Searcher;

mod commands {
    pub mod search;
    pub mod session;
    pub mod sheets;
    pub mod version;
}
mod prompt;
mod render;
mod session;

use commands::search::OutputFormat;
use prompt::Theme;

#[derive(Parser)]
#[command(author, about, long_about = None)]
struct Cli {
    /// Agent backend base URL (can also be set via JOB_SCOUT_BACKEND__BASE_URL)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Application name registered with the backend
    #[arg(long, global = true)]
    app_name: Option<String>,

    /// User id sessions are created for
    #[arg(long, global = true)]
    user_id: Option<String>,

    /// Color theme for rendered results
    #[arg(long, global = true, value_enum, default_value = "dark")]
    theme: Theme,

    #[arg(short = 'v', long = "version")]
    version: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run one job search and print the results
    Search {
        /// Job role to search for
        role: String,

        /// Where to search
        #[arg(short, long, default_value = DEFAULT_LOCATION)]
        location: String,

        /// Number of result pages to scrape (anything but a positive number means 1)
        #[arg(short, long, default_value = "1")]
        pages: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "markdown")]
        format: OutputFormat,
    },

    /// Search interactively until /exit (default)
    Session,

    /// Show the spreadsheet layout and check its environment setup
    Sheets,

    /// Print the version
    Version,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_logging();

    let cli = Cli::parse();

    if cli.version {
        return commands::version::execute();
    }

    match cli.command {
        Some(Command::Version) => commands::version::execute(),
        Some(Command::Sheets) => commands::sheets::execute(),
        Some(Command::Search {
            ref role,
            ref location,
            ref pages,
            format,
        }) => {
            let query = Query::new(role.trim(), location.trim(), parse_max_pages(pages));
            let searcher = build_searcher(&cli)?;
            commands::search::execute(&searcher, query, format, cli.theme).await
        }
        Some(Command::Session) | None => {
            let searcher = build_searcher(&cli)?;
            commands::session::execute(searcher, cli.theme).await
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn backend_settings(cli: &Cli) -> Result<BackendSettings> {
    let mut settings = Settings::new()
        .context("Failed to load configuration")?
        .backend;

    if let Some(base_url) = &cli.base_url {
        settings.base_url = base_url.clone();
    }
    if let Some(app_name) = &cli.app_name {
        settings.app_name = app_name.clone();
    }
    if let Some(user_id) = &cli.user_id {
        settings.user_id = user_id.clone();
    }
    Ok(settings)
}

fn build_searcher(cli: &Cli) -> Result<Searcher<HttpAgentBackend>> {
    let settings = backend_settings(cli)?;
    tracing::debug!("Using agent backend at {}", settings.base_url);
    let backend = HttpAgentBackend::new(&settings)?;
    Ok(Searcher::new(backend, settings))
}
