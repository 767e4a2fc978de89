use anyhow::{bail, Result};
use chrono::Local;
use cliclack::spinner;
use job_scout::backend::base::AgentBackend;
use job_scout::models::query::Query;
use job_scout::search::{SearchState, Searcher};
use job_scout::sheets::to_tsv;

use crate::prompt::Theme;
use crate::render::{listings_markdown, print_markdown};

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Numbered listing rendered as markdown
    Markdown,
    /// Listings as a JSON array
    Json,
    /// Tab-separated rows in the spreadsheet's column order
    Tsv,
}

/// Runs a single search and prints the outcome. Fails when the search
/// ends in an error so the process exits non-zero.
pub async fn execute<B: AgentBackend>(
    searcher: &Searcher<B>,
    query: Query,
    format: OutputFormat,
    theme: Theme,
) -> Result<()> {
    let mut state = SearchState::default();

    let mut spin = spinner();
    spin.start(format!("Searching for '{}' in '{}'", query.role, query.location));
    searcher.search_into(&query, &mut state).await;
    spin.stop("");

    if let Some(error) = state.error {
        bail!(error);
    }

    match format {
        OutputFormat::Markdown => print_markdown(&listings_markdown(&state.results), theme),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&state.results)?),
        OutputFormat::Tsv => println!("{}", to_tsv(&state.results, Local::now().naive_local())),
    }
    Ok(())
}
