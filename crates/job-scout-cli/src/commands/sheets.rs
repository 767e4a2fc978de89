use anyhow::{Context, Result};
use console::style;
use job_scout::sheets::{SheetSettings, SHEET_HEADER};

/// Prints the spreadsheet layout the backend writes to and whether the
/// environment is set up for it.
pub fn execute() -> Result<()> {
    let settings = SheetSettings::from_env();
    let cwd = std::env::current_dir().context("Could not determine working directory")?;

    println!("{}", style("Spreadsheet integration").bold());
    println!("Header row:  {}", SHEET_HEADER.join(" | "));
    println!(
        "Spreadsheet: {}",
        settings.spreadsheet_id.as_deref().unwrap_or("(not set)")
    );
    println!(
        "Credentials: {}",
        settings
            .credentials_path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(not set)".to_string())
    );
    println!("Append to:   {}", settings.append_range());

    let problems = settings.check(&cwd);
    if problems.is_empty() {
        println!("{}", style("Configuration looks complete.").green());
    } else {
        for problem in &problems {
            println!("{} {}", style("Problem:").red().bold(), problem);
        }
        println!("See docs/SHEETS_SETUP.md for the one-time setup.");
    }
    Ok(())
}
