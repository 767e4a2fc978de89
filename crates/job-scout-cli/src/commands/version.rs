use anyhow::Result;
use console::style;

pub fn execute() -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        "{} - version {}",
        style("Job Scout").bold().green(),
        style(version).bold()
    );
    Ok(())
}
