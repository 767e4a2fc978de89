use bat::WrappingMode;
use job_scout::models::job::JobListing;

use crate::prompt::Theme;

/// Markdown for a list of job listings. Missing fields show as `N/A`.
pub fn listings_markdown(listings: &[JobListing]) -> String {
    if listings.is_empty() {
        return "No jobs found.\n".to_string();
    }

    let mut out = format!(
        "# Found {} job{}\n",
        listings.len(),
        if listings.len() == 1 { "" } else { "s" }
    );
    for (i, job) in listings.iter().enumerate() {
        out.push_str(&format!(
            "\n## {}. {}\n- **Company:** {}\n- **Location:** {}\n- **URL:** {}\n- **Page:** {}\n",
            i + 1,
            job.title_or_missing(),
            job.company_or_missing(),
            job.location_or_missing(),
            job.url_or_missing(),
            job.page_or_missing(),
        ));
    }
    out
}

pub fn print_markdown(content: &str, theme: Theme) {
    let printed = bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(theme.bat_theme())
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print();

    // bat refuses some terminals; the plain text is still readable.
    if let Err(e) = printed {
        tracing::debug!("Falling back to plain output: {}", e);
        print!("{}", content);
    }
}
