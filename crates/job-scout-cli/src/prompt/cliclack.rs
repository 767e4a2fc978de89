use std::io::{self, Write};

use ::cliclack::{input, log, spinner, ProgressBar};
use anyhow::Result;
use console::style;
use job_scout::models::query::{parse_max_pages, Query, DEFAULT_LOCATION};
use job_scout::search::SearchState;

use super::{Input, InputType, Prompt, Theme};
use crate::render::{listings_markdown, print_markdown};

pub struct CliclackPrompt {
    spinner: Option<ProgressBar>,
    theme: Theme,
    last_location: String,
}

impl CliclackPrompt {
    pub fn new(theme: Theme) -> Self {
        CliclackPrompt {
            spinner: None,
            theme,
            last_location: DEFAULT_LOCATION.to_string(),
        }
    }

    fn print_help(&self) {
        println!("Commands:");
        println!("/exit - Exit the session");
        println!("/t - Toggle Light/Dark theme");
        println!("/? - Display this help message");
        println!("Anything else is used as the job role to search for.");
    }
}

impl Prompt for CliclackPrompt {
    fn render(&mut self, state: &SearchState) {
        if let Some(error) = &state.error {
            println!("{} {}", style("Error:").red().bold(), error);
        } else {
            print_markdown(&listings_markdown(&state.results), self.theme);
        }

        println!();
        io::stdout().flush().unwrap_or_else(|e| tracing::debug!("flush failed: {}", e));
    }

    fn get_input(&mut self) -> Result<Input> {
        let role: String = input("Job role:         [Help: /?]")
            .placeholder("Software Engineer")
            .interact()?;
        let role = role.trim().to_string();

        if role.eq_ignore_ascii_case("/exit") || role.eq_ignore_ascii_case("/quit") {
            return Ok(Input::control(InputType::Exit));
        } else if role.eq_ignore_ascii_case("/t") {
            self.theme = self.theme.toggled();
            println!("Switching to {:?} theme", self.theme);
            return Ok(Input::control(InputType::AskAgain));
        } else if role.eq_ignore_ascii_case("/?") {
            self.print_help();
            return Ok(Input::control(InputType::AskAgain));
        } else if role.is_empty() {
            log::warning("Enter a job role to search for.")?;
            return Ok(Input::control(InputType::AskAgain));
        }

        let location: String = input("Location:")
            .default_input(&self.last_location)
            .interact()?;
        let location = location.trim().to_string();
        self.last_location = location.clone();

        let pages: String = input("Pages to scrape:")
            .default_input("1")
            .interact()?;

        Ok(Input::search(Query::new(role, location, parse_max_pages(&pages))))
    }

    fn show_busy(&mut self) {
        let mut spin = spinner();
        spin.start("Searching for jobs...");
        self.spinner = Some(spin);
    }

    fn hide_busy(&mut self) {
        if let Some(spin) = self.spinner.take() {
            spin.stop("Search finished");
        }
    }

    fn close(&self) {
        // No cleanup required
    }
}
