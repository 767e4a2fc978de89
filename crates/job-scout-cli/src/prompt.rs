use anyhow::Result;
use job_scout::models::query::Query;
use job_scout::search::SearchState;

pub mod cliclack;

pub trait Prompt {
    fn render(&mut self, state: &SearchState);
    fn get_input(&mut self) -> Result<Input>;
    fn show_busy(&mut self);
    fn hide_busy(&mut self);
    fn close(&self);
    fn ready(&self) {
        println!("\n");
        println!("Job Scout is ready. Enter a role to search for, or /? for help.");
        println!("\n");
    }
}

pub struct Input {
    pub input_type: InputType,
    pub query: Option<Query>, // Only set for searches
}

pub enum InputType {
    AskAgain, // Ask the user for input again. Control flow command.
    Search,   // User submitted a query
    Exit,     // User wants to exit the session
}

impl Input {
    pub fn search(query: Query) -> Self {
        Input {
            input_type: InputType::Search,
            query: Some(query),
        }
    }

    pub fn control(input_type: InputType) -> Self {
        Input {
            input_type,
            query: None,
        }
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn bat_theme(&self) -> &'static str {
        match self {
            Theme::Light => "GitHub",
            Theme::Dark => "zenburn",
        }
    }

    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}
