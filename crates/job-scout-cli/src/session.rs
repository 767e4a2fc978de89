use anyhow::Result;
use job_scout::backend::base::AgentBackend;
use job_scout::search::{SearchState, Searcher};

use crate::prompt::{InputType, Prompt};

/// Interactive search loop: read a query, run it, show the outcome.
pub struct Session<'a, B: AgentBackend> {
    searcher: Searcher<B>,
    prompt: Box<dyn Prompt + 'a>,
    state: SearchState,
}

impl<'a, B: AgentBackend> Session<'a, B> {
    pub fn new(searcher: Searcher<B>, prompt: Box<impl Prompt + 'a>) -> Self {
        Session {
            searcher,
            prompt,
            state: SearchState::default(),
        }
    }

    pub async fn start(&mut self) -> Result<()> {
        self.prompt.ready();

        loop {
            let input = self.prompt.get_input()?;
            let query = match input.input_type {
                InputType::Search => match input.query {
                    Some(query) => query,
                    None => continue,
                },
                InputType::AskAgain => continue,
                InputType::Exit => break,
            };

            self.prompt.show_busy();
            self.searcher.search_into(&query, &mut self.state).await;
            self.prompt.hide_busy();
            self.prompt.render(&self.state);
        }

        self.prompt.close();
        Ok(())
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }
}
