use anyhow::Result;
use job_scout::backend::base::AgentBackend;
use job_scout::search::Searcher;

use crate::prompt::cliclack::CliclackPrompt;
use crate::prompt::Theme;
use crate::session::Session;

pub async fn execute<B: AgentBackend>(searcher: Searcher<B>, theme: Theme) -> Result<()> {
    let prompt = Box::new(CliclackPrompt::new(theme));
    let mut session = Session::new(searcher, prompt);
    session.start().await
}
