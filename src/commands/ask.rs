use crate::{
    libs::{messages::Message, view::View},
    msg_error_anyhow,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct AskArgs {
    /// The question, e.g. "what is due this week?"
    #[arg(required = true, num_args = 1..)]
    question: Vec<String>,
}

pub async fn cmd(args: AskArgs, api_url: Option<&str>) -> Result<()> {
    let board = super::open_board(api_url, Default::default())?;
    let response = board
        .ask(&args.question.join(" "))
        .await
        .map_err(|e| msg_error_anyhow!(Message::AskFailed(e.to_string())))?;
    View::answer(&response);
    Ok(())
}
