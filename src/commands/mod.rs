pub mod add;
pub mod ask;
pub mod board;
pub mod done;
pub mod init;
pub mod list;

use crate::api::TasksApi;
use crate::libs::board::Board;
use crate::libs::config::Config;
use crate::libs::filter::{DueWindow, Status, TaskFilter};
use crate::libs::messages::Message;
use crate::msg_debug;
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::rc::Rc;

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure the task backend")]
    Init,
    #[command(about = "List tasks")]
    List(FilterArgs),
    #[command(about = "Create a task", arg_required_else_help = true)]
    Add(add::AddArgs),
    #[command(about = "Mark a task as completed", arg_required_else_help = true)]
    Done(done::DoneArgs),
    #[command(about = "Ask a question about your tasks", arg_required_else_help = true)]
    Ask(ask::AskArgs),
    #[command(about = "Open the interactive task board")]
    Board(board::BoardArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    /// Task backend URL for this run
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// View selection shared by `list` and `board`.
#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Only tasks in this state
    #[arg(long, value_enum)]
    status: Option<Status>,
    /// Only tasks due in this window
    #[arg(long, value_enum)]
    due: Option<DueWindow>,
    /// Free-text search
    #[arg(long)]
    q: Option<String>,
    /// Only tasks in this category
    #[arg(long)]
    category: Option<String>,
}

impl FilterArgs {
    pub fn to_filter(&self) -> TaskFilter {
        TaskFilter::new()
            .with_status(self.status)
            .with_due(self.due)
            .with_query(self.q.as_deref())
            .with_category(self.category.as_deref())
    }
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        let api_url = cli.api_url.as_deref();
        match cli.command {
            Commands::Init => init::cmd(),
            Commands::List(args) => list::cmd(args, api_url).await,
            Commands::Add(args) => add::cmd(args, api_url).await,
            Commands::Done(args) => done::cmd(args, api_url).await,
            Commands::Ask(args) => ask::cmd(args, api_url).await,
            Commands::Board(args) => board::cmd(args, api_url).await,
        }
    }
}

/// Builds the session board against the configured backend.
pub(crate) fn open_board(api_url: Option<&str>, filter: TaskFilter) -> Result<Board<TasksApi>> {
    let config = Config::resolve(api_url)?;
    let api = TasksApi::new(&config)?;
    msg_debug!(Message::UsingBackend(api.api_url().to_string()));
    Ok(Board::new(Rc::new(api), filter))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("taskdesk").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn list_flags_become_filter() {
        let cli = parse(&["list", "--status", "todo", "--due", "week", "--q", " milk "]);
        let Commands::List(args) = cli.command else {
            panic!("expected list");
        };
        let expected = TaskFilter::new()
            .with_status(Some(Status::Todo))
            .with_due(Some(DueWindow::Week))
            .with_query(Some("milk"));
        assert_eq!(args.to_filter().key(), expected.key());
    }

    #[test]
    fn board_opens_on_open_tasks() {
        let Commands::Board(args) = parse(&["board"]).command else {
            panic!("expected board");
        };
        assert_eq!(args.to_filter().status(), Some(Status::Todo));

        let Commands::Board(args) = parse(&["board", "--status", "done", "--q", "milk"]).command else {
            panic!("expected board");
        };
        assert_eq!(args.to_filter().status(), Some(Status::Done));
        assert_eq!(args.to_filter().query(), Some("milk"));

        let Commands::Board(args) = parse(&["board", "--all", "--category", "home"]).command else {
            panic!("expected board");
        };
        assert_eq!(args.to_filter().status(), None);
        assert_eq!(args.to_filter().category(), Some("home"));

        assert!(Cli::try_parse_from(["taskdesk", "board", "--all", "--status", "todo"]).is_err());
    }

    #[test]
    fn list_defaults_to_all_tasks() {
        let Commands::List(args) = parse(&["list"]).command else {
            panic!("expected list");
        };
        assert!(args.to_filter().is_empty());
    }

    #[test]
    fn api_url_is_global() {
        let cli = parse(&["board", "--api-url", "http://10.0.0.5:8000"]);
        assert_eq!(cli.api_url.as_deref(), Some("http://10.0.0.5:8000"));
        assert!(matches!(cli.command, Commands::Board(_)));
    }

    #[test]
    fn done_needs_id_or_title() {
        assert!(Cli::try_parse_from(["taskdesk", "done"]).is_err());
        assert!(Cli::try_parse_from(["taskdesk", "done", "T1", "--title", "Buy milk"]).is_err());
        assert!(Cli::try_parse_from(["taskdesk", "done", "--title", "Buy milk"]).is_ok());
    }

    #[test]
    fn add_rejects_audio_with_fields() {
        assert!(Cli::try_parse_from(["taskdesk", "add", "--audio", "note.mp3", "--category", "home"]).is_err());
        assert!(Cli::try_parse_from(["taskdesk", "add", "--audio", "note.mp3"]).is_ok());
        assert!(Cli::try_parse_from(["taskdesk", "add", "Buy milk", "--due", "2025-13-01"]).is_err());
    }
}
