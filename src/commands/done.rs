use crate::{
    libs::{messages::Message, task::TaskRef},
    msg_error_anyhow, msg_success, msg_warning,
};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub struct DoneArgs {
    /// Task id
    #[arg(required_unless_present = "title")]
    id: Option<String>,
    /// Complete by exact title instead of id
    #[arg(long, conflicts_with = "id")]
    title: Option<String>,
}

impl DoneArgs {
    fn task_ref(&self) -> TaskRef {
        match (&self.id, &self.title) {
            (Some(id), _) => TaskRef::by_id(id),
            (None, Some(title)) => TaskRef::by_title(title),
            (None, None) => TaskRef::default(),
        }
    }
}

pub async fn cmd(args: DoneArgs, api_url: Option<&str>) -> Result<()> {
    let board = super::open_board(api_url, Default::default())?;
    let task = args.task_ref();
    let updated = board
        .complete(&task)
        .await
        .map_err(|e| msg_error_anyhow!(Message::TaskCompleteFailed(e.to_string())))?;
    report(&task, updated);
    Ok(())
}

pub(crate) fn report(task: &TaskRef, updated: u64) {
    if updated == 0 {
        msg_warning!(Message::NoTaskMatched(task.to_string()));
    } else {
        msg_success!(Message::TasksCompleted(updated));
    }
}
