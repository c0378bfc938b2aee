use crate::{
    libs::{
        audio::AudioClip,
        messages::Message,
        task::{Priority, Task, TaskDraft},
    },
    msg_error_anyhow, msg_success,
};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct AddArgs {
    /// Task title
    #[arg(required_unless_present = "audio")]
    title: Option<String>,
    /// Longer description
    #[arg(short, long, conflicts_with = "audio")]
    description: Option<String>,
    /// Category
    #[arg(short, long, conflicts_with = "audio")]
    category: Option<String>,
    /// Priority (defaults to med on the server)
    #[arg(short, long, value_enum, conflicts_with = "audio")]
    priority: Option<Priority>,
    /// Due date, YYYY-MM-DD
    #[arg(long, conflicts_with = "audio")]
    due: Option<NaiveDate>,
    /// Create the task from a recorded voice note instead
    #[arg(long, conflicts_with = "title")]
    audio: Option<PathBuf>,
}

pub async fn cmd(args: AddArgs, api_url: Option<&str>) -> Result<()> {
    let board = super::open_board(api_url, Default::default())?;

    let created = match &args.audio {
        Some(path) => {
            let clip = AudioClip::from_path(path)
                .map_err(|_| msg_error_anyhow!(Message::AudioReadFailed(path.display().to_string())))?;
            board.add_audio(&clip).await
        }
        None => {
            let draft = TaskDraft::new(args.title.as_deref().unwrap_or_default())
                .with_description(args.description.as_deref())
                .with_category(args.category.as_deref())
                .with_priority(args.priority)
                .with_due_date(args.due);
            board.add(&draft).await
        }
    };

    let task = created.map_err(|e| msg_error_anyhow!(Message::TaskCreateFailed(e.to_string())))?;
    report(&task);
    Ok(())
}

pub(crate) fn report(task: &Task) {
    msg_success!(Message::TaskCreated {
        title: task.title.clone(),
        id: task.id.clone(),
    });
}
