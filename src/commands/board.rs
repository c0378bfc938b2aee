use super::FilterArgs;
use crate::{
    api::TasksApi,
    libs::{
        audio::AudioClip,
        board::Board,
        cache::InvalidateScope,
        filter::{DueWindow, Status, TaskFilter},
        messages::Message,
        task::{parse_due_date, Priority, TaskRef},
        view::View,
    },
    msg_error, msg_info, msg_print, msg_warning,
};
use anyhow::Result;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use std::path::PathBuf;

#[derive(Debug, Clone, Copy)]
enum Action {
    Refresh,
    Filter,
    Add,
    AddAudio,
    Complete,
    Ask,
    Quit,
}

const ACTIONS: [Action; 7] = [
    Action::Refresh,
    Action::Filter,
    Action::Add,
    Action::AddAudio,
    Action::Complete,
    Action::Ask,
    Action::Quit,
];

impl Action {
    fn label(&self) -> Message {
        match self {
            Action::Refresh => Message::BoardActionRefresh,
            Action::Filter => Message::BoardActionFilter,
            Action::Add => Message::BoardActionAdd,
            Action::AddAudio => Message::BoardActionAddAudio,
            Action::Complete => Message::BoardActionComplete,
            Action::Ask => Message::BoardActionAsk,
            Action::Quit => Message::BoardActionQuit,
        }
    }
}

#[derive(Debug, Args)]
pub struct BoardArgs {
    #[command(flatten)]
    filter: FilterArgs,
    /// Start on every task instead of the open ones
    #[arg(long, conflicts_with = "status")]
    all: bool,
}

impl BoardArgs {
    /// The board opens on open tasks unless a status is given or `--all` is set.
    pub fn to_filter(&self) -> TaskFilter {
        let filter = self.filter.to_filter();
        if self.all || filter.status().is_some() {
            return filter;
        }
        filter.with_status(Some(Status::Todo))
    }
}

/// Interactive session. Failures of individual actions are reported and the
/// board keeps running; only terminal I/O errors end it.
pub async fn cmd(args: BoardArgs, api_url: Option<&str>) -> Result<()> {
    let mut board = super::open_board(api_url, args.to_filter())?;
    let labels: Vec<String> = ACTIONS.iter().map(|action| action.label().to_string()).collect();

    loop {
        if board.needs_render() {
            render(&mut board).await;
        }

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptAction.to_string())
            .items(&labels)
            .default(0)
            .interact()?;

        match ACTIONS[selection] {
            Action::Refresh => board.cache().invalidate(InvalidateScope::Filter(board.filter().clone())),
            Action::Filter => {
                let filter = prompt_filter(board.filter())?;
                board.set_filter(filter);
            }
            Action::Add => add(&mut board).await?,
            Action::AddAudio => add_audio(&board).await?,
            Action::Complete => complete(&board).await?,
            Action::Ask => ask(&board).await?,
            Action::Quit => break,
        }
    }

    msg_print!(Message::BoardClosed);
    Ok(())
}

async fn render(board: &mut Board<TasksApi>) {
    msg_print!(Message::BoardTitle(board.filter().to_string()), true);
    let result = board.tasks().await;
    match result {
        Ok(tasks) => super::list::render(board.filter(), &tasks),
        Err(err) => {
            msg_error!(Message::TaskListFailed(err.to_string()));
            if let Some(tasks) = board.cache().peek(board.filter()).and_then(|entry| entry.tasks) {
                msg_warning!(Message::ShowingLastKnownTasks);
                View::tasks(&tasks);
            }
        }
    }
}

fn prompt_filter(current: &TaskFilter) -> Result<TaskFilter> {
    let theme = ColorfulTheme::default();

    let statuses = [None, Some(Status::Todo), Some(Status::Done)];
    let status_labels: Vec<String> = statuses.iter().map(|s| choice_label(s.map(|s| s.as_str()))).collect();
    let status = Select::with_theme(&theme)
        .with_prompt(Message::PromptStatus.to_string())
        .items(&status_labels)
        .default(statuses.iter().position(|s| *s == current.status()).unwrap_or(0))
        .interact()?;

    let windows = [None, Some(DueWindow::Today), Some(DueWindow::Week), Some(DueWindow::Overdue)];
    let window_labels: Vec<String> = windows.iter().map(|w| choice_label(w.map(|w| w.as_str()))).collect();
    let due = Select::with_theme(&theme)
        .with_prompt(Message::PromptDue.to_string())
        .items(&window_labels)
        .default(windows.iter().position(|w| *w == current.due()).unwrap_or(0))
        .interact()?;

    let q: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptSearch.to_string())
        .with_initial_text(current.query().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;
    let category: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptCategory.to_string())
        .with_initial_text(current.category().unwrap_or_default())
        .allow_empty(true)
        .interact_text()?;

    Ok(TaskFilter::new()
        .with_status(statuses[status])
        .with_due(windows[due])
        .with_query(Some(&q))
        .with_category(Some(&category)))
}

fn choice_label(value: Option<&str>) -> String {
    value.map(str::to_string).unwrap_or_else(|| Message::FilterAny.to_string())
}

/// Fills the draft form and submits it. A rejected draft stays in the form so
/// the next attempt starts from what was typed.
async fn add(board: &mut Board<TasksApi>) -> Result<()> {
    let theme = ColorfulTheme::default();
    let current = board.draft().clone();

    let title: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskTitle.to_string())
        .with_initial_text(current.title)
        .interact_text()?;
    let description: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDescription.to_string())
        .with_initial_text(current.description)
        .allow_empty(true)
        .interact_text()?;
    let category: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskCategory.to_string())
        .with_initial_text(current.category)
        .allow_empty(true)
        .interact_text()?;

    let priorities = [Priority::Low, Priority::Med, Priority::High];
    let priority_labels: Vec<String> = priorities.iter().map(|p| p.to_string()).collect();
    let priority = Select::with_theme(&theme)
        .with_prompt(Message::PromptTaskPriority.to_string())
        .items(&priority_labels)
        .default(priorities.iter().position(|p| *p == current.priority).unwrap_or(1))
        .interact()?;

    let due: String = Input::with_theme(&theme)
        .with_prompt(Message::PromptTaskDue.to_string())
        .with_initial_text(current.due)
        .allow_empty(true)
        .validate_with(|raw: &String| -> Result<(), String> {
            parse_due_date(raw)
                .map(|_| ())
                .map_err(|_| Message::InvalidDate(raw.trim().to_string()).to_string())
        })
        .interact_text()?;

    let form = board.draft_mut();
    form.title = title;
    form.description = description;
    form.category = category;
    form.priority = priorities[priority];
    form.due = due;

    match board.submit_draft().await {
        Ok(task) => super::add::report(&task),
        Err(err) => msg_error!(Message::TaskCreateFailed(err.to_string())),
    }
    Ok(())
}

async fn add_audio(board: &Board<TasksApi>) -> Result<()> {
    let path: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptAudioPath.to_string())
        .interact_text()?;
    let path = PathBuf::from(path.trim());

    let clip = match AudioClip::from_path(&path) {
        Ok(clip) => clip,
        Err(_) => {
            msg_error!(Message::AudioReadFailed(path.display().to_string()));
            return Ok(());
        }
    };
    match board.add_audio(&clip).await {
        Ok(task) => super::add::report(&task),
        Err(err) => msg_error!(Message::TaskCreateFailed(err.to_string())),
    }
    Ok(())
}

async fn complete(board: &Board<TasksApi>) -> Result<()> {
    let open: Vec<_> = board
        .cache()
        .peek(board.filter())
        .and_then(|entry| entry.tasks)
        .map(|tasks| tasks.iter().filter(|task| !task.completed).cloned().collect())
        .unwrap_or_default();
    if open.is_empty() {
        msg_info!(Message::NothingToComplete);
        return Ok(());
    }

    let labels: Vec<String> = open.iter().map(|task| format!("{} ({})", task.title, task.id)).collect();
    let selection = Select::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptSelectTask.to_string())
        .items(&labels)
        .default(0)
        .interact()?;

    let task = TaskRef::by_id(&open[selection].id);
    match board.complete(&task).await {
        Ok(updated) => super::done::report(&task, updated),
        Err(err) => msg_error!(Message::TaskCompleteFailed(err.to_string())),
    }
    Ok(())
}

async fn ask(board: &Board<TasksApi>) -> Result<()> {
    let question: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptQuestion.to_string())
        .interact_text()?;
    match board.ask(&question).await {
        Ok(response) => View::answer(&response),
        Err(err) => msg_error!(Message::AskFailed(err.to_string())),
    }
    Ok(())
}
