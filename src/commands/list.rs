use super::FilterArgs;
use crate::{
    libs::{filter::TaskFilter, messages::Message, task::Task, view::View},
    msg_error_anyhow, msg_info, msg_print,
};
use anyhow::Result;

pub async fn cmd(args: FilterArgs, api_url: Option<&str>) -> Result<()> {
    let mut board = super::open_board(api_url, args.to_filter())?;
    let tasks = board
        .tasks()
        .await
        .map_err(|e| msg_error_anyhow!(Message::TaskListFailed(e.to_string())))?;
    render(board.filter(), &tasks);
    Ok(())
}

pub(crate) fn render(filter: &TaskFilter, tasks: &[Task]) {
    if tasks.is_empty() {
        msg_info!(Message::NoTasksFound(filter.to_string()));
        return;
    }
    msg_print!(Message::TasksHeader(filter.to_string()), true);
    View::tasks(tasks);
}
