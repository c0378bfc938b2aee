use super::ask::AskResponse;
use super::messages::Message;
use super::task::Task;
use crate::msg_print;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        Self::task_table(tasks).printstd();
    }

    pub fn task_table(tasks: &[Task]) -> Table {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "PRIORITY", "DUE", "CATEGORY", "STATUS"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.priority,
                task.due_date.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default(),
                task.category.as_deref().unwrap_or(""),
                Self::status(task)
            ]);
        }
        table
    }

    pub fn answer(response: &AskResponse) {
        for line in Self::answer_lines(response) {
            msg_print!(line);
        }
    }

    /// Answer text, followed by the related tasks only when there are any.
    pub fn answer_lines(response: &AskResponse) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            Message::AnswerHeader.to_string(),
            response.answer.clone(),
        ];

        let related = response.related_tasks();
        if related.is_empty() {
            return lines;
        }
        lines.push(String::new());
        lines.push(Message::RelatedTasksHeader.to_string());
        lines.extend(related.iter().map(|task| format!("  • {}", task.title)));
        lines
    }

    fn status(task: &Task) -> String {
        match task.completed_at {
            Some(at) if task.completed => format!("done {}", at.format("%Y-%m-%d")),
            _ if task.completed => "done".to_string(),
            _ => "todo".to_string(),
        }
    }
}
