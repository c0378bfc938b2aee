//! Display implementation for taskdesk messages.
//!
//! All message wording is defined here, in one match, so commands only ever
//! refer to [`Message`] variants.

use super::types::Message;
use std::fmt::{Display, Formatter, Result};

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let text = match self {
            // Tasks
            Message::TaskCreated { title, id } => format!("Task '{}' created (id {})", title, id),
            Message::TasksCompleted(count) => match count {
                1 => "1 task completed".to_string(),
                n => format!("{} tasks completed", n),
            },
            Message::NoTaskMatched(task) => format!("No task matched {}", task),
            Message::TasksHeader(filter) => format!("Tasks ({})", filter),
            Message::NoTasksFound(filter) => format!("No tasks found for {}", filter),
            Message::RelatedTasksHeader => "Related tasks:".to_string(),
            Message::AnswerHeader => "Answer:".to_string(),
            Message::ShowingLastKnownTasks => "Showing the last tasks received from the server".to_string(),
            Message::NothingToComplete => "There are no tasks to complete in this view".to_string(),

            // Failures
            Message::TaskListFailed(err) => format!("Failed to load tasks: {}", err),
            Message::TaskCreateFailed(err) => format!("Failed to create task: {}", err),
            Message::TaskCompleteFailed(err) => format!("Failed to complete task: {}", err),
            Message::AskFailed(err) => format!("Failed to get an answer: {}", err),
            Message::AudioReadFailed(path) => format!("Failed to read audio file: {}", path),
            Message::InvalidDate(value) => format!("Invalid date '{}', expected YYYY-MM-DD", value),

            // Configuration
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigModuleServer => "Task backend settings".to_string(),
            Message::UsingBackend(url) => format!("Using task backend at {}", url),

            // Board
            Message::BoardTitle(filter) => format!("Task board: {}", filter),
            Message::BoardActionRefresh => "Refresh".to_string(),
            Message::BoardActionFilter => "Change filters".to_string(),
            Message::BoardActionAdd => "Add task".to_string(),
            Message::BoardActionAddAudio => "Add task from voice note".to_string(),
            Message::BoardActionComplete => "Complete task".to_string(),
            Message::BoardActionAsk => "Ask a question".to_string(),
            Message::BoardActionQuit => "Quit".to_string(),
            Message::BoardClosed => "Bye".to_string(),

            // Prompts
            Message::PromptApiUrl => "Enter the task backend URL".to_string(),
            Message::PromptTimeout => "Enter the request timeout in seconds".to_string(),
            Message::PromptAction => "What next?".to_string(),
            Message::PromptTaskTitle => "Task title".to_string(),
            Message::PromptTaskDescription => "Description (optional)".to_string(),
            Message::PromptTaskCategory => "Category (optional)".to_string(),
            Message::PromptTaskPriority => "Priority".to_string(),
            Message::PromptTaskDue => "Due date YYYY-MM-DD (optional)".to_string(),
            Message::PromptAudioPath => "Path to the voice note".to_string(),
            Message::PromptQuestion => "Ask about your tasks".to_string(),
            Message::PromptStatus => "Status".to_string(),
            Message::PromptDue => "Due".to_string(),
            Message::PromptSearch => "Search (optional)".to_string(),
            Message::PromptCategory => "Category filter (optional)".to_string(),
            Message::PromptSelectTask => "Select the task to complete".to_string(),

            Message::FilterAny => "Any".to_string(),
        };
        write!(f, "{}", text)
    }
}
