//! One-shot questions about the task data.
//!
//! Every call is an independent round trip: nothing is remembered between
//! questions and nothing touches the task cache. Two questions in flight at
//! once simply both complete.

use crate::api::{ApiError, ApiResult, TaskService};
use crate::libs::task::Task;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct AskResponse {
    pub answer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
}

impl AskResponse {
    /// Tasks the answer refers to; empty when the server sent none.
    pub fn related_tasks(&self) -> &[Task] {
        self.tasks.as_deref().unwrap_or(&[])
    }
}

pub struct Ask<S> {
    service: Rc<S>,
}

impl<S: TaskService> Ask<S> {
    pub fn new(service: Rc<S>) -> Self {
        Self { service }
    }

    pub async fn ask(&self, question: &str) -> ApiResult<AskResponse> {
        let question = question.trim();
        if question.is_empty() {
            return Err(ApiError::validation("question must not be empty"));
        }
        tracing::debug!(question, "asking");
        self.service.ask(question).await
    }
}
