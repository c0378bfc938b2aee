use super::{ApiError, ApiResult, TaskService};
use crate::libs::ask::AskResponse;
use crate::libs::audio::AudioClip;
use crate::libs::config::Config;
use crate::libs::filter::TaskFilter;
use crate::libs::task::{Task, TaskDraft, TaskRef};
use reqwest::{multipart, Client, Response, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

const LIST_URL: &str = "list_tasks";
const ADD_URL: &str = "add_task";
const COMPLETE_URL: &str = "complete";
const ASK_URL: &str = "ask";
const AUDIO_FIELD: &str = "audio";

#[derive(Deserialize, Debug)]
struct TaskListResponse {
    tasks: Vec<Task>,
}

#[derive(Deserialize, Debug)]
struct TaskResponse {
    task: Task,
}

#[derive(Deserialize, Debug)]
struct CompleteResponse {
    updated: u64,
}

#[derive(Serialize, Debug)]
struct AskRequest<'a> {
    question: &'a str,
}

/// HTTP client for the task backend.
#[derive(Debug, Clone)]
pub struct TasksApi {
    client: Client,
    api_url: String,
}

impl TasksApi {
    pub fn new(config: &Config) -> ApiResult<Self> {
        let api_url = config.api_url.trim().trim_end_matches('/').to_string();
        Url::parse(&api_url).map_err(|e| ApiError::validation(format!("invalid API URL '{}': {}", api_url, e)))?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self { client, api_url })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_url, path)
    }

    /// Turns a response into `T`, or into an error carrying the status and body.
    async fn decode<T: DeserializeOwned>(res: Response) -> ApiResult<T> {
        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), %body, "request rejected");
            return Err(ApiError::Server {
                status: status.as_u16(),
                body,
            });
        }
        let body = res.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::InvalidResponse(e.to_string()))
    }
}

impl TaskService for TasksApi {
    async fn list_tasks(&self, filter: &TaskFilter) -> ApiResult<Vec<Task>> {
        let res = self.client.get(self.url(LIST_URL)).query(&filter.query_pairs()).send().await?;
        let list: TaskListResponse = Self::decode(res).await?;
        Ok(list.tasks)
    }

    async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task> {
        draft.validate()?;
        let res = self.client.post(self.url(ADD_URL)).json(draft).send().await?;
        let created: TaskResponse = Self::decode(res).await?;
        Ok(created.task)
    }

    async fn create_task_from_audio(&self, clip: &AudioClip) -> ApiResult<Task> {
        clip.validate()?;
        let part = multipart::Part::bytes(clip.bytes.clone())
            .file_name(clip.file_name.clone())
            .mime_str(&clip.mime)
            .map_err(|e| ApiError::validation(format!("invalid audio type '{}': {}", clip.mime, e)))?;
        let form = multipart::Form::new().part(AUDIO_FIELD, part);

        let res = self.client.post(self.url(ADD_URL)).multipart(form).send().await?;
        let created: TaskResponse = Self::decode(res).await?;
        Ok(created.task)
    }

    async fn complete_task(&self, task: &TaskRef) -> ApiResult<u64> {
        task.validate()?;
        let res = self.client.post(self.url(COMPLETE_URL)).json(task).send().await?;
        let completed: CompleteResponse = Self::decode(res).await?;
        Ok(completed.updated)
    }

    async fn ask(&self, question: &str) -> ApiResult<AskResponse> {
        if question.trim().is_empty() {
            return Err(ApiError::validation("question must not be empty"));
        }
        let res = self.client.post(self.url(ASK_URL)).json(&AskRequest { question }).send().await?;
        Self::decode(res).await
    }
}
