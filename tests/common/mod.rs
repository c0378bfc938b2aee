#![allow(dead_code)]

use chrono::{Duration, Utc};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use taskdesk::api::{ApiError, ApiResult, TaskService};
use taskdesk::libs::ask::AskResponse;
use taskdesk::libs::audio::AudioClip;
use taskdesk::libs::filter::{DueWindow, Status, TaskFilter};
use taskdesk::libs::task::{Priority, Task, TaskDraft, TaskRef};
use tokio::sync::Notify;

pub fn task(id: &str, title: &str, completed: bool) -> Task {
    let now = Utc::now();
    Task {
        id: id.to_string(),
        title: title.to_string(),
        description: None,
        category: None,
        priority: Priority::Med,
        due_date: None,
        completed,
        completed_at: completed.then_some(now),
        created_at: now,
        updated_at: now,
    }
}

/// In-memory stand-in for the task backend.
///
/// Every call suspends once before answering, so concurrent callers really
/// overlap. List responses are a snapshot taken when the request arrives.
pub struct FakeTaskService {
    tasks: RefCell<Vec<Task>>,
    next_id: Cell<u32>,
    pub list_calls: Cell<usize>,
    pub create_calls: Cell<usize>,
    pub audio_calls: Cell<usize>,
    pub complete_calls: Cell<usize>,
    pub ask_calls: Cell<usize>,
    fail_next: RefCell<Option<ApiError>>,
    held_list: RefCell<Option<Rc<Notify>>>,
    answer: RefCell<AskResponse>,
}

impl FakeTaskService {
    pub fn new() -> Self {
        Self {
            tasks: RefCell::new(Vec::new()),
            next_id: Cell::new(1),
            list_calls: Cell::new(0),
            create_calls: Cell::new(0),
            audio_calls: Cell::new(0),
            complete_calls: Cell::new(0),
            ask_calls: Cell::new(0),
            fail_next: RefCell::new(None),
            held_list: RefCell::new(None),
            answer: RefCell::new(AskResponse {
                answer: "You have no tasks.".into(),
                tasks: None,
            }),
        }
    }

    /// Seeds the store with `(title, completed)` pairs, ids `T1`, `T2`, ...
    pub fn with_tasks(seed: &[(&str, bool)]) -> Self {
        let service = Self::new();
        for (title, completed) in seed {
            let id = service.next_id();
            service.tasks.borrow_mut().push(task(&id, title, *completed));
        }
        service
    }

    /// A change made on the server by someone else.
    pub fn insert(&self, title: &str) -> Task {
        let created = task(&self.next_id(), title, false);
        self.tasks.borrow_mut().push(created.clone());
        created
    }

    pub fn fail_next(&self, err: ApiError) {
        *self.fail_next.borrow_mut() = Some(err);
    }

    /// Makes the next list request wait until the returned gate is notified.
    pub fn hold_next_list(&self) -> Rc<Notify> {
        let gate = Rc::new(Notify::new());
        *self.held_list.borrow_mut() = Some(Rc::clone(&gate));
        gate
    }

    pub fn set_answer(&self, answer: AskResponse) {
        *self.answer.borrow_mut() = answer;
    }

    fn next_id(&self) -> String {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        format!("T{}", id)
    }

    fn take_failure(&self) -> Option<ApiError> {
        self.fail_next.borrow_mut().take()
    }

    fn bump(counter: &Cell<usize>) {
        counter.set(counter.get() + 1);
    }
}

fn matches(filter: &TaskFilter, task: &Task) -> bool {
    let today = Utc::now().date_naive();
    let status_ok = match filter.status() {
        Some(Status::Todo) => !task.completed,
        Some(Status::Done) => task.completed,
        None => true,
    };
    let due_ok = match (filter.due(), task.due_date) {
        (None, _) => true,
        (Some(_), None) => false,
        (Some(DueWindow::Today), Some(due)) => due == today,
        (Some(DueWindow::Week), Some(due)) => due >= today && due <= today + Duration::days(7),
        (Some(DueWindow::Overdue), Some(due)) => due < today && !task.completed,
    };
    let q_ok = filter.query().map_or(true, |q| {
        let q = q.to_lowercase();
        task.title.to_lowercase().contains(&q)
            || task.description.as_deref().unwrap_or_default().to_lowercase().contains(&q)
    });
    let category_ok = filter.category().map_or(true, |c| task.category.as_deref() == Some(c));
    status_ok && due_ok && q_ok && category_ok
}

impl TaskService for FakeTaskService {
    async fn list_tasks(&self, filter: &TaskFilter) -> ApiResult<Vec<Task>> {
        Self::bump(&self.list_calls);
        let failure = self.take_failure();
        let snapshot: Vec<Task> = self.tasks.borrow().iter().filter(|t| matches(filter, t)).cloned().collect();

        let gate = self.held_list.borrow_mut().take();
        match gate {
            Some(gate) => gate.notified().await,
            None => tokio::task::yield_now().await,
        }

        match failure {
            Some(err) => Err(err),
            None => Ok(snapshot),
        }
    }

    async fn create_task(&self, draft: &TaskDraft) -> ApiResult<Task> {
        Self::bump(&self.create_calls);
        tokio::task::yield_now().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let mut created = task(&self.next_id(), &draft.title, false);
        created.description = draft.description.clone();
        created.category = draft.category.clone();
        created.priority = draft.priority.unwrap_or_default();
        created.due_date = draft.due_date;
        self.tasks.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn create_task_from_audio(&self, clip: &AudioClip) -> ApiResult<Task> {
        Self::bump(&self.audio_calls);
        tokio::task::yield_now().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.insert(&format!("Voice note ({} bytes)", clip.bytes.len())))
    }

    async fn complete_task(&self, target: &TaskRef) -> ApiResult<u64> {
        Self::bump(&self.complete_calls);
        tokio::task::yield_now().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        let now = Utc::now();
        let mut updated = 0;
        for task in self.tasks.borrow_mut().iter_mut().filter(|t| !t.completed) {
            let hit = match (&target.id, &target.title) {
                (Some(id), _) => &task.id == id,
                (None, Some(title)) => &task.title == title,
                (None, None) => false,
            };
            if hit {
                task.completed = true;
                task.completed_at = Some(now);
                task.updated_at = now;
                updated += 1;
            }
        }
        Ok(updated)
    }

    async fn ask(&self, _question: &str) -> ApiResult<AskResponse> {
        Self::bump(&self.ask_calls);
        tokio::task::yield_now().await;
        if let Some(err) = self.take_failure() {
            return Err(err);
        }
        Ok(self.answer.borrow().clone())
    }
}
