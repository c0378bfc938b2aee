use crate::api::{ApiError, ApiResult};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use clap::ValueEnum;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq, Hash, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Med,
    High,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Priority::Low => "low",
            Priority::Med => "med",
            Priority::High => "high",
        })
    }
}

/// A task as the server represents it.
///
/// Tasks are never edited locally; a changed task arrives with the next
/// fetch after a mutation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, deserialize_with = "wire::optional_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "wire::optional_timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(deserialize_with = "wire::timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "wire::timestamp")]
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// `completed` and `completed_at` agree, as the server guarantees.
    pub fn is_consistent(&self) -> bool {
        self.completed == self.completed_at.is_some()
    }
}

/// Body of a structured `POST /add_task`.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

impl TaskDraft {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            ..Self::default()
        }
    }

    pub fn with_description(self, description: Option<&str>) -> Self {
        Self {
            description: trimmed(description),
            ..self
        }
    }

    pub fn with_category(self, category: Option<&str>) -> Self {
        Self {
            category: trimmed(category),
            ..self
        }
    }

    pub fn with_priority(self, priority: Option<Priority>) -> Self {
        Self { priority, ..self }
    }

    pub fn with_due_date(self, due_date: Option<NaiveDate>) -> Self {
        Self { due_date, ..self }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.title.trim().is_empty() {
            return Err(ApiError::validation("task title must not be empty"));
        }
        Ok(())
    }
}

/// Editable state of the "add task" form.
///
/// Text fields hold whatever the user typed; [`DraftForm::to_draft`] trims
/// them and drops the empty ones.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DraftForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: Priority,
    /// Due date as typed, `YYYY-MM-DD` or empty.
    pub due: String,
}

impl DraftForm {
    /// Fails with `Validation` when the due date does not parse; a form with
    /// a rejected date is never turned into a request.
    pub fn to_draft(&self) -> ApiResult<TaskDraft> {
        Ok(TaskDraft::new(&self.title)
            .with_description(Some(&self.description))
            .with_category(Some(&self.category))
            .with_priority(Some(self.priority))
            .with_due_date(parse_due_date(&self.due)?))
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Body of `POST /complete`: the server resolves whichever field is present.
#[derive(Serialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct TaskRef {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl TaskRef {
    pub fn by_id(id: &str) -> Self {
        Self {
            id: trimmed(Some(id)),
            title: None,
        }
    }

    pub fn by_title(title: &str) -> Self {
        Self {
            id: None,
            title: trimmed(Some(title)),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        if self.id.is_none() && self.title.is_none() {
            return Err(ApiError::validation("either a task id or a title is required"));
        }
        Ok(())
    }
}

impl fmt::Display for TaskRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.id, &self.title) {
            (Some(id), _) => write!(f, "#{}", id),
            (None, Some(title)) => write!(f, "\"{}\"", title),
            (None, None) => f.write_str("<none>"),
        }
    }
}

/// Parses a typed due date. Empty input means no due date.
pub fn parse_due_date(raw: &str) -> ApiResult<Option<NaiveDate>> {
    match raw.trim() {
        "" => Ok(None),
        day => NaiveDate::parse_from_str(day, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| ApiError::validation(format!("invalid due date '{}', expected YYYY-MM-DD", day))),
    }
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Lenient decoding of the backend's date and time fields.
///
/// Timestamps may come with or without an offset; offset-less ones are UTC.
/// Due dates may come as a plain date or as a full datetime.
mod wire {
    use super::*;

    pub(super) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
            .map(|naive| naive.and_utc())
    }

    pub(super) fn parse_date(raw: &str) -> Option<NaiveDate> {
        raw.get(..10).and_then(|day| NaiveDate::parse_from_str(day, "%Y-%m-%d").ok())
    }

    pub fn timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw).ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw)))
    }

    pub fn optional_timestamp<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid timestamp: {}", raw))),
            None => Ok(None),
        }
    }

    pub fn optional_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => parse_date(&raw)
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid date: {}", raw))),
            None => Ok(None),
        }
    }
}
