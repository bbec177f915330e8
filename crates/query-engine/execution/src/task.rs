//! The task entity and its validation rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use time::OffsetDateTime;

pub const NAME_MAX_LENGTH: usize = 50;
pub const DESCRIPTION_MAX_LENGTH: usize = 500;
pub const CATEGORY_MAX_LENGTH: usize = 20;

/// Lifecycle status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Pending,
    Started,
    Canceled,
    Finished,
    Deleted,
}

impl TaskStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::Started => "started",
            TaskStatus::Canceled => "canceled",
            TaskStatus::Finished => "finished",
            TaskStatus::Deleted => "deleted",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status {0}")]
pub struct UnknownStatus(pub String);

impl std::str::FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(TaskStatus::Pending),
            "started" => Ok(TaskStatus::Started),
            "canceled" => Ok(TaskStatus::Canceled),
            "finished" => Ok(TaskStatus::Finished),
            "deleted" => Ok(TaskStatus::Deleted),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// An element of the TODO list.
///
/// The due date column is `duedate` in storage but `due_date` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    #[serde(default)]
    pub id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub category: String,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub due_date: Option<OffsetDateTime>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created: Option<OffsetDateTime>,
}

/// A task that fails these checks is rejected before it reaches storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task needs a name")]
    MissingName,
    #[error("task name must be at most {NAME_MAX_LENGTH} characters")]
    NameTooLong,
    #[error("task description must be at most {DESCRIPTION_MAX_LENGTH} characters")]
    DescriptionTooLong,
    #[error("task category must be at most {CATEGORY_MAX_LENGTH} characters")]
    CategoryTooLong,
}

impl Task {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() {
            return Err(ValidationError::MissingName);
        }
        if self.name.chars().count() > NAME_MAX_LENGTH {
            return Err(ValidationError::NameTooLong);
        }
        if self.description.chars().count() > DESCRIPTION_MAX_LENGTH {
            return Err(ValidationError::DescriptionTooLong);
        }
        if self.category.chars().count() > CATEGORY_MAX_LENGTH {
            return Err(ValidationError::CategoryTooLong);
        }
        Ok(())
    }
}
