use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{TodoId, UserId};
use crate::error::DomainError;

/// Todo entity - a single item on a user's list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub user_id: UserId,
    pub title: String,
    pub due_date: NaiveDate,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// The bucket this todo falls into when "today" is `today`.
    pub fn bucket(&self, today: NaiveDate) -> Bucket {
        if self.completed {
            return Bucket::Completed;
        }
        match self.due_date.cmp(&today) {
            std::cmp::Ordering::Less => Bucket::Overdue,
            std::cmp::Ordering::Equal => Bucket::DueToday,
            std::cmp::Ordering::Greater => Bucket::DueLater,
        }
    }

    pub fn completion(&self) -> Completion {
        Completion::from(self.completed)
    }

    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

/// A validated todo that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub user_id: UserId,
    pub title: String,
    pub due_date: NaiveDate,
}

impl NewTodo {
    /// Validate raw input into a new todo.
    ///
    /// The title must contain something other than whitespace and the due
    /// date must parse as a calendar date (see [`parse_due_date`]).
    pub fn parse(user_id: UserId, title: &str, due_date: &str) -> Result<Self, DomainError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(DomainError::Validation("Title can't be empty".to_string()));
        }

        Ok(Self {
            user_id,
            title: title.to_string(),
            due_date: parse_due_date(due_date)?,
        })
    }
}

/// Parse a due date, keeping only its calendar day.
///
/// Accepts `YYYY-MM-DD`, RFC 3339 timestamps and offset-less ISO timestamps.
/// Timestamps are truncated to the date they spell out; no time zone
/// conversion happens.
pub fn parse_due_date(input: &str) -> Result<NaiveDate, DomainError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(DomainError::Validation("Due date can't be empty".to_string()));
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(input) {
        return Ok(timestamp.date_naive());
    }
    if let Ok(timestamp) = NaiveDateTime::parse_from_str(input, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(timestamp.date());
    }

    Err(DomainError::Validation(format!(
        "Due date '{input}' is not a valid date"
    )))
}

/// Completion state of a todo. Both transitions are always allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Pending,
    Done,
}

impl Completion {
    pub fn is_done(self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Pending => Self::Done,
            Self::Done => Self::Pending,
        }
    }
}

impl From<bool> for Completion {
    fn from(completed: bool) -> Self {
        if completed { Self::Done } else { Self::Pending }
    }
}

/// A requested completion transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionChange {
    /// Move to an explicit state.
    Set(bool),
    /// Flip whatever the current state is.
    Toggle,
}

impl CompletionChange {
    /// The `completed` value after applying this change to `current`.
    pub fn resolve(self, current: bool) -> bool {
        match self {
            Self::Set(target) => target,
            Self::Toggle => Completion::from(current).toggled().is_done(),
        }
    }
}

impl From<Option<bool>> for CompletionChange {
    fn from(target: Option<bool>) -> Self {
        target.map_or(Self::Toggle, Self::Set)
    }
}

/// The four mutually exclusive groups a user's todos are shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bucket {
    Overdue,
    DueToday,
    DueLater,
    Completed,
}

impl Bucket {
    pub const ALL: [Bucket; 4] = [
        Bucket::Overdue,
        Bucket::DueToday,
        Bucket::DueLater,
        Bucket::Completed,
    ];
}
