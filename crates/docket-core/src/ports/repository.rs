use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{NewTodo, NewUser, Todo, TodoId, User, UserId};
use crate::error::RepoError;

/// Generic repository trait shared by every stored entity.
///
/// `N` is the unsaved form of `T`; identifiers are assigned by the store.
#[async_trait]
pub trait BaseRepository<T, N, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Store a new entity and return it with its generated ID.
    async fn insert(&self, entity: N) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, NewUser, UserId> {
    /// Find a user by their (normalized) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;
}

/// Due date predicate pushed down to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DueFilter {
    Before(NaiveDate),
    On(NaiveDate),
    After(NaiveDate),
}

impl DueFilter {
    pub fn matches(&self, due_date: NaiveDate) -> bool {
        match *self {
            DueFilter::Before(date) => due_date < date,
            DueFilter::On(date) => due_date == date,
            DueFilter::After(date) => due_date > date,
        }
    }
}

/// Optional predicates for [`TodoRepository::find_all_by_user`].
/// The default filter matches everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub due: Option<DueFilter>,
}

impl TodoFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn pending_due(due: DueFilter) -> Self {
        Self {
            completed: Some(false),
            due: Some(due),
        }
    }

    pub fn completed() -> Self {
        Self {
            completed: Some(true),
            due: None,
        }
    }

    /// Reference semantics every adapter must reproduce.
    pub fn matches(&self, todo: &Todo) -> bool {
        self.completed.is_none_or(|c| todo.completed == c)
            && self.due.is_none_or(|d| d.matches(todo.due_date))
    }
}

/// Todo repository. Everything but `find_by_id` is scoped to one owner.
#[async_trait]
pub trait TodoRepository: BaseRepository<Todo, NewTodo, TodoId> {
    /// All todos of `user_id` matching `filter`, ascending by id.
    async fn find_all_by_user(
        &self,
        user_id: UserId,
        filter: TodoFilter,
    ) -> Result<Vec<Todo>, RepoError>;

    /// Overwrite a stored todo. Fails with `RepoError::NotFound` if absent.
    async fn update(&self, todo: Todo) -> Result<Todo, RepoError>;

    /// Set the completion flag in one conditional write.
    /// Returns `None` when no todo with that id belongs to `user_id`.
    async fn set_completed(
        &self,
        id: TodoId,
        user_id: UserId,
        completed: bool,
    ) -> Result<Option<Todo>, RepoError>;

    /// Delete the todo only if `user_id` owns it. Returns rows deleted.
    async fn delete_where(&self, id: TodoId, user_id: UserId) -> Result<u64, RepoError>;
}
