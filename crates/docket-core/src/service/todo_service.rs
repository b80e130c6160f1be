//! Todo lifecycle and classification.

use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{CompletionChange, NewTodo, Todo, TodoBoard, TodoId, UserId};
use crate::error::DomainError;
use crate::ports::{BaseRepository, Clock, DueFilter, TodoFilter, TodoRepository};

/// Creates, completes, removes and classifies todos on behalf of one
/// acting user per call. Every single-item operation is ownership scoped.
#[derive(Clone)]
pub struct TodoService {
    todos: Arc<dyn TodoRepository>,
    clock: Arc<dyn Clock>,
}

impl TodoService {
    pub fn new(todos: Arc<dyn TodoRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { todos, clock }
    }

    /// The date buckets are evaluated against. Read once per operation.
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Validate and store a new, pending todo.
    pub async fn add_todo(
        &self,
        user_id: UserId,
        title: &str,
        due_date: &str,
    ) -> Result<Todo, DomainError> {
        let new_todo = NewTodo::parse(user_id, title, due_date)?;
        let todo = self.todos.insert(new_todo).await?;

        tracing::debug!(user_id, todo_id = todo.id, due_date = %todo.due_date, "Todo created");
        Ok(todo)
    }

    pub async fn find_by_id(&self, user_id: UserId, todo_id: TodoId) -> Result<Todo, DomainError> {
        let todo = self
            .todos
            .find_by_id(todo_id)
            .await?
            .ok_or_else(|| DomainError::todo_not_found(todo_id))?;

        if !todo.is_owned_by(user_id) {
            tracing::warn!(user_id, todo_id, "Rejected access to another user's todo");
            return Err(DomainError::OwnershipViolation {
                entity_type: "Todo",
                id: todo_id,
            });
        }

        Ok(todo)
    }

    /// Move a todo to an explicit completion state. Setting the state it
    /// is already in changes nothing.
    pub async fn set_completion(
        &self,
        user_id: UserId,
        todo_id: TodoId,
        completed: bool,
    ) -> Result<Todo, DomainError> {
        self.change_completion(user_id, todo_id, CompletionChange::Set(completed))
            .await
    }

    /// Flip the completion state.
    ///
    /// This reads and then writes; two concurrent toggles on the same todo
    /// can cancel into one.
    pub async fn toggle_completion(
        &self,
        user_id: UserId,
        todo_id: TodoId,
    ) -> Result<Todo, DomainError> {
        self.change_completion(user_id, todo_id, CompletionChange::Toggle)
            .await
    }

    pub async fn change_completion(
        &self,
        user_id: UserId,
        todo_id: TodoId,
        change: CompletionChange,
    ) -> Result<Todo, DomainError> {
        let current = self.find_by_id(user_id, todo_id).await?;
        let target = change.resolve(current.completed);

        if target == current.completed {
            return Ok(current);
        }

        let updated = self
            .todos
            .set_completed(todo_id, user_id, target)
            .await?
            .ok_or_else(|| DomainError::todo_not_found(todo_id))?;

        tracing::debug!(user_id, todo_id, completed = target, "Todo completion changed");
        Ok(updated)
    }

    /// Delete a todo owned by `user_id`. Returns whether anything was deleted;
    /// unknown ids and foreign todos both yield `false`.
    pub async fn remove(&self, user_id: UserId, todo_id: TodoId) -> Result<bool, DomainError> {
        let deleted = self.todos.delete_where(todo_id, user_id).await?;

        if deleted == 0 {
            tracing::debug!(user_id, todo_id, "Nothing deleted");
        }
        Ok(deleted > 0)
    }

    /// Pending todos due strictly before today.
    pub async fn overdue(&self, user_id: UserId) -> Result<Vec<Todo>, DomainError> {
        let filter = TodoFilter::pending_due(DueFilter::Before(self.today()));
        Ok(self.todos.find_all_by_user(user_id, filter).await?)
    }

    /// Pending todos due exactly today.
    pub async fn due_today(&self, user_id: UserId) -> Result<Vec<Todo>, DomainError> {
        let filter = TodoFilter::pending_due(DueFilter::On(self.today()));
        Ok(self.todos.find_all_by_user(user_id, filter).await?)
    }

    /// Pending todos due strictly after today.
    pub async fn due_later(&self, user_id: UserId) -> Result<Vec<Todo>, DomainError> {
        let filter = TodoFilter::pending_due(DueFilter::After(self.today()));
        Ok(self.todos.find_all_by_user(user_id, filter).await?)
    }

    /// Completed todos, whatever their due date.
    pub async fn completed(&self, user_id: UserId) -> Result<Vec<Todo>, DomainError> {
        Ok(self
            .todos
            .find_all_by_user(user_id, TodoFilter::completed())
            .await?)
    }

    /// All four buckets from one read and one evaluation of today.
    pub async fn board(&self, user_id: UserId) -> Result<TodoBoard, DomainError> {
        let today = self.today();
        let todos = self
            .todos
            .find_all_by_user(user_id, TodoFilter::all())
            .await?;

        Ok(TodoBoard::classify(todos, today))
    }
}
