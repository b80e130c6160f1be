//! In-memory repositories - used when no database is configured and in tests.
//!
//! Data is lost on process restart.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use docket_core::domain::{NewTodo, NewUser, Todo, TodoId, User, UserId};
use docket_core::error::RepoError;
use docket_core::ports::{BaseRepository, TodoFilter, TodoRepository, UserRepository};

/// Rows keyed by a serial id, like a table with an auto-increment key.
struct Table<T> {
    rows: BTreeMap<i32, T>,
    last_id: i32,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }

    fn next_id(&mut self) -> i32 {
        self.last_id += 1;
        self.last_id
    }
}

/// In-memory todo repository. Iteration order is ascending id.
pub struct InMemoryTodoRepository {
    table: RwLock<Table<Todo>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }

    /// Number of stored todos across all users.
    pub async fn len(&self) -> usize {
        self.table.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for InMemoryTodoRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<Todo, NewTodo, TodoId> for InMemoryTodoRepository {
    async fn find_by_id(&self, id: TodoId) -> Result<Option<Todo>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, entity: NewTodo) -> Result<Todo, RepoError> {
        let mut table = self.table.write().await;
        let now = Utc::now();
        let todo = Todo {
            id: table.next_id(),
            user_id: entity.user_id,
            title: entity.title,
            due_date: entity.due_date,
            completed: false,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(todo.id, todo.clone());
        Ok(todo)
    }
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn find_all_by_user(
        &self,
        user_id: UserId,
        filter: TodoFilter,
    ) -> Result<Vec<Todo>, RepoError> {
        let table = self.table.read().await;
        Ok(table
            .rows
            .values()
            .filter(|todo| todo.user_id == user_id && filter.matches(todo))
            .cloned()
            .collect())
    }

    async fn update(&self, todo: Todo) -> Result<Todo, RepoError> {
        let mut table = self.table.write().await;
        let row = table.rows.get_mut(&todo.id).ok_or(RepoError::NotFound)?;
        *row = Todo {
            updated_at: Utc::now(),
            ..todo
        };
        Ok(row.clone())
    }

    async fn set_completed(
        &self,
        id: TodoId,
        user_id: UserId,
        completed: bool,
    ) -> Result<Option<Todo>, RepoError> {
        let mut table = self.table.write().await;
        Ok(table
            .rows
            .get_mut(&id)
            .filter(|todo| todo.user_id == user_id)
            .map(|todo| {
                todo.completed = completed;
                todo.updated_at = Utc::now();
                todo.clone()
            }))
    }

    async fn delete_where(&self, id: TodoId, user_id: UserId) -> Result<u64, RepoError> {
        let mut table = self.table.write().await;
        match table.rows.get(&id) {
            Some(todo) if todo.user_id == user_id => {
                table.rows.remove(&id);
                Ok(1)
            }
            _ => Ok(0),
        }
    }
}

/// In-memory user repository with a unique email constraint.
pub struct InMemoryUserRepository {
    table: RwLock<Table<User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            table: RwLock::new(Table::new()),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BaseRepository<User, NewUser, UserId> for InMemoryUserRepository {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, RepoError> {
        Ok(self.table.read().await.rows.get(&id).cloned())
    }

    async fn insert(&self, entity: NewUser) -> Result<User, RepoError> {
        let mut table = self.table.write().await;
        if table.rows.values().any(|u| u.email == entity.email) {
            return Err(RepoError::Constraint("Email already registered".to_string()));
        }

        let now = Utc::now();
        let user = User {
            id: table.next_id(),
            first_name: entity.first_name,
            last_name: entity.last_name,
            email: entity.email,
            password_hash: entity.password_hash,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().find(|u| u.email == email).cloned())
    }
}
