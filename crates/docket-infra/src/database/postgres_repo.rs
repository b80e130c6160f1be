//! PostgreSQL repository implementations.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder};

use docket_core::domain::{Todo, TodoId, User, UserId, mask_email};
use docket_core::error::RepoError;
use docket_core::ports::{DueFilter, TodoFilter, TodoRepository, UserRepository};

use super::entity::todo::{self, Entity as TodoEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

/// PostgreSQL todo repository.
pub type PostgresTodoRepository = PostgresBaseRepository<TodoEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

#[async_trait]
impl TodoRepository for PostgresTodoRepository {
    async fn find_all_by_user(
        &self,
        user_id: UserId,
        filter: TodoFilter,
    ) -> Result<Vec<Todo>, RepoError> {
        let mut query = TodoEntity::find().filter(todo::Column::UserId.eq(user_id));

        if let Some(completed) = filter.completed {
            query = query.filter(todo::Column::Completed.eq(completed));
        }
        query = match filter.due {
            Some(DueFilter::Before(date)) => query.filter(todo::Column::DueDate.lt(date)),
            Some(DueFilter::On(date)) => query.filter(todo::Column::DueDate.eq(date)),
            Some(DueFilter::After(date)) => query.filter(todo::Column::DueDate.gt(date)),
            None => query,
        };

        let result = query
            .order_by_asc(todo::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }

    async fn update(&self, todo: Todo) -> Result<Todo, RepoError> {
        let active_model: todo::ActiveModel = todo.into();
        let model = active_model.update(&self.db).await.map_err(map_db_err)?;

        Ok(model.into())
    }

    async fn set_completed(
        &self,
        id: TodoId,
        user_id: UserId,
        completed: bool,
    ) -> Result<Option<Todo>, RepoError> {
        // One UPDATE ... RETURNING, so ownership and the write can't drift apart.
        let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
        let updated = TodoEntity::update_many()
            .col_expr(todo::Column::Completed, Expr::value(completed))
            .col_expr(todo::Column::UpdatedAt, Expr::value(now))
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::UserId.eq(user_id))
            .exec_with_returning(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(updated.into_iter().next().map(Into::into))
    }

    async fn delete_where(&self, id: TodoId, user_id: UserId) -> Result<u64, RepoError> {
        let result = TodoEntity::delete_many()
            .filter(todo::Column::Id.eq(id))
            .filter(todo::Column::UserId.eq(user_id))
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.rows_affected)
    }
}
