//! Todo entity for SeaORM.

use sea_orm::entity::prelude::*;
use sea_orm::{NotSet, Set};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "todos")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub due_date: Date,
    pub completed: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to Domain Todo.
impl From<Model> for docket_core::domain::Todo {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            title: model.title,
            due_date: model.due_date,
            completed: model.completed,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
        }
    }
}

/// A new todo always starts pending.
impl From<docket_core::domain::NewTodo> for ActiveModel {
    fn from(todo: docket_core::domain::NewTodo) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: NotSet,
            user_id: Set(todo.user_id),
            title: Set(todo.title),
            due_date: Set(todo.due_date),
            completed: Set(false),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
        }
    }
}

/// Conversion from Domain Todo to SeaORM ActiveModel, for updates.
impl From<docket_core::domain::Todo> for ActiveModel {
    fn from(todo: docket_core::domain::Todo) -> Self {
        Self {
            id: Set(todo.id),
            user_id: Set(todo.user_id),
            title: Set(todo.title),
            due_date: Set(todo.due_date),
            completed: Set(todo.completed),
            created_at: Set(todo.created_at.into()),
            updated_at: Set(chrono::Utc::now().into()),
        }
    }
}
