//! Todo handlers. Every route acts as the authenticated user.

use actix_web::{HttpResponse, web};

use docket_core::domain::{CompletionChange, Todo, TodoId};
use docket_shared::dto::{
    CreateTodoRequest, DeleteTodoResponse, TodoBoardResponse, TodoResponse, UpdateTodoRequest,
};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn todo_response(todo: Todo) -> TodoResponse {
    TodoResponse {
        id: todo.id,
        title: todo.title,
        due_date: todo.due_date,
        completed: todo.completed,
    }
}

fn todo_responses(todos: Vec<Todo>) -> Vec<TodoResponse> {
    todos.into_iter().map(todo_response).collect()
}

/// GET /api/todos - the grouped list
pub async fn list(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let board = state.todos.board(identity.user_id).await?;
    let first_name = state.users.first_name(identity.user_id).await?;

    Ok(HttpResponse::Ok().json(TodoBoardResponse {
        today: board.today,
        first_name,
        overdue: todo_responses(board.overdue),
        due_today: todo_responses(board.due_today),
        due_later: todo_responses(board.due_later),
        completed: todo_responses(board.completed),
    }))
}

/// POST /api/todos
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateTodoRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let todo = state
        .todos
        .add_todo(identity.user_id, &req.title, &req.due_date)
        .await?;

    Ok(HttpResponse::Created().json(todo_response(todo)))
}

/// GET /api/todos/{id}
pub async fn show(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<TodoId>,
) -> AppResult<HttpResponse> {
    let todo = state
        .todos
        .find_by_id(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(todo_response(todo)))
}

/// The requested completion target. An empty body means no target;
/// anything else must be a valid `UpdateTodoRequest`.
fn completion_target(body: &[u8]) -> AppResult<Option<bool>> {
    if body.trim_ascii().is_empty() {
        return Ok(None);
    }

    serde_json::from_slice::<UpdateTodoRequest>(body)
        .map(|req| req.completed)
        .map_err(|e| AppError::BadRequest(format!("Invalid update body: {e}")))
}

/// PUT /api/todos/{id} - set completion, or toggle without a target
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<TodoId>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let target = completion_target(&body)?;

    let todo = state
        .todos
        .change_completion(
            identity.user_id,
            path.into_inner(),
            CompletionChange::from(target),
        )
        .await?;

    Ok(HttpResponse::Ok().json(todo_response(todo)))
}

/// DELETE /api/todos/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<TodoId>,
) -> AppResult<HttpResponse> {
    let success = state
        .todos
        .remove(identity.user_id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(DeleteTodoResponse { success }))
}
