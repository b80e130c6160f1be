//! Data Transfer Objects - request/response types for the API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request to sign up.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignUpRequest {
    #[serde(alias = "firstName")]
    pub first_name: String,
    #[serde(default, alias = "lastName")]
    pub last_name: Option<String>,
    pub email: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub email: String,
    pub created_at: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Request to add a todo. Missing fields are left empty so they fail
/// validation instead of deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default, alias = "dueDate")]
    pub due_date: String,
}

/// Request to change completion. `completed: null` or an empty body toggles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoRequest {
    #[serde(default)]
    pub completed: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoResponse {
    pub id: i32,
    pub title: String,
    pub due_date: NaiveDate,
    pub completed: bool,
}

/// The grouped list shown on the todo page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoBoardResponse {
    pub today: NaiveDate,
    pub first_name: String,
    pub overdue: Vec<TodoResponse>,
    pub due_today: Vec<TodoResponse>,
    pub due_later: Vec<TodoResponse>,
    pub completed: Vec<TodoResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeleteTodoResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_todo_accepts_camel_case_due_date() {
        let req: CreateTodoRequest =
            serde_json::from_str(r#"{"title":"Buy milk","dueDate":"2024-01-01"}"#).unwrap();

        assert_eq!(req.due_date, "2024-01-01");
    }

    #[test]
    fn test_create_todo_missing_fields_default_to_empty() {
        let req: CreateTodoRequest = serde_json::from_str("{}").unwrap();

        assert!(req.title.is_empty());
        assert!(req.due_date.is_empty());
    }

    #[test]
    fn test_update_todo_without_target() {
        let empty: UpdateTodoRequest = serde_json::from_str("{}").unwrap();
        let null: UpdateTodoRequest = serde_json::from_str(r#"{"completed":null}"#).unwrap();
        let set: UpdateTodoRequest = serde_json::from_str(r#"{"completed":true}"#).unwrap();

        assert_eq!(empty.completed, None);
        assert_eq!(null.completed, None);
        assert_eq!(set.completed, Some(true));
    }

    #[test]
    fn test_todo_due_date_serializes_as_calendar_date() {
        let todo = TodoResponse {
            id: 1,
            title: "Buy milk".to_string(),
            due_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            completed: false,
        };

        let json = serde_json::to_value(&todo).unwrap();
        assert_eq!(json["due_date"], "2024-01-01");
    }
}
