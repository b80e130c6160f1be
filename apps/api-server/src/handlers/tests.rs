use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::NaiveDate;
use serde_json::{Value, json};

use docket_core::ports::FixedClock;
use docket_infra::{JwtConfig, JwtTokenService};
use docket_shared::dto::{AuthResponse, TodoBoardResponse, TodoResponse};

use super::configure_routes;
use crate::state::AppState;

const TODAY: &str = "2024-01-02";

fn state() -> AppState {
    let today = NaiveDate::parse_from_str(TODAY, "%Y-%m-%d").unwrap();
    AppState::in_memory(
        Arc::new(FixedClock(today)),
        Arc::new(JwtTokenService::new(JwtConfig::default())),
    )
}

macro_rules! init_app {
    () => {
        test::init_service(
            App::new()
                .app_data(web::Data::new(state()))
                .configure(configure_routes),
        )
        .await
    };
}

/// Sign up `email` and return a bearer header value.
macro_rules! sign_up {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/users")
            .set_json(json!({
                "firstName": "Rohit",
                "lastName": "Sharma",
                "email": $email,
                "password": "209@Banglore",
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let auth: AuthResponse = test::read_body_json(resp).await;
        format!("Bearer {}", auth.access_token)
    }};
}

macro_rules! create_todo {
    ($app:expr, $token:expr, $title:expr, $due:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/todos")
            .insert_header((header::AUTHORIZATION, $token.clone()))
            .set_json(json!({ "title": $title, "dueDate": $due }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let todo: TodoResponse = test::read_body_json(resp).await;
        todo
    }};
}

macro_rules! board {
    ($app:expr, $token:expr) => {{
        let req = test::TestRequest::get()
            .uri("/api/todos")
            .insert_header((header::AUTHORIZATION, $token.clone()))
            .to_request();
        let board: TodoBoardResponse = test::call_and_read_body_json(&$app, req).await;
        board
    }};
}

#[actix_rt::test]
async fn test_health_check() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "memory");
    assert_eq!(body["today"], TODAY);
}

#[actix_rt::test]
async fn test_todos_require_authentication() {
    let app = init_app!();

    let req = test::TestRequest::get().uri("/api/todos").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/todos")
        .insert_header((header::AUTHORIZATION, "Bearer nonsense"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_rt::test]
async fn test_login_and_me() {
    let app = init_app!();
    sign_up!(app, "rohit@indiancricket.com");

    let req = test::TestRequest::post()
        .uri("/api/session")
        .set_json(json!({ "email": "rohit@indiancricket.com", "password": "wrong-password" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/session")
        .set_json(json!({ "email": "rohit@indiancricket.com", "password": "209@Banglore" }))
        .to_request();
    let auth: AuthResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(auth.token_type, "Bearer");

    let req = test::TestRequest::get()
        .uri("/api/me")
        .insert_header((header::AUTHORIZATION, format!("Bearer {}", auth.access_token)))
        .to_request();
    let me: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(me["first_name"], "Rohit");
    assert_eq!(me["email"], "rohit@indiancricket.com");
    assert!(me.get("password_hash").is_none());
}

#[actix_rt::test]
async fn test_duplicate_sign_up_conflicts() {
    let app = init_app!();
    sign_up!(app, "rohit@indiancricket.com");

    let req = test::TestRequest::post()
        .uri("/api/users")
        .set_json(json!({
            "first_name": "Rohit",
            "email": "rohit@indiancricket.com",
            "password": "209@Banglore",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn test_todo_lifecycle() {
    let app = init_app!();
    let token = sign_up!(app, "rohit@indiancricket.com");

    let overdue = create_todo!(app, token, "Buy milk", "2024-01-01");
    let today = create_todo!(app, token, "Buy vegetables", "2024-01-02T10:00:00.000Z");
    let later = create_todo!(app, token, "Read book", "2024-01-09");

    let board = board!(app, token);
    assert_eq!(board.first_name, "Rohit");
    assert_eq!(board.overdue, vec![overdue.clone()]);
    assert_eq!(board.due_today, vec![today.clone()]);
    assert_eq!(board.due_later, vec![later.clone()]);
    assert!(board.completed.is_empty());

    // Explicit target
    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{}", today.id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({ "completed": true }))
        .to_request();
    let done: TodoResponse = test::call_and_read_body_json(&app, req).await;
    assert!(done.completed);

    let board = board!(app, token);
    assert!(board.due_today.is_empty());
    assert_eq!(board.completed, vec![done]);

    // No target toggles back
    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{}", today.id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .set_json(json!({}))
        .to_request();
    let reopened: TodoResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!reopened.completed);
    assert_eq!(board!(app, token).due_today, vec![reopened]);

    let req = test::TestRequest::get()
        .uri(&format!("/api/todos/{}", later.id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let fetched: TodoResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched.title, "Read book");

    for expected in [true, false] {
        let req = test::TestRequest::delete()
            .uri(&format!("/api/todos/{}", later.id))
            .insert_header((header::AUTHORIZATION, token.clone()))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], expected);
    }
}

#[actix_rt::test]
async fn test_malformed_update_leaves_todo_untouched() {
    let app = init_app!();
    let token = sign_up!(app, "rohit@indiancricket.com");
    let todo = create_todo!(app, token, "Buy milk", TODAY);

    for (content_type, body) in [
        ("application/json", r#"{"completed":"false"}"#),
        ("application/json", r#"{"completed":"#),
        ("application/x-www-form-urlencoded", "completed=false"),
    ] {
        let req = test::TestRequest::put()
            .uri(&format!("/api/todos/{}", todo.id))
            .insert_header((header::AUTHORIZATION, token.clone()))
            .insert_header((header::CONTENT_TYPE, content_type))
            .set_payload(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{body}");
    }

    let board = board!(app, token);
    assert_eq!(board.due_today, vec![todo]);
    assert!(board.completed.is_empty());
}

#[actix_rt::test]
async fn test_empty_update_body_toggles() {
    let app = init_app!();
    let token = sign_up!(app, "rohit@indiancricket.com");
    let todo = create_todo!(app, token, "Buy milk", TODAY);

    let req = test::TestRequest::put()
        .uri(&format!("/api/todos/{}", todo.id))
        .insert_header((header::AUTHORIZATION, token.clone()))
        .to_request();
    let toggled: TodoResponse = test::call_and_read_body_json(&app, req).await;

    assert!(toggled.completed);
}

#[actix_rt::test]
async fn test_invalid_todo_is_unprocessable() {
    let app = init_app!();
    let token = sign_up!(app, "rohit@indiancricket.com");

    for body in [
        json!({ "title": "", "dueDate": "2024-01-02" }),
        json!({ "title": "Buy milk", "dueDate": "someday" }),
        json!({ "title": "Buy milk" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/todos")
            .insert_header((header::AUTHORIZATION, token.clone()))
            .set_json(body)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    assert!(board!(app, token).overdue.is_empty());
}

#[actix_rt::test]
async fn test_other_users_todos_are_invisible() {
    let app = init_app!();
    let alice = sign_up!(app, "alice@example.com");
    let bob = sign_up!(app, "bob@example.com");

    let todo = create_todo!(app, alice, "Buy milk", TODAY);
    let uri = format!("/api/todos/{}", todo.id);

    let req = test::TestRequest::get()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bob.clone()))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::put()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bob.clone()))
        .set_json(json!({ "completed": true }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::delete()
        .uri(&uri)
        .insert_header((header::AUTHORIZATION, bob.clone()))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["success"], false);

    assert!(board!(app, bob).due_today.is_empty());
    assert_eq!(board!(app, alice).due_today, vec![todo]);
}

#[actix_rt::test]
async fn test_malformed_id_is_bad_request() {
    let app = init_app!();
    let token = sign_up!(app, "rohit@indiancricket.com");

    let req = test::TestRequest::get()
        .uri("/api/todos/abc")
        .insert_header((header::AUTHORIZATION, token))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
