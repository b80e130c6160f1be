//! Todo classification and lifecycle against the in-memory repository.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use docket_core::DomainError;
use docket_core::TodoService;
use docket_core::domain::{Bucket, Todo};
use docket_core::ports::FixedClock;
use docket_infra::InMemoryTodoRepository;

const ALICE: i32 = 1;
const BOB: i32 = 2;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn service_on(today: &str) -> (TodoService, Arc<InMemoryTodoRepository>) {
    let repo = Arc::new(InMemoryTodoRepository::new());
    let service = TodoService::new(repo.clone(), Arc::new(FixedClock(date(today))));
    (service, repo)
}

fn ids(todos: &[Todo]) -> Vec<i32> {
    todos.iter().map(|t| t.id).collect()
}

#[tokio::test]
async fn test_overdue_scenario() {
    let (service, _) = service_on("2024-01-02");

    let todo = service
        .add_todo(ALICE, "Buy milk", "2024-01-01")
        .await
        .unwrap();

    assert_eq!(ids(&service.overdue(ALICE).await.unwrap()), vec![todo.id]);
    assert!(service.due_today(ALICE).await.unwrap().is_empty());
    assert!(service.due_later(ALICE).await.unwrap().is_empty());
    assert!(service.completed(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_due_today_scenario() {
    let (service, _) = service_on("2024-01-02");

    let todo = service
        .add_todo(ALICE, "Read book", "2024-01-02")
        .await
        .unwrap();

    assert!(service.overdue(ALICE).await.unwrap().is_empty());
    assert_eq!(ids(&service.due_today(ALICE).await.unwrap()), vec![todo.id]);
    assert!(service.due_later(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_complete_and_reopen_moves_between_buckets() {
    let (service, _) = service_on("2024-01-02");
    let todo = service
        .add_todo(ALICE, "Buy vegetables", "2024-01-02")
        .await
        .unwrap();

    let done = service.set_completion(ALICE, todo.id, true).await.unwrap();
    assert!(done.completed);
    assert!(service.due_today(ALICE).await.unwrap().is_empty());
    assert_eq!(ids(&service.completed(ALICE).await.unwrap()), vec![todo.id]);

    let reopened = service.set_completion(ALICE, todo.id, false).await.unwrap();
    assert!(!reopened.completed);
    assert_eq!(ids(&service.due_today(ALICE).await.unwrap()), vec![todo.id]);
    assert!(service.completed(ALICE).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_set_twice_round_trips() {
    let (service, _) = service_on("2024-01-02");
    let original = service
        .add_todo(ALICE, "Try ELM", "2024-02-01")
        .await
        .unwrap();

    service.set_completion(ALICE, original.id, true).await.unwrap();
    let back = service
        .set_completion(ALICE, original.id, false)
        .await
        .unwrap();

    assert_eq!(back.id, original.id);
    assert_eq!(back.user_id, original.user_id);
    assert_eq!(back.title, original.title);
    assert_eq!(back.due_date, original.due_date);
    assert_eq!(back.completed, original.completed);
}

#[tokio::test]
async fn test_setting_current_state_is_a_no_op() {
    let (service, _) = service_on("2024-01-02");
    let todo = service
        .add_todo(ALICE, "Water plants", "2024-01-05")
        .await
        .unwrap();

    let done = service.set_completion(ALICE, todo.id, true).await.unwrap();
    let again = service.set_completion(ALICE, todo.id, true).await.unwrap();

    assert!(again.completed);
    assert_eq!(again.updated_at, done.updated_at);
}

#[tokio::test]
async fn test_toggle_flips_state() {
    let (service, _) = service_on("2024-01-02");
    let todo = service
        .add_todo(ALICE, "Call mom", "2024-01-02")
        .await
        .unwrap();

    assert!(service.toggle_completion(ALICE, todo.id).await.unwrap().completed);
    assert!(!service.toggle_completion(ALICE, todo.id).await.unwrap().completed);
}

#[tokio::test]
async fn test_board_is_exclusive_and_exhaustive() {
    let (service, _) = service_on("2024-01-02");
    let mut created = Vec::new();
    for (title, due) in [
        ("a", "2023-12-31"),
        ("b", "2024-01-02"),
        ("c", "2024-01-03"),
        ("d", "2024-01-01"),
        ("e", "2024-01-02"),
        ("f", "2025-01-01"),
    ] {
        created.push(service.add_todo(ALICE, title, due).await.unwrap());
    }
    service.set_completion(ALICE, created[1].id, true).await.unwrap();
    service.set_completion(ALICE, created[3].id, true).await.unwrap();
    service.add_todo(BOB, "not alice's", "2024-01-02").await.unwrap();

    let board = service.board(ALICE).await.unwrap();

    assert_eq!(board.today, date("2024-01-02"));
    assert_eq!(board.len(), created.len());
    let mut seen = HashSet::new();
    for bucket in Bucket::ALL {
        for todo in board.bucket(bucket) {
            assert_eq!(todo.user_id, ALICE);
            assert!(seen.insert(todo.id));
        }
    }
    assert_eq!(seen, created.iter().map(|t| t.id).collect::<HashSet<_>>());

    assert_eq!(ids(&board.overdue), vec![created[0].id]);
    assert_eq!(ids(&board.due_today), vec![created[4].id]);
    assert_eq!(ids(&board.due_later), vec![created[2].id, created[5].id]);
    assert_eq!(ids(&board.completed), vec![created[1].id, created[3].id]);

    // Single-bucket queries agree with the board.
    assert_eq!(service.overdue(ALICE).await.unwrap(), board.overdue);
    assert_eq!(service.due_today(ALICE).await.unwrap(), board.due_today);
    assert_eq!(service.due_later(ALICE).await.unwrap(), board.due_later);
    assert_eq!(service.completed(ALICE).await.unwrap(), board.completed);
}

#[tokio::test]
async fn test_empty_title_is_rejected_without_persisting() {
    let (service, repo) = service_on("2024-01-02");

    let result = service.add_todo(ALICE, "   ", "2024-01-02").await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_bad_due_date_is_rejected_without_persisting() {
    let (service, repo) = service_on("2024-01-02");

    for due in ["", "next week"] {
        let result = service.add_todo(ALICE, "Buy milk", due).await;
        assert!(matches!(result, Err(DomainError::Validation(_))));
    }
    assert!(repo.is_empty().await);
}

#[tokio::test]
async fn test_timestamp_due_date_lands_in_due_today() {
    let (service, _) = service_on("2024-01-02");

    let todo = service
        .add_todo(ALICE, "Buy milk", "2024-01-02T18:30:00.000Z")
        .await
        .unwrap();

    assert_eq!(todo.due_date, date("2024-01-02"));
    assert_eq!(ids(&service.due_today(ALICE).await.unwrap()), vec![todo.id]);
}

#[tokio::test]
async fn test_remove_by_other_user_keeps_todo() {
    let (service, _) = service_on("2024-01-02");
    let todo = service
        .add_todo(ALICE, "Buy milk", "2024-01-02")
        .await
        .unwrap();

    assert!(!service.remove(BOB, todo.id).await.unwrap());
    assert_eq!(service.find_by_id(ALICE, todo.id).await.unwrap(), todo);

    assert!(service.remove(ALICE, todo.id).await.unwrap());
    assert!(!service.remove(ALICE, todo.id).await.unwrap());
}

#[tokio::test]
async fn test_remove_unknown_id_reports_not_deleted() {
    let (service, _) = service_on("2024-01-02");

    assert!(!service.remove(ALICE, 404).await.unwrap());
}

#[tokio::test]
async fn test_other_users_todo_is_hidden() {
    let (service, _) = service_on("2024-01-02");
    let todo = service
        .add_todo(ALICE, "Buy milk", "2024-01-02")
        .await
        .unwrap();

    let read = service.find_by_id(BOB, todo.id).await.unwrap_err();
    assert!(matches!(read, DomainError::OwnershipViolation { .. }));
    assert!(read.is_not_found());

    let set = service.set_completion(BOB, todo.id, true).await.unwrap_err();
    assert!(set.is_not_found());
    let toggle = service.toggle_completion(BOB, todo.id).await.unwrap_err();
    assert!(toggle.is_not_found());

    assert!(!service.find_by_id(ALICE, todo.id).await.unwrap().completed);
    assert!(service.board(BOB).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_missing_todo_is_not_found() {
    let (service, _) = service_on("2024-01-02");

    let err = service.set_completion(ALICE, 9, true).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound { id: 9, .. }));
}
