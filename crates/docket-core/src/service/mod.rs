//! Application services - the operations the request layer calls.

mod todo_service;
mod user_service;

pub use todo_service::TodoService;
pub use user_service::UserService;
