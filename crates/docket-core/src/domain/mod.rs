//! Domain entities - the core business objects.

mod board;
mod todo;
mod user;

pub use board::TodoBoard;
pub use todo::{Bucket, Completion, CompletionChange, NewTodo, Todo, parse_due_date};
pub use user::{MIN_PASSWORD_LEN, NewUser, SignUp, User, mask_email, normalize_email};

/// Database-generated user identifier.
pub type UserId = i32;

/// Database-generated todo identifier. Ascending ids follow insertion order.
pub type TodoId = i32;
