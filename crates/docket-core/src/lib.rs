//! # Docket Core
//!
//! The domain layer of Docket: todos, their date buckets and completion
//! lifecycle, and the accounts that own them.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use error::DomainError;
pub use service::{TodoService, UserService};
