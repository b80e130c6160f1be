//! SeaORM entities. Conversions to and from the domain live next to each entity.

pub mod todo;
pub mod user;
