//! Fake todo generation and bulk insertion.

mod todos;

pub use todos::{clear_todos, generate_todos, insert_todos_batch, seed_todos};
