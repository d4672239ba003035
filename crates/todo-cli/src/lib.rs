//! # Todo CLI
//!
//! Seeding utilities for local development and manual testing of the Todo API.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use todo_cli::seeder::{seed_todos, clear_todos};
//!
//! seed_todos(&pool, user_id, 50).await?;
//! clear_todos(&pool, user_id).await?;
//! ```

pub mod seeder;
