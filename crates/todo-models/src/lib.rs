//! # Todo Models
//!
//! Domain models and DTOs for the Todo API.
//!
//! - [`todos`]: the `Todo` entity, the create request, response envelopes and
//!   the list endpoint's filter/sort whitelist
//!
//! # Example
//!
//! ```ignore
//! use todo_models::{CreateTodoDto, TODO_LIST_SPEC};
//! use validator::Validate;
//!
//! let dto = CreateTodoDto { title: "Buy milk".to_string() };
//! assert!(dto.validate().is_ok());
//! ```

pub mod todos;

// Re-export commonly used types at crate root for convenience
pub use todos::{
    CreateTodoDto, CreateTodoResponse, ListTodosResponse, NewTodo, TODO_LIST_SPEC, Todo,
    TodoListParams, TodoStatus,
};
