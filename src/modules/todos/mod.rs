pub mod controller;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(any(test, feature = "test-utils"))]
pub use repository::InMemoryTodoRepository;
pub use repository::{PgTodoRepository, TodoRepository};
pub use router::init_todos_router;
pub use service::TodoService;
