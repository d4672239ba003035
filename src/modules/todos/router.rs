use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use super::controller::{create_todo, list_todos};

pub fn init_todos_router() -> Router<AppState> {
    Router::new()
        .route("/listTodos", get(list_todos))
        .route("/createTodo", post(create_todo))
}
