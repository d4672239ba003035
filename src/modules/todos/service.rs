use std::sync::Arc;

use anyhow::anyhow;
use chrono::Utc;
use tracing::instrument;
use uuid::Uuid;

use todo_core::{AppError, PaginationRequest, Scope, build_query_options};
use todo_models::{CreateTodoResponse, ListTodosResponse, NewTodo, TODO_LIST_SPEC};

use crate::metrics::{track_todo_created, track_todos_listed};
use crate::modules::todos::repository::TodoRepository;

/// Column every list query is scoped to.
const OWNER_COLUMN: &str = "user_id";

#[derive(Clone)]
pub struct TodoService {
    repository: Arc<dyn TodoRepository>,
}

impl TodoService {
    pub fn new(repository: Arc<dyn TodoRepository>) -> Self {
        Self { repository }
    }

    /// Lists the caller's todos. `count` covers every match, `data` only the
    /// requested page.
    #[instrument(skip(self))]
    pub async fn list(
        &self,
        request: &PaginationRequest,
        user_id: Uuid,
    ) -> Result<ListTodosResponse, AppError> {
        let scope = Scope {
            column: OWNER_COLUMN,
            value: user_id,
        };
        let options = build_query_options(request, &TODO_LIST_SPEC, scope)?;

        let count = self.repository.count(&options.filters).await?;
        let data = self.repository.find_all(&options).await?;

        track_todos_listed(data.len());

        Ok(ListTodosResponse {
            status: true,
            count,
            data,
        })
    }

    /// Creates a todo owned by the caller. The title is expected to be
    /// validated already.
    #[instrument(skip(self, title))]
    pub async fn create(
        &self,
        title: String,
        user_id: Uuid,
    ) -> Result<CreateTodoResponse, AppError> {
        let todo = NewTodo::new(user_id, title, Utc::now());
        let todo_id = todo.todo_id;

        let created = self.repository.create(todo).await?.ok_or_else(|| {
            AppError::inconsistency(anyhow!("Todo {} was not created", todo_id))
        })?;

        track_todo_created();
        tracing::info!(todo_id = %created.todo_id, "Todo created");

        Ok(CreateTodoResponse {
            status: true,
            data: created,
        })
    }
}
