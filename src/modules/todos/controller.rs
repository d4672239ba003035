use axum::{Json, extract::State};
use tracing::instrument;

use todo_core::{AppError, ErrorResponse};
use todo_models::{CreateTodoDto, CreateTodoResponse, ListTodosResponse, TodoListParams};

use crate::middleware::auth::AuthUser;
use crate::middleware::pagination::ValidatedPagination;
use crate::state::AppState;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/todo/listTodos",
    params(TodoListParams),
    responses(
        (status = 200, description = "Caller's todos with the total match count", body = ListTodosResponse),
        (status = 400, description = "Invalid pagination or filter parameters", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Persistence failure", body = ErrorResponse)
    ),
    tag = "Todos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state))]
pub async fn list_todos(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedPagination(request): ValidatedPagination,
) -> Result<Json<ListTodosResponse>, AppError> {
    let response = state.todo_service.list(&request, auth_user.user_id).await?;
    Ok(Json(response))
}

#[utoipa::path(
    post,
    path = "/todo/createTodo",
    request_body = CreateTodoDto,
    responses(
        (status = 200, description = "Todo created", body = CreateTodoResponse),
        (status = 400, description = "Invalid title", body = ErrorResponse),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorResponse),
        (status = 500, description = "Persistence failure or no record created", body = ErrorResponse)
    ),
    tag = "Todos",
    security(("bearer_auth" = []))
)]
#[instrument(skip(state, dto))]
pub async fn create_todo(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ValidatedJson(dto): ValidatedJson<CreateTodoDto>,
) -> Result<Json<CreateTodoResponse>, AppError> {
    let response = state
        .todo_service
        .create(dto.title, auth_user.user_id)
        .await?;
    Ok(Json(response))
}
