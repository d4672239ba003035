//! Todo domain models and DTOs.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use todo_core::{ColumnType, FilterColumn, ListSpec, OrderBy, SortDirection};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

pub const TITLE_MIN_LENGTH: u64 = 5;
pub const TITLE_MAX_LENGTH: u64 = 2550;

/// Soft state of a todo. Only `Active` is ever written by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i16)]
pub enum TodoStatus {
    Inactive = 0,
    Active = 1,
}

impl From<TodoStatus> for i16 {
    fn from(status: TodoStatus) -> Self {
        status as i16
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Todo {
    pub todo_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub is_completed: bool,
    /// 1 = active
    #[schema(example = 1)]
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Record handed to a repository for insertion.
///
/// Identity and timestamps are assigned by the service, never by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub todo_id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub is_completed: bool,
    pub status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl NewTodo {
    /// A fresh, incomplete, active todo stamped at `now`.
    pub fn new(user_id: Uuid, title: String, now: DateTime<Utc>) -> Self {
        Self {
            todo_id: Uuid::new_v4(),
            user_id,
            title,
            is_completed: false,
            status: TodoStatus::Active.into(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl From<NewTodo> for Todo {
    fn from(new: NewTodo) -> Self {
        Self {
            todo_id: new.todo_id,
            user_id: new.user_id,
            title: new.title,
            is_completed: new.is_completed,
            status: new.status,
            created_at: new.created_at,
            updated_at: new.updated_at,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTodoDto {
    #[validate(length(
        min = 5,
        max = 2550,
        message = "title must be between 5 and 2550 characters"
    ))]
    #[schema(example = "Buy milk", min_length = 5, max_length = 2550)]
    pub title: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ListTodosResponse {
    pub status: bool,
    /// Total number of matching todos, independent of the page window.
    pub count: i64,
    pub data: Vec<Todo>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateTodoResponse {
    pub status: bool,
    pub data: Todo,
}

/// Query parameters accepted by `GET /todo/listTodos`.
///
/// Documentation only; the request is parsed by the pagination extractor so
/// that malformed values are reported instead of dropped.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TodoListParams {
    /// Page number (1-indexed); overrides `offset`
    #[param(minimum = 1)]
    pub page: Option<i64>,
    /// Items per page (1-100, default 10)
    #[param(minimum = 1, maximum = 100)]
    pub limit: Option<i64>,
    /// Alias for `limit`
    pub size: Option<i64>,
    /// Number of items to skip (default 0)
    #[param(minimum = 0)]
    pub offset: Option<i64>,
    /// One of `created_at`, `updated_at`, `title`
    pub sort_by: Option<String>,
    /// `asc` or `desc` (default `desc`)
    pub order: Option<SortDirection>,
    /// Substring of the todo id
    pub todo_id: Option<String>,
    /// Substring of the owner id; never widens the caller's scope
    pub user_id: Option<String>,
}

const TODO_FILTER_COLUMNS: &[FilterColumn] = &[
    FilterColumn::like("todo_id", ColumnType::Uuid),
    FilterColumn::like("user_id", ColumnType::Uuid),
];

/// Filter and ordering whitelist of the todo list.
pub const TODO_LIST_SPEC: ListSpec = ListSpec {
    filter_columns: TODO_FILTER_COLUMNS,
    sort_columns: &["created_at", "updated_at", "title"],
    default_order: OrderBy {
        column: "created_at",
        direction: SortDirection::Desc,
    },
    tiebreaker: "todo_id",
};
