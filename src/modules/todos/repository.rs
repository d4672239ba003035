//! Persistence of todos.
//!
//! [`TodoRepository`] is the seam between the service and the store. The
//! PostgreSQL implementation renders [`QueryOptions`] into a single
//! parameterized statement; the in-memory implementation evaluates the same
//! options over a `Vec` and backs the router-level tests.

use anyhow::anyhow;
use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use todo_core::{AppError, ColumnType, Condition, Filter, FilterValue, OrderBy, QueryOptions};
use todo_models::{NewTodo, Todo};

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Number of rows matching every filter, ignoring the page window.
    async fn count(&self, filters: &[Filter]) -> Result<i64, AppError>;

    async fn find_all(&self, options: &QueryOptions) -> Result<Vec<Todo>, AppError>;

    /// Persists `todo`, returning the stored row or `None` if the store did
    /// not report one.
    async fn create(&self, todo: NewTodo) -> Result<Option<Todo>, AppError>;
}

const TODO_COLUMNS: &str = "todo_id, user_id, title, is_completed, status, created_at, updated_at";

#[derive(Clone, Debug)]
pub struct PgTodoRepository {
    db: PgPool,
}

impl PgTodoRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

/// Appends `WHERE ... AND ...` for the filters. Column names come from the
/// list whitelist; every value is bound.
fn push_filters(query: &mut QueryBuilder<'_, Postgres>, filters: &[Filter]) {
    for (i, filter) in filters.iter().enumerate() {
        query.push(if i == 0 { " WHERE " } else { " AND " });

        match &filter.condition {
            Condition::Equals(FilterValue::Uuid(id)) => {
                query.push(filter.column).push(" = ").push_bind(*id);
            }
            Condition::Equals(FilterValue::Text(text)) => {
                query.push(filter.column).push(" = ").push_bind(text.clone());
            }
            Condition::Contains(_) => {
                if filter.column_type == ColumnType::Uuid {
                    query.push("CAST(").push(filter.column).push(" AS TEXT)");
                } else {
                    query.push(filter.column);
                }
                query
                    .push(" ILIKE ")
                    .push_bind(filter.like_pattern().unwrap_or_default());
            }
        }
    }
}

fn push_order(query: &mut QueryBuilder<'_, Postgres>, order: &[OrderBy]) {
    for (i, order_by) in order.iter().enumerate() {
        query.push(if i == 0 { " ORDER BY " } else { ", " });
        query
            .push(order_by.column)
            .push(" ")
            .push(order_by.direction.as_sql());
    }
}

#[async_trait]
impl TodoRepository for PgTodoRepository {
    #[instrument(skip(self))]
    async fn count(&self, filters: &[Filter]) -> Result<i64, AppError> {
        let mut query = QueryBuilder::new("SELECT COUNT(*) FROM todos");
        push_filters(&mut query, filters);

        query
            .build_query_scalar::<i64>()
            .fetch_one(&self.db)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self))]
    async fn find_all(&self, options: &QueryOptions) -> Result<Vec<Todo>, AppError> {
        let mut query = QueryBuilder::new(format!("SELECT {} FROM todos", TODO_COLUMNS));
        push_filters(&mut query, &options.filters);
        push_order(&mut query, &options.order);
        query
            .push(" LIMIT ")
            .push_bind(options.limit)
            .push(" OFFSET ")
            .push_bind(options.offset);

        query
            .build_query_as::<Todo>()
            .fetch_all(&self.db)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(self, todo), fields(todo_id = %todo.todo_id))]
    async fn create(&self, todo: NewTodo) -> Result<Option<Todo>, AppError> {
        let sql = format!(
            r#"INSERT INTO todos ({columns})
               VALUES ($1, $2, $3, $4, $5, $6, $7)
               RETURNING {columns}"#,
            columns = TODO_COLUMNS
        );

        sqlx::query_as::<_, Todo>(&sql)
            .bind(todo.todo_id)
            .bind(todo.user_id)
            .bind(&todo.title)
            .bind(todo.is_completed)
            .bind(todo.status)
            .bind(todo.created_at)
            .bind(todo.updated_at)
            .fetch_optional(&self.db)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(db_err) = &e
                    && db_err.is_unique_violation()
                {
                    return AppError::inconsistency(anyhow!(
                        "Todo {} already exists",
                        todo.todo_id
                    ));
                }
                AppError::database(e)
            })
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryTodoRepository;

#[cfg(any(test, feature = "test-utils"))]
mod memory {
    use std::cmp::Ordering;

    use anyhow::anyhow;
    use async_trait::async_trait;
    use tokio::sync::RwLock;

    use todo_core::{AppError, Filter, OrderBy, QueryOptions, SortDirection};
    use todo_models::{NewTodo, Todo};

    use super::TodoRepository;

    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
    enum Mode {
        #[default]
        Normal,
        /// Every call fails like an unreachable database.
        Unavailable,
        /// Writes succeed without reporting the stored row.
        SilentCreate,
    }

    /// Vec-backed repository evaluating [`QueryOptions`] the way the SQL
    /// implementation renders them.
    #[derive(Debug, Default)]
    pub struct InMemoryTodoRepository {
        todos: RwLock<Vec<Todo>>,
        mode: Mode,
    }

    impl InMemoryTodoRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_todos(todos: Vec<Todo>) -> Self {
            Self {
                todos: RwLock::new(todos),
                mode: Mode::Normal,
            }
        }

        pub fn unavailable() -> Self {
            Self {
                mode: Mode::Unavailable,
                ..Self::default()
            }
        }

        pub fn silent_create() -> Self {
            Self {
                mode: Mode::SilentCreate,
                ..Self::default()
            }
        }

        pub async fn len(&self) -> usize {
            self.todos.read().await.len()
        }

        pub async fn is_empty(&self) -> bool {
            self.todos.read().await.is_empty()
        }

        fn check_available(&self) -> Result<(), AppError> {
            if self.mode == Mode::Unavailable {
                return Err(AppError::database(anyhow!("connection refused")));
            }
            Ok(())
        }
    }

    fn column_value(todo: &Todo, column: &str) -> Option<String> {
        match column {
            "todo_id" => Some(todo.todo_id.to_string()),
            "user_id" => Some(todo.user_id.to_string()),
            "title" => Some(todo.title.clone()),
            _ => None,
        }
    }

    fn matches_all(todo: &Todo, filters: &[Filter]) -> bool {
        filters.iter().all(|filter| {
            column_value(todo, filter.column).is_some_and(|value| filter.matches(&value))
        })
    }

    fn compare(a: &Todo, b: &Todo, order: &[OrderBy]) -> Ordering {
        order
            .iter()
            .map(|order_by| {
                let ordering = match order_by.column {
                    "created_at" => a.created_at.cmp(&b.created_at),
                    "updated_at" => a.updated_at.cmp(&b.updated_at),
                    "title" => a.title.cmp(&b.title),
                    "todo_id" => a.todo_id.cmp(&b.todo_id),
                    _ => Ordering::Equal,
                };
                match order_by.direction {
                    SortDirection::Asc => ordering,
                    SortDirection::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }

    #[async_trait]
    impl TodoRepository for InMemoryTodoRepository {
        async fn count(&self, filters: &[Filter]) -> Result<i64, AppError> {
            self.check_available()?;
            let todos = self.todos.read().await;
            Ok(todos.iter().filter(|t| matches_all(t, filters)).count() as i64)
        }

        async fn find_all(&self, options: &QueryOptions) -> Result<Vec<Todo>, AppError> {
            self.check_available()?;
            let todos = self.todos.read().await;

            let mut matching: Vec<Todo> = todos
                .iter()
                .filter(|t| matches_all(t, &options.filters))
                .cloned()
                .collect();
            matching.sort_by(|a, b| compare(a, b, &options.order));

            let offset = usize::try_from(options.offset).unwrap_or(usize::MAX);
            let limit = usize::try_from(options.limit).unwrap_or(0);

            Ok(matching.into_iter().skip(offset).take(limit).collect())
        }

        async fn create(&self, todo: NewTodo) -> Result<Option<Todo>, AppError> {
            self.check_available()?;

            let mut todos = self.todos.write().await;
            if todos.iter().any(|t| t.todo_id == todo.todo_id) {
                return Err(AppError::inconsistency(anyhow!(
                    "Todo {} already exists",
                    todo.todo_id
                )));
            }

            let todo: Todo = todo.into();
            todos.push(todo.clone());

            match self.mode {
                Mode::SilentCreate => Ok(None),
                _ => Ok(Some(todo)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use todo_core::{OrderBy, SortDirection};
    use uuid::Uuid;

    fn todo(user_id: Uuid, title: &str, minutes_ago: i64) -> Todo {
        let mut new = NewTodo::new(user_id, title.to_string(), Utc::now());
        new.created_at -= Duration::minutes(minutes_ago);
        new.updated_at = new.created_at;
        new.into()
    }

    fn options(filters: Vec<Filter>, limit: i64, offset: i64) -> QueryOptions {
        QueryOptions {
            filters,
            order: vec![
                OrderBy {
                    column: "created_at",
                    direction: SortDirection::Desc,
                },
                OrderBy {
                    column: "todo_id",
                    direction: SortDirection::Desc,
                },
            ],
            limit,
            offset,
        }
    }

    #[test]
    fn test_push_filters_renders_bound_predicates() {
        let user_id = Uuid::new_v4();
        let filters = vec![
            Filter::equals_uuid("user_id", user_id),
            Filter {
                column: "todo_id",
                column_type: ColumnType::Uuid,
                condition: Condition::Contains("ab12".to_string()),
            },
        ];

        let mut query = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM todos");
        push_filters(&mut query, &filters);

        assert_eq!(
            query.sql(),
            "SELECT COUNT(*) FROM todos WHERE user_id = $1 AND CAST(todo_id AS TEXT) ILIKE $2"
        );
    }

    #[test]
    fn test_push_order_renders_every_column() {
        let mut query = QueryBuilder::<Postgres>::new("SELECT 1");
        push_order(&mut query, &options(vec![], 10, 0).order);
        assert_eq!(query.sql(), "SELECT 1 ORDER BY created_at DESC, todo_id DESC");
    }

    #[tokio::test]
    async fn test_memory_count_ignores_window() {
        let user_id = Uuid::new_v4();
        let repo = InMemoryTodoRepository::with_todos(
            (0..5)
                .map(|i| todo(user_id, "some todo", i))
                .collect(),
        );
        let filters = vec![Filter::equals_uuid("user_id", user_id)];

        assert_eq!(repo.count(&filters).await.unwrap(), 5);
        let page = repo.find_all(&options(filters, 2, 0)).await.unwrap();
        assert_eq!(page.len(), 2);
    }

    #[tokio::test]
    async fn test_memory_orders_newest_first() {
        let user_id = Uuid::new_v4();
        let oldest = todo(user_id, "oldest todo", 30);
        let newest = todo(user_id, "newest todo", 1);
        let repo = InMemoryTodoRepository::with_todos(vec![oldest.clone(), newest.clone()]);

        let found = repo
            .find_all(&options(vec![Filter::equals_uuid("user_id", user_id)], 10, 0))
            .await
            .unwrap();
        assert_eq!(found, vec![newest, oldest]);
    }

    #[tokio::test]
    async fn test_memory_offset_past_end_is_empty() {
        let user_id = Uuid::new_v4();
        let repo = InMemoryTodoRepository::with_todos(vec![todo(user_id, "only todo", 0)]);

        let found = repo.find_all(&options(vec![], 10, 5)).await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_memory_rejects_duplicate_id() {
        let repo = InMemoryTodoRepository::new();
        let new = NewTodo::new(Uuid::new_v4(), "Buy milk".to_string(), Utc::now());

        assert!(repo.create(new.clone()).await.unwrap().is_some());
        let err = repo.create(new).await.unwrap_err();
        assert_eq!(err.kind, todo_core::ErrorKind::InternalInconsistency);
    }

    #[tokio::test]
    async fn test_memory_unavailable() {
        let repo = InMemoryTodoRepository::unavailable();
        let err = repo.count(&[]).await.unwrap_err();
        assert_eq!(err.kind, todo_core::ErrorKind::PersistenceError);
    }
}
