//! Translation of a [`PaginationRequest`] into concrete query options.
//!
//! A list endpoint declares which columns callers may filter and sort on via a
//! [`ListSpec`]. [`build_query_options`] combines that whitelist, the parsed
//! request and a mandatory [`Scope`] into [`QueryOptions`]: a list of
//! predicates, an ordering and the page window. Repositories render the
//! options into SQL or evaluate them in memory.
//!
//! The scope predicate is always the first filter, so a caller-supplied filter
//! on the same column can only narrow the result, never widen it.

use uuid::Uuid;

use crate::errors::{AppError, FieldErrors};
use crate::pagination::{PaginationRequest, SortDirection};

/// Declared value type of a filterable column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Uuid,
    Text,
}

/// How a filter value is compared against the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchStrategy {
    Exact,
    Like,
}

/// A whitelisted filter column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterColumn {
    pub name: &'static str,
    pub column_type: ColumnType,
    pub strategy: MatchStrategy,
}

impl FilterColumn {
    pub const fn like(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            strategy: MatchStrategy::Like,
        }
    }

    pub const fn exact(name: &'static str, column_type: ColumnType) -> Self {
        Self {
            name,
            column_type,
            strategy: MatchStrategy::Exact,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterValue {
    Uuid(Uuid),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Condition {
    Equals(FilterValue),
    /// Case-insensitive substring match on the raw needle.
    Contains(String),
}

/// A single `WHERE` predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Filter {
    pub column: &'static str,
    pub column_type: ColumnType,
    pub condition: Condition,
}

impl Filter {
    pub fn equals_uuid(column: &'static str, value: Uuid) -> Self {
        Self {
            column,
            column_type: ColumnType::Uuid,
            condition: Condition::Equals(FilterValue::Uuid(value)),
        }
    }

    /// Evaluates the predicate against the textual form of a column value.
    pub fn matches(&self, candidate: &str) -> bool {
        match &self.condition {
            Condition::Equals(FilterValue::Uuid(id)) => {
                Uuid::parse_str(candidate).is_ok_and(|c| c == *id)
            }
            Condition::Equals(FilterValue::Text(text)) => candidate == text,
            Condition::Contains(needle) => candidate
                .to_lowercase()
                .contains(needle.to_lowercase().as_str()),
        }
    }

    /// `ILIKE` pattern for [`Condition::Contains`], with wildcards escaped.
    pub fn like_pattern(&self) -> Option<String> {
        match &self.condition {
            Condition::Contains(needle) => Some(format!("%{}%", escape_like(needle))),
            Condition::Equals(_) => None,
        }
    }
}

fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderBy {
    pub column: &'static str,
    pub direction: SortDirection,
}

/// What a list endpoint allows callers to filter and sort on.
#[derive(Debug, Clone, Copy)]
pub struct ListSpec {
    pub filter_columns: &'static [FilterColumn],
    pub sort_columns: &'static [&'static str],
    pub default_order: OrderBy,
    /// Unique column appended to every ordering so pages are stable.
    pub tiebreaker: &'static str,
}

/// Mandatory equality constraint applied to every list query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scope {
    pub column: &'static str,
    pub value: Uuid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryOptions {
    pub filters: Vec<Filter>,
    pub order: Vec<OrderBy>,
    pub limit: i64,
    pub offset: i64,
}

/// Builds query options for a list request.
///
/// Filter keys outside `spec.filter_columns` are ignored. Values that do not
/// fit the column's declared type, and sort columns outside
/// `spec.sort_columns`, are rejected with a validation error.
pub fn build_query_options(
    request: &PaginationRequest,
    spec: &ListSpec,
    scope: Scope,
) -> Result<QueryOptions, AppError> {
    let mut errors = FieldErrors::new();
    let mut filters = vec![Filter::equals_uuid(scope.column, scope.value)];

    for column in spec.filter_columns {
        let Some(raw) = request.filters.get(column.name) else {
            continue;
        };

        match parse_condition(column, raw) {
            Ok(condition) => filters.push(Filter {
                column: column.name,
                column_type: column.column_type,
                condition,
            }),
            Err(message) => errors
                .entry(column.name.to_string())
                .or_default()
                .push(message),
        }
    }

    let mut primary = spec.default_order;
    if let Some(sort_by) = request.sort_by.as_deref() {
        match spec.sort_columns.iter().find(|c| **c == sort_by) {
            Some(column) => primary.column = *column,
            None => errors.entry("sort_by".to_string()).or_default().push(format!(
                "sort_by must be one of: {}",
                spec.sort_columns.join(", ")
            )),
        }
    }
    if let Some(direction) = request.order {
        primary.direction = direction;
    }

    if !errors.is_empty() {
        return Err(AppError::from_fields(errors));
    }

    let mut order = vec![primary];
    if primary.column != spec.tiebreaker {
        order.push(OrderBy {
            column: spec.tiebreaker,
            direction: primary.direction,
        });
    }

    Ok(QueryOptions {
        filters,
        order,
        limit: request.limit(),
        offset: request.offset(),
    })
}

fn parse_condition(column: &FilterColumn, raw: &str) -> Result<Condition, String> {
    match (column.strategy, column.column_type) {
        (MatchStrategy::Exact, ColumnType::Uuid) => Uuid::parse_str(raw)
            .map(|id| Condition::Equals(FilterValue::Uuid(id)))
            .map_err(|_| format!("{} must be a valid UUID", column.name)),
        (MatchStrategy::Exact, ColumnType::Text) => {
            Ok(Condition::Equals(FilterValue::Text(raw.to_string())))
        }
        (MatchStrategy::Like, ColumnType::Uuid) => {
            if raw.chars().all(|c| c.is_ascii_hexdigit() || c == '-') {
                Ok(Condition::Contains(raw.to_string()))
            } else {
                Err(format!(
                    "{} may only contain hexadecimal digits and '-'",
                    column.name
                ))
            }
        }
        (MatchStrategy::Like, ColumnType::Text) => Ok(Condition::Contains(raw.to_string())),
    }
}
