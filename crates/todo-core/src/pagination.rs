//! Pagination and filter request parsing.
//!
//! A list endpoint receives its paging, ordering and filter input as raw
//! query-string pairs. [`PaginationRequest::from_query_pairs`] turns those
//! pairs into a structured request, rejecting malformed values instead of
//! guessing what the caller meant.
//!
//! # Parameters
//!
//! - `limit` (alias `size`): items per page, 1-100, default 10
//! - `page`: page number, 1-indexed; takes precedence over `offset`
//! - `offset`: number of items to skip, default 0
//! - `sort_by`: column to order by (checked later against the list's whitelist)
//! - `order`: `asc` or `desc`
//!
//! Every other key is kept as a candidate filter. Empty values are treated as
//! absent.
//!
//! # Example
//!
//! ```ignore
//! // GET /todo/listTodos?limit=20&page=3&todo_id=3fa8
//! let request = PaginationRequest::from_query_pairs(pairs)?;
//!
//! assert_eq!(request.limit(), 20);
//! assert_eq!(request.offset(), 40); // (page - 1) * limit
//! assert_eq!(request.filters["todo_id"], "3fa8");
//! ```

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::errors::{AppError, FieldErrors};

pub const DEFAULT_LIMIT: i64 = 10;
pub const MAX_LIMIT: i64 = 100;

/// Direction of an ordering clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "asc" => Ok(SortDirection::Asc),
            "desc" => Ok(SortDirection::Desc),
            _ => Err("order must be either asc or desc".to_string()),
        }
    }
}

/// Structured paging, ordering and filter input of a list request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationRequest {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub page: Option<i64>,
    pub sort_by: Option<String>,
    pub order: Option<SortDirection>,
    /// Remaining query keys; only whitelisted ones are ever applied.
    pub filters: BTreeMap<String, String>,
}

impl PaginationRequest {
    /// Parses raw query pairs, collecting every invalid field before failing.
    pub fn from_query_pairs<I, K, V>(pairs: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut request = PaginationRequest::default();
        let mut errors = FieldErrors::new();

        for (key, value) in pairs {
            let key: String = key.into();
            let value: String = value.into();
            let value = value.trim();

            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "limit" | "size" => {
                    request.limit = parse_bounded(&mut errors, "limit", value, 1, MAX_LIMIT)
                }
                "page" => request.page = parse_bounded(&mut errors, "page", value, 1, i64::MAX),
                "offset" => {
                    request.offset = parse_bounded(&mut errors, "offset", value, 0, i64::MAX)
                }
                "sort_by" => request.sort_by = Some(value.to_string()),
                "order" => match value.parse::<SortDirection>() {
                    Ok(direction) => request.order = Some(direction),
                    Err(message) => errors.entry("order".to_string()).or_default().push(message),
                },
                _ => {
                    request.filters.insert(key, value.to_string());
                }
            }
        }

        if !errors.is_empty() {
            return Err(AppError::from_fields(errors));
        }

        Ok(request)
    }

    /// Effective page size.
    #[must_use]
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    /// Effective number of skipped rows, derived from `page` when present.
    #[must_use]
    pub fn offset(&self) -> i64 {
        match self.page {
            Some(page) => (page - 1).saturating_mul(self.limit()),
            None => self.offset.unwrap_or(0),
        }
    }
}

fn parse_bounded(
    errors: &mut FieldErrors,
    field: &str,
    value: &str,
    min: i64,
    max: i64,
) -> Option<i64> {
    let message = match value.parse::<i64>() {
        Ok(n) if n >= min && n <= max => return Some(n),
        Ok(_) if max == i64::MAX => format!("{} must be at least {}", field, min),
        Ok(_) => format!("{} must be between {} and {}", field, min, max),
        Err(_) => format!("{} must be an integer", field),
    };

    errors.entry(field.to_string()).or_default().push(message);
    None
}
