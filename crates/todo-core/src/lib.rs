//! # Todo Core
//!
//! Core types, errors, and query utilities for the Todo API.
//!
//! - [`errors`]: Application error type with HTTP response conversion
//! - [`pagination`]: Parsing of paging, ordering and filter query parameters
//! - [`query_options`]: Whitelist-driven translation of a list request into
//!   query options
//!
//! # Example
//!
//! ```ignore
//! use todo_core::{AppError, PaginationRequest, build_query_options};
//!
//! let request = PaginationRequest::from_query_pairs(pairs)?;
//! let options = build_query_options(&request, &TODO_LIST_SPEC, scope)?;
//! ```

pub mod errors;
pub mod pagination;
pub mod query_options;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ErrorResponse, FieldErrors};
pub use pagination::{PaginationRequest, SortDirection};
pub use query_options::{
    ColumnType, Condition, Filter, FilterColumn, FilterValue, ListSpec, MatchStrategy, OrderBy,
    QueryOptions, Scope, build_query_options,
};
