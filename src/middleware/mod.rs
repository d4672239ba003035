//! Request pipeline stages.
//!
//! Each stage is an axum extractor. Extractors run in the order they appear in
//! a handler's argument list, and the first rejection short-circuits the
//! request: later stages and the handler body never run.
//!
//! # Modules
//!
//! - [`auth`]: bearer token verification into the caller's identity
//! - [`pagination`]: query-string parsing into a [`PaginationRequest`]
//!
//! Body validation lives in [`crate::validator`].
//!
//! # Example
//!
//! ```ignore
//! use crate::middleware::{auth::AuthUser, pagination::ValidatedPagination};
//!
//! // 401 is returned before the query string is even looked at
//! async fn list(
//!     auth_user: AuthUser,
//!     ValidatedPagination(request): ValidatedPagination,
//! ) -> Result<Json<ListTodosResponse>, AppError> {
//!     // ...
//! }
//! ```
//!
//! [`PaginationRequest`]: todo_core::PaginationRequest

pub mod auth;
pub mod pagination;
