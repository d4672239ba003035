//! # Todo Auth
//!
//! Bearer token handling for the Todo API.
//!
//! Token issuance belongs to an external identity system; this crate verifies
//! the HS256 access tokens it produces and resolves them into the caller's
//! `user_id`. [`create_access_token`] exists for tests and the developer CLI.
//!
//! - [`claims`]: JWT claim structure
//! - [`jwt`]: token creation and verification
//!
//! # Example
//!
//! ```ignore
//! use todo_auth::{create_access_token, verify_token};
//! use todo_config::JwtConfig;
//!
//! let config = JwtConfig::from_env();
//! let token = create_access_token(user_id, &config)?;
//!
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.user_id()?, user_id);
//! ```

pub mod claims;
pub mod jwt;

// Re-export commonly used types at crate root
pub use claims::Claims;
pub use jwt::{create_access_token, verify_token};
