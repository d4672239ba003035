//! JSON body extraction with validation.
//!
//! [`ValidatedJson`] deserializes the body and runs `validator` rules on it.
//! Every failure becomes a 400 validation error carrying the offending field.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use todo_core::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        value.validate().map_err(AppError::validation)?;

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        return AppError::bad_request(anyhow!("Missing 'Content-Type: application/json' header"));
    }

    let error_msg = rejection.body_text();

    if error_msg.contains("missing field") {
        let field = error_msg
            .split("missing field `")
            .nth(1)
            .and_then(|s| s.split('`').next())
            .unwrap_or("unknown");
        return AppError::invalid_field(field, format!("{} is required", field));
    }

    if error_msg.contains("invalid type") {
        // "...target type: title: invalid type: ..."; the path is absent at the root
        let detail = error_msg
            .split_once("target type: ")
            .map_or(error_msg.as_str(), |(_, rest)| rest);
        let field = detail
            .split_once(": invalid type")
            .map(|(path, _)| path)
            .filter(|path| !path.is_empty())
            .unwrap_or("body");
        return AppError::invalid_field(field, "Invalid field type in request");
    }

    AppError::bad_request(anyhow!("Invalid request body"))
}
