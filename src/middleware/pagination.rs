use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};

use todo_core::{AppError, PaginationRequest};

/// Extractor that parses paging, ordering and filter parameters.
///
/// Unlike `Query<T>`, malformed values are reported field by field instead of
/// failing with a generic deserialization message.
#[derive(Debug, Clone)]
pub struct ValidatedPagination(pub PaginationRequest);

impl<S> FromRequestParts<S> for ValidatedPagination
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Query(pairs) = Query::<Vec<(String, String)>>::try_from_uri(&parts.uri)
            .map_err(|_| AppError::bad_request(anyhow::anyhow!("Invalid query string")))?;

        let request = PaginationRequest::from_query_pairs(pairs)?;

        Ok(ValidatedPagination(request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;
    use todo_core::ErrorKind;

    async fn extract(uri: &str) -> Result<PaginationRequest, AppError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ValidatedPagination::from_request_parts(&mut parts, &())
            .await
            .map(|ValidatedPagination(request)| request)
    }

    #[tokio::test]
    async fn test_no_query_uses_defaults() {
        let request = extract("/todo/listTodos").await.unwrap();
        assert_eq!(request, PaginationRequest::default());
    }

    #[tokio::test]
    async fn test_parses_pairs() {
        let request = extract("/todo/listTodos?page=2&size=5&todo_id=ab%2D12")
            .await
            .unwrap();
        assert_eq!(request.limit(), 5);
        assert_eq!(request.offset(), 5);
        assert_eq!(request.filters["todo_id"], "ab-12");
    }

    #[tokio::test]
    async fn test_rejects_malformed_limit() {
        let err = extract("/todo/listTodos?limit=lots").await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::ValidationError);
        assert!(err.fields.contains_key("limit"));
    }
}
