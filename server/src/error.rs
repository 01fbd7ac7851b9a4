//! Request-level errors and their HTTP translation.
//!
//! Every failure a handler can hit ends up here and becomes a short
//! plain-text response. Nothing propagates past the handler boundary.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use todo_core::CollectionError;

use crate::store::StoreError;

/// Which mutation failed to persist; picks the 500 message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    fn failure_message(self) -> &'static str {
        match self {
            Mutation::Create => "Error saving todo",
            Mutation::Update => "Error updating todo",
            Mutation::Delete => "Error deleting todo",
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request body is not valid JSON")]
    InvalidJson,

    #[error("missing title")]
    MissingTitle,

    #[error("todo not found")]
    NotFound,

    #[error("no route for request")]
    RouteNotFound,

    #[error("no ids left to assign")]
    IdsExhausted,

    #[error("failed to persist {action:?}: {source}")]
    Persistence {
        action: Mutation,
        #[source]
        source: StoreError,
    },
}

impl From<CollectionError> for ApiError {
    fn from(err: CollectionError) -> Self {
        match err {
            CollectionError::MissingTitle => ApiError::MissingTitle,
            CollectionError::NotFound => ApiError::NotFound,
            CollectionError::IdsExhausted => ApiError::IdsExhausted,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::InvalidJson => (StatusCode::BAD_REQUEST, "Invalid JSON"),
            ApiError::MissingTitle => (StatusCode::BAD_REQUEST, "Missing title"),
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Todo not found"),
            ApiError::RouteNotFound => (StatusCode::NOT_FOUND, "Route not found"),
            ApiError::IdsExhausted => {
                tracing::error!("cannot create todo: highest id already in use");
                (StatusCode::INTERNAL_SERVER_ERROR, Mutation::Create.failure_message())
            }
            ApiError::Persistence { action, .. } => {
                tracing::error!(error = %self, "persisting todos failed");
                (StatusCode::INTERNAL_SERVER_ERROR, action.failure_message())
            }
        };
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_errors_map_to_api_errors() {
        assert!(matches!(ApiError::from(CollectionError::MissingTitle), ApiError::MissingTitle));
        assert!(matches!(ApiError::from(CollectionError::NotFound), ApiError::NotFound));
        assert!(matches!(ApiError::from(CollectionError::IdsExhausted), ApiError::IdsExhausted));
    }

    #[test]
    fn statuses() {
        assert_eq!(ApiError::InvalidJson.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::MissingTitle.into_response().status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::RouteNotFound.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::IdsExhausted.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
        let err = ApiError::Persistence {
            action: Mutation::Delete,
            source: StoreError::Io(std::io::Error::other("disk full")),
        };
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn persistence_messages_name_the_action() {
        assert_eq!(Mutation::Create.failure_message(), "Error saving todo");
        assert_eq!(Mutation::Update.failure_message(), "Error updating todo");
        assert_eq!(Mutation::Delete.failure_message(), "Error deleting todo");
    }
}
