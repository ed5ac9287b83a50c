use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use mongodb::bson;
use serde::Serialize;
use thiserror::Error;

/// Failures raised by a [`PrefixStore`](crate::search::PrefixStore).
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("mongodb error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("failed to decode record: {0}")]
    Decode(#[from] bson::de::Error),

    #[error("failed to encode record: {0}")]
    Encode(#[from] bson::ser::Error),

    #[error("record in `{collection}` has no string field `{field}`")]
    MissingField {
        collection: &'static str,
        field: &'static str,
    },

    #[error("record {id} in `{collection}` has out-of-range date `{field}`")]
    DateOutOfRange {
        collection: &'static str,
        field: &'static str,
        id: String,
    },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Search text cannot be empty")]
    EmptySearchText,

    #[error("backend unavailable: {0}")]
    BackendUnavailable(#[from] StoreError),
}

/// Error returned by HTTP handlers, rendered as `{ "error": message }`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Internal(&'static str),

    #[error("{0}")]
    NotFound(String),
}

impl ApiError {
    /// Maps a search failure onto the HTTP surface. Backend causes are never
    /// sent to the client, only `failure_message`.
    pub fn from_search(err: SearchError, failure_message: &'static str) -> Self {
        match err {
            SearchError::EmptySearchText => ApiError::BadRequest(err.to_string()),
            SearchError::BackendUnavailable(_) => ApiError::Internal(failure_message),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
        };

        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
