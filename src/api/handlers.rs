use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::{Method, Uri},
};
use std::sync::Arc;

use crate::error::ApiError;
use crate::search::{ResultPage, SearchService};

use super::models::{
    CombinedSearchParams, CombinedSearchResponse, ContentResult, ContentSearchParams,
    HealthResponse, SearchResponse, SearchType, UserResult, UserSearchParams,
};

pub async fn search_users_handler(
    State(search): State<Arc<SearchService>>,
    params: Result<Query<UserSearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse<UserResult>>, ApiError> {
    let Query(params) = params?;
    let text = params.search_text.unwrap_or_default();
    log::info!("Searching for users that match the following: {text}");

    let page = search
        .users
        .search(&text, params.user_starting_point.as_deref())
        .await
        .map_err(|e| {
            log::error!("Error searching users: {e:#}");
            ApiError::from_search(e, "Failed to search users")
        })?;

    log::info!("Next starting point: {:?}", page.next_cursor);
    Ok(Json(page.into()))
}

pub async fn search_content_handler(
    State(search): State<Arc<SearchService>>,
    params: Result<Query<ContentSearchParams>, QueryRejection>,
) -> Result<Json<SearchResponse<ContentResult>>, ApiError> {
    let Query(params) = params?;
    let text = params.search_text.unwrap_or_default();
    log::info!("Searching for content that matches the following: {text}");

    let page = search
        .contents
        .search(&text, params.content_starting_point.as_deref())
        .await
        .map_err(|e| {
            log::error!("Error searching content: {e:#}");
            ApiError::from_search(e, "Failed to search content")
        })?;

    Ok(Json(page.into()))
}

/// First page of users and/or content for one search text.
pub async fn search_handler(
    State(search): State<Arc<SearchService>>,
    params: Result<Query<CombinedSearchParams>, QueryRejection>,
) -> Result<Json<CombinedSearchResponse>, ApiError> {
    let Query(params) = params?;
    let text = params.search_text.unwrap_or_default();
    let search_type = params.search_type;
    log::info!("Searching {search_type:?} for: {text}");

    let users = async {
        match search_type {
            SearchType::Users | SearchType::All => search.users.search(&text, None).await,
            SearchType::Content => Ok(ResultPage::empty()),
        }
    };
    let contents = async {
        match search_type {
            SearchType::Content | SearchType::All => search.contents.search(&text, None).await,
            SearchType::Users => Ok(ResultPage::empty()),
        }
    };

    let (users, contents) = tokio::try_join!(users, contents).map_err(|e| {
        log::error!("Error searching {search_type:?}: {e:#}");
        ApiError::from_search(e, "Failed to search")
    })?;

    Ok(Json(CombinedSearchResponse {
        users: users.documents,
        content: contents.documents,
        next_user_starting_point: users.next_cursor,
        next_content_starting_point: contents.next_cursor,
    }))
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

pub async fn not_found_handler(method: Method, uri: Uri) -> ApiError {
    ApiError::NotFound(format!("Cannot {} {}", method, uri.path()))
}
