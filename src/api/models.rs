use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::data_models::{Content, User};
use crate::db::collections;
use crate::error::StoreError;
use crate::search::ResultPage;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchParams {
    pub search_text: Option<String>,
    pub user_starting_point: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentSearchParams {
    pub search_text: Option<String>,
    pub content_starting_point: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    Users,
    Content,
    #[default]
    All,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSearchParams {
    pub search_text: Option<String>,
    #[serde(default)]
    pub search_type: SearchType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse<P> {
    pub documents: Vec<P>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_starting_point: Option<String>,
}

impl<P> From<ResultPage<P>> for SearchResponse<P> {
    fn from(page: ResultPage<P>) -> Self {
        SearchResponse {
            documents: page.documents,
            next_starting_point: page.next_cursor,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedSearchResponse {
    pub users: Vec<UserResult>,
    pub content: Vec<ContentResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_user_starting_point: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_content_starting_point: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResult {
    pub id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl From<User> for UserResult {
    fn from(user: User) -> Self {
        UserResult {
            id: user.id.to_hex(),
            username: user.username,
            profile_image: user.profile_image,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentResult {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub creator_id: String,
    pub date_created: DateTime<Utc>,
}

impl TryFrom<Content> for ContentResult {
    type Error = StoreError;

    /// Fails when the stored date lies outside chrono's representable range.
    fn try_from(content: Content) -> Result<Self, Self::Error> {
        let date_created =
            DateTime::from_timestamp_millis(content.date_created.timestamp_millis()).ok_or_else(
                || StoreError::DateOutOfRange {
                    collection: collections::CONTENTS,
                    field: "date_created",
                    id: content.id.to_hex(),
                },
            )?;

        Ok(ContentResult {
            id: content.id.to_hex(),
            title: content.title,
            summary: content.summary,
            creator_id: content.creator_id,
            date_created,
        })
    }
}
