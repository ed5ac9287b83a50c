use mongodb::bson::{DateTime, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::api::models::{ContentResult, UserResult};
use crate::db::collections;
use crate::error::StoreResult;
use crate::search::Searchable;
use crate::search::query::normalize;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub username: String,
    #[serde(rename = "usernameLower")]
    pub username_lower: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub created_at: DateTime,
}

impl User {
    pub fn new(username: String) -> User {
        User {
            id: ObjectId::new(),
            username_lower: normalize(&username),
            username,
            first_name: None,
            last_name: None,
            profile_image: None,
            created_at: DateTime::now(),
        }
    }
}

/// User fields accepted on registration and in seed files.
#[derive(Deserialize, Debug, Clone)]
pub struct NewUser {
    pub username: String,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub profile_image: Option<String>,
}

impl From<NewUser> for User {
    fn from(new: NewUser) -> Self {
        User {
            first_name: new.first_name,
            last_name: new.last_name,
            profile_image: new.profile_image,
            ..User::new(new.username)
        }
    }
}

impl Searchable for User {
    const COLLECTION: &'static str = collections::USERS;
    const INDEXED_FIELD: &'static str = "usernameLower";
    type Projection = UserResult;

    fn project(self) -> StoreResult<UserResult> {
        Ok(self.into())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Content {
    #[serde(rename = "_id")]
    pub id: ObjectId,

    pub creator_id: String,
    pub title: String,
    #[serde(rename = "titleLower")]
    pub title_lower: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: String,
    pub date_created: DateTime,
}

impl Content {
    pub fn new(creator_id: String, title: String, content: String) -> Content {
        Content {
            id: ObjectId::new(),
            creator_id,
            title_lower: normalize(&title),
            title,
            summary: None,
            content,
            date_created: DateTime::now(),
        }
    }
}

/// Content fields accepted on creation and in seed files.
#[derive(Deserialize, Debug, Clone)]
pub struct NewContent {
    pub creator_id: String,
    pub title: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub content: String,
}

impl From<NewContent> for Content {
    fn from(new: NewContent) -> Self {
        Content {
            summary: new.summary,
            ..Content::new(new.creator_id, new.title, new.content)
        }
    }
}

impl Searchable for Content {
    const COLLECTION: &'static str = collections::CONTENTS;
    const INDEXED_FIELD: &'static str = "titleLower";
    type Projection = ContentResult;

    fn project(self) -> StoreResult<ContentResult> {
        ContentResult::try_from(self)
    }
}
