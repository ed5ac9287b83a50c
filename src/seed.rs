use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::data_models::{Content, NewContent, NewUser, User};
use crate::db::{ContentRepo, Database, UserRepo, collections};
use crate::search::InMemoryStore;

/// JSON seed file: `{ "users": [...], "contents": [...] }`.
#[derive(Debug, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub users: Vec<NewUser>,
    #[serde(default)]
    pub contents: Vec<NewContent>,
}

impl SeedFile {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::parse(&raw).with_context(|| format!("Invalid seed file {}", path.display()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn into_memory(self, store: &InMemoryStore) -> Result<()> {
        let users: Vec<User> = self.users.into_iter().map(User::from).collect();
        let contents: Vec<Content> = self.contents.into_iter().map(Content::from).collect();

        store.insert_many(collections::USERS, &users)?;
        store.insert_many(collections::CONTENTS, &contents)?;
        log::info!(
            "Seeded in-memory store with {} users and {} contents",
            users.len(),
            contents.len()
        );
        Ok(())
    }

    pub async fn into_mongo(self, db: &Database) -> Result<()> {
        let users = UserRepo::new(db);
        let contents = ContentRepo::new(db);
        users.ensure_indexes().await?;
        contents.ensure_indexes().await?;

        let user_ids = users.insert_many(self.users).await?;
        let content_ids = contents.insert_many(self.contents).await?;
        log::info!(
            "Seeded MongoDB with {} users and {} contents",
            user_ids.len(),
            content_ids.len()
        );
        Ok(())
    }
}
