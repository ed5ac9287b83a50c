use anyhow::{Context, Result};
use mongodb::options::ClientOptions;
use mongodb::{
    Client, Collection, Database as MongoDatabase, IndexModel,
    bson::{Document, doc, oid::ObjectId},
};
use serde::{Serialize, de::DeserializeOwned};

use crate::config::CONFIG;
use crate::data_models::{Content, NewContent, NewUser, User};
use crate::search::Searchable;
use crate::search::query::normalize;

/// Collection names as constants for consistency
pub mod collections {
    pub const USERS: &str = "users";
    pub const CONTENTS: &str = "contents";
}

/// Main database wrapper providing connection management and collection access
#[derive(Debug, Clone)]
pub struct Database {
    client: Client,
    db: MongoDatabase,
}

impl Database {
    /// Create a new Database instance with custom URI and database name.
    /// Useful for testing with a different database.
    pub async fn new(uri: &str, db_name: &str) -> Result<Self> {
        let client_options = ClientOptions::parse(uri)
            .await
            .context("Failed to parse MongoDB connection string")?;

        let client =
            Client::with_options(client_options).context("Failed to create MongoDB client")?;

        // Ping the database to verify connection
        client
            .database("admin")
            .run_command(doc! { "ping": 1 })
            .await
            .context("Failed to connect to MongoDB")?;

        log::info!("Connected to MongoDB database: {}", db_name);

        let db = client.database(db_name);

        Ok(Self { client, db })
    }

    /// Create a Database instance using environment configuration
    pub async fn from_config() -> Result<Self> {
        Self::new(CONFIG.mongo_uri()?, &CONFIG.mongo_db_name).await
    }

    /// Get a typed collection by name
    pub fn collection<T>(&self, name: &str) -> Collection<T>
    where
        T: Send + Sync,
    {
        self.db.collection(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn users(&self) -> Collection<User> {
        self.collection(collections::USERS)
    }

    pub fn contents(&self) -> Collection<Content> {
        self.collection(collections::CONTENTS)
    }
}

// =============================================================================
// Generic CRUD operations
// =============================================================================

pub struct Repository<T>
where
    T: Send + Sync,
{
    collection: Collection<T>,
}

impl<T> Repository<T>
where
    T: Serialize + DeserializeOwned + Unpin + Send + Sync,
{
    pub fn new(collection: Collection<T>) -> Self {
        Self { collection }
    }

    /// Insert a single document
    pub async fn insert(&self, doc: &T) -> Result<ObjectId> {
        let result = self
            .collection
            .insert_one(doc)
            .await
            .context("Failed to insert document")?;

        result
            .inserted_id
            .as_object_id()
            .ok_or_else(|| anyhow::anyhow!("Failed to get inserted ObjectId"))
    }

    /// Insert multiple documents
    pub async fn insert_many(&self, docs: &[T]) -> Result<Vec<ObjectId>> {
        if docs.is_empty() {
            return Ok(Vec::new());
        }

        let result = self
            .collection
            .insert_many(docs)
            .await
            .context("Failed to insert documents")?;

        Ok(result
            .inserted_ids
            .values()
            .filter_map(|id| id.as_object_id())
            .collect())
    }

    /// Find a document by ObjectId
    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<T>> {
        let filter = doc! { "_id": id };
        self.collection
            .find_one(filter)
            .await
            .context("Failed to find document by id")
    }

    /// Find a single document matching a filter
    pub async fn find_one(&self, filter: Document) -> Result<Option<T>> {
        self.collection
            .find_one(filter)
            .await
            .context("Failed to find document")
    }

    /// Create an ascending index on the entity's search field.
    pub async fn ensure_search_index(&self) -> Result<()>
    where
        T: Searchable,
    {
        let mut keys = Document::new();
        keys.insert(T::INDEXED_FIELD, 1);

        self.collection
            .create_index(IndexModel::builder().keys(keys).build())
            .await
            .with_context(|| format!("Failed to index {}.{}", T::COLLECTION, T::INDEXED_FIELD))?;

        log::info!("Ensured index on {}.{}", T::COLLECTION, T::INDEXED_FIELD);
        Ok(())
    }
}

// =============================================================================
// User-specific operations
// =============================================================================

/// Writes users with `usernameLower` derived from `username`.
pub struct UserRepo {
    repo: Repository<User>,
}

impl UserRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            repo: Repository::new(db.users()),
        }
    }

    pub async fn insert(&self, user: NewUser) -> Result<ObjectId> {
        self.repo.insert(&User::from(user)).await
    }

    pub async fn insert_many(&self, users: Vec<NewUser>) -> Result<Vec<ObjectId>> {
        let users: Vec<User> = users.into_iter().map(User::from).collect();
        self.repo.insert_many(&users).await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<User>> {
        self.repo.find_by_id(id).await
    }

    /// Case-insensitive exact lookup through the normalized field.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        self.repo
            .find_one(doc! { "usernameLower": normalize(username) })
            .await
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        self.repo.ensure_search_index().await
    }
}

// =============================================================================
// Content-specific operations
// =============================================================================

/// Writes content with `titleLower` derived from `title`.
pub struct ContentRepo {
    repo: Repository<Content>,
}

impl ContentRepo {
    pub fn new(db: &Database) -> Self {
        Self {
            repo: Repository::new(db.contents()),
        }
    }

    pub async fn insert(&self, content: NewContent) -> Result<ObjectId> {
        self.repo.insert(&Content::from(content)).await
    }

    pub async fn insert_many(&self, contents: Vec<NewContent>) -> Result<Vec<ObjectId>> {
        let contents: Vec<Content> = contents.into_iter().map(Content::from).collect();
        self.repo.insert_many(&contents).await
    }

    pub async fn find_by_id(&self, id: ObjectId) -> Result<Option<Content>> {
        self.repo.find_by_id(id).await
    }

    pub async fn ensure_indexes(&self) -> Result<()> {
        self.repo.ensure_search_index().await
    }
}

// =============================================================================
// Test utilities
// =============================================================================

#[cfg(test)]
pub mod test_utils {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEST_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

    /// Create a unique test database name
    pub fn unique_test_db_name() -> String {
        let count = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis();
        format!("summarizz_test_{}_{}", timestamp, count)
    }

    /// Create a test database instance.
    /// Uses MONGO_URI from environment but creates a unique test database.
    pub async fn create_test_db() -> Result<(Database, String)> {
        dotenvy::dotenv().ok();
        let uri =
            std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = unique_test_db_name();
        let db = Database::new(&uri, &db_name).await?;
        Ok((db, db_name))
    }

    /// Clean up a test database by dropping it
    pub async fn cleanup_test_db(db: &Database, db_name: &str) -> Result<()> {
        db.client()
            .database(db_name)
            .drop()
            .await
            .context("Failed to drop test database")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_utils::*;

    #[tokio::test]
    #[ignore = "requires a running MongoDB at MONGO_URI"]
    async fn test_user_crud() -> Result<()> {
        let (db, db_name) = create_test_db().await?;
        let repo = UserRepo::new(&db);

        let id = repo
            .insert(NewUser {
                username: "AliceW".to_string(),
                first_name: Some("Alice".to_string()),
                last_name: None,
                profile_image: None,
            })
            .await?;

        let found = repo.find_by_id(id).await?;
        assert_eq!(found.unwrap().username_lower, "alicew");

        let by_name = repo.find_by_username("ALICEW").await?;
        assert_eq!(by_name.map(|u| u.id), Some(id));

        assert!(repo.find_by_username("bob").await?.is_none());

        repo.ensure_indexes().await?;

        cleanup_test_db(&db, &db_name).await?;
        Ok(())
    }

    #[tokio::test]
    #[ignore = "requires a running MongoDB at MONGO_URI"]
    async fn test_content_insert_many() -> Result<()> {
        let (db, db_name) = create_test_db().await?;
        let repo = ContentRepo::new(&db);

        let ids = repo
            .insert_many(vec![
                NewContent {
                    creator_id: "u1".to_string(),
                    title: "Rust Lifetimes".to_string(),
                    summary: None,
                    content: "...".to_string(),
                },
                NewContent {
                    creator_id: "u2".to_string(),
                    title: "Async Rust".to_string(),
                    summary: Some("tokio".to_string()),
                    content: "...".to_string(),
                },
            ])
            .await?;
        assert_eq!(ids.len(), 2);

        let first = repo.find_by_id(ids[0]).await?.unwrap();
        assert_eq!(first.title_lower, "rust lifetimes");

        assert!(repo.insert_many(Vec::new()).await?.is_empty());

        cleanup_test_db(&db, &db_name).await?;
        Ok(())
    }
}
