use anyhow::Result;
use std::sync::Arc;

use summarizz::data_models::{NewContent, NewUser};
use summarizz::db::{ContentRepo, Database, UserRepo};
use summarizz::search::{MongoStore, SearchService};

mod test_helpers {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    static TEST_DB_COUNTER: AtomicUsize = AtomicUsize::new(0);

    pub fn unique_test_db_name() -> String {
        let count = TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let timestamp = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_millis();
        format!("summarizz_search_test_{}_{}", timestamp, count)
    }

    pub async fn create_test_db() -> Result<(Database, String)> {
        dotenvy::dotenv().ok();
        let uri =
            std::env::var("MONGO_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string());
        let db_name = unique_test_db_name();
        let db = Database::new(&uri, &db_name).await?;
        Ok((db, db_name))
    }

    pub async fn cleanup_test_db(db: &Database, db_name: &str) -> Result<()> {
        db.client()
            .database(db_name)
            .drop()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to drop test database: {}", e))?;
        Ok(())
    }

    pub fn new_user(username: &str) -> NewUser {
        NewUser {
            username: username.to_string(),
            first_name: None,
            last_name: None,
            profile_image: None,
        }
    }
}

use test_helpers::*;

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGO_URI"]
async fn test_mongo_user_search_pages() -> Result<()> {
    let (db, db_name) = create_test_db().await?;
    let users = UserRepo::new(&db);
    users.ensure_indexes().await?;
    users
        .insert_many(
            ["alice", "Alicia", "bob", "carol", "caroline"]
                .into_iter()
                .map(new_user)
                .collect(),
        )
        .await?;

    let search = SearchService::new(Arc::new(MongoStore::new(db.clone())));

    let page = search.users.search("ALI", None).await?;
    let names: Vec<_> = page.documents.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["alice", "Alicia"]);
    assert_eq!(page.next_cursor.as_deref(), Some("alicia"));

    let next = search.users.search("ali", page.next_cursor.as_deref()).await?;
    assert!(next.documents.is_empty());
    assert!(next.next_cursor.is_none());

    let page = search.users.search("car", None).await?;
    let names: Vec<_> = page.documents.iter().map(|u| u.username.as_str()).collect();
    assert_eq!(names, vec!["carol", "caroline"]);

    cleanup_test_db(&db, &db_name).await?;
    Ok(())
}

#[tokio::test]
#[ignore = "requires a running MongoDB at MONGO_URI"]
async fn test_mongo_content_search_limits_page() -> Result<()> {
    let (db, db_name) = create_test_db().await?;
    let contents = ContentRepo::new(&db);
    contents.ensure_indexes().await?;
    contents
        .insert_many(
            (1..=6)
                .map(|i| NewContent {
                    creator_id: "u1".to_string(),
                    title: format!("Summary {i}"),
                    summary: None,
                    content: String::new(),
                })
                .collect(),
        )
        .await?;

    let search = SearchService::new(Arc::new(MongoStore::new(db.clone())));

    let page = search.contents.search("summary", None).await?;
    assert_eq!(page.documents.len(), 5);
    assert_eq!(page.next_cursor.as_deref(), Some("summary 5"));

    let page = search
        .contents
        .search("summary", page.next_cursor.as_deref())
        .await?;
    let titles: Vec<_> = page.documents.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Summary 6"]);

    cleanup_test_db(&db, &db_name).await?;
    Ok(())
}
