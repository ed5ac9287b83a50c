use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Document, doc};
use mongodb::options::FindOptions;

use crate::db::Database;
use crate::error::StoreResult;

use super::query::PrefixQuery;
use super::store::PrefixStore;

/// [`PrefixStore`] backed by MongoDB range queries on the normalized field.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

/// Translates a [`PrefixQuery`] into a MongoDB filter and find options.
pub fn find_parts(query: &PrefixQuery) -> (Document, FindOptions) {
    let mut range = doc! {
        "$gte": query.lower_bound.as_str(),
        "$lt": query.upper_bound.as_str(),
    };
    if let Some(after) = &query.after {
        range.insert("$gt", after.as_str());
    }

    let mut filter = Document::new();
    filter.insert(query.field.as_str(), range);

    let mut sort = Document::new();
    sort.insert(query.field.as_str(), 1);

    let options = FindOptions::builder()
        .sort(sort)
        .limit(i64::from(query.limit))
        .build();

    (filter, options)
}

#[async_trait]
impl PrefixStore for MongoStore {
    async fn query_prefix(
        &self,
        collection: &str,
        query: &PrefixQuery,
    ) -> StoreResult<Vec<Document>> {
        let (filter, options) = find_parts(query);
        log::debug!("prefix query on {collection}: {filter}");

        let docs: Vec<Document> = self
            .db
            .collection::<Document>(collection)
            .find(filter)
            .with_options(options)
            .await?
            .try_collect()
            .await?;

        Ok(docs)
    }
}
