use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use mongodb::bson::{Document, to_document};
use parking_lot::RwLock;
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

use super::query::PrefixQuery;
use super::store::PrefixStore;

/// In-process [`PrefixStore`] holding documents per collection.
///
/// Cloning shares the underlying data.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
    unavailable: Arc<AtomicBool>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert<T: Serialize>(&self, collection: &str, record: &T) -> StoreResult<()> {
        let doc = to_document(record)?;
        self.insert_document(collection, doc);
        Ok(())
    }

    pub fn insert_many<T: Serialize>(&self, collection: &str, records: &[T]) -> StoreResult<()> {
        let docs = records
            .iter()
            .map(to_document)
            .collect::<Result<Vec<_>, _>>()?;
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .extend(docs);
        Ok(())
    }

    pub fn insert_document(&self, collection: &str, doc: Document) {
        self.collections
            .write()
            .entry(collection.to_string())
            .or_default()
            .push(doc);
    }

    pub fn count(&self, collection: &str) -> usize {
        self.collections
            .read()
            .get(collection)
            .map_or(0, |docs| docs.len())
    }

    /// Makes every subsequent query fail with [`StoreError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl PrefixStore for InMemoryStore {
    async fn query_prefix(
        &self,
        collection: &str,
        query: &PrefixQuery,
    ) -> StoreResult<Vec<Document>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(format!(
                "in-memory store is offline, collection `{collection}`"
            )));
        }

        let collections = self.collections.read();
        let Some(docs) = collections.get(collection) else {
            return Ok(Vec::new());
        };

        let mut hits: Vec<(&str, &Document)> = docs
            .iter()
            .filter_map(|doc| {
                let value = doc.get_str(&query.field).ok()?;
                query.matches(value).then_some((value, doc))
            })
            .collect();
        hits.sort_by(|a, b| a.0.cmp(b.0));

        Ok(hits
            .into_iter()
            .take(query.limit as usize)
            .map(|(_, doc)| doc.clone())
            .collect())
    }
}
