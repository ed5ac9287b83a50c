use async_trait::async_trait;
use mongodb::bson::Document;

use crate::error::StoreResult;

use super::query::PrefixQuery;

/// Backing store able to answer a prefix range query on one collection.
///
/// Implementations return raw documents whose `query.field` satisfies
/// [`PrefixQuery::matches`], sorted ascending on that field and holding at
/// most `query.limit` items. Documents without the field never match.
#[async_trait]
pub trait PrefixStore: Send + Sync {
    async fn query_prefix(&self, collection: &str, query: &PrefixQuery)
    -> StoreResult<Vec<Document>>;
}
