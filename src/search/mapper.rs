use mongodb::bson::{Document, from_document};
use serde::Serialize;

use crate::error::{StoreError, StoreResult};

use super::Searchable;

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPage<P> {
    pub documents: Vec<P>,
    /// Normalized field of the last document, absent when the page is empty.
    pub next_cursor: Option<String>,
}

impl<P> ResultPage<P> {
    pub fn empty() -> Self {
        Self {
            documents: Vec::new(),
            next_cursor: None,
        }
    }
}

/// Decodes raw store records into `T`'s public projection and derives the
/// cursor for the following page.
pub fn map_page<T: Searchable>(records: Vec<Document>) -> StoreResult<ResultPage<T::Projection>> {
    let next_cursor = match records.last() {
        Some(last) => Some(
            last.get_str(T::INDEXED_FIELD)
                .map_err(|_| StoreError::MissingField {
                    collection: T::COLLECTION,
                    field: T::INDEXED_FIELD,
                })?
                .to_string(),
        ),
        None => None,
    };

    let documents = records
        .into_iter()
        .map(|record| from_document::<T>(record)?.project())
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ResultPage {
        documents,
        next_cursor,
    })
}
