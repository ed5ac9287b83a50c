use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::data_models::{Content, User};
use crate::error::{SearchError, StoreResult};

pub mod mapper;
pub mod memory;
pub mod mongo;
pub mod query;
pub mod store;

pub use mapper::ResultPage;
pub use memory::InMemoryStore;
pub use mongo::MongoStore;
pub use query::{HIGH_SENTINEL, PAGE_SIZE, PrefixQuery};
pub use store::PrefixStore;

/// A stored entity that can be found by prefix on a lower-cased field.
pub trait Searchable: DeserializeOwned + Send + Sync + 'static {
    /// Collection holding the entity.
    const COLLECTION: &'static str;
    /// Lower-cased field the prefix range is evaluated on.
    const INDEXED_FIELD: &'static str;
    /// Public shape returned to callers.
    type Projection: Serialize + Send;

    fn project(self) -> StoreResult<Self::Projection>;
}

/// Prefix search paginator over one entity type.
pub struct Paginator<T> {
    store: Arc<dyn PrefixStore>,
    page_size: u32,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Searchable> Paginator<T> {
    pub fn new(store: Arc<dyn PrefixStore>) -> Self {
        Self {
            store,
            page_size: PAGE_SIZE,
            _entity: PhantomData,
        }
    }

    /// Returns up to [`PAGE_SIZE`] entities whose normalized field starts with
    /// `lower(text)`, resuming after `cursor` when one is given.
    pub async fn search(
        &self,
        text: &str,
        cursor: Option<&str>,
    ) -> Result<ResultPage<T::Projection>, SearchError> {
        let query =
            PrefixQuery::build(T::INDEXED_FIELD, text, self.page_size)?.resume_after(cursor);
        log::debug!(
            "searching {} on {} in [{:?}, {:?}) after {:?}",
            T::COLLECTION,
            query.field,
            query.lower_bound,
            query.upper_bound,
            query.after
        );

        let mut records = self.store.query_prefix(T::COLLECTION, &query).await?;
        records.truncate(query.limit as usize);

        let page = mapper::map_page::<T>(records)?;
        log::debug!(
            "{} hits in {}, next cursor {:?}",
            page.documents.len(),
            T::COLLECTION,
            page.next_cursor
        );
        Ok(page)
    }
}

/// User and content paginators sharing one store.
pub struct SearchService {
    pub users: Paginator<User>,
    pub contents: Paginator<Content>,
}

impl SearchService {
    pub fn new(store: Arc<dyn PrefixStore>) -> Self {
        Self {
            users: Paginator::new(store.clone()),
            contents: Paginator::new(store),
        }
    }
}
