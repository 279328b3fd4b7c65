use async_trait::async_trait;

use crate::catalog::{Category, ListKind};
use crate::error::Result;
use crate::types::{Entry, Envelope, MediaDetail, PersonDetail};

/// Where lists and detail records come from. The app only talks to this
/// trait, so tests can swap the HTTP client for an in-memory source.
#[async_trait]
pub trait MetadataSource: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &str;

    /// One page of a paginated list. `query` is required by search lists.
    async fn list_page(
        &self,
        kind: ListKind,
        query: Option<&str>,
        page: u32,
    ) -> Result<Envelope<Entry>>;

    /// A movie or TV show with its videos
    async fn media_detail(&self, category: Category, id: u64) -> Result<MediaDetail>;

    /// A person with their combined credits
    async fn person_detail(&self, id: u64) -> Result<PersonDetail>;
}
