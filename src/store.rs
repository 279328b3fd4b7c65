//! Shared list state and the fetch-and-paginate controller.
//!
//! Every list view goes through the same lifecycle: fetch page 1 when its
//! slice is empty, fetch another page when the pager asks for one, and
//! replace the slice wholesale when the response lands. The controller only
//! decides *whether* to fetch; it hands back a [`FetchRequest`] and the
//! caller performs the I/O and reports the outcome through [`Store::complete`].

use std::collections::HashMap;

use crate::catalog::ListKind;
use crate::types::{Entry, Envelope};

pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub id: RequestId,
    pub kind: ListKind,
    pub page: u32,
    pub query: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct InFlight {
    id: RequestId,
    page: u32,
}

/// One named region of the store
#[derive(Debug, Default)]
pub struct Slice {
    envelope: Option<Envelope<Entry>>,
    in_flight: Option<InFlight>,
    error: Option<String>,
    query: Option<String>,
}

impl Slice {
    pub fn envelope(&self) -> Option<&Envelope<Entry>> {
        self.envelope.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Page currently being fetched, if any
    pub fn pending_page(&self) -> Option<u32> {
        self.in_flight.map(|f| f.page)
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn query(&self) -> Option<&str> {
        self.query.as_deref()
    }
}

/// What [`Store::complete`] did with a response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Replaced(ListKind),
    Failed(ListKind),
    /// The request no longer matches its slice's in-flight marker
    Stale,
}

#[derive(Debug, Default)]
pub struct Store {
    slices: HashMap<ListKind, Slice>,
    next_id: RequestId,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slice(&self, kind: ListKind) -> Option<&Slice> {
        self.slices.get(&kind)
    }

    pub fn envelope(&self, kind: ListKind) -> Option<&Envelope<Entry>> {
        self.slice(kind).and_then(Slice::envelope)
    }

    pub fn is_loading(&self, kind: ListKind) -> bool {
        self.slice(kind).is_some_and(Slice::is_loading)
    }

    pub fn any_loading(&self) -> bool {
        self.slices.values().any(Slice::is_loading)
    }

    pub fn error(&self, kind: ListKind) -> Option<&str> {
        self.slice(kind).and_then(Slice::error)
    }

    /// Request page 1 if the slice has never been filled.
    ///
    /// A cached envelope is never refetched here; there is no staleness check.
    pub fn ensure_loaded(&mut self, kind: ListKind) -> Option<FetchRequest> {
        let slice = self.slices.entry(kind).or_default();
        if slice.envelope.is_some() || slice.in_flight.is_some() {
            return None;
        }
        if kind.is_search() && slice.query.is_none() {
            return None;
        }
        Some(self.begin(kind, 1))
    }

    /// Request `page` for a populated slice.
    ///
    /// Dropped silently when the page is already shown, when the slice is
    /// still loading, or when the page lies outside `[1, last_page]`.
    pub fn change_page(&mut self, kind: ListKind, page: u32) -> Option<FetchRequest> {
        let slice = self.slices.get(&kind)?;
        let envelope = slice.envelope.as_ref()?;
        if page == envelope.page || slice.in_flight.is_some() || !envelope.contains_page(page) {
            return None;
        }
        Some(self.begin(kind, page))
    }

    /// Refetch the current page, or page 1 for an empty slice
    pub fn refresh(&mut self, kind: ListKind) -> Option<FetchRequest> {
        let slice = self.slices.entry(kind).or_default();
        if slice.in_flight.is_some() || (kind.is_search() && slice.query.is_none()) {
            return None;
        }
        let page = slice.envelope.as_ref().map_or(1, |e| e.page);
        Some(self.begin(kind, page))
    }

    /// Point a search slice at a new query. A different query empties the
    /// slice and forgets its in-flight request, so a late response for the
    /// old query is discarded as stale.
    pub fn set_query(&mut self, kind: ListKind, query: &str) {
        let slice = self.slices.entry(kind).or_default();
        if slice.query.as_deref() == Some(query) {
            return;
        }
        *slice = Slice {
            query: Some(query.to_string()),
            ..Slice::default()
        };
    }

    /// Apply the outcome of a request issued by this store
    pub fn complete(
        &mut self,
        id: RequestId,
        result: Result<Envelope<Entry>, String>,
    ) -> Completion {
        let Some((kind, slice)) = self
            .slices
            .iter_mut()
            .find(|(_, s)| s.in_flight.is_some_and(|f| f.id == id))
        else {
            tracing::debug!(request = id, "dropping stale page response");
            return Completion::Stale;
        };

        slice.in_flight = None;
        match result {
            Ok(envelope) => {
                slice.envelope = Some(envelope);
                slice.error = None;
                Completion::Replaced(*kind)
            }
            Err(message) => {
                tracing::warn!(slice = kind.spec().slice_key, error = %message, "list fetch failed");
                slice.error = Some(message);
                Completion::Failed(*kind)
            }
        }
    }

    fn begin(&mut self, kind: ListKind, page: u32) -> FetchRequest {
        self.next_id += 1;
        let id = self.next_id;
        let slice = self.slices.entry(kind).or_default();
        slice.in_flight = Some(InFlight { id, page });
        FetchRequest {
            id,
            kind,
            page,
            query: slice.query.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;
    use crate::types::Media;

    fn envelope(page: u32, total_pages: u32) -> Envelope<Entry> {
        Envelope {
            page,
            total_pages,
            total_results: u64::from(total_pages) * 20,
            results: vec![Entry::Media {
                media: Media {
                    id: u64::from(page),
                    title: Some(format!("Movie {}", page)),
                    name: None,
                    overview: None,
                    poster_path: None,
                    backdrop_path: None,
                    release_date: None,
                    first_air_date: None,
                    vote_average: 7.0,
                    media_type: None,
                },
                category: Category::Movie,
            }],
        }
    }

    fn loaded(kind: ListKind, page: u32, total_pages: u32) -> Store {
        let mut store = Store::new();
        let req = store.ensure_loaded(kind).unwrap();
        store.complete(req.id, Ok(envelope(page, total_pages)));
        store
    }

    #[test]
    fn empty_slice_requests_page_one_exactly_once() {
        let mut store = Store::new();
        let req = store.ensure_loaded(ListKind::Trending).unwrap();
        assert_eq!(req.page, 1);
        assert_eq!(req.kind, ListKind::Trending);
        assert!(store.is_loading(ListKind::Trending));

        // remount while the first request is in flight
        assert!(store.ensure_loaded(ListKind::Trending).is_none());

        assert_eq!(
            store.complete(req.id, Ok(envelope(1, 5))),
            Completion::Replaced(ListKind::Trending)
        );
        // remount after it landed: cached
        assert!(store.ensure_loaded(ListKind::Trending).is_none());
    }

    #[test]
    fn same_page_is_ignored() {
        let mut store = loaded(ListKind::TopRated, 1, 5);
        assert!(store.change_page(ListKind::TopRated, 1).is_none());
        assert!(!store.is_loading(ListKind::TopRated));
    }

    #[test]
    fn page_change_while_loading_is_dropped_not_queued() {
        let mut store = loaded(ListKind::Upcoming, 1, 5);
        let first = store.change_page(ListKind::Upcoming, 2).unwrap();
        assert!(store.change_page(ListKind::Upcoming, 3).is_none());

        store.complete(first.id, Ok(envelope(2, 5)));
        assert_eq!(store.envelope(ListKind::Upcoming).unwrap().page, 2);
        assert!(!store.is_loading(ListKind::Upcoming));

        // must be re-triggered once loading clears
        let again = store.change_page(ListKind::Upcoming, 3).unwrap();
        assert_eq!(again.page, 3);
    }

    #[test]
    fn out_of_range_pages_are_ignored() {
        let mut store = loaded(ListKind::PopularPeople, 1, 5);
        assert!(store.change_page(ListKind::PopularPeople, 0).is_none());
        assert!(store.change_page(ListKind::PopularPeople, 6).is_none());
        assert!(store.change_page(ListKind::PopularPeople, 5).is_some());
    }

    #[test]
    fn page_change_on_empty_slice_is_ignored() {
        let mut store = Store::new();
        assert!(store.change_page(ListKind::Trending, 2).is_none());
    }

    #[test]
    fn slices_load_independently() {
        let mut store = Store::new();
        assert!(store.ensure_loaded(ListKind::Trending).is_some());
        assert!(store.ensure_loaded(ListKind::TopRated).is_some());
        assert!(store.is_loading(ListKind::Trending));
        assert!(store.is_loading(ListKind::TopRated));
    }

    #[test]
    fn response_replaces_slice_wholesale() {
        let mut store = loaded(ListKind::Trending, 1, 5);
        let req = store.change_page(ListKind::Trending, 4).unwrap();
        store.complete(req.id, Ok(envelope(4, 5)));
        let env = store.envelope(ListKind::Trending).unwrap();
        assert_eq!(env.page, 4);
        assert_eq!(env.results.len(), 1);
        assert_eq!(env.results[0].id(), 4);
    }

    #[test]
    fn failure_clears_loading_and_keeps_previous_page() {
        let mut store = loaded(ListKind::Trending, 1, 5);
        let req = store.change_page(ListKind::Trending, 2).unwrap();
        assert_eq!(
            store.complete(req.id, Err("timeout".into())),
            Completion::Failed(ListKind::Trending)
        );
        assert!(!store.is_loading(ListKind::Trending));
        assert_eq!(store.error(ListKind::Trending), Some("timeout"));
        assert_eq!(store.envelope(ListKind::Trending).unwrap().page, 1);

        let retry = store.change_page(ListKind::Trending, 2).unwrap();
        store.complete(retry.id, Ok(envelope(2, 5)));
        assert_eq!(store.error(ListKind::Trending), None);
    }

    #[test]
    fn failed_first_load_can_be_retried() {
        let mut store = Store::new();
        let req = store.ensure_loaded(ListKind::TopRated).unwrap();
        store.complete(req.id, Err("503".into()));
        assert!(store.envelope(ListKind::TopRated).is_none());
        assert!(store.ensure_loaded(ListKind::TopRated).is_some());
    }

    #[test]
    fn search_needs_a_query() {
        let mut store = Store::new();
        assert!(store.ensure_loaded(ListKind::SearchTv).is_none());
        store.set_query(ListKind::SearchTv, "office");
        let req = store.ensure_loaded(ListKind::SearchTv).unwrap();
        assert_eq!(req.query.as_deref(), Some("office"));
    }

    #[test]
    fn new_query_discards_late_response() {
        let mut store = Store::new();
        store.set_query(ListKind::SearchMovies, "alien");
        let old = store.ensure_loaded(ListKind::SearchMovies).unwrap();

        store.set_query(ListKind::SearchMovies, "aliens");
        let new = store.ensure_loaded(ListKind::SearchMovies).unwrap();

        assert_eq!(store.complete(old.id, Ok(envelope(1, 1))), Completion::Stale);
        assert!(store.is_loading(ListKind::SearchMovies));
        assert_eq!(
            store.complete(new.id, Ok(envelope(1, 2))),
            Completion::Replaced(ListKind::SearchMovies)
        );
    }

    #[test]
    fn same_query_keeps_cached_results() {
        let mut store = Store::new();
        store.set_query(ListKind::SearchPeople, "nolan");
        let req = store.ensure_loaded(ListKind::SearchPeople).unwrap();
        store.complete(req.id, Ok(envelope(1, 1)));
        store.set_query(ListKind::SearchPeople, "nolan");
        assert!(store.envelope(ListKind::SearchPeople).is_some());
    }

    #[test]
    fn refresh_refetches_current_page() {
        let mut store = loaded(ListKind::Trending, 3, 5);
        let req = store.refresh(ListKind::Trending).unwrap();
        assert_eq!(req.page, 3);
        assert!(store.refresh(ListKind::Trending).is_none());
    }
}
