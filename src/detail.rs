//! Lifecycle of a single-entity detail view.

use crate::store::RequestId;
use crate::types::MediaDetail;

pub const MOVIE_LOAD_ERROR: &str = "Movie details cannot be loaded";
pub const PERSON_LOAD_ERROR: &str = "Person details cannot be loaded";

/// `NotLoaded -> Pending -> Loaded | Failed`. Only a new route re-enters `Pending`.
#[derive(Debug, Clone, PartialEq)]
pub enum Detail<T> {
    NotLoaded,
    Pending {
        request: RequestId,
        id: u64,
    },
    Loaded(Box<T>),
    Failed(String),
}

impl<T> Detail<T> {
    pub fn begin(&mut self, request: RequestId, id: u64) {
        *self = Detail::Pending { request, id };
    }

    /// Apply a response. Returns false, leaving the state alone, when the
    /// response belongs to a request this view no longer waits for.
    pub fn resolve(
        &mut self,
        request: RequestId,
        result: Result<Box<T>, String>,
        failure: &str,
    ) -> bool {
        match self {
            Detail::Pending { request: pending, .. } if *pending == request => {}
            _ => return false,
        }
        *self = match result {
            Ok(value) => Detail::Loaded(value),
            Err(e) => {
                tracing::warn!(request, error = %e, "detail fetch failed");
                Detail::Failed(failure.to_string())
            }
        };
        true
    }

    pub fn reset(&mut self) {
        *self = Detail::NotLoaded;
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Detail::Pending { .. })
    }

    pub fn loaded(&self) -> Option<&T> {
        match self {
            Detail::Loaded(value) => Some(&**value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Detail::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }
}

/// Trailer popup of the movie detail view
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TrailerModal {
    #[default]
    Closed,
    Video {
        name: String,
        url: String,
    },
    NoTrailer {
        search_url: String,
    },
}

impl TrailerModal {
    /// Video popup when a trailer is attached, the external search fallback otherwise
    pub fn open_for(detail: &MediaDetail) -> Self {
        match detail.trailer() {
            Some(video) => TrailerModal::Video {
                name: video.name.clone(),
                url: video.url(),
            },
            None => TrailerModal::NoTrailer {
                search_url: detail.trailer_search_url(),
            },
        }
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, TrailerModal::Closed)
    }

    /// Link the popup offers to open
    pub fn url(&self) -> Option<&str> {
        match self {
            TrailerModal::Closed => None,
            TrailerModal::Video { url, .. } => Some(url.as_str()),
            TrailerModal::NoTrailer { search_url } => Some(search_url.as_str()),
        }
    }
}
