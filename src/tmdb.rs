use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::catalog::{Category, EntityKind, ListKind};
use crate::error::{FlicksError, Result};
use crate::source::MetadataSource;
use crate::types::{Entry, Envelope, Media, MediaDetail, Person, PersonDetail, TrendingItem};

pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const WEB_BASE_URL: &str = "https://www.themoviedb.org";
const POSTER_BASE: &str = "https://image.tmdb.org/t/p/w300_and_h450_face";
const BACKDROP_BASE: &str = "https://image.tmdb.org/t/p/w1400_and_h450_face";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub fn poster_url(path: &str) -> String {
    format!("{}{}", POSTER_BASE, path)
}

pub fn backdrop_url(path: &str) -> String {
    format!("{}{}", BACKDROP_BASE, path)
}

/// Public TMDB page for an entity, used by open-in-browser and yank
pub fn web_url(category: Category, id: u64) -> String {
    format!("{}/{}/{}", WEB_BASE_URL, category.as_path(), id)
}

/// Error body TMDB sends with non-2xx responses
#[derive(Deserialize)]
struct TmdbErrorResponse {
    status_code: i64,
    status_message: String,
}

pub struct Tmdb {
    client: Client,
    base_url: String,
    api_key: String,
    language: String,
}

impl std::fmt::Debug for Tmdb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tmdb")
            .field("base_url", &self.base_url)
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl Tmdb {
    pub fn new(api_key: String, base_url: &str, language: &str) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(FlicksError::Auth("TMDB API key cannot be empty".to_string()));
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("flicks/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            language: language.to_string(),
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T> {
        tracing::debug!(path, ?params, "TMDB request");

        let response = self
            .client
            .get(self.api_url(path))
            .query(&[("api_key", self.api_key.as_str()), ("language", self.language.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(path, %status, "TMDB request failed");
            return Err(match serde_json::from_str::<TmdbErrorResponse>(&body) {
                Ok(err) => FlicksError::Api(format!(
                    "TMDB {} (code {}): {}",
                    status, err.status_code, err.status_message
                )),
                Err(_) => FlicksError::Api(format!("TMDB {}: {}", status, body)),
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl MetadataSource for Tmdb {
    fn name(&self) -> &str {
        "TMDB"
    }

    async fn list_page(
        &self,
        kind: ListKind,
        query: Option<&str>,
        page: u32,
    ) -> Result<Envelope<Entry>> {
        let spec = kind.spec();
        let mut params = vec![("page", page.to_string())];
        if let Some(q) = query {
            params.push(("query", q.to_string()));
        } else if kind.is_search() {
            return Err(FlicksError::Api(format!("{} needs a query", spec.path)));
        }

        let envelope = match spec.entity {
            EntityKind::Media(category) => self
                .get_json::<Envelope<Media>>(spec.path, &params)
                .await?
                .map(|media| Entry::Media { media, category }),
            EntityKind::Person => self
                .get_json::<Envelope<Person>>(spec.path, &params)
                .await?
                .map(Entry::Person),
            EntityKind::Mixed => self
                .get_json::<Envelope<TrendingItem>>(spec.path, &params)
                .await?
                .map(Entry::from),
        };
        Ok(envelope)
    }

    async fn media_detail(&self, category: Category, id: u64) -> Result<MediaDetail> {
        if category == Category::Person {
            return Err(FlicksError::Api("people have no media detail".to_string()));
        }
        let path = format!("{}/{}", category.as_path(), id);
        let params = [("append_to_response", "videos".to_string())];
        self.get_json(&path, &params).await
    }

    async fn person_detail(&self, id: u64) -> Result<PersonDetail> {
        let path = format!("person/{}", id);
        let params = [("append_to_response", "combined_credits".to_string())];
        self.get_json(&path, &params).await
    }
}
