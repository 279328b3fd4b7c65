use chrono::{Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::Category;

/// TMDB refuses `page` values above this, whatever `total_pages` says
pub const MAX_PAGE: u32 = 500;

/// Paginated API response: one page of results plus page/count metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub total_results: u64,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

impl<T> Envelope<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Envelope<U> {
        Envelope {
            page: self.page,
            total_pages: self.total_pages,
            total_results: self.total_results,
            results: self.results.into_iter().map(f).collect(),
        }
    }

    /// Highest page that can actually be requested
    pub fn last_page(&self) -> u32 {
        self.total_pages.min(MAX_PAGE)
    }

    pub fn contains_page(&self, page: u32) -> bool {
        page >= 1 && page <= self.last_page()
    }
}

/// Movie or TV show as it appears in lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Media {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub media_type: Option<Category>,
}

impl Media {
    pub fn display_title(&self) -> &str {
        self.title
            .as_deref()
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref().or(self.first_air_date.as_deref()))
    }
}

/// Person as it appears in lists
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: u64,
    pub name: String,
    pub profile_path: Option<String>,
    pub biography: Option<String>,
    pub known_for_department: Option<String>,
}

/// One card in a list view
#[derive(Debug, Clone, PartialEq)]
pub enum Entry {
    Media { media: Media, category: Category },
    Person(Person),
}

impl Entry {
    pub fn id(&self) -> u64 {
        match self {
            Entry::Media { media, .. } => media.id,
            Entry::Person(person) => person.id,
        }
    }

    pub fn title(&self) -> &str {
        match self {
            Entry::Media { media, .. } => media.display_title(),
            Entry::Person(person) => &person.name,
        }
    }

    pub fn category(&self) -> Category {
        match self {
            Entry::Media { category, .. } => *category,
            Entry::Person(_) => Category::Person,
        }
    }
}

/// Item of the `trending/all` list, tagged by `media_type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "media_type", rename_all = "lowercase")]
pub enum TrendingItem {
    Movie(Media),
    Tv(Media),
    Person(Person),
}

impl From<TrendingItem> for Entry {
    fn from(item: TrendingItem) -> Self {
        match item {
            TrendingItem::Movie(media) => Entry::Media {
                media,
                category: Category::Movie,
            },
            TrendingItem::Tv(media) => Entry::Media {
                media,
                category: Category::Tv,
            },
            TrendingItem::Person(person) => Entry::Person(person),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Genre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Video {
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub site: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

impl Video {
    pub fn url(&self) -> String {
        match self.site.as_str() {
            "Vimeo" => format!("https://vimeo.com/{}", self.key),
            _ => format!("https://www.youtube.com/watch?v={}", self.key),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoList {
    #[serde(default)]
    pub results: Vec<Video>,
}

/// Full movie or TV show, fetched with `append_to_response=videos`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaDetail {
    pub id: u64,
    pub title: Option<String>,
    pub name: Option<String>,
    pub original_title: Option<String>,
    pub original_name: Option<String>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub release_date: Option<String>,
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub vote_average: f64,
    pub runtime: Option<u32>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub videos: VideoList,
}

impl MediaDetail {
    pub fn display_title(&self) -> &str {
        self.original_title
            .as_deref()
            .or(self.original_name.as_deref())
            .or(self.title.as_deref())
            .or(self.name.as_deref())
            .unwrap_or("Untitled")
    }

    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref().or(self.first_air_date.as_deref()))
    }

    /// First attached video, if any
    pub fn trailer(&self) -> Option<&Video> {
        self.videos.results.first()
    }

    /// YouTube search for the title, used when no trailer is attached
    pub fn trailer_search_url(&self) -> String {
        let terms = match self.release_year() {
            Some(year) => format!("{} {}", self.display_title(), year),
            None => self.display_title().to_string(),
        };
        format!(
            "https://www.youtube.com/results?search_query={}",
            urlencoding::encode(&terms)
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CastCredit {
    #[serde(flatten)]
    pub media: Media,
    pub character: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    #[serde(default)]
    pub cast: Vec<CastCredit>,
}

/// Full person, fetched with `append_to_response=combined_credits`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonDetail {
    pub id: u64,
    pub name: String,
    pub biography: Option<String>,
    pub birthday: Option<String>,
    pub deathday: Option<String>,
    pub place_of_birth: Option<String>,
    pub known_for_department: Option<String>,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub combined_credits: Credits,
}

impl PersonDetail {
    /// Age in whole years, at death if there is a deathday
    pub fn age(&self) -> Option<i32> {
        let born = parse_date(self.birthday.as_deref()?)?;
        let until = match self.deathday.as_deref() {
            Some(d) => parse_date(d)?,
            None => Utc::now().date_naive(),
        };
        let mut age = until.year() - born.year();
        if (until.month(), until.day()) < (born.month(), born.day()) {
            age -= 1;
        }
        Some(age)
    }

    pub fn formatted_birthday(&self) -> Option<String> {
        let born = parse_date(self.birthday.as_deref()?)?;
        Some(born.format("%B %-d, %Y").to_string())
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

fn release_year(date: Option<&str>) -> Option<&str> {
    date.filter(|d| !d.is_empty())
        .and_then(|d| d.split('-').next())
}
