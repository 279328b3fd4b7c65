use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::FlicksError;

/// Route category of a detail view: `movie`, `tv` or `person`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Movie,
    Tv,
    Person,
}

impl Category {
    pub fn as_path(&self) -> &'static str {
        match self {
            Category::Movie => "movie",
            Category::Tv => "tv",
            Category::Person => "person",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Movie => write!(f, "Movie"),
            Category::Tv => write!(f, "TV"),
            Category::Person => write!(f, "Person"),
        }
    }
}

impl FromStr for Category {
    type Err = FlicksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(Category::Movie),
            "tv" => Ok(Category::Tv),
            "person" | "people" => Ok(Category::Person),
            other => Err(FlicksError::Route(format!("unknown category '{}'", other))),
        }
    }
}

/// Shape of the items inside a list envelope
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    /// Movies or TV shows, category fixed by the list
    Media(Category),
    /// People only
    Person,
    /// Movies, TV shows and people tagged by `media_type`
    Mixed,
}

/// What an empty slice renders as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Full-screen loading panel
    Loader,
    /// Nothing until the first page arrives
    Blank,
    /// "No result found." panel
    NoResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PagerPolicy {
    Always,
    WhenMultiplePages,
}

/// One row of the paginated resource table
#[derive(Debug)]
pub struct ListSpec {
    pub path: &'static str,
    pub slice_key: &'static str,
    pub title: &'static str,
    pub noun: &'static str,
    pub entity: EntityKind,
    pub placeholder: Placeholder,
    pub pager: PagerPolicy,
    /// Whether the list view draws its own title and count line
    pub header: bool,
}

const TRENDING: ListSpec = ListSpec {
    path: "trending/all/day",
    slice_key: "trendingMovies",
    title: "Trending Movies",
    noun: "Movies",
    entity: EntityKind::Mixed,
    placeholder: Placeholder::Loader,
    pager: PagerPolicy::Always,
    header: true,
};

const TOP_RATED: ListSpec = ListSpec {
    path: "movie/top_rated",
    slice_key: "topRatedMovies",
    title: "Top Rated Movies",
    noun: "Movies",
    entity: EntityKind::Media(Category::Movie),
    placeholder: Placeholder::Blank,
    pager: PagerPolicy::Always,
    header: true,
};

const UPCOMING: ListSpec = ListSpec {
    path: "movie/upcoming",
    slice_key: "upcomingMovies",
    title: "Upcoming Movies",
    noun: "Movies",
    entity: EntityKind::Media(Category::Movie),
    placeholder: Placeholder::Blank,
    pager: PagerPolicy::Always,
    header: true,
};

const POPULAR_PEOPLE: ListSpec = ListSpec {
    path: "person/popular",
    slice_key: "people",
    title: "Popular People",
    noun: "People",
    entity: EntityKind::Person,
    placeholder: Placeholder::Blank,
    pager: PagerPolicy::Always,
    header: true,
};

const SEARCH_MOVIES: ListSpec = ListSpec {
    path: "search/movie",
    slice_key: "searchMovies",
    title: "Movies",
    noun: "Movies",
    entity: EntityKind::Media(Category::Movie),
    placeholder: Placeholder::NoResult,
    pager: PagerPolicy::WhenMultiplePages,
    header: false,
};

const SEARCH_TV: ListSpec = ListSpec {
    path: "search/tv",
    slice_key: "tvShows",
    title: "TV Shows",
    noun: "TV Shows",
    entity: EntityKind::Media(Category::Tv),
    placeholder: Placeholder::NoResult,
    pager: PagerPolicy::WhenMultiplePages,
    header: false,
};

const SEARCH_PEOPLE: ListSpec = ListSpec {
    path: "search/person",
    slice_key: "searchPeople",
    title: "People",
    noun: "People",
    entity: EntityKind::Person,
    placeholder: Placeholder::NoResult,
    pager: PagerPolicy::WhenMultiplePages,
    header: false,
};

/// Every paginated resource the app browses. One generic controller
/// serves all of them; the differences live in [`ListSpec`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListKind {
    Trending,
    TopRated,
    Upcoming,
    PopularPeople,
    SearchMovies,
    SearchTv,
    SearchPeople,
}

impl ListKind {
    #[cfg(test)]
    pub const ALL: [ListKind; 7] = [
        ListKind::Trending,
        ListKind::TopRated,
        ListKind::Upcoming,
        ListKind::PopularPeople,
        ListKind::SearchMovies,
        ListKind::SearchTv,
        ListKind::SearchPeople,
    ];

    pub fn spec(self) -> &'static ListSpec {
        match self {
            ListKind::Trending => &TRENDING,
            ListKind::TopRated => &TOP_RATED,
            ListKind::Upcoming => &UPCOMING,
            ListKind::PopularPeople => &POPULAR_PEOPLE,
            ListKind::SearchMovies => &SEARCH_MOVIES,
            ListKind::SearchTv => &SEARCH_TV,
            ListKind::SearchPeople => &SEARCH_PEOPLE,
        }
    }

    /// Search lists need a query before they can be fetched
    pub fn is_search(self) -> bool {
        matches!(
            self,
            ListKind::SearchMovies | ListKind::SearchTv | ListKind::SearchPeople
        )
    }
}
