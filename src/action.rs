use serde::Deserialize;

use crate::app::Route;
use crate::catalog::ListKind;
use crate::store::RequestId;
use crate::types::{Entry, Envelope, MediaDetail, PersonDetail};

/// Top-level section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    #[default]
    Trending,
    TopRated,
    Upcoming,
    People,
    Search,
}

impl Section {
    pub const ALL: [Section; 5] = [
        Section::Trending,
        Section::TopRated,
        Section::Upcoming,
        Section::People,
        Section::Search,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Trending => "Trending",
            Section::TopRated => "Top Rated",
            Section::Upcoming => "Upcoming",
            Section::People => "People",
            Section::Search => "Search",
        }
    }

    /// List shown by the section; Search defers to its active tab
    pub fn list_kind(&self, tab: SearchTab) -> ListKind {
        match self {
            Section::Trending => ListKind::Trending,
            Section::TopRated => ListKind::TopRated,
            Section::Upcoming => ListKind::Upcoming,
            Section::People => ListKind::PopularPeople,
            Section::Search => tab.list_kind(),
        }
    }

    pub fn next(&self) -> Section {
        let i = Section::ALL.iter().position(|s| s == self).unwrap_or(0);
        Section::ALL[(i + 1) % Section::ALL.len()]
    }

    pub fn prev(&self) -> Section {
        let i = Section::ALL.iter().position(|s| s == self).unwrap_or(0);
        Section::ALL[(i + Section::ALL.len() - 1) % Section::ALL.len()]
    }
}

/// Tab selection inside the search section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SearchTab {
    #[default]
    Movies,
    TvShows,
    People,
}

impl SearchTab {
    pub const ALL: [SearchTab; 3] = [SearchTab::Movies, SearchTab::TvShows, SearchTab::People];

    pub fn list_kind(&self) -> ListKind {
        match self {
            SearchTab::Movies => ListKind::SearchMovies,
            SearchTab::TvShows => ListKind::SearchTv,
            SearchTab::People => ListKind::SearchPeople,
        }
    }

    pub fn next(&self) -> SearchTab {
        match self {
            SearchTab::Movies => SearchTab::TvShows,
            SearchTab::TvShows => SearchTab::People,
            SearchTab::People => SearchTab::Movies,
        }
    }

    pub fn prev(&self) -> SearchTab {
        match self {
            SearchTab::Movies => SearchTab::People,
            SearchTab::TvShows => SearchTab::Movies,
            SearchTab::People => SearchTab::TvShows,
        }
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    Tick,
    Quit,
    Back,
    ScrollUp,
    ScrollDown,
    GoToTop,
    GoToBottom,
    Select,
    OpenRoute(Route),

    // Navigation
    SwitchSection(Section),
    NextSection,
    PrevSection,
    NextSearchTab,
    PrevSearchTab,

    // Pager
    NextPage,
    PrevPage,
    FirstPage,
    LastPage,
    ChangePage(u32),
    Refresh,

    // Go-to-page prompt
    EnterPageInput,
    PageInputChar(char),
    PageInputBackspace,
    CancelPageInput,

    // Search input
    EnterSearchMode,
    ExitSearchMode,
    SearchInput(char),
    SearchBackspace,
    SearchConfirm,

    // Fetch results
    PageLoaded {
        request: RequestId,
        result: Result<Envelope<Entry>, String>,
    },
    MediaDetailLoaded {
        request: RequestId,
        result: Result<Box<MediaDetail>, String>,
    },
    PersonDetailLoaded {
        request: RequestId,
        result: Result<Box<PersonDetail>, String>,
    },

    // Movie detail
    WatchTrailer,
    CloseModal,

    OpenInBrowser,
    YankUrl,

    None,
}
