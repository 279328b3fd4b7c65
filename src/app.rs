use std::cell::Cell;
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::action::{Action, SearchTab, Section};
use crate::catalog::{Category, ListKind};
use crate::detail::{Detail, TrailerModal, MOVIE_LOAD_ERROR, PERSON_LOAD_ERROR};
use crate::error::FlicksError;
use crate::event::Event;
use crate::pager::Pager;
use crate::source::MetadataSource;
use crate::store::{Completion, FetchRequest, RequestId, Store};
use crate::tmdb::{web_url, WEB_BASE_URL};
use crate::types::{Entry, MediaDetail, PersonDetail};

/// A detail page on the navigation stack
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Media { category: Category, id: u64 },
    Person { id: u64 },
}

impl Route {
    pub fn for_entry(entry: &Entry) -> Route {
        match entry.category() {
            Category::Person => Route::Person { id: entry.id() },
            category => Route::Media {
                category,
                id: entry.id(),
            },
        }
    }
}

/// Parses `movie/603`, `tv/1399`, `person/31` or a themoviedb.org page URL
/// such as `https://www.themoviedb.org/person/31-tom-hanks`
impl FromStr for Route {
    type Err = FlicksError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let path = s.trim().trim_start_matches(WEB_BASE_URL).trim_matches('/');
        let (category, slug) = path
            .split_once('/')
            .ok_or_else(|| FlicksError::Route(format!("expected <category>/<id>, got '{}'", s)))?;
        let id = slug
            .split('-')
            .next()
            .and_then(|id| id.parse::<u64>().ok())
            .ok_or_else(|| FlicksError::Route(format!("invalid id '{}'", slug)))?;

        Ok(match category.parse::<Category>()? {
            Category::Person => Route::Person { id },
            category => Route::Media { category, id },
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    List(Section),
    MediaDetail,
    PersonDetail,
}

pub struct App {
    pub section: Section,
    pub search_tab: SearchTab,
    pub store: Store,
    selection: HashMap<ListKind, usize>,

    // Detail views
    pub routes: Vec<Route>,
    pub movie: Detail<MediaDetail>,
    pub trailer: TrailerModal,
    pub person: Detail<PersonDetail>,
    pub credit_index: usize,
    pub scroll_offset: usize,
    /// Highest useful scroll offset, measured by the renderer on each draw
    pub scroll_limit: Cell<usize>,

    // Search input
    pub search_input: String,
    pub search_mode: bool,

    /// Digits typed after `:`, waiting for Enter
    pub page_input: Option<String>,
    start_route: Option<Route>,

    pub error: Option<String>,
    pub notice: Option<String>,
    pub should_quit: bool,
    pub tick: usize,
    next_detail_request: RequestId,
    source: Arc<dyn MetadataSource>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl App {
    pub fn new(
        source: Arc<dyn MetadataSource>,
        action_tx: mpsc::UnboundedSender<Action>,
        start: Section,
    ) -> Self {
        Self {
            section: start,
            search_tab: SearchTab::default(),
            store: Store::new(),
            selection: HashMap::new(),

            routes: Vec::new(),
            movie: Detail::NotLoaded,
            trailer: TrailerModal::Closed,
            person: Detail::NotLoaded,
            credit_index: 0,
            scroll_offset: 0,
            scroll_limit: Cell::new(0),

            search_input: String::new(),
            search_mode: false,

            page_input: None,
            start_route: None,

            error: None,
            notice: None,
            should_quit: false,
            tick: 0,
            next_detail_request: 0,
            source,
            action_tx,
        }
    }

    /// Start in the search section with `query` submitted on the first event
    pub fn with_search(mut self, query: Option<String>) -> Self {
        if let Some(query) = query.filter(|q| !q.trim().is_empty()) {
            self.section = Section::Search;
            self.search_input = query;
        }
        self
    }

    /// Open `route` on the first event instead of the start section
    pub fn with_route(mut self, route: Option<Route>) -> Self {
        self.start_route = route;
        self
    }

    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    pub fn screen(&self) -> Screen {
        match self.routes.last() {
            Some(Route::Media { .. }) => Screen::MediaDetail,
            Some(Route::Person { .. }) => Screen::PersonDetail,
            None => Screen::List(self.section),
        }
    }

    /// List shown by the current section
    pub fn current_kind(&self) -> ListKind {
        self.section.list_kind(self.search_tab)
    }

    pub fn selected_index(&self, kind: ListKind) -> usize {
        self.selection.get(&kind).copied().unwrap_or(0)
    }

    pub fn selected_entry(&self) -> Option<&Entry> {
        let kind = self.current_kind();
        self.store
            .envelope(kind)?
            .results
            .get(self.selected_index(kind))
    }

    pub fn is_loading(&self) -> bool {
        self.store.any_loading() || self.movie.is_pending() || self.person.is_pending()
    }

    pub fn handle_event(&self, event: Event) -> Action {
        match event {
            Event::Init => match self.start_route {
                Some(route) => Action::OpenRoute(route),
                None if self.section == Section::Search && !self.search_input.is_empty() => {
                    Action::SearchConfirm
                }
                None => Action::SwitchSection(self.section),
            },
            Event::Tick => Action::Tick,
            Event::Key(key) => self.handle_key(key),
            _ => Action::None,
        }
    }

    fn handle_key(&self, key: KeyEvent) -> Action {
        if self.search_mode {
            return match key.code {
                KeyCode::Esc => Action::ExitSearchMode,
                KeyCode::Enter => Action::SearchConfirm,
                KeyCode::Backspace => Action::SearchBackspace,
                KeyCode::Char(c) => Action::SearchInput(c),
                _ => Action::None,
            };
        }

        if let Some(input) = &self.page_input {
            return match key.code {
                KeyCode::Esc => Action::CancelPageInput,
                KeyCode::Enter => input
                    .parse()
                    .map(Action::ChangePage)
                    .unwrap_or(Action::CancelPageInput),
                KeyCode::Backspace => Action::PageInputBackspace,
                KeyCode::Char(c) if c.is_ascii_digit() => Action::PageInputChar(c),
                _ => Action::None,
            };
        }

        if self.trailer.is_open() {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('q') | KeyCode::Enter => Action::CloseModal,
                KeyCode::Char('o') => Action::OpenInBrowser,
                KeyCode::Char('y') => Action::YankUrl,
                _ => Action::None,
            };
        }

        let screen = self.screen();
        let on_list = matches!(screen, Screen::List(_));

        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                if on_list {
                    Action::Quit
                } else {
                    Action::Back
                }
            }
            KeyCode::Backspace | KeyCode::Char('b') if !on_list => Action::Back,
            KeyCode::Char('j') | KeyCode::Down => Action::ScrollDown,
            KeyCode::Char('k') | KeyCode::Up => Action::ScrollUp,
            KeyCode::Char('g') | KeyCode::Home => Action::GoToTop,
            KeyCode::Char('G') | KeyCode::End => Action::GoToBottom,
            KeyCode::Enter => Action::Select,
            KeyCode::Tab => Action::NextSection,
            KeyCode::BackTab => Action::PrevSection,
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as usize) - ('1' as usize);
                Action::SwitchSection(Section::ALL[index])
            }
            KeyCode::Char('l') | KeyCode::Right if on_list => Action::NextPage,
            KeyCode::Char('h') | KeyCode::Left if on_list => Action::PrevPage,
            KeyCode::Char('L') if on_list => Action::LastPage,
            KeyCode::Char('H') if on_list => Action::FirstPage,
            KeyCode::Char(':') if on_list => Action::EnterPageInput,
            KeyCode::Char(']') if screen == Screen::List(Section::Search) => Action::NextSearchTab,
            KeyCode::Char('[') if screen == Screen::List(Section::Search) => Action::PrevSearchTab,
            KeyCode::Char('/') => Action::EnterSearchMode,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Char('t') if screen == Screen::MediaDetail => Action::WatchTrailer,
            KeyCode::Char('o') => Action::OpenInBrowser,
            KeyCode::Char('y') => Action::YankUrl,
            _ => Action::None,
        }
    }

    pub fn update(&mut self, action: Action) {
        if let Action::Tick = action {
            self.tick = self.tick.wrapping_add(1);
            return;
        }
        if self.error.is_some() && !matches!(action, Action::None | Action::PageLoaded { .. }) {
            self.error = None;
        }
        if !matches!(action, Action::None) {
            self.notice = None;
        }

        match action {
            Action::Tick => {}
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Back => {
                self.go_back();
                // A start route leaves an unmounted list underneath
                let unmounted = self.store.slice(self.current_kind()).is_none();
                if self.routes.is_empty() && !self.should_quit && unmounted {
                    self.mount_list();
                }
            }
            Action::OpenRoute(route) => self.open_route(route),
            Action::ScrollUp => self.move_selection(|i, _| i.saturating_sub(1)),
            Action::ScrollDown => self.move_selection(|i, len| (i + 1).min(len.saturating_sub(1))),
            Action::GoToTop => self.move_selection(|_, _| 0),
            Action::GoToBottom => self.move_selection(|_, len| len.saturating_sub(1)),
            Action::Select => self.select(),

            // Navigation
            Action::SwitchSection(section) => {
                self.close_details();
                self.section = section;
                self.mount_list();
            }
            Action::NextSection => {
                self.close_details();
                self.section = self.section.next();
                self.mount_list();
            }
            Action::PrevSection => {
                self.close_details();
                self.section = self.section.prev();
                self.mount_list();
            }
            Action::NextSearchTab => {
                self.search_tab = self.search_tab.next();
                self.mount_list();
            }
            Action::PrevSearchTab => {
                self.search_tab = self.search_tab.prev();
                self.mount_list();
            }

            // Pager
            Action::NextPage => self.page_with(|p| p.next()),
            Action::PrevPage => self.page_with(|p| p.prev()),
            Action::FirstPage => self.page_with(|p| p.first()),
            Action::LastPage => self.page_with(|p| p.last()),
            Action::ChangePage(page) => {
                self.page_input = None;
                self.page_with(|p| p.select(page));
            }
            Action::EnterPageInput => {
                if self.store.envelope(self.current_kind()).is_some() {
                    self.page_input = Some(String::new());
                }
            }
            Action::PageInputChar(c) => {
                if let Some(input) = self.page_input.as_mut().filter(|i| i.len() < 4) {
                    input.push(c);
                }
            }
            Action::PageInputBackspace => {
                if let Some(input) = self.page_input.as_mut() {
                    input.pop();
                }
            }
            Action::CancelPageInput => {
                self.page_input = None;
            }
            Action::Refresh => match self.routes.last().copied() {
                Some(route) => {
                    self.routes.pop();
                    if let Route::Person { .. } = route {
                        self.person.reset();
                    }
                    self.open_route(route);
                }
                None => {
                    if let Some(request) = self.store.refresh(self.current_kind()) {
                        self.spawn_fetch_page(request);
                    }
                }
            },

            // Search input
            Action::EnterSearchMode => {
                self.close_details();
                self.section = Section::Search;
                self.search_mode = true;
            }
            Action::ExitSearchMode => {
                self.search_mode = false;
            }
            Action::SearchInput(c) => {
                self.search_input.push(c);
            }
            Action::SearchBackspace => {
                self.search_input.pop();
            }
            Action::SearchConfirm => {
                self.search_mode = false;
                self.submit_search();
            }

            // Fetch results
            Action::PageLoaded { request, result } => match self.store.complete(request, result) {
                Completion::Replaced(kind) => {
                    self.selection.insert(kind, 0);
                }
                Completion::Failed(kind) => {
                    if let Some(message) = self.store.error(kind) {
                        self.error =
                            Some(format!("Could not load {}: {}", kind.spec().title, message));
                    }
                }
                Completion::Stale => {}
            },
            Action::MediaDetailLoaded { request, result } => {
                self.movie.resolve(request, result, MOVIE_LOAD_ERROR);
            }
            Action::PersonDetailLoaded { request, result } => {
                if self.person.resolve(request, result, PERSON_LOAD_ERROR) {
                    self.credit_index = 0;
                }
            }

            // Movie detail
            Action::WatchTrailer => {
                if self.screen() == Screen::MediaDetail {
                    if let Some(movie) = self.movie.loaded() {
                        self.trailer = TrailerModal::open_for(movie);
                    }
                }
            }
            Action::CloseModal => {
                self.trailer = TrailerModal::Closed;
            }

            Action::OpenInBrowser => {
                if let Some(url) = self.current_url() {
                    match open::that(&url) {
                        Ok(()) => self.notice = Some(format!("Opened {}", url)),
                        Err(e) => self.error = Some(format!("Could not open browser: {}", e)),
                    }
                }
            }
            Action::YankUrl => {
                if let Some(url) = self.current_url() {
                    let copied = arboard::Clipboard::new().and_then(|mut c| c.set_text(url.clone()));
                    match copied {
                        Ok(()) => self.notice = Some(format!("Copied {}", url)),
                        Err(e) => self.error = Some(format!("Clipboard error: {}", e)),
                    }
                }
            }
            Action::None => {}
        }
    }

    /// URL of whatever is in focus: the open popup, the detail page, or the selected card
    pub fn current_url(&self) -> Option<String> {
        if let Some(url) = self.trailer.url() {
            return Some(url.to_string());
        }
        match self.routes.last() {
            Some(Route::Media { category, id }) => Some(web_url(*category, *id)),
            Some(Route::Person { id }) => Some(web_url(Category::Person, *id)),
            None => self
                .selected_entry()
                .map(|entry| web_url(entry.category(), entry.id())),
        }
    }

    /// The list view for the current section became visible
    fn mount_list(&mut self) {
        if let Some(request) = self.store.ensure_loaded(self.current_kind()) {
            self.spawn_fetch_page(request);
        }
    }

    fn page_with(&mut self, pick: impl FnOnce(&Pager) -> Option<u32>) {
        if !matches!(self.screen(), Screen::List(_)) {
            return;
        }
        let kind = self.current_kind();
        let Some(envelope) = self.store.envelope(kind) else {
            return;
        };
        let pager = Pager::new(envelope.page, envelope.last_page());
        let Some(page) = pick(&pager) else {
            return;
        };
        if let Some(request) = self.store.change_page(kind, page) {
            self.spawn_fetch_page(request);
        }
    }

    fn submit_search(&mut self) {
        let query = self.search_input.trim().to_string();
        if query.is_empty() {
            return;
        }
        tracing::debug!(query = %query, "search submitted");
        for tab in SearchTab::ALL {
            let kind = tab.list_kind();
            self.store.set_query(kind, &query);
            if let Some(request) = self.store.ensure_loaded(kind) {
                self.spawn_fetch_page(request);
            }
        }
    }

    fn move_selection(&mut self, step: impl FnOnce(usize, usize) -> usize) {
        match self.screen() {
            Screen::List(_) => {
                let kind = self.current_kind();
                let len = self.store.envelope(kind).map_or(0, |e| e.results.len());
                if len == 0 {
                    return;
                }
                let next = step(self.selected_index(kind), len);
                self.selection.insert(kind, next);
            }
            Screen::PersonDetail => {
                let len = self
                    .person
                    .loaded()
                    .map_or(0, |p| p.combined_credits.cast.len());
                if len > 0 {
                    self.credit_index = step(self.credit_index, len);
                }
            }
            Screen::MediaDetail => {
                // The window may have grown since the offset was set
                let limit = self.scroll_limit.get();
                self.scroll_offset = step(self.scroll_offset.min(limit), limit + 1);
            }
        }
    }

    fn select(&mut self) {
        match self.screen() {
            Screen::List(_) => {
                if let Some(route) = self.selected_entry().map(Route::for_entry) {
                    self.open_route(route);
                }
            }
            Screen::PersonDetail => {
                let route = self.person.loaded().and_then(|p| {
                    p.combined_credits
                        .cast
                        .get(self.credit_index)
                        .map(|credit| Route::Media {
                            category: credit.media.media_type.unwrap_or(Category::Movie),
                            id: credit.media.id,
                        })
                });
                if let Some(route) = route {
                    self.open_route(route);
                }
            }
            Screen::MediaDetail => {}
        }
    }

    fn open_route(&mut self, route: Route) {
        match route {
            Route::Media { category, id } => {
                self.trailer = TrailerModal::Closed;
                self.scroll_offset = 0;
                self.scroll_limit.set(0);
                let request = self.next_request();
                self.movie.begin(request, id);
                self.spawn_load_media(request, category, id);
            }
            Route::Person { id } => {
                self.credit_index = 0;
                let cached = self.person.loaded().is_some_and(|p| p.id == id);
                if !cached {
                    let request = self.next_request();
                    self.person.begin(request, id);
                    self.spawn_load_person(request, id);
                }
            }
        }
        self.routes.push(route);
    }

    fn go_back(&mut self) {
        if self.trailer.is_open() {
            self.trailer = TrailerModal::Closed;
            return;
        }
        match self.routes.pop() {
            Some(Route::Media { .. }) => {
                self.movie.reset();
                self.scroll_offset = 0;
            }
            Some(Route::Person { .. }) => {
                // Keep a loaded person for the next visit; anything else is dropped
                if self.person.loaded().is_none() {
                    self.person.reset();
                }
            }
            None => {
                self.should_quit = true;
            }
        }
    }

    fn close_details(&mut self) {
        while !self.routes.is_empty() {
            self.go_back();
        }
        self.trailer = TrailerModal::Closed;
    }

    fn next_request(&mut self) -> RequestId {
        self.next_detail_request += 1;
        self.next_detail_request
    }

    fn spawn_fetch_page(&self, request: FetchRequest) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        tracing::debug!(
            slice = request.kind.spec().slice_key,
            page = request.page,
            "fetching page"
        );
        tokio::spawn(async move {
            let result = source
                .list_page(request.kind, request.query.as_deref(), request.page)
                .await
                .map_err(|e| e.to_string());
            tx.send(Action::PageLoaded {
                request: request.id,
                result,
            })
            .ok();
        });
    }

    fn spawn_load_media(&self, request: RequestId, category: Category, id: u64) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source
                .media_detail(category, id)
                .await
                .map(Box::new)
                .map_err(|e| e.to_string());
            tx.send(Action::MediaDetailLoaded { request, result }).ok();
        });
    }

    fn spawn_load_person(&self, request: RequestId, id: u64) {
        let tx = self.action_tx.clone();
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source
                .person_detail(id)
                .await
                .map(Box::new)
                .map_err(|e| e.to_string());
            tx.send(Action::PersonDetailLoaded { request, result }).ok();
        });
    }
}
