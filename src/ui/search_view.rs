use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Tabs};
use ratatui::Frame;

use crate::action::SearchTab;
use crate::app::App;

use super::{format_count, list_view};

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(area);

    render_query(frame, app, chunks[0]);
    render_tabs(frame, app, chunks[1]);
    list_view::render(frame, app, app.search_tab.list_kind(), chunks[2]);
}

fn render_query(frame: &mut Frame, app: &App, area: Rect) {
    let border_style = if app.search_mode {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut spans = vec![Span::raw(app.search_input.clone())];
    if app.search_mode {
        spans.push(Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)));
    } else if app.search_input.is_empty() {
        spans.push(Span::styled(
            "Search for a movie, tv show, person...",
            Style::default().fg(Color::DarkGray),
        ));
    }

    let submitted = app
        .store
        .slice(app.search_tab.list_kind())
        .and_then(|s| s.query());
    let title = match submitted {
        Some(query) if !app.search_mode => format!(" Search: results for \"{}\" ", query),
        _ => " Search ".to_string(),
    };

    let input = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title),
    );
    frame.render_widget(input, area);
}

fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<String> = SearchTab::ALL
        .iter()
        .map(|tab| {
            let kind = tab.list_kind();
            match app.store.envelope(kind) {
                Some(envelope) => format!(
                    "{} ({})",
                    kind.spec().title,
                    format_count(envelope.total_results)
                ),
                None => kind.spec().title.to_string(),
            }
        })
        .collect();

    let selected = SearchTab::ALL
        .iter()
        .position(|t| *t == app.search_tab)
        .unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(Block::default().borders(Borders::ALL))
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, area);
}

#[cfg(test)]
mod tests {
    use crate::action::{Section, SearchTab};
    use crate::catalog::{Category, ListKind};
    use crate::types::{Entry, Envelope, Person};
    use crate::ui::tests::{app, draw, load};

    fn search_app() -> crate::app::App {
        let mut app = app();
        app.section = Section::Search;
        app.search_input = "zzzz".to_string();
        for tab in SearchTab::ALL {
            app.store.set_query(tab.list_kind(), "zzzz");
        }
        app
    }

    #[test]
    fn empty_results_render_no_result_panel() {
        let mut app = search_app();
        load(
            &mut app,
            ListKind::SearchMovies,
            Envelope {
                page: 1,
                total_pages: 0,
                total_results: 0,
                results: vec![],
            },
        );
        let text = draw(&app, 90, 24);
        assert!(text.contains("No result found."));
        assert!(text.contains("Movies (0)"));
        assert!(!text.contains('‹'));
    }

    #[test]
    fn single_page_hides_pager() {
        let mut app = search_app();
        app.search_tab = SearchTab::People;
        load(
            &mut app,
            ListKind::SearchPeople,
            Envelope {
                page: 1,
                total_pages: 1,
                total_results: 1,
                results: vec![Entry::Person(Person {
                    id: 1,
                    name: "Zzzz Top".to_string(),
                    profile_path: None,
                    biography: None,
                    known_for_department: None,
                })],
            },
        );
        let text = draw(&app, 90, 24);
        assert!(text.contains("Zzzz Top"));
        assert!(text.contains("People (1)"));
        assert!(!text.contains('‹'));
    }

    #[test]
    fn multiple_pages_show_pager() {
        let mut app = search_app();
        app.search_tab = SearchTab::TvShows;
        load(
            &mut app,
            ListKind::SearchTv,
            Envelope {
                page: 1,
                total_pages: 3,
                total_results: 55,
                results: vec![Entry::Media {
                    media: crate::app::tests::media(95396, "Severance"),
                    category: Category::Tv,
                }],
            },
        );
        let text = draw(&app, 90, 24);
        assert!(text.contains("Severance"));
        assert!(text.contains("‹ [1] 2 3 ›"));
    }

    #[test]
    fn no_query_shows_hint() {
        let mut app = app();
        app.section = Section::Search;
        let text = draw(&app, 90, 24);
        assert!(text.contains("Press / to search"));
    }
}
