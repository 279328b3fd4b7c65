use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::app::App;
use crate::catalog::{EntityKind, ListKind, PagerPolicy, Placeholder};
use crate::pager::{Pager, PAGE_RANGE_DISPLAYED};
use crate::types::{Entry, Envelope};

use super::{format_count, render_panel, truncate};

const CARD_WIDTH: u16 = 30;
const CARD_HEIGHT: u16 = 5;

pub fn render(frame: &mut Frame, app: &App, kind: ListKind, area: Rect) {
    let spec = kind.spec();
    let slice = app.store.slice(kind);

    let Some(envelope) = slice.and_then(|s| s.envelope()) else {
        render_empty(frame, app, kind, area);
        return;
    };

    if envelope.results.is_empty() && spec.placeholder == Placeholder::NoResult {
        render_panel(
            frame,
            area,
            spec.title,
            vec![Line::styled("No result found.", Style::default().fg(Color::Gray))],
        );
        return;
    }

    let show_pager = match spec.pager {
        PagerPolicy::Always => true,
        PagerPolicy::WhenMultiplePages => envelope.total_pages > 1,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if spec.header { 2 } else { 0 }),
            Constraint::Min(0),
            Constraint::Length(if show_pager { 1 } else { 0 }),
        ])
        .split(area);

    if spec.header {
        let header = vec![
            Line::from(Span::styled(
                spec.title,
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!("{} {}", format_count(envelope.total_results), spec.noun),
                Style::default().fg(Color::Gray),
            )),
        ];
        frame.render_widget(Paragraph::new(header), chunks[0]);
    }

    render_grid(frame, app, kind, envelope, chunks[1]);

    if show_pager {
        let pending = slice.and_then(|s| s.pending_page());
        frame.render_widget(Paragraph::new(pager_line(envelope, pending)), chunks[2]);
    }
}

/// Slice has no envelope yet: loader, blank, search hint or error panel
fn render_empty(frame: &mut Frame, app: &App, kind: ListKind, area: Rect) {
    let spec = kind.spec();
    let slice = app.store.slice(kind);
    let loading = app.store.is_loading(kind);

    if let Some(error) = slice.and_then(|s| s.error()).filter(|_| !loading) {
        render_panel(
            frame,
            area,
            spec.title,
            vec![
                Line::styled(
                    format!("Could not load {}", spec.title),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Line::styled(error.to_string(), Style::default().fg(Color::Red)),
                Line::from(""),
                Line::styled("r: retry", Style::default().fg(Color::Gray)),
            ],
        );
        return;
    }

    match spec.placeholder {
        Placeholder::Loader => render_panel(
            frame,
            area,
            spec.title,
            vec![Line::styled("Loading...", Style::default().fg(Color::Yellow))],
        ),
        Placeholder::Blank => {}
        Placeholder::NoResult => {
            let message = if loading {
                "Searching..."
            } else {
                "Press / to search movies, TV shows and people"
            };
            render_panel(
                frame,
                area,
                spec.title,
                vec![Line::styled(message, Style::default().fg(Color::Gray))],
            );
        }
    }
}

fn render_grid(frame: &mut Frame, app: &App, kind: ListKind, envelope: &Envelope<Entry>, area: Rect) {
    if area.width == 0 || area.height == 0 {
        return;
    }
    let columns = (area.width / CARD_WIDTH).max(1) as usize;
    let rows = (area.height / CARD_HEIGHT).max(1) as usize;
    let card_width = area.width / columns as u16;

    let selected = app.selected_index(kind);
    let first_row = (selected / columns).saturating_sub(rows - 1);
    let show_category = matches!(kind.spec().entity, EntityKind::Mixed);

    let start = first_row * columns;
    for (offset, entry) in envelope
        .results
        .iter()
        .skip(start)
        .take(rows * columns)
        .enumerate()
    {
        let index = start + offset;
        let col = (offset % columns) as u16;
        let row = (offset / columns) as u16;
        let y = area.y + row * CARD_HEIGHT;
        let height = CARD_HEIGHT.min(area.bottom().saturating_sub(y));
        if height < 3 {
            break;
        }
        let card = Rect::new(area.x + col * card_width, y, card_width, height);
        render_card(frame, entry, index == selected, show_category, card);
    }
}

fn render_card(frame: &mut Frame, entry: &Entry, selected: bool, show_category: bool, area: Rect) {
    let border_style = if selected {
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let inner_width = area.width.saturating_sub(2) as usize;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(Span::styled(
            truncate(entry.title(), inner_width),
            Style::default().add_modifier(Modifier::BOLD),
        ));

    let mut lines = Vec::new();
    match entry {
        Entry::Media { media, category } => {
            let mut meta = vec![
                Span::raw(media.release_year().unwrap_or("----").to_string()),
                Span::raw("  "),
                Span::styled(
                    format!("★ {:.1}", media.vote_average),
                    Style::default().fg(Color::Yellow),
                ),
            ];
            if show_category {
                meta.push(Span::raw("  "));
                meta.push(Span::styled(
                    category.to_string(),
                    Style::default().fg(Color::Cyan),
                ));
            }
            lines.push(Line::from(meta));
            if let Some(overview) = media.overview.as_deref().filter(|o| !o.is_empty()) {
                lines.push(Line::styled(
                    truncate(overview, inner_width),
                    Style::default().fg(Color::Gray),
                ));
            }
        }
        Entry::Person(person) => {
            lines.push(Line::styled(
                person
                    .known_for_department
                    .clone()
                    .unwrap_or_else(|| "Person".to_string()),
                Style::default().fg(Color::Cyan),
            ));
        }
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// `‹ 1 … 4 5 [6] 7 … 500 ›`
fn pager_line(envelope: &Envelope<Entry>, pending: Option<u32>) -> Line<'static> {
    let pager = Pager::new(envelope.page, envelope.last_page());
    let window = pager.window(PAGE_RANGE_DISPLAYED);
    let dim = Style::default().fg(Color::DarkGray);

    let mut spans = vec![Span::styled("‹ ", dim)];
    if *window.start() > 1 {
        spans.push(Span::raw("1 "));
        if *window.start() > 2 {
            spans.push(Span::styled("… ", dim));
        }
    }
    for page in window.clone() {
        if page == pager.active {
            spans.push(Span::styled(
                format!("[{}] ", page),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::raw(format!("{} ", page)));
        }
    }
    if *window.end() < pager.total {
        if *window.end() + 1 < pager.total {
            spans.push(Span::styled("… ", dim));
        }
        spans.push(Span::raw(format!("{} ", pager.total)));
    }
    spans.push(Span::styled("›", dim));

    if let Some(page) = pending {
        spans.push(Span::styled(
            format!("  loading page {}...", page),
            Style::default().fg(Color::Yellow),
        ));
    }
    Line::from(spans)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Section;
    use crate::app::tests::media;
    use crate::catalog::Category;
    use crate::types::Person;
    use crate::ui::tests::{app, draw, load};

    fn movies(page: u32, total_pages: u32, total_results: u64, count: u64) -> Envelope<Entry> {
        Envelope {
            page,
            total_pages,
            total_results,
            results: (0..count)
                .map(|i| Entry::Media {
                    media: media(i + 1, &format!("Film {}", i + 1)),
                    category: Category::Movie,
                })
                .collect(),
        }
    }

    #[test]
    fn count_line_uses_thousands_grouping() {
        let mut app = app();
        app.section = Section::TopRated;
        load(&mut app, ListKind::TopRated, movies(1, 50, 1000, 20));
        let text = draw(&app, 100, 30);
        assert!(text.contains("Top Rated Movies"));
        assert!(text.contains("1,000 Movies"));
        assert!(text.contains("Film 1"));
    }

    #[test]
    fn pager_reports_total_pages() {
        let mut app = app();
        app.section = Section::Upcoming;
        load(&mut app, ListKind::Upcoming, movies(1, 5, 100, 20));
        let text = draw(&app, 100, 30);
        assert!(text.contains("‹ [1] 2 3 4 5 ›"));
    }

    #[test]
    fn pager_window_elides_far_pages() {
        let envelope = movies(250, 1000, 20000, 0);
        let line = pager_line(&envelope, Some(251));
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert!(text.starts_with("‹ 1 … 245 "));
        assert!(text.contains("[250]"));
        assert!(text.contains("254 … 500 ›"));
        assert!(text.ends_with("loading page 251..."));
    }

    #[test]
    fn trending_shows_loader_others_blank() {
        let mut app = app();
        app.store.ensure_loaded(ListKind::Trending);
        assert!(draw(&app, 80, 20).contains("Loading..."));

        app.section = Section::TopRated;
        app.store.ensure_loaded(ListKind::TopRated);
        let text = draw(&app, 80, 20);
        let body: Vec<&str> = text.lines().skip(1).take(18).collect();
        assert!(body.iter().all(|line| line.trim().is_empty()));
    }

    #[test]
    fn failed_first_fetch_offers_retry() {
        let mut app = app();
        let request = app.store.ensure_loaded(ListKind::Trending).unwrap();
        app.store.complete(request.id, Err("connection refused".to_string()));
        let text = draw(&app, 80, 20);
        assert!(text.contains("Could not load Trending Movies"));
        assert!(text.contains("connection refused"));
        assert!(text.contains("r: retry"));
        assert!(!text.contains("Loading..."));
    }

    #[test]
    fn people_cards_show_department() {
        let mut app = app();
        app.section = Section::People;
        load(
            &mut app,
            ListKind::PopularPeople,
            Envelope {
                page: 1,
                total_pages: 500,
                total_results: 10000,
                results: vec![Entry::Person(Person {
                    id: 31,
                    name: "Tom Hanks".to_string(),
                    profile_path: None,
                    biography: None,
                    known_for_department: Some("Acting".to_string()),
                })],
            },
        );
        let text = draw(&app, 80, 20);
        assert!(text.contains("10,000 People"));
        assert!(text.contains("Tom Hanks"));
        assert!(text.contains("Acting"));
    }
}
