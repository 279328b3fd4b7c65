mod list_view;
mod movie_detail;
mod person_detail;
mod popup;
mod search_view;

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::action::Section;
use crate::app::{App, Screen};

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);

    match app.screen() {
        Screen::List(Section::Search) => search_view::render(frame, app, chunks[1]),
        Screen::List(_) => list_view::render(frame, app, app.current_kind(), chunks[1]),
        Screen::MediaDetail => movie_detail::render(frame, app, chunks[1]),
        Screen::PersonDetail => person_detail::render(frame, app, chunks[1]),
    }

    popup::render_trailer(frame, &app.trailer);

    render_status_bar(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::styled(
        "flicks ",
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];

    for (i, section) in Section::ALL.iter().enumerate() {
        let style = if *section == app.section {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {} {} ", i + 1, section.title()), style));
    }

    let trail = match app.screen() {
        Screen::MediaDetail => app.movie.loaded().map(|m| m.display_title().to_string()),
        Screen::PersonDetail => app.person.loaded().map(|p| p.name.clone()),
        Screen::List(_) => None,
    };
    if let Some(trail) = trail {
        spans.push(Span::raw(" > "));
        spans.push(Span::styled(trail, Style::default().fg(Color::Cyan)));
    }

    let header = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(header, area);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let status = if let Some(error) = &app.error {
        Line::from(vec![Span::styled(
            format!("Error: {}", error),
            Style::default().fg(Color::Red),
        )])
    } else if let Some(input) = &app.page_input {
        let last = app
            .store
            .envelope(app.current_kind())
            .map_or(1, |envelope| envelope.last_page());
        Line::from(vec![
            Span::styled(
                format!("Go to page (1-{}): ", last),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(input.clone()),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ])
    } else if let Some(notice) = &app.notice {
        Line::from(vec![Span::styled(
            notice.clone(),
            Style::default().fg(Color::Green),
        )])
    } else if app.is_loading() {
        Line::from(vec![Span::styled(
            format!("{} Loading...", SPINNER[app.tick % SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        )])
    } else {
        let help = if app.search_mode {
            "type query | Enter: search | Esc: cancel"
        } else if app.trailer.is_open() {
            "o: open | y: copy link | Esc: close"
        } else {
            match app.screen() {
                Screen::List(Section::Search) => {
                    "/: search | [/]: tabs | h/l: page | j/k: nav | Enter: open | q: quit"
                }
                Screen::List(_) => {
                    "1-5/Tab: sections | h/l/H/L: page | :N: go to | j/k: nav | Enter: open | o: web | r: refresh | q: quit"
                }
                Screen::MediaDetail => "t: trailer | j/k: scroll | o: web | y: copy link | b: back",
                Screen::PersonDetail => "j/k: nav | Enter: open | o: web | y: copy link | b: back",
            }
        };
        Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::styled(
                format!("  data: {}", app.source_name()),
                Style::default().fg(Color::DarkGray),
            ),
        ])
    };

    let status_bar = Paragraph::new(status).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status_bar, area);
}

/// Bordered panel with a centred message, used for loaders and errors
fn render_panel(frame: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let block = Block::default().borders(Borders::ALL).title(format!(" {} ", title));
    let inner_height = area.height.saturating_sub(2) as usize;
    let pad = inner_height.saturating_sub(lines.len()) / 2;

    let mut text = vec![Line::from(""); pad];
    text.extend(lines);

    let panel = Paragraph::new(text)
        .block(block)
        .alignment(ratatui::layout::Alignment::Center)
        .wrap(Wrap { trim: false });
    frame.render_widget(panel, area);
}

/// en-US thousands grouping: 1234567 -> "1,234,567"
pub fn format_count(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Cut `s` to at most `max` characters, ending in "..." when shortened
fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let keep = max.saturating_sub(3);
    let mut out: String = s.chars().take(keep).collect();
    out.push_str("...");
    out
}
