use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::detail::TrailerModal;

/// Trailer popup over the movie page; draws nothing while closed
pub fn render_trailer(frame: &mut Frame, modal: &TrailerModal) {
    let (title, lines) = match modal {
        TrailerModal::Closed => return,
        TrailerModal::Video { name, url } => (
            "Trailer",
            vec![
                Line::from(Span::styled(
                    name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(""),
                Line::from(Span::styled(url.clone(), Style::default().fg(Color::Cyan))),
            ],
        ),
        TrailerModal::NoTrailer { search_url } => (
            "No Trailer Found",
            vec![
                Line::from("View in youtube instead"),
                Line::from(""),
                Line::from(Span::styled(
                    search_url.clone(),
                    Style::default().fg(Color::Cyan),
                )),
            ],
        ),
    };

    let mut text = vec![Line::from("")];
    text.extend(lines);
    text.push(Line::from(""));
    text.push(Line::from(vec![
        Span::styled("[o]", Style::default().fg(Color::Green)),
        Span::raw("pen  "),
        Span::styled("[y]", Style::default().fg(Color::Green)),
        Span::raw("ank  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" close"),
    ]));

    let area = centered_rect(70, text.len() as u16 + 4, frame.area());
    frame.render_widget(Clear, area);

    let popup = Paragraph::new(text)
        .block(
            Block::default().borders(Borders::ALL).title(Span::styled(
                format!(" {} ", title),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
        )
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });

    frame.render_widget(popup, area);
}

/// Rect of at most `width` x `height` centred in `outer`
fn centered_rect(width: u16, height: u16, outer: Rect) -> Rect {
    let popup_width = width.min(outer.width);
    let popup_height = height.min(outer.height);

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length((outer.height.saturating_sub(popup_height)) / 2),
            Constraint::Length(popup_height),
            Constraint::Min(0),
        ])
        .split(outer);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length((outer.width.saturating_sub(popup_width)) / 2),
            Constraint::Length(popup_width),
            Constraint::Min(0),
        ])
        .split(vertical[1]);

    horizontal[1]
}
