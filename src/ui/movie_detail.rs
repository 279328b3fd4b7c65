use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::tmdb::{backdrop_url, poster_url};
use crate::types::MediaDetail;

use super::render_panel;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(message) = app.movie.error() {
        render_panel(
            frame,
            area,
            "Details",
            vec![
                Line::styled(message.to_string(), Style::default().fg(Color::Red)),
                Line::from(""),
                Line::styled("b: Go Back", Style::default().fg(Color::Gray)),
            ],
        );
        return;
    }

    match app.movie.loaded() {
        Some(movie) => render_movie(frame, app, movie, area),
        None => render_panel(
            frame,
            area,
            "Details",
            vec![Line::styled("Loading...", Style::default().fg(Color::Yellow))],
        ),
    }
}

fn render_movie(frame: &mut Frame, app: &App, movie: &MediaDetail, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = Vec::new();

    let mut title = vec![Span::styled(
        movie.display_title().to_string(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    )];
    if let Some(year) = movie.release_year() {
        title.push(Span::raw(format!(" ({})", year)));
    }
    lines.push(Line::from(title));

    let mut meta = vec![Span::styled(
        format!("★ {:.1} Rating", movie.vote_average),
        Style::default().fg(Color::Yellow),
    )];
    if let Some(runtime) = movie.runtime.filter(|r| *r > 0) {
        meta.push(Span::raw(format!("  {}h {}m", runtime / 60, runtime % 60)));
    }
    if !movie.genres.is_empty() {
        let genres: Vec<&str> = movie.genres.iter().map(|g| g.name.as_str()).collect();
        meta.push(Span::styled(
            format!("  {}", genres.join(", ")),
            Style::default().fg(Color::Gray),
        ));
    }
    lines.push(Line::from(meta));
    lines.push(Line::from(""));

    match movie.overview.as_deref().filter(|o| !o.is_empty()) {
        Some(overview) => lines.push(Line::from(overview.to_string())),
        None => lines.push(Line::styled("No overview available.", label)),
    }
    lines.push(Line::from(""));

    if let Some(path) = &movie.poster_path {
        lines.push(Line::from(vec![
            Span::styled("Poster    ", label),
            Span::raw(poster_url(path)),
        ]));
    }
    if let Some(path) = &movie.backdrop_path {
        lines.push(Line::from(vec![
            Span::styled("Backdrop  ", label),
            Span::raw(backdrop_url(path)),
        ]));
    }
    let trailer = match movie.trailer() {
        Some(video) => format!("{} (t to watch)", video.name),
        None => "none attached (t to search)".to_string(),
    };
    lines.push(Line::from(vec![
        Span::styled("Trailer   ", label),
        Span::raw(trailer),
    ]));

    // Wrapped height of the text, so scrolling stops at the last line
    let width = area.width.saturating_sub(2).max(1) as usize;
    let height = area.height.saturating_sub(2) as usize;
    let rows: usize = lines.iter().map(|line| line.width().max(1).div_ceil(width)).sum();
    app.scroll_limit.set(rows.saturating_sub(height));

    let scroll = app.scroll_offset.min(app.scroll_limit.get()) as u16;
    let paragraph = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}
