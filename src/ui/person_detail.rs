use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

use crate::app::App;
use crate::detail::Detail;
use crate::types::PersonDetail;

use super::render_panel;

pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    match &app.person {
        Detail::NotLoaded | Detail::Pending { .. } => render_panel(
            frame,
            area,
            "Person",
            vec![Line::styled("Loading...", Style::default().fg(Color::Yellow))],
        ),
        Detail::Failed(message) => render_panel(
            frame,
            area,
            "Person",
            vec![
                Line::styled(message.clone(), Style::default().fg(Color::Red)),
                Line::from(""),
                Line::styled("b: Go Back", Style::default().fg(Color::Gray)),
            ],
        ),
        Detail::Loaded(person) => {
            let chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Percentage(45), Constraint::Min(0)])
                .split(area);
            render_profile(frame, person, chunks[0]);
            render_casting(frame, app, person, chunks[1]);
        }
    }
}

fn render_profile(frame: &mut Frame, person: &PersonDetail, area: Rect) {
    let label = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(Span::styled(
        person.name.clone(),
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD),
    ))];

    if let Some(department) = &person.known_for_department {
        lines.push(Line::from(vec![
            Span::styled("Known for  ", label),
            Span::raw(department.clone()),
        ]));
    }
    if let Some(born) = person.formatted_birthday() {
        let born = match (person.age(), &person.deathday) {
            (Some(age), None) => format!("{} ({} years old)", born, age),
            (Some(age), Some(died)) => format!("{} (died {}, aged {})", born, died, age),
            (None, _) => born,
        };
        lines.push(Line::from(vec![Span::styled("Born       ", label), Span::raw(born)]));
    }
    if let Some(place) = &person.place_of_birth {
        lines.push(Line::from(vec![
            Span::styled("From       ", label),
            Span::raw(place.clone()),
        ]));
    }
    lines.push(Line::from(""));
    match person.biography.as_deref().filter(|b| !b.is_empty()) {
        Some(bio) => lines.extend(bio.lines().map(|l| Line::from(l.to_string()))),
        None => lines.push(Line::styled(
            format!("We don't have a biography for {}.", person.name),
            label,
        )),
    }

    let profile = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL))
        .wrap(Wrap { trim: true });
    frame.render_widget(profile, area);
}

fn render_casting(frame: &mut Frame, app: &App, person: &PersonDetail, area: Rect) {
    let cast = &person.combined_credits.cast;
    let title = format!("Casting ({})", cast.len());

    if cast.is_empty() {
        let empty = Paragraph::new("No credits")
            .block(Block::default().borders(Borders::ALL).title(title))
            .style(Style::default().fg(Color::Gray));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = cast
        .iter()
        .enumerate()
        .map(|(i, credit)| {
            let style = if i == app.credit_index {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let year = credit.media.release_year().unwrap_or("----");
            let mut spans = vec![
                Span::styled(format!("{}  ", year), Style::default().fg(Color::DarkGray)),
                Span::styled(credit.media.display_title().to_string(), style),
            ];
            if let Some(character) = credit.character.as_deref().filter(|c| !c.is_empty()) {
                spans.push(Span::styled(
                    format!("  as {}", character),
                    Style::default().fg(Color::Gray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().bg(Color::DarkGray));

    let mut state = ListState::default();
    state.select(Some(app.credit_index));
    frame.render_stateful_widget(list, area, &mut state);
}

#[cfg(test)]
mod tests {
    use crate::app::tests::media;
    use crate::app::Route;
    use crate::detail::Detail;
    use crate::types::{CastCredit, Credits, PersonDetail};
    use crate::ui::tests::{app, draw};

    #[test]
    fn shows_biography_and_casting() {
        let mut app = app();
        app.routes.push(Route::Person { id: 1892 });
        app.person = Detail::Loaded(Box::new(PersonDetail {
            id: 1892,
            name: "Matt Damon".into(),
            biography: Some("American actor.".into()),
            birthday: Some("1970-10-08".into()),
            deathday: None,
            place_of_birth: Some("Cambridge, Massachusetts, USA".into()),
            known_for_department: Some("Acting".into()),
            profile_path: None,
            combined_credits: Credits {
                cast: vec![CastCredit {
                    media: media(286217, "The Martian"),
                    character: Some("Mark Watney".into()),
                }],
            },
        }));
        let text = draw(&app, 100, 30);
        assert!(text.contains("Matt Damon"));
        assert!(text.contains("October 8, 1970"));
        assert!(text.contains("American actor."));
        assert!(text.contains("Casting (1)"));
        assert!(text.contains("The Martian  as Mark Watney"));
    }

    #[test]
    fn loading_panel_while_pending() {
        let mut app = app();
        app.routes.push(Route::Person { id: 1892 });
        app.person = Detail::Pending {
            request: 1,
            id: 1892,
        };
        assert!(draw(&app, 80, 20).contains("Loading..."));
    }
}
