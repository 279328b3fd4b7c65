use crossterm::event::{Event as TerminalEvent, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Terminal and timer events fed into the main loop
#[derive(Debug, Clone)]
pub enum Event {
    Init,
    Tick,
    Render,
    Resize,
    Key(KeyEvent),
}

impl Event {
    /// Key presses and resizes; releases, repeats, mouse and focus are dropped
    pub fn from_terminal(event: TerminalEvent) -> Option<Event> {
        match event {
            TerminalEvent::Key(key) if key.kind == KeyEventKind::Press => Some(Event::Key(key)),
            TerminalEvent::Resize(..) => Some(Event::Resize),
            _ => None,
        }
    }

    /// Ctrl+C quits from anywhere, including search input
    pub fn is_quit(&self) -> bool {
        matches!(
            self,
            Event::Key(KeyEvent {
                code: KeyCode::Char('c'),
                modifiers: KeyModifiers::CONTROL,
                ..
            })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crossterm::event::KeyEventState;

    #[test]
    fn ctrl_c_quits_plain_c_does_not() {
        let ctrl_c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        let c = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(ctrl_c.is_quit());
        assert!(!c.is_quit());
        assert!(!Event::Tick.is_quit());
    }

    #[test]
    fn only_presses_and_resizes_get_through() {
        let press = KeyEvent::new(KeyCode::Char('j'), KeyModifiers::NONE);
        let release = KeyEvent::new_with_kind_and_state(
            KeyCode::Char('j'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
            KeyEventState::NONE,
        );

        assert!(matches!(
            Event::from_terminal(TerminalEvent::Key(press)),
            Some(Event::Key(key)) if key.code == KeyCode::Char('j')
        ));
        assert!(Event::from_terminal(TerminalEvent::Key(release)).is_none());
        assert!(matches!(
            Event::from_terminal(TerminalEvent::Resize(80, 24)),
            Some(Event::Resize)
        ));
        assert!(Event::from_terminal(TerminalEvent::FocusGained).is_none());
    }
}
