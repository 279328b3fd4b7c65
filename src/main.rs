mod action;
mod app;
mod auth;
mod catalog;
mod config;
mod detail;
mod error;
mod event;
mod pager;
mod source;
mod store;
mod tmdb;
mod tui;
mod types;
mod ui;

use std::fs::File;
use std::panic;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::action::{Action, Section};
use crate::app::{App, Route};
use crate::config::Config;
use crate::event::Event;
use crate::source::MetadataSource;
use crate::tmdb::Tmdb;
use crate::tui::EventHandler;

#[derive(Parser, Debug)]
#[command(name = "flicks", version, about = "Browse movies, TV shows and people from TMDB")]
struct Cli {
    /// TMDB API key (overrides env, stored key and api_key_command)
    #[arg(long, value_name = "KEY")]
    api_key: Option<String>,

    /// Section to open on start
    #[arg(long, value_enum)]
    section: Option<Section>,

    /// Start in search with this query
    #[arg(long, value_name = "QUERY")]
    search: Option<String>,

    /// Open a title or person on start: movie/603, tv/1399, person/31 or a themoviedb.org URL
    #[arg(long, value_name = "ROUTE")]
    open: Option<String>,

    /// Write logs here instead of the cache directory
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn default_log_path() -> Option<PathBuf> {
    Some(dirs::cache_dir()?.join("flicks").join("flicks.log"))
}

/// The terminal belongs to the UI, so logs go to a file. No file, no logs.
fn init_logging(path: Option<PathBuf>) {
    let Some(path) = path.or_else(default_log_path) else {
        return;
    };
    if let Some(parent) = path.parent() {
        if std::fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = File::create(&path) else {
        return;
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file)),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_file.clone());

    let config = Config::load();
    let route = cli.open.as_deref().map(str::parse::<Route>).transpose()?;

    // Resolve the key before touching the terminal so errors print normally
    let api_key = auth::resolve_api_key(cli.api_key.as_deref(), &config.tmdb)?;
    let tmdb = Tmdb::new(api_key, &config.tmdb.base_url, &config.tmdb.language)?;
    tracing::debug!(?tmdb, "client ready");

    // Set up panic hook to restore terminal
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let start = cli.section.unwrap_or(config.general.start_section);
    let result = run(Arc::new(tmdb), start, cli.search, route).await;

    tui::restore()?;

    result
}

async fn run(
    source: Arc<dyn MetadataSource>,
    start: Section,
    search: Option<String>,
    route: Option<Route>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut terminal = tui::init()?;

    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new(source, action_tx.clone(), start)
        .with_search(search)
        .with_route(route);

    let tick_rate = Duration::from_millis(250);
    let render_rate = Duration::from_millis(33);
    let mut events = EventHandler::new(tick_rate, render_rate);

    loop {
        tokio::select! {
            Some(event) = events.next() => {
                if event.is_quit() {
                    break;
                }

                match event {
                    Event::Render | Event::Resize => {
                        terminal.draw(|frame| ui::render(frame, &app))?;
                    }
                    _ => {
                        let action = app.handle_event(event);
                        if !matches!(action, Action::None) {
                            action_tx.send(action)?;
                        }
                    }
                }
            }
            Some(action) = action_rx.recv() => {
                app.update(action);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
