//! TUI runtime
//!
//! Terminal setup, the frame loop, and teardown. Background tasks talk
//! to the loop over an mpsc channel; see `background.rs` for the send
//! conventions.

use crate::api::ApiClient;
use crate::app::messages::BackgroundMessage;
use crate::app::{background, input, RuntimeContext};
use crate::config::Config;
use crate::session::SessionStore;
use crate::ui::{self, App, Screen};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// How often the backend health probe repeats.
const HEALTH_INTERVAL: Duration = Duration::from_secs(30);

pub async fn run_tui(client: ApiClient, config: Config, restore: bool) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config);
    let store = SessionStore::open_default();

    // Resume the previous session so yesterday's validation is one
    // keypress away.
    if restore {
        if let Some(record) = store.as_ref().and_then(|s| s.load()) {
            app.display = Some(crate::render::render(&record.result));
            app.session.restore(record);
            app.screen = Screen::Results;
        }
    }

    let (tx, rx) = mpsc::channel::<BackgroundMessage>();
    let ctx = RuntimeContext {
        client: Arc::new(client),
        tx,
        store,
    };

    background::spawn_health_check(ctx.client.clone(), ctx.tx.clone());
    let mut last_health_probe = Instant::now();

    let result = run_loop(&mut terminal, &mut app, &rx, &ctx, &mut last_health_probe).await;

    // Restore the terminal even when the loop errored.
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mpsc::Receiver<BackgroundMessage>,
    ctx: &RuntimeContext,
    last_health_probe: &mut Instant,
) -> Result<()> {
    loop {
        app.tick();

        if last_health_probe.elapsed() >= HEALTH_INTERVAL {
            background::spawn_health_check(ctx.client.clone(), ctx.tx.clone());
            *last_health_probe = Instant::now();
        }

        background::drain_messages(app, rx, ctx);

        terminal.draw(|f| ui::render::render(f, app))?;

        // Short poll keeps the spinner animation smooth.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                input::handle_key_event(app, key, ctx)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
