//! Terminal UI for tateti

mod app;
mod confetti;
mod input;
mod modal;
mod schedule;
mod ui;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use tateti_engine::{GameEngine, JsonFileStore, ScoreStore};
use tracing::{error, info, instrument};

use crate::config::AppConfig;

pub use app::{App, Control, Deferred};
pub use confetti::{Confetti, PALETTE, Particle, Shape};
pub use input::{Action, action_for, move_cursor};
pub use modal::Modal;
pub use schedule::Schedule;

/// Redraw interval; also bounds how late a deferred action can fire.
const FRAME: Duration = Duration::from_millis(33);

/// Runs the game screen until the user quits.
#[instrument(skip(config), fields(scores_path = %config.scores_path().display()))]
pub fn run_tui(config: AppConfig) -> Result<()> {
    info!("Starting tateti TUI");

    let engine = GameEngine::new(JsonFileStore::new(config.scores_path()));
    let app = App::new(engine, config);

    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    info!("TUI closed");
    res
}

fn run_app<S: ScoreStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    mut app: App<S>,
) -> Result<()> {
    loop {
        let now = Instant::now();
        app.tick(now);
        terminal.draw(|f| ui::draw(f, &app, now))?;

        if event::poll(FRAME)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && app.handle_key(key.code, Instant::now()) == Control::Quit
        {
            return Ok(());
        }
    }
}
