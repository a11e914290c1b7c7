//! Interactive task list: the primary surface of Tick.

mod app;
mod theme;

use std::{io, time::Duration};

use app::App;
use color_eyre::Result;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tick_core::{storage::KeyValueStore, tasks::TaskList};
use tick_tasks::StoreTaskRepo;

/// Run the TUI until the user quits. The caller supplies the loaded
/// collection, so a corrupt store fails before the terminal is taken over.
pub fn launch<S: KeyValueStore>(
    repo: StoreTaskRepo<S>,
    tasks: TaskList,
    dark_mode: bool,
) -> Result<()> {
    // Guard restores the terminal even if we early-return.
    let _guard = TerminalGuard::enter()?;
    let mut terminal = _guard.terminal()?;
    let mut app = App::new(repo, tasks, dark_mode);

    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(150))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        if app.should_quit() {
            break;
        }
    }

    Ok(())
}

struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        // Alternate screen keeps the shell buffer clean.
        execute!(io::stdout(), EnterAlternateScreen)?;
        Ok(Self)
    }

    fn terminal(&self) -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
        let backend = CrosstermBackend::new(io::stdout());
        Ok(Terminal::new(backend)?)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        // Best-effort cleanup; errors are logged but not propagated from Drop.
        if let Err(err) = disable_raw_mode() {
            eprintln!("failed to disable raw mode: {err}");
        }
        if let Err(err) = execute!(io::stdout(), LeaveAlternateScreen) {
            eprintln!("failed to restore terminal: {err}");
        }
    }
}
