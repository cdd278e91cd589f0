//! Full-screen event loop.
//!
//! The poller thread produces reports; this loop drains them without blocking,
//! redraws, and polls the keyboard with a short timeout so clocks stay live.
//!
//! The terminal is restored on every exit path: normal quit, a setup step that
//! fails halfway, an error inside the loop, and a panic on the UI thread.

use std::io::{self, Stdout};
use std::thread::{self, ThreadId};
use std::time::Duration;

use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use log::{info, warn};
use monitor_common::Result;
use monitor_feed::{Cycle, Poller, PollerHandle};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::app::{App, Command};
use crate::ui;

/// Keyboard poll timeout; bounds redraw latency.
const INPUT_POLL: Duration = Duration::from_millis(50);

type CrosstermTerminal = Terminal<CrosstermBackend<Stdout>>;

/// Run the dashboard until the user quits.
pub fn run(cycle: Cycle, interval: Duration) -> Result<()> {
    install_panic_hook();

    let poller = Poller::start(cycle, interval)?;
    let mut app = App::new();

    let result = with_terminal(
        setup_terminal,
        |terminal| event_loop(terminal, &mut app, &poller),
        restore_terminal,
    );

    info!("Dashboard closed after {} cycles", app.cycles);
    let stopped = poller.shutdown();
    result.and(stopped)
}

/// Restore the terminal before the default hook prints a panic, but only for panics
/// on the thread that drives the screen. Fetch workers catch their own panics and
/// the dashboard keeps running, so they must leave raw mode alone.
fn install_panic_hook() {
    let ui_thread = thread::current().id();
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        if owns_terminal(ui_thread) {
            let _ = restore_terminal();
        }
        default_hook(info);
    }));
}

fn owns_terminal(ui_thread: ThreadId) -> bool {
    thread::current().id() == ui_thread
}

/// Run `body` on the value built by `setup`, then always run `restore`.
///
/// `restore` also runs when `setup` fails, since setup may have switched the
/// terminal into raw mode before failing. The first error wins.
fn with_terminal<T, R>(
    setup: impl FnOnce() -> Result<T>,
    body: impl FnOnce(&mut T) -> Result<R>,
    restore: impl FnOnce() -> Result<()>,
) -> Result<R> {
    let result = setup().and_then(|mut terminal| body(&mut terminal));
    let restored = restore();
    let value = result?;
    restored?;
    Ok(value)
}

fn setup_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal() -> Result<()> {
    let raw = disable_raw_mode();
    let screen = execute!(io::stdout(), LeaveAlternateScreen, Show);
    raw?;
    screen?;
    Ok(())
}

fn event_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    poller: &PollerHandle,
) -> Result<()> {
    loop {
        while let Ok(report) = poller.reports().try_recv() {
            app.apply(report);
        }

        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(INPUT_POLL)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.on_key(key) {
                        Command::Refresh => {
                            if let Err(e) = poller.refresh() {
                                warn!("Refresh request dropped: {}", e);
                            }
                        }
                        Command::Quit | Command::None => {}
                    }
                }
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_common::MonitorError;
    use std::cell::Cell;

    #[test]
    fn failed_setup_still_restores() {
        let restored = Cell::new(false);
        let body_ran = Cell::new(false);

        let result: Result<()> = with_terminal(
            || -> Result<()> { Err(MonitorError::Format("no tty".into())) },
            |_| {
                body_ran.set(true);
                Ok(())
            },
            || {
                restored.set(true);
                Ok(())
            },
        );

        assert!(matches!(result, Err(MonitorError::Format(msg)) if msg == "no tty"));
        assert!(restored.get());
        assert!(!body_ran.get());
    }

    #[test]
    fn loop_error_wins_over_restore_error() {
        let restored = Cell::new(false);

        let result: Result<()> = with_terminal(
            || Ok(0u8),
            |_| Err(MonitorError::Format("draw failed".into())),
            || {
                restored.set(true);
                Err(MonitorError::Format("restore failed".into()))
            },
        );

        assert!(matches!(result, Err(MonitorError::Format(msg)) if msg == "draw failed"));
        assert!(restored.get());
    }

    #[test]
    fn restore_error_is_reported_after_a_clean_loop() {
        let result = with_terminal(
            || Ok(1u8),
            |n| Ok(*n + 1),
            || Err(MonitorError::Format("restore failed".into())),
        );
        assert!(matches!(result, Err(MonitorError::Format(msg)) if msg == "restore failed"));

        let result = with_terminal(|| Ok(1u8), |n| Ok(*n + 1), || Ok(()));
        assert_eq!(result.unwrap(), 2);
    }

    #[test]
    fn only_the_ui_thread_owns_the_terminal() {
        let ui_thread = thread::current().id();
        assert!(owns_terminal(ui_thread));

        let on_worker = thread::spawn(move || owns_terminal(ui_thread))
            .join()
            .unwrap();
        assert!(!on_worker);
    }
}
