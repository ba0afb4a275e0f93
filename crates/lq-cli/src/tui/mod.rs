mod board;

use std::io;
use std::time::{Duration, Instant};

use crossterm::cursor::Show;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::*;

use lq_challenge::{
    ArcadeSession, ChallengeConfig, Heading, SessionDriver, SessionEvent, SessionResult,
};

/// Longest wait between redraws when no timer is due sooner.
const FRAME_MS: u64 = 50;

/// Raw mode and the alternate screen, undone on drop on every exit path.
struct TerminalGuard;

impl TerminalGuard {
    fn enter() -> Result<Self, String> {
        enable_raw_mode().map_err(|e| format!("terminal error: {e}"))?;
        let guard = TerminalGuard;
        execute!(io::stdout(), EnterAlternateScreen)
            .map_err(|e| format!("terminal error: {e}"))?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        disable_raw_mode().ok();
        execute!(io::stdout(), LeaveAlternateScreen, Show).ok();
    }
}

/// Play an arcade run in the terminal. Returns `None` if the player quits.
pub fn play_arcade(config: &ChallengeConfig) -> Result<Option<SessionResult>, String> {
    let session = ArcadeSession::new(config).map_err(|e| e.to_string())?;
    let mut driver = SessionDriver::new(session);

    let _guard = TerminalGuard::enter()?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend).map_err(|e| format!("terminal error: {e}"))?;

    run_loop(&mut terminal, &mut driver)
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    driver: &mut SessionDriver<ArcadeSession>,
) -> Result<Option<SessionResult>, String> {
    let started = Instant::now();
    driver.start();

    loop {
        let now = elapsed_ms(started);
        if let Some(result) = driver.advance_to(now) {
            // Leave the final board up briefly.
            terminal
                .draw(|frame| board::draw(frame, driver.session()))
                .map_err(|e| format!("draw error: {e}"))?;
            std::thread::sleep(Duration::from_millis(600));
            return Ok(Some(result));
        }

        terminal
            .draw(|frame| board::draw(frame, driver.session()))
            .map_err(|e| format!("draw error: {e}"))?;

        let wait = driver
            .next_due()
            .map_or(FRAME_MS, |due| due.saturating_sub(now).min(FRAME_MS));
        if !event::poll(Duration::from_millis(wait)).map_err(|e| format!("event error: {e}"))? {
            continue;
        }

        if let Event::Key(key) = event::read().map_err(|e| format!("event error: {e}"))? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                driver.abandon();
                return Ok(None);
            }
            let heading = match key.code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    driver.abandon();
                    return Ok(None);
                }
                KeyCode::Up | KeyCode::Char('w') => Heading::Up,
                KeyCode::Down | KeyCode::Char('s') => Heading::Down,
                KeyCode::Left | KeyCode::Char('a') => Heading::Left,
                KeyCode::Right | KeyCode::Char('d') => Heading::Right,
                _ => continue,
            };
            // Catch up first so the turn lands on the right step.
            if let Some(result) = driver.advance_to(elapsed_ms(started)) {
                return Ok(Some(result));
            }
            driver.input(SessionEvent::Steer(heading));
        }
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}
