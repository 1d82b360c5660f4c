use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use std::io;

/// Raw mode, alternate screen and mouse capture for as long as the guard lives.
pub(crate) struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub(crate) fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        // from here on dropping the guard undoes whatever got enabled
        let guard = Self { _private: () };
        execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture, Hide)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = execute!(io::stdout(), DisableMouseCapture, Show, LeaveAlternateScreen) {
            log::error!("failed to restore screen: {}", err);
        }
        if let Err(err) = disable_raw_mode() {
            log::error!("failed to leave raw mode: {}", err);
        }
    }
}
