//! Keyboard input handling for the TUI.
//!
//! Translates key events into application state changes and refresh
//! requests.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use crate::app::{App, AppState, PAGE_SCROLL_SIZE};

/// Handle a key press. Returns `true` when the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.state {
        AppState::ShowingHelp => {
            app.state = AppState::Normal;
            Ok(false)
        }
        AppState::Quitting => Ok(true),
        AppState::Normal => handle_normal_input(app, key).await,
    }
}

async fn handle_normal_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => return Ok(true),
        KeyCode::Char('?') => app.state = AppState::ShowingHelp,
        KeyCode::Char('r') => app.request_refresh().await,
        KeyCode::Char('R') => app.force_refresh().await,
        KeyCode::Char('j') | KeyCode::Down => app.select_next(1),
        KeyCode::Char('k') | KeyCode::Up => app.select_prev(1),
        KeyCode::PageDown => app.select_next(PAGE_SCROLL_SIZE),
        KeyCode::PageUp => app.select_prev(PAGE_SCROLL_SIZE),
        KeyCode::Char('g') | KeyCode::Home => app.select_first(),
        KeyCode::Char('G') | KeyCode::End => app.select_last(),
        _ => {}
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refresh::{RefreshCommand, RefreshHandle};
    use crossterm::event::KeyModifiers;
    use tokio::sync::mpsc;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> (App, mpsc::Receiver<RefreshCommand>) {
        let (_event_tx, event_rx) = mpsc::channel(8);
        let (command_tx, command_rx) = mpsc::channel(8);
        let handle = RefreshHandle {
            commands: command_tx,
            events: event_rx,
            task: None,
        };
        (App::with_refresh("http://test".to_string(), 500.0, handle), command_rx)
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _rx) = test_app();
        assert!(handle_input(&mut app, key(KeyCode::Char('q'))).await.unwrap());
        assert!(handle_input(&mut app, key(KeyCode::Esc)).await.unwrap());
    }

    #[tokio::test]
    async fn test_help_closes_on_any_key() {
        let (mut app, _rx) = test_app();

        assert!(!handle_input(&mut app, key(KeyCode::Char('?'))).await.unwrap());
        assert_eq!(app.state, AppState::ShowingHelp);

        // q closes the overlay instead of quitting
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).await.unwrap());
        assert_eq!(app.state, AppState::Normal);
    }

    #[tokio::test]
    async fn test_refresh_keys() {
        let (mut app, mut rx) = test_app();

        handle_input(&mut app, key(KeyCode::Char('r'))).await.unwrap();
        handle_input(&mut app, key(KeyCode::Char('R'))).await.unwrap();

        assert_eq!(rx.recv().await, Some(RefreshCommand::Refresh));
        assert_eq!(rx.recv().await, Some(RefreshCommand::ForceRefresh));
    }
}
