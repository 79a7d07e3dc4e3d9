use crate::app::{App, InputMode, Screen};
use crate::tui::AppEvent;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

pub fn handle_event(app: &mut App, event: AppEvent) -> Result<()> {
    match event {
        AppEvent::Key(key) => handle_key(app, key),
        AppEvent::Resize(_, _) => {}
        AppEvent::Tick => {
            app.tick_animation();
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, key: KeyEvent) {
    // Global keys that work in any mode
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.screen {
        Screen::Landing => handle_landing(app, key),
        Screen::Chat => match app.input_mode {
            InputMode::Normal => handle_chat_normal(app, key),
            InputMode::Editing => handle_chat_editing(app, key),
        },
    }
}

fn handle_landing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

        // The landing screen's one action: open the chat
        KeyCode::Enter | KeyCode::Char('s') => app.open_chat(),

        _ => {}
    }
}

fn handle_chat_normal(app: &mut App, key: KeyEvent) {
    match key.code {
        // Back to the landing screen
        KeyCode::Esc | KeyCode::Char('q') => app.back_to_landing(),

        // Transcript scrolling
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        KeyCode::Char('g') => app.chat_scroll = 0,
        KeyCode::Char('G') => app.scroll_chat_to_bottom(),

        // Back to writing
        KeyCode::Char('i') | KeyCode::Char('/') => {
            app.input_mode = InputMode::Editing;
            app.input_cursor = app.conversation.draft_char_count();
        }

        _ => {}
    }
}

fn handle_chat_editing(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
        }
        // Enter submits; Shift+Enter is reserved and does nothing
        KeyCode::Enter => {
            if !key.modifiers.contains(KeyModifiers::SHIFT) {
                app.submit_message();
            }
        }
        KeyCode::Backspace => {
            if app.input_cursor > 0 {
                app.input_cursor -= 1;
                app.conversation.remove_char(app.input_cursor);
            }
        }
        KeyCode::Delete => {
            app.conversation.remove_char(app.input_cursor);
        }
        KeyCode::Left => {
            app.input_cursor = app.input_cursor.saturating_sub(1);
        }
        KeyCode::Right => {
            let char_count = app.conversation.draft_char_count();
            app.input_cursor = (app.input_cursor + 1).min(char_count);
        }
        KeyCode::Home => {
            app.input_cursor = 0;
        }
        KeyCode::End => {
            app.input_cursor = app.conversation.draft_char_count();
        }
        KeyCode::Char(c) => {
            app.conversation.insert_char(app.input_cursor, c);
            app.input_cursor += 1;
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use finadvisor_core::Advisor;
    use std::time::Duration;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn test_app() -> App {
        App::new(Advisor::new(Duration::from_millis(1500)))
    }

    #[test]
    fn landing_enter_opens_chat_in_editing_mode() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Chat);
        assert_eq!(app.input_mode, InputMode::Editing);
    }

    #[test]
    fn escape_leaves_editing_then_chat() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Enter));

        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Chat);
        assert_eq!(app.input_mode, InputMode::Normal);

        handle_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Landing);
    }

    #[tokio::test]
    async fn typed_characters_land_in_the_draft() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Enter));

        for c in "tax?".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }
        assert_eq!(app.conversation.draft(), "tax?");

        handle_key(&mut app, key(KeyCode::Backspace));
        assert_eq!(app.conversation.draft(), "tax");

        // Cursor movement + insert in the middle
        handle_key(&mut app, key(KeyCode::Home));
        handle_key(&mut app, key(KeyCode::Right));
        handle_key(&mut app, key(KeyCode::Char('!')));
        assert_eq!(app.conversation.draft(), "t!ax");
    }

    #[tokio::test]
    async fn enter_with_blank_draft_is_a_silent_noop() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Enter)); // open chat
        let before = app.conversation.messages().len();

        handle_key(&mut app, key(KeyCode::Enter)); // submit nothing
        handle_key(&mut app, key(KeyCode::Char(' ')));
        handle_key(&mut app, key(KeyCode::Enter));

        assert_eq!(app.conversation.messages().len(), before);
        assert!(!app.conversation.is_busy());
        assert_eq!(app.screen, Screen::Chat);
    }

    #[tokio::test]
    async fn shift_enter_does_not_submit() {
        let mut app = test_app();
        handle_key(&mut app, key(KeyCode::Enter));
        for c in "tax".chars() {
            handle_key(&mut app, key(KeyCode::Char(c)));
        }

        handle_key(&mut app, KeyEvent::new(KeyCode::Enter, KeyModifiers::SHIFT));
        assert!(!app.conversation.is_busy());
        assert_eq!(app.conversation.draft(), "tax");

        handle_key(&mut app, key(KeyCode::Enter));
        assert!(app.conversation.is_busy());
    }
}
