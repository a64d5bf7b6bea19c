use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::{Action, App, Effect, InputMode};
use crate::client::ChatClient;
use crate::request::RequestSlot;
use crate::tui::AppEvent;

const WHEEL_LINES: u16 = 3;

/// Feeds events into the reducer and carries out the effects it returns.
pub struct Dispatcher {
    client: ChatClient,
    requests: RequestSlot,
    events: UnboundedSender<AppEvent>,
}

impl Dispatcher {
    pub fn new(client: ChatClient, events: UnboundedSender<AppEvent>) -> Self {
        Self {
            client,
            requests: RequestSlot::new(),
            events,
        }
    }

    pub fn dispatch(&mut self, app: &mut App, event: AppEvent) {
        if let AppEvent::Reply { turn, .. } = &event {
            self.requests.finish(*turn);
        }

        let Some(action) = action_for(app, event) else {
            return;
        };

        match app.update(action) {
            Effect::None => {}
            Effect::SendRequest { turn, message } => {
                self.requests
                    .start(&self.client, self.events.clone(), turn, message);
            }
        }
    }

    pub fn pending_turn(&self) -> Option<u64> {
        self.requests.pending_turn()
    }
}

/// Map a terminal or network event to the action it stands for, if any
pub fn action_for(app: &App, event: AppEvent) -> Option<Action> {
    match event {
        AppEvent::Key(key) => action_for_key(app, key),
        AppEvent::Mouse(mouse) => action_for_mouse(app, mouse),
        AppEvent::Resize(_, _) => None,
        AppEvent::Tick => Some(Action::Tick),
        AppEvent::Reply { turn, outcome } => Some(Action::ReplyReceived { turn, outcome }),
    }
}

fn action_for_key(app: &App, key: KeyEvent) -> Option<Action> {
    // Global keys that work in any mode
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Action::Quit),
            KeyCode::Char('d') => Some(Action::ToggleDarkMode),
            _ => None,
        };
    }

    let page = app.layout.transcript_inner().1.max(1);
    match key.code {
        KeyCode::PageUp => return Some(Action::ScrollUp(page)),
        KeyCode::PageDown => return Some(Action::ScrollDown(page)),
        _ => {}
    }

    // A disabled input swallows typing, so it can't turn into commands
    if !app.input_enabled() {
        return match key.code {
            KeyCode::Up => Some(Action::ScrollUp(1)),
            KeyCode::Down => Some(Action::ScrollDown(1)),
            _ => None,
        };
    }

    match app.input_mode {
        InputMode::Normal => action_for_normal_key(key),
        InputMode::Editing => action_for_editing_key(key),
    }
}

fn action_for_normal_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        KeyCode::Char('q') => Some(Action::Quit),
        KeyCode::Char('i') | KeyCode::Tab | KeyCode::Enter => Some(Action::FocusInput),
        KeyCode::Char('d') => Some(Action::ToggleDarkMode),
        KeyCode::Char('k') | KeyCode::Up => Some(Action::ScrollUp(1)),
        KeyCode::Char('j') | KeyCode::Down => Some(Action::ScrollDown(1)),
        KeyCode::Home => Some(Action::ScrollUp(u16::MAX)),
        KeyCode::End => Some(Action::ScrollDown(u16::MAX)),
        _ => None,
    }
}

fn action_for_editing_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        // Shift+Enter is plain Enter: there is no multi-line input
        KeyCode::Enter => Some(Action::Submit),
        KeyCode::Esc | KeyCode::Tab => Some(Action::Unfocus),
        KeyCode::Backspace => Some(Action::Backspace),
        KeyCode::Delete => Some(Action::Delete),
        KeyCode::Left => Some(Action::CursorLeft),
        KeyCode::Right => Some(Action::CursorRight),
        KeyCode::Home => Some(Action::CursorHome),
        KeyCode::End => Some(Action::CursorEnd),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::ALT) => {
            Some(Action::InsertChar(c))
        }
        _ => None,
    }
}

/// Check if a point is within a rectangle
fn point_in_rect(x: u16, y: u16, rect: Rect) -> bool {
    x >= rect.x && x < rect.x + rect.width && y >= rect.y && y < rect.y + rect.height
}

fn action_for_mouse(app: &App, mouse: MouseEvent) -> Option<Action> {
    let (x, y) = (mouse.column, mouse.row);
    let layout = &app.layout;
    let in_transcript = point_in_rect(x, y, layout.transcript);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            if point_in_rect(x, y, layout.send_button) {
                app.send_enabled().then_some(Action::Submit)
            } else if layout.theme_toggle.is_some_and(|r| point_in_rect(x, y, r)) {
                Some(Action::ToggleDarkMode)
            } else if point_in_rect(x, y, layout.input) {
                Some(Action::FocusInput)
            } else if in_transcript {
                Some(Action::Unfocus)
            } else {
                None
            }
        }
        MouseEventKind::ScrollDown if in_transcript => Some(Action::ScrollDown(WHEEL_LINES)),
        MouseEventKind::ScrollUp if in_transcript => Some(Action::ScrollUp(WHEEL_LINES)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{Variant, ViewLayout};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> AppEvent {
        AppEvent::Key(KeyEvent::new(code, modifiers))
    }

    fn click(x: u16, y: u16) -> AppEvent {
        AppEvent::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: x,
            row: y,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn laid_out(variant: Variant) -> App {
        let mut app = App::new(variant, false);
        app.set_layout(ViewLayout {
            transcript: Rect::new(0, 1, 60, 11),
            input: Rect::new(0, 12, 50, 3),
            send_button: Rect::new(50, 12, 10, 3),
            theme_toggle: Some(Rect::new(45, 0, 15, 1)),
        });
        app
    }

    fn apply(app: &mut App, event: AppEvent) -> Effect {
        match action_for(app, event) {
            Some(action) => app.update(action),
            None => Effect::None,
        }
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            apply(app, key(KeyCode::Char(c), KeyModifiers::NONE));
        }
    }

    #[test]
    fn enter_and_send_click_mutate_the_same_way() {
        let mut by_key = laid_out(Variant::Enhanced);
        type_text(&mut by_key, "Hello");
        let key_effect = apply(&mut by_key, key(KeyCode::Enter, KeyModifiers::NONE));

        let mut by_click = laid_out(Variant::Enhanced);
        type_text(&mut by_click, "Hello");
        let click_effect = apply(&mut by_click, click(53, 13));

        assert_eq!(key_effect, click_effect);
        assert_eq!(by_key.messages, by_click.messages);
        assert_eq!(by_key.loading, by_click.loading);
        assert_eq!(by_key.input, by_click.input);
    }

    #[test]
    fn shift_enter_is_enter() {
        let mut app = laid_out(Variant::Enhanced);
        type_text(&mut app, "Hi");
        let effect = apply(&mut app, key(KeyCode::Enter, KeyModifiers::SHIFT));
        assert!(matches!(effect, Effect::SendRequest { .. }));
    }

    #[test]
    fn shifted_characters_are_typed() {
        let mut app = laid_out(Variant::Enhanced);
        apply(&mut app, key(KeyCode::Char('H'), KeyModifiers::SHIFT));
        apply(&mut app, key(KeyCode::Char('?'), KeyModifiers::SHIFT));
        assert_eq!(app.input, "H?");
    }

    #[test]
    fn send_click_ignored_while_disabled() {
        let mut app = laid_out(Variant::Enhanced);
        type_text(&mut app, "Hello");
        apply(&mut app, key(KeyCode::Enter, KeyModifiers::NONE));

        assert!(action_for(&app, click(53, 13)).is_none());
    }

    #[test]
    fn classic_needs_focus_before_typing() {
        let mut app = laid_out(Variant::Classic);
        type_text(&mut app, "i");
        assert_eq!(app.input, "");
        assert_eq!(app.input_mode, InputMode::Editing);

        type_text(&mut app, "hey");
        assert_eq!(app.input, "hey");
    }

    #[test]
    fn clicking_input_focuses_it() {
        let mut app = laid_out(Variant::Classic);
        apply(&mut app, click(5, 13));
        assert_eq!(app.input_mode, InputMode::Editing);

        apply(&mut app, click(5, 4));
        assert_eq!(app.input_mode, InputMode::Normal);
    }

    #[test]
    fn toggle_by_click_and_keys() {
        let mut app = laid_out(Variant::Enhanced);
        apply(&mut app, click(50, 0));
        assert!(app.dark_mode);

        apply(&mut app, key(KeyCode::Char('d'), KeyModifiers::CONTROL));
        assert!(!app.dark_mode);

        // Typing 'd' into the input is just a character
        apply(&mut app, key(KeyCode::Char('d'), KeyModifiers::NONE));
        assert!(!app.dark_mode);
        assert_eq!(app.input, "d");
    }

    #[test]
    fn ctrl_c_quits_from_anywhere() {
        let mut app = laid_out(Variant::Enhanced);
        apply(&mut app, key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn q_only_quits_outside_the_input() {
        let mut app = laid_out(Variant::Enhanced);
        apply(&mut app, key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(!app.should_quit);

        apply(&mut app, key(KeyCode::Esc, KeyModifiers::NONE));
        apply(&mut app, key(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }

    #[test]
    fn typing_while_loading_is_inert() {
        let mut app = laid_out(Variant::Enhanced);
        type_text(&mut app, "Hello");
        apply(&mut app, key(KeyCode::Enter, KeyModifiers::NONE));
        assert!(app.loading);

        type_text(&mut app, "quick dq");
        apply(&mut app, key(KeyCode::Backspace, KeyModifiers::NONE));
        apply(&mut app, key(KeyCode::Enter, KeyModifiers::NONE));

        assert!(!app.should_quit);
        assert!(!app.dark_mode);
        assert_eq!(app.input, "Hello");
        assert_eq!(app.messages.len(), 1);

        // Esc is swallowed as well, so the keys never reach normal mode
        apply(&mut app, key(KeyCode::Esc, KeyModifiers::NONE));
        type_text(&mut app, "qdi");
        assert!(!app.should_quit);
        assert!(!app.dark_mode);

        // Ctrl+C still quits
        apply(&mut app, key(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
