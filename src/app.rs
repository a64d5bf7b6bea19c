use ratatui::layout::Rect;
use serde::{Deserialize, Serialize};

use crate::error::ChatError;
use crate::message::Message;
use crate::ui::wrap_text_to_width;

/// Number of frames in the loading spinner
pub const SPINNER_FRAMES: u8 = 4;

pub const CLASSIC_FALLBACK: &str = "Sorry, an error occurred.";
pub const ENHANCED_FALLBACK: &str =
    "Sorry, I couldn't reach the server. Please check that the backend is running and try again.";

/// Which flavour of the widget is running.
///
/// `Classic` is the bare transcript + input + send. `Enhanced` adds autoscroll,
/// the disabled/loading state, the dark mode toggle and input autofocus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    Classic,
    #[default]
    Enhanced,
}

impl Variant {
    pub fn fallback_text(&self) -> &'static str {
        match self {
            Variant::Classic => CLASSIC_FALLBACK,
            Variant::Enhanced => ENHANCED_FALLBACK,
        }
    }

    pub fn is_enhanced(&self) -> bool {
        *self == Variant::Enhanced
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

/// Screen regions from the last render, used for mouse hit-testing and for
/// wrap/scroll calculations.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewLayout {
    pub transcript: Rect,
    pub input: Rect,
    pub send_button: Rect,
    pub theme_toggle: Option<Rect>,
}

impl ViewLayout {
    /// Transcript size inside its borders
    pub fn transcript_inner(&self) -> (u16, u16) {
        (
            self.transcript.width.saturating_sub(2),
            self.transcript.height.saturating_sub(2),
        )
    }
}

/// Everything the user (or the network) can do to the widget
#[derive(Debug)]
pub enum Action {
    Submit,
    InsertChar(char),
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,
    FocusInput,
    Unfocus,
    ToggleDarkMode,
    ScrollUp(u16),
    ScrollDown(u16),
    ReplyReceived {
        turn: u64,
        outcome: Result<String, ChatError>,
    },
    Tick,
    Quit,
}

/// Work the reducer asks the runtime to perform
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    SendRequest { turn: u64, message: String },
}

pub struct App {
    pub variant: Variant,
    pub should_quit: bool,

    // Transcript
    pub messages: Vec<Message>,
    pub scroll: u16,

    // Draft
    pub input: String,
    pub cursor: usize, // in chars, not bytes
    pub input_mode: InputMode,

    // Request state
    pub loading: bool,
    next_turn: u64,
    pending_turn: Option<u64>,

    // Presentation
    pub dark_mode: bool,
    pub animation_frame: u8, // index into the spinner next to "Thinking..."
    pub layout: ViewLayout,
}

/// Convert a character index to a byte index for UTF-8 safe string operations
fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices()
        .nth(char_idx)
        .map(|(i, _)| i)
        .unwrap_or(s.len())
}

impl App {
    pub fn new(variant: Variant, dark_mode: bool) -> Self {
        Self {
            variant,
            should_quit: false,

            messages: Vec::new(),
            scroll: 0,

            input: String::new(),
            cursor: 0,
            // Autofocus only exists in the enhanced widget
            input_mode: if variant.is_enhanced() {
                InputMode::Editing
            } else {
                InputMode::Normal
            },

            loading: false,
            next_turn: 0,
            pending_turn: None,

            dark_mode: variant.is_enhanced() && dark_mode,
            animation_frame: 0,
            layout: ViewLayout::default(),
        }
    }

    /// Apply one action. All state changes go through here.
    pub fn update(&mut self, action: Action) -> Effect {
        match action {
            Action::Submit => return self.submit(),
            Action::ReplyReceived { turn, outcome } => self.receive_reply(turn, outcome),
            Action::InsertChar(c) => {
                if self.input_enabled() {
                    let byte_pos = char_to_byte_index(&self.input, self.cursor);
                    self.input.insert(byte_pos, c);
                    self.cursor += 1;
                }
            }
            Action::Backspace => {
                if self.input_enabled() && self.cursor > 0 {
                    self.cursor -= 1;
                    let byte_pos = char_to_byte_index(&self.input, self.cursor);
                    self.input.remove(byte_pos);
                }
            }
            Action::Delete => {
                if self.input_enabled() && self.cursor < self.input.chars().count() {
                    let byte_pos = char_to_byte_index(&self.input, self.cursor);
                    self.input.remove(byte_pos);
                }
            }
            Action::CursorLeft => {
                self.cursor = self.cursor.saturating_sub(1);
            }
            Action::CursorRight => {
                self.cursor = (self.cursor + 1).min(self.input.chars().count());
            }
            Action::CursorHome => {
                self.cursor = 0;
            }
            Action::CursorEnd => {
                self.cursor = self.input.chars().count();
            }
            Action::FocusInput => {
                if self.input_enabled() {
                    self.input_mode = InputMode::Editing;
                }
            }
            Action::Unfocus => {
                self.input_mode = InputMode::Normal;
            }
            Action::ToggleDarkMode => {
                if self.variant.is_enhanced() {
                    self.dark_mode = !self.dark_mode;
                }
            }
            Action::ScrollUp(n) => {
                self.scroll = self.scroll.saturating_sub(n);
            }
            Action::ScrollDown(n) => {
                self.scroll = self.scroll.saturating_add(n).min(self.max_scroll());
            }
            Action::Tick => {
                if self.loading {
                    self.animation_frame = (self.animation_frame + 1) % SPINNER_FRAMES;
                }
            }
            Action::Quit => {
                self.should_quit = true;
            }
        }
        Effect::None
    }

    fn submit(&mut self) -> Effect {
        // Exact emptiness check: whitespace-only drafts are still sent
        if self.input.is_empty() || self.pending_turn.is_some() {
            return Effect::None;
        }

        let draft = self.input.clone();
        self.messages.push(Message::user(draft.clone()));

        let turn = self.next_turn;
        self.next_turn += 1;
        self.pending_turn = Some(turn);
        self.loading = true;
        self.animation_frame = 0;

        // Focus stays where it is; `input_enabled` gates editing while loading
        if self.variant.is_enhanced() {
            self.scroll_to_bottom();
        }

        tracing::debug!(turn, chars = draft.chars().count(), "sending chat message");
        Effect::SendRequest {
            turn,
            message: draft,
        }
    }

    fn receive_reply(&mut self, turn: u64, outcome: Result<String, ChatError>) {
        if self.pending_turn != Some(turn) {
            tracing::debug!(turn, pending = ?self.pending_turn, "dropping stale chat reply");
            return;
        }
        self.pending_turn = None;

        let text = match outcome {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(turn, error = %e, "error calling chat API");
                self.variant.fallback_text().to_string()
            }
        };
        self.messages.push(Message::bot(text));

        self.loading = false;
        self.input.clear();
        self.cursor = 0;

        if self.variant.is_enhanced() {
            self.input_mode = InputMode::Editing;
            self.scroll_to_bottom();
        }
    }

    /// Whether keystrokes may edit the draft right now
    pub fn input_enabled(&self) -> bool {
        !(self.loading && self.variant.is_enhanced())
    }

    /// Whether the send control is clickable right now
    pub fn send_enabled(&self) -> bool {
        self.input_enabled()
    }

    /// The "Thinking..." indicator belongs to the enhanced widget only
    pub fn show_thinking(&self) -> bool {
        self.loading && self.variant.is_enhanced()
    }

    pub fn set_layout(&mut self, layout: ViewLayout) {
        self.layout = layout;
        self.scroll = self.scroll.min(self.max_scroll());
    }

    fn wrap_width(&self) -> usize {
        // Use actual transcript width for wrap calculation, default to 50 if not rendered yet
        match self.layout.transcript_inner().0 {
            0 => 50,
            w => w as usize,
        }
    }

    fn visible_height(&self) -> u16 {
        match self.layout.transcript_inner().1 {
            0 => 20,
            h => h,
        }
    }

    /// Number of transcript lines the UI will draw at the current width
    pub fn transcript_line_count(&self) -> u16 {
        let width = self.wrap_width();
        let mut total_lines: usize = 0;

        for msg in &self.messages {
            total_lines += 1; // Sender label
            total_lines += msg
                .text
                .split('\n')
                .map(|line| wrap_text_to_width(line, width).len())
                .sum::<usize>();
            total_lines += 1; // Blank line after message
        }

        if self.show_thinking() {
            total_lines += 2; // "Bot:" + "Thinking..."
        }

        total_lines.min(u16::MAX as usize) as u16
    }

    fn max_scroll(&self) -> u16 {
        self.transcript_line_count()
            .saturating_sub(self.visible_height())
    }

    /// Scroll so the newest message (or "Thinking...") is visible
    pub fn scroll_to_bottom(&mut self) {
        self.scroll = self.max_scroll();
    }
}
