//! Transcript data types
//!
//! These don't depend on the terminal UI, so the reducer and its tests can use
//! them without pulling in ratatui.

/// One entry in the transcript. Never mutated once appended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: Sender,
    pub text: String,
}

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Message {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            text: text.into(),
        }
    }
}

impl Sender {
    /// Label shown above the message body in the transcript
    pub fn label(&self) -> &'static str {
        match self {
            Sender::User => "You:",
            Sender::Bot => "Bot:",
        }
    }
}
