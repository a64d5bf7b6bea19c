pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod handler;
pub mod logging;
pub mod message;
pub mod request;
pub mod theme;
pub mod tui;
pub mod ui;

// Re-export main types for convenience
pub use app::{Action, App, Effect, Variant};
pub use client::ChatClient;
pub use config::Config;
pub use error::ChatError;
pub use message::{Message, Sender};
