//! Username chooser screen.
//!
//! Exposes the form state machine, the command dispatcher, rendering, and the
//! runtime that drives them on a terminal.

pub mod app;
pub mod dispatcher;
pub mod form;
pub mod render;
pub mod text_input;
pub mod theme;

pub use app::{outcome_for, ScreenLoop, ScreenOutcome, UsernameScreen};
pub use dispatcher::EventDispatcher;
pub use form::{update, Command, Focus, FormState, Msg, Phase};
pub use render::{draw_ui, view};
pub use theme::{Theme, ThemeError};
