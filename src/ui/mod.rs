//! Terminal user interface.
//!
//! - [`Tui`] owns raw mode and the alternate screen with panic-safe restore
//! - [`TuiDisplay`] is the [`crate::session::DisplaySink`] the render loop
//!   writes into
//! - [`view`] holds the pure drawing functions
//! - [`handle_key_event`] maps key presses to [`UiAction`]s

mod display;
mod input;
mod tui;
pub mod view;

pub use display::{TuiDisplay, ViewState};
pub use input::{handle_key_event, UiAction};
pub use tui::Tui;
