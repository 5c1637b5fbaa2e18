//! Capture session: shared state, lifecycle, and the two pipeline loops.
//!
//! A session wires three pieces together:
//! - [`FrameSlot`], the overwrite-latest buffer between the loops
//! - a capture thread feeding it from a [`crate::camera::FrameSource`]
//! - a render thread draining it through decode + ASCII render into a
//!   [`DisplaySink`]

mod controller;
mod display;
mod slot;

pub use controller::{Session, SessionState};
pub use display::{ControlLabel, DisplaySink};
pub use slot::FrameSlot;
