//! The TUI's implementation of the display sink.

use std::sync::{Arc, Mutex};

use crate::ascii::AsciiFrame;
use crate::session::{ControlLabel, DisplaySink};

/// Snapshot of everything the UI draws.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    /// Latest rendered frame, if any has arrived yet
    pub frame: Option<AsciiFrame>,
    /// Current start/stop control label
    pub control_label: ControlLabel,
}

/// Shared display state written by the render loop and read by the UI
/// thread at its own pace.
#[derive(Debug, Default)]
pub struct TuiDisplay {
    state: Mutex<ViewState>,
}

impl TuiDisplay {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Copy out the current view state for drawing.
    pub fn view_state(&self) -> ViewState {
        self.state
            .lock()
            .map(|s| s.clone())
            .unwrap_or_default()
    }
}

impl DisplaySink for TuiDisplay {
    fn set_frame(&self, frame: AsciiFrame) {
        if let Ok(mut state) = self.state.lock() {
            state.frame = Some(frame);
        }
    }

    fn set_control_label(&self, label: ControlLabel) {
        if let Ok(mut state) = self.state.lock() {
            state.control_label = label;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_frame_overwrites() {
        let display = TuiDisplay::new();
        display.set_frame(AsciiFrame::from_chars(vec!['a'], 1, 1));
        display.set_frame(AsciiFrame::from_chars(vec!['b'], 1, 1));
        let state = display.view_state();
        assert_eq!(state.frame.unwrap().chars, vec!['b']);
    }

    #[test]
    fn test_label_updates() {
        let display = TuiDisplay::new();
        assert_eq!(display.view_state().control_label, ControlLabel::Start);
        display.set_control_label(ControlLabel::Stop);
        assert_eq!(display.view_state().control_label, ControlLabel::Stop);
    }
}
