//! Display sink consumed by the render loop.

use crate::ascii::AsciiFrame;

/// Label of the start/stop control surfaced by the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlLabel {
    /// No session running; the control offers to start one.
    #[default]
    Start,
    /// A session is capturing; the control offers to stop it.
    Stop,
}

impl ControlLabel {
    pub fn text(&self) -> &'static str {
        match self {
            ControlLabel::Start => "Start",
            ControlLabel::Stop => "Stop",
        }
    }
}

/// Where rendered frames and control state go.
///
/// The session only ever writes to the display; it never reads UI state
/// back. Publishing a frame is a wholesale overwrite of whatever is
/// currently shown.
pub trait DisplaySink: Send + Sync {
    /// Replace the displayed ASCII text.
    fn set_frame(&self, frame: AsciiFrame);

    /// Update the start/stop control label.
    fn set_control_label(&self, label: ControlLabel);
}
