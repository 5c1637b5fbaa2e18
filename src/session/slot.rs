//! Single-slot shared frame buffer.

use std::sync::Mutex;

/// Overwrite-latest buffer for one compressed frame.
///
/// The producer replaces the content wholesale; the consumer copies it out.
/// Neither side holds the lock for longer than the copy, so capture and
/// render never wait on each other's heavy work, only on the O(frame)
/// transfer itself. Frames are dropped, not queued, when the consumer is
/// slower than the producer.
#[derive(Debug, Default)]
pub struct FrameSlot {
    latest: Mutex<Option<Vec<u8>>>,
}

impl FrameSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Publish a frame, replacing whatever was there.
    pub fn publish(&self, frame: Vec<u8>) {
        if let Ok(mut slot) = self.latest.lock() {
            *slot = Some(frame);
        }
    }

    /// Copy out the latest frame, if any. The slot keeps its content.
    pub fn snapshot(&self) -> Option<Vec<u8>> {
        self.latest.lock().ok()?.clone()
    }

    /// Drop any held frame. Called between sessions so a new stream never
    /// decodes leftovers captured at different dimensions.
    pub fn clear(&self) {
        if let Ok(mut slot) = self.latest.lock() {
            *slot = None;
        }
    }
}
