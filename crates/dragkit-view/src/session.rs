//! Pointer bookkeeping between a press and its release.

use dragkit_foundation::{Direction, VelocityTracker};

/// A recognized drag, alive until release or cancel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DragSession {
    /// Direction locked in when the drag was recognized.
    pub initial_direction: Direction,
    /// Pointer x of the previous move event, in pixels.
    pub prev_x: f32,
}

/// Per-gesture pointer state.
#[derive(Debug, Clone, Default)]
pub(crate) struct GestureTracker {
    pub pointer_down: bool,
    pub initial_x: f32,
    pub initial_y: f32,
    /// Set when a drag ends; further moves are ignored until the next press.
    pub drag_ended: bool,
    pub velocity: VelocityTracker,
    pub session: Option<DragSession>,
}

impl GestureTracker {
    pub fn press(&mut self, x: f32, y: f32, time_ms: i64) {
        self.pointer_down = true;
        self.initial_x = x;
        self.initial_y = y;
        self.drag_ended = false;
        self.session = None;
        self.velocity.clear();
        self.velocity.add_sample(time_ms, x);
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    /// Whether movement to `(x, y)` passes the drag-initiation gate: the
    /// horizontal travel dominates and exceeds `touch_slop`.
    pub fn passes_slop(&self, x: f32, y: f32, touch_slop: f32) -> bool {
        let adx = (x - self.initial_x).abs();
        let ady = (y - self.initial_y).abs();
        adx > ady && adx > touch_slop
    }

    /// Close the session, returning it if one was active.
    pub fn finish(&mut self) -> Option<DragSession> {
        let session = self.session.take();
        if session.is_some() {
            self.drag_ended = true;
        }
        self.pointer_down = false;
        self.velocity.clear();
        session
    }
}
