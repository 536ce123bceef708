//! Robot testing framework for gesture-level testing
//!
//! This module provides a robot-style API that drives a real [`DragView`]
//! without a display:
//! - Perform interactions (press, move, drag, fling)
//! - Advance frame time to run animations and delayed tasks
//! - Inspect the resulting position and delegate state
//!
//! # Example
//!
//! ```
//! use dragkit_testing::{GestureRobot, RecordingDelegate};
//!
//! let mut robot = GestureRobot::new(RecordingDelegate::new(), 1000.0);
//!
//! // Drag the top view open; the first step only claims the gesture
//! robot.drag_and_hold(100.0, 300.0);
//! assert!((robot.position() - 0.18).abs() < 0.01);
//! robot.release(300.0);
//!
//! // Let any animation settle
//! robot.wait_for_idle();
//! ```

use dragkit_view::{DragConfig, DragDelegate, DragView};

/// Time between synthetic frames and between stepped pointer moves.
pub const FRAME_INTERVAL_MS: i64 = 16;

/// Upper bound for [`GestureRobot::wait_for_idle`], in frame time.
const IDLE_TIMEOUT_MS: i64 = 10_000;

const DRAG_STEPS: usize = 10;

/// Drives a [`DragView`] with synthetic pointer events on a virtual clock.
///
/// Pointer events and frames share one clock that only moves forward when
/// the robot advances it.
pub struct GestureRobot<D: DragDelegate> {
    view: DragView<D>,
    now_ms: i64,
    y: f32,
}

impl<D: DragDelegate> GestureRobot<D> {
    /// Attach `delegate` to a default-configured engine laid out at `width`.
    pub fn new(delegate: D, width: f32) -> Self {
        Self::with_config(delegate, width, DragConfig::default())
    }

    pub fn with_config(delegate: D, width: f32, config: DragConfig) -> Self {
        let mut view = DragView::new(config);
        view.set_delegate(delegate);
        view.on_layout(width);
        Self {
            view,
            now_ms: 0,
            y: 0.0,
        }
    }

    pub fn view(&self) -> &DragView<D> {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut DragView<D> {
        &mut self.view
    }

    /// The attached delegate.
    ///
    /// # Panics
    ///
    /// Panics if the delegate has been taken out of the engine.
    pub fn delegate(&self) -> &D {
        self.view.delegate().expect("robot engine has no delegate")
    }

    pub fn delegate_mut(&mut self) -> &mut D {
        self.view.delegate_mut().expect("robot engine has no delegate")
    }

    pub fn position(&self) -> f32 {
        self.view.position()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Press the pointer at `x`.
    pub fn press(&mut self, x: f32) -> bool {
        self.view.on_pointer_down(x, self.y, self.now_ms)
    }

    /// Advance the clock by `dt_ms` and move the pointer to `x`.
    pub fn move_to(&mut self, x: f32, dt_ms: i64) -> bool {
        self.now_ms += dt_ms;
        self.view.on_pointer_move(x, self.y, self.now_ms)
    }

    /// Advance the clock by `dt_ms` and move the pointer to `(x, y)`.
    pub fn move_to_xy(&mut self, x: f32, y: f32, dt_ms: i64) -> bool {
        self.now_ms += dt_ms;
        self.view.on_pointer_move(x, y, self.now_ms)
    }

    pub fn release(&mut self, x: f32) -> bool {
        self.view.on_pointer_up(x, self.y, self.now_ms)
    }

    pub fn cancel(&mut self) -> bool {
        self.view.on_pointer_cancel()
    }

    /// Press at `from` and move to `to` in even steps, one frame apart,
    /// without releasing.
    pub fn drag_and_hold(&mut self, from: f32, to: f32) {
        self.press(from);
        self.step_to(from, to, FRAME_INTERVAL_MS);
    }

    /// Drag slowly from `from` to `to` and release after a pause, so the
    /// release never counts as a swipe.
    pub fn drag(&mut self, from: f32, to: f32) {
        self.drag_and_hold(from, to);
        self.now_ms += 100;
        self.move_to(to, 0);
        self.release(to);
    }

    /// Drag from `from` to `to` within `duration_ms` and release immediately.
    pub fn fling(&mut self, from: f32, to: f32, duration_ms: i64) {
        self.press(from);
        let step_ms = (duration_ms / DRAG_STEPS as i64).max(1);
        self.step_to(from, to, step_ms);
        self.release(to);
    }

    fn step_to(&mut self, from: f32, to: f32, step_ms: i64) {
        for i in 1..=DRAG_STEPS {
            let t = i as f32 / DRAG_STEPS as f32;
            self.move_to(from + (to - from) * t, step_ms);
        }
    }

    /// Press and release at `x` without moving.
    pub fn click(&mut self, x: f32) -> bool {
        self.press(x);
        self.now_ms += FRAME_INTERVAL_MS;
        self.release(x)
    }

    /// Deliver a frame at the current time.
    pub fn frame(&mut self) {
        self.view.on_frame(self.now_ms as u64 * 1_000_000);
    }

    /// Advance frame time by `ms`, delivering a frame every interval.
    pub fn advance_time(&mut self, ms: i64) {
        let end = self.now_ms + ms;
        self.frame();
        while self.now_ms < end {
            self.now_ms = (self.now_ms + FRAME_INTERVAL_MS).min(end);
            self.frame();
        }
    }

    /// Pump frames until no animation or delayed task remains.
    ///
    /// # Panics
    ///
    /// Panics if the engine is still busy after ten seconds of frame time.
    pub fn wait_for_idle(&mut self) {
        let deadline = self.now_ms + IDLE_TIMEOUT_MS;
        self.frame();
        while self.view.is_animating() || self.view.has_pending_delayed() {
            assert!(
                self.now_ms < deadline,
                "engine did not become idle within {IDLE_TIMEOUT_MS}ms"
            );
            self.now_ms += FRAME_INTERVAL_MS;
            self.frame();
        }
    }
}
