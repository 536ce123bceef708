//! Assertion utilities for robot testing

use dragkit_foundation::Direction;
use dragkit_view::{DragDelegate, DragView};

/// Assert that a value is within an expected range.
///
/// Positions come out of eased animations and normalized pixel math, so
/// exact comparisons are rarely meaningful.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert that the engine is closed and idle.
pub fn assert_at_rest<D: DragDelegate>(view: &DragView<D>, msg: &str) {
    assert_eq!(view.position(), 0.0, "{}: position", msg);
    assert_eq!(view.direction(), Direction::None, "{}: direction", msg);
    assert!(!view.is_animating(), "{}: still animating", msg);
}
