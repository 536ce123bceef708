//! Shared gesture constants for drag recognition and release handling.
//!
//! Values are in logical pixels and milliseconds. Hosts with a platform
//! view configuration should feed their own values through the engine
//! configuration instead.

/// Touch slop in logical pixels.
///
/// Horizontal movement must exceed this distance from the press position
/// (and dominate the vertical movement) before a drag is recognized. Below
/// it, the gesture stays available to content underneath, e.g. as a tap.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Minimum release speed, in dip per millisecond, that counts as a swipe.
pub const SWIPE_MIN_VELOCITY: f32 = 1.5;

/// Snap animation duration for a zero-length hop.
pub const SNAP_MIN_DURATION_MS: u64 = 50;

/// Snap animation duration for a full-width traversal.
pub const SNAP_MAX_DURATION_MS: u64 = 200;
