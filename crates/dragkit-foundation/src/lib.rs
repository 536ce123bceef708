//! Foundation types for Dragkit: directions, normalization helpers, pointer
//! input, velocity tracking and the visual content interface.

pub mod content;
pub mod direction;
pub mod gesture_constants;
pub mod normalization;
pub mod pointer;
pub mod velocity_tracker;


pub use content::{ContentState, ContentView, SharedContent};
pub use direction::{Direction, DirectionError, Side};
pub use normalization::Normalize;
pub use pointer::{PointerEvent, PointerEventKind};
pub use velocity_tracker::VelocityTracker;

pub mod prelude {
    pub use crate::content::{ContentState, ContentView, SharedContent};
    pub use crate::direction::{Direction, Side};
    pub use crate::gesture_constants::*;
    pub use crate::normalization::Normalize;
    pub use crate::pointer::{PointerEvent, PointerEventKind};
}
