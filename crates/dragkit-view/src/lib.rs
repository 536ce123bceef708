//! The Dragkit drag engine.
//!
//! [`DragView`] turns a single horizontal pointer gesture into a normalized
//! position for its top view and reports every step to a [`DragDelegate`].
//! The host feeds it layout, pointer events and frame times; nothing here
//! touches a display.

mod config;
mod context;
mod delegate;
mod drag_view;
mod session;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, DragConfig};
pub use context::DragContext;
pub use delegate::{CompletionTag, DragDelegate, SwipeRelease};
pub use drag_view::DragView;

pub use dragkit_animation::{AnimationSpec, Easing};
pub use dragkit_foundation::{Direction, PointerEvent, PointerEventKind, SharedContent, Side};
