//! Frame-driven animation primitives for Dragkit.
//!
//! Animations are sampled with host frame times in nanoseconds, so a
//! headless host (or a test) fully controls the clock.

mod animation;

pub use animation::*;
