//! Easing curves and time-based tweens.

use std::f32::consts::PI;

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

/// Easing curves applied to a linear fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Easing {
    /// No easing.
    #[default]
    Linear,
    /// Starts slow and speeds up (`t²`). Used for swipe-outs from rest.
    Accelerate,
    /// Starts fast and slows down (`1 - (1 - t)²`). Used for snaps.
    Decelerate,
    /// Slow at both ends, following a cosine. Used for tease previews.
    AccelerateDecelerate,
}

impl Easing {
    pub fn transform(&self, fraction: f32) -> f32 {
        let t = fraction.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::Accelerate => t * t,
            Easing::Decelerate => 1.0 - (1.0 - t) * (1.0 - t),
            Easing::AccelerateDecelerate => ((t + 1.0) * PI).cos() / 2.0 + 0.5,
        }
    }
}

/// Duration and easing of a tween.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::Linear)
    }
}

/// One sampled frame of a [`Tween`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TweenFrame<T> {
    pub value: T,
    pub finished: bool,
}

/// Interpolates from `start` to `target` over the animation's duration.
///
/// The first sampled frame time becomes the tween's start time, so a tween
/// created between frames begins at the next frame rather than jumping ahead.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp + Clone> {
    start: T,
    target: T,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
}

impl<T: Lerp + Clone> Tween<T> {
    pub fn new(start: T, target: T, spec: AnimationSpec) -> Self {
        Self {
            start,
            target,
            spec,
            start_time_nanos: None,
        }
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// Sample the tween at `frame_time_nanos`.
    ///
    /// The final frame always reports exactly the target value.
    pub fn sample(&mut self, frame_time_nanos: u64) -> TweenFrame<T> {
        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);

        if self.spec.duration_millis == 0 {
            return TweenFrame {
                value: self.target.clone(),
                finished: true,
            };
        }

        let duration_nanos = self.spec.duration_millis * 1_000_000;
        let linear_progress = (elapsed_nanos as f32 / duration_nanos as f32).clamp(0.0, 1.0);

        if linear_progress >= 1.0 {
            TweenFrame {
                value: self.target.clone(),
                finished: true,
            }
        } else {
            let progress = self.spec.easing.transform(linear_progress);
            TweenFrame {
                value: self.start.lerp(&self.target, progress),
                finished: false,
            }
        }
    }
}

/// Snap duration for a hop of normalized length `distance`.
///
/// Linearly interpolates between `min_ms` (no distance) and `max_ms` (a full
/// container width).
pub fn snap_duration_millis(distance: f32, min_ms: u64, max_ms: u64) -> u64 {
    let distance = distance.abs();
    let duration = distance * max_ms as f32 + (1.0 - distance) * min_ms as f32;
    if duration.is_finite() && duration > 0.0 {
        duration.round() as u64
    } else {
        log::trace!("snap duration collapsed to 0 for distance {distance}");
        0
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
