use dragkit_foundation::gesture_constants::{
    DRAG_THRESHOLD, SNAP_MAX_DURATION_MS, SNAP_MIN_DURATION_MS, SWIPE_MIN_VELOCITY,
};
use std::fmt;

/// Engine configuration, normally derived from the platform's view configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragConfig {
    /// Horizontal distance in pixels a pointer must travel before a drag is recognized.
    pub touch_slop: f32,
    /// Pixels per density-independent pixel.
    pub density: f32,
    /// Minimum release speed in dip/ms that is offered to the delegate as a swipe.
    pub swipe_min_velocity: f32,
    /// Whether a drag may continue through rest into the opposite side.
    ///
    /// When false, the user has to lift the pointer and start a new gesture
    /// to open the other side.
    pub allow_cross_drag: bool,
    pub snap_min_duration_ms: u64,
    pub snap_max_duration_ms: u64,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD,
            density: 1.0,
            swipe_min_velocity: SWIPE_MIN_VELOCITY,
            allow_cross_drag: false,
            snap_min_duration_ms: SNAP_MIN_DURATION_MS,
            snap_max_duration_ms: SNAP_MAX_DURATION_MS,
        }
    }
}

impl DragConfig {
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_density(mut self, density: f32) -> Self {
        self.density = density;
        self
    }

    pub fn with_swipe_min_velocity(mut self, velocity: f32) -> Self {
        self.swipe_min_velocity = velocity;
        self
    }

    pub fn with_cross_drag(mut self, allow: bool) -> Self {
        self.allow_cross_drag = allow;
        self
    }

    pub fn with_snap_durations(mut self, min_ms: u64, max_ms: u64) -> Self {
        self.snap_min_duration_ms = min_ms;
        self.snap_max_duration_ms = max_ms;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.touch_slop.is_nan() || self.touch_slop < 0.0 {
            return Err(ConfigError::InvalidTouchSlop(self.touch_slop));
        }
        if !self.density.is_finite() || self.density <= 0.0 {
            return Err(ConfigError::InvalidDensity(self.density));
        }
        if self.swipe_min_velocity.is_nan() || self.swipe_min_velocity < 0.0 {
            return Err(ConfigError::InvalidSwipeVelocity(self.swipe_min_velocity));
        }
        if self.snap_min_duration_ms > self.snap_max_duration_ms {
            return Err(ConfigError::InvertedSnapDurations {
                min_ms: self.snap_min_duration_ms,
                max_ms: self.snap_max_duration_ms,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    InvalidTouchSlop(f32),
    InvalidDensity(f32),
    InvalidSwipeVelocity(f32),
    InvertedSnapDurations { min_ms: u64, max_ms: u64 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidTouchSlop(slop) => {
                write!(f, "touch slop must be non-negative, got {slop}")
            }
            ConfigError::InvalidDensity(density) => {
                write!(f, "density must be positive and finite, got {density}")
            }
            ConfigError::InvalidSwipeVelocity(velocity) => {
                write!(f, "swipe velocity must be non-negative, got {velocity}")
            }
            ConfigError::InvertedSnapDurations { min_ms, max_ms } => {
                write!(f, "snap min duration {min_ms}ms exceeds max duration {max_ms}ms")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
