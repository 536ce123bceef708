//! Numeric helpers for mapping values into and out of a `[min, max]` range.

/// Range normalization for scalar values.
///
/// `normalized` maps `min..max` onto `0..1` and `denormalized` maps it back.
/// The clamped variants clamp on the source range before normalizing, or on
/// the target range after denormalizing.
pub trait Normalize: Sized {
    fn clamped(self, min: Self, max: Self) -> Self;
    fn normalized(self, min: Self, max: Self) -> Self;
    fn denormalized(self, min: Self, max: Self) -> Self;

    fn normalized_clamped(self, min: Self, max: Self) -> Self
    where
        Self: Copy,
    {
        self.clamped(min, max).normalized(min, max)
    }

    fn denormalized_clamped(self, min: Self, max: Self) -> Self
    where
        Self: Copy,
    {
        self.denormalized(min, max).clamped(min, max)
    }
}

impl Normalize for f32 {
    fn clamped(self, min: f32, max: f32) -> f32 {
        min.max(max.min(self))
    }

    fn normalized(self, min: f32, max: f32) -> f32 {
        if min == 0.0 {
            self / max
        } else {
            (self - min) / (max - min)
        }
    }

    fn denormalized(self, min: f32, max: f32) -> f32 {
        if min == 0.0 {
            self * max
        } else {
            self * (max - min) + min
        }
    }
}
