//! Release velocity estimation for horizontal drags.
//!
//! Uses the impulse strategy: velocity is derived from the kinetic energy
//! the pointer imparts over its recent history, which is less sensitive to
//! a single noisy sample than a plain last-two-points difference.

/// Ring buffer size for pointer samples.
const HISTORY_SIZE: usize = 20;

/// Only samples within this window before the newest one are considered.
const HORIZON_MS: i64 = 100;

/// A gap between samples longer than this means the pointer had stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug, Default)]
struct Sample {
    time_ms: i64,
    x: f32,
}

/// Tracks absolute pointer positions and estimates the release velocity.
#[derive(Clone, Debug)]
pub struct VelocityTracker {
    samples: [Option<Sample>; HISTORY_SIZE],
    index: usize,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            index: 0,
        }
    }

    /// Record the pointer position `x` (pixels) at `time_ms`.
    pub fn add_sample(&mut self, time_ms: i64, x: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(Sample { time_ms, x });
    }

    /// Signed velocity in pixels per millisecond.
    ///
    /// Returns 0.0 with fewer than two usable samples.
    pub fn velocity_per_ms(&self) -> f32 {
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut ages = [0.0f32; HISTORY_SIZE];
        let mut count = 0;

        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };

        let mut cursor = self.index;
        let mut previous = newest;

        while let Some(sample) = self.samples[cursor] {
            let age = (newest.time_ms - sample.time_ms) as f32;
            let gap = (sample.time_ms - previous.time_ms).abs() as f32;
            previous = sample;

            if age > HORIZON_MS as f32 || gap > ASSUME_STOPPED_MS as f32 {
                break;
            }

            positions[count] = sample.x;
            ages[count] = -age;
            count += 1;
            if count >= HISTORY_SIZE {
                break;
            }

            cursor = if cursor == 0 { HISTORY_SIZE - 1 } else { cursor - 1 };
        }

        if count < 2 {
            return 0.0;
        }

        let velocity = impulse_velocity(&positions[..count], &ages[..count]);
        if velocity.is_finite() {
            velocity
        } else {
            0.0
        }
    }

    /// Signed velocity in pixels per second.
    pub fn velocity_per_second(&self) -> f32 {
        self.velocity_per_ms() * 1000.0
    }

    pub fn clear(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

/// `positions[0]` is the newest sample; `times` are non-positive ages.
fn impulse_velocity(positions: &[f32], times: &[f32]) -> f32 {
    let start = positions.len() - 1;
    let mut work = 0.0f32;
    let mut next_time = times[start];

    for i in (1..=start).rev() {
        let current_time = next_time;
        next_time = times[i - 1];
        if current_time == next_time {
            continue;
        }

        let v_curr = (positions[i - 1] - positions[i]) / (next_time - current_time);
        let v_prev = kinetic_energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == start {
            work *= 0.5;
        }
    }

    kinetic_energy_to_velocity(work)
}

/// E = 0.5 * m * v^2 with m = 1.
#[inline]
fn kinetic_energy_to_velocity(kinetic_energy: f32) -> f32 {
    kinetic_energy.signum() * (2.0 * kinetic_energy.abs()).sqrt()
}
