//! Time-driven interpolation.
//!
//! A `Tween` never runs on its own: callers advance it with an explicit
//! `Instant`, which keeps every animated value reproducible in tests.

use std::time::{Duration, Instant};

/// Monotonic shuffle counter. Work scheduled under an older generation is
/// discarded once a newer shuffle starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Generation(u64);

impl Generation {
    pub const fn value(self) -> u64 {
        self.0
    }

    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Ease-out cubic on `[0, 1]`.
pub fn ease_out(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    1.0 - (1.0 - t).powi(3)
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tween {
    from: f32,
    to: f32,
    started: Instant,
    duration: Duration,
    value: f32,
    generation: Generation,
}

impl Tween {
    /// A settled tween resting at `value`.
    pub fn at_rest(value: f32, now: Instant, generation: Generation) -> Self {
        Self { from: value, to: value, started: now, duration: Duration::ZERO, value, generation }
    }

    pub fn new(
        from: f32,
        to: f32,
        now: Instant,
        duration: Duration,
        generation: Generation,
    ) -> Self {
        let mut t = Self { from, to, started: now, duration, value: from, generation };
        t.advance(now);
        t
    }

    /// Restart from the current value toward `to`, overriding whatever was in
    /// flight.
    pub fn retarget(&mut self, to: f32, now: Instant, duration: Duration, generation: Generation) {
        *self = Self::new(self.value, to, now, duration, generation);
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn target(&self) -> f32 {
        self.to
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Interpolated value at `now` without mutating.
    pub fn sample(&self, now: Instant) -> f32 {
        if self.duration.is_zero() {
            return self.to;
        }
        let elapsed = now.saturating_duration_since(self.started);
        let t = elapsed.as_secs_f32() / self.duration.as_secs_f32();
        if t >= 1.0 {
            return self.to;
        }
        self.from + (self.to - self.from) * ease_out(t)
    }

    pub fn advance(&mut self, now: Instant) {
        self.value = self.sample(now);
    }

    pub fn is_settled(&self) -> bool {
        self.value == self.to
    }
}
