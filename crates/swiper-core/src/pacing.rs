use std::time::{Duration, Instant};

/// Gates rendering to at most one frame per `1 / target_fps` seconds.
///
/// The host asks on every idle slice; when the machine is busy idle
/// slices arrive late and frames are simply skipped.
#[derive(Debug, Clone)]
pub struct FramePacer {
    interval: Duration,
    last_frame: Option<Instant>,
}

impl FramePacer {
    pub fn new(target_fps: u32) -> Self {
        Self {
            interval: Duration::from_secs_f64(1.0 / f64::from(target_fps.max(1))),
            last_frame: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Records `now` as a rendered frame without checking the interval.
    pub fn mark(&mut self, now: Instant) {
        self.last_frame = Some(now);
    }

    /// Returns `true` (and records the frame) if a full interval has passed.
    pub fn ready(&mut self, now: Instant) -> bool {
        match self.last_frame {
            Some(last) if now.saturating_duration_since(last) < self.interval => false,
            _ => {
                self.last_frame = Some(now);
                true
            }
        }
    }

    /// Time left until the next frame is due. Zero when already due.
    pub fn until_next(&self, now: Instant) -> Duration {
        match self.last_frame {
            Some(last) => (last + self.interval).saturating_duration_since(now),
            None => Duration::ZERO,
        }
    }
}

/// Linear progress of an animation, clamped to `[0, 1]`.
pub fn progress(elapsed: Duration, duration: Duration) -> f32 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f32() / duration.as_secs_f32()).clamp(0.0, 1.0)
}

/// Lets a frame through only when progress strictly increased.
///
/// The very first value always passes, so a transition can draw its
/// starting frame at progress zero.
#[derive(Debug, Clone, Default)]
pub struct ProgressGuard {
    last: Option<f32>,
}

impl ProgressGuard {
    pub fn advance(&mut self, progress: f32) -> bool {
        match self.last {
            Some(last) if progress - last <= f32::EPSILON => false,
            _ => {
                self.last = Some(progress);
                true
            }
        }
    }

    pub fn last(&self) -> Option<f32> {
        self.last
    }
}
