use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Process-wide minimum interval between accepted transition starts.
///
/// One gate throttles every monitor: overlapping transitions on
/// different screens are not supported. The check and the timestamp
/// update happen under one lock, so the gate can be shared by reference
/// between the hotkey path and the IPC path.
#[derive(Debug)]
pub struct DebounceGate {
    interval: Duration,
    last_start: Mutex<Option<Instant>>,
}

impl DebounceGate {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_start: Mutex::new(None),
        }
    }

    /// Accepts and records a start if the interval has elapsed.
    pub fn can_start(&self) -> bool {
        self.can_start_at(Instant::now())
    }

    /// Same as [`can_start`](Self::can_start) with an explicit clock reading.
    ///
    /// A denied request leaves the recorded start untouched.
    pub fn can_start_at(&self, now: Instant) -> bool {
        let mut last = self
            .last_start
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(previous) = *last
            && now.saturating_duration_since(previous) < self.interval
        {
            return false;
        }
        *last = Some(now);
        true
    }
}

impl Default for DebounceGate {
    fn default() -> Self {
        Self::new(Duration::from_millis(300))
    }
}
