/// Fixed timestep accumulator.
/// Show logic runs at a consistent rate regardless of frame time.
pub struct FixedTimestep {
    /// The fixed delta time per tick.
    dt: f32,
    /// Accumulated time from variable frame deltas.
    accumulator: f32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        Self {
            dt,
            accumulator: 0.0,
        }
    }

    /// Add frame time to the accumulator. Returns the number of fixed steps to run.
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // Negative deltas come from tab resume glitches on some browsers
        self.accumulator += frame_dt.max(0.0);
        // Cap at 10 steps so a backgrounded tab doesn't replay seconds of timers at once
        self.accumulator = self.accumulator.min(self.dt * 10.0);
        let steps = (self.accumulator / self.dt) as u32;
        self.accumulator -= steps as f32 * self.dt;
        steps
    }

    /// The fixed delta time.
    pub fn dt(&self) -> f32 {
        self.dt
    }
}

/// Time as seen by the show during one fixed step.
///
/// `local_ms` is the host's wall clock shifted into the viewer's local
/// timezone (milliseconds since the Unix epoch, as if local time were UTC).
/// It is refreshed once per frame; every fixed step within a frame sees the
/// same value. `elapsed` is show time and advances by `dt` per step.
#[derive(Debug, Clone, Copy, Default)]
pub struct Clock {
    dt: f32,
    local_ms: f64,
    elapsed: f64,
}

impl Clock {
    pub fn new(dt: f32) -> Self {
        Self { dt, local_ms: 0.0, elapsed: 0.0 }
    }

    /// The fixed step duration in seconds.
    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn local_ms(&self) -> f64 {
        self.local_ms
    }

    /// Seconds of show time since init.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn set_local_ms(&mut self, ms: f64) {
        self.local_ms = ms;
    }

    pub fn advance(&mut self) {
        self.elapsed += self.dt as f64;
    }
}

/// One-shot timers keyed by a view-defined id.
///
/// Owned by the view that scheduled them, so dropping the view cancels
/// everything still pending.
#[derive(Debug, Clone)]
pub struct Timers<K> {
    pending: Vec<(K, f32)>,
}

impl<K: Copy + PartialEq> Timers<K> {
    pub fn new() -> Self {
        Self { pending: Vec::new() }
    }

    /// Schedule `key` to fire after `delay` seconds, replacing any pending timer with the same key.
    pub fn schedule(&mut self, key: K, delay: f32) {
        self.cancel(key);
        self.pending.push((key, delay.max(0.0)));
    }

    /// Schedule `key` unless it is already pending. Returns whether a timer was added.
    pub fn schedule_once(&mut self, key: K, delay: f32) -> bool {
        if self.is_pending(key) {
            return false;
        }
        self.pending.push((key, delay.max(0.0)));
        true
    }

    /// Cancel a pending timer. Returns whether one was pending.
    pub fn cancel(&mut self, key: K) -> bool {
        let before = self.pending.len();
        self.pending.retain(|(k, _)| *k != key);
        self.pending.len() != before
    }

    pub fn is_pending(&self, key: K) -> bool {
        self.pending.iter().any(|(k, _)| *k == key)
    }

    /// Advance all timers. Returns the keys that fired, earliest deadline first.
    pub fn tick(&mut self, dt: f32) -> Vec<K> {
        let mut fired: Vec<(K, f32)> = Vec::new();
        self.pending.retain_mut(|(key, left)| {
            *left -= dt;
            if *left <= 0.0 {
                fired.push((*key, *left));
                false
            } else {
                true
            }
        });
        fired.sort_by(|a, b| a.1.total_cmp(&b.1));
        fired.into_iter().map(|(k, _)| k).collect()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<K: Copy + PartialEq> Default for Timers<K> {
    fn default() -> Self {
        Self::new()
    }
}
