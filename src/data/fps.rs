use std::fmt;
use std::time::{Duration, Instant};

pub const FPS_WINDOW: Duration = Duration::from_secs(1);

/// Frames-per-second over one-second windows. The rate shown is the one
/// computed at the end of the last full window, not a running value.
pub struct FpsCounter {
    origin: Instant,
    frames: u32,
    rate: f32,
}

impl FpsCounter {
    pub fn new(origin: Instant) -> Self {
        Self {
            origin,
            frames: 0,
            rate: 0.0,
        }
    }

    /// Counts one frame finished at `now`. Returns the new rate when a
    /// window closes; the tally and the origin restart from `now`.
    pub fn tick(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;

        let elapsed = now.saturating_duration_since(self.origin);
        if elapsed < FPS_WINDOW {
            return None;
        }

        self.rate = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.origin = now;

        Some(self.rate)
    }

    #[cfg(test)]
    pub fn rate(&self) -> f32 {
        self.rate
    }

    #[cfg(test)]
    pub fn frames(&self) -> u32 {
        self.frames
    }

    pub fn label(&self) -> String {
        format!("FPS: {}", self.rate as u32)
    }
}

/// Whole-run timing for the exit summary.
pub struct RunStats {
    started: Instant,
    busy: Duration,
    frames: u64,
}

impl RunStats {
    pub fn new(started: Instant) -> Self {
        Self {
            started,
            busy: Duration::ZERO,
            frames: 0,
        }
    }

    /// Adds one frame's work time, delay excluded.
    pub fn record(&mut self, frame_time: Duration) {
        self.busy += frame_time;
        self.frames += 1;
    }

    pub fn summary(&self, now: Instant) -> RunSummary {
        RunSummary {
            total: now.saturating_duration_since(self.started),
            frames: self.frames,
            mean: (self.frames > 0).then(|| {
                Duration::from_nanos((self.busy.as_nanos() / self.frames as u128) as u64)
            }),
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct RunSummary {
    pub total: Duration,
    pub frames: u64,
    pub mean: Option<Duration>,
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total run time: {} ms", self.total.as_millis())?;
        match self.mean {
            Some(mean) => write!(f, "Mean frame time: {} ms", mean.as_millis()),
            None => write!(f, "Mean frame time: n/a"),
        }
    }
}
