//! Frame pacing for the command-line driver.

use std::{
    thread,
    time::{Duration, Instant},
};

/// Supplies the elapsed time handed to each simulated frame.
#[derive(Clone, Copy, Debug)]
pub(crate) enum FrameClock {
    /// Every frame advances by the same step, as fast as the host allows.
    /// Runs with the same seed replay identically.
    Fixed(Duration),
    /// Frames are paced to the tick duration and report the measured
    /// wall-clock time since the previous frame.
    Realtime {
        /// Target frame duration.
        tick: Duration,
        /// When the previous frame was handed out.
        last: Instant,
    },
}

impl FrameClock {
    pub(crate) fn new(tick: Duration, realtime: bool) -> Self {
        if realtime {
            Self::Realtime {
                tick,
                last: Instant::now(),
            }
        } else {
            Self::Fixed(tick)
        }
    }

    /// Waits for the next frame if pacing is enabled and returns its delta.
    pub(crate) fn next_delta(&mut self) -> Duration {
        match self {
            Self::Fixed(step) => *step,
            Self::Realtime { tick, last } => {
                let remaining = tick.saturating_sub(last.elapsed());
                if !remaining.is_zero() {
                    thread::sleep(remaining);
                }
                let now = Instant::now();
                let delta = now.duration_since(*last);
                *last = now;
                delta
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_repeats_the_step() {
        let step = Duration::from_millis(16);
        let mut clock = FrameClock::new(step, false);

        assert_eq!(clock.next_delta(), step);
        assert_eq!(clock.next_delta(), step);
    }

    #[test]
    fn realtime_clock_reports_at_least_one_tick() {
        let tick = Duration::from_millis(5);
        let mut clock = FrameClock::new(tick, true);

        for _ in 0..3 {
            assert!(clock.next_delta() >= tick);
        }
    }
}
