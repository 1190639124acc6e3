//! Computes how long the current search is allowed to run.
//!
//! Simplified relative to a design that hypothesizes over a range of "moves to go"
//! values and blends an `ideal`/`maximum` pair derived from a logistic move-importance
//! curve. This crate runs a single worker with no pondering, so a single stop time
//! computed directly from the clock/increment/movestogo and the position's game phase
//! is sufficient.

use std::time::{Duration, Instant};

use talon_core::Player;

use consts::AVERAGE_GAME_LENGTH;

/// The subset of `go`-style search limits relevant to time management. Populated by
/// the front-end (out of scope for this crate) and handed to `run_search`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Limits {
    /// Remaining time per side, in milliseconds.
    pub time: [Option<i64>; 2],
    /// Increment per side, in milliseconds.
    pub inc: [i64; 2],
    /// Moves remaining until the next time control, if known.
    pub movestogo: Option<u32>,
    /// A fixed per-move time budget, in milliseconds, overriding clock math.
    pub movetime: Option<i64>,
    /// Search forever until told to stop.
    pub infinite: bool,
    /// Stop once this many nodes have been searched, regardless of the clock.
    pub nodes: Option<u64>,
    /// Report a mate in this many moves rather than a fixed depth/clock budget.
    pub mate: Option<u8>,
}

impl Limits {
    fn has_clock(&self) -> bool {
        self.time[0].is_some() || self.time[1].is_some()
    }
}

/// Computes and holds the deadline for the current search.
pub struct TimeManager {
    start: Instant,
    stop_time_ms: Option<i64>,
}

impl TimeManager {
    /// Builds a manager with no deadline (used before a search starts, or for
    /// `infinite`/`mate`-only searches with no clock).
    pub fn unbounded(start: Instant) -> Self {
        TimeManager {
            start,
            stop_time_ms: None,
        }
    }

    /// Computes the stop time for a search of `us` to move, given `limits` and the
    /// position's current game phase (`0..=256`, as produced by the evaluator).
    pub fn init(start: Instant, limits: &Limits, us: Player, phase: i32) -> Self {
        if limits.infinite {
            return TimeManager::unbounded(start);
        }

        if let Some(movetime) = limits.movetime {
            return TimeManager {
                start,
                stop_time_ms: Some(movetime),
            };
        }

        if !limits.has_clock() {
            return TimeManager::unbounded(start);
        }

        let my_time = limits.time[us as usize].unwrap_or(0);
        let my_inc = limits.inc[us as usize];

        let stop_ms = if limits.movestogo == Some(1) {
            let t = (my_time as f64) / 1000.0;
            my_time as f64 * f_ratio(t)
        } else {
            let max = limits
                .movestogo
                .map(|mtg| (mtg as i64).min(AVERAGE_GAME_LENGTH))
                .unwrap_or(AVERAGE_GAME_LENGTH);
            let divisor = (max * (256 - phase as i64) + 8 * phase as i64) as f64 / 256.0;
            (my_time + my_inc) as f64 / divisor.max(1.0)
        };

        TimeManager {
            start,
            stop_time_ms: Some(stop_ms.max(0.0) as i64),
        }
    }

    /// Whether `now - start` has exceeded the computed deadline. Always `false` for an
    /// unbounded manager.
    #[inline]
    pub fn is_expired(&self) -> bool {
        match self.stop_time_ms {
            None => false,
            Some(ms) => self.elapsed_ms() >= ms,
        }
    }

    #[inline]
    pub fn elapsed_ms(&self) -> i64 {
        duration_ms(self.start.elapsed())
    }

    pub fn stop_time_ms(&self) -> Option<i64> {
        self.stop_time_ms
    }
}

/// `f(t) = (t/1000)^1.1 / (t/1000 + 1)^1.1`, `t` already in seconds here.
fn f_ratio(t_seconds: f64) -> f64 {
    t_seconds.powf(1.1) / (t_seconds + 1.0).powf(1.1)
}

fn duration_ms(d: Duration) -> i64 {
    (d.as_secs() as i64) * 1000 + (d.subsec_millis() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn movetime_overrides_clock_math() {
        let limits = Limits {
            movetime: Some(500),
            ..Default::default()
        };
        let tm = TimeManager::init(Instant::now(), &limits, Player::White, 0);
        assert_eq!(tm.stop_time_ms(), Some(500));
    }

    #[test]
    fn infinite_search_is_unbounded() {
        let limits = Limits {
            infinite: true,
            ..Default::default()
        };
        let tm = TimeManager::init(Instant::now(), &limits, Player::White, 0);
        assert_eq!(tm.stop_time_ms(), None);
        assert!(!tm.is_expired());
    }

    #[test]
    fn no_clock_is_unbounded() {
        let limits = Limits::default();
        let tm = TimeManager::init(Instant::now(), &limits, Player::White, 0);
        assert_eq!(tm.stop_time_ms(), None);
    }

    #[test]
    fn clock_based_budget_is_positive_and_bounded_by_time_left() {
        let limits = Limits {
            time: [Some(60_000), Some(60_000)],
            inc: [0, 0],
            movestogo: None,
            movetime: None,
            infinite: false,
            nodes: None,
            mate: None,
        };
        let tm = TimeManager::init(Instant::now(), &limits, Player::White, 0);
        let budget = tm.stop_time_ms().unwrap();
        assert!(budget > 0);
        assert!(budget < 60_000);
    }
}
