use crate::error::{SimError, SimResult};

/// Slack for accumulated floating-point error when comparing against an
/// interval, in seconds.
pub(crate) const CADENCE_EPSILON: f64 = 1e-9;

/// Tracks simulation time: a monotonic tick counter and a fixed tick length.
#[derive(Debug, Clone)]
pub struct SimClock {
    tick: u64,
    seconds_per_tick: f64,
}

impl SimClock {
    /// Create a new clock at tick 0.
    pub fn new(seconds_per_tick: f64) -> Self {
        Self {
            tick: 0,
            seconds_per_tick,
        }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    pub fn advance(&mut self) -> u64 {
        self.tick += 1;
        self.tick
    }

    /// Return the current tick number.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    /// Seconds of simulated time per tick.
    pub fn seconds_per_tick(&self) -> f64 {
        self.seconds_per_tick
    }

    /// Total simulated seconds since the start.
    pub fn elapsed_secs(&self) -> f64 {
        self.tick as f64 * self.seconds_per_tick
    }
}

/// A fixed-rate trigger driven by elapsed wall time.
///
/// Time is accumulated with [`Cadence::accumulate`]; every full interval in the
/// accumulator is one firing the host owes, claimed with [`Cadence::fire`].
/// The accumulator holds at most `max_backlog` seconds; time past that is
/// dropped so a stalled host never owes an unbounded catch-up.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: f64,
    accumulator: f64,
    max_backlog: f64,
}

impl Cadence {
    /// A cadence firing `rate_hz` times per second with an unbounded backlog.
    pub fn from_hz(rate_hz: f64) -> SimResult<Self> {
        if !(rate_hz.is_finite() && rate_hz > 0.0) {
            return Err(SimError::InvalidConfig(format!(
                "cadence rate must be positive, got {rate_hz}"
            )));
        }
        Ok(Self {
            interval: 1.0 / rate_hz,
            accumulator: 0.0,
            max_backlog: f64::MAX,
        })
    }

    /// Cap the owed time at `secs`, never below one interval.
    pub fn with_max_backlog(mut self, secs: f64) -> Self {
        self.max_backlog = secs.max(self.interval);
        self
    }

    /// Seconds between firings.
    pub fn interval(&self) -> f64 {
        self.interval
    }

    /// Add elapsed time, returning how many seconds were dropped at the
    /// backlog cap. Negative and non-finite values are ignored.
    pub fn accumulate(&mut self, secs: f64) -> f64 {
        if !(secs.is_finite() && secs > 0.0) {
            return 0.0;
        }
        let total = self.accumulator + secs;
        self.accumulator = total.min(self.max_backlog);
        total - self.accumulator
    }

    /// How long ago the oldest owed firing fell due, or `None` if none is owed.
    pub fn overdue(&self) -> Option<f64> {
        let lateness = self.accumulator - self.interval;
        (lateness > -CADENCE_EPSILON).then_some(lateness.max(0.0))
    }

    /// Claim one owed firing. Returns `false` if none is owed.
    pub fn fire(&mut self) -> bool {
        if self.overdue().is_none() {
            return false;
        }
        self.accumulator = (self.accumulator - self.interval).max(0.0);
        true
    }

    /// Number of firings currently owed.
    pub fn pending(&self) -> u64 {
        ((self.accumulator + CADENCE_EPSILON) / self.interval).floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = SimClock::new(0.05);
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.elapsed_secs(), 0.0);
    }

    #[test]
    fn clock_advance_increments() {
        let mut clock = SimClock::new(0.5);
        clock.advance();
        clock.advance();
        assert_eq!(clock.advance(), 3);
        assert!((clock.elapsed_secs() - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn cadence_counts_whole_intervals() {
        let mut cadence = Cadence::from_hz(20.0).unwrap();
        cadence.accumulate(0.12);
        assert_eq!(cadence.pending(), 2);
        assert!(cadence.fire());
        assert!(cadence.fire());
        assert!(!cadence.fire());
        // The remainder carries into the next call.
        cadence.accumulate(0.03);
        assert!(cadence.fire());
    }

    #[test]
    fn one_second_is_exactly_twenty_ticks() {
        let mut cadence = Cadence::from_hz(20.0).unwrap();
        for _ in 0..10 {
            cadence.accumulate(0.1);
        }
        let mut fired = 0;
        while cadence.fire() {
            fired += 1;
        }
        assert_eq!(fired, 20);
    }

    #[test]
    fn cadence_ignores_bad_input() {
        let mut cadence = Cadence::from_hz(10.0).unwrap();
        cadence.accumulate(-1.0);
        cadence.accumulate(f64::NAN);
        assert_eq!(cadence.pending(), 0);
        assert!(cadence.overdue().is_none());
    }

    #[test]
    fn overdue_measures_lateness() {
        let mut cadence = Cadence::from_hz(10.0).unwrap();
        cadence.accumulate(0.25);
        let late = cadence.overdue().unwrap();
        assert!((late - 0.15).abs() < 1e-9);
    }

    #[test]
    fn cadence_rejects_bad_rates() {
        for hz in [0.0, -20.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(Cadence::from_hz(hz), Err(SimError::InvalidConfig(_))));
        }
    }

    #[test]
    fn backlog_cap_drops_the_excess() {
        let mut cadence = Cadence::from_hz(20.0).unwrap().with_max_backlog(1.0);
        let dropped = cadence.accumulate(1e18);
        assert!(dropped > 0.0);
        assert_eq!(cadence.pending(), 20);
        while cadence.fire() {}
        assert_eq!(cadence.accumulate(0.5), 0.0);
        assert_eq!(cadence.pending(), 10);
    }
}
