use std::hint::black_box;
use std::thread::sleep;
use std::time::Duration;

use tracing::trace;

use crate::clock::CpuClock;
use crate::error::Result;

/// CPU time the binary spends in the heavy phase.
pub const HEAVY_DURATION: Duration = Duration::from_secs(15);

/// Trivial iterations between two clock checks in the heavy phase.
pub const SPIN_ITERATIONS: u32 = 1_000_000;

/// Floating point steps per light round.
pub const LIGHT_ITERATIONS: u32 = 10_000;

/// Idle gap after each light round.
pub const LIGHT_SLEEP: Duration = Duration::from_millis(10);

const LIGHT_LOG_EVERY: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeavyReport {
    /// CPU time observed at the final clock check, relative to the start.
    pub cpu: Duration,
    /// Number of spin rounds executed.
    pub rounds: u64,
}

/// Burn `iterations` loop turns without touching memory or the kernel.
#[inline(never)]
pub fn spin(iterations: u32) {
    let mut i = 0u32;
    while black_box(i) < iterations {
        i += 1;
    }
}

/// Busy-loop until the process has consumed `duration` of CPU time.
///
/// The clock is checked before every round, so a zero duration returns on
/// the first check without spinning. The overshoot is bounded by one round of
/// [`SPIN_ITERATIONS`] plus the clock's granularity.
pub fn heavy_load(clock: &impl CpuClock, duration: Duration) -> Result<HeavyReport> {
    let start = clock.cpu_time()?;
    let mut rounds = 0u64;
    loop {
        let cpu = clock.cpu_time()?.saturating_sub(start);
        if cpu >= duration {
            return Ok(HeavyReport { cpu, rounds });
        }
        spin(SPIN_ITERATIONS);
        rounds += 1;
    }
}

/// A fixed batch of floating point work. The value carries no meaning.
#[inline(never)]
pub fn light_work(iterations: u32) -> f64 {
    let mut x = 0.0;
    for i in 0..iterations {
        x = black_box(f64::from(i) * 0.0001);
        x = black_box(x / (x + 1.0));
    }
    x
}

/// One duty cycle of the light phase: a short burst of work, then a sleep.
pub fn light_round() {
    black_box(light_work(LIGHT_ITERATIONS));
    sleep(LIGHT_SLEEP);
}

/// Run light rounds forever.
pub fn light_load() -> ! {
    let mut rounds = 0u64;
    loop {
        light_round();
        rounds += 1;
        if rounds % LIGHT_LOG_EVERY == 0 {
            trace!(rounds, "light load running");
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Instant;

    use super::*;
    use crate::clock::ProcessClock;
    use crate::clock::testing::{BrokenClock, StepClock};
    use crate::error::Error;

    #[test]
    fn heavy_stops_once_duration_reached() {
        let clock = StepClock::new(Duration::from_millis(100));
        let report = heavy_load(&clock, Duration::from_millis(300)).unwrap();
        assert_eq!(report.cpu, Duration::from_millis(300));
        assert_eq!(report.rounds, 2);
        // start read plus one check per round plus the final check
        assert_eq!(clock.reads.get(), 4);
    }

    #[test]
    fn heavy_with_zero_duration_exits_on_first_check() {
        let clock = StepClock::new(Duration::from_millis(1));
        let report = heavy_load(&clock, Duration::ZERO).unwrap();
        assert_eq!(report.rounds, 0);
        assert_eq!(clock.reads.get(), 2);
    }

    #[test]
    fn heavy_accepts_overshoot_past_duration() {
        let clock = StepClock::new(Duration::from_millis(700));
        let report = heavy_load(&clock, Duration::from_secs(1)).unwrap();
        assert_eq!(report.rounds, 1);
        assert_eq!(report.cpu, Duration::from_millis(1400));
    }

    #[test]
    fn heavy_propagates_clock_failure() {
        let err = heavy_load(&BrokenClock, Duration::from_secs(1)).unwrap_err();
        assert!(matches!(err, Error::CpuClock(_)));
    }

    #[test]
    fn heavy_consumes_at_least_requested_cpu_time() {
        let clock = ProcessClock;
        let requested = Duration::from_millis(50);
        let before = clock.cpu_time().unwrap();
        let report = heavy_load(&clock, requested).unwrap();
        let consumed = clock.cpu_time().unwrap() - before;

        assert!(report.cpu >= requested);
        assert!(consumed >= requested);
        assert!(report.rounds > 0);
    }

    #[test]
    fn light_work_stays_in_unit_interval() {
        let x = light_work(LIGHT_ITERATIONS);
        assert!(x.is_finite());
        assert!((0.0..1.0).contains(&x));
        assert_eq!(light_work(0), 0.0);
    }

    #[test]
    fn light_round_sleeps_for_the_idle_gap() {
        const ROUNDS: u32 = 20;
        let start = Instant::now();
        for _ in 0..ROUNDS {
            let round = Instant::now();
            light_round();
            assert!(round.elapsed() >= LIGHT_SLEEP);
        }
        // a round is the sleep plus a sub-millisecond burst, not a long stall
        let per_round = start.elapsed() / ROUNDS;
        assert!(per_round < LIGHT_SLEEP * 2, "light round took {per_round:?}");
    }
}
