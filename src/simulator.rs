use std::convert::Infallible;
use std::io::Write;
use std::time::Duration;

use tracing::info;

use crate::clock::CpuClock;
use crate::error::Result;
use crate::load::{self, HeavyReport};
use crate::probe::UsageProbe;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Heavy,
    Light,
}

/// Drives the `Heavy -> Light` sequence and prints one status line per phase.
pub struct Simulator<C, W> {
    clock: C,
    out: W,
    heavy_duration: Duration,
    phase: Phase,
}

impl<C: CpuClock, W: Write> Simulator<C, W> {
    pub fn new(clock: C, out: W, heavy_duration: Duration) -> Self {
        Self {
            clock,
            out,
            heavy_duration,
            phase: Phase::Heavy,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn status_line(&self, phase: Phase) -> String {
        match phase {
            Phase::Heavy => format!(
                "Simulating heavy CPU usage for {} seconds...",
                self.heavy_duration.as_secs()
            ),
            Phase::Light => "Switching to light CPU load...".to_owned(),
        }
    }

    fn announce(&mut self, phase: Phase) -> Result<()> {
        let line = self.status_line(phase);
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }

    /// Announce and run the heavy phase, then announce the light phase.
    ///
    /// Leaves the simulator in [`Phase::Light`]. Calling it again once the
    /// transition happened is a no-op returning `None`.
    pub fn run_heavy(&mut self) -> Result<Option<HeavyReport>> {
        if self.phase == Phase::Light {
            return Ok(None);
        }

        self.announce(Phase::Heavy)?;
        info!(duration = ?self.heavy_duration, "heavy load started");

        let probe = UsageProbe::start(&self.clock)?;
        let report = load::heavy_load(&self.clock, self.heavy_duration)?;
        let usage = probe.sample()?;
        info!(
            cpu = ?report.cpu,
            wall = ?usage.wall,
            rounds = report.rounds,
            utilization = usage.ratio(),
            "heavy load finished"
        );

        self.phase = Phase::Light;
        self.announce(Phase::Light)?;
        Ok(Some(report))
    }

    /// Run both phases. Only returns on error.
    pub fn run(mut self) -> Result<Infallible> {
        self.run_heavy()?;
        info!(sleep = ?load::LIGHT_SLEEP, "light load started");
        load::light_load()
    }
}
