use std::time::{Duration, Instant};

use crate::clock::CpuClock;
use crate::error::Result;

/// CPU and wall time elapsed over the same window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub cpu: Duration,
    pub wall: Duration,
}

impl Usage {
    /// Share of one core kept busy, `cpu / wall`. Zero for an empty window.
    pub fn ratio(&self) -> f64 {
        if self.wall.is_zero() {
            return 0.0;
        }
        self.cpu.as_secs_f64() / self.wall.as_secs_f64()
    }
}

pub struct UsageProbe<C> {
    clock: C,
    cpu_start: Duration,
    wall_start: Instant,
}

impl<C: CpuClock> UsageProbe<C> {
    pub fn start(clock: C) -> Result<Self> {
        let cpu_start = clock.cpu_time()?;
        Ok(Self {
            clock,
            cpu_start,
            wall_start: Instant::now(),
        })
    }

    pub fn sample(&self) -> Result<Usage> {
        let cpu = self.clock.cpu_time()?.saturating_sub(self.cpu_start);
        Ok(Usage {
            cpu,
            wall: self.wall_start.elapsed(),
        })
    }
}
