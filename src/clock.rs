use std::time::Duration;

use cpu_time::ProcessTime;

use crate::error::{Error, Result};

/// Source of cumulative CPU time consumed by the current process.
pub trait CpuClock {
    fn cpu_time(&self) -> Result<Duration>;
}

/// Reads the OS per-process CPU clock (`CLOCK_PROCESS_CPUTIME_ID` on unix,
/// `GetProcessTimes` on windows).
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessClock;

impl CpuClock for ProcessClock {
    fn cpu_time(&self) -> Result<Duration> {
        ProcessTime::try_now()
            .map(|t| t.as_duration())
            .map_err(Error::CpuClock)
    }
}

impl<C: CpuClock + ?Sized> CpuClock for &C {
    fn cpu_time(&self) -> Result<Duration> {
        (**self).cpu_time()
    }
}
