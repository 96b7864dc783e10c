// Clock trait - time source injected into the generator
use chrono::{DateTime, Duration, FixedOffset, Local};
use std::sync::atomic::{AtomicI64, Ordering};

pub trait Clock: Send + Sync {
    /// Current wall-clock time in the zone whose hour of day drives the diurnal model.
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Host local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        Local::now().fixed_offset()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}

/// Simulated time: the first read returns `start`, each later read advances by `step`.
///
/// Lets a day of diurnal patterns play out in minutes.
#[derive(Debug)]
pub struct SteppingClock {
    start: DateTime<FixedOffset>,
    step: Duration,
    reads: AtomicI64,
}

impl SteppingClock {
    pub fn new(start: DateTime<FixedOffset>, step: Duration) -> Self {
        Self {
            start,
            step,
            reads: AtomicI64::new(0),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let n = self.reads.fetch_add(1, Ordering::Relaxed);
        let offset = self.step.checked_mul(n as i32).unwrap_or(Duration::MAX);
        self.start.checked_add_signed(offset).unwrap_or(self.start)
    }
}
