use std::fmt::Debug;
use std::time::Instant;

/// Injected time source.
///
/// The manager and the role states never call `Instant::now()` directly,
/// which keeps deadline arithmetic deterministic under test.
pub trait Clock: Debug + Send + Sync {
    fn now(&self) -> Instant;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}
