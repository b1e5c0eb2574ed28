//=========================================================================
// Timestamps
//=========================================================================
//
// Monotonic millisecond timestamps shared by the pointer tracker and the
// frame loop.
//
// Hosts report time as milliseconds since an arbitrary origin (the winit
// platform uses the instant the event loop started). Only differences
// between timestamps are meaningful.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::ops::Sub;
use std::time::Instant;

//=== Timestamp ===========================================================

/// A point in time, in milliseconds since a host-chosen origin.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Timestamp(f64);

impl Timestamp {
    /// The origin of the host clock.
    pub const ZERO: Timestamp = Timestamp(0.0);

    /// Creates a timestamp from milliseconds since the origin.
    pub fn from_millis(millis: f64) -> Self {
        Self(millis)
    }

    /// Milliseconds since the origin.
    pub fn millis(self) -> f64 {
        self.0
    }

    /// Milliseconds elapsed since `earlier`.
    ///
    /// Negative when `earlier` is actually later (clock skew between
    /// event sources); callers clamp where it matters.
    pub fn elapsed_since(self, earlier: Timestamp) -> f64 {
        self.0 - earlier.0
    }
}

impl Sub for Timestamp {
    type Output = f64;

    fn sub(self, rhs: Timestamp) -> f64 {
        self.elapsed_since(rhs)
    }
}

//=== HostClock ===========================================================

/// Converts `Instant`s into [`Timestamp`]s relative to a fixed origin.
#[derive(Debug, Clone, Copy)]
pub struct HostClock {
    origin: Instant,
}

impl HostClock {
    /// Starts a clock whose origin is now.
    pub fn start() -> Self {
        Self { origin: Instant::now() }
    }

    /// Current time on this clock.
    pub fn now(&self) -> Timestamp {
        self.at(Instant::now())
    }

    /// Converts an instant to a timestamp on this clock.
    pub fn at(&self, instant: Instant) -> Timestamp {
        let elapsed = instant.saturating_duration_since(self.origin);
        Timestamp(elapsed.as_secs_f64() * 1000.0)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
