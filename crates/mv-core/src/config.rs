//! Run configuration.
//!
//! Both structs are plain data with sensible `Default`s.  Loading them from a
//! file (TOML, JSON, …) is the application's job; enable the `serde` feature
//! to derive the (de)serializers.

use crate::{MvError, MvResult, SimClock};

/// Tunables consumed read-only by motion generators.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MotionConfig {
    /// Extra slack (world units) added to both collision radii before a
    /// pursuer considers its destination stale.
    pub recalculation_range_rate: f32,

    /// How long an agent stays distracted after calling for assistance.
    pub assistance_delay_ms: u32,

    /// Minimum spacing between two pursuit distance checks.
    pub pursuit_recheck_interval_ms: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            recalculation_range_rate:    1.5,
            assistance_delay_ms:         1_500,
            pursuit_recheck_interval_ms: 100,
        }
    }
}

impl MotionConfig {
    /// Reject values that would make the pursuit gate or timers meaningless.
    pub fn validate(&self) -> MvResult<()> {
        if !self.recalculation_range_rate.is_finite() || self.recalculation_range_rate < 0.0 {
            return Err(MvError::Config(format!(
                "recalculation_range_rate must be finite and >= 0, got {}",
                self.recalculation_range_rate
            )));
        }
        if self.pursuit_recheck_interval_ms == 0 {
            return Err(MvError::Config("pursuit_recheck_interval_ms must be > 0".into()));
        }
        Ok(())
    }
}

/// Top-level simulation configuration.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimConfig {
    /// Simulated milliseconds per tick.  Default: 100.
    pub tick_ms: u32,

    /// Total ticks to simulate with `Sim::run`.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Generator tunables.
    pub motion: MotionConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_ms:     100,
            total_ticks: 600,
            seed:        0,
            motion:      MotionConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> MvResult<()> {
        if self.tick_ms == 0 {
            return Err(MvError::Config("tick_ms must be > 0".into()));
        }
        self.motion.validate()
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_ms)
    }
}
