//! Spike-history archive shared by all archiving unit types
//!
//! The archive plays the role of a base collaborator: it records the
//! absolute step of every emitted spike and carries its own small status
//! surface, validated independently of the owning unit's parameters. Its
//! set-status is internally atomic so the owning unit can sequence it inside
//! a transactional configuration commit.

use crate::error::{Result, UnitError};
use crate::status::{keys, StatusDict};

/// Default spike-trace time constant (ms)
pub const DEFAULT_TAU_MINUS: f64 = 20.0;

/// Record of emitted spikes plus archive-level configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpikeArchive {
    /// Absolute step indices of emitted spikes, in emission order
    history: Vec<u64>,
    /// Time constant of the post-synaptic spike trace (ms)
    tau_minus: f64,
}

impl Default for SpikeArchive {
    fn default() -> Self {
        Self {
            history: Vec::new(),
            tau_minus: DEFAULT_TAU_MINUS,
        }
    }
}

impl SpikeArchive {
    /// Create an empty archive with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a spike at absolute step `step`
    pub fn set_spike_step(&mut self, step: u64) {
        self.history.push(step);
    }

    /// Step index of the most recent spike, if any
    pub fn last_spike_step(&self) -> Option<u64> {
        self.history.last().copied()
    }

    /// Number of spikes recorded since the last history clear
    pub fn spike_count(&self) -> usize {
        self.history.len()
    }

    /// Drop all recorded spikes; called at buffer-initialization time
    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Spike-trace time constant (ms)
    pub fn tau_minus(&self) -> f64 {
        self.tau_minus
    }

    /// Store archive-level values in `d`
    pub fn get_status(&self, d: &mut StatusDict) {
        d.set(keys::TAU_MINUS, self.tau_minus);
        if let Some(step) = self.last_spike_step() {
            d.set(keys::T_SPIKE, step as f64);
        }
    }

    /// Apply archive-level values from `d`
    ///
    /// Validates before mutating: on error the archive is left untouched.
    pub fn set_status(&mut self, d: &StatusDict) -> Result<()> {
        let mut tau_minus = self.tau_minus;
        d.update(keys::TAU_MINUS, &mut tau_minus);

        if tau_minus <= 0.0 {
            return Err(UnitError::invalid_parameter(
                "tau_minus",
                tau_minus.to_string(),
                "> 0.0",
            ));
        }

        self.tau_minus = tau_minus;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spike_history() {
        let mut archive = SpikeArchive::new();
        assert_eq!(archive.last_spike_step(), None);

        archive.set_spike_step(10);
        archive.set_spike_step(17);
        assert_eq!(archive.last_spike_step(), Some(17));
        assert_eq!(archive.spike_count(), 2);

        archive.clear_history();
        assert_eq!(archive.last_spike_step(), None);
        assert_eq!(archive.spike_count(), 0);
    }

    #[test]
    fn test_set_status_validates_tau_minus() {
        let mut archive = SpikeArchive::new();

        let d = StatusDict::new().with(keys::TAU_MINUS, -1.0);
        assert!(archive.set_status(&d).is_err());
        assert_eq!(archive.tau_minus(), DEFAULT_TAU_MINUS);

        let d = StatusDict::new().with(keys::TAU_MINUS, 30.0);
        archive.set_status(&d).unwrap();
        assert_eq!(archive.tau_minus(), 30.0);
    }

    #[test]
    fn test_get_status_reports_last_spike() {
        let mut archive = SpikeArchive::new();
        archive.set_spike_step(42);

        let mut d = StatusDict::new();
        archive.get_status(&mut d);
        assert_eq!(d.get(keys::T_SPIKE), Some(42.0));
        assert_eq!(d.get(keys::TAU_MINUS), Some(DEFAULT_TAU_MINUS));
    }
}
