//! Open-ended key/value status dictionary for getting and setting unit
//! configuration
//!
//! A [`StatusDict`] is the configuration surface between host and unit: the
//! host fills in whichever keys it wants to change, the unit overlays them
//! on a candidate copy of its parameters and state, and commits only after
//! full validation. Unrecognized keys are the host's concern and are left
//! alone; unset keys keep their current value.

use std::collections::BTreeMap;

/// Recognized status key names
pub mod keys {
    /// Membrane potential (mV)
    pub const V_M: &str = "V_m";
    /// Spike threshold (mV)
    pub const V_TH: &str = "V_th";
    /// Absolute lower bound for the membrane potential (mV)
    pub const V_MIN: &str = "V_min";
    /// Constant external input current (pA)
    pub const I_E: &str = "I_e";
    /// Membrane time constant (ms)
    pub const TAU_M: &str = "tau_m";
    /// Resting potential (mV)
    pub const E_L: &str = "E_L";
    /// Reset potential (mV)
    pub const V_RESET: &str = "V_reset";
    /// Membrane capacitance (pF)
    pub const C_M: &str = "C_m";
    /// Spike-trace time constant of the archive (ms)
    pub const TAU_MINUS: &str = "tau_minus";
    /// Step index of the most recent spike (read-only)
    pub const T_SPIKE: &str = "t_spike";
    /// Names of exposed recordable quantities (read-only list)
    pub const RECORDABLES: &str = "recordables";
}

/// Key/value mapping used by the get/set status pair
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatusDict {
    values: BTreeMap<String, f64>,
    lists: BTreeMap<String, Vec<String>>,
}

impl StatusDict {
    /// Create an empty dictionary
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a scalar entry
    pub fn set(&mut self, key: &str, value: f64) {
        self.values.insert(key.to_string(), value);
    }

    /// Set a scalar entry, builder style
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.set(key, value);
        self
    }

    /// Look up a scalar entry
    pub fn get(&self, key: &str) -> Option<f64> {
        self.values.get(key).copied()
    }

    /// Set a name-list entry
    pub fn set_list(&mut self, key: &str, names: Vec<String>) {
        self.lists.insert(key.to_string(), names);
    }

    /// Look up a name-list entry
    pub fn get_list(&self, key: &str) -> Option<&[String]> {
        self.lists.get(key).map(|v| v.as_slice())
    }

    /// Overlay a scalar onto `target` if the key is present
    ///
    /// Returns whether the key was present.
    pub fn update(&self, key: &str, target: &mut f64) -> bool {
        match self.get(key) {
            Some(value) => {
                *target = value;
                true
            }
            None => false,
        }
    }

    /// Check whether the dictionary carries no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.lists.is_empty()
    }

    /// Iterate over scalar entries in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scalar_roundtrip() {
        let d = StatusDict::new().with(keys::V_TH, -55.0).with(keys::I_E, 1.5);

        assert_eq!(d.get(keys::V_TH), Some(-55.0));
        assert_eq!(d.get(keys::I_E), Some(1.5));
        assert_eq!(d.get(keys::TAU_M), None);
    }

    #[test]
    fn test_update_overlays_only_present_keys() {
        let d = StatusDict::new().with(keys::TAU_M, 5.0);

        let mut tau_m = 10.0;
        let mut c_m = 250.0;
        assert!(d.update(keys::TAU_M, &mut tau_m));
        assert!(!d.update(keys::C_M, &mut c_m));

        assert_eq!(tau_m, 5.0);
        assert_eq!(c_m, 250.0);
    }

    #[test]
    fn test_list_entries() {
        let mut d = StatusDict::new();
        d.set_list(keys::RECORDABLES, vec!["V_m".to_string()]);

        assert_eq!(
            d.get_list(keys::RECORDABLES),
            Some(&["V_m".to_string()][..])
        );
        assert!(!d.is_empty());
    }
}
