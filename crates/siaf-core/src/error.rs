//! Error types for the unit update engine

use thiserror::Error;

/// Result type for unit operations
pub type Result<T> = std::result::Result<T, UnitError>;

/// Errors that can occur while configuring or connecting a unit
///
/// Contract violations (inverted step ranges, out-of-range buffer offsets,
/// non-positive event delays) are host programming errors and panic via
/// assertions instead of surfacing here.
#[derive(Error, Debug)]
pub enum UnitError {
    /// Invalid parameter value
    #[error("Invalid parameter {parameter}: {value} (expected {constraint})")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Invalid unit configuration
    #[error("Invalid configuration: {reason}")]
    InvalidConfiguration {
        /// Reason for invalid configuration
        reason: String,
    },

    /// Receptor port not supported by this unit
    #[error("Unknown receptor type {receptor}")]
    UnknownReceptor {
        /// Receptor port that was addressed
        receptor: u32,
    },

    /// Recordable quantity not exposed by this unit
    #[error("Unknown recordable quantity: {name}")]
    UnknownRecordable {
        /// Requested quantity name
        name: String,
    },
}

impl UnitError {
    /// Create an invalid parameter error
    pub fn invalid_parameter(
        parameter: impl Into<String>,
        value: impl Into<String>,
        constraint: impl Into<String>,
    ) -> Self {
        Self::InvalidParameter {
            parameter: parameter.into(),
            value: value.into(),
            constraint: constraint.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    /// Create an unknown receptor error
    pub fn unknown_receptor(receptor: u32) -> Self {
        Self::UnknownReceptor { receptor }
    }

    /// Create an unknown recordable error
    pub fn unknown_recordable(name: impl Into<String>) -> Self {
        Self::UnknownRecordable { name: name.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = UnitError::invalid_parameter("tau_m", "0.0", "> 0.0");
        assert!(matches!(err, UnitError::InvalidParameter { .. }));

        let err = UnitError::invalid_config("slice length is zero");
        assert!(matches!(err, UnitError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_error_display() {
        let err = UnitError::unknown_receptor(3);
        let msg = format!("{}", err);
        assert!(msg.contains("Unknown receptor type 3"));

        let err = UnitError::unknown_recordable("g_ex");
        assert!(format!("{}", err).contains("g_ex"));
    }
}
