//! Simulation error types.
//!
//! Every failure of model construction, evaluation or harness driving is a
//! variant of [`SimError`].

use crate::eval::Region;

/// Errors that can occur while building or evaluating a counter model.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// A state block was constructed against a symbol table that no longer
    /// exists (or never did).
    #[error("instance '{instance}' has no symbol table")]
    DetachedSymbolTable {
        /// Name of the instance being constructed.
        instance: String,
    },

    /// An evaluation region kept requesting passes past the ceiling.
    #[error("{region} region did not converge within converge limit {limit}")]
    ConvergenceFailure {
        /// The region that failed to settle.
        region: Region,
        /// The configured pass ceiling.
        limit: u32,
    },

    /// A signal name did not resolve in the symbol table.
    #[error("unknown signal '{name}'")]
    UnknownSignal {
        /// The name as given by the caller.
        name: String,
    },

    /// A harness tried to drive a signal that is not a design input.
    #[error("signal '{name}' is not an input")]
    NotAnInput {
        /// Hierarchical name of the signal.
        name: String,
    },

    /// The harness clock cannot be derived from the settings.
    #[error("invalid clock: {reason}")]
    InvalidClock {
        /// Why the clock was rejected.
        reason: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detached_symbol_table_display() {
        let e = SimError::DetachedSymbolTable {
            instance: "TOP".into(),
        };
        assert_eq!(e.to_string(), "instance 'TOP' has no symbol table");
    }

    #[test]
    fn convergence_failure_display() {
        let e = SimError::ConvergenceFailure {
            region: Region::Active,
            limit: 100,
        };
        assert_eq!(
            e.to_string(),
            "active region did not converge within converge limit 100"
        );
        let e = SimError::ConvergenceFailure {
            region: Region::Nba,
            limit: 3,
        };
        assert_eq!(e.to_string(), "NBA region did not converge within converge limit 3");
    }

    #[test]
    fn unknown_signal_display() {
        let e = SimError::UnknownSignal { name: "Q".into() };
        assert_eq!(e.to_string(), "unknown signal 'Q'");
    }

    #[test]
    fn not_an_input_display() {
        let e = SimError::NotAnInput {
            name: "TOP.DATA".into(),
        };
        assert_eq!(e.to_string(), "signal 'TOP.DATA' is not an input");
    }

    #[test]
    fn invalid_clock_display() {
        let e = SimError::InvalidClock {
            reason: "period of 1 fs has no half period".into(),
        };
        assert_eq!(
            e.to_string(),
            "invalid clock: period of 1 fs has no half period"
        );
    }
}
