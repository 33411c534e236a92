//! The workspace-wide error type.
//!
//! One `thiserror` enum shared by every crate, grounded on the teacher's
//! per-layer error enums (`DriverError`, `CanError`, `ProtocolError`): one
//! doc comment per variant, `#[from]` conversions at the crate boundary,
//! and a `Display`-text test per variant.

use thiserror::Error;

/// Every fallible outcome the motion core can produce, per the taxonomy in
/// `spec.md` §7.
#[derive(Error, Debug)]
pub enum PendantError {
    /// Unknown joint/axis, a missing required field, or an out-of-range
    /// velocity percentage. No state change occurs when this is returned.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A discrete move (MoveJ/MoveL) would place a joint outside its
    /// configured limit. No state change occurs; continuous jog clamps
    /// instead of returning this.
    #[error("joint limit violation: {joint} = {value} is outside [{min}, {max}]")]
    JointLimitViolation {
        joint: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// A MoveL target lies outside the configured workspace box.
    #[error("workspace limit violation: {axis} = {value} is outside [{min}, {max}]")]
    WorkspaceLimitViolation {
        axis: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// Analytic IK's prismatic extension falls outside `[link2_min,
    /// link2_max]`: the target is not reachable at all.
    #[error("target out of reach: prismatic extension {d3} outside [{min}, {max}]")]
    OutOfReach { d3: f64, min: f64, max: f64 },

    /// Analytic IK produced a solution whose forward-kinematics round-trip
    /// error exceeds the 10mm tolerance.
    #[error("inverse kinematics result failed FK round-trip check: error {error_mm}mm > 10mm")]
    IkInconsistent { error_mm: f64 },

    /// Differential IK did not converge within its iteration budget.
    #[error("differential inverse kinematics did not converge")]
    NoSolution,

    /// The motor link is not connected (and not in simulation mode).
    #[error("motor link is not connected")]
    LinkClosed,

    /// An I/O error occurred talking to the motor controller.
    #[error("motor link I/O error: {0}")]
    LinkIo(#[from] std::io::Error),

    /// The motor controller returned a malformed line or an explicit
    /// `{"status":"error"}` response.
    #[error("motor link protocol error: {0}")]
    LinkProtocol(String),

    /// A response line could not be parsed as JSON.
    #[error("motor link response was not valid JSON: {0}")]
    LinkJson(#[from] serde_json::Error),

    /// A program step's move did not receive its completion signal within
    /// the configured timeout (60s, non-simulation).
    #[error("step {step_index} timed out waiting for motor completion")]
    CompletionTimeout { step_index: usize },

    /// The configuration file could not be parsed.
    #[error("configuration error: {0}")]
    Config(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_message() {
        let e = PendantError::InvalidInput("unknown joint".into());
        assert_eq!(format!("{e}"), "invalid input: unknown joint");
    }

    #[test]
    fn joint_limit_violation_message() {
        let e = PendantError::JointLimitViolation {
            joint: "shoulder_rotation".into(),
            value: 120.0,
            min: -90.0,
            max: 90.0,
        };
        let msg = format!("{e}");
        assert!(msg.contains("shoulder_rotation"));
        assert!(msg.contains("120"));
    }

    #[test]
    fn out_of_reach_message() {
        let e = PendantError::OutOfReach {
            d3: 450.0,
            min: 0.0,
            max: 200.0,
        };
        assert!(format!("{e}").contains("out of reach"));
    }

    #[test]
    fn completion_timeout_message() {
        let e = PendantError::CompletionTimeout { step_index: 3 };
        assert_eq!(format!("{e}"), "step 3 timed out waiting for motor completion");
    }

    #[test]
    fn from_io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let err: PendantError = io.into();
        assert!(matches!(err, PendantError::LinkIo(_)));
    }

    #[test]
    fn from_json_error_converts() {
        let parse_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: PendantError = parse_err.into();
        assert!(matches!(err, PendantError::LinkJson(_)));
    }
}
