//! Jog state: the live record of an in-progress continuous jog.

use crate::joint::{AxisName, JointName};

/// Which coordinate space a jog (or jog increment) operates in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum JogMode {
    Joint,
    Cartesian,
}

/// The jog target: exactly one joint or one axis, matching `JogState.mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JogTarget {
    Joint(JointName),
    Axis(AxisName),
}

/// Live continuous-jog state, owned by the motion controller and mutated
/// only under its pose-state exclusion section.
///
/// Invariants (enforced by the motion controller, not by this type):
/// when `active`, `target` is `Some` and its variant matches `mode`;
/// `target_velocity == direction as f64 * (velocity_pct as f64 / 100.0) *
/// max_velocity(mode, target)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JogState {
    pub active: bool,
    pub mode: Option<JogMode>,
    pub target: Option<JogTarget>,
    /// -1, 0, or +1.
    pub direction: i8,
    /// 1..=100.
    pub velocity_pct: u8,
    /// Signed, in the target's native unit per second (deg/s or mm/s).
    pub target_velocity: f64,
    /// Monotonic instant of the last tick, in seconds since an arbitrary
    /// epoch fixed at `PoseCore` construction. Stored as `f64` so the jog
    /// loop and its tests can use a single scalar clock rather than
    /// `std::time::Instant`, which cannot be constructed at a fixed value
    /// in tests.
    pub last_update_time: f64,
}

impl JogState {
    pub const INACTIVE: JogState = JogState {
        active: false,
        mode: None,
        target: None,
        direction: 0,
        velocity_pct: 0,
        target_velocity: 0.0,
        last_update_time: 0.0,
    };
}

impl Default for JogState {
    fn default() -> Self {
        JogState::INACTIVE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_has_zero_velocity() {
        assert_eq!(JogState::INACTIVE.target_velocity, 0.0);
        assert_eq!(JogState::INACTIVE.direction, 0);
        assert!(!JogState::INACTIVE.active);
    }
}
