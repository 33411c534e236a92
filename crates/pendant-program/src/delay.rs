//! Pure helpers computing the simulated step delay used when no Motor Link
//! completion signal is available (`spec.md` §4.4).

use std::time::Duration;

use pendant_types::joint::JointVector;
use pendant_types::pose::EndEffectorPose;

const MIN_DELAY_SECS: f64 = 0.5;
const MAX_DELAY_SECS: f64 = 5.0;

/// `max(0.5, max_joint_delta / 30)`, capped at 5s.
pub fn move_j_delay(before: &JointVector, after: &JointVector) -> Duration {
    let secs = (before.max_abs_delta(after) / 30.0)
        .max(MIN_DELAY_SECS)
        .min(MAX_DELAY_SECS);
    Duration::from_secs_f64(secs)
}

/// `max(0.5, euclidean_xyz_distance / 100)`, capped at 5s.
pub fn move_l_delay(before: &EndEffectorPose, after: &EndEffectorPose) -> Duration {
    let secs = (before.xyz_distance(after) / 100.0)
        .max(MIN_DELAY_SECS)
        .min(MAX_DELAY_SECS);
    Duration::from_secs_f64(secs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_j_delay_has_a_floor() {
        let a = JointVector::ZERO;
        let b = JointVector::ZERO;
        assert_eq!(move_j_delay(&a, &b), Duration::from_secs_f64(0.5));
    }

    #[test]
    fn move_j_delay_scales_with_largest_joint_delta() {
        let a = JointVector::ZERO;
        let mut b = JointVector::ZERO;
        b.base_rotation = 90.0;
        assert_eq!(move_j_delay(&a, &b), Duration::from_secs_f64(3.0));
    }

    #[test]
    fn move_j_delay_is_capped_at_five_seconds() {
        let a = JointVector::ZERO;
        let mut b = JointVector::ZERO;
        b.base_rotation = 1000.0;
        assert_eq!(move_j_delay(&a, &b), Duration::from_secs_f64(5.0));
    }

    #[test]
    fn move_l_delay_scales_with_xyz_distance() {
        let a = EndEffectorPose::ZERO;
        let b = EndEffectorPose {
            x: 200.0,
            ..EndEffectorPose::ZERO
        };
        assert_eq!(move_l_delay(&a, &b), Duration::from_secs_f64(2.0));
    }

    #[test]
    fn move_l_delay_ignores_orientation_change() {
        let a = EndEffectorPose::ZERO;
        let b = EndEffectorPose {
            roll: 90.0,
            ..EndEffectorPose::ZERO
        };
        assert_eq!(move_l_delay(&a, &b), Duration::from_secs_f64(0.5));
    }
}
