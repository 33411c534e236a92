//! Analytic (closed-form) inverse kinematics: `EndEffectorPose` → `JointVector`.
//!
//! Grounded on `original_source/pendant/kinematics.py`'s
//! `InverseKinematics.calculate`, extended for the link4-inclusive chain
//! (`q1`/`q2`/`d3` unaffected by the extra link; `q4` redundancy still
//! collapses to zero; `q5`/`q6` take over the orientation role that the
//! omitting variant assigned to its own `q5`/`q6`).

use pendant_types::config::{JointLimits, RobotDimensions};
use pendant_types::error::PendantError;
use pendant_types::joint::JointVector;
use pendant_types::pose::EndEffectorPose;

use crate::fk::forward;

/// Solve for a `JointVector` that reaches `target`, per `spec.md` §4.1's
/// analytic moveL solver:
///
/// 1. `q1 = atan2(y, x)`.
/// 2. `r = sqrt(x²+y²) - ee_length`; `z' = z - base_height`.
/// 3. `q2 = atan2(z', r)`; reach `R = sqrt(r² + z'²)`.
/// 4. `d3 = R - link1 - link3 - link4`; fails with `OutOfReach` if outside
///    `[link2_min, link2_max]`.
/// 5. `q4 = 0` (redundancy fixed); `q5 = pitch`, `q6 = roll`.
/// 6. Validates every joint against `limits`; fails with
///    `JointLimitViolation` if any exceeds.
/// 7. Round-trips through `forward`; fails with `IkInconsistent` if the
///    Euclidean position error exceeds 10mm.
pub fn inverse_analytic(
    target: &EndEffectorPose,
    dims: &RobotDimensions,
    limits: &JointLimits,
) -> Result<JointVector, PendantError> {
    let q1 = target.y.atan2(target.x);

    let r = (target.x.powi(2) + target.y.powi(2)).sqrt() - dims.ee_length;
    let z_adjusted = target.z - dims.base_height;

    let q2 = z_adjusted.atan2(r);
    let reach = (r.powi(2) + z_adjusted.powi(2)).sqrt();

    let d3 = reach - dims.link1 - dims.link3 - dims.link4;
    if d3 < dims.link2_min || d3 > dims.link2_max {
        return Err(PendantError::OutOfReach {
            d3,
            min: dims.link2_min,
            max: dims.link2_max,
        });
    }

    let q4 = 0.0_f64;
    let q5 = target.pitch.to_radians();
    let q6 = target.roll.to_radians();

    let joints = JointVector {
        base_rotation: q1.to_degrees(),
        shoulder_rotation: q2.to_degrees(),
        prismatic_extension: d3,
        elbow_rotation: q4.to_degrees(),
        elbow2_rotation: q5.to_degrees(),
        end_effector_rotation: q6.to_degrees(),
    };

    if let Some((joint, value, limit)) = limits.first_violation(&joints) {
        return Err(PendantError::JointLimitViolation {
            joint: joint.to_string(),
            value,
            min: limit.min,
            max: limit.max,
        });
    }

    let achieved = forward(&joints, dims);
    let error_mm = achieved.xyz_distance(target);
    if error_mm > 10.0 {
        return Err(PendantError::IkInconsistent { error_mm });
    }

    Ok(joints)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendant_types::config::PendantConfig;

    /// Scenario 3 from `spec.md` §8: out-of-reach moveL.
    #[test]
    fn out_of_reach_target_fails() {
        let cfg = PendantConfig::scenario_v2();
        let target = EndEffectorPose {
            x: 2000.0,
            y: 0.0,
            z: 100.0,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
        };
        let result = inverse_analytic(&target, &cfg.dimensions, &cfg.joint_limits);
        assert!(matches!(result, Err(PendantError::OutOfReach { .. })));
    }

    #[test]
    fn home_pose_round_trips_through_fk() {
        let cfg = PendantConfig::scenario_v2();
        let home_pose = forward(&cfg.home_pose, &cfg.dimensions);
        let joints = inverse_analytic(&home_pose, &cfg.dimensions, &cfg.joint_limits)
            .expect("home pose must be reachable");
        assert!((joints.base_rotation - cfg.home_pose.base_rotation).abs() < 1e-6);
        assert!((joints.shoulder_rotation - cfg.home_pose.shoulder_rotation).abs() < 1e-6);
        assert!((joints.prismatic_extension - cfg.home_pose.prismatic_extension).abs() < 1e-6);
        // q4 collapses to zero regardless of the source joint vector's
        // elbow_rotation, per the redundancy-fixing rule.
        assert_eq!(joints.elbow_rotation, 0.0);
    }

    #[test]
    fn result_satisfies_fk_round_trip_invariant() {
        let cfg = PendantConfig::scenario_v2();
        let target = EndEffectorPose {
            x: 400.0,
            y: 50.0,
            z: 150.0,
            roll: 5.0,
            pitch: -3.0,
            yaw: 0.0,
        };
        if let Ok(joints) = inverse_analytic(&target, &cfg.dimensions, &cfg.joint_limits) {
            let achieved = forward(&joints, &cfg.dimensions);
            assert!(achieved.xyz_distance(&target) <= 10.0);
        }
    }
}
