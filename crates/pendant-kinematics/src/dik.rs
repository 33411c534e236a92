//! Differential (iterative) inverse kinematics: the Cartesian jog solver.
//!
//! Grounded on `spec.md` §4.1's DIK algorithm directly — the kept
//! `original_source/pendant/kinematics.py` does not define
//! `calculate_differential` (only `routers/motion.py`'s
//! `update_cartesian_position` calls it), so this module implements the
//! spec's description from scratch: a forward-difference numerical Jacobian
//! inverted with `nalgebra`'s SVD-based pseudoinverse, in place of a
//! hand-rolled Gauss-Jordan solve.

use nalgebra::{Matrix6, Vector6};
use pendant_types::config::{JointLimits, RobotDimensions};
use pendant_types::joint::{JointName, JointVector};
use pendant_types::pose::EndEffectorPose;

use crate::fk::forward;

const MAX_ITERATIONS: usize = 10;
const CONVERGENCE_TOLERANCE: f64 = 1e-3;
const JACOBIAN_STEP: f64 = 1e-3;

fn pose_error(target: &EndEffectorPose, current: &EndEffectorPose) -> Vector6<f64> {
    let t = target.as_array();
    let c = current.as_array();
    Vector6::from_iterator((0..6).map(|i| t[i] - c[i]))
}

/// Numerical Jacobian of `forward` at `joints`, by forward difference with
/// step `JACOBIAN_STEP` on each joint coordinate (`spec.md` §4.1 step 3).
fn numerical_jacobian(joints: &JointVector, dims: &RobotDimensions) -> Matrix6<f64> {
    let base = forward(joints, dims).as_array();
    let mut jac = Matrix6::zeros();
    for (col, joint) in JointName::ALL.into_iter().enumerate() {
        let mut perturbed = *joints;
        perturbed.set(joint, joints.get(joint) + JACOBIAN_STEP);
        let perturbed_pose = forward(&perturbed, dims).as_array();
        for row in 0..6 {
            jac[(row, col)] = (perturbed_pose[row] - base[row]) / JACOBIAN_STEP;
        }
    }
    jac
}

/// Iteratively solve for a `JointVector` reaching `target`, seeded at
/// `seed`, per `spec.md` §4.1's differential inverse kinematics. Returns
/// `None` if the iteration budget is exhausted without converging
/// (`spec.md`'s `no-solution` outcome) — callers map this to
/// `PendantError::NoSolution`.
///
/// Single-threaded and pure: the caller must not mutate shared pose state
/// concurrently with this call.
pub fn inverse_differential(
    seed: &JointVector,
    target: &EndEffectorPose,
    dims: &RobotDimensions,
    limits: &JointLimits,
) -> Option<JointVector> {
    let mut joints = *seed;

    for _ in 0..MAX_ITERATIONS {
        let current = forward(&joints, dims);
        let err = pose_error(target, &current);
        if err.norm() < CONVERGENCE_TOLERANCE {
            return Some(joints);
        }

        let jacobian = numerical_jacobian(&joints, dims);
        let delta = jacobian.pseudo_inverse(1e-9).ok()? * err;

        for joint in JointName::ALL {
            let updated = joints.get(joint) + delta[joint.index()];
            joints.set(joint, limits.get(joint).clamp(updated));
        }
    }

    let current = forward(&joints, dims);
    if pose_error(target, &current).norm() < CONVERGENCE_TOLERANCE {
        Some(joints)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendant_types::config::PendantConfig;

    /// Scenario 4 from `spec.md` §8: cartesian jog with DIK, z+10mm from home.
    #[test]
    fn converges_on_small_z_step_from_home() {
        let cfg = PendantConfig::scenario_v2();
        let home_pose = forward(&cfg.home_pose, &cfg.dimensions);
        let target = EndEffectorPose {
            z: home_pose.z + 10.0,
            ..home_pose
        };

        let solved = inverse_differential(
            &cfg.home_pose,
            &target,
            &cfg.dimensions,
            &cfg.joint_limits,
        )
        .expect("small cartesian step should converge");

        let achieved = forward(&solved, &cfg.dimensions);
        assert!((achieved.z - target.z).abs() < 1e-3);
        assert!((achieved.x - target.x).abs() < 1e-3);
        assert!((achieved.y - target.y).abs() < 1e-3);
    }

    #[test]
    fn result_respects_joint_limits() {
        let cfg = PendantConfig::scenario_v2();
        let home_pose = forward(&cfg.home_pose, &cfg.dimensions);
        let target = EndEffectorPose {
            z: home_pose.z + 10.0,
            ..home_pose
        };
        if let Some(joints) = inverse_differential(
            &cfg.home_pose,
            &target,
            &cfg.dimensions,
            &cfg.joint_limits,
        ) {
            assert!(cfg.joint_limits.first_violation(&joints).is_none());
        }
    }

    #[test]
    fn unreachable_target_returns_none() {
        let cfg = PendantConfig::scenario_v2();
        let target = EndEffectorPose {
            x: 5000.0,
            y: 5000.0,
            z: 5000.0,
            roll: 0.0,
            pitch: 0.0,
            yaw: 0.0,
        };
        assert!(inverse_differential(
            &cfg.home_pose,
            &target,
            &cfg.dimensions,
            &cfg.joint_limits
        )
        .is_none());
    }
}
