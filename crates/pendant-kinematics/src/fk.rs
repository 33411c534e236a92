//! Forward kinematics: `JointVector` → `EndEffectorPose`.
//!
//! Computes the homogeneous transform chain `T = T01·T12·T23·T34·T45·T56`
//! described in `spec.md` §4.1, using the link4-inclusive formulation
//! (`SPEC_FULL.md` §9 / `DESIGN.md` Open Question decisions). Grounded on
//! `original_source/pendant/kinematics.py`'s `ForwardKinematics.calculate`
//! for the transform structure and Euler-angle extraction, extended with
//! the `T45` link4 translation that file omits.

use nalgebra::Matrix4;
use pendant_types::config::RobotDimensions;
use pendant_types::joint::JointVector;
use pendant_types::pose::EndEffectorPose;

fn rotation_z_translation(angle_rad: f64, tx: f64, tz: f64) -> Matrix4<f64> {
    let (s, c) = angle_rad.sin_cos();
    #[rustfmt::skip]
    let m = Matrix4::new(
        c, -s, 0.0, tx,
        s,  c, 0.0, 0.0,
        0.0, 0.0, 1.0, tz,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}

/// Same rotation as `rotation_z_translation`, but the link translation is
/// expressed in the rotated local x (`link*cos`, `link*sin`) instead of the
/// parent frame — the correct column for a link that translates along the
/// axis its own joint just rotated.
fn rotation_z_link_translation(angle_rad: f64, link: f64, tz: f64) -> Matrix4<f64> {
    let (s, c) = angle_rad.sin_cos();
    #[rustfmt::skip]
    let m = Matrix4::new(
        c, -s, 0.0, link * c,
        s,  c, 0.0, link * s,
        0.0, 0.0, 1.0, tz,
        0.0, 0.0, 0.0, 1.0,
    );
    m
}

fn translation_x(tx: f64) -> Matrix4<f64> {
    Matrix4::new_translation(&nalgebra::Vector3::new(tx, 0.0, 0.0))
}

/// Compute the end-effector pose for a given joint vector.
///
/// Position is extracted from the last column of `T`; orientation is
/// extracted from the 3x3 rotation block as ZYX Euler angles:
/// `pitch = asin(-R[2,0])`; if `|cos(pitch)| > 1e-10`,
/// `roll = atan2(R[2,1], R[2,2])`, `yaw = atan2(R[1,0], R[0,0])`; otherwise
/// (gimbal lock) `roll = 0`, `yaw = atan2(-R[0,1], R[1,1])`. Angles are
/// returned in degrees.
pub fn forward(joints: &JointVector, dims: &RobotDimensions) -> EndEffectorPose {
    let q1 = joints.base_rotation.to_radians();
    let q2 = joints.shoulder_rotation.to_radians();
    let d3 = joints.prismatic_extension;
    let q4 = joints.elbow_rotation.to_radians();
    let q5 = joints.elbow2_rotation.to_radians();
    let q6 = joints.end_effector_rotation.to_radians();

    // Base rotation (yaw about z) plus the fixed base lift.
    let t01 = rotation_z_translation(q1, 0.0, dims.base_height);
    // Shoulder pitch, modeled (as in the source) as a z-axis rotation in
    // the planar chain with translation along the rotated local x.
    let t12 = rotation_z_link_translation(q2, dims.link1, 0.0);
    // Prismatic extension along local x.
    let t23 = translation_x(d3);
    // Elbow rotation with link3 translation.
    let t34 = rotation_z_link_translation(q4, dims.link3, 0.0);
    // Elbow2 rotation with link4 translation (the link4-inclusive
    // extension over the omitting variant in the source).
    let t45 = rotation_z_link_translation(q5, dims.link4, 0.0);
    // End-effector rotation with the fixed tool offset.
    let t56 = rotation_z_translation(q6, dims.ee_length, 0.0);

    let t06 = t01 * t12 * t23 * t34 * t45 * t56;

    let x = t06[(0, 3)];
    let y = t06[(1, 3)];
    let z = t06[(2, 3)];

    let r20 = t06[(2, 0)];
    let pitch = (-r20).asin();

    let (roll, yaw) = if pitch.cos().abs() > 1e-10 {
        let roll = t06[(2, 1)].atan2(t06[(2, 2)]);
        let yaw = t06[(1, 0)].atan2(t06[(0, 0)]);
        (roll, yaw)
    } else {
        let yaw = (-t06[(0, 1)]).atan2(t06[(1, 1)]);
        (0.0, yaw)
    };

    EndEffectorPose {
        x,
        y,
        z,
        roll: roll.to_degrees(),
        pitch: pitch.to_degrees(),
        yaw: yaw.to_degrees(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendant_types::config::PendantConfig;

    /// Scenario 1 from `spec.md` §8: FK at home.
    #[test]
    fn fk_at_home_matches_spec_scenario() {
        let cfg = PendantConfig::scenario_v2();
        let pose = forward(&cfg.home_pose, &cfg.dimensions);
        // 150 (link1) + 50 (d3) + 150 (link3) + 100 (link4) + 100 (ee_length)
        assert!((pose.x - 550.0).abs() < 1e-6, "x = {}", pose.x);
        assert!(pose.y.abs() < 1e-6, "y = {}", pose.y);
        assert!((pose.z - 100.0).abs() < 1e-6, "z = {}", pose.z);
        assert!(pose.roll.abs() < 1e-6);
        assert!(pose.pitch.abs() < 1e-6);
        assert!(pose.yaw.abs() < 1e-6);
    }

    #[test]
    fn base_rotation_turns_xy_without_changing_z() {
        let cfg = PendantConfig::scenario_v2();
        let mut joints = cfg.home_pose;
        joints.base_rotation = 90.0;
        let pose = forward(&joints, &cfg.dimensions);
        assert!(pose.x.abs() < 1e-6, "x = {}", pose.x);
        assert!((pose.y - 550.0).abs() < 1e-6, "y = {}", pose.y);
        assert!((pose.z - 100.0).abs() < 1e-6);
        assert!((pose.yaw - 90.0).abs() < 1e-6);
    }

    #[test]
    fn shoulder_rotation_carries_link1_translation_with_it() {
        let cfg = PendantConfig::scenario_v2();
        let mut joints = cfg.home_pose;
        joints.shoulder_rotation = 90.0;
        let pose = forward(&joints, &cfg.dimensions);
        // link1 (150) now points along y instead of x; the rest of the
        // chain (d3 50, link3 150, link4 100, ee 100) still runs along x.
        assert!(pose.x.abs() < 1e-6, "x = {}", pose.x);
        assert!((pose.y - 550.0).abs() < 1e-6, "y = {}", pose.y);
        assert!((pose.z - 100.0).abs() < 1e-6, "z = {}", pose.z);
    }

    #[test]
    fn prismatic_extension_changes_reach_only() {
        let cfg = PendantConfig::scenario_v2();
        let mut joints = cfg.home_pose;
        joints.prismatic_extension = 100.0;
        let pose = forward(&joints, &cfg.dimensions);
        assert!((pose.x - 600.0).abs() < 1e-6, "x = {}", pose.x);
    }
}
