//! Configuration model: immutable physical parameters read once at startup.
//!
//! Field names and groupings follow `original_source/pendant/config.py`'s
//! `ROBOT_DIMENSIONS`, `JOINT_LIMITS`, `JOG_INCREMENTS`, `JOG_CONFIG`, and
//! `ROBOT_CONFIG` tables — everything except `SERVER_CONFIG`, which belongs
//! to the out-of-scope transport collaborator.

use crate::joint::{AxisName, JointName};
use crate::jog::JogMode;
use crate::joint::JointVector;
use crate::pose::EndEffectorPose;

/// A closed interval `[min, max]`, used both for joint limits and for the
/// workspace box.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Limit {
    pub min: f64,
    pub max: f64,
}

impl Limit {
    pub fn new(min: f64, max: f64) -> Self {
        Limit { min, max }
    }

    pub fn contains(self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    pub fn clamp(self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

/// Physical link dimensions, in millimeters, for the RRPRRR chain.
///
/// `link4` and `ee_length` are always present: this spec adopts the
/// link4-inclusive kinematic chain (see `SPEC_FULL.md` §9 / `DESIGN.md`
/// Open Question decisions).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RobotDimensions {
    pub base_height: f64,
    pub link1: f64,
    pub link2_min: f64,
    pub link2_max: f64,
    pub link3: f64,
    pub link4: f64,
    pub ee_length: f64,
}

/// Per-joint limits, indexed by `JointName`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JointLimits {
    pub base_rotation: Limit,
    pub shoulder_rotation: Limit,
    pub prismatic_extension: Limit,
    pub elbow_rotation: Limit,
    pub elbow2_rotation: Limit,
    pub end_effector_rotation: Limit,
}

impl JointLimits {
    pub fn get(&self, joint: JointName) -> Limit {
        match joint {
            JointName::BaseRotation => self.base_rotation,
            JointName::ShoulderRotation => self.shoulder_rotation,
            JointName::PrismaticExtension => self.prismatic_extension,
            JointName::ElbowRotation => self.elbow_rotation,
            JointName::Elbow2Rotation => self.elbow2_rotation,
            JointName::EndEffectorRotation => self.end_effector_rotation,
        }
    }

    /// Returns the first joint (in `JointName::ALL` order) whose value in
    /// `joints` violates its limit, if any.
    pub fn first_violation(&self, joints: &JointVector) -> Option<(JointName, f64, Limit)> {
        JointName::ALL.into_iter().find_map(|joint| {
            let value = joints.get(joint);
            let limit = self.get(joint);
            if limit.contains(value) {
                None
            } else {
                Some((joint, value, limit))
            }
        })
    }
}

/// Workspace box: per-axis limits for a MoveL target, indexed by
/// `AxisName`.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WorkspaceLimits {
    pub x: Limit,
    pub y: Limit,
    pub z: Limit,
    pub roll: Limit,
    pub pitch: Limit,
    pub yaw: Limit,
}

impl WorkspaceLimits {
    pub fn get(&self, axis: AxisName) -> Limit {
        match axis {
            AxisName::X => self.x,
            AxisName::Y => self.y,
            AxisName::Z => self.z,
            AxisName::Roll => self.roll,
            AxisName::Pitch => self.pitch,
            AxisName::Yaw => self.yaw,
        }
    }

    pub fn first_violation(&self, pose: &EndEffectorPose) -> Option<(AxisName, f64, Limit)> {
        AxisName::ALL.into_iter().find_map(|axis| {
            let value = pose.as_array()[axis.index()];
            let limit = self.get(axis);
            if limit.contains(value) {
                None
            } else {
                Some((axis, value, limit))
            }
        })
    }
}

/// Maximum jog velocity per joint (deg/s or mm/s for the prismatic joint).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JointVelocities {
    pub base_rotation: f64,
    pub shoulder_rotation: f64,
    pub prismatic_extension: f64,
    pub elbow_rotation: f64,
    pub elbow2_rotation: f64,
    pub end_effector_rotation: f64,
}

impl JointVelocities {
    pub fn get(&self, joint: JointName) -> f64 {
        match joint {
            JointName::BaseRotation => self.base_rotation,
            JointName::ShoulderRotation => self.shoulder_rotation,
            JointName::PrismaticExtension => self.prismatic_extension,
            JointName::ElbowRotation => self.elbow_rotation,
            JointName::Elbow2Rotation => self.elbow2_rotation,
            JointName::EndEffectorRotation => self.end_effector_rotation,
        }
    }
}

/// Maximum jog velocity per Cartesian axis (mm/s or deg/s).
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AxisVelocities {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub roll: f64,
    pub pitch: f64,
    pub yaw: f64,
}

impl AxisVelocities {
    pub fn get(&self, axis: AxisName) -> f64 {
        match axis {
            AxisName::X => self.x,
            AxisName::Y => self.y,
            AxisName::Z => self.z,
            AxisName::Roll => self.roll,
            AxisName::Pitch => self.pitch,
            AxisName::Yaw => self.yaw,
        }
    }
}

/// The standard jog-increment ladder for one mode (joint or Cartesian),
/// from `original_source/pendant/config.py`'s `JOG_INCREMENTS` (there keyed
/// `ultra_fine`/`fine`/`medium`/`coarse`/`x_large`; kept here as a plain
/// sorted list since the only operation needed is "snap to closest").
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JogIncrements {
    pub joint: Vec<f64>,
    pub cartesian: Vec<f64>,
}

impl JogIncrements {
    /// Snap `increment` to the closest configured standard increment for
    /// `mode`, per `spec.md` §4.3 `handle_jog_increment`.
    pub fn snap(&self, mode: JogMode, increment: f64) -> f64 {
        let ladder = match mode {
            JogMode::Joint => &self.joint,
            JogMode::Cartesian => &self.cartesian,
        };
        let magnitude = increment.abs();
        ladder
            .iter()
            .copied()
            .min_by(|a, b| {
                (a - magnitude)
                    .abs()
                    .partial_cmp(&(b - magnitude).abs())
                    .unwrap()
            })
            .unwrap_or(magnitude)
    }
}

/// The top-level configuration, read once at startup by the (out-of-scope)
/// configuration-loading collaborator and handed to `pendant-core` as an
/// already-parsed, immutable value.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PendantConfig {
    /// If true, the Motor Link is never contacted; all pose mutations are
    /// in-process only (`spec.md` §6).
    pub simulation_mode: bool,
    pub dimensions: RobotDimensions,
    pub joint_limits: JointLimits,
    pub workspace_limits: WorkspaceLimits,
    pub jog_increments: JogIncrements,
    pub joint_velocities: JointVelocities,
    pub axis_velocities: AxisVelocities,
    /// Jog loop tick period, in seconds (nominal 0.05s / 50ms).
    pub update_interval: f64,
    pub home_pose: JointVector,
    pub default_pose: JointVector,
    pub serial: SerialConfig,
}

/// Motor Link serial transport parameters (`spec.md` §6).
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SerialConfig {
    pub port: String,
    pub baud_rate: u32,
    pub timeout_secs: f64,
    pub command_delay_secs: f64,
}

impl Default for SerialConfig {
    fn default() -> Self {
        SerialConfig {
            port: "/dev/ttyUSB0".to_string(),
            baud_rate: 115200,
            timeout_secs: 1.0,
            command_delay_secs: 0.05,
        }
    }
}

impl PendantConfig {
    /// The second concrete configuration named in `spec.md` §8's test
    /// scenarios: link1=150, link2_min=0, link2_max=200, link3=150,
    /// link4=100, ee_length=100, base_height=100, home pose all zeros with
    /// prismatic_extension=50.
    pub fn scenario_v2() -> Self {
        let joint_limit = Limit::new(-180.0, 180.0);
        PendantConfig {
            simulation_mode: true,
            dimensions: RobotDimensions {
                base_height: 100.0,
                link1: 150.0,
                link2_min: 0.0,
                link2_max: 200.0,
                link3: 150.0,
                link4: 100.0,
                ee_length: 100.0,
            },
            joint_limits: JointLimits {
                base_rotation: Limit::new(-180.0, 180.0),
                shoulder_rotation: Limit::new(-90.0, 90.0),
                prismatic_extension: Limit::new(0.0, 200.0),
                elbow_rotation: Limit::new(-90.0, 90.0),
                elbow2_rotation: Limit::new(-90.0, 90.0),
                end_effector_rotation: joint_limit,
            },
            workspace_limits: WorkspaceLimits {
                x: Limit::new(-800.0, 800.0),
                y: Limit::new(-800.0, 800.0),
                z: Limit::new(0.0, 800.0),
                roll: Limit::new(-180.0, 180.0),
                pitch: Limit::new(-180.0, 180.0),
                yaw: Limit::new(-180.0, 180.0),
            },
            jog_increments: JogIncrements {
                joint: vec![0.1, 1.0, 5.0, 10.0, 30.0],
                cartesian: vec![1.0, 5.0, 10.0, 25.0, 50.0],
            },
            joint_velocities: JointVelocities {
                base_rotation: 20.0,
                shoulder_rotation: 20.0,
                prismatic_extension: 20.0,
                elbow_rotation: 20.0,
                elbow2_rotation: 20.0,
                end_effector_rotation: 20.0,
            },
            axis_velocities: AxisVelocities {
                x: 20.0,
                y: 20.0,
                z: 20.0,
                roll: 20.0,
                pitch: 20.0,
                yaw: 20.0,
            },
            update_interval: 0.05,
            home_pose: JointVector {
                base_rotation: 0.0,
                shoulder_rotation: 0.0,
                prismatic_extension: 50.0,
                elbow_rotation: 0.0,
                elbow2_rotation: 0.0,
                end_effector_rotation: 0.0,
            },
            default_pose: JointVector {
                base_rotation: 0.0,
                shoulder_rotation: 0.0,
                prismatic_extension: 50.0,
                elbow_rotation: 0.0,
                elbow2_rotation: 0.0,
                end_effector_rotation: 0.0,
            },
            serial: SerialConfig::default(),
        }
    }

    /// Parse a `PendantConfig` from a TOML document, as read from
    /// `config/pendant.toml` or `config/pendant_v2.toml` at startup.
    pub fn from_toml_str(s: &str) -> Result<Self, crate::error::PendantError> {
        toml::from_str(s).map_err(|e| crate::error::PendantError::Config(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::JointName;

    #[test]
    fn scenario_v2_matches_spec_home_pose() {
        let cfg = PendantConfig::scenario_v2();
        assert_eq!(cfg.home_pose.prismatic_extension, 50.0);
        assert_eq!(cfg.dimensions.link4, 100.0);
        assert_eq!(cfg.dimensions.ee_length, 100.0);
    }

    #[test]
    fn limit_clamp_saturates() {
        let l = Limit::new(-90.0, 90.0);
        assert_eq!(l.clamp(120.0), 90.0);
        assert_eq!(l.clamp(-120.0), -90.0);
        assert_eq!(l.clamp(10.0), 10.0);
    }

    #[test]
    fn joint_limits_first_violation_detects_out_of_range_shoulder() {
        let cfg = PendantConfig::scenario_v2();
        let mut joints = cfg.home_pose;
        joints.shoulder_rotation = 120.0;
        let violation = cfg.joint_limits.first_violation(&joints);
        assert!(matches!(violation, Some((JointName::ShoulderRotation, 120.0, _))));
    }

    #[test]
    fn jog_increments_snap_to_closest() {
        let cfg = PendantConfig::scenario_v2();
        // joint ladder: [0.1, 1.0, 5.0, 10.0, 30.0]
        assert_eq!(cfg.jog_increments.snap(JogMode::Joint, 0.2), 0.1);
        assert_eq!(cfg.jog_increments.snap(JogMode::Joint, 4.0), 5.0);
        assert_eq!(cfg.jog_increments.snap(JogMode::Joint, 25.0), 30.0);
    }

    #[test]
    #[cfg(feature = "serde")]
    fn round_trip_through_toml() {
        let cfg = PendantConfig::scenario_v2();
        let s = toml::to_string(&cfg).expect("serialize");
        let parsed = PendantConfig::from_toml_str(&s).expect("parse");
        assert_eq!(parsed, cfg);
    }
}
