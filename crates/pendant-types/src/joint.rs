//! Joint and Cartesian-axis enumerations, and the `JointVector` record.
//!
//! Replaces the original implementation's string-keyed joint dictionaries
//! with a fixed, enum-indexed shape, per the redesign note on string-keyed
//! dictionaries: six joints and six Cartesian axes are compile-time
//! constants, not runtime-variable collections.

use std::fmt;

/// The six joints of the RRPRRR chain, in kinematic order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum JointName {
    BaseRotation,
    ShoulderRotation,
    PrismaticExtension,
    ElbowRotation,
    Elbow2Rotation,
    EndEffectorRotation,
}

impl JointName {
    /// All six joints in kinematic order, for iteration.
    pub const ALL: [JointName; 6] = [
        JointName::BaseRotation,
        JointName::ShoulderRotation,
        JointName::PrismaticExtension,
        JointName::ElbowRotation,
        JointName::Elbow2Rotation,
        JointName::EndEffectorRotation,
    ];

    /// Index into a six-element array, matching `JointVector`'s field order.
    pub fn index(self) -> usize {
        match self {
            JointName::BaseRotation => 0,
            JointName::ShoulderRotation => 1,
            JointName::PrismaticExtension => 2,
            JointName::ElbowRotation => 3,
            JointName::Elbow2Rotation => 4,
            JointName::EndEffectorRotation => 5,
        }
    }

    /// The motor-link wire name (`j1`..`j6`) for this joint.
    pub fn wire_name(self) -> &'static str {
        match self {
            JointName::BaseRotation => "j1",
            JointName::ShoulderRotation => "j2",
            JointName::PrismaticExtension => "j3",
            JointName::ElbowRotation => "j4",
            JointName::Elbow2Rotation => "j5",
            JointName::EndEffectorRotation => "j6",
        }
    }

    /// True for the one prismatic joint (`prismatic_extension`); the
    /// remaining five are revolute.
    pub fn is_prismatic(self) -> bool {
        matches!(self, JointName::PrismaticExtension)
    }
}

impl fmt::Display for JointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            JointName::BaseRotation => "base_rotation",
            JointName::ShoulderRotation => "shoulder_rotation",
            JointName::PrismaticExtension => "prismatic_extension",
            JointName::ElbowRotation => "elbow_rotation",
            JointName::Elbow2Rotation => "elbow2_rotation",
            JointName::EndEffectorRotation => "end_effector_rotation",
        };
        f.write_str(s)
    }
}

/// The six Cartesian degrees of freedom addressable by a Cartesian jog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum AxisName {
    X,
    Y,
    Z,
    Roll,
    Pitch,
    Yaw,
}

impl AxisName {
    pub const ALL: [AxisName; 6] = [
        AxisName::X,
        AxisName::Y,
        AxisName::Z,
        AxisName::Roll,
        AxisName::Pitch,
        AxisName::Yaw,
    ];

    pub fn index(self) -> usize {
        match self {
            AxisName::X => 0,
            AxisName::Y => 1,
            AxisName::Z => 2,
            AxisName::Roll => 3,
            AxisName::Pitch => 4,
            AxisName::Yaw => 5,
        }
    }

    /// True for a translational axis (mm); false for an orientation axis
    /// (degrees).
    pub fn is_translation(self) -> bool {
        matches!(self, AxisName::X | AxisName::Y | AxisName::Z)
    }
}

impl fmt::Display for AxisName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AxisName::X => "x",
            AxisName::Y => "y",
            AxisName::Z => "z",
            AxisName::Roll => "roll",
            AxisName::Pitch => "pitch",
            AxisName::Yaw => "yaw",
        };
        f.write_str(s)
    }
}

/// The current joint positions of the arm.
///
/// Units: degrees for every revolute joint, millimeters for
/// `prismatic_extension`.
///
/// Invariant: for any `JointVector` observable outside a move handler,
/// every field lies within its configured limit (`PendantConfig::joint_limits`).
/// Handlers are responsible for enforcing this before publishing a new
/// vector; the type itself does not carry the limits.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct JointVector {
    pub base_rotation: f64,
    pub shoulder_rotation: f64,
    pub prismatic_extension: f64,
    pub elbow_rotation: f64,
    pub elbow2_rotation: f64,
    pub end_effector_rotation: f64,
}

impl JointVector {
    /// All joints at zero (not necessarily a valid home pose — see
    /// `PendantConfig::home_pose` for the real home).
    pub const ZERO: JointVector = JointVector {
        base_rotation: 0.0,
        shoulder_rotation: 0.0,
        prismatic_extension: 0.0,
        elbow_rotation: 0.0,
        elbow2_rotation: 0.0,
        end_effector_rotation: 0.0,
    };

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

    pub fn get_mut(&mut self, joint: JointName) -> &mut f64 {
        match joint {
            JointName::BaseRotation => &mut self.base_rotation,
            JointName::ShoulderRotation => &mut self.shoulder_rotation,
            JointName::PrismaticExtension => &mut self.prismatic_extension,
            JointName::ElbowRotation => &mut self.elbow_rotation,
            JointName::Elbow2Rotation => &mut self.elbow2_rotation,
            JointName::EndEffectorRotation => &mut self.end_effector_rotation,
        }
    }

    pub fn set(&mut self, joint: JointName, value: f64) {
        *self.get_mut(joint) = value;
    }

    /// The six joint values as a plain array, in `JointName::ALL` order.
    pub fn as_array(&self) -> [f64; 6] {
        JointName::ALL.map(|j| self.get(j))
    }

    /// Build a `JointVector` from a six-element array, in `JointName::ALL`
    /// order.
    pub fn from_array(values: [f64; 6]) -> Self {
        let mut jv = JointVector::ZERO;
        for (joint, value) in JointName::ALL.into_iter().zip(values) {
            jv.set(joint, value);
        }
        jv
    }

    /// Largest absolute per-joint difference against `other`, in the
    /// joint's native unit (degrees or mm). Used by the program engine's
    /// simulated MoveJ delay estimate.
    pub fn max_abs_delta(&self, other: &JointVector) -> f64 {
        JointName::ALL
            .into_iter()
            .map(|j| (self.get(j) - other.get(j)).abs())
            .fold(0.0, f64::max)
    }
}
