//! Pose State: the single authoritative record of joint positions,
//! end-effector pose, and jog-loop state (`spec.md` §3, §4.3).

use pendant_types::jog::JogState;
use pendant_types::joint::JointVector;
use pendant_types::pose::EndEffectorPose;

/// The full, consistent snapshot of the arm's pose plus its live jog state.
///
/// Mutation is always serialized by `PoseCore`'s exclusion section
/// (`spec.md` §5): at most one of {a jog-loop tick, a moveJ/moveL handler, a
/// home, an increment handler, an emergency stop} is ever updating this
/// record at a time.
#[derive(Debug, Clone)]
pub struct PoseState {
    pub joints: JointVector,
    pub end_effector: EndEffectorPose,
    pub jog: JogState,
}

impl PoseState {
    pub fn new(joints: JointVector, end_effector: EndEffectorPose) -> Self {
        PoseState {
            joints,
            end_effector,
            jog: JogState::INACTIVE,
        }
    }
}
