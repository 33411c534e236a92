//! Saved poses and programs: the shapes the Program Engine (`pendant-program`)
//! interprets, and that the out-of-scope persistence collaborator loads and
//! stores. This crate only defines the shapes; reading/writing them to disk
//! is explicitly out of scope (`spec.md` §1, §6).

use crate::joint::JointVector;
use crate::pose::EndEffectorPose;

/// An immutable, named snapshot of a pose, as saved by an operator for
/// later playback.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SavedPose {
    pub id: String,
    pub name: String,
    /// Unix timestamp (seconds) of when the pose was saved. Supplied by
    /// the persistence collaborator; this crate never stamps its own clock.
    pub timestamp: u64,
    pub joints: JointVector,
    pub end_effector: EndEffectorPose,
}

/// One step of a `Program`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Step {
    MoveJ {
        joint_positions: JointVector,
        velocity_pct: u8,
    },
    MoveL {
        position: EndEffectorPose,
        velocity_pct: u8,
    },
    Wait {
        seconds: f64,
    },
    Io {
        action: String,
        pin: u32,
        value: bool,
    },
}

impl Step {
    /// A short tag for event payloads (`step_started{type}`), matching the
    /// wire vocabulary in `spec.md` §4.4 (`MoveJ`/`MoveL`/`Wait`/`IO`).
    pub fn type_name(&self) -> &'static str {
        match self {
            Step::MoveJ { .. } => "MoveJ",
            Step::MoveL { .. } => "MoveL",
            Step::Wait { .. } => "Wait",
            Step::Io { .. } => "IO",
        }
    }
}

/// An ordered sequence of steps, as authored by an operator (or loaded from
/// the persistence collaborator).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Program {
    pub id: String,
    pub name: String,
    pub steps: Vec<Step>,
}

/// Per-running-program bookkeeping owned by the Program Engine for the
/// duration of one `execute` call.
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionContext {
    pub program_id: String,
    pub current_step: usize,
    pub total_steps: usize,
}

impl ExecutionContext {
    pub fn new(program_id: impl Into<String>, total_steps: usize) -> Self {
        ExecutionContext {
            program_id: program_id.into(),
            current_step: 0,
            total_steps,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_type_names_match_wire_vocabulary() {
        assert_eq!(
            Step::MoveJ {
                joint_positions: JointVector::ZERO,
                velocity_pct: 50
            }
            .type_name(),
            "MoveJ"
        );
        assert_eq!(
            Step::Wait { seconds: 1.0 }.type_name(),
            "Wait"
        );
        assert_eq!(
            Step::Io {
                action: "set".into(),
                pin: 1,
                value: true
            }
            .type_name(),
            "IO"
        );
    }

    #[test]
    fn execution_context_starts_at_step_zero() {
        let ctx = ExecutionContext::new("prog-1", 3);
        assert_eq!(ctx.current_step, 0);
        assert_eq!(ctx.total_steps, 3);
    }
}
