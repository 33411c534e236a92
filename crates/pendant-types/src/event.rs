//! Broadcast event payloads, fanned out to observers by `pendant-core`'s
//! Broadcast Bus. These are the boundary contract toward the out-of-scope
//! transport collaborator (`spec.md` §6 "Event surface").

use crate::joint::JointVector;
use crate::pose::EndEffectorPose;

/// Terminal status of a running program, as reported by `program_execution`
/// events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ProgramStatus {
    Started,
    StepStarted,
    StepCompleted,
    StepFailed,
    Failed,
    Completed,
}

/// An event fanned out to every subscriber of the Broadcast Bus.
///
/// Each variant's wire `type` tag matches `spec.md` §4.5 and §6 exactly:
/// `position_update`, `jog_stop`, `emergency_stop`, `move_done`,
/// `program_execution`.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum Event {
    PositionUpdate {
        joint_positions: JointVector,
        ee_position: EndEffectorPose,
        timestamp: u64,
    },
    JogStop {
        timestamp: u64,
    },
    EmergencyStop {
        timestamp: u64,
    },
    MoveDone {
        timestamp: u64,
    },
    ProgramExecution {
        status: ProgramStatus,
        program_id: String,
        /// Present for `step_started`/`step_completed`/`step_failed`.
        step_index: Option<usize>,
        /// The step's `type_name()` (`moveJ`/`moveL`/`wait`/`io`). Present
        /// for `step_started`/`step_completed`.
        step_type: Option<String>,
        /// Present only for the terminal `failed` status.
        failed_step: Option<usize>,
    },
}

impl Event {
    pub fn program_started(program_id: impl Into<String>) -> Self {
        Event::ProgramExecution {
            status: ProgramStatus::Started,
            program_id: program_id.into(),
            step_index: None,
            step_type: None,
            failed_step: None,
        }
    }

    pub fn step_started(program_id: impl Into<String>, step_index: usize, step_type: &str) -> Self {
        Event::ProgramExecution {
            status: ProgramStatus::StepStarted,
            program_id: program_id.into(),
            step_index: Some(step_index),
            step_type: Some(step_type.to_string()),
            failed_step: None,
        }
    }

    pub fn step_completed(program_id: impl Into<String>, step_index: usize, step_type: &str) -> Self {
        Event::ProgramExecution {
            status: ProgramStatus::StepCompleted,
            program_id: program_id.into(),
            step_index: Some(step_index),
            step_type: Some(step_type.to_string()),
            failed_step: None,
        }
    }

    pub fn step_failed(program_id: impl Into<String>, step_index: usize) -> Self {
        Event::ProgramExecution {
            status: ProgramStatus::StepFailed,
            program_id: program_id.into(),
            step_index: Some(step_index),
            step_type: None,
            failed_step: None,
        }
    }

    pub fn program_failed(program_id: impl Into<String>, failed_step: usize) -> Self {
        Event::ProgramExecution {
            status: ProgramStatus::Failed,
            program_id: program_id.into(),
            step_index: None,
            step_type: None,
            failed_step: Some(failed_step),
        }
    }

    pub fn program_completed(program_id: impl Into<String>) -> Self {
        Event::ProgramExecution {
            status: ProgramStatus::Completed,
            program_id: program_id.into(),
            step_index: None,
            step_type: None,
            failed_step: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn program_failed_carries_failed_step_only() {
        let ev = Event::program_failed("p1", 2);
        match ev {
            Event::ProgramExecution {
                status,
                step_index,
                failed_step,
                ..
            } => {
                assert_eq!(status, ProgramStatus::Failed);
                assert_eq!(step_index, None);
                assert_eq!(failed_step, Some(2));
            }
            _ => panic!("expected ProgramExecution"),
        }
    }
}
