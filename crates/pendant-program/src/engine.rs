//! The Program Engine: interprets a `Program` as an ordered sequence of
//! steps against a connected `PoseCore`, per `spec.md` §4.4.
//!
//! Grounded on `original_source/pendant/routers/programs.py`'s
//! `execute_program` for the event sequence and per-step dispatch, with the
//! FastAPI/persistence specifics dropped (out of scope) and a cooperative
//! `ProgramHandle` cancel flag added — the generalization of that file's
//! implicit reliance on FastAPI `BackgroundTasks` cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use pendant_core::{Connected, PartialPose, PoseCore};
use pendant_motor::MotorLink;
use pendant_types::program::{Program, Step};
use pendant_types::Result;
use pendant_types::{Event, PendantError};

use crate::completion::StepCompletionToken;
use crate::delay::{move_j_delay, move_l_delay};

const MOVE_COMPLETION_TIMEOUT: Duration = Duration::from_secs(60);

/// A handle to an in-flight program execution. Dropping it does not stop
/// the program; call `cancel()` explicitly.
#[derive(Clone)]
pub struct ProgramHandle {
    cancel_flag: Arc<AtomicBool>,
}

impl ProgramHandle {
    /// A fresh, not-yet-cancelled handle, for callers that want to run a
    /// program via `ProgramEngine::run` on their own thread instead of
    /// `spawn`.
    pub fn new() -> Self {
        ProgramHandle {
            cancel_flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Request cancellation. Checked only at step boundaries, so a step
    /// already in flight (a sleeping Wait, an awaited MoveJ/MoveL) still
    /// runs to completion.
    pub fn cancel(&self) {
        self.cancel_flag.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel_flag.load(Ordering::Acquire)
    }
}

impl Default for ProgramHandle {
    fn default() -> Self {
        ProgramHandle::new()
    }
}

/// Interprets programs against one `PoseCore`/`MotorLink` pair.
pub struct ProgramEngine {
    pose: PoseCore<Connected>,
    link: Arc<MotorLink>,
}

impl ProgramEngine {
    pub fn new(pose: PoseCore<Connected>, link: Arc<MotorLink>) -> Self {
        ProgramEngine { pose, link }
    }

    /// Run `program` synchronously on the calling thread to completion or
    /// cancellation. Most callers instead use `spawn`.
    pub fn run(&self, program: &Program, handle: &ProgramHandle) {
        self.pose.bus().publish(Event::program_started(program.id.clone()));

        for (index, step) in program.steps.iter().enumerate() {
            if handle.is_cancelled() {
                return;
            }

            self.pose
                .bus()
                .publish(Event::step_started(program.id.clone(), index, step.type_name()));

            match self.dispatch(step, index) {
                Ok(()) => {
                    self.pose
                        .bus()
                        .publish(Event::step_completed(program.id.clone(), index, step.type_name()));
                }
                Err(err) => {
                    tracing::warn!(program_id = %program.id, step = index, error = %err, "program step failed");
                    self.pose
                        .bus()
                        .publish(Event::step_failed(program.id.clone(), index));
                    self.pose
                        .bus()
                        .publish(Event::program_failed(program.id.clone(), index));
                    return;
                }
            }
        }

        self.pose.bus().publish(Event::program_completed(program.id.clone()));
    }

    /// Spawn `program` on a dedicated thread and return a cancellation
    /// handle immediately.
    pub fn spawn(&self, program: Program) -> ProgramHandle {
        let handle = ProgramHandle::new();
        let engine = ProgramEngine {
            pose: self.pose.clone(),
            link: self.link.clone(),
        };
        let thread_handle = handle.clone();
        thread::spawn(move || engine.run(&program, &thread_handle));
        handle
    }

    fn dispatch(&self, step: &Step, index: usize) -> Result<()> {
        match step {
            Step::Wait { seconds } => {
                thread::sleep(Duration::from_secs_f64(*seconds));
                Ok(())
            }
            // Reserved for a future IO backend; succeeds unconditionally
            // for now (`spec.md` §4.4: "delegate to Motor Link; success for
            // now").
            Step::Io { .. } => Ok(()),
            Step::MoveJ {
                joint_positions,
                velocity_pct,
            } => {
                let before = self.pose.snapshot();
                let simulation = self.pose.config().simulation_mode;
                let token = (!simulation).then(|| StepCompletionToken::register(&self.link));

                self.pose.handle_move_j(*joint_positions, *velocity_pct)?;

                if let Some(token) = token {
                    let completed = token.wait(MOVE_COMPLETION_TIMEOUT);
                    token.unregister(&self.link);
                    if !completed {
                        return Err(PendantError::CompletionTimeout { step_index: index });
                    }
                } else {
                    let after = self.pose.snapshot();
                    thread::sleep(move_j_delay(&before.joints, &after.joints));
                }
                Ok(())
            }
            Step::MoveL {
                position,
                velocity_pct,
            } => {
                let before = self.pose.snapshot();
                let simulation = self.pose.config().simulation_mode;
                let token = (!simulation).then(|| StepCompletionToken::register(&self.link));

                self.pose
                    .handle_move_l(PartialPose::from(*position), *velocity_pct)?;

                if let Some(token) = token {
                    let completed = token.wait(MOVE_COMPLETION_TIMEOUT);
                    token.unregister(&self.link);
                    if !completed {
                        return Err(PendantError::CompletionTimeout { step_index: index });
                    }
                } else {
                    let after = self.pose.snapshot();
                    thread::sleep(move_l_delay(&before.end_effector, &after.end_effector));
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendant_motor::InMemorySerialPort;
    use pendant_types::config::PendantConfig;
    use pendant_types::joint::JointVector;

    fn test_engine() -> ProgramEngine {
        let config = PendantConfig::scenario_v2();
        let (link, _rx) = MotorLink::new(
            Box::new(InMemorySerialPort::new()),
            Duration::from_millis(1),
            Duration::from_millis(5),
        );
        let link = Arc::new(link);
        let pose = pendant_core::PoseCore::new(config).connect(link.clone());
        ProgramEngine::new(pose, link)
    }

    /// Scenario 6 from `spec.md` §8: a two-step program (MoveJ then Wait)
    /// runs to completion and the Broadcast Bus observes the full event
    /// sequence.
    #[test]
    fn runs_move_j_then_wait_and_reports_completion() {
        let engine = test_engine();
        let (_id, rx) = engine.pose.bus().subscribe();

        let mut target = JointVector::ZERO;
        target.base_rotation = 10.0;
        let program = Program {
            id: "p1".to_string(),
            name: "two-step".to_string(),
            steps: vec![
                Step::MoveJ {
                    joint_positions: target,
                    velocity_pct: 50,
                },
                Step::Wait { seconds: 0.01 },
            ],
        };

        engine.run(&program, &ProgramHandle::new());

        let events: Vec<Event> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert!(matches!(
            events.last(),
            Some(Event::ProgramExecution {
                status: pendant_types::event::ProgramStatus::Completed,
                ..
            })
        ));
        assert_eq!(engine.pose.snapshot().joints.base_rotation, 10.0);
    }

    #[test]
    fn joint_limit_violation_fails_the_step_and_the_program() {
        let engine = test_engine();
        let (_id, rx) = engine.pose.bus().subscribe();

        let mut target = JointVector::ZERO;
        target.shoulder_rotation = 500.0;
        let program = Program {
            id: "p2".to_string(),
            name: "bad".to_string(),
            steps: vec![Step::MoveJ {
                joint_positions: target,
                velocity_pct: 50,
            }],
        };

        engine.run(&program, &ProgramHandle::new());

        let events: Vec<Event> = std::iter::from_fn(|| rx.try_recv().ok()).collect();
        assert!(matches!(
            events.last(),
            Some(Event::ProgramExecution {
                status: pendant_types::event::ProgramStatus::Failed,
                failed_step: Some(0),
                ..
            })
        ));
    }

    #[test]
    fn cancel_stops_before_the_next_step() {
        let engine = test_engine();
        let handle = ProgramHandle::new();
        handle.cancel();
        let program = Program {
            id: "p3".to_string(),
            name: "cancelled".to_string(),
            steps: vec![Step::Wait { seconds: 10.0 }],
        };

        let start = std::time::Instant::now();
        engine.run(&program, &handle);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
