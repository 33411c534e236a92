//! `run`: load a `Program` from a JSON file and execute it against a
//! connected arm, printing the event stream as it goes.

use std::time::Duration;

use clap::Args;
use pendant_sdk::{Connected, Event, PoseCore, Program, ProgramEngine, ProgramStatus};

use crate::error::Result;
use crate::validation::validate_script_path;

#[derive(Args, Debug)]
pub struct RunCommand {
    /// Path to a JSON-encoded `Program`.
    #[arg(short, long)]
    pub script: String,

    /// Print every event on the bus, not just step/program transitions.
    #[arg(long)]
    pub verbose: bool,
}

impl RunCommand {
    pub fn execute(&self, pose: &PoseCore<Connected>, engine: &ProgramEngine) -> Result<()> {
        validate_script_path(&self.script)?;
        let text = std::fs::read_to_string(&self.script)?;
        let program: Program = serde_json::from_str(&text)?;

        println!("program: {} ({} steps)", program.name, program.steps.len());

        let (_id, rx) = pose.bus().subscribe();
        let handle = engine.spawn(program.clone());

        let mut outcome = ProgramStatus::Started;
        loop {
            match rx.recv_timeout(Duration::from_secs(90)) {
                Ok(Event::ProgramExecution {
                    status,
                    step_index,
                    step_type,
                    failed_step,
                    ..
                }) => {
                    if self.verbose {
                        println!(
                            "  event: status={status:?} step={step_index:?} type={step_type:?} failed_step={failed_step:?}"
                        );
                    }
                    let type_suffix = step_type.as_deref().map(|t| format!(" ({t})")).unwrap_or_default();
                    match status {
                        ProgramStatus::StepStarted => {
                            println!("  step {}{type_suffix} started", step_index.unwrap_or(0))
                        }
                        ProgramStatus::StepCompleted => {
                            println!("  step {}{type_suffix} completed", step_index.unwrap_or(0))
                        }
                        ProgramStatus::StepFailed => println!("  step {} FAILED", step_index.unwrap_or(0)),
                        ProgramStatus::Completed | ProgramStatus::Failed => {
                            outcome = status;
                            break;
                        }
                        ProgramStatus::Started => {}
                    }
                }
                Ok(other) => {
                    if self.verbose {
                        println!("  event: {other:?}");
                    }
                }
                Err(_) => {
                    println!("timed out waiting for program events; cancelling");
                    handle.cancel();
                    break;
                }
            }
        }

        println!("program finished: {outcome:?}");
        Ok(())
    }
}
