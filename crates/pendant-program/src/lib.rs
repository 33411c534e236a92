//! # Pendant Program
//!
//! The Program Engine: interprets a `Program` (an ordered list of
//! MoveJ/MoveL/Wait/IO steps) against a connected `PoseCore`, emitting
//! `program_execution` events for each step's start/success/failure
//! (`spec.md` §4.4).
//!
//! Grounded on `piper-client`'s high-level-workflow-atop-the-driver shape;
//! the type-state pattern itself lives in `pendant-core::PoseCore` since
//! the connection state machine belongs to Pose State, not this crate.

pub mod completion;
pub mod delay;
pub mod engine;

pub use completion::StepCompletionToken;
pub use engine::{ProgramEngine, ProgramHandle};
