//! Shared data model for the control pendant motion core.
//!
//! This crate has no dependency on any sibling crate in the workspace — it
//! defines the vocabulary (`JointVector`, `EndEffectorPose`, `JogState`,
//! `SavedPose`, `Program`, events) and the single error type
//! (`PendantError`) that every other crate builds on.
//!
//! ## Modules
//!
//! - `joint`: joint/axis enums and the `JointVector` record.
//! - `pose`: `EndEffectorPose` and the combined `Pose` snapshot.
//! - `jog`: `JogState` and jog-mode enums.
//! - `program`: `SavedPose`, `Program`, `Step`, `ExecutionContext`.
//! - `event`: broadcast event payloads.
//! - `config`: the configuration model read at startup.
//! - `error`: `PendantError`, the workspace-wide error type.

pub mod config;
pub mod error;
pub mod event;
pub mod jog;
pub mod joint;
pub mod pose;
pub mod program;

pub use config::PendantConfig;
pub use error::PendantError;
pub use event::Event;
pub use jog::{JogMode, JogState};
pub use joint::{AxisName, JointName, JointVector};
pub use pose::{EndEffectorPose, Pose};
pub use program::{ExecutionContext, Program, SavedPose, Step};

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, PendantError>;
