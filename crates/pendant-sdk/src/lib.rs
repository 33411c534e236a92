//! # Pendant SDK
//!
//! The facade crate: re-exports the public surface of the control pendant's
//! motion core (kinematics, pose state, motor link, program engine) and
//! provides `logging::init` for host applications.
//!
//! Grounded on `piper-sdk`'s re-export-only shape — the teacher crate is
//! itself facade-plus-integration-tests-only; this crate gives that shape
//! actual re-exporting content, since this workspace needs a real prelude.

pub mod logging;

pub use pendant_core::{BroadcastBus, Connected, Disconnected, PartialPose, PoseCore, PoseState};
pub use pendant_kinematics::{forward, inverse_analytic, inverse_differential};
pub use pendant_motor::{CommandOutcome, InMemorySerialPort, MotorLink, MotorNotification, SerialPort};
#[cfg(feature = "serial-backend")]
pub use pendant_motor::RealSerialPort;
pub use pendant_program::{ProgramEngine, ProgramHandle, StepCompletionToken};
pub use pendant_types::config::PendantConfig;
pub use pendant_types::event::{Event, ProgramStatus};
pub use pendant_types::jog::{JogMode, JogState, JogTarget};
pub use pendant_types::joint::{AxisName, JointName, JointVector};
pub use pendant_types::pose::EndEffectorPose;
pub use pendant_types::program::{ExecutionContext, Program, SavedPose, Step};
pub use pendant_types::{PendantError, Result};

/// Convenience glob import for host applications, mirroring the teacher's
/// `piper_sdk::prelude` shape.
pub mod prelude {
    pub use crate::*;
}
