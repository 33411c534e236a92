//! # Pendant Motor Link
//!
//! The serial protocol to the motor controller: one JSON object per line,
//! terminated by `\n`, as specified in `spec.md` §4.2. This crate owns the
//! transport abstraction (`SerialPort`), the wire shapes (`Request`/
//! `Response`), and the mutex-serialized, notification-dispatching driver
//! (`MotorLink`) that `pendant-core`'s Motion Controller calls into.
//!
//! Grounded on `piper-can`'s adapter-trait-plus-real-and-test-backends
//! shape, generalized from CAN frames to line-delimited JSON.

pub mod link;
pub mod port;
pub mod protocol;

pub use link::{CommandOutcome, MotorLink, MotorNotification, NotificationDispatcher};
pub use port::{InMemorySerialPort, SerialPort};
#[cfg(feature = "serial-backend")]
pub use port::RealSerialPort;
pub use protocol::{JointPositions, Request, Response};
