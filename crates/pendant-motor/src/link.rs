//! The Motor Link: the mutex-serialized, notification-dispatching driver of
//! one `SerialPort`, per `spec.md` §4.2.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, Sender};
use parking_lot::Mutex;
use pendant_types::error::PendantError;
use pendant_types::joint::JointVector;

use crate::port::SerialPort;
use crate::protocol::{Request, Response};

/// Outcome of a synchronous `send_command`, per `spec.md` §4.2.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    Ok,
    Error(String),
    Unrecognized(String),
}

/// Fan-out of asynchronous `move_done` notifications to registered waiters.
///
/// Grounded on `piper-driver::hooks::HookManager`'s callback-registry shape,
/// realized with `crossbeam-channel` one-shot senders instead of direct
/// callback invocation (so a waiter can simply block on a `Receiver`).
#[derive(Default)]
pub struct NotificationDispatcher {
    waiters: Mutex<HashMap<u64, Sender<()>>>,
    next_id: AtomicU64,
}

impl NotificationDispatcher {
    pub fn new() -> Self {
        NotificationDispatcher::default()
    }

    /// Register interest in the next `move_done` notification. The caller
    /// must `unregister` with the returned token when it stops waiting
    /// (timeout, success, or early exit), per `spec.md` §4.4's "always
    /// unregister the callback on exit".
    pub fn register(&self) -> (u64, Receiver<()>) {
        let (tx, rx) = bounded(1);
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.waiters.lock().insert(id, tx);
        (id, rx)
    }

    pub fn unregister(&self, token: u64) {
        self.waiters.lock().remove(&token);
    }

    /// Fire every currently-registered waiter. A waiter whose channel is
    /// already full (already notified, not yet collected) is skipped rather
    /// than blocking the dispatch.
    pub fn dispatch_move_done(&self) {
        for tx in self.waiters.lock().values() {
            let _ = tx.try_send(());
        }
    }
}

/// The Motor Link: owns the serial transport and serializes every request
/// through it, per `spec.md` §4.2's "at-most-one in-flight request".
pub struct MotorLink {
    port: Mutex<Box<dyn SerialPort>>,
    connected: AtomicBool,
    command_delay: Duration,
    read_timeout: Duration,
    dispatcher: NotificationDispatcher,
    /// Out-of-band `move_done`/`home_done` lines observed outside of
    /// `send_home`'s own loop are handed here for the Broadcast Bus to pick
    /// up (`spec.md` §4.2's "forwarded to the Broadcast Bus").
    notifications: Sender<MotorNotification>,
}

/// A notification the Motor Link forwards to `pendant-core`'s Broadcast Bus,
/// independent of the `NotificationDispatcher`'s program-engine waiters.
#[derive(Debug, Clone, PartialEq)]
pub enum MotorNotification {
    MoveDone,
    HomeDone,
}

impl MotorLink {
    pub fn new(
        port: Box<dyn SerialPort>,
        command_delay: Duration,
        read_timeout: Duration,
    ) -> (Self, Receiver<MotorNotification>) {
        let (tx, rx) = bounded(64);
        (
            MotorLink {
                port: Mutex::new(port),
                connected: AtomicBool::new(false),
                command_delay,
                read_timeout,
                dispatcher: NotificationDispatcher::new(),
                notifications: tx,
            },
            rx,
        )
    }

    pub fn dispatcher(&self) -> &NotificationDispatcher {
        &self.dispatcher
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    /// Open the link. Sleeps 2s for the controller's post-open reset before
    /// marking the link connected, per `spec.md` §4.2.
    pub fn connect(&self) {
        thread::sleep(Duration::from_secs(2));
        self.connected.store(true, Ordering::Release);
    }

    fn write_request(&self, port: &mut Box<dyn SerialPort>, req: &Request) -> Result<(), PendantError> {
        let line = req.to_line()?;
        port.write_line(&line)?;
        Ok(())
    }

    /// Forward an out-of-band `move_done`/`home_done` arrival: fire any
    /// program-engine waiters and notify the Broadcast Bus.
    fn forward_async(&self, resp: &Response) {
        match resp {
            Response::MoveDone => {
                self.dispatcher.dispatch_move_done();
                let _ = self.notifications.try_send(MotorNotification::MoveDone);
            }
            Response::HomeDone => {
                let _ = self.notifications.try_send(MotorNotification::HomeDone);
            }
            _ => {}
        }
    }

    /// Send one request and wait for its synchronous response, per
    /// `spec.md` §4.2: acquire the link mutex, write, wait one
    /// command-delay tick, read one response line.
    pub fn send_command(&self, req: &Request) -> Result<CommandOutcome, PendantError> {
        let mut port = self.port.lock();
        self.write_request(&mut port, req)?;
        thread::sleep(self.command_delay);
        let line = port.read_line(self.read_timeout)?;
        let resp = Response::parse_line(&line)?;
        drop(port);

        match resp {
            Response::Ok => Ok(CommandOutcome::Ok),
            Response::Error { message } => Ok(CommandOutcome::Error(message)),
            // A move_done/home_done arriving in place of this command's own
            // reply is still an out-of-band notification, not this
            // command's outcome; forward it and report unrecognized so the
            // caller does not mistake it for success.
            Response::MoveDone => {
                self.forward_async(&Response::MoveDone);
                Ok(CommandOutcome::Unrecognized("move_done".to_string()))
            }
            Response::HomeDone => {
                self.forward_async(&Response::HomeDone);
                Ok(CommandOutcome::Unrecognized("home_done".to_string()))
            }
            Response::Unrecognized { status } => Ok(CommandOutcome::Unrecognized(status)),
        }
    }

    /// Send `setJointPositions`. A convenience over `send_command` used by
    /// every discrete move handler and the jog increment handler.
    pub fn set_joint_positions(&self, joints: &JointVector) -> Result<CommandOutcome, PendantError> {
        self.send_command(&Request::set_joint_positions(joints))
    }

    /// Send `estop`. Fire-and-forget per `spec.md` §4.3/§9: the write is
    /// best-effort and its outcome does not gate
    /// `handle_emergency_stop`'s local state transition.
    pub fn send_estop(&self) -> Result<CommandOutcome, PendantError> {
        self.send_command(&Request::Estop)
    }

    /// Send `home` and wait, without timeout on this inner loop, for either
    /// `home_done` (success) or `error` (failure), per `spec.md` §4.2. An
    /// empty line (read timeout) retries rather than failing, unlike
    /// `send_command`'s hard error.
    pub fn send_home(&self) -> Result<(), PendantError> {
        let mut port = self.port.lock();
        self.write_request(&mut port, &Request::Home)?;

        let ack = loop {
            match port.read_line(self.read_timeout) {
                Ok(line) => break line,
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(e.into()),
            }
        };
        match Response::parse_line(&ack)? {
            Response::Ok => {}
            Response::Error { message } => return Err(PendantError::LinkProtocol(message)),
            other => {
                return Err(PendantError::LinkProtocol(format!(
                    "unexpected home acknowledgment: {other:?}"
                )))
            }
        }

        loop {
            let line = match port.read_line(self.read_timeout) {
                Ok(line) => line,
                Err(e) if e.kind() == std::io::ErrorKind::TimedOut => continue,
                Err(e) => return Err(e.into()),
            };
            match Response::parse_line(&line)? {
                Response::HomeDone => {
                    self.forward_async(&Response::HomeDone);
                    return Ok(());
                }
                Response::Error { message } => return Err(PendantError::LinkProtocol(message)),
                Response::MoveDone => self.forward_async(&Response::MoveDone),
                _ => continue,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::InMemorySerialPort;

    fn link_with(port: InMemorySerialPort) -> (MotorLink, Receiver<MotorNotification>) {
        MotorLink::new(
            Box::new(port),
            Duration::from_millis(1),
            Duration::from_millis(10),
        )
    }

    #[test]
    fn send_command_writes_one_line_and_parses_ok() {
        let mut port = InMemorySerialPort::new();
        port.push_response(r#"{"status":"ok"}"#);
        let (link, _rx) = link_with(port);

        let outcome = link.send_command(&Request::Estop).unwrap();
        assert_eq!(outcome, CommandOutcome::Ok);
    }

    #[test]
    fn send_command_surfaces_error_response() {
        let mut port = InMemorySerialPort::new();
        port.push_response(r#"{"status":"error","message":"stalled"}"#);
        let (link, _rx) = link_with(port);

        let outcome = link.send_command(&Request::Estop).unwrap();
        assert_eq!(outcome, CommandOutcome::Error("stalled".to_string()));
    }

    #[test]
    fn send_home_waits_through_move_done_lines_to_home_done() {
        let mut port = InMemorySerialPort::new();
        port.push_response(r#"{"status":"ok"}"#);
        port.push_response(r#"{"status":"move_done"}"#);
        port.push_response(r#"{"status":"home_done"}"#);
        let (link, rx) = link_with(port);

        link.send_home().unwrap();
        assert_eq!(rx.try_recv().unwrap(), MotorNotification::HomeDone);
    }

    #[test]
    fn send_home_fails_on_error_response() {
        let mut port = InMemorySerialPort::new();
        port.push_response(r#"{"status":"ok"}"#);
        port.push_response(r#"{"status":"error","message":"jam"}"#);
        let (link, _rx) = link_with(port);

        let err = link.send_home().unwrap_err();
        assert!(matches!(err, PendantError::LinkProtocol(msg) if msg == "jam"));
    }

    #[test]
    fn move_done_dispatches_to_registered_waiter() {
        let mut port = InMemorySerialPort::new();
        port.push_response(r#"{"status":"move_done"}"#);
        let (link, _rx) = link_with(port);

        let (token, waiter) = link.dispatcher().register();
        // send_command treats an out-of-band move_done as Unrecognized but
        // still dispatches it to waiters.
        let _ = link.send_command(&Request::Estop).unwrap();
        assert!(waiter.try_recv().is_ok());
        link.dispatcher().unregister(token);
    }

    #[test]
    fn connect_marks_link_connected() {
        let (link, _rx) = link_with(InMemorySerialPort::new());
        assert!(!link.is_connected());
        link.connect();
        assert!(link.is_connected());
    }
}
