//! `StepCompletionToken`: a one-shot signal the Program Engine registers
//! with the Motor Link before issuing a MoveJ/MoveL, and waits on
//! afterward, per `spec.md` §4.4.
//!
//! Grounded on `piper-client::control::zeroing_token::ZeroingConfirmToken`'s
//! single-purpose token shape — there a token gates a dangerous operation
//! before it runs; here a token reports when one finished.

use std::time::Duration;

use crossbeam_channel::Receiver;
use pendant_motor::MotorLink;

/// Awaits the next `move_done`/`home_done` notification from one
/// `MotorLink`. Must be registered before the triggering command is sent,
/// so the notification cannot race ahead of the waiter.
pub struct StepCompletionToken {
    id: u64,
    rx: Receiver<()>,
}

impl StepCompletionToken {
    pub fn register(link: &MotorLink) -> Self {
        let (id, rx) = link.dispatcher().register();
        StepCompletionToken { id, rx }
    }

    /// Block up to `timeout` for the completion signal. Returns `true` if
    /// it arrived in time.
    pub fn wait(&self, timeout: Duration) -> bool {
        self.rx.recv_timeout(timeout).is_ok()
    }

    /// Always called on exit (success, failure, or timeout) so a stale
    /// waiter does not linger in the dispatcher's table.
    pub fn unregister(self, link: &MotorLink) {
        link.dispatcher().unregister(self.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pendant_motor::InMemorySerialPort;
    use std::time::Duration;

    fn link_with(port: InMemorySerialPort) -> MotorLink {
        let (link, _rx) =
            MotorLink::new(Box::new(port), Duration::from_millis(1), Duration::from_millis(5));
        link
    }

    #[test]
    fn wait_times_out_when_nothing_arrives() {
        let link = link_with(InMemorySerialPort::new());
        let token = StepCompletionToken::register(&link);
        assert!(!token.wait(Duration::from_millis(20)));
        token.unregister(&link);
    }

    #[test]
    fn wait_succeeds_when_move_done_dispatches() {
        let mut port = InMemorySerialPort::new();
        port.push_response(r#"{"status":"move_done"}"#);
        let link = link_with(port);
        let token = StepCompletionToken::register(&link);

        // Out-of-band move_done arrival, as send_command would forward it.
        let outcome = link.send_command(&pendant_motor::Request::Estop).unwrap();
        assert!(matches!(outcome, pendant_motor::CommandOutcome::Unrecognized(_)));

        assert!(token.wait(Duration::from_millis(50)));
        token.unregister(&link);
    }
}
