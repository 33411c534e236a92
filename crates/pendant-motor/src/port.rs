//! The `SerialPort` transport trait and its two implementations.
//!
//! Grounded on `piper-can`'s `CanAdapter`/`RxAdapter`/`TxAdapter` split-
//! adapter shape (trait over a hardware transport, real backend plus a
//! software test double), generalized from CAN frames to line-delimited
//! text.

use std::io;
use std::time::Duration;

use smallvec::SmallVec;

/// A line-oriented transport to the motor controller.
///
/// Implementations are not required to be `Clone`; `MotorLink` holds the
/// single instance behind a mutex, matching the "at-most-one in-flight
/// request" serialization `spec.md` §4.2 requires.
pub trait SerialPort: Send {
    /// Write one line (the caller supplies the trailing `\n`).
    fn write_line(&mut self, line: &str) -> io::Result<()>;

    /// Read one `\n`-terminated line, blocking up to `timeout`.
    ///
    /// Returns `Err` with `ErrorKind::TimedOut` if no complete line arrives
    /// within `timeout` — callers distinguish this from other IO errors to
    /// implement `send_home`'s retry-on-empty-line behavior.
    fn read_line(&mut self, timeout: Duration) -> io::Result<String>;
}

/// The real backend, built on the `serialport` crate.
#[cfg(feature = "serial-backend")]
pub struct RealSerialPort {
    inner: Box<dyn serialport::SerialPort>,
    buf: SmallVec<[u8; 64]>,
}

#[cfg(feature = "serial-backend")]
impl RealSerialPort {
    /// Open `port_name` at `baud_rate`. Does not perform the post-open
    /// reset sleep — that is `MotorLink::connect`'s responsibility
    /// (`spec.md` §4.2).
    pub fn open(port_name: &str, baud_rate: u32) -> io::Result<Self> {
        let inner = serialport::new(port_name, baud_rate)
            .timeout(Duration::from_millis(50))
            .open()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;
        Ok(RealSerialPort {
            inner,
            buf: SmallVec::new(),
        })
    }
}

#[cfg(feature = "serial-backend")]
impl SerialPort for RealSerialPort {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        use std::io::Write;
        self.inner.write_all(line.as_bytes())?;
        self.inner.flush()
    }

    fn read_line(&mut self, timeout: Duration) -> io::Result<String> {
        use std::io::Read;
        self.inner
            .set_timeout(timeout)
            .map_err(|e| io::Error::new(io::ErrorKind::Other, e))?;

        let deadline = std::time::Instant::now() + timeout;
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => {}
                Ok(_) => {
                    if byte[0] == b'\n' {
                        let line = String::from_utf8_lossy(&self.buf).trim().to_string();
                        self.buf.clear();
                        return Ok(line);
                    }
                    self.buf.push(byte[0]);
                }
                Err(e) if e.kind() == io::ErrorKind::TimedOut => {
                    if std::time::Instant::now() >= deadline {
                        return Err(io::Error::new(io::ErrorKind::TimedOut, "no response line"));
                    }
                }
                Err(e) => return Err(e),
            }
            if std::time::Instant::now() >= deadline {
                return Err(io::Error::new(io::ErrorKind::TimedOut, "no response line"));
            }
        }
    }
}

/// An in-memory test double: records written lines and serves queued
/// response lines, for use by `pendant-core`/`pendant-program` tests and by
/// this crate's own `link` tests without any real hardware.
#[derive(Debug, Default)]
pub struct InMemorySerialPort {
    written: Vec<String>,
    queued_responses: std::collections::VecDeque<String>,
}

impl InMemorySerialPort {
    pub fn new() -> Self {
        InMemorySerialPort::default()
    }

    /// Queue a response line to be returned by the next `read_line` call.
    pub fn push_response(&mut self, line: impl Into<String>) {
        self.queued_responses.push_back(line.into());
    }

    /// Every line written so far, oldest first, with the trailing newline
    /// stripped.
    pub fn written_lines(&self) -> &[String] {
        &self.written
    }
}

impl SerialPort for InMemorySerialPort {
    fn write_line(&mut self, line: &str) -> io::Result<()> {
        self.written.push(line.trim_end().to_string());
        Ok(())
    }

    fn read_line(&mut self, _timeout: Duration) -> io::Result<String> {
        self.queued_responses
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::TimedOut, "no response queued"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_port_records_writes_and_serves_responses() {
        let mut port = InMemorySerialPort::new();
        port.push_response(r#"{"status":"ok"}"#);
        port.write_line("{\"cmd\":\"home\"}\n").unwrap();
        assert_eq!(port.written_lines(), [r#"{"cmd":"home"}"#]);
        assert_eq!(
            port.read_line(Duration::from_millis(10)).unwrap(),
            r#"{"status":"ok"}"#
        );
    }

    #[test]
    fn in_memory_port_times_out_with_no_queued_response() {
        let mut port = InMemorySerialPort::new();
        let err = port.read_line(Duration::from_millis(10)).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::TimedOut);
    }
}
