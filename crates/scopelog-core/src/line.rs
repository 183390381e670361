//! The scoped line logger: the heart of scopelog.
//!
//! A [`LogLine`] writes its header (`[timestamp] LEVEL: `) into an in-memory
//! buffer when it is created, collects appended values, and writes the whole
//! line plus a newline to stderr in one call when it is dropped. With locking
//! enabled it holds the process-wide line lock from creation until that write
//! has been flushed.
//!
//! ```no_run
//! use scopelog_core::{log_info, log_error_nt};
//!
//! let answer = 42;
//! log_info().append("The answer is ").append(answer);
//! log_error_nt().append("Something fatal happened");
//! ```

use std::fmt::{self, Write as _};
use std::io::{self, Write};

use tracing::debug;

use crate::clock;
use crate::error::Result;
use crate::lock::{self, LineLock};
use crate::models::{LineOptions, Severity};

/// One log line, emitted exactly once when it goes out of scope.
pub struct LogLine<W: Write = io::Stderr> {
    severity: Severity,
    timestamp: bool,
    /// `None` once the line has been emitted.
    pending: Option<Pending<W>>,
}

struct Pending<W> {
    buffer: String,
    writer: W,
    lock: Option<LineLock>,
}

impl<W: Write> Pending<W> {
    /// Writes the line and its terminator in one call, then releases the lock.
    fn emit(self) -> io::Result<()> {
        let Pending {
            mut buffer,
            mut writer,
            lock,
        } = self;
        buffer.push('\n');
        let result = writer
            .write_all(buffer.as_bytes())
            .and_then(|()| writer.flush());
        drop(lock);
        result
    }
}

impl LogLine {
    /// Starts a stderr line with the given severity, with or without a timestamp.
    /// Locking is enabled.
    pub fn new(severity: Severity, timestamp: bool) -> Self {
        Self::with_options(LineOptions::new(severity).with_timestamp(timestamp))
    }

    pub fn with_options(options: LineOptions) -> Self {
        Self::to_writer(options, io::stderr())
    }
}

impl<W: Write> LogLine<W> {
    pub(crate) fn to_writer(options: LineOptions, writer: W) -> Self {
        Self::open(options, writer, clock::local_timestamp)
    }

    fn open(options: LineOptions, writer: W, stamp: impl FnOnce() -> String) -> Self {
        // Taken before the header so the timestamp order matches the output order.
        let lock = options.locking.then(lock::acquire);

        let mut buffer = String::with_capacity(64);
        if options.timestamp {
            buffer.push('[');
            buffer.push_str(&stamp());
            buffer.push_str("] ");
        }
        buffer.push_str(options.severity.label());
        buffer.push_str(": ");

        Self {
            severity: options.severity,
            timestamp: options.timestamp,
            pending: Some(Pending {
                buffer,
                writer,
                lock,
            }),
        }
    }

    /// Appends the textual form of `value` and returns the line for chaining.
    pub fn append<T: fmt::Display>(&mut self, value: T) -> &mut Self {
        if let Some(pending) = self.pending.as_mut() {
            let _ = write!(pending.buffer, "{value}");
        }
        self
    }

    /// Appends pre-built format arguments, as produced by `format_args!`.
    pub fn append_args(&mut self, args: fmt::Arguments<'_>) -> &mut Self {
        if let Some(pending) = self.pending.as_mut() {
            let _ = pending.buffer.write_fmt(args);
        }
        self
    }

    /// Emits the line now and reports a failed write instead of ignoring it.
    pub fn finish(mut self) -> Result<()> {
        if let Some(pending) = self.pending.take() {
            pending.emit()?;
        }
        Ok(())
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp
    }

    /// Whether this line holds the process-wide line lock.
    pub fn is_locked(&self) -> bool {
        self.pending
            .as_ref()
            .is_some_and(|pending| pending.lock.is_some())
    }

    /// The line accumulated so far, header included, without the newline.
    pub fn as_str(&self) -> &str {
        self.pending
            .as_ref()
            .map_or("", |pending| pending.buffer.as_str())
    }
}

impl<W: Write> fmt::Write for LogLine<W> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if let Some(pending) = self.pending.as_mut() {
            pending.buffer.push_str(s);
        }
        Ok(())
    }
}

impl<W: Write> fmt::Debug for LogLine<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogLine")
            .field("severity", &self.severity)
            .field("timestamp", &self.timestamp)
            .field("locked", &self.is_locked())
            .field("line", &self.as_str())
            .finish()
    }
}

impl<W: Write> Drop for LogLine<W> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            if let Err(e) = pending.emit() {
                debug!(error = %e, "log line could not be written");
            }
        }
    }
}

// ─── Entry points ─────────────────────────────────────────────────────────────

/// Error line with a timestamp.
pub fn log() -> LogLine {
    LogLine::with_options(LineOptions::default())
}

pub fn log_info() -> LogLine {
    LogLine::new(Severity::Info, true)
}

pub fn log_warn() -> LogLine {
    LogLine::new(Severity::Warn, true)
}

pub fn log_error() -> LogLine {
    LogLine::new(Severity::Error, true)
}

pub fn log_info_nt() -> LogLine {
    LogLine::new(Severity::Info, false)
}

pub fn log_warn_nt() -> LogLine {
    LogLine::new(Severity::Warn, false)
}

pub fn log_error_nt() -> LogLine {
    LogLine::new(Severity::Error, false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::format_timestamp;
    use crate::error::ScopelogError;
    use chrono::{TimeZone, Utc};
    use std::fmt::Write as _;
    use std::sync::{Arc, Mutex};
    use std::thread;

    /// Cloneable in-memory destination shared between a line and the test.
    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Accepts one byte per call, so unserialized writers would interleave.
    #[derive(Clone, Default)]
    struct TrickleBuf(SharedBuf);

    impl Write for TrickleBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            let Some(first) = buf.first() else {
                return Ok(0);
            };
            self.0.write(std::slice::from_ref(first))?;
            thread::yield_now();
            Ok(1)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn unlocked(severity: Severity, timestamp: bool) -> LineOptions {
        LineOptions::new(severity)
            .with_timestamp(timestamp)
            .with_locking(false)
    }

    #[test]
    fn test_info_line_without_time() {
        let out = SharedBuf::default();
        LogLine::to_writer(unlocked(Severity::Info, false), out.clone())
            .append("I am a logger, logging stuff");
        assert_eq!(out.contents(), "INFO: I am a logger, logging stuff\n");
    }

    #[test]
    fn test_error_line_without_time() {
        let out = SharedBuf::default();
        LogLine::to_writer(unlocked(Severity::Error, false), out.clone())
            .append("Something fatal happened");
        assert_eq!(out.contents(), "ERROR: Something fatal happened\n");
    }

    #[test]
    fn test_appends_concatenate_in_order() {
        let out = SharedBuf::default();
        LogLine::to_writer(unlocked(Severity::Warn, false), out.clone())
            .append("You failed ")
            .append(20)
            .append(" times, ratio ")
            .append(0.5)
            .append(' ')
            .append(true);
        assert_eq!(out.contents(), "WARN: You failed 20 times, ratio 0.5 true\n");
    }

    #[test]
    fn test_timestamp_header() {
        let out = SharedBuf::default();
        let instant = Utc.with_ymd_and_hms(2021, 5, 25, 14, 3, 9).unwrap();
        LogLine::open(unlocked(Severity::Info, true), out.clone(), || {
            format_timestamp(&instant)
        })
        .append("The answer is ")
        .append(42);
        assert_eq!(out.contents(), "[2021-05-25 14:03:09] INFO: The answer is 42\n");
    }

    #[test]
    fn test_disabling_timestamp_removes_only_the_stamp() {
        let with = SharedBuf::default();
        let without = SharedBuf::default();
        let instant = Utc.with_ymd_and_hms(2021, 5, 25, 14, 3, 9).unwrap();

        LogLine::open(unlocked(Severity::Warn, true), with.clone(), || {
            format_timestamp(&instant)
        })
        .append("disk at ")
        .append(91)
        .append('%');
        LogLine::to_writer(unlocked(Severity::Warn, false), without.clone())
            .append("disk at ")
            .append(91)
            .append('%');

        let with = with.contents();
        let stripped = with.strip_prefix("[2021-05-25 14:03:09] ").unwrap();
        assert_eq!(stripped, without.contents());
    }

    #[test]
    fn test_real_clock_header_shape() {
        let out = SharedBuf::default();
        LogLine::to_writer(unlocked(Severity::Error, true), out.clone()).append("x");
        let line = out.contents();
        assert!(line.starts_with('['));
        assert_eq!(&line[20..], "] ERROR: x\n");
    }

    #[test]
    fn test_zero_appends_still_emit_header() {
        let out = SharedBuf::default();
        drop(LogLine::to_writer(unlocked(Severity::Error, false), out.clone()));
        assert_eq!(out.contents(), "ERROR: \n");
    }

    #[test]
    fn test_exactly_one_line_per_instance() {
        let out = SharedBuf::default();
        {
            let mut line = LogLine::to_writer(unlocked(Severity::Info, false), out.clone());
            for i in 0..100 {
                line.append(i).append(',');
            }
            assert!(out.contents().is_empty(), "nothing is written before drop");
        }
        let contents = out.contents();
        assert_eq!(contents.matches('\n').count(), 1);
        assert!(contents.ends_with("98,99,\n"));
    }

    #[test]
    fn test_fmt_write_and_args() {
        let out = SharedBuf::default();
        {
            let mut line = LogLine::to_writer(unlocked(Severity::Info, false), out.clone());
            write!(line, "{}-{:03}", "id", 7).unwrap();
            line.append_args(format_args!(" ({:.1}s)", 1.5));
        }
        assert_eq!(out.contents(), "INFO: id-007 (1.5s)\n");
    }

    #[test]
    fn test_accessors() {
        let mut line = LogLine::to_writer(unlocked(Severity::Warn, false), io::sink());
        line.append("abc");
        assert_eq!(line.severity(), Severity::Warn);
        assert!(!line.has_timestamp());
        assert!(!line.is_locked());
        assert_eq!(line.as_str(), "WARN: abc");
    }

    #[test]
    fn test_finish_emits_once() {
        let out = SharedBuf::default();
        let mut line = LogLine::to_writer(unlocked(Severity::Info, false), out.clone());
        line.append("done");
        line.finish().unwrap();
        assert_eq!(out.contents(), "INFO: done\n");
    }

    #[test]
    fn test_finish_reports_write_failure() {
        let line = LogLine::to_writer(unlocked(Severity::Error, false), BrokenPipe);
        let err = line.finish().unwrap_err();
        assert!(matches!(err, ScopelogError::Io(ref e) if e.kind() == io::ErrorKind::BrokenPipe));
    }

    #[test]
    fn test_drop_ignores_write_failure() {
        let mut line = LogLine::to_writer(unlocked(Severity::Error, false), BrokenPipe);
        line.append("lost");
        drop(line);
    }

    #[test]
    fn test_locked_line_holds_lock_until_drop() {
        let out = SharedBuf::default();
        let line = LogLine::to_writer(LineOptions::new(Severity::Info), out.clone());
        assert!(line.is_locked());

        let waiter = thread::spawn(|| drop(lock::acquire()));
        thread::sleep(std::time::Duration::from_millis(20));
        assert!(!waiter.is_finished(), "lock must be held while the line lives");

        drop(line);
        waiter.join().unwrap();
    }

    #[test]
    fn test_concurrent_locked_lines_do_not_interleave() {
        const THREADS: usize = 16;
        let out = TrickleBuf::default();

        let handles: Vec<_> = (0..THREADS)
            .map(|n| {
                let out = out.clone();
                thread::spawn(move || {
                    let options = LineOptions::new(Severity::Info).with_timestamp(false);
                    LogLine::to_writer(options, out)
                        .append("worker ")
                        .append(n)
                        .append(" reporting ")
                        .append("x".repeat(32));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let contents = out.0.contents();
        let mut lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), THREADS);
        lines.sort_unstable();

        let mut expected: Vec<String> = (0..THREADS)
            .map(|n| format!("INFO: worker {n} reporting {}", "x".repeat(32)))
            .collect();
        expected.sort_unstable();
        assert_eq!(lines, expected);
    }
}
