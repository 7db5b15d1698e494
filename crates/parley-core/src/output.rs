//! Shared terminal output handle.
//!
//! The session loop, the progress indicator task and the renderer all write
//! to the same terminal. `OutputSink` is a cloneable handle to one writer so
//! they can share it across tasks, and so tests can capture what the user
//! would have seen.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Cloneable, thread-safe writer handle. Every write is flushed immediately.
#[derive(Clone)]
pub struct OutputSink {
    inner: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl OutputSink {
    /// Sink writing to the process's stdout.
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// In-memory sink plus a handle for reading back what was written.
    pub fn capture() -> (Self, CapturedOutput) {
        let buffer = CapturedOutput::default();
        (Self::from_writer(buffer.clone()), buffer)
    }

    /// Write `text` as-is and flush.
    pub fn write_str(&self, text: &str) -> io::Result<()> {
        let mut writer = self
            .inner
            .lock()
            .map_err(|_| io::Error::other("output lock poisoned"))?;
        writer.write_all(text.as_bytes())?;
        writer.flush()
    }

    /// Write `text` followed by a newline.
    pub fn line(&self, text: &str) -> io::Result<()> {
        self.write_str(&format!("{text}\n"))
    }
}

impl std::fmt::Debug for OutputSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("OutputSink")
    }
}

/// Buffer behind [`OutputSink::capture`].
#[derive(Clone, Default)]
pub struct CapturedOutput {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CapturedOutput {
    /// Everything written so far, lossily decoded as UTF-8.
    pub fn contents(&self) -> String {
        match self.bytes.lock() {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(poisoned) => String::from_utf8_lossy(&poisoned.into_inner()).into_owned(),
        }
    }
}

impl Write for CapturedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self
            .bytes
            .lock()
            .map_err(|_| io::Error::other("capture lock poisoned"))?;
        bytes.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_one_writer() {
        let (sink, captured) = OutputSink::capture();
        let other = sink.clone();

        sink.write_str("a").unwrap();
        other.line("b").unwrap();

        assert_eq!(captured.contents(), "ab\n");
    }
}
