//! Console seams: where answers come from and where the transcript goes.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::sync::{Arc, Mutex, PoisonError};
use std::thread;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tracing::{debug, warn};

//
// ─── INPUT ────────────────────────────────────────────────────────────────────
//

/// A stream of answer lines.
#[async_trait]
pub trait AnswerSource: Send {
    /// Wait for the next line. `None` means the stream is exhausted.
    async fn read_line(&mut self) -> Option<String>;
}

/// Lines delivered through a channel.
///
/// Waiting on an empty channel with a live sender blocks until a line arrives,
/// which is how the terminal behaves.
pub struct ChannelAnswers {
    rx: mpsc::Receiver<String>,
}

impl ChannelAnswers {
    #[must_use]
    pub fn new(rx: mpsc::Receiver<String>) -> Self {
        Self { rx }
    }

    /// Read stdin on a detached thread.
    ///
    /// The thread is never joined: a read still pending when the session ends
    /// is dropped together with the process.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the reader thread cannot be spawned.
    pub fn stdin() -> io::Result<Self> {
        Self::from_reader(io::BufReader::new(io::stdin()))
    }

    /// Forward lines from `reader` on a detached thread.
    ///
    /// A line that is not valid UTF-8 is decoded lossily and still delivered.
    /// The channel closes only at end of input or on an I/O error.
    ///
    /// # Errors
    ///
    /// Returns the I/O error if the reader thread cannot be spawned.
    pub fn from_reader<R>(mut reader: R) -> io::Result<Self>
    where
        R: BufRead + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(1);
        thread::Builder::new()
            .name("stdin-reader".into())
            .spawn(move || {
                let mut buf = Vec::new();
                loop {
                    buf.clear();
                    match reader.read_until(b'\n', &mut buf) {
                        Ok(0) => break,
                        Ok(_) => {
                            if tx.blocking_send(decode_line(&buf)).is_err() {
                                break;
                            }
                        }
                        Err(err) if err.kind() == io::ErrorKind::Interrupted => {}
                        Err(err) => {
                            warn!(error = %err, "stdin read failed");
                            break;
                        }
                    }
                }
                debug!("stdin closed");
            })?;
        Ok(Self::new(rx))
    }
}

/// Strip the line terminator (`\n` or `\r\n`) and decode lossily.
fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}

#[async_trait]
impl AnswerSource for ChannelAnswers {
    async fn read_line(&mut self) -> Option<String> {
        self.rx.recv().await
    }
}

/// A fixed list of lines, then end of stream.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAnswers {
    lines: VecDeque<String>,
}

impl ScriptedAnswers {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

#[async_trait]
impl AnswerSource for ScriptedAnswers {
    async fn read_line(&mut self) -> Option<String> {
        self.lines.pop_front()
    }
}

//
// ─── OUTPUT ───────────────────────────────────────────────────────────────────
//

/// Shared handle to the quiz transcript.
///
/// Cloned into both session activities. Every write is flushed immediately so
/// a prompt is visible before the following blocking read.
#[derive(Clone)]
pub struct Console {
    out: Arc<Mutex<Box<dyn Write + Send>>>,
}

impl Console {
    #[must_use]
    pub fn stdout() -> Self {
        Self::from_writer(io::stdout())
    }

    pub fn from_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Arc::new(Mutex::new(Box::new(writer))),
        }
    }

    /// A console writing into memory, plus a handle to read it back.
    #[must_use]
    pub fn capture() -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        (Self::from_writer(buffer.clone()), buffer)
    }

    /// Write `text` as is.
    ///
    /// # Errors
    ///
    /// Returns the underlying write or flush error.
    pub fn write(&self, text: &str) -> io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("console lock poisoned"))?;
        out.write_all(text.as_bytes())?;
        out.flush()
    }

    /// Write `text` followed by a newline.
    ///
    /// # Errors
    ///
    /// Returns the underlying write or flush error.
    pub fn line(&self, text: &str) -> io::Result<()> {
        self.write(&format!("{text}\n"))
    }
}

/// In-memory transcript.
#[derive(Debug, Clone, Default)]
pub struct CaptureBuffer {
    bytes: Arc<Mutex<Vec<u8>>>,
}

impl CaptureBuffer {
    /// Everything written so far, lossily decoded.
    #[must_use]
    pub fn contents(&self) -> String {
        let bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

impl Write for CaptureBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut bytes = self.bytes.lock().unwrap_or_else(PoisonError::into_inner);
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

    #[tokio::test]
    async fn scripted_answers_run_dry() {
        let mut answers = ScriptedAnswers::new(["4", "Paris"]);
        assert_eq!(answers.read_line().await.as_deref(), Some("4"));
        assert_eq!(answers.read_line().await.as_deref(), Some("Paris"));
        assert_eq!(answers.remaining(), 0);
        assert_eq!(answers.read_line().await, None);
    }

    #[tokio::test]
    async fn channel_answers_end_when_sender_drops() {
        let (tx, rx) = mpsc::channel(4);
        let mut answers = ChannelAnswers::new(rx);
        tx.send("42".to_string()).await.unwrap();
        drop(tx);

        assert_eq!(answers.read_line().await.as_deref(), Some("42"));
        assert_eq!(answers.read_line().await, None);
    }

    async fn drain(mut answers: ChannelAnswers) -> Vec<String> {
        let mut lines = Vec::new();
        while let Some(line) = answers.read_line().await {
            lines.push(line);
        }
        lines
    }

    #[tokio::test]
    async fn invalid_utf8_line_does_not_close_input() {
        let input = std::io::Cursor::new(b"\n\xff\n4\n4\n".to_vec());
        let answers = ChannelAnswers::from_reader(input).unwrap();

        let lines = drain(answers).await;

        assert_eq!(lines, vec!["", "\u{FFFD}", "4", "4"]);
    }

    #[tokio::test]
    async fn reader_end_of_input_closes_the_channel() {
        let input = std::io::Cursor::new(b"Paris".to_vec());
        let mut answers = ChannelAnswers::from_reader(input).unwrap();

        assert_eq!(answers.read_line().await.as_deref(), Some("Paris"));
        assert_eq!(answers.read_line().await, None);
        assert_eq!(answers.read_line().await, None);
    }

    #[tokio::test]
    async fn crlf_endings_are_stripped() {
        let input = std::io::Cursor::new(b"\r\n4\r\nParis\r\n".to_vec());
        let answers = ChannelAnswers::from_reader(input).unwrap();

        assert_eq!(drain(answers).await, vec!["", "4", "Paris"]);
    }

    #[test]
    fn console_clones_share_one_transcript() {
        let (console, buffer) = Console::capture();
        let other = console.clone();

        console.write("Your answer: ").unwrap();
        other.line("Time's up!").unwrap();

        assert_eq!(buffer.contents(), "Your answer: Time's up!\n");
    }
}
