//! Optional hand-off of the canvas to an external recognizer. Failures never
//! stop the frame loop; the frame just shows no result.

use std::io::Write;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use image::{GrayImage, ImageFormat};
use log::{debug, warn};

use crate::canvas::Canvas;
use crate::error::{Error, Result};

pub trait Recognizer {
    /// Interpret a binarized snapshot (ink black on white).
    fn recognize(&mut self, snapshot: &GrayImage) -> Result<String>;
}

/// How long a recognizer run may take before it is killed.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);
const POLL_INTERVAL: Duration = Duration::from_millis(5);

/// Runs a shell-free command with the snapshot's PNG path as its last argument
/// and reads the result from stdout. A run past the timeout is killed.
pub struct CommandRecognizer {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandRecognizer {
    /// Split `command_line` on whitespace into program and arguments.
    pub fn new(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace().map(str::to_owned);
        let program = parts
            .next()
            .ok_or_else(|| Error::Recognition("empty recognizer command".into()))?;
        Ok(Self { program, args: parts.collect(), timeout: DEFAULT_TIMEOUT })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Recognizer for CommandRecognizer {
    fn recognize(&mut self, snapshot: &GrayImage) -> Result<String> {
        let mut file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| Error::Snapshot(format!("temp file: {e}")))?;
        let mut png = std::io::Cursor::new(Vec::new());
        snapshot
            .write_to(&mut png, ImageFormat::Png)
            .map_err(|e| Error::Snapshot(format!("encode PNG: {e}")))?;
        file.write_all(png.get_ref())
            .map_err(|e| Error::Snapshot(format!("write PNG: {e}")))?;

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(file.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::Recognition(format!("run {}: {e}", self.program)))?;

        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(_)) => break,
                Ok(None) if Instant::now() >= deadline => {
                    // reap so no zombie is left behind
                    let _ = child.kill();
                    let _ = child.wait();
                    return Err(Error::Recognition(format!(
                        "{} timed out after {} ms",
                        self.program,
                        self.timeout.as_millis()
                    )));
                }
                Ok(None) => thread::sleep(POLL_INTERVAL),
                Err(e) => return Err(Error::Recognition(format!("wait {}: {e}", self.program))),
            }
        }
        let output = child
            .wait_with_output()
            .map_err(|e| Error::Recognition(format!("read {}: {e}", self.program)))?;
        if !output.status.success() {
            return Err(Error::Recognition(format!("{} exited with {}", self.program, output.status)));
        }
        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if text.is_empty() {
            return Err(Error::Recognition(format!("{} printed nothing", self.program)));
        }
        Ok(text)
    }
}

/// Rate-limits submissions and remembers the last result for the HUD.
pub struct Recognition {
    recognizer: Box<dyn Recognizer>,
    every: u32,
    frames: u32,
    last: Option<String>,
}

impl Recognition {
    /// Submit at most once per `every` frames (minimum 1).
    pub fn new(recognizer: Box<dyn Recognizer>, every: u32) -> Self {
        Self { recognizer, every: every.max(1), frames: 0, last: None }
    }

    pub fn last_result(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Call once per frame. Only submits while the board is shown; hiding the
    /// board drops the previous result.
    pub fn update(&mut self, canvas: &Canvas, board_visible: bool) {
        if !board_visible {
            self.frames = 0;
            self.last = None;
            return;
        }
        let due = self.frames == 0;
        self.frames = (self.frames + 1) % self.every;
        if !due {
            return;
        }
        match self.recognizer.recognize(&canvas.binarized()) {
            Ok(text) => {
                debug!("recognized: {text}");
                self.last = Some(text);
            }
            Err(e) => warn!("recognition skipped: {e}"),
        }
    }
}
