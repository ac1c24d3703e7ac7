//! Child process execution with a wall-clock timeout

use crate::errors::{Result, SynthError, ToolFailure};
use std::io::Read;
use std::process::{Command, Stdio};
use std::thread;
use std::time::Duration;
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Runs one named tool; stdout is returned only on a zero exit
#[derive(Debug, Clone)]
pub struct CommandRunner {
    tool: String,
    timeout: Duration,
}

impl CommandRunner {
    pub fn new(tool: impl Into<String>, timeout: Duration) -> Self {
        Self {
            tool: tool.into(),
            timeout,
        }
    }

    pub fn tool(&self) -> &str {
        &self.tool
    }

    pub fn run(&self, command: &mut Command) -> Result<String> {
        debug!(tool = %self.tool, ?command, "running");
        let mut child = command
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| SynthError::tool(&self.tool, ToolFailure::Spawn(err)))?;

        // both pipes are drained while the child runs
        let stdout = child.stdout.take().map(spawn_reader);
        let stderr = child.stderr.take().map(spawn_reader);

        let status = match child.wait_timeout(self.timeout) {
            Ok(Some(status)) => status,
            Ok(None) => {
                let _ = child.kill();
                let _ = child.wait();
                warn!(tool = %self.tool, timeout_secs = self.timeout.as_secs(), "timed out");
                return Err(SynthError::tool(
                    &self.tool,
                    ToolFailure::Timeout(self.timeout.as_secs()),
                ));
            }
            Err(err) => {
                let _ = child.kill();
                return Err(SynthError::tool(&self.tool, ToolFailure::Spawn(err)));
            }
        };

        let stdout = stdout.map(join_reader).unwrap_or_default();
        let stderr = stderr.map(join_reader).unwrap_or_default();

        if status.success() {
            Ok(stdout)
        } else {
            Err(SynthError::tool(
                &self.tool,
                ToolFailure::NonZeroExit {
                    code: status.code(),
                    stderr: truncate(&stderr, 2048),
                },
            ))
        }
    }
}

fn spawn_reader<R: Read + Send + 'static>(mut pipe: R) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        let _ = pipe.read_to_end(&mut buf);
        buf
    })
}

fn join_reader(handle: thread::JoinHandle<Vec<u8>>) -> String {
    handle
        .join()
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
