// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! External command execution.
//!
//! Test runners, coverage tools and linters are invoked through the
//! [`CommandRunner`] trait so parsing and correlation can be exercised
//! without spawning processes.

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{Error, Result};

/// Exit code reported when a process was terminated by a signal.
pub const SIGNALED_EXIT_CODE: i32 = -1;

/// Captured result of an external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Process exit code.
    pub code: i32,
    /// Standard output followed by standard error.
    pub output: String,
}

impl CommandOutput {
    pub fn new(code: i32, output: impl Into<String>) -> Self {
        Self {
            code,
            output: output.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }
}

/// Runs shell command lines and captures their output.
pub trait CommandRunner: Send + Sync {
    /// Run a command line to completion.
    fn run(&self, command_line: &str) -> Result<CommandOutput>;
}

/// Runs command lines through the platform shell.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    /// Working directory (inherits the current directory when None).
    pub cwd: Option<PathBuf>,
    /// Kill the command after this long (waits indefinitely when None).
    pub timeout: Option<Duration>,
}

impl ShellRunner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }

    fn command(&self, command_line: &str) -> Command {
        let mut cmd = if cfg!(target_os = "windows") {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command_line]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command_line]);
            cmd
        };
        if let Some(cwd) = &self.cwd {
            cmd.current_dir(cwd);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd
    }
}

impl CommandRunner for ShellRunner {
    fn run(&self, command_line: &str) -> Result<CommandOutput> {
        tracing::debug!("running: {command_line}");

        let child = self.command(command_line).spawn().map_err(|e| Error::Io {
            path: PathBuf::from(command_line),
            source: e,
        })?;

        match run_with_timeout(child, self.timeout) {
            Ok((status, stdout, stderr)) => {
                let mut output = String::from_utf8_lossy(&stdout).into_owned();
                output.push_str(&String::from_utf8_lossy(&stderr));
                Ok(CommandOutput {
                    code: status.code().unwrap_or(SIGNALED_EXIT_CODE),
                    output,
                })
            }
            Err(e) if e.kind() == io::ErrorKind::TimedOut => Err(Error::Timeout {
                command: command_line.to_string(),
                timeout: self.timeout.unwrap_or_default(),
            }),
            Err(e) => Err(Error::Io {
                path: PathBuf::from(command_line),
                source: e,
            }),
        }
    }
}

type CapturedOutput = (ExitStatus, Vec<u8>, Vec<u8>);

/// Run a child process with an optional timeout.
///
/// If timeout is None, waits indefinitely.
/// If timeout expires, kills the process and returns a TimedOut error.
pub fn run_with_timeout(mut child: Child, timeout: Option<Duration>) -> io::Result<CapturedOutput> {
    // Pipes are drained on their own threads so a chatty child can't fill
    // the pipe buffer and stall while we poll for exit.
    let stdout = drain(child.stdout.take());
    let stderr = drain(child.stderr.take());

    let status = match timeout {
        Some(t) => {
            let start = Instant::now();
            let poll_interval = Duration::from_millis(50);

            loop {
                if let Some(status) = child.try_wait()? {
                    break status;
                }
                if start.elapsed() > t {
                    child.kill().ok();
                    child.wait().ok();
                    return Err(io::Error::new(
                        io::ErrorKind::TimedOut,
                        format!("command timed out after {t:?}"),
                    ));
                }
                thread::sleep(poll_interval);
            }
        }
        None => child.wait()?,
    };

    Ok((status, join(stdout), join(stderr)))
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<Vec<u8>>> {
    pipe.map(|mut p| {
        thread::spawn(move || {
            let mut buf = Vec::new();
            p.read_to_end(&mut buf).ok();
            buf
        })
    })
}

fn join(handle: Option<JoinHandle<Vec<u8>>>) -> Vec<u8> {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}

#[cfg(test)]
#[path = "process_tests.rs"]
mod tests;
