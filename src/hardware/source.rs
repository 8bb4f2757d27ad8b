use std::io::Read;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::config::{Config, LabelMatch, ToolPaths};
use crate::hardware::error::SourceError;

const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Captured output of a tool that exited successfully.
#[derive(Debug, Default, Clone)]
pub struct CommandOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    /// stdout followed by stderr, decoded lossily.
    pub fn combined(&self) -> String {
        let mut text = String::from_utf8_lossy(&self.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&self.stderr));
        text
    }
}

/// Runs an external inspection tool and hands back its raw output.
pub trait CommandRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, SourceError>;
}

pub fn command_line(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(arg);
    }
    line
}

/// Spawns real processes, killing any that outlive `timeout`.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl SystemRunner {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, program: &str, args: &[&str]) -> Result<CommandOutput, SourceError> {
        let command = command_line(program, args);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| SourceError::Spawn {
                command: command.clone(),
                source,
            })?;

        // Both pipes are drained while we wait so a chatty tool cannot block
        // on a full pipe buffer.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let start = Instant::now();
        let status = loop {
            match child.try_wait() {
                Ok(Some(status)) => break status,
                Ok(None) => {
                    if start.elapsed() >= self.timeout {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(SourceError::TimedOut {
                            command,
                            timeout: self.timeout,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => return Err(SourceError::Spawn { command, source }),
            }
        };

        let output = CommandOutput {
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        };

        if !status.success() {
            return Err(SourceError::ExitStatus {
                command,
                status: status.to_string(),
                output: output.combined(),
            });
        }

        Ok(output)
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

/// Everything a collector needs to reach the host: a way to run tools,
/// where those tools live, and where sysfs is mounted.
pub struct Sources<R> {
    pub runner: R,
    pub tools: ToolPaths,
    pub sysfs_net_root: PathBuf,
    pub label_match: LabelMatch,
}

impl Sources<SystemRunner> {
    pub fn from_config(config: &Config) -> Self {
        Self {
            runner: SystemRunner::new(Duration::from_secs(config.command_timeout_secs)),
            tools: config.tools.clone(),
            sysfs_net_root: config.sysfs_net_root.clone(),
            label_match: config.label_match,
        }
    }
}
