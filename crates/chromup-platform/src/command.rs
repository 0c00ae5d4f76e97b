use std::ffi::OsStr;
use std::path::PathBuf;
use std::process::{Command as StdCommand, Stdio};

use crate::error::{Error, Result};

/// Builder for launching an external executable.
#[derive(Debug)]
pub struct Command {
    inner: StdCommand,
    program: String,
}

impl Command {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        let program: PathBuf = program.into();
        Self {
            inner: StdCommand::new(&program),
            program: program.display().to_string(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.inner.arg(arg);
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.inner.args(args);
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.inner.current_dir(dir.into());
        self
    }

    /// Start the process without waiting for it. Stdio is detached so the
    /// child outlives the launcher cleanly. Returns the child's PID.
    pub fn spawn_detached(mut self) -> Result<u32> {
        self.inner.stdin(Stdio::null());
        self.inner.stdout(Stdio::null());
        self.inner.stderr(Stdio::null());

        let child = self.inner.spawn().map_err(|e| Error::CommandFailed {
            cmd: self.program.clone(),
            source: e,
        })?;
        Ok(child.id())
    }
}
