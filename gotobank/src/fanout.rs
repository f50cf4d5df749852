//! Fan-out launcher
//!
//! Starts many independent load generator processes. Each child is its own OS process, so a crash
//! in one never touches the others. Only the first child may write to the terminal.
use crate::error::Error;
use gotobank_core::{LoadConfig, DEFAULT_PROCESS_COUNT};
use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;
use tokio::task::JoinHandle;
#[allow(unused_imports)]
use tracing::{debug, error, info, instrument, warn, Instrument};

/// Subcommand a child is started with when re-executing this binary.
pub const LOAD_SUBCOMMAND: &str = "load";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FanoutConfig {
    pub processes: usize,
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl FanoutConfig {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            processes: DEFAULT_PROCESS_COUNT,
            program: program.into(),
            args: vec![],
        }
    }

    /// Re-execute the running binary as a load generator with a copy of `load`.
    pub fn for_load(load: &LoadConfig) -> Result<Self, Error> {
        let program = std::env::current_exe()?;
        let mut args = vec![LOAD_SUBCOMMAND.to_string()];
        args.extend(load.to_args());
        Ok(Self::new(program).args(args))
    }

    pub fn processes(mut self, processes: usize) -> Self {
        self.processes = processes;
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }
}

/// Where a child's standard output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOutput {
    Inherit,
    Discard,
}

impl From<ChildOutput> for Stdio {
    fn from(output: ChildOutput) -> Stdio {
        match output {
            ChildOutput::Inherit => Stdio::inherit(),
            ChildOutput::Discard => Stdio::null(),
        }
    }
}

/// Only the first child shares the launcher's stdout.
pub fn stdout_for(index: usize) -> ChildOutput {
    if index == 0 {
        ChildOutput::Inherit
    } else {
        ChildOutput::Discard
    }
}

#[derive(Debug)]
pub struct ChildOutcome {
    pub index: usize,
    pub status: Result<ExitStatus, Error>,
}

/// Handles for every child started by [`launch`].
pub struct Launch {
    handles: Vec<JoinHandle<ChildOutcome>>,
}

impl Launch {
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Wait for every child to exit, in start order.
    pub async fn wait(self) -> Result<Vec<ChildOutcome>, Error> {
        let mut outcomes = Vec::with_capacity(self.handles.len());
        for handle in self.handles {
            outcomes.push(handle.await?);
        }
        Ok(outcomes)
    }
}

/// Start `config.processes` children back-to-back, one task per child.
///
/// Each task spawns its child and then waits on it. A failed spawn is logged and reported for
/// that index only; the remaining children are still started. Must be called within a tokio
/// runtime.
#[instrument(name = "fanout", skip_all, fields(processes = config.processes))]
pub fn launch(config: &FanoutConfig) -> Launch {
    info!("Starting {} copies of {:?}", config.processes, config.program);

    let handles = (0..config.processes)
        .map(|index| {
            let mut command = Command::new(&config.program);
            command.args(&config.args).stdout(stdout_for(index));

            tokio::spawn(
                async move {
                    let status = run_child(index, command).await;
                    if let Err(err) = &status {
                        error!("{err}");
                    }
                    ChildOutcome { index, status }
                }
                .in_current_span(),
            )
        })
        .collect();

    Launch { handles }
}

async fn run_child(index: usize, mut command: Command) -> Result<ExitStatus, Error> {
    let mut child = command
        .spawn()
        .map_err(|source| Error::Spawn { index, source })?;
    debug!("Child #{index} running as pid {:?}", child.id());

    let status = child.wait().await?;
    if !status.success() {
        warn!("Child #{index} exited with {status}");
    }
    Ok(status)
}
