use crate::Result;
use crate::device::Device;
use crate::runner::{Invocation, Runner};
use log::info;
use std::path::PathBuf;

/// Drives the external build tool.
#[derive(Debug, Clone)]
pub struct Builder {
    program: String,
    root: PathBuf,
}

impl Default for Builder {
    fn default() -> Self {
        Self {
            program: "make".to_string(),
            root: PathBuf::from("."),
        }
    }
}

impl Builder {
    /// Creates a [`Builder`] running `make` in the current directory.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the directory the build tool runs in.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Sets the build tool executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    fn invocation(&self) -> Invocation {
        Invocation::new(&self.program).current_dir(&self.root)
    }

    /// Builds one device, `make DEV=<device>`.
    pub fn build(&self, runner: &mut impl Runner, device: &Device) -> Result<()> {
        info!("building {}", device);
        runner.run(&self.invocation().arg(format!("DEV={}", device)))
    }

    /// Builds devices in order, stopping at the first failure.
    pub fn build_all<'a>(
        &self,
        runner: &mut impl Runner,
        devices: impl IntoIterator<Item = &'a Device>,
    ) -> Result<()> {
        for device in devices {
            self.build(runner, device)?;
        }
        Ok(())
    }

    /// Removes build outputs, `make clean`.
    pub fn clean(&self, runner: &mut impl Runner) -> Result<()> {
        info!("cleaning build outputs");
        runner.run(&self.invocation().arg("clean"))
    }
}
