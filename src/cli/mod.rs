mod output;
mod prompt;

use anyhow::anyhow;
use clap::{Args, Parser, Subcommand, ValueEnum};
use fwlaunch::{
    DEFAULT_REMOTE, Debugger, DebuggerTable, Device, DryRunner, Error, Runner, SystemRunner,
    Workspace,
};
use log::debug;
use output::{DeviceRow, Menu, TargetRow};
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Parser)]
#[clap(about, author, version, arg_required_else_help = true)]
pub struct Cli {
    #[clap(subcommand)]
    command: Command,

    #[clap(flatten)]
    workspace: WorkspaceOptions,

    #[clap(flatten)]
    debugger: DebuggerOptions,

    /// Print external commands instead of running them
    #[clap(long, global = true)]
    dry_run: bool,

    /// Output format of listings
    #[clap(long, global = true, default_value = "text")]
    format: Format,
}

#[derive(Args)]
pub struct WorkspaceOptions {
    /// Project root holding the device directories
    #[clap(long, global = true, default_value = ".")]
    root: PathBuf,

    /// Build output directory, relative to the root
    #[clap(long, global = true, default_value = "build")]
    build_dir: PathBuf,
}

impl WorkspaceOptions {
    pub fn build_workspace(&self) -> Workspace {
        Workspace::new(&self.root).with_build_dir(&self.build_dir)
    }
}

#[derive(Args)]
pub struct DebuggerOptions {
    /// Debug server address
    #[clap(long, global = true, default_value = DEFAULT_REMOTE)]
    remote: String,

    /// Host platform used to pick the debugger executable
    ///
    /// One of "linux", "macos" or "windows".
    #[clap(long, global = true, default_value = std::env::consts::OS)]
    platform: String,
}

impl DebuggerOptions {
    pub fn build_debugger(&self) -> Debugger {
        Debugger::new(DebuggerTable::new()).with_remote(&self.remote)
    }
}

#[derive(ValueEnum, Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Format {
    /// Normal output
    #[default]
    Text,

    /// Table output
    Table,

    /// JSON output
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Pick a built target and debug it
    Launch,
    /// Build every device, then pick a target and debug it
    BuildLaunch,
    /// List device directories
    Devices,
    /// List built firmware targets
    Targets,
    /// Build devices (all discovered devices if none given)
    Build {
        /// Device names, e.g. STM32F4x
        devices: Vec<DeviceName>,
    },
    /// Remove build outputs
    Clean,
}

/// A device name given on the command line.
#[derive(Debug, Clone)]
pub struct DeviceName(Device);

impl FromStr for DeviceName {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Device::new(s)
            .map(Self)
            .ok_or_else(|| anyhow!("{:?} is not a device name (expected STM32...x)", s))
    }
}

impl Cli {
    fn devices(&self) -> anyhow::Result<()> {
        let devices = self.workspace.build_workspace().devices()?;
        let rows = devices.iter().map(DeviceRow::from).collect();
        output::print_rows(self.format, rows)
    }

    fn targets(&self) -> anyhow::Result<()> {
        let targets = self.workspace.build_workspace().targets()?;
        let rows = targets
            .iter()
            .enumerate()
            .map(|(index, target)| TargetRow::new(index, target))
            .collect();
        output::print_rows(self.format, rows)
    }

    fn build(&self, runner: &mut impl Runner, devices: &[DeviceName]) -> anyhow::Result<()> {
        let workspace = self.workspace.build_workspace();
        let devices = if devices.is_empty() {
            workspace.devices()?
        } else {
            devices.iter().map(|name| name.0.clone()).collect()
        };
        if devices.is_empty() {
            eprintln!("No devices found in {}", workspace.root().display());
        }
        workspace.builder().build_all(runner, &devices)?;
        Ok(())
    }

    fn clean(&self, runner: &mut impl Runner) -> anyhow::Result<()> {
        self.workspace.build_workspace().builder().clean(runner)?;
        Ok(())
    }

    fn launch(&self, runner: &mut impl Runner) -> anyhow::Result<()> {
        let debugger = self.debugger.build_debugger();
        let platform = &self.debugger.platform;
        // Fail before prompting when there is no debugger for this host.
        debugger.table().lookup(platform)?;

        let targets = self.workspace.build_workspace().targets()?;
        if targets.is_empty() {
            return Err(Error::NoTargets.into());
        }
        print!("{}", Menu(&targets));

        let line = prompt::read_selection()?;
        let target = fwlaunch::choose(&targets, &line)?;
        debug!("selected {}", target);
        debugger.launch(runner, platform, target.path())?;
        Ok(())
    }

    fn execute_with(&self, runner: &mut impl Runner) -> anyhow::Result<()> {
        match &self.command {
            Command::Launch => self.launch(runner),
            Command::BuildLaunch => {
                self.build(runner, &[])?;
                self.launch(runner)
            }
            Command::Devices => self.devices(),
            Command::Targets => self.targets(),
            Command::Build { devices } => self.build(runner, devices),
            Command::Clean => self.clean(runner),
        }
    }

    pub fn execute(&self) -> anyhow::Result<()> {
        if self.dry_run {
            self.execute_with(&mut DryRunner::new(std::io::stdout()))
        } else {
            self.execute_with(&mut SystemRunner::new())
        }
    }
}
