use crate::runner::{Invocation, Runner};
use crate::{Error, Result};
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::Path;

/// Debug server address GDB attaches to.
pub const DEFAULT_REMOTE: &str = ":3333";

/// Maps a host platform name to the GDB executable to use there.
///
/// Keys are the values of [`std::env::consts::OS`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebuggerTable {
    entries: BTreeMap<String, String>,
}

impl Default for DebuggerTable {
    fn default() -> Self {
        Self::from_iter([
            ("linux", "gdb-multiarch"),
            ("macos", "arm-none-eabi-gdb"),
            ("windows", "arm-none-eabi-gdb.exe"),
        ])
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DebuggerTable {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(platform, exe)| (platform.into(), exe.into()))
                .collect(),
        }
    }
}

impl DebuggerTable {
    /// Creates the table of supported platforms.
    pub fn new() -> Self {
        Default::default()
    }

    /// Looks up the debugger executable for `platform`.
    pub fn lookup(&self, platform: &str) -> Result<&str> {
        self.entries
            .get(platform)
            .map(String::as_str)
            .ok_or_else(|| Error::UnsupportedPlatform(platform.to_string()))
    }

    pub fn platforms(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Launches GDB against a running debug server.
///
/// The server (OpenOCD, st-util, ...) must already be listening; nothing here
/// starts it or checks that it is reachable.
#[derive(Debug, Clone)]
pub struct Debugger {
    table: DebuggerTable,
    remote: String,
}

impl Default for Debugger {
    fn default() -> Self {
        Self::new(DebuggerTable::default())
    }
}

impl Debugger {
    pub fn new(table: DebuggerTable) -> Self {
        Self {
            table,
            remote: DEFAULT_REMOTE.to_string(),
        }
    }

    /// Sets the debug server address, e.g. `:3333` or `localhost:4242`.
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    pub fn table(&self) -> &DebuggerTable {
        &self.table
    }

    pub fn remote(&self) -> &str {
        &self.remote
    }

    /// Composes the GDB command line for `target` on `platform`.
    ///
    /// Connects, loads symbols, answers the confirmation prompt, flashes the
    /// image, breaks at `main` and continues.
    pub fn command(&self, platform: &str, target: &Path) -> Result<Invocation> {
        let exe = self.table.lookup(platform)?;
        debug!("using {} for platform {}", exe, platform);
        let script = [
            format!("target extended-remote {}", self.remote),
            format!("file {}", target.display()),
            "y".to_string(),
            "load".to_string(),
            "b main".to_string(),
            "c".to_string(),
        ];
        Ok(Invocation::new(exe).args(script.into_iter().flat_map(|cmd| ["-ex".to_string(), cmd])))
    }

    /// Runs GDB on `target` and waits for the session to end.
    pub fn launch(&self, runner: &mut impl Runner, platform: &str, target: &Path) -> Result<()> {
        let invocation = self.command(platform, target)?;
        info!("debugging {}", target.display());
        runner.run(&invocation)
    }
}
