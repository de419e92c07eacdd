mod build;
mod debugger;
mod device;
mod runner;
mod selection;
mod target;
mod workspace;

pub use build::Builder;
pub use debugger::{DEFAULT_REMOTE, Debugger, DebuggerTable};
pub use device::{Device, discover_devices, is_device_name};
pub use runner::{DryRunner, Invocation, Runner, SystemRunner};
pub use selection::{choose, parse_index, select};
pub use target::{FIRMWARE_EXTENSION, STANDALONE_DIR, Target, discover_targets};
pub use workspace::Workspace;

/// Error
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io error")]
    Io(#[from] std::io::Error),

    #[error("cannot run `{program}`")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` failed ({})", describe_code(.code))]
    CommandFailed { command: String, code: Option<i32> },

    #[error("no debugger known for platform {0:?}")]
    UnsupportedPlatform(String),

    #[error("invalid selection {0:?}: expected a non-negative integer")]
    InvalidInput(String),

    #[error("selection {index} is out of range (0..{len})")]
    OutOfRange { index: usize, len: usize },

    #[error("no firmware targets found; build a device first")]
    NoTargets,
}

fn describe_code(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exit status {}", code),
        None => "terminated by signal".to_string(),
    }
}

impl Error {
    pub fn is_io_error(&self) -> bool {
        matches!(self, Self::Io(..))
    }

    pub fn is_spawn_error(&self) -> bool {
        matches!(self, Self::Spawn { .. })
    }

    pub fn is_command_failed(&self) -> bool {
        matches!(self, Self::CommandFailed { .. })
    }

    /// Exit code of the failed external command, if it exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::CommandFailed { code, .. } => *code,
            _ => None,
        }
    }

    pub fn is_unsupported_platform(&self) -> bool {
        matches!(self, Self::UnsupportedPlatform(..))
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(..))
    }

    pub fn is_out_of_range(&self) -> bool {
        matches!(self, Self::OutOfRange { .. })
    }

    pub fn is_no_targets(&self) -> bool {
        matches!(self, Self::NoTargets)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
