use crate::{Error, Result};
use log::{info, warn};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};

/// One external command: a program, its arguments and where to run it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl Invocation {
    /// Creates an [`Invocation`] of `program` without arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory of the command.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    pub fn get_program(&self) -> &str {
        &self.program
    }

    pub fn get_args(&self) -> &[String] {
        &self.args
    }

    pub fn get_current_dir(&self) -> Option<&Path> {
        self.current_dir.as_deref()
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            if arg.is_empty() || arg.contains(char::is_whitespace) {
                write!(f, " '{}'", arg)?;
            } else {
                write!(f, " {}", arg)?;
            }
        }
        Ok(())
    }
}

/// Executes external commands on behalf of the build and debug steps.
///
/// Implementations block until the command is done and report a non-zero
/// exit as [`Error::CommandFailed`].
pub trait Runner {
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

impl<R: Runner + ?Sized> Runner for &mut R {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        (**self).run(invocation)
    }
}

/// Children currently running in the foreground.
static CHILDREN: AtomicUsize = AtomicUsize::new(0);
static INTERRUPT_GUARD: Once = Once::new();

/// Keeps Ctrl-C from killing us while a child owns the terminal.
///
/// The child (GDB halting the target, `make` aborting) gets the interrupt
/// as usual; with no child running it terminates like the default handler.
fn guard_interrupts() {
    INTERRUPT_GUARD.call_once(|| {
        let installed = ctrlc::set_handler(|| {
            if CHILDREN.load(Ordering::SeqCst) == 0 {
                std::process::exit(130);
            }
        });
        if let Err(e) = installed {
            warn!("cannot guard against interrupts: {}", e);
        }
    });
}

/// Spawns real processes sharing the terminal with this one.
#[derive(Default, Debug, Clone, Copy)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        Self
    }
}

impl Runner for SystemRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        info!("running {}", invocation);
        let mut command = Command::new(invocation.get_program());
        command.args(invocation.get_args());
        if let Some(dir) = invocation.get_current_dir() {
            command.current_dir(dir);
        }
        guard_interrupts();
        CHILDREN.fetch_add(1, Ordering::SeqCst);
        let status = command.status();
        CHILDREN.fetch_sub(1, Ordering::SeqCst);
        let status = status.map_err(|source| Error::Spawn {
            program: invocation.get_program().to_string(),
            source,
        })?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: invocation.to_string(),
                code: status.code(),
            })
        }
    }
}

/// Prints commands instead of executing them.
#[derive(Debug)]
pub struct DryRunner<W> {
    out: W,
}

impl<W: Write> DryRunner<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Runner for DryRunner<W> {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        match invocation.get_current_dir() {
            Some(dir) => writeln!(self.out, "(cd {} && {})", dir.display(), invocation)?,
            None => writeln!(self.out, "{}", invocation)?,
        }
        Ok(())
    }
}
