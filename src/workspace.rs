use crate::build::Builder;
use crate::device::{Device, discover_devices};
use crate::target::{Target, discover_targets};
use crate::Result;
use std::path::{Path, PathBuf};

/// A firmware project: device directories at the root, outputs in `build/`.
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
    build_dir: PathBuf,
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Workspace {
    /// Creates a [`Workspace`] rooted at `root` with the default `build` directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let build_dir = root.join("build");
        Self { root, build_dir }
    }

    /// Sets the build output directory; relative paths are taken from the root.
    pub fn with_build_dir(mut self, build_dir: impl AsRef<Path>) -> Self {
        self.build_dir = self.root.join(build_dir);
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn devices(&self) -> Result<Vec<Device>> {
        discover_devices(&self.root)
    }

    pub fn targets(&self) -> Result<Vec<Target>> {
        discover_targets(&self.build_dir)
    }

    /// A [`Builder`] running in this workspace's root.
    pub fn builder(&self) -> Builder {
        Builder::new().with_root(&self.root)
    }
}
