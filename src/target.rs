use crate::Result;
use crate::device::Device;
use log::{debug, trace};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Build output subdirectory holding debuggable images of a device.
pub const STANDALONE_DIR: &str = "standalone";

/// File extension of compiled firmware images.
pub const FIRMWARE_EXTENSION: &str = "elf";

/// A compiled firmware image eligible for debugging.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Target {
    device: Device,
    path: PathBuf,
}

impl Target {
    /// Gets the device the image was built for.
    pub fn device(&self) -> &Device {
        &self.device
    }

    /// Gets the path of the image.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.path.display())
    }
}

fn is_firmware(path: &Path) -> bool {
    path.extension()
        .is_some_and(|extension| extension == FIRMWARE_EXTENSION)
}

/// Lists firmware images under `<build_dir>/<device>/standalone/`.
///
/// Results are flattened in directory-visit order, then file-visit order.
/// A missing build directory is not an error: nothing has been built yet.
pub fn discover_targets(build_dir: impl AsRef<Path>) -> Result<Vec<Target>> {
    let build_dir = build_dir.as_ref();
    let entries = match std::fs::read_dir(build_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} does not exist", build_dir.display());
            return Ok(Vec::new());
        }
        Err(e) => return Err(e.into()),
    };

    let mut targets = Vec::new();
    for entry in entries {
        let entry = entry?;
        let Some(device) = entry.file_name().to_str().and_then(Device::new) else {
            continue;
        };
        let standalone = entry.path().join(STANDALONE_DIR);
        if !standalone.is_dir() {
            trace!("{} has no standalone build", device);
            continue;
        }
        for image in std::fs::read_dir(&standalone)? {
            let path = image?.path();
            if path.is_file() && is_firmware(&path) {
                targets.push(Target {
                    device: device.clone(),
                    path,
                });
            }
        }
    }
    debug!("found {} target(s) in {}", targets.len(), build_dir.display());
    Ok(targets)
}
