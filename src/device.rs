use crate::Result;
use log::{debug, trace};
use regex::Regex;
use std::path::Path;
use std::sync::LazyLock;

static DEVICE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    // Valid pattern, checked by `device_pattern_compiles`.
    Regex::new(r"^STM32[A-Z0-9]*x$").unwrap()
});

/// Checks whether `name` follows the `STM32...x` device naming convention.
///
/// The match is case-sensitive and covers the whole name.
pub fn is_device_name(name: &str) -> bool {
    DEVICE_NAME.is_match(name)
}

/// A supported microcontroller family, named after its project directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Device(String);

impl Device {
    /// Creates a [`Device`] if `name` is a valid device name.
    pub fn new(name: impl Into<String>) -> Option<Self> {
        let name = name.into();
        is_device_name(&name).then_some(Self(name))
    }

    /// Gets the device name.
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Device {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Lists the device directories directly under `root`.
///
/// Only immediate children are considered, so a matching directory nested
/// deeper in the tree is never reported. Order follows directory enumeration.
pub fn discover_devices(root: impl AsRef<Path>) -> Result<Vec<Device>> {
    let root = root.as_ref();
    let mut devices = Vec::new();
    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        if !entry.path().is_dir() {
            continue;
        }
        let Some(device) = entry.file_name().to_str().and_then(Device::new) else {
            trace!("skipping {:?}", entry.path());
            continue;
        };
        devices.push(device);
    }
    debug!("found {} device(s) in {}", devices.len(), root.display());
    Ok(devices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn device_pattern_compiles() {
        LazyLock::force(&DEVICE_NAME);
    }

    #[test]
    fn accepts_device_names() {
        for name in ["STM32F4x", "STM32L0x", "STM32G473CBTx", "STM32x"] {
            assert!(is_device_name(name), "{name} should match");
        }
    }

    #[test]
    fn rejects_other_names() {
        for name in [
            "docs",
            "stm32f4x",
            "STM32F4X",
            "STM32f4x",
            "STM32F4x-old",
            "xSTM32F4x",
            "STM32F4",
            "",
        ] {
            assert!(!is_device_name(name), "{name} should not match");
        }
    }

    #[test]
    fn device_new_validates() {
        assert_eq!(Device::new("STM32F4x").unwrap().name(), "STM32F4x");
        assert!(Device::new("build").is_none());
    }
}
