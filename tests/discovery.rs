use fwlaunch::{Workspace, discover_devices, discover_targets};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn touch(path: impl AsRef<Path>) {
    let path = path.as_ref();
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn sorted_names(root: &Path) -> Vec<String> {
    let mut names: Vec<_> = discover_devices(root)
        .unwrap()
        .into_iter()
        .map(|device| device.name().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn finds_top_level_device_directories() {
    let dir = TempDir::new().unwrap();
    for name in ["STM32F4x", "STM32L0x", "docs", "build"] {
        fs::create_dir(dir.path().join(name)).unwrap();
    }
    assert_eq!(sorted_names(dir.path()), ["STM32F4x", "STM32L0x"]);
}

#[test]
fn ignores_nested_and_plain_file_matches() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("STM32F4x")).unwrap();
    fs::create_dir_all(dir.path().join("vendor/STM32H7x")).unwrap();
    fs::create_dir_all(dir.path().join("STM32F4x/STM32F1x")).unwrap();
    touch(dir.path().join("STM32G4x"));
    assert_eq!(sorted_names(dir.path()), ["STM32F4x"]);
}

#[test]
fn no_devices_is_empty() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("docs")).unwrap();
    assert!(discover_devices(dir.path()).unwrap().is_empty());
}

#[test]
fn missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let error = discover_devices(dir.path().join("nope")).unwrap_err();
    assert!(error.is_io_error());
}

#[test]
fn finds_elf_files_in_standalone_builds() {
    let dir = TempDir::new().unwrap();
    let standalone = dir.path().join("build/STM32F4x/standalone");
    touch(standalone.join("app.elf"));
    touch(standalone.join("readme.txt"));

    let targets = discover_targets(dir.path().join("build")).unwrap();
    assert_eq!(targets.len(), 1);
    assert_eq!(targets[0].path(), standalone.join("app.elf"));
    assert_eq!(targets[0].device().name(), "STM32F4x");
}

#[test]
fn skips_other_build_layouts() {
    let dir = TempDir::new().unwrap();
    let build = dir.path().join("build");
    touch(build.join("STM32F4x/debug/app.elf"));
    touch(build.join("STM32F4x/standalone/nested/app.elf"));
    touch(build.join("common/standalone/app.elf"));
    touch(build.join("STM32L0x/standalone/app.elf.map"));
    touch(build.join("app.elf"));
    fs::create_dir_all(build.join("STM32L0x/standalone/dir.elf")).unwrap();

    assert!(discover_targets(&build).unwrap().is_empty());
}

#[test]
fn flattens_targets_across_devices() {
    let dir = TempDir::new().unwrap();
    let build = dir.path().join("build");
    let expected: Vec<PathBuf> = [
        "STM32F4x/standalone/app.elf",
        "STM32F4x/standalone/boot.elf",
        "STM32L0x/standalone/app.elf",
    ]
    .iter()
    .map(|path| build.join(path))
    .collect();
    for path in &expected {
        touch(path);
    }

    let mut found: Vec<PathBuf> = discover_targets(&build)
        .unwrap()
        .into_iter()
        .map(|target| target.into_path())
        .collect();

    // Each device's images stay together.
    let devices: Vec<_> = found
        .iter()
        .map(|path| path.strip_prefix(&build).unwrap().components().next().unwrap())
        .collect();
    let mut runs = devices;
    runs.dedup();
    assert_eq!(runs.len(), 2);

    found.sort();
    assert_eq!(found, expected);
}

#[test]
fn missing_build_dir_has_no_targets() {
    let dir = TempDir::new().unwrap();
    assert!(discover_targets(dir.path().join("build")).unwrap().is_empty());
}

#[test]
fn workspace_paths_start_at_root() {
    let dir = TempDir::new().unwrap();
    touch(dir.path().join("STM32F4x/Makefile"));
    touch(dir.path().join("out/STM32F4x/standalone/app.elf"));

    let workspace = Workspace::new(dir.path()).with_build_dir("out");
    assert_eq!(workspace.devices().unwrap().len(), 1);
    let targets = workspace.targets().unwrap();
    assert_eq!(
        targets[0].path(),
        dir.path().join("out/STM32F4x/standalone/app.elf")
    );
    assert!(Workspace::new(dir.path()).targets().unwrap().is_empty());
}
