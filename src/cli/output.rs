use super::Format;
use fwlaunch::{Device, Target};
use serde::Serialize;
use std::fmt::{Display, Formatter, Result};
use tabled::{Table, Tabled};

#[derive(Serialize, Tabled, Debug)]
pub struct DeviceRow {
    name: String,
}

impl From<&Device> for DeviceRow {
    fn from(device: &Device) -> Self {
        Self {
            name: device.name().to_string(),
        }
    }
}

impl Display for DeviceRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "{}", self.name)
    }
}

#[derive(Serialize, Tabled, Debug)]
pub struct TargetRow {
    index: usize,
    device: String,
    path: String,
}

impl TargetRow {
    pub fn new(index: usize, target: &Target) -> Self {
        Self {
            index,
            device: target.device().to_string(),
            path: target.to_string(),
        }
    }
}

impl Display for TargetRow {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "{}: {}", self.index, self.path)
    }
}

/// Numbered list of targets to choose from.
pub struct Menu<'a>(pub &'a [Target]);

impl Display for Menu<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Please choose your target")?;
        for (index, target) in self.0.iter().enumerate() {
            writeln!(f, "\t{}: {}", index, target)?;
        }
        Ok(())
    }
}

pub fn print_rows<T: Serialize + Tabled + Display>(
    format: Format,
    rows: Vec<T>,
) -> anyhow::Result<()> {
    match format {
        Format::Text => rows.iter().for_each(|row| print!("{}", row)),
        Format::Table => println!("{}", Table::new(rows)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&rows)?),
    }
    Ok(())
}
