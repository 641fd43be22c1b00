use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;

use super::cmd::RunChecked as _;

pub async fn pvcreate(dev: &Path) -> Result<()> {
    Command::new("pvcreate")
        .arg("-y")
        .arg(dev)
        .run()
        .await
        .with_context(|| format!("Failed to create physical volume on {dev:?}"))?;
    Ok(())
}

pub async fn vgcreate(group: &str, dev: &Path) -> Result<()> {
    Command::new("vgcreate")
        .arg(group)
        .arg(dev)
        .run()
        .await
        .with_context(|| format!("Failed to create volume group {group} on {dev:?}"))?;
    Ok(())
}

/// Create a logical volume of a fixed size, e.g. `8G`.
pub async fn lvcreate_sized(group: &str, name: &str, size: &str) -> Result<()> {
    Command::new("lvcreate")
        .args(["-L", size, "-n", name, group])
        .run()
        .await
        .with_context(|| format!("Failed to create logical volume {name} ({size}) in {group}"))?;
    Ok(())
}

/// Create a logical volume spanning all remaining free space in the group.
pub async fn lvcreate_remaining(group: &str, name: &str) -> Result<()> {
    Command::new("lvcreate")
        .args(["-l", "100%FREE", "-n", name, group])
        .run()
        .await
        .with_context(|| format!("Failed to create logical volume {name} in {group}"))?;
    Ok(())
}
