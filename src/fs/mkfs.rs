use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;

use super::cmd::RunChecked as _;

pub async fn mkfs_fat(dev: &Path) -> Result<()> {
    Command::new("mkfs.fat")
        .arg(dev)
        .run()
        .await
        .with_context(|| format!("Failed to create FAT filesystem on {dev:?}"))?;
    Ok(())
}

pub async fn mkfs_ext4(dev: &Path, label: &str) -> Result<()> {
    Command::new("mkfs.ext4")
        .args(["-L", label])
        .arg(dev)
        .run()
        .await
        .with_context(|| format!("Failed to create ext4 filesystem on {dev:?}"))?;
    Ok(())
}

pub async fn mkswap(dev: &Path, label: &str) -> Result<()> {
    Command::new("mkswap")
        .args(["-L", label])
        .arg(dev)
        .run()
        .await
        .with_context(|| format!("Failed to write swap signature to {dev:?}"))?;
    Ok(())
}
