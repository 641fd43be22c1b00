use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;

use super::cmd::RunChecked as _;

pub async fn mount(dev: &Path, mount_point: &Path) -> Result<()> {
    Command::new("mount")
        .arg(dev)
        .arg(mount_point)
        .run()
        .await
        .with_context(|| format!("Failed to mount {dev:?} on {mount_point:?}"))?;
    Ok(())
}

pub async fn swapon(dev: &Path) -> Result<()> {
    Command::new("swapon")
        .arg(dev)
        .run()
        .await
        .with_context(|| format!("Failed to activate swap on {dev:?}"))?;
    Ok(())
}

/// Create a directory if it does not exist yet. Succeeds if it already does.
pub async fn mkdir_p(dir: &Path) -> Result<()> {
    tokio::fs::create_dir_all(dir)
        .await
        .with_context(|| format!("Failed to create directory {dir:?}"))?;
    Ok(())
}
