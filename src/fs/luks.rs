use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;

use crate::types::Passphrase;

use super::cmd::RunChecked as _;

/// Initialize a LUKS header on `dev`. The passphrase goes to cryptsetup over
/// stdin so it never shows up in a process listing.
pub async fn format(dev: &Path, passphrase: &Passphrase) -> Result<()> {
    Command::new("cryptsetup")
        .arg("luksFormat")
        .arg(dev)
        .run_with_input(Some(passphrase.as_bytes()))
        .await
        .with_context(|| format!("Failed to format {dev:?} as a LUKS volume"))?;
    Ok(())
}

/// Print the LUKS header of `dev` so the operator can eyeball the result.
pub async fn dump(dev: &Path) -> Result<()> {
    let out = Command::new("cryptsetup")
        .arg("luksDump")
        .arg(dev)
        .run()
        .await
        .with_context(|| format!("Failed to dump the LUKS header of {dev:?}"))?;
    tracing::info!("{}", String::from_utf8_lossy(&out));
    Ok(())
}

/// Unlock `dev` under `/dev/mapper/<mapper_name>`.
pub async fn open(dev: &Path, mapper_name: &str, passphrase: &Passphrase) -> Result<()> {
    Command::new("cryptsetup")
        .arg("luksOpen")
        .arg(dev)
        .arg(mapper_name)
        .run_with_input(Some(passphrase.as_bytes()))
        .await
        .with_context(|| format!("Failed to open LUKS volume {dev:?} as {mapper_name}"))?;
    Ok(())
}
