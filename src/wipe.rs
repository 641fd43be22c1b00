use std::path::Path;

use anyhow::{Context, Result};
use tokio::process::Command;

use crate::fs::cmd::RunChecked as _;

/// Overwrite the whole of `drive` with one pass of random data. Before
/// encryption this destroys any recoverable plaintext remnants and makes
/// unused space indistinguishable from encrypted data.
pub async fn randomize_drive(drive: &Path) -> Result<()> {
    tracing::info!("Wiping {drive:?}");
    Command::new("shred")
        .args(["--verbose", "-n", "1"])
        .arg(drive)
        .run()
        .await
        .with_context(|| format!("Failed to wipe {drive:?}"))?;
    Ok(())
}
