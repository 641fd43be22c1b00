use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::cli::RandomizeDriveOptions;
use crate::wipe;

pub struct RandomizeDriveCommand {
    pub options: RandomizeDriveOptions,
}

#[async_trait]
impl crate::cmd::Command for RandomizeDriveCommand {
    async fn run(&self) -> Result<()> {
        tokio::fs::metadata(&self.options.drive)
            .await
            .with_context(|| format!("{:?} does not exist", self.options.drive))?;

        crate::cmd::confirm_destruction(&self.options.drive, self.options.yes)?;

        wipe::randomize_drive(&self.options.drive).await
    }
}
