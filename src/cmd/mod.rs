pub mod prepare_drive;
pub mod randomize_drive;

use std::path::Path;

use anyhow::{bail, Result};
use async_trait::async_trait;
use dialoguer::{console::Term, Confirm};

use prepare_drive::PrepareDriveCommand;
use randomize_drive::RandomizeDriveCommand;

#[async_trait]
pub trait Command {
    async fn run(&self) -> Result<()>;
}

pub trait IntoCommand {
    fn into_command(self) -> Box<dyn Command>;
}

impl IntoCommand for crate::cli::Command {
    fn into_command(self) -> Box<dyn Command> {
        match self {
            crate::cli::Command::PrepareDrive(options) => Box::new(PrepareDriveCommand { options }),
            crate::cli::Command::RandomizeDrive(options) => {
                Box::new(RandomizeDriveCommand { options })
            }
        }
    }
}

/// Last stop before destroying data on `dev`. Skipped with `--yes`; refuses
/// to guess in non-interactive sessions.
pub(crate) fn confirm_destruction(dev: &Path, yes: bool) -> Result<()> {
    if yes {
        return Ok(());
    }

    if !Term::stderr().is_term() {
        bail!("Standard error is not a terminal. Please use '--yes' to confirm the operation in non-interactive mode.");
    }

    if !Confirm::new()
        .with_prompt(format!(
            "All of the data on {dev:?} will be lost. Do you want to continue?"
        ))
        .default(false)
        .interact()?
    {
        bail!("Operation canceled");
    }

    Ok(())
}
