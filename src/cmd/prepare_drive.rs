use std::path::Path;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use dialoguer::Password;
use zeroize::Zeroize as _;

use crate::cli::PrepareDriveOptions;
use crate::fs::{luks, lvm, mkfs, mount};
use crate::mem;
use crate::partition;
use crate::types::{DriveTarget, PartitionScheme, Passphrase, VolumeNames};
use crate::wipe;

pub struct PrepareDriveCommand {
    pub options: PrepareDriveOptions,
}

#[async_trait]
impl crate::cmd::Command for PrepareDriveCommand {
    async fn run(&self) -> Result<()> {
        // All validation and prompting happens up front; nothing below may
        // touch the drive until the target is confirmed.
        let target = DriveTarget::from_options(
            self.options.drive.clone(),
            self.options.boot.clone(),
            self.options.root.clone(),
        )?;

        match &target {
            DriveTarget::WholeDrive(drive) => ensure_exists(drive).await?,
            DriveTarget::Partitions(partitions) => {
                ensure_exists(&partitions.boot).await?;
                ensure_exists(&partitions.root).await?;
            }
        }
        ensure_mount_dir(&self.options.mount).await?;

        let dev = match &target {
            DriveTarget::WholeDrive(drive) => drive,
            DriveTarget::Partitions(partitions) => &partitions.root,
        };
        crate::cmd::confirm_destruction(dev, self.options.yes)?;

        let passphrase = match &self.options.password {
            Some(password) => password.clone(),
            None => prompt_passphrase()?,
        };

        let partitions = match target {
            DriveTarget::WholeDrive(drive) => {
                tracing::info!("Partitioning {drive:?}");
                partition::partition_drive(&drive).await?
            }
            DriveTarget::Partitions(partitions) => partitions,
        };

        configure_drive(
            &partitions,
            self.options.randomize,
            self.options.swap_size.clone(),
            &self.options.mount,
            &passphrase,
        )
        .await
    }
}

/// Encrypt the root partition, build the LVM layer inside it, format
/// everything, and mount the result under `mount_point`. Strictly sequential
/// and fail-fast: a failing step aborts the rest, and nothing already done is
/// rolled back (re-running after a partial failure needs operator judgment,
/// not an automatic retry).
pub async fn configure_drive(
    partitions: &PartitionScheme,
    randomize: bool,
    swap_size: Option<String>,
    mount_point: &Path,
    passphrase: &Passphrase,
) -> Result<()> {
    let names = VolumeNames::generate();

    let swap_size = match swap_size {
        Some(size) => size,
        None => mem::default_swap_size(mem::total_memory_kib().await?),
    };
    tracing::info!("Using swap size {swap_size}");

    if randomize {
        wipe::randomize_drive(&partitions.root).await?;
    }

    tracing::info!("Encrypting {:?}", partitions.root);
    luks::format(&partitions.root, passphrase).await?;
    luks::dump(&partitions.root).await?;
    luks::open(&partitions.root, &names.luks_mapper, passphrase).await?;

    tracing::info!("Creating volume group {}", names.volume_group);
    lvm::pvcreate(&names.mapper_path()).await?;
    lvm::vgcreate(&names.volume_group, &names.mapper_path()).await?;
    lvm::lvcreate_sized(&names.volume_group, &names.swap_volume, &swap_size).await?;
    lvm::lvcreate_remaining(&names.volume_group, &names.root_volume).await?;

    tracing::info!("Creating filesystems");
    mkfs::mkfs_fat(&partitions.boot).await?;
    mkfs::mkfs_ext4(&names.root_volume_path(), "root").await?;
    mkfs::mkswap(&names.swap_volume_path(), "swap").await?;

    tracing::info!("Mounting under {mount_point:?}");
    mount::mkdir_p(mount_point).await?;
    mount::mount(&names.root_volume_path(), mount_point).await?;
    let boot_mount = mount_point.join("boot");
    mount::mkdir_p(&boot_mount).await?;
    mount::mount(&partitions.boot, &boot_mount).await?;
    mount::swapon(&names.swap_volume_path()).await?;

    Ok(())
}

fn prompt_passphrase() -> Result<Passphrase> {
    let mut password = Password::new().with_prompt("Password").interact()?;
    let mut confirm = Password::new().with_prompt("Confirm").interact()?;
    let matches = password == confirm;
    confirm.zeroize();
    if !matches {
        password.zeroize();
        bail!("Passwords do not match");
    }
    Ok(Passphrase::from(password))
}

async fn ensure_exists(dev: &Path) -> Result<()> {
    tokio::fs::metadata(dev)
        .await
        .with_context(|| format!("{dev:?} does not exist"))?;
    Ok(())
}

async fn ensure_mount_dir(dir: &Path) -> Result<()> {
    let meta = tokio::fs::metadata(dir)
        .await
        .with_context(|| format!("Mount directory {dir:?} does not exist"))?;
    if !meta.is_dir() {
        bail!("Mount target {dir:?} is not a directory");
    }
    Ok(())
}
