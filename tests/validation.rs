// Rejected invocations must fail before any external tool is run. The
// scratch "device" is an ordinary file; if a rejected invocation had reached
// gdisk or cryptsetup, its contents would have changed.

use std::io::Write as _;
use std::path::PathBuf;

use anyhow::Result;
use driveprep::cli::PrepareDriveOptions;
use driveprep::cmd::{prepare_drive::PrepareDriveCommand, Command as _};
use driveprep::types::Passphrase;
use tempfile::TempDir;

const SENTINEL: &[u8] = b"driveprep validation sentinel";

struct Scratch {
    _dir: TempDir,
    device: PathBuf,
    mount: PathBuf,
}

fn scratch() -> Result<Scratch> {
    let dir = tempfile::tempdir()?;
    let device = dir.path().join("device");
    std::fs::File::create(&device)?.write_all(SENTINEL)?;
    let mount = dir.path().join("mnt");
    std::fs::create_dir(&mount)?;
    Ok(Scratch {
        device,
        mount,
        _dir: dir,
    })
}

fn options(scratch: &Scratch) -> PrepareDriveOptions {
    PrepareDriveOptions {
        drive: None,
        boot: None,
        root: None,
        randomize: false,
        no_randomize: true,
        swap_size: None,
        mount: scratch.mount.clone(),
        password: Some(Passphrase::from("hunter2".to_owned())),
        yes: true,
    }
}

async fn assert_rejected_without_side_effects(options: PrepareDriveOptions) -> Result<()> {
    let scratch_device = options.drive.clone().or(options.root.clone());

    let result = PrepareDriveCommand { options }.run().await;
    assert!(result.is_err());

    if let Some(device) = scratch_device {
        assert_eq!(std::fs::read(device)?, SENTINEL);
    }
    Ok(())
}

#[tokio::test]
async fn drive_with_boot_is_rejected() -> Result<()> {
    let scratch = scratch()?;
    let mut options = options(&scratch);
    options.drive = Some(scratch.device.clone());
    options.boot = Some(scratch.device.clone());
    assert_rejected_without_side_effects(options).await
}

#[tokio::test]
async fn drive_with_root_is_rejected() -> Result<()> {
    let scratch = scratch()?;
    let mut options = options(&scratch);
    options.drive = Some(scratch.device.clone());
    options.root = Some(scratch.device.clone());
    assert_rejected_without_side_effects(options).await
}

#[tokio::test]
async fn lone_root_is_rejected() -> Result<()> {
    let scratch = scratch()?;
    let mut options = options(&scratch);
    options.root = Some(scratch.device.clone());
    assert_rejected_without_side_effects(options).await
}

#[tokio::test]
async fn no_target_is_rejected() -> Result<()> {
    let scratch = scratch()?;
    assert_rejected_without_side_effects(options(&scratch)).await
}

#[tokio::test]
async fn missing_mount_dir_is_rejected() -> Result<()> {
    let scratch = scratch()?;
    let mut options = options(&scratch);
    options.drive = Some(scratch.device.clone());
    options.mount = scratch.mount.join("does-not-exist");
    assert_rejected_without_side_effects(options).await
}

#[tokio::test]
async fn missing_device_is_rejected() -> Result<()> {
    let scratch = scratch()?;
    let mut options = options(&scratch);
    options.drive = Some(scratch.mount.join("no-such-device"));
    let result = PrepareDriveCommand { options }.run().await;
    assert!(result.is_err());
    Ok(())
}
