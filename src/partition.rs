use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::process::Command;

use crate::fs::cmd::RunChecked as _;
use crate::types::PartitionScheme;

/// Path of partition `pnum` of `drive_path`, following the kernel naming
/// convention: device names ending in a digit get a `p` separator
/// (`nvme0n1` -> `nvme0n1p1`, `loop0` -> `loop0p1`), others get the number
/// appended directly (`sda` -> `sda1`).
pub fn partition_path(drive_path: &Path, pnum: u32) -> PathBuf {
    let name = drive_path
        .file_name()
        .and_then(|name| name.to_str())
        .expect("drive path must end in a utf-8 device name");
    let separator = if name.ends_with(|c: char| c.is_ascii_digit()) {
        "p"
    } else {
        ""
    };
    drive_path.with_file_name(format!("{name}{separator}{pnum}"))
}

/// Stdin script for gdisk: wipe the partition table and create a 512 MiB EFI
/// System partition followed by a Linux LUKS partition spanning the rest of
/// the drive.
const GDISK_SCRIPT: &[&str] = &[
    "o",     // delete all partitions and create a new protective MBR
    "Y",     // confirm
    "n",     // new partition
    "",      // default partition number 1
    "",      // default start position
    "+512M", // offset to end position
    "ef00",  // EFI System code
    "n",     // new partition
    "",      // default partition number 2
    "",      // default start position
    "",      // default end position (rest of the drive)
    "8309",  // Linux LUKS
    "w",     // write partition table and exit
    "Y",     // confirm
    "",      // final trailing enter
];

/// Destroy the partition table of `drive` and write a fresh GPT with the
/// fixed boot/root layout. Destructive and unconfirmed; callers prompt first.
pub async fn partition_drive(drive: &Path) -> Result<PartitionScheme> {
    Command::new("gdisk")
        .arg(drive)
        .run_with_input(Some(GDISK_SCRIPT.join("\n").as_bytes()))
        .await
        .with_context(|| format!("Failed to partition {drive:?}"))?;

    let table = Command::new("gdisk")
        .arg("-l")
        .arg(drive)
        .run()
        .await
        .with_context(|| format!("Failed to read back the partition table of {drive:?}"))?;
    tracing::info!("{}", String::from_utf8_lossy(&table));

    Ok(PartitionScheme {
        boot: partition_path(drive, 1),
        root: partition_path(drive, 2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/dev/sda", 1, "/dev/sda1")]
    #[case("/dev/sda", 2, "/dev/sda2")]
    #[case("/dev/vdb", 3, "/dev/vdb3")]
    #[case("/dev/loop0", 2, "/dev/loop0p2")]
    #[case("/dev/nvme0n1", 1, "/dev/nvme0n1p1")]
    #[case("/dev/nvme0n1", 2, "/dev/nvme0n1p2")]
    #[case("/dev/mmcblk0", 1, "/dev/mmcblk0p1")]
    fn partition_names(#[case] drive: &str, #[case] pnum: u32, #[case] expected: &str) {
        assert_eq!(
            partition_path(Path::new(drive), pnum),
            PathBuf::from(expected)
        );
    }
}
