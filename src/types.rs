use std::path::PathBuf;

use anyhow::{bail, Result};
use uuid::Uuid;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// An encryption passphrase. Only ever handed to external tools over stdin,
/// never on a command line, and wiped from memory on drop.
#[derive(Zeroize, ZeroizeOnDrop, Clone)]
pub struct Passphrase(Vec<u8>);

impl Passphrase {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }
}

impl From<String> for Passphrase {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl std::str::FromStr for Passphrase {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.as_bytes().to_vec()))
    }
}

impl std::fmt::Debug for Passphrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Passphrase(..)")
    }
}

/// The boot and root partitions to install onto, either supplied by the user
/// or freshly created by partitioning a whole drive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartitionScheme {
    pub boot: PathBuf,
    pub root: PathBuf,
}

/// What `prepare-drive` operates on. The two targeting modes are mutually
/// exclusive; all invalid flag combinations are rejected in `from_options`
/// before anything destructive happens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DriveTarget {
    WholeDrive(PathBuf),
    Partitions(PartitionScheme),
}

impl DriveTarget {
    pub fn from_options(
        drive: Option<PathBuf>,
        boot: Option<PathBuf>,
        root: Option<PathBuf>,
    ) -> Result<Self> {
        match (drive, boot, root) {
            (Some(_), Some(_), _) | (Some(_), _, Some(_)) => {
                bail!("--boot and --root must not be used when --drive is set")
            }
            (Some(drive), None, None) => Ok(DriveTarget::WholeDrive(drive)),
            (None, Some(boot), Some(root)) => {
                Ok(DriveTarget::Partitions(PartitionScheme { boot, root }))
            }
            (None, None, None) => bail!("either --drive or both --boot and --root must be set"),
            (None, _, _) => bail!("both --boot and --root are required"),
        }
    }
}

/// The set of device-mapper and LVM names minted for one invocation. All four
/// share a single random run id, so they cannot collide with the leftovers of
/// an earlier run and every resource created by this run is recognizable from
/// the id alone. The names are never persisted; once the volume group is
/// active the OS addresses the volumes as `<vg>/<lv>`.
#[derive(Debug, Clone)]
pub struct VolumeNames {
    pub luks_mapper: String,
    pub volume_group: String,
    pub swap_volume: String,
    pub root_volume: String,
}

impl VolumeNames {
    pub fn generate() -> Self {
        Self::from_run_id(&Uuid::new_v4().to_string())
    }

    fn from_run_id(id: &str) -> Self {
        Self {
            luks_mapper: id.to_owned(),
            volume_group: format!("{id}_vg"),
            swap_volume: format!("{id}_swap"),
            root_volume: format!("{id}_root"),
        }
    }

    pub fn mapper_path(&self) -> PathBuf {
        PathBuf::from(format!("/dev/mapper/{}", self.luks_mapper))
    }

    pub fn swap_volume_path(&self) -> PathBuf {
        PathBuf::from(format!("/dev/{}/{}", self.volume_group, self.swap_volume))
    }

    pub fn root_volume_path(&self) -> PathBuf {
        PathBuf::from(format!("/dev/{}/{}", self.volume_group, self.root_volume))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn path(s: &str) -> Option<PathBuf> {
        Some(PathBuf::from(s))
    }

    #[test]
    fn whole_drive_target() {
        let target = DriveTarget::from_options(path("/dev/sda"), None, None).unwrap();
        assert_eq!(target, DriveTarget::WholeDrive(PathBuf::from("/dev/sda")));
    }

    #[test]
    fn explicit_partitions_target() {
        let target = DriveTarget::from_options(None, path("/dev/sda1"), path("/dev/sda2")).unwrap();
        assert_eq!(
            target,
            DriveTarget::Partitions(PartitionScheme {
                boot: PathBuf::from("/dev/sda1"),
                root: PathBuf::from("/dev/sda2"),
            })
        );
    }

    #[test]
    fn drive_conflicts_with_partitions() {
        assert!(DriveTarget::from_options(path("/dev/sda"), path("/dev/sdb1"), None).is_err());
        assert!(DriveTarget::from_options(path("/dev/sda"), None, path("/dev/sdb2")).is_err());
        assert!(
            DriveTarget::from_options(path("/dev/sda"), path("/dev/sdb1"), path("/dev/sdb2"))
                .is_err()
        );
    }

    #[test]
    fn lone_partition_rejected() {
        assert!(DriveTarget::from_options(None, path("/dev/sda1"), None).is_err());
        assert!(DriveTarget::from_options(None, None, path("/dev/sda2")).is_err());
    }

    #[test]
    fn nothing_specified_rejected() {
        assert!(DriveTarget::from_options(None, None, None).is_err());
    }

    #[test]
    fn passphrase_debug_is_redacted() {
        let passphrase = Passphrase::from("s3cret".to_owned());
        assert_eq!(format!("{passphrase:?}"), "Passphrase(..)");
    }

    #[test]
    fn names_share_one_run_id() {
        let names = VolumeNames::generate();
        let id = names.luks_mapper.clone();
        assert_eq!(names.volume_group, format!("{id}_vg"));
        assert_eq!(names.swap_volume, format!("{id}_swap"));
        assert_eq!(names.root_volume, format!("{id}_root"));
    }

    #[test]
    fn generated_names_are_unique_per_run() {
        assert_ne!(
            VolumeNames::generate().luks_mapper,
            VolumeNames::generate().luks_mapper
        );
    }
}
