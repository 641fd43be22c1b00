use std::path::PathBuf;

use clap::Parser;

use crate::types::Passphrase;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Parser, Debug)]
pub enum Command {
    /// Prepare a drive for an OS installation.
    ///
    /// The target can be specified with either --drive or both --boot and
    /// --root. --drive expects an entire block device and will create a new
    /// GPT partition table on it; --boot and --root both expect existing
    /// partitions. The root partition is LUKS-encrypted and filled with an
    /// LVM volume group holding a swap volume and a root volume.
    #[command(name = "prepare-drive")]
    PrepareDrive(PrepareDriveOptions),

    /// Overwrite a whole drive with random data.
    #[command(name = "randomize-drive")]
    RandomizeDrive(RandomizeDriveOptions),
}

#[derive(Parser, Debug)]
pub struct PrepareDriveOptions {
    /// Drive to partition and then use (/dev/whatever). Conflicts with
    /// --boot and --root.
    #[clap(long)]
    pub drive: Option<PathBuf>,

    /// The boot partition. Requires --root.
    #[clap(long)]
    pub boot: Option<PathBuf>,

    /// The root partition. Requires --boot.
    #[clap(long)]
    pub root: Option<PathBuf>,

    /// Randomize the root partition before encrypting it.
    #[clap(long, overrides_with = "no_randomize")]
    pub randomize: bool,

    /// Do not randomize the root partition (default).
    #[clap(long = "no-randomize")]
    pub no_randomize: bool,

    /// Swap size, defaults to 2^n G where 2^n G >= total memory.
    #[clap(long)]
    pub swap_size: Option<String>,

    /// Directory to mount the prepared system in. Must already exist.
    #[clap(long)]
    pub mount: PathBuf,

    /// Encryption password. Prompted for (with confirmation) when not given.
    /// Held in a wiped-on-drop wrapper that stays out of debug output.
    #[clap(long)]
    pub password: Option<Passphrase>,

    /// Skip confirmation prompts.
    #[clap(long, short = 'y', default_value = "false")]
    pub yes: bool,
}

#[derive(Parser, Debug)]
pub struct RandomizeDriveOptions {
    /// The drive to wipe.
    pub drive: PathBuf,

    /// Skip confirmation prompts.
    #[clap(long, short = 'y', default_value = "false")]
    pub yes: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn password_is_redacted_in_debug_output() {
        let cli = Cli::try_parse_from([
            "driveprep",
            "prepare-drive",
            "--drive",
            "/dev/sda",
            "--mount",
            "/mnt",
            "--password",
            "hunter2",
            "--yes",
        ])
        .unwrap();
        let Command::PrepareDrive(options) = &cli.command else {
            panic!("wrong subcommand");
        };
        assert_eq!(options.password.as_ref().unwrap().as_bytes(), b"hunter2");
        assert!(!format!("{options:?}").contains("hunter2"));
    }
}
