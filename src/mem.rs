use anyhow::{Context, Result};
use tokio::process::Command;

use crate::fs::cmd::RunChecked as _;

const KIB_PER_GIB: u64 = 1024 * 1024;

/// Total physical memory in KiB, read from `free`. An output without a
/// parsable `Mem:` line means the host environment is incompatible.
pub async fn total_memory_kib() -> Result<u64> {
    let out = Command::new("free")
        .run()
        .await
        .context("Failed to query total memory")?;
    parse_total_kib(&String::from_utf8_lossy(&out))
}

fn parse_total_kib(free_output: &str) -> Result<u64> {
    free_output
        .lines()
        .find_map(|line| {
            let mut fields = line.split_whitespace();
            if fields.next() == Some("Mem:") {
                fields.next()
            } else {
                None
            }
        })
        .context("No Mem: line in free output")?
        .parse()
        .context("Unable to determine total memory from free output")
}

/// Default swap size: the smallest power-of-two number of GiB that covers
/// total memory, but at least 1 GiB, in the `<n>G` syntax lvcreate accepts.
pub fn default_swap_size(total_memory_kib: u64) -> String {
    let gib = total_memory_kib.div_ceil(KIB_PER_GIB).max(1);
    format!("{}G", gib.next_power_of_two())
}
