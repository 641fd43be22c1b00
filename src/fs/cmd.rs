use std::{
    marker::{Send, Sync},
    process::Stdio,
};

use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use tokio::{io::AsyncWriteExt as _, process::Command};

/// The one place external tools are spawned. Every invocation captures both
/// output streams, feeds optional bytes to the child's stdin (the passphrase
/// channel), and checks the exit status; failures carry the command line,
/// exit code, and captured output in their context so the tool's diagnostics
/// surface verbatim.
#[async_trait]
pub trait RunChecked {
    async fn run(&mut self) -> Result<Vec<u8>>;

    async fn run_with_input(&mut self, input_bytes: Option<&[u8]>) -> Result<Vec<u8>>;

    async fn run_with_status_checker<R>(
        &mut self,
        input_bytes: Option<&[u8]>,
        f: impl Fn(i32, Vec<u8>, Vec<u8>) -> Result<R> + Send + Sync,
    ) -> Result<R>;
}

#[async_trait]
impl RunChecked for Command {
    async fn run(&mut self) -> Result<Vec<u8>> {
        self.run_with_input(None).await
    }

    async fn run_with_input(&mut self, input_bytes: Option<&[u8]>) -> Result<Vec<u8>> {
        self.run_with_status_checker(input_bytes, |code, stdout, _| {
            if code != 0 {
                bail!("Bad exit code")
            } else {
                Ok(stdout)
            }
        })
        .await
    }

    async fn run_with_status_checker<R>(
        &mut self,
        input_bytes: Option<&[u8]>,
        f: impl Fn(i32, Vec<u8>, Vec<u8>) -> Result<R> + Send + Sync,
    ) -> Result<R> {
        // reset all locale settings for this command
        self.env("LC_ALL", "C");

        tracing::trace!(cmd=?self.as_std(), "run external cmd");

        let output = async {
            if input_bytes.is_some() {
                self.stdin(Stdio::piped());
            } else {
                self.stdin(Stdio::null());
            }
            self.stdout(Stdio::piped());
            self.stderr(Stdio::piped());

            let mut child = self.kill_on_drop(true).spawn()?;

            if let Some(input_bytes) = input_bytes {
                let mut stdin = child.stdin.take().context("No stdin")?;
                stdin.write_all(input_bytes).await?;
                stdin.shutdown().await?;
            }

            child.wait_with_output().await.map_err(anyhow::Error::from)
        }
        .await
        .with_context(|| format!("Failed to execute external command {:?}", self.as_std()))?;

        let stdout = output.stdout;
        let stderr = output.stderr;
        let code = output.status.code();

        match code {
            Some(code) => f(code, stdout.clone(), stderr.clone()),
            None => Err(anyhow!("killed by signal")),
        }
        .with_context(|| {
            format!(
                "\ncmd: {:?}\nexit code: {}\nstdout: {}\nstderr: {}",
                self.as_std(),
                code.map(|code| code.to_string())
                    .unwrap_or("unknown".to_string()),
                String::from_utf8_lossy(&stdout),
                String::from_utf8_lossy(&stderr),
            )
        })
    }
}
