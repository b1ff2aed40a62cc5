use std::process::Stdio;

use tokio::process::Command;

use crate::command::CommandSpec;
use crate::error::{Error, Result};

#[async_trait::async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run to completion with output streamed to our own stdout/stderr.
    async fn run(&self, spec: &CommandSpec) -> Result<()>;
    /// Run to completion and hand back what the command printed on stdout.
    async fn output(&self, spec: &CommandSpec) -> Result<String>;
}

/// Launches real child processes.
pub struct ProcessRunner;

impl ProcessRunner {
    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args)
            .envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait::async_trait]
impl CommandRunner for ProcessRunner {
    async fn run(&self, spec: &CommandSpec) -> Result<()> {
        tracing::trace!("executing cmd {}", spec);

        // trace line for the build log
        println!("$ {spec}");

        let mut child = Self::command(spec)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| Error::Launch { command: spec.to_string(), source })?;

        let finished = tokio::select! {
            status = child.wait() => Some(status),
            _ = tokio::signal::ctrl_c() => None,
        };

        let Some(status) = finished else {
            tracing::warn!("interrupted, stopping `{}`", spec);
            let _ = child.kill().await;
            return Err(Error::Interrupted { command: spec.to_string() });
        };

        let status = status.map_err(|source| Error::Launch { command: spec.to_string(), source })?;
        if !status.success() {
            return Err(Error::Exit { command: spec.to_string(), code: status.code() });
        }
        Ok(())
    }

    async fn output(&self, spec: &CommandSpec) -> Result<String> {
        tracing::trace!("capturing output of cmd {}", spec);
        println!("$ {spec}");

        let out = Self::command(spec)
            .stdin(Stdio::null())
            .stderr(Stdio::inherit())
            .output()
            .await
            .map_err(|source| Error::Launch { command: spec.to_string(), source })?;

        if !out.status.success() {
            return Err(Error::Exit { command: spec.to_string(), code: out.status.code() });
        }
        Ok(String::from_utf8_lossy(&out.stdout).to_string())
    }
}

#[cfg(test)]
pub use recording::RecordingRunner;
