//! Subprocess-backed inventory adapter.

use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use tokio::process::Command;
use tokio::time::timeout;

use super::{InventoryMap, SoftwareInventory};

/// How long the inventory command may run before being abandoned.
const INVENTORY_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs an external command and parses its stdout as the inventory document.
pub struct CommandInventory {
    program: String,
    args: Vec<String>,
    timeout: Duration,
}

impl CommandInventory {
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
            timeout: INVENTORY_TIMEOUT,
        }
    }

    /// Build from a whitespace-separated command line, e.g. a CLI flag.
    pub fn from_command_line(command: &str) -> Result<Self> {
        let mut parts = command.split_whitespace().map(str::to_string);
        let program = parts.next().context("inventory command is empty")?;
        Ok(Self::new(program, parts.collect()))
    }

    /// Override the execution timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl SoftwareInventory for CommandInventory {
    async fn fetch(&self) -> Result<InventoryMap> {
        let output = timeout(
            self.timeout,
            Command::new(&self.program)
                .args(&self.args)
                .kill_on_drop(true)
                .output(),
        )
        .await
        .map_err(|_| {
            anyhow::anyhow!(
                "inventory command {} timed out after {:?}",
                self.program,
                self.timeout
            )
        })?
        .with_context(|| format!("failed to execute {}", self.program))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "inventory command exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        serde_json::from_slice(&output.stdout)
            .with_context(|| format!("{} produced invalid inventory JSON", self.program))
    }
}
