// src/control/local_daemon.rs
//
// Client for the optional same-machine control daemon.
//
//   POST {base}/control  {"action": "next" | "previous" | "play" | "pause"}
//   GET  {base}/health
//
// Success is judged by HTTP status only; the body is ignored.

use super::executor::{ExecutorConfig, LocalControl};
use crate::types::Command;
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

#[derive(Debug, Serialize)]
struct ControlRequest<'a> {
    action: &'a str,
}

pub struct LocalDaemonClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl LocalDaemonClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build local daemon HTTP client")?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ExecutorConfig) -> Result<Self> {
        Self::new(
            &config.local_url,
            Duration::from_millis(config.local_timeout_ms),
        )
    }
}

impl LocalControl for LocalDaemonClient {
    async fn send(&self, command: Command) -> Result<()> {
        let url = format!("{}/control", self.base_url);
        debug!("Trying local daemon for: {}", command.action());

        let response = self
            .http_client
            .post(&url)
            .json(&ControlRequest {
                action: command.action(),
            })
            .send()
            .await
            .with_context(|| format!("Local daemon unreachable at {}", url))?;

        let status = response.status();
        if !status.is_success() {
            warn!("Local daemon rejected {}: {}", command.action(), status);
            bail!("Local daemon returned {}", status);
        }
        Ok(())
    }

    async fn health(&self) -> bool {
        let url = format!("{}/health", self.base_url);
        match self.http_client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                debug!("Local daemon health check failed: {}", e);
                false
            }
        }
    }
}
