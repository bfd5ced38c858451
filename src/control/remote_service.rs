// src/control/remote_service.rs
//
// Client for the remote playback-control API (bearer authenticated).
//
//   NEXT     → POST {base}/me/player/next
//   PREVIOUS → POST {base}/me/player/previous
//   PAUSE    → PUT  {base}/me/player/pause
//   PLAY     → PUT  {base}/me/player/play
//
// Status codes are handed back to the executor untouched; only a
// transport failure becomes an Err.

use super::executor::{ExecutorConfig, PlaybackService};
use crate::types::Command;
use anyhow::{Context, Result};
use reqwest::Method;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, error, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceStatus {
    /// A device is currently playing
    Active(String),
    /// Devices exist but none is active; holds the first one's name
    Inactive(String),
    NoDevices,
    /// Lookup failed or no credential
    Unavailable,
}

#[derive(Debug, Deserialize)]
struct DevicesResponse {
    #[serde(default)]
    devices: Vec<Device>,
}

#[derive(Debug, Deserialize)]
struct Device {
    name: String,
    #[serde(default)]
    is_active: bool,
}

impl DevicesResponse {
    fn status(self) -> DeviceStatus {
        if let Some(active) = self.devices.iter().find(|d| d.is_active) {
            return DeviceStatus::Active(active.name.clone());
        }
        match self.devices.into_iter().next() {
            Some(first) => DeviceStatus::Inactive(first.name),
            None => DeviceStatus::NoDevices,
        }
    }
}

/// HTTP method and path (relative to the API base) for a command.
pub fn endpoint(command: Command) -> (Method, &'static str) {
    match command {
        Command::Next => (Method::POST, "me/player/next"),
        Command::Previous => (Method::POST, "me/player/previous"),
        Command::Pause => (Method::PUT, "me/player/pause"),
        Command::Play => (Method::PUT, "me/player/play"),
    }
}

pub struct RemotePlaybackClient {
    http_client: reqwest::Client,
    api_base_url: String,
}

impl RemotePlaybackClient {
    pub fn new(api_base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build playback API HTTP client")?;

        Ok(Self {
            http_client,
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &ExecutorConfig) -> Result<Self> {
        Self::new(
            &config.api_base_url,
            Duration::from_millis(config.remote_timeout_ms),
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path)
    }
}

impl PlaybackService for RemotePlaybackClient {
    async fn send(&self, command: Command, token: &str) -> Result<u16> {
        let (method, path) = endpoint(command);
        let url = self.url(path);
        debug!("Calling playback API: {} {}", method, url);

        let response = self
            .http_client
            .request(method, &url)
            .bearer_auth(token)
            .body(Vec::<u8>::new())
            .send()
            .await
            .map_err(|e| {
                error!("Playback API request failed: {}", e);
                e
            })
            .with_context(|| format!("Playback API unreachable at {}", url))?;

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Playback API returned {} for {}: {}",
                status,
                command.action(),
                response
                    .text()
                    .await
                    .unwrap_or_else(|_| "<no body>".to_string()),
            );
        }
        Ok(status.as_u16())
    }

    async fn active_device(&self, token: &str) -> DeviceStatus {
        let url = self.url("me/player/devices");

        let response = match self.http_client.get(&url).bearer_auth(token).send().await {
            Ok(r) if r.status().is_success() => r,
            Ok(r) => {
                warn!("Device lookup returned {}", r.status());
                return DeviceStatus::Unavailable;
            }
            Err(e) => {
                error!("Device lookup failed: {}", e);
                return DeviceStatus::Unavailable;
            }
        };

        match response.json::<DevicesResponse>().await {
            Ok(devices) => devices.status(),
            Err(e) => {
                error!("Failed to parse device list: {}", e);
                DeviceStatus::Unavailable
            }
        }
    }
}
