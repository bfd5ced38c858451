// src/control/executor.rs
//
// Carries out one playback command through a fallback chain:
//
//   DISPATCHED → TRYING_LOCAL ─ ok ───────────────→ LOCAL_OK
//                     │ any failure
//                     ↓
//               no token → UNAUTHENTICATED
//                     ↓
//               TRYING_REMOTE → REMOTE_OK | FORBIDDEN | NO_DEVICE | FAILED
//
// Every path ends in a CommandResult; execute() never returns an error.

use super::remote_service::DeviceStatus;
use crate::types::Command;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::future::Future;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorConfig {
    /// Try the local daemon before the remote service
    pub local_enabled: bool,
    pub local_url: String,
    /// Upper bound on the local attempt before falling back
    pub local_timeout_ms: u64,
    pub api_base_url: String,
    pub remote_timeout_ms: u64,
    /// Environment variable holding the bearer token
    pub token_env: String,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            local_enabled: true,
            local_url: "http://localhost:5000".to_string(),
            local_timeout_ms: 500,
            api_base_url: "https://api.spotify.com/v1".to_string(),
            remote_timeout_ms: 5000,
            token_env: "PLAYBACK_ACCESS_TOKEN".to_string(),
        }
    }
}

// ============================================================================
// SEAMS
// ============================================================================

/// Same-machine control daemon.
pub trait LocalControl: Send + Sync {
    /// Ok only when the daemon answered with a success status.
    fn send(&self, command: Command) -> impl Future<Output = Result<()>> + Send;

    fn health(&self) -> impl Future<Output = bool> + Send;
}

/// Remote playback-control API.
pub trait PlaybackService: Send + Sync {
    /// Returns the HTTP status; Err means the request never got a response.
    fn send(&self, command: Command, token: &str) -> impl Future<Output = Result<u16>> + Send;

    fn active_device(&self, token: &str) -> impl Future<Output = DeviceStatus> + Send;
}

/// Supplies the bearer token, if the user has authenticated.
pub trait CredentialSource: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

pub struct StaticToken(pub Option<String>);

impl CredentialSource for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Reads the token from an environment variable on every call, so a
/// refreshed token is picked up without restarting.
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

impl CredentialSource for EnvToken {
    fn bearer_token(&self) -> Option<String> {
        std::env::var(&self.var)
            .ok()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }
}

// ============================================================================
// RESULTS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandSource {
    Local,
    Remote,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CommandOutcome {
    LocalOk,
    RemoteOk,
    /// 403, usually an account tier without remote control
    Forbidden,
    /// 404, nothing is currently playing anywhere
    NoDevice,
    Unauthenticated,
    Failed { status: Option<u16> },
}

impl CommandOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::LocalOk => "LOCAL_OK",
            Self::RemoteOk => "REMOTE_OK",
            Self::Forbidden => "FORBIDDEN",
            Self::NoDevice => "NO_DEVICE",
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::Failed { .. } => "FAILED",
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::LocalOk | Self::RemoteOk)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandResult {
    pub command: Command,
    pub outcome: CommandOutcome,
    pub source: CommandSource,
}

impl CommandResult {
    fn local(command: Command) -> Self {
        Self {
            command,
            outcome: CommandOutcome::LocalOk,
            source: CommandSource::Local,
        }
    }

    fn remote(command: Command, outcome: CommandOutcome) -> Self {
        Self {
            command,
            outcome,
            source: CommandSource::Remote,
        }
    }
}

pub fn classify_remote_status(status: u16) -> CommandOutcome {
    match status {
        200..=299 => CommandOutcome::RemoteOk,
        403 => CommandOutcome::Forbidden,
        404 => CommandOutcome::NoDevice,
        other => CommandOutcome::Failed {
            status: Some(other),
        },
    }
}

// ============================================================================
// EXECUTOR
// ============================================================================

pub struct CommandExecutor<L, R, C> {
    local: Option<L>,
    remote: R,
    credentials: C,
}

impl<L, R, C> CommandExecutor<L, R, C>
where
    L: LocalControl,
    R: PlaybackService,
    C: CredentialSource,
{
    /// Pass `None` for `local` to skip straight to the remote service.
    pub fn new(local: Option<L>, remote: R, credentials: C) -> Self {
        Self {
            local,
            remote,
            credentials,
        }
    }

    pub async fn execute(&self, command: Command) -> CommandResult {
        if let Some(local) = &self.local {
            if local.send(command).await.is_ok() {
                return CommandResult::local(command);
            }
        }

        let Some(token) = self.credentials.bearer_token() else {
            return CommandResult::remote(command, CommandOutcome::Unauthenticated);
        };

        let outcome = match self.remote.send(command, &token).await {
            Ok(status) => classify_remote_status(status),
            Err(_) => CommandOutcome::Failed { status: None },
        };
        CommandResult::remote(command, outcome)
    }

    pub async fn local_available(&self) -> bool {
        match &self.local {
            Some(local) => local.health().await,
            None => false,
        }
    }

    /// `Unavailable` when there is no token to ask with.
    pub async fn active_device(&self) -> DeviceStatus {
        match self.credentials.bearer_token() {
            Some(token) => self.remote.active_device(&token).await,
            None => DeviceStatus::Unavailable,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::bail;
    use std::sync::{Arc, Mutex};

    type CallLog = Arc<Mutex<Vec<String>>>;

    struct FakeLocal {
        log: CallLog,
        succeed: bool,
    }

    impl LocalControl for FakeLocal {
        async fn send(&self, command: Command) -> Result<()> {
            self.log
                .lock()
                .unwrap()
                .push(format!("local:{}", command.action()));
            if self.succeed {
                Ok(())
            } else {
                bail!("connection refused")
            }
        }

        async fn health(&self) -> bool {
            self.succeed
        }
    }

    struct FakeRemote {
        log: CallLog,
        response: Option<u16>,
    }

    impl PlaybackService for FakeRemote {
        async fn send(&self, command: Command, token: &str) -> Result<u16> {
            self.log
                .lock()
                .unwrap()
                .push(format!("remote:{}:{}", command.action(), token));
            match self.response {
                Some(status) => Ok(status),
                None => bail!("network unreachable"),
            }
        }

        async fn active_device(&self, _token: &str) -> DeviceStatus {
            DeviceStatus::Active("Kitchen".to_string())
        }
    }

    fn executor(
        local_ok: Option<bool>,
        remote_status: Option<u16>,
        token: Option<&str>,
    ) -> (CommandExecutor<FakeLocal, FakeRemote, StaticToken>, CallLog) {
        let log: CallLog = Arc::new(Mutex::new(Vec::new()));
        let local = local_ok.map(|succeed| FakeLocal {
            log: Arc::clone(&log),
            succeed,
        });
        let remote = FakeRemote {
            log: Arc::clone(&log),
            response: remote_status,
        };
        let exec = CommandExecutor::new(local, remote, StaticToken(token.map(String::from)));
        (exec, log)
    }

    fn calls(log: &CallLog) -> Vec<String> {
        log.lock().unwrap().clone()
    }

    #[tokio::test]
    async fn test_local_success_skips_remote() {
        let (exec, log) = executor(Some(true), Some(204), Some("tok"));
        let result = exec.execute(Command::Next).await;

        assert_eq!(result.outcome, CommandOutcome::LocalOk);
        assert_eq!(result.source, CommandSource::Local);
        assert_eq!(calls(&log), vec!["local:next"]);
    }

    #[tokio::test]
    async fn test_falls_back_to_remote_after_local_failure() {
        let (exec, log) = executor(Some(false), Some(204), Some("tok"));
        let result = exec.execute(Command::Pause).await;

        assert_eq!(result.command, Command::Pause);
        assert_eq!(result.outcome, CommandOutcome::RemoteOk);
        assert_eq!(result.source, CommandSource::Remote);
        assert_eq!(calls(&log), vec!["local:pause", "remote:pause:tok"]);
    }

    #[tokio::test]
    async fn test_missing_token_makes_no_remote_call() {
        let (exec, log) = executor(Some(false), Some(204), None);
        let result = exec.execute(Command::Play).await;

        assert_eq!(result.outcome, CommandOutcome::Unauthenticated);
        assert_eq!(calls(&log), vec!["local:play"]);
    }

    #[tokio::test]
    async fn test_remote_status_classification() {
        let cases = [
            (200, CommandOutcome::RemoteOk),
            (204, CommandOutcome::RemoteOk),
            (403, CommandOutcome::Forbidden),
            (404, CommandOutcome::NoDevice),
            (429, CommandOutcome::Failed { status: Some(429) }),
            (500, CommandOutcome::Failed { status: Some(500) }),
        ];
        for (status, expected) in cases {
            let (exec, _) = executor(Some(false), Some(status), Some("tok"));
            assert_eq!(exec.execute(Command::Previous).await.outcome, expected);
        }
    }

    #[tokio::test]
    async fn test_remote_transport_error_is_generic_failure() {
        let (exec, _) = executor(None, None, Some("tok"));
        let result = exec.execute(Command::Next).await;

        assert_eq!(result.outcome, CommandOutcome::Failed { status: None });
        assert!(!result.outcome.is_success());
    }

    #[tokio::test]
    async fn test_local_disabled_goes_straight_to_remote() {
        let (exec, log) = executor(None, Some(200), Some("tok"));
        let result = exec.execute(Command::Play).await;

        assert_eq!(result.outcome, CommandOutcome::RemoteOk);
        assert_eq!(calls(&log), vec!["remote:play:tok"]);
        assert!(!exec.local_available().await);
    }

    #[tokio::test]
    async fn test_device_query_requires_token() {
        let (exec, _) = executor(None, Some(200), None);
        assert_eq!(exec.active_device().await, DeviceStatus::Unavailable);

        let (exec, _) = executor(None, Some(200), Some("tok"));
        assert_eq!(
            exec.active_device().await,
            DeviceStatus::Active("Kitchen".to_string())
        );
    }

    #[test]
    fn test_outcome_serializes_with_kind_tag() {
        let json = serde_json::to_string(&CommandOutcome::Failed { status: Some(502) }).unwrap();
        assert_eq!(json, r#"{"kind":"failed","status":502}"#);
        assert_eq!(CommandOutcome::NoDevice.as_str(), "NO_DEVICE");
    }
}
