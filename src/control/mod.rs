// src/control/mod.rs
//
// Playback control: deciding when to fire a command and carrying it out.
//
//   stable gestures (L, R) → dispatcher::ActionDispatcher → Command
//   Command → executor::CommandExecutor
//               ├─ local_daemon::LocalDaemonClient   (tried first)
//               └─ remote_service::RemotePlaybackClient (bearer token)

pub mod dispatcher;
pub mod executor;
pub mod local_daemon;
pub mod remote_service;

#[cfg(test)]
pub(crate) mod test_support;

pub use dispatcher::{command_for, ActionDispatcher, DispatcherConfig, DispatcherState};
pub use executor::{
    classify_remote_status, CommandExecutor, CommandOutcome, CommandResult, CommandSource,
    CredentialSource, EnvToken, ExecutorConfig, LocalControl, PlaybackService, StaticToken,
};
pub use local_daemon::LocalDaemonClient;
pub use remote_service::{DeviceStatus, RemotePlaybackClient};
