// src/main.rs
//
// Runs a capture session over detector frames (JSON lines on stdin or
// from --frames) and writes pipeline events as JSON lines to stdout.
//
//   gesture_remote [config.yaml] [--frames frames.jsonl]

use anyhow::{Context, Result};
use clap::Parser;
use gesture_remote::control::{
    CommandExecutor, CommandResult, CredentialSource, DeviceStatus, EnvToken, LocalControl,
    LocalDaemonClient, PlaybackService, RemotePlaybackClient,
};
use gesture_remote::detector::{JsonLinesSource, LandmarkSource};
use gesture_remote::pipeline::{DispatchedCommand, GestureSession, HistoryEntry};
use gesture_remote::Config;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

type ResultSender = mpsc::UnboundedSender<(Uuid, CommandResult)>;

#[derive(Debug, Parser)]
#[command(name = "gesture_remote")]
#[command(about = "Turn hand gestures from detector frames into playback commands")]
struct CliArgs {
    /// YAML config; ./config.yaml is used when present
    config_path: Option<String>,
    /// Detector frames as JSON lines (stdin when omitted)
    #[arg(long)]
    frames: Option<String>,
}

fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None if Path::new(DEFAULT_CONFIG_PATH).exists() => Config::load(DEFAULT_CONFIG_PATH),
        None => Ok(Config::default()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    let config = load_config(args.config_path.as_deref())?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    info!("🖐️ Gesture remote starting");
    info!(
        "Thresholds: hold_frames={}, cooldown_ms={}, extension_margin={:.2}, pinch={:.3}",
        config.stabilizer.hold_frames,
        config.dispatcher.cooldown_ms,
        config.classifier.extension_margin,
        config.classifier.pinch_threshold,
    );

    let local = if config.executor.local_enabled {
        Some(LocalDaemonClient::from_config(&config.executor)?)
    } else {
        None
    };
    let remote = RemotePlaybackClient::from_config(&config.executor)?;
    let credentials = EnvToken::new(config.executor.token_env.clone());
    let executor = Arc::new(CommandExecutor::new(local, remote, credentials));

    if executor.local_available().await {
        info!("✓ Local control online at {}", config.executor.local_url);
    } else {
        info!("Local control offline, using playback API only");
    }
    match executor.active_device().await {
        DeviceStatus::Active(name) => info!("🎵 Connected to: {}", name),
        DeviceStatus::Inactive(name) => warn!("Open the player on: {}", name),
        DeviceStatus::NoDevices => warn!("No playback devices found"),
        DeviceStatus::Unavailable => warn!(
            "Playback API unavailable (is {} set?)",
            config.executor.token_env
        ),
    }

    let reader: Box<dyn BufRead> = match &args.frames {
        Some(path) => Box::new(BufReader::new(
            File::open(path).with_context(|| format!("Failed to open frames {}", path))?,
        )),
        None => Box::new(BufReader::new(io::stdin())),
    };
    let mut source = JsonLinesSource::new(reader);
    let mut session = GestureSession::new(&config);

    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<(Uuid, CommandResult)>();
    let mut in_flight = JoinSet::new();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    while let Some(frame) = source.next_frame() {
        while let Ok((id, result)) = result_rx.try_recv() {
            session.record_result(id, result);
        }

        let frame = match frame {
            Ok(frame) => frame,
            Err(e) => {
                warn!("Bad frame input: {:#}", e);
                continue;
            }
        };
        let hands = match frame.observations() {
            Ok(hands) => hands,
            Err(e) => {
                warn!("Skipping frame: {:#}", e);
                continue;
            }
        };

        let ctx = session.process_frame(frame.timestamp_ms, &hands);
        if let Some(dispatched) = ctx.dispatched {
            info!("⚡ Dispatching {:?}", dispatched.command);
            spawn_execution(&mut in_flight, &executor, dispatched, &result_tx);
        }

        write_events(&mut session, &mut out)?;
    }

    drop(result_tx);
    while in_flight.join_next().await.is_some() {}
    while let Ok((id, result)) = result_rx.try_recv() {
        session.record_result(id, result);
    }
    write_events(&mut session, &mut out)?;

    let summary = session.metrics().summary();
    info!(
        "✓ Session finished: {}",
        serde_json::to_string(&summary)?
    );
    let history: Vec<&HistoryEntry> = session.history().entries().collect();
    info!("Recent gestures: {}", serde_json::to_string(&history)?);
    Ok(())
}

/// Run one command in the background and report its result on `results`.
fn spawn_execution<L, R, C>(
    in_flight: &mut JoinSet<()>,
    executor: &Arc<CommandExecutor<L, R, C>>,
    dispatched: DispatchedCommand,
    results: &ResultSender,
) where
    L: LocalControl + 'static,
    R: PlaybackService + 'static,
    C: CredentialSource + 'static,
{
    let executor = Arc::clone(executor);
    let tx = results.clone();
    in_flight.spawn(async move {
        let result = executor.execute(dispatched.command).await;
        // Receiver gone means the session ended; drop the result
        let _ = tx.send((dispatched.id, result));
    });
}

fn write_events(session: &mut GestureSession, out: &mut impl Write) -> Result<()> {
    for event in session.drain_events() {
        let json_line = serde_json::to_string(&event)?;
        writeln!(out, "{}", json_line)?;
    }
    out.flush()?;
    Ok(())
}
