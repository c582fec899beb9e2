//! osc-pilot - Wi-Fi Camera Session Controller
//!
//! Terminal frontend: subscribes to the session's event stream, logs every
//! event, and turns stdin lines into camera commands.

use osc_pilot::battery_monitor::LOW_BATTERY_THRESHOLD;
use osc_pilot::command_executor::{CameraEndpoint, CommandExecutor};
use osc_pilot::event_hub::{SessionEvent, SessionHub};
use osc_pilot::file_catalog::FileCatalog;
use osc_pilot::models::{BatteryReading, CaptureMode};
use osc_pilot::session::CameraSession;
use osc_pilot::AppConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "osc_pilot=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting osc-pilot v{}", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::default();
    tracing::info!(
        camera = %config.base_url,
        poll_interval_ms = config.poll_interval_ms,
        "Configuration loaded"
    );

    let endpoint = CameraEndpoint::new(
        config.base_url.clone(),
        Duration::from_millis(config.connect_timeout_ms),
    );
    let executor = Arc::new(CommandExecutor::new(
        endpoint,
        Duration::from_millis(config.poll_timeout_ms),
        Duration::from_millis(config.command_timeout_ms),
    )?);
    let catalog = Arc::new(FileCatalog::new(
        executor.clone(),
        "all",
        config.list_entry_count,
        config.list_thumb_size,
    ));
    let hub = Arc::new(SessionHub::new());
    let session = Arc::new(CameraSession::new(
        executor,
        catalog,
        hub.clone(),
        Duration::from_millis(config.poll_interval_ms),
    ));

    // Event logger: the stand-in for a real UI projector
    let (subscriber_id, mut events) = hub.subscribe().await;
    tokio::spawn(async move {
        while let Some(event) = events.recv().await {
            render_event(event);
        }
    });

    session.start().await;
    session.refresh_file_list().await;

    // Command loop: one line per user intent
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    println!("Commands: mode image|video, photo, record, list, state, quit");

    while let Ok(Some(line)) = lines.next_line().await {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let outcome = match parts.as_slice() {
            ["mode", "image"] => session.set_capture_mode(CaptureMode::Image).await,
            ["mode", "video"] => session.set_capture_mode(CaptureMode::Video).await,
            ["mode"] => {
                let next = session.capture_mode().await.toggled();
                session.set_capture_mode(next).await
            }
            ["photo"] => session.take_picture().await,
            ["record"] => session.toggle_recording().await,
            ["list"] => {
                session.refresh_file_list().await;
                Ok(())
            }
            ["state"] => {
                match session.snapshot().await {
                    Some(snap) => println!(
                        "mode={} recording={} connected={} last: {:?} / {} / {}s",
                        session.capture_mode().await.as_str(),
                        session.is_recording().await,
                        session.connection_ok().await,
                        snap.battery,
                        snap.status,
                        snap.uptime_sec,
                    ),
                    None => println!("no snapshot yet"),
                }
                Ok(())
            }
            ["quit"] | ["exit"] => break,
            [] => Ok(()),
            other => {
                println!("unknown command: {}", other.join(" "));
                Ok(())
            }
        };

        if let Err(e) = outcome {
            tracing::warn!(error = %e, "Command rejected");
        }
    }

    session.stop().await;
    hub.unsubscribe(&subscriber_id).await;
    tracing::info!("osc-pilot exiting");

    Ok(())
}

/// Print one session event the way the mobile UI would surface it
fn render_event(event: SessionEvent) {
    match event {
        SessionEvent::StateUpdated(snap) => {
            let battery = match snap.battery {
                BatteryReading::Percent(p) => format!("{p}%"),
                BatteryReading::Unknown => "?".to_string(),
            };
            tracing::debug!(
                battery = %battery,
                status = %snap.status,
                uptime_sec = snap.uptime_sec,
                "State updated"
            );
        }
        SessionEvent::LowBatteryAlert(level) => {
            println!("!! battery low: {level}% (threshold {LOW_BATTERY_THRESHOLD}%)");
        }
        SessionEvent::ModeChanged(mode) => println!("mode is now {}", mode.as_str()),
        SessionEvent::RecordingStateChanged(true) => println!("recording started"),
        SessionEvent::RecordingStateChanged(false) => println!("recording stopped"),
        SessionEvent::PhotoTaken => println!("photo taken"),
        SessionEvent::FileListUpdated(items) => {
            println!("{} file(s) on camera:", items.len());
            for item in items {
                println!("  [{:?}] {} -> {}", item.kind, item.name, item.url);
            }
        }
        SessionEvent::CommandFailed(reason) => println!("command failed: {reason}"),
        SessionEvent::PollFailed(reason) => {
            tracing::warn!(error = %reason, "Connection error, showing last-known state");
        }
    }
}
