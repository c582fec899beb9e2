//! CameraSession - Session Lifecycle and Command Serialization
//!
//! ## Responsibilities
//!
//! - Periodic state polling (fixed period measured from the end of each fetch)
//! - User command execution, one in flight at a time
//! - Authoritative mode/recording/snapshot state behind one write path
//! - Event emission to the SessionHub
//!
//! Every locally visible transition is gated behind a confirmed round-trip:
//! a failed command leaves mode and recording state exactly as they were.

use crate::battery_monitor::BatteryMonitor;
use crate::command_executor::CommandExecutor;
use crate::error::{Error, Result};
use crate::event_hub::{SessionEvent, SessionHub};
use crate::file_catalog::FileCatalog;
use crate::models::{CameraStateSnapshot, CaptureMode};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Mutex, RwLock};

/// Authoritative session state.
///
/// Commands write `mode`/`recording`, polls write the rest; the sets are
/// disjoint, so an overlapping poll can never clobber a command's result.
struct SessionState {
    mode: CaptureMode,
    recording: bool,
    snapshot: Option<CameraStateSnapshot>,
    connection_ok: bool,
    battery: BatteryMonitor,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            mode: CaptureMode::Image,
            recording: false,
            snapshot: None,
            connection_ok: false,
            battery: BatteryMonitor::new(),
        }
    }
}

/// CameraSession instance
pub struct CameraSession {
    executor: Arc<CommandExecutor>,
    catalog: Arc<FileCatalog>,
    hub: Arc<SessionHub>,
    state: Arc<RwLock<SessionState>>,
    running: Arc<RwLock<bool>>,
    /// Bumped on every start(); a poll loop exits once its captured
    /// generation goes stale, so a stop/start cycle cannot leave the old
    /// loop running alongside the new one
    generation: Arc<RwLock<u64>>,
    /// Serializes user commands: one round-trip in flight at a time
    command_lock: Mutex<()>,
    poll_interval: Duration,
}

impl CameraSession {
    /// Create new CameraSession
    pub fn new(
        executor: Arc<CommandExecutor>,
        catalog: Arc<FileCatalog>,
        hub: Arc<SessionHub>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            executor,
            catalog,
            hub,
            state: Arc::new(RwLock::new(SessionState::default())),
            running: Arc::new(RwLock::new(false)),
            generation: Arc::new(RwLock::new(0)),
            command_lock: Mutex::new(()),
            poll_interval,
        }
    }

    /// Start the polling loop
    ///
    /// Polls once immediately, then again a fixed period after each fetch
    /// completes. A slow poll delays the next one instead of piling up.
    pub async fn start(&self) {
        let my_generation = {
            let mut running = self.running.write().await;
            if *running {
                tracing::warn!("Session already running");
                return;
            }
            *running = true;

            let mut generation = self.generation.write().await;
            *generation += 1;
            *generation
        };

        tracing::info!(camera = %self.executor.base_url(), "Starting camera session");

        let executor = self.executor.clone();
        let hub = self.hub.clone();
        let state = self.state.clone();
        let running = self.running.clone();
        let generation = self.generation.clone();
        let interval = self.poll_interval;

        tokio::spawn(async move {
            loop {
                // A loop from a previous start() wakes here after a
                // stop/start cycle and must not resume polling
                if !Self::is_current(&running, &generation, my_generation).await {
                    break;
                }

                Self::poll_once(&executor, &state, &hub, &running, &generation, my_generation)
                    .await;

                tokio::time::sleep(interval).await;
            }

            tracing::info!("Camera session stopped");
        });
    }

    /// Stop the session
    ///
    /// No new polls are scheduled; a fetch already on the wire completes
    /// but its result is discarded.
    pub async fn stop(&self) {
        let mut running = self.running.write().await;
        *running = false;
        tracing::info!("Stopping camera session");
    }

    /// Whether the loop that captured `my_generation` is still the live one
    async fn is_current(
        running: &RwLock<bool>,
        generation: &RwLock<u64>,
        my_generation: u64,
    ) -> bool {
        *running.read().await && *generation.read().await == my_generation
    }

    /// One poll cycle: fetch, parse, apply, notify
    async fn poll_once(
        executor: &CommandExecutor,
        state: &RwLock<SessionState>,
        hub: &SessionHub,
        running: &RwLock<bool>,
        generation: &RwLock<u64>,
        my_generation: u64,
    ) {
        match executor.fetch_state().await {
            Ok(doc) => {
                let snapshot = CameraStateSnapshot::from_state_document(&doc);

                // A stop() while the call was in flight discards the result
                if !Self::is_current(running, generation, my_generation).await {
                    return;
                }

                let alert = {
                    let mut st = state.write().await;
                    st.snapshot = Some(snapshot.clone());
                    st.connection_ok = true;
                    st.battery.update(snapshot.battery)
                };

                hub.broadcast(SessionEvent::StateUpdated(snapshot)).await;
                if let Some(level) = alert {
                    hub.broadcast(SessionEvent::LowBatteryAlert(level)).await;
                }
            }
            Err(e) => {
                if !Self::is_current(running, generation, my_generation).await {
                    return;
                }

                tracing::error!(error = %e, "State poll failed");

                // Keep the stale snapshot so the UI shows last-known values
                state.write().await.connection_ok = false;
                hub.broadcast(SessionEvent::PollFailed(e.to_string())).await;
            }
        }
    }

    /// Change the capture mode via `camera.setOptions`
    ///
    /// The authoritative mode is updated only on a confirmed success.
    pub async fn set_capture_mode(&self, mode: CaptureMode) -> Result<()> {
        let _guard = self.command_lock.lock().await;

        let params = serde_json::json!({
            "options": { "captureMode": mode.as_str() }
        });

        match self.executor.run_command("camera.setOptions", Some(params)).await {
            Ok(_) => {
                self.state.write().await.mode = mode;
                tracing::info!(mode = mode.as_str(), "Capture mode changed");
                self.hub.broadcast(SessionEvent::ModeChanged(mode)).await;
                Ok(())
            }
            Err(e) => {
                self.hub
                    .broadcast(SessionEvent::CommandFailed(e.to_string()))
                    .await;
                Err(Error::Transport(e))
            }
        }
    }

    /// Take a still photo via `camera.takePicture`
    ///
    /// Fails fast without a network call unless the camera is in image mode.
    /// A confirmed shot triggers a file-listing refresh.
    pub async fn take_picture(&self) -> Result<()> {
        let _guard = self.command_lock.lock().await;

        if self.state.read().await.mode != CaptureMode::Image {
            return Err(Error::WrongMode(
                "switch to image mode before taking a picture".to_string(),
            ));
        }

        match self.executor.run_command("camera.takePicture", None).await {
            Ok(_) => {
                tracing::info!("Photo taken");
                self.hub.broadcast(SessionEvent::PhotoTaken).await;
                self.refresh_file_list().await;
                Ok(())
            }
            Err(e) => {
                self.hub
                    .broadcast(SessionEvent::CommandFailed(e.to_string()))
                    .await;
                Err(Error::Transport(e))
            }
        }
    }

    /// Start or stop video capture depending on the current recording state
    ///
    /// Fails fast without a network call unless the camera is in video mode.
    /// The recording flag flips only on a confirmed success; stopping
    /// triggers a file-listing refresh.
    pub async fn toggle_recording(&self) -> Result<()> {
        let _guard = self.command_lock.lock().await;

        let recording = {
            let st = self.state.read().await;
            if st.mode != CaptureMode::Video {
                return Err(Error::WrongMode(
                    "switch to video mode before recording".to_string(),
                ));
            }
            st.recording
        };

        let command = if recording {
            "camera.stopCapture"
        } else {
            "camera.startCapture"
        };

        match self.executor.run_command(command, None).await {
            Ok(_) => {
                let now_recording = !recording;
                self.state.write().await.recording = now_recording;
                tracing::info!(recording = now_recording, "Recording state changed");
                self.hub
                    .broadcast(SessionEvent::RecordingStateChanged(now_recording))
                    .await;

                if !now_recording {
                    self.refresh_file_list().await;
                }
                Ok(())
            }
            Err(e) => {
                self.hub
                    .broadcast(SessionEvent::CommandFailed(e.to_string()))
                    .await;
                Err(Error::Transport(e))
            }
        }
    }

    /// Fetch the file listing and publish it wholesale
    ///
    /// Issued only after a command's success has been observed.
    pub async fn refresh_file_list(&self) {
        match self.catalog.list_files().await {
            Ok(items) => {
                self.hub.broadcast(SessionEvent::FileListUpdated(items)).await;
            }
            Err(e) => {
                tracing::error!(error = %e, "File listing refresh failed");
                self.hub
                    .broadcast(SessionEvent::CommandFailed(format!(
                        "file listing failed: {e}"
                    )))
                    .await;
            }
        }
    }

    /// Current capture mode
    pub async fn capture_mode(&self) -> CaptureMode {
        self.state.read().await.mode
    }

    /// Whether a video capture is running
    pub async fn is_recording(&self) -> bool {
        self.state.read().await.recording
    }

    /// Last successfully fetched snapshot, if any
    pub async fn snapshot(&self) -> Option<CameraStateSnapshot> {
        self.state.read().await.snapshot.clone()
    }

    /// Whether the most recent poll succeeded
    pub async fn connection_ok(&self) -> bool {
        self.state.read().await.connection_ok
    }

    /// Whether the polling loop is active
    pub async fn is_running(&self) -> bool {
        *self.running.read().await
    }

    #[cfg(test)]
    pub(crate) async fn force_mode_for_test(&self, mode: CaptureMode) {
        self.state.write().await.mode = mode;
    }
}
