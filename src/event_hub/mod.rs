//! SessionHub - Event Distribution
//!
//! ## Responsibilities
//!
//! - Subscriber registration for UI projectors
//! - Broadcasting session events (snapshots, alerts, command outcomes)
//!
//! Subscribers receive typed events over unbounded channels; a closed
//! receiver is dropped on the next broadcast.

use crate::models::{CameraStateSnapshot, CaptureMode, MediaItem};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tokio::sync::mpsc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Events consumed by the UI projector
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
#[serde(rename_all = "snake_case")]
pub enum SessionEvent {
    /// New state snapshot applied (every successful poll)
    StateUpdated(CameraStateSnapshot),
    /// Battery crossed below the threshold, carries the new level
    LowBatteryAlert(i32),
    /// Capture mode change confirmed by the camera
    ModeChanged(CaptureMode),
    /// Recording started (true) or stopped (false), confirmed
    RecordingStateChanged(bool),
    /// Still photo confirmed taken
    PhotoTaken,
    /// Fresh file listing, wholesale replacement of the previous one
    FileListUpdated(Vec<MediaItem>),
    /// A user command failed; authoritative state is unchanged
    CommandFailed(String),
    /// A poll cycle failed; the last snapshot remains valid for display
    PollFailed(String),
}

/// SessionHub instance
pub struct SessionHub {
    subscribers: RwLock<HashMap<Uuid, mpsc::UnboundedSender<SessionEvent>>>,
}

impl SessionHub {
    /// Create new SessionHub
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(HashMap::new()),
        }
    }

    /// Register a new subscriber
    pub async fn subscribe(&self) -> (Uuid, mpsc::UnboundedReceiver<SessionEvent>) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::unbounded_channel();

        self.subscribers.write().await.insert(id, tx);
        tracing::debug!(subscriber_id = %id, "Subscriber registered");

        (id, rx)
    }

    /// Unregister a subscriber
    pub async fn unsubscribe(&self, id: &Uuid) {
        if self.subscribers.write().await.remove(id).is_some() {
            tracing::debug!(subscriber_id = %id, "Subscriber removed");
        }
    }

    /// Broadcast an event to all subscribers
    pub async fn broadcast(&self, event: SessionEvent) {
        let mut subscribers = self.subscribers.write().await;
        let mut dead = Vec::new();

        for (id, tx) in subscribers.iter() {
            if tx.send(event.clone()).is_err() {
                dead.push(*id);
            }
        }

        for id in dead {
            subscribers.remove(&id);
            tracing::debug!(subscriber_id = %id, "Dropped closed subscriber");
        }
    }

    /// Number of live subscribers
    pub async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

impl Default for SessionHub {
    fn default() -> Self {
        Self::new()
    }
}
