//! Shared models and types for osc-pilot
//!
//! This module contains value types shared across multiple modules
//! to avoid circular dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Camera capture mode
///
/// Mutated only after a confirmed successful mode-change response,
/// never optimistically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Image,
    Video,
}

impl CaptureMode {
    /// Wire string used in `camera.setOptions` parameters
    pub fn as_str(&self) -> &'static str {
        match self {
            CaptureMode::Image => "image",
            CaptureMode::Video => "video",
        }
    }

    /// The other mode (UI mode-toggle helper)
    pub fn toggled(&self) -> Self {
        match self {
            CaptureMode::Image => CaptureMode::Video,
            CaptureMode::Video => CaptureMode::Image,
        }
    }
}

/// Battery level reported by the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BatteryReading {
    /// `state.batteryLevel` absent or not a number
    Unknown,
    /// Percentage in [0, 100]
    Percent(i32),
}

impl BatteryReading {
    /// Scale the wire format [0,1] fraction to a whole percentage
    pub fn from_fraction(fraction: Option<f64>) -> Self {
        match fraction {
            Some(f) if f.is_finite() => {
                BatteryReading::Percent(((f * 100.0).round() as i32).clamp(0, 100))
            }
            _ => BatteryReading::Unknown,
        }
    }
}

/// Immutable point-in-time copy of device state
///
/// Replaced wholesale on each successful poll; retained (not cleared)
/// when a poll fails so the UI can keep showing last-known values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraStateSnapshot {
    pub battery: BatteryReading,
    /// Free-form capture status string, e.g. "idle" or "shooting"
    pub status: String,
    /// Device uptime in seconds
    pub uptime_sec: i64,
    /// When this snapshot was fetched
    pub fetched_at: DateTime<Utc>,
}

impl CameraStateSnapshot {
    /// Parse a `/state` response document.
    ///
    /// Field contract: `state.batteryLevel` is an optional [0,1] fraction,
    /// `state._captureStatus` defaults to "unknown", `state._uptime`
    /// defaults to 0. Missing fields degrade to defaults instead of failing.
    pub fn from_state_document(doc: &Value) -> Self {
        let state = &doc["state"];

        Self {
            battery: BatteryReading::from_fraction(state["batteryLevel"].as_f64()),
            status: state["_captureStatus"]
                .as_str()
                .unwrap_or("unknown")
                .to_string(),
            uptime_sec: state["_uptime"].as_i64().unwrap_or(0),
            fetched_at: Utc::now(),
        }
    }
}

/// Media kind of a listed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Parse the listing `fileType` field; anything but "video" is an image
    pub fn from_wire(file_type: &str) -> Self {
        if file_type == "video" {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

/// One entry of the camera's file listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub kind: MediaKind,
    pub name: String,
}
