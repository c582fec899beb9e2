//! osc-pilot - Wi-Fi Camera Session Controller
//!
//! Controller library for cameras exposing an Open Spherical Camera style
//! HTTP/JSON control API (state polling + generic command execution).
//!
//! ## Architecture (5 Components)
//!
//! 1. CommandExecutor - Low-level HTTP request/response against the camera
//! 2. CameraSession - Connection lifecycle, polling, command serialization
//! 3. BatteryMonitor - Edge-triggered low-battery detection
//! 4. FileCatalog - File listing fetch and MediaItem mapping
//! 5. SessionHub - Event distribution to UI subscribers
//!
//! ## Design Principles
//!
//! - Round-trip gating: local state changes only after a confirmed response
//! - Single-writer: all state mutation goes through the session's apply path
//! - Wholesale replacement: snapshots and file lists are never patched in place

pub mod battery_monitor;
pub mod command_executor;
pub mod error;
pub mod event_hub;
pub mod file_catalog;
pub mod models;
pub mod session;
pub mod state;

pub use error::{Error, Result};
pub use state::AppConfig;
