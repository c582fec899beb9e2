//! FileCatalog - File Listing Fetch and Mapping
//!
//! ## Responsibilities
//!
//! - Issue `camera.listFiles` with the configured filters
//! - Map raw entries to MediaItems
//! - Skip individual malformed entries without failing the batch
//!
//! Each fetch replaces the prior list wholesale; there is no incremental
//! pagination or diffing.

use crate::command_executor::{CommandExecutor, TransportError};
use crate::models::{MediaItem, MediaKind};
use serde_json::Value;
use std::sync::Arc;

/// FileCatalog instance
pub struct FileCatalog {
    executor: Arc<CommandExecutor>,
    /// Listing filter, e.g. "all", "image", "video"
    file_type: String,
    /// Max entries per listing
    entry_count: u32,
    /// Max thumbnail size requested
    max_thumb_size: u32,
}

impl FileCatalog {
    /// Create new FileCatalog
    pub fn new(
        executor: Arc<CommandExecutor>,
        file_type: impl Into<String>,
        entry_count: u32,
        max_thumb_size: u32,
    ) -> Self {
        Self {
            executor,
            file_type: file_type.into(),
            entry_count,
            max_thumb_size,
        }
    }

    /// Fetch the current file listing from the camera
    pub async fn list_files(&self) -> Result<Vec<MediaItem>, TransportError> {
        let params = serde_json::json!({
            "fileType": self.file_type,
            "entryCount": self.entry_count,
            "maxThumbSize": self.max_thumb_size,
        });

        let response = self
            .executor
            .run_command("camera.listFiles", Some(params))
            .await?;

        let items = map_entries(&response["results"]["entries"]);
        tracing::debug!(count = items.len(), "File listing fetched");

        Ok(items)
    }
}

/// Map raw listing entries to MediaItems.
///
/// `fileUrl` and `name` are required; an entry missing either is logged and
/// skipped so one malformed entry cannot discard the rest of the listing.
/// `fileType` is optional and defaults to image.
pub fn map_entries(entries: &Value) -> Vec<MediaItem> {
    let Some(entries) = entries.as_array() else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let url = entry["fileUrl"].as_str();
            let name = entry["name"].as_str();

            match (url, name) {
                (Some(url), Some(name)) => Some(MediaItem {
                    url: url.to_string(),
                    kind: MediaKind::from_wire(entry["fileType"].as_str().unwrap_or("image")),
                    name: name.to_string(),
                }),
                _ => {
                    tracing::warn!(entry = %entry, "Skipping listing entry with missing fileUrl or name");
                    None
                }
            }
        })
        .collect()
}
