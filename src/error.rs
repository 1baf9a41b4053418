// SPDX-License-Identifier: MIT

//! Typed error handling for checklist-conditions
//!
//! Condition evaluation never fails: every problem there degrades to a
//! boolean. The errors below cover loading definitions, editing a run and
//! delivering notifications.

use thiserror::Error;

/// Top-level error type for checklist-conditions
#[derive(Debug, Error)]
pub enum EngineError {
    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    /// A checklist item addressed by position does not exist
    #[error("Item {item} not found in checklist {checklist}")]
    ItemNotFound { checklist: usize, item: usize },

    /// Delivering a notification to the channel poster failed
    #[error("Failed to post notification for '{checklist}': {message}")]
    Poster { checklist: String, message: String },
}

/// Convenience alias used throughout the crate
pub type Result<T> = std::result::Result<T, EngineError>;
