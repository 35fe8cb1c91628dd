//! Loading of on-disk channel status documents.
//!
//! A document is either a bare array of account snapshots for one default
//! channel or an object mapping channel ids to snapshot arrays, optionally
//! wrapped in a top-level `"channels"` object. Channel order is preserved.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
/// Enumerates failures while loading a channel status document.
pub enum ChannelStatusDocumentError {
    #[error("failed to read channel status document {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse channel status document JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("channel status document root must be an array or object (found {found})")]
    UnsupportedRoot { found: &'static str },
}

#[derive(Debug, Clone, PartialEq)]
/// Raw account snapshots reported for one channel.
pub struct ChannelAccountSnapshots {
    pub channel: String,
    pub accounts: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Public struct `ChannelStatusDocument` used across Tau components.
pub struct ChannelStatusDocument {
    pub channels: Vec<ChannelAccountSnapshots>,
}

impl ChannelStatusDocument {
    pub fn accounts_for(&self, channel: &str) -> Option<&[Value]> {
        self.channels
            .iter()
            .find(|entry| entry.channel == channel)
            .map(|entry| entry.accounts.as_slice())
    }

    pub fn account_count(&self) -> usize {
        self.channels.iter().map(|entry| entry.accounts.len()).sum()
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn channels_from_object(mut root: Map<String, Value>) -> Vec<ChannelAccountSnapshots> {
    if matches!(root.get("channels"), Some(Value::Object(_))) {
        if let Some(Value::Object(channels)) = root.remove("channels") {
            root = channels;
        }
    }
    let mut entries = Vec::with_capacity(root.len());
    for (channel, accounts) in root {
        match accounts {
            Value::Array(accounts) => entries.push(ChannelAccountSnapshots { channel, accounts }),
            other => {
                tracing::warn!(
                    channel = %channel,
                    found = json_type_name(&other),
                    "skipping channel whose status snapshots are not an array"
                );
            }
        }
    }
    entries
}

pub fn parse_channel_status_document(
    raw: &str,
    default_channel: &str,
) -> Result<ChannelStatusDocument, ChannelStatusDocumentError> {
    let root = serde_json::from_str::<Value>(raw)?;
    let channels = match root {
        Value::Array(accounts) => vec![ChannelAccountSnapshots {
            channel: default_channel.to_string(),
            accounts,
        }],
        Value::Object(map) => channels_from_object(map),
        other => {
            return Err(ChannelStatusDocumentError::UnsupportedRoot {
                found: json_type_name(&other),
            })
        }
    };
    Ok(ChannelStatusDocument { channels })
}

pub fn load_channel_status_document(
    path: &Path,
    default_channel: &str,
) -> Result<ChannelStatusDocument, ChannelStatusDocumentError> {
    let raw =
        std::fs::read_to_string(path).map_err(|source| ChannelStatusDocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
    parse_channel_status_document(&raw, default_channel)
}
