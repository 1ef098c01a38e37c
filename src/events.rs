//! Edit history for promptweave.
//!
//! When `history_file` is configured, every command that writes a template
//! appends one event to an NDJSON file (one JSON object per line).
//!
//! # Event Format
//!
//! - `ts`: RFC3339 timestamp
//! - `action`: what was written (`set_value`, `normalize`, `export`)
//! - `actor`: the owner string (e.g., `user@HOST`)
//! - `template`: the template id, when known
//! - `details`: freeform object with action-specific details

use crate::error::{PromptError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

/// Actions that can be logged as events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventAction {
    /// One attribute value replaced and written out
    SetValue,
    /// Normalized template written out
    Normalize,
    /// Clean export written out
    Export,
}

impl std::fmt::Display for EventAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventAction::SetValue => write!(f, "set_value"),
            EventAction::Normalize => write!(f, "normalize"),
            EventAction::Export => write!(f, "export"),
        }
    }
}

/// An event record for the history log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub ts: DateTime<Utc>,
    pub action: EventAction,
    pub actor: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    pub details: Value,
}

impl Event {
    /// Create a new event stamped with the current time and actor.
    pub fn new(action: EventAction) -> Self {
        Self {
            ts: Utc::now(),
            action,
            actor: get_actor_string(),
            template: None,
            details: Value::Object(serde_json::Map::new()),
        }
    }

    /// Set the template id for this event.
    pub fn with_template(mut self, template_id: impl Into<String>) -> Self {
        self.template = Some(template_id.into());
        self
    }

    /// Set the details object for this event.
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = details;
        self
    }

    /// Serialize the event to a single-line JSON string.
    pub fn to_ndjson_line(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| {
            PromptError::UserError(format!("failed to serialize event to JSON: {}", e))
        })
    }
}

/// `user@host` for event metadata.
fn get_actor_string() -> String {
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string());

    let host = hostname::get()
        .map(|h| h.to_string_lossy().to_string())
        .unwrap_or_else(|_| "unknown".to_string());

    format!("{}@{}", user, host)
}

/// Append an event as one line to the history file, creating it (and its
/// directory) if needed.
pub fn append_event<P: AsRef<Path>>(history_file: P, event: &Event) -> Result<()> {
    let history_file = history_file.as_ref();
    let json_line = event.to_ndjson_line()?;

    if let Some(dir) = history_file.parent()
        && !dir.as_os_str().is_empty()
        && !dir.exists()
    {
        fs::create_dir_all(dir).map_err(|e| {
            PromptError::UserError(format!(
                "failed to create history directory '{}': {}",
                dir.display(),
                e
            ))
        })?;
    }

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(history_file)
        .map_err(|e| {
            PromptError::UserError(format!(
                "failed to open history file '{}': {}",
                history_file.display(),
                e
            ))
        })?;

    writeln!(file, "{}", json_line).map_err(|e| {
        PromptError::UserError(format!(
            "failed to write event to '{}': {}",
            history_file.display(),
            e
        ))
    })
}

/// Read all events from a history file (empty if the file does not exist).
pub fn read_events<P: AsRef<Path>>(history_file: P) -> Result<Vec<Event>> {
    let history_file = history_file.as_ref();
    if !history_file.exists() {
        return Ok(Vec::new());
    }

    let content = fs::read_to_string(history_file).map_err(|e| {
        PromptError::UserError(format!(
            "failed to read history file '{}': {}",
            history_file.display(),
            e
        ))
    })?;

    content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            serde_json::from_str(line).map_err(|e| {
                PromptError::UserError(format!("failed to parse history event: {}", e))
            })
        })
        .collect()
}
