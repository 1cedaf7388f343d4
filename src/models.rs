// Data models for focuslist

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A single to-do item
///
/// Serialized with camelCase field names; an absent description is omitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub completed: bool,
    pub created_at: String,
}

impl Task {
    /// Build a fresh, not-yet-completed task stamped with the current instant
    pub fn new(id: String, title: String, description: Option<String>) -> Self {
        Self {
            id,
            title,
            description: normalize_description(description),
            completed: false,
            created_at: now_iso(),
        }
    }
}

/// Trim a description and collapse blank text to `None`
pub fn normalize_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}

/// Current instant as an ISO-8601 UTC string with millisecond precision
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
