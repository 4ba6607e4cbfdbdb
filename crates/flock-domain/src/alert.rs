use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Notification shown on the dashboard. Aggregation passes these through untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AlertRecord {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default)]
    pub read: bool,
}

impl AlertRecord {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            message: message.into(),
            created_at: None,
            read: false,
        }
    }
}
