//! Frontend Models
//!
//! Data structures matching the backend endpoint entities.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Contact data structure (read-only, managed by the backend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Backend fields this client does not model, carried through unchanged
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    /// Name as listed in the picker: upper-cased first name, then last name
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name.to_uppercase(), self.last_name)
    }

    /// Name as shown on the assign button and todo cards
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Todo data structure (matches backend)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    /// Assigned by the backend on first save
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub task: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: Option<i32>,
    #[serde(default)]
    pub deadline: Option<NaiveDate>,
    #[serde(default)]
    pub done: bool,
    /// Snapshot of the contact at save time, not a live link
    #[serde(default)]
    pub assigned: Option<Contact>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Todo {
    /// Empty draft: no task, not done, nothing else set
    pub fn draft() -> Self {
        Self::default()
    }

    /// Card subtitle: "description / first last", absent parts left out
    pub fn subtitle(&self) -> String {
        let description = self.description.as_deref().filter(|d| !d.is_empty());
        let assignee = self.assigned.as_ref().map(Contact::full_name);
        match (description, assignee) {
            (Some(d), Some(a)) => format!("{} / {}", d, a),
            (Some(d), None) => d.to_string(),
            (None, Some(a)) => a,
            (None, None) => String::new(),
        }
    }
}

/// One page of contacts from `ContactEndpoint.getPage`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ContactPage {
    #[serde(default)]
    pub content: Vec<Contact>,
    /// Spring paging flag, set on the final page when the backend reports it
    #[serde(default)]
    pub last: Option<bool>,
}

/// A single constraint violation reported by `TodoEndpoint.save`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationViolation {
    #[serde(default)]
    pub parameter_name: Option<String>,
    #[serde(default)]
    pub message: String,
}
