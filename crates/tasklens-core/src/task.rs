//! The task record and its attribute accessors.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::value::Value;

/// A single task record.
///
/// The filter evaluator only depends on two capabilities of this type:
/// named attribute lookup via [`Task::get`] and tag membership via
/// [`Task::has_tag`]. Everything else is carried for the surrounding
/// application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Working-set id, assigned only to pending tasks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,

    /// Permanent identifier.
    pub uuid: Uuid,

    /// The task text.
    #[serde(default)]
    pub description: String,

    /// Lifecycle status (pending, completed, deleted, waiting).
    #[serde(default = "default_status")]
    pub status: String,

    /// Project the task belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Priority (H, M, L); unset means no priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    /// Due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<NaiveDate>,

    /// Creation date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<NaiveDate>,

    /// Completion date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<NaiveDate>,

    /// Tags attached to this task.
    #[serde(default)]
    pub tags: Vec<String>,

    /// User-defined attributes, keyed by attribute name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub udas: BTreeMap<String, String>,
}

fn default_status() -> String {
    "pending".to_string()
}

impl Task {
    /// Creates a pending task with a fresh description and no other data.
    pub fn new(uuid: Uuid, description: impl Into<String>) -> Self {
        Self {
            id: None,
            uuid,
            description: description.into(),
            status: default_status(),
            project: None,
            priority: None,
            due: None,
            entry: None,
            end: None,
            tags: Vec::new(),
            udas: BTreeMap::new(),
        }
    }

    /// Looks up a named attribute as a typed value.
    ///
    /// `id` and `uuid` render as their canonical textual forms. Names that
    /// do not match a built-in attribute fall through to the UDA map.
    /// Returns `None` when the attribute is absent.
    pub fn get(&self, field: &str) -> Option<Value> {
        match field {
            "id" => self.id.map(|id| Value::Number(id as f64)),
            "uuid" => Some(Value::Str(self.uuid.to_string())),
            "description" => Some(Value::Str(self.description.clone())),
            "status" => Some(Value::Str(self.status.clone())),
            "project" => self.project.as_ref().map(|p| Value::Str(p.clone())),
            "priority" => self.priority.as_ref().map(|p| Value::Str(p.clone())),
            "due" => self.due.map(Value::Date),
            "entry" => self.entry.map(Value::Date),
            "end" => self.end.map(Value::Date),
            "tags" => {
                if self.tags.is_empty() {
                    None
                } else {
                    Some(Value::Str(self.tags.join(",")))
                }
            }
            other => self.udas.get(other).map(|v| Value::infer(v)),
        }
    }

    /// Returns true if the task carries the named tag.
    pub fn has_tag(&self, name: &str) -> bool {
        self.tags.iter().any(|t| t == name)
    }
}
