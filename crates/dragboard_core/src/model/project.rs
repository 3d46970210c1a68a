//! Project domain model.
//!
//! # Responsibility
//! - Define the record rendered by both board lists.
//! - Own the two-state status vocabulary shared by views and FFI.
//!
//! # Invariants
//! - `id` is stable and never reused for another project.
//! - `status` is always `Active` or `Finished`; only the store mutates it.
//! - Field constraints (non-empty title, people range) are enforced by the
//!   input form before construction, not by this type.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Opaque project identifier carried as plain text.
///
/// Kept as a type alias because the same text travels as drag payload.
pub type ProjectId = String;

/// Board column a project currently belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Newly created, still in progress.
    Active,
    /// Moved to the finished list.
    Finished,
}

impl ProjectStatus {
    /// Every status in board order.
    pub const ALL: [ProjectStatus; 2] = [ProjectStatus::Active, ProjectStatus::Finished];

    /// Stable string id used in element ids and FFI payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Finished => "finished",
        }
    }

    /// Parses a status from its stable string id (case-insensitive, trimmed).
    pub fn parse(value: &str) -> Result<Self, ProjectStatusParseError> {
        match value.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(Self::Active),
            "finished" => Ok(Self::Finished),
            other => Err(ProjectStatusParseError(other.to_string())),
        }
    }
}

impl Display for ProjectStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status parse failure for unknown status strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectStatusParseError(pub String);

impl Display for ProjectStatusParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unsupported project status `{}`; expected active|finished",
            self.0
        )
    }
}

impl Error for ProjectStatusParseError {}

/// Canonical project record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Stable ID, also used as the item element id and drag payload.
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    /// Number of people assigned.
    pub people: u32,
    pub status: ProjectStatus,
}

impl Project {
    /// Creates an active project with a freshly generated ID.
    pub fn new(title: impl Into<String>, description: impl Into<String>, people: u32) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, description, people)
    }

    /// Creates an active project with a caller-provided ID.
    pub fn with_id(
        id: impl Into<ProjectId>,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            people,
            status: ProjectStatus::Active,
        }
    }

    /// Returns whether the project belongs to the given list.
    pub fn has_status(&self, status: ProjectStatus) -> bool {
        self.status == status
    }

    /// Assignment line shown under the item title.
    pub fn people_label(&self) -> String {
        match self.people {
            1 => "1 person assigned".to_string(),
            count => format!("{count} people assigned"),
        }
    }
}
