//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose board use cases (submit, drop, read) to Dart via FRB.
//! - Drive the process-wide store; the Dart side renders the lists itself.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - Submission and drop go through the same validation and payload checks
//!   as the core views.

use dragboard_core::dnd::is_project_payload_type;
use dragboard_core::{
    core_version as core_version_inner, default_log_level, init_logging as init_logging_inner,
    ping as ping_inner, validate_submission, FormFields, InputRules, MoveOutcome, Project,
    ProjectStatus, ProjectStore,
};
use log::warn;

const LOG_LEVEL_ENV: &str = "DRAGBOARD_LOG_LEVEL";

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: `trace|debug|info|warn|error`; blank falls back to
///   `DRAGBOARD_LOG_LEVEL`, then to the build default.
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    let level = resolve_log_level(level.as_str());
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Project card data for one list row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectCard {
    pub project_id: String,
    pub title: String,
    pub description: String,
    pub people: u32,
    /// Assignment line, e.g. `3 people assigned`.
    pub people_label: String,
}

/// Both lists at one store revision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Changes whenever the board changes; Dart re-renders on a new value.
    pub revision: u64,
    pub active: Vec<ProjectCard>,
    pub finished: Vec<ProjectCard>,
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardActionResponse {
    /// Whether the action was applied or was a valid no-op.
    pub ok: bool,
    /// Project the action concerned, when known.
    pub project_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl BoardActionResponse {
    fn success(message: impl Into<String>, project_id: String) -> Self {
        Self {
            ok: true,
            project_id: Some(project_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>, project_id: Option<String>) -> Self {
        Self {
            ok: false,
            project_id,
            message: message.into(),
        }
    }
}

/// Validates the form fields and adds a project.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - On invalid input nothing is added and a single user-facing message is
///   returned.
#[flutter_rust_bridge::frb(sync)]
pub fn board_add_project(
    title: String,
    description: String,
    people: String,
) -> BoardActionResponse {
    let fields = FormFields::new(title, description, people);
    match validate_submission(&InputRules::default(), &fields) {
        Ok(input) => {
            let project =
                ProjectStore::global().add_project(input.title, input.description, input.people);
            BoardActionResponse::success("Project added.", project.id)
        }
        Err(err) => BoardActionResponse::failure(err.to_string(), None),
    }
}

/// Whether a drop target should arm for a drag carrying `types`.
///
/// Only the leading type is inspected.
#[flutter_rust_bridge::frb(sync)]
pub fn board_accepts_payload(types: Vec<String>) -> bool {
    types
        .first()
        .is_some_and(|kind| is_project_payload_type(kind))
}

/// Applies a drop of `payload` (typed `payload_type`) onto the list for
/// `target_status`.
///
/// # FFI contract
/// - Unknown project ids and same-list drops are successful no-ops.
/// - Unrecognized payload types or statuses return `ok = false`.
#[flutter_rust_bridge::frb(sync)]
pub fn board_drop(
    payload_type: String,
    payload: String,
    target_status: String,
) -> BoardActionResponse {
    if !is_project_payload_type(payload_type.as_str()) {
        return BoardActionResponse::failure(
            format!("board_drop ignored payload type `{payload_type}`"),
            None,
        );
    }
    let status = match ProjectStatus::parse(target_status.as_str()) {
        Ok(status) => status,
        Err(err) => {
            return BoardActionResponse::failure(
                format!("board_drop failed: {err}"),
                Some(payload),
            );
        }
    };

    match ProjectStore::global().move_project(payload.as_str(), status) {
        MoveOutcome::Moved => BoardActionResponse::success(format!("Moved to {status}."), payload),
        MoveOutcome::Unchanged => {
            BoardActionResponse::success(format!("Already {status}."), payload)
        }
        MoveOutcome::NotFound => {
            warn!("event=board_drop module=ffi status=not_found target={status}");
            BoardActionResponse::success("No matching project.", payload)
        }
    }
}

/// Reads both lists from the process-wide store.
#[flutter_rust_bridge::frb(sync)]
pub fn board_snapshot() -> BoardSnapshot {
    let snapshot = ProjectStore::global().snapshot();
    BoardSnapshot {
        revision: snapshot.revision,
        active: to_cards(snapshot.with_status(ProjectStatus::Active)),
        finished: to_cards(snapshot.with_status(ProjectStatus::Finished)),
    }
}

fn to_cards(projects: Vec<Project>) -> Vec<ProjectCard> {
    projects.into_iter().map(to_card).collect()
}

fn to_card(project: Project) -> ProjectCard {
    let people_label = project.people_label();
    ProjectCard {
        project_id: project.id,
        title: project.title,
        description: project.description,
        people: project.people,
        people_label,
    }
}

fn resolve_log_level(level: &str) -> String {
    if !level.trim().is_empty() {
        return level.to_string();
    }
    match std::env::var(LOG_LEVEL_ENV) {
        Ok(raw) if !raw.trim().is_empty() => raw.trim().to_string(),
        _ => default_log_level().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        board_accepts_payload, board_add_project, board_drop, board_snapshot, core_version,
        init_logging, ping,
    };

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_relative_log_dir() {
        let error = init_logging("info".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn add_then_drop_moves_project_between_lists() {
        let created = board_add_project(
            "FFI project".to_string(),
            "created over ffi".to_string(),
            "2".to_string(),
        );
        assert!(created.ok, "{}", created.message);
        let project_id = created.project_id.expect("created project id");

        let before = board_snapshot();
        assert!(before.active.iter().any(|card| card.project_id == project_id));

        let moved = board_drop(
            "text/plain".to_string(),
            project_id.clone(),
            "finished".to_string(),
        );
        assert!(moved.ok, "{}", moved.message);

        let after = board_snapshot();
        assert!(after.revision > before.revision);
        assert!(after.finished.iter().any(|card| card.project_id == project_id));
        assert!(!after.active.iter().any(|card| card.project_id == project_id));
    }

    #[test]
    fn add_rejects_invalid_people() {
        let response =
            board_add_project("T".to_string(), "valid text".to_string(), "7".to_string());
        assert!(!response.ok);
        assert!(response.project_id.is_none());
        assert_eq!(response.message, "Invalid input, please try again!");
    }

    #[test]
    fn drop_ignores_foreign_payload_and_unknown_status() {
        let foreign = board_drop("text/html".to_string(), "x".to_string(), "active".to_string());
        assert!(!foreign.ok);
        let bad_status = board_drop(
            "text/plain".to_string(),
            "x".to_string(),
            "archived".to_string(),
        );
        assert!(!bad_status.ok);
        let missing = board_drop(
            "text/plain".to_string(),
            "missing".to_string(),
            "active".to_string(),
        );
        assert!(missing.ok);
    }

    #[test]
    fn accepts_only_leading_text_payload() {
        assert!(board_accepts_payload(vec!["text/plain".to_string()]));
        assert!(!board_accepts_payload(vec![
            "text/html".to_string(),
            "text/plain".to_string()
        ]));
        assert!(!board_accepts_payload(Vec::new()));
    }
}
