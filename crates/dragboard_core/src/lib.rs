//! Core logic for the Dragboard project board.
//! This crate is the single source of truth for project state and the
//! drag-and-drop status transfer.

pub mod dnd;
pub mod logging;
pub mod model;
pub mod render;
pub mod store;
pub mod validation;
pub mod view;

pub use dnd::{
    DataTransfer, DragError, DragOverOutcome, DragPhase, DragSession, DragTarget, Draggable,
    DropEffect, DropOutcome, PROJECT_PAYLOAD_TYPE,
};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::project::{Project, ProjectId, ProjectStatus, ProjectStatusParseError};
pub use render::{
    InsertPosition, MemoryRenderHost, MountRequest, RenderError, RenderHost, SharedRenderHost,
};
pub use store::project_store::{ListenerId, MoveOutcome, ProjectSnapshot, ProjectStore};
pub use validation::{validate, Constraints, FieldValue, Validatable};
pub use view::board::Board;
pub use view::project_input::{
    validate_submission, FormFields, InputRules, ProjectInput, SubmitError, ValidatedInput,
};
pub use view::project_item::ProjectItem;
pub use view::project_list::ProjectList;
pub use view::Component;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
