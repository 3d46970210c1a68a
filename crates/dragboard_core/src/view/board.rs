//! Board bootstrap: one form and one list per status on a shared host.

use crate::dnd::{DragError, DragSession, DropOutcome};
use crate::model::project::ProjectStatus;
use crate::render::{RenderResult, SharedRenderHost};
use crate::store::project_store::ProjectStore;
use crate::view::project_input::ProjectInput;
use crate::view::project_list::ProjectList;
use log::info;

/// Mounted board.
pub struct Board<'s> {
    pub input: ProjectInput<'s>,
    pub active: ProjectList<'s>,
    pub finished: ProjectList<'s>,
}

impl<'s> Board<'s> {
    /// Mounts the form, then the active and finished lists, in that order.
    pub fn mount(store: &'s ProjectStore, host: SharedRenderHost) -> RenderResult<Self> {
        let input = ProjectInput::new(store, host.clone())?;
        let active = ProjectList::new(store, host.clone(), ProjectStatus::Active)?;
        let finished = ProjectList::new(store, host, ProjectStatus::Finished)?;
        info!("event=board_mount module=view status=ok");
        Ok(Self {
            input,
            active,
            finished,
        })
    }

    pub fn list(&self, status: ProjectStatus) -> &ProjectList<'s> {
        match status {
            ProjectStatus::Active => &self.active,
            ProjectStatus::Finished => &self.finished,
        }
    }

    /// Runs one full drag gesture: card in its current list, hover and drop
    /// on the `target` list, end on the card.
    ///
    /// # Errors
    /// - `DragError::SourceNotFound` when no list renders a card for
    ///   `project_id`.
    pub fn drag_to(
        &self,
        project_id: &str,
        target: ProjectStatus,
    ) -> Result<DropOutcome, DragError> {
        let item = ProjectStatus::ALL
            .into_iter()
            .find_map(|status| self.list(status).item(project_id))
            .ok_or_else(|| DragError::SourceNotFound(project_id.to_string()))?;
        let target_list = self.list(target);

        let mut session = DragSession::new();
        session.start(&item)?;
        session.over(target_list)?;
        let outcome = session.drop_on(target_list)?;
        session.end(&item)?;
        Ok(outcome)
    }
}
