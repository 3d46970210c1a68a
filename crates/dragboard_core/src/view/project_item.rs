//! Project card view and drag source.

use crate::dnd::{DataTransfer, Draggable, DropEffect, PROJECT_PAYLOAD_TYPE};
use crate::model::project::Project;
use crate::render::{ElementId, InsertPosition, MountRequest, RenderHost, RenderResult};
use crate::view::{mount, Component, SLOT_DESCRIPTION, SLOT_PEOPLE, SLOT_TITLE};
use log::debug;

/// Template instantiated for every card.
pub const ITEM_TEMPLATE_ID: &str = "single-project";

/// Element id of the card for `project_id` inside `list_element_id`.
///
/// Scoped by list so a card can be mounted in its new list before the old
/// list clears it.
pub fn item_element_id(list_element_id: &str, project_id: &str) -> ElementId {
    format!("{list_element_id}-{project_id}")
}

/// One rendered project card, holding the project copy it was rendered from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectItem {
    project: Project,
    element_id: ElementId,
}

impl ProjectItem {
    /// Mounts a card at the end of `list_element_id` and renders it.
    pub fn mount(
        host: &mut dyn RenderHost,
        list_element_id: &str,
        project: Project,
    ) -> RenderResult<Self> {
        let request = MountRequest::new(ITEM_TEMPLATE_ID, list_element_id, InsertPosition::End)
            .with_element_id(item_element_id(list_element_id, &project.id));
        let element_id = mount(host, &request)?;
        let item = Self {
            project,
            element_id,
        };
        item.render_content(host)?;
        Ok(item)
    }

    pub fn project(&self) -> &Project {
        &self.project
    }
}

impl Component for ProjectItem {
    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn render_content(&self, host: &mut dyn RenderHost) -> RenderResult<()> {
        host.set_text(&self.element_id, SLOT_TITLE, &self.project.title)?;
        host.set_text(&self.element_id, SLOT_PEOPLE, &self.project.people_label())?;
        host.set_text(&self.element_id, SLOT_DESCRIPTION, &self.project.description)
    }
}

impl Draggable for ProjectItem {
    fn drag_start(&self, transfer: &mut DataTransfer) {
        transfer.clear();
        transfer.set_data(PROJECT_PAYLOAD_TYPE, self.project.id.as_str());
        transfer.effect_allowed = DropEffect::Move;
    }

    fn drag_end(&self, _transfer: &DataTransfer) {
        debug!(
            "event=drag_end module=view status=ok project_id={}",
            self.project.id
        );
    }
}
