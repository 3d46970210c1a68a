//! Status list view and drop target.
//!
//! # Invariants
//! - Each notification replaces the assigned set and rebuilds every card;
//!   nothing is diffed or merged.
//! - Snapshots are applied in revision order. A snapshot no newer than the
//!   last one rendered is dropped, so late deliveries from re-entrant or
//!   concurrent mutations never roll the view back.
//! - The `droppable` class is present only while a project drag hovers.
//! - A drop moves the dragged project to this list's status and nothing else.

use crate::dnd::{
    DataTransfer, DragOverOutcome, DragTarget, DROPPABLE_CLASS, PROJECT_PAYLOAD_TYPE,
};
use crate::model::project::{Project, ProjectStatus};
use crate::render::memory::ROOT_CONTAINER_ID;
use crate::render::{
    lock_host, ElementId, InsertPosition, MountRequest, RenderHost, RenderResult,
    SharedRenderHost,
};
use crate::store::project_store::{ListenerId, ProjectSnapshot, ProjectStore};
use crate::view::project_item::ProjectItem;
use crate::view::{mount, Component, SLOT_HEADING};
use log::{debug, warn};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Template for the list section.
pub const LIST_TEMPLATE_ID: &str = "project-list";
/// Template for the card container inside the section.
pub const LIST_BODY_TEMPLATE_ID: &str = "project-list-items";

#[derive(Debug, Default)]
struct ListState {
    assigned: Vec<Project>,
    items: Vec<ProjectItem>,
    armed: bool,
    /// Revision of the snapshot currently rendered.
    rendered_revision: Option<u64>,
}

type SharedListState = Arc<Mutex<ListState>>;

/// List of projects with one status.
///
/// Subscribes to the store on construction and unsubscribes on drop.
pub struct ProjectList<'s> {
    status: ProjectStatus,
    store: &'s ProjectStore,
    host: SharedRenderHost,
    element_id: ElementId,
    list_element_id: ElementId,
    state: SharedListState,
    listener_id: ListenerId,
}

impl<'s> ProjectList<'s> {
    /// Mounts the list at the end of `app` and subscribes it to `store`.
    ///
    /// Projects already in the store are rendered immediately.
    pub fn new(
        store: &'s ProjectStore,
        host: SharedRenderHost,
        status: ProjectStatus,
    ) -> RenderResult<Self> {
        let element_id = format!("{status}-projects");
        let list_element_id = format!("{status}-projects-list");
        {
            let mut guard = lock_host(&host);
            mount(
                &mut *guard,
                &MountRequest::new(LIST_TEMPLATE_ID, ROOT_CONTAINER_ID, InsertPosition::End)
                    .with_element_id(element_id.as_str()),
            )?;
            mount(
                &mut *guard,
                &MountRequest::new(
                    LIST_BODY_TEMPLATE_ID,
                    element_id.as_str(),
                    InsertPosition::End,
                )
                .with_element_id(list_element_id.as_str()),
            )?;
        }

        let state = SharedListState::default();
        let listener_id = {
            let host = Arc::clone(&host);
            let state = Arc::clone(&state);
            let list_element_id = list_element_id.clone();
            store.add_listener(move |snapshot| {
                render_projects(&host, &state, status, &list_element_id, snapshot);
            })
        };

        let list = Self {
            status,
            store,
            host,
            element_id,
            list_element_id,
            state,
            listener_id,
        };
        list.render_content(&mut *lock_host(&list.host))?;
        render_projects(
            &list.host,
            &list.state,
            status,
            &list.list_element_id,
            &store.snapshot(),
        );
        Ok(list)
    }

    pub fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Id of the element holding the cards.
    pub fn list_element_id(&self) -> &str {
        &self.list_element_id
    }

    /// Store revision the list currently shows.
    pub fn rendered_revision(&self) -> Option<u64> {
        self.lock_state().rendered_revision
    }

    /// Projects assigned by the newest snapshot received, in store order.
    pub fn assigned_projects(&self) -> Vec<Project> {
        self.lock_state().assigned.clone()
    }

    /// Rendered cards in display order.
    pub fn items(&self) -> Vec<ProjectItem> {
        self.lock_state().items.clone()
    }

    /// Rendered card for `project_id`.
    pub fn item(&self, project_id: &str) -> Option<ProjectItem> {
        self.lock_state()
            .items
            .iter()
            .find(|item| item.project().id == project_id)
            .cloned()
    }

    pub fn contains(&self, project_id: &str) -> bool {
        self.lock_state()
            .assigned
            .iter()
            .any(|project| project.id == project_id)
    }

    /// Whether a recognized drag currently hovers this list.
    pub fn is_armed(&self) -> bool {
        self.lock_state().armed
    }

    fn heading(&self) -> &'static str {
        match self.status {
            ProjectStatus::Active => "ACTIVE PROJECTS",
            ProjectStatus::Finished => "FINISHED PROJECTS",
        }
    }

    fn set_armed(&self, armed: bool) {
        let mut state = self.lock_state();
        state.armed = armed;
        let mut host = lock_host(&self.host);
        if let Err(err) = host.set_class(&self.list_element_id, DROPPABLE_CLASS, armed) {
            warn!(
                "event=droppable_toggle module=view status=error list={} error={err}",
                self.list_element_id
            );
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, ListState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Component for ProjectList<'_> {
    fn element_id(&self) -> &str {
        &self.element_id
    }

    fn render_content(&self, host: &mut dyn RenderHost) -> RenderResult<()> {
        host.set_text(&self.element_id, SLOT_HEADING, self.heading())
    }
}

impl DragTarget for ProjectList<'_> {
    fn target_key(&self) -> &str {
        &self.element_id
    }

    fn drag_over(&self, transfer: &DataTransfer) -> DragOverOutcome {
        if !transfer.carries_project() {
            return DragOverOutcome::Ignored;
        }
        self.set_armed(true);
        DragOverOutcome::Accepted
    }

    fn drag_leave(&self) {
        self.set_armed(false);
    }

    fn handle_drop(&self, transfer: &DataTransfer) {
        self.set_armed(false);
        // Both locks are released before the store notifies listeners.
        match transfer.get_data(PROJECT_PAYLOAD_TYPE) {
            Some(project_id) => {
                let outcome = self.store.move_project(project_id, self.status);
                debug!(
                    "event=drop_handled module=view status=ok target={} outcome={outcome:?}",
                    self.status
                );
            }
            None => debug!(
                "event=drop_handled module=view status=no_payload target={}",
                self.status
            ),
        }
    }
}

impl Drop for ProjectList<'_> {
    fn drop(&mut self) {
        self.store.remove_listener(self.listener_id);
    }
}

fn render_projects(
    host: &SharedRenderHost,
    state: &SharedListState,
    status: ProjectStatus,
    list_element_id: &str,
    snapshot: &ProjectSnapshot,
) {
    let mut state = state.lock().unwrap_or_else(PoisonError::into_inner);
    if state
        .rendered_revision
        .is_some_and(|rendered| rendered >= snapshot.revision)
    {
        debug!(
            "event=list_render module=view status=stale list={list_element_id} revision={}",
            snapshot.revision
        );
        return;
    }
    state.rendered_revision = Some(snapshot.revision);
    state.assigned = snapshot.with_status(status);
    state.items.clear();

    let mut host = lock_host(host);
    if let Err(err) = host.clear_children(list_element_id) {
        warn!("event=list_render module=view status=error list={list_element_id} error={err}");
        return;
    }
    let assigned = state.assigned.clone();
    for project in assigned {
        match ProjectItem::mount(&mut *host, list_element_id, project) {
            Ok(item) => state.items.push(item),
            Err(err) => warn!(
                "event=item_render module=view status=error list={list_element_id} error={err}"
            ),
        }
    }
    debug!(
        "event=list_render module=view status=ok list={list_element_id} revision={} items={}",
        snapshot.revision,
        state.items.len()
    );
}
