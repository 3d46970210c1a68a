//! Board views over a render host.
//!
//! # Responsibility
//! - Turn store snapshots into mounted elements.
//! - Play the drag source and drop target roles.
//! - Collect form input and hand validated values to the store.
//!
//! # Invariants
//! - Views never mutate projects directly; they call store operations.
//! - Every view mounts through [`mount`] and fills itself in
//!   [`Component::render_content`].

use crate::render::{ElementId, MountRequest, RenderHost, RenderResult};
use log::debug;

pub mod board;
pub mod project_input;
pub mod project_item;
pub mod project_list;

/// Text slot holding a heading or title.
pub const SLOT_HEADING: &str = "heading";
pub const SLOT_TITLE: &str = "title";
pub const SLOT_DESCRIPTION: &str = "description";
pub const SLOT_PEOPLE: &str = "people";

/// Shared shape of every mounted view.
pub trait Component {
    /// Id of the view's root element.
    fn element_id(&self) -> &str;

    /// Fills the mounted element from view state.
    fn render_content(&self, host: &mut dyn RenderHost) -> RenderResult<()>;
}

/// Mounts one template for a view.
pub fn mount(host: &mut dyn RenderHost, request: &MountRequest) -> RenderResult<ElementId> {
    let id = host.mount(request)?;
    debug!(
        "event=mount module=view status=ok template={} container={} element={}",
        request.template_id, request.container_id, id
    );
    Ok(id)
}
