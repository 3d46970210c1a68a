//! Render host contract.
//!
//! # Responsibility
//! - Describe the minimal element operations views need: mount a template
//!   into a container, fill text slots, clear children, toggle classes.
//! - Keep views independent from any concrete UI toolkit.
//!
//! # Invariants
//! - Element ids are unique within one host.
//! - `mount` never replaces an existing element.

use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

pub mod memory;

pub use memory::{MemoryElement, MemoryRenderHost};

/// Identifier of a mounted element.
pub type ElementId = String;

/// Render host shared between views and store listeners.
pub type SharedRenderHost = Arc<Mutex<dyn RenderHost + Send>>;

/// Where a mounted element lands among the container's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertPosition {
    /// Before existing children.
    Start,
    /// After existing children.
    End,
}

/// Request to instantiate one template inside a container.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountRequest {
    pub template_id: String,
    pub container_id: ElementId,
    pub position: InsertPosition,
    /// Explicit element id; hosts generate one when absent.
    pub element_id: Option<ElementId>,
}

impl MountRequest {
    pub fn new(
        template_id: impl Into<String>,
        container_id: impl Into<ElementId>,
        position: InsertPosition,
    ) -> Self {
        Self {
            template_id: template_id.into(),
            container_id: container_id.into(),
            position,
            element_id: None,
        }
    }

    pub fn with_element_id(mut self, element_id: impl Into<ElementId>) -> Self {
        self.element_id = Some(element_id.into());
        self
    }
}

/// Render host errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    ContainerNotFound(ElementId),
    ElementNotFound(ElementId),
    DuplicateElementId(ElementId),
    UnknownTemplate(String),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ContainerNotFound(id) => write!(f, "container not found: {id}"),
            Self::ElementNotFound(id) => write!(f, "element not found: {id}"),
            Self::DuplicateElementId(id) => write!(f, "element id already mounted: {id}"),
            Self::UnknownTemplate(id) => write!(f, "unknown template: {id}"),
        }
    }
}

impl Error for RenderError {}

pub type RenderResult<T> = Result<T, RenderError>;

/// Element operations provided by the UI environment.
pub trait RenderHost {
    /// Instantiates a template and attaches it to a container.
    fn mount(&mut self, request: &MountRequest) -> RenderResult<ElementId>;

    /// Sets the text of a named slot inside an element.
    fn set_text(&mut self, element_id: &str, slot: &str, text: &str) -> RenderResult<()>;

    /// Removes every descendant of an element.
    fn clear_children(&mut self, element_id: &str) -> RenderResult<()>;

    /// Adds (`enabled = true`) or removes a class on an element.
    fn set_class(&mut self, element_id: &str, class: &str, enabled: bool) -> RenderResult<()>;
}

/// Locks a shared host, recovering from poisoning.
pub fn lock_host(host: &SharedRenderHost) -> MutexGuard<'_, dyn RenderHost + Send + 'static> {
    host.lock().unwrap_or_else(PoisonError::into_inner)
}
