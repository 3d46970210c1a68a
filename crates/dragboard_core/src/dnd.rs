//! Drag-and-drop transfer protocol.
//!
//! # Responsibility
//! - Define the payload carried by one drag gesture.
//! - Define the source (`Draggable`) and target (`DragTarget`) roles.
//! - Drive one gesture through its event sequence (`DragSession`).
//!
//! # Invariants
//! - A project drag carries exactly one payload: the project id as
//!   `text/plain`.
//! - A target arms only for a recognized payload type and only arms itself.
//! - A gesture delivers at most one drop, always before its end.
//! - Only the drop mutates state; every other event is visual.

use log::debug;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Payload type tag recognized by project drop targets.
pub const PROJECT_PAYLOAD_TYPE: &str = "text/plain";

/// Class applied to an armed drop target.
pub const DROPPABLE_CLASS: &str = "droppable";

/// Operations a drag source allows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DropEffect {
    #[default]
    None,
    Copy,
    Move,
    Link,
}

/// Data attached to one drag gesture.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataTransfer {
    /// (type, data) in insertion order; one entry per type.
    entries: Vec<(String, String)>,
    pub effect_allowed: DropEffect,
}

impl DataTransfer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `data` under `kind`, replacing any previous value of that type.
    pub fn set_data(&mut self, kind: &str, data: impl Into<String>) {
        let data = data.into();
        match self.entries.iter_mut().find(|(entry_kind, _)| entry_kind == kind) {
            Some(entry) => entry.1 = data,
            None => self.entries.push((kind.to_string(), data)),
        }
    }

    pub fn get_data(&self, kind: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(entry_kind, _)| entry_kind == kind)
            .map(|(_, data)| data.as_str())
    }

    /// Payload types in insertion order.
    pub fn types(&self) -> Vec<&str> {
        self.entries.iter().map(|(kind, _)| kind.as_str()).collect()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Whether the leading payload type is the project payload type.
    pub fn carries_project(&self) -> bool {
        self.entries
            .first()
            .is_some_and(|(kind, _)| is_project_payload_type(kind))
    }
}

/// Returns whether a payload type tag is the one project targets accept.
pub fn is_project_payload_type(kind: &str) -> bool {
    kind == PROJECT_PAYLOAD_TYPE
}

/// Result of a target inspecting a hovering drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOverOutcome {
    /// Default rejection suppressed; target is armed.
    Accepted,
    /// Payload not recognized; target stays unarmed.
    Ignored,
}

/// Result of delivering a drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// Target handled the drop.
    Delivered,
    /// Target never accepted the drag; the drop was not delivered.
    Rejected,
}

/// Drag source role.
pub trait Draggable {
    /// Attaches the payload and allowed effect.
    fn drag_start(&self, transfer: &mut DataTransfer);

    /// Fires once the gesture ends, dropped or not.
    fn drag_end(&self, transfer: &DataTransfer);
}

/// Drop target role.
pub trait DragTarget {
    /// Stable key used to track this target's armed state.
    fn target_key(&self) -> &str;

    /// Fires repeatedly while a drag hovers the target.
    fn drag_over(&self, transfer: &DataTransfer) -> DragOverOutcome;

    /// Fires when the drag leaves; disarms unconditionally.
    fn drag_leave(&self);

    /// Fires once on the accepting target.
    fn handle_drop(&self, transfer: &DataTransfer);
}

/// Phase of one drag gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    Idle,
    Dragging,
    Dropped,
    Ended,
}

/// Out-of-order gesture events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragError {
    /// Event requires `Dragging`, found another phase.
    NotDragging(DragPhase),
    /// `start` called twice.
    AlreadyStarted(DragPhase),
    /// No rendered card for the project to drag.
    SourceNotFound(String),
}

impl Display for DragError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotDragging(phase) => write!(f, "drag gesture is not in progress: {phase:?}"),
            Self::AlreadyStarted(phase) => write!(f, "drag gesture already started: {phase:?}"),
            Self::SourceNotFound(id) => write!(f, "no draggable card for project: {id}"),
        }
    }
}

impl Error for DragError {}

/// One drag gesture, from start to end.
///
/// Delivers events to sources and targets in the order a UI environment
/// would, and enforces `Idle -> Dragging -> [Dropped ->] Ended`.
#[derive(Debug)]
pub struct DragSession {
    phase: DragPhase,
    transfer: DataTransfer,
    armed: BTreeSet<String>,
    dropped_on: Option<String>,
}

impl Default for DragSession {
    fn default() -> Self {
        Self::new()
    }
}

impl DragSession {
    pub fn new() -> Self {
        Self {
            phase: DragPhase::Idle,
            transfer: DataTransfer::new(),
            armed: BTreeSet::new(),
            dropped_on: None,
        }
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn transfer(&self) -> &DataTransfer {
        &self.transfer
    }

    /// Whether the target with `key` is currently armed.
    pub fn is_armed(&self, key: &str) -> bool {
        self.armed.contains(key)
    }

    /// Key of the target that received the drop, if any.
    pub fn dropped_on(&self) -> Option<&str> {
        self.dropped_on.as_deref()
    }

    /// Starts the gesture on `source`.
    pub fn start(&mut self, source: &dyn Draggable) -> Result<(), DragError> {
        if self.phase != DragPhase::Idle {
            return Err(DragError::AlreadyStarted(self.phase));
        }
        source.drag_start(&mut self.transfer);
        self.phase = DragPhase::Dragging;
        debug!(
            "event=drag_start module=dnd status=ok types={}",
            self.transfer.types().join(",")
        );
        Ok(())
    }

    /// Hovers `target`.
    pub fn over(&mut self, target: &dyn DragTarget) -> Result<DragOverOutcome, DragError> {
        self.require_dragging()?;
        let outcome = target.drag_over(&self.transfer);
        if outcome == DragOverOutcome::Accepted {
            self.armed.insert(target.target_key().to_string());
        } else {
            self.armed.remove(target.target_key());
        }
        Ok(outcome)
    }

    /// Leaves `target`.
    pub fn leave(&mut self, target: &dyn DragTarget) -> Result<(), DragError> {
        self.require_dragging()?;
        target.drag_leave();
        self.armed.remove(target.target_key());
        Ok(())
    }

    /// Releases over `target`.
    ///
    /// Only an armed target receives the drop.
    pub fn drop_on(&mut self, target: &dyn DragTarget) -> Result<DropOutcome, DragError> {
        self.require_dragging()?;
        let key = target.target_key().to_string();
        if !self.armed.contains(key.as_str()) {
            debug!("event=drop module=dnd status=rejected target={key}");
            return Ok(DropOutcome::Rejected);
        }
        target.handle_drop(&self.transfer);
        self.armed.remove(key.as_str());
        self.phase = DragPhase::Dropped;
        debug!("event=drop module=dnd status=ok target={key}");
        self.dropped_on = Some(key);
        Ok(DropOutcome::Delivered)
    }

    /// Ends the gesture on `source`, with or without a drop.
    ///
    /// Targets are not touched: one still armed here was never left, and
    /// [`DragSession::is_armed`] keeps reporting it.
    pub fn end(&mut self, source: &dyn Draggable) -> Result<(), DragError> {
        if !matches!(self.phase, DragPhase::Dragging | DragPhase::Dropped) {
            return Err(DragError::NotDragging(self.phase));
        }
        source.drag_end(&self.transfer);
        self.phase = DragPhase::Ended;
        Ok(())
    }

    fn require_dragging(&self) -> Result<(), DragError> {
        if self.phase == DragPhase::Dragging {
            Ok(())
        } else {
            Err(DragError::NotDragging(self.phase))
        }
    }
}
