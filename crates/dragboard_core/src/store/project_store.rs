//! Reactive project store.
//!
//! # Responsibility
//! - Own the canonical ordered project collection.
//! - Notify registered listeners with a snapshot after every mutation.
//!
//! # Invariants
//! - Project ids are unique within one store.
//! - Collection order is insertion order; moves mutate in place.
//! - Listeners fire synchronously in registration order, and only when the
//!   collection actually changed.
//! - Listeners receive copies; nothing they hold aliases store state.
//! - No internal lock is held while listeners run, so a listener may call
//!   back into the store. A panicking listener propagates to the caller of
//!   the mutation and skips the listeners after it.

use crate::model::project::{Project, ProjectId, ProjectStatus};
use log::{debug, info};
use once_cell::sync::OnceCell;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

static GLOBAL_STORE: OnceCell<ProjectStore> = OnceCell::new();

type Listener = Arc<dyn Fn(&ProjectSnapshot) + Send + Sync>;

/// Handle returned by [`ProjectStore::add_listener`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Point-in-time copy of the project collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectSnapshot {
    /// Incremented once per applied mutation.
    pub revision: u64,
    projects: Vec<Project>,
}

impl ProjectSnapshot {
    /// All projects in insertion order.
    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    /// Projects with `status`, in insertion order.
    pub fn with_status(&self, status: ProjectStatus) -> Vec<Project> {
        self.projects
            .iter()
            .filter(|project| project.has_status(status))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|project| project.id == id)
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    /// Consumes the snapshot, returning the owned collection.
    pub fn into_projects(self) -> Vec<Project> {
        self.projects
    }
}

/// Result of [`ProjectStore::move_project`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Status changed and listeners were notified.
    Moved,
    /// Project already had the requested status.
    Unchanged,
    /// No project with the given id.
    NotFound,
}

#[derive(Default)]
struct StoreState {
    projects: Vec<Project>,
    /// id -> position in `projects`.
    index: HashMap<ProjectId, usize>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    revision: u64,
}

impl StoreState {
    fn snapshot(&self) -> ProjectSnapshot {
        ProjectSnapshot {
            revision: self.revision,
            projects: self.projects.clone(),
        }
    }

    fn listeners(&self) -> Vec<Listener> {
        self.listeners
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect()
    }
}

/// Process-wide project state with observer notification.
///
/// Use [`ProjectStore::global`] for the shared instance, or
/// [`ProjectStore::new`] to inject an isolated store.
#[derive(Default)]
pub struct ProjectStore {
    state: Mutex<StoreState>,
}

impl ProjectStore {
    /// Creates an empty, independent store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the shared store, creating it on first access.
    pub fn global() -> &'static ProjectStore {
        GLOBAL_STORE.get_or_init(|| {
            info!("event=store_init module=store status=ok");
            ProjectStore::new()
        })
    }

    /// Appends a listener. Registration never de-duplicates.
    pub fn add_listener<F>(&self, listener: F) -> ListenerId
    where
        F: Fn(&ProjectSnapshot) + Send + Sync + 'static,
    {
        let mut state = self.lock();
        let id = ListenerId(state.next_listener_id);
        state.next_listener_id += 1;
        state.listeners.push((id, Arc::new(listener)));
        debug!(
            "event=listener_added module=store status=ok listeners={}",
            state.listeners.len()
        );
        id
    }

    /// Unregisters a listener. Returns `false` when `id` is unknown.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut state = self.lock();
        let before = state.listeners.len();
        state.listeners.retain(|(listener_id, _)| *listener_id != id);
        state.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.lock().listeners.len()
    }

    /// Creates an active project, appends it and notifies listeners.
    ///
    /// Inputs are expected to be validated by the caller.
    pub fn add_project(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        people: u32,
    ) -> Project {
        let title = title.into();
        let description = description.into();

        let (project, snapshot, listeners) = {
            let mut state = self.lock();
            let mut project = Project::new(title.as_str(), description.as_str(), people);
            while state.index.contains_key(project.id.as_str()) {
                project = Project::new(title.as_str(), description.as_str(), people);
            }
            let position = state.projects.len();
            state.index.insert(project.id.clone(), position);
            state.projects.push(project.clone());
            state.revision += 1;
            (project, state.snapshot(), state.listeners())
        };

        info!(
            "event=project_added module=store status=ok project_id={} revision={} listeners={}",
            project.id,
            snapshot.revision,
            listeners.len()
        );
        notify(&listeners, &snapshot);
        project
    }

    /// Moves a project to `status`.
    ///
    /// Unknown ids and same-status moves are silent no-ops.
    pub fn move_project(&self, id: &str, status: ProjectStatus) -> MoveOutcome {
        let (snapshot, listeners) = {
            let mut state = self.lock();
            let Some(position) = state.index.get(id).copied() else {
                debug!("event=project_move module=store status=not_found project_id={id}");
                return MoveOutcome::NotFound;
            };
            let Some(project) = state.projects.get_mut(position) else {
                return MoveOutcome::NotFound;
            };
            if project.status == status {
                debug!(
                    "event=project_move module=store status=unchanged project_id={id} \
                     target={status}"
                );
                return MoveOutcome::Unchanged;
            }
            project.status = status;
            state.revision += 1;
            (state.snapshot(), state.listeners())
        };

        info!(
            "event=project_moved module=store status=ok project_id={id} target={status} \
             revision={}",
            snapshot.revision
        );
        notify(&listeners, &snapshot);
        MoveOutcome::Moved
    }

    /// Returns a copy of the current collection.
    pub fn snapshot(&self) -> ProjectSnapshot {
        self.lock().snapshot()
    }

    /// Returns a copy of one project.
    pub fn get(&self, id: &str) -> Option<Project> {
        let state = self.lock();
        let position = *state.index.get(id)?;
        state.projects.get(position).cloned()
    }

    pub fn len(&self) -> usize {
        self.lock().projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().projects.is_empty()
    }

    pub fn revision(&self) -> u64 {
        self.lock().revision
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        // Listeners run outside the lock, so poisoning can only come from a
        // panic inside the store itself; the state is still consistent.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn notify(listeners: &[Listener], snapshot: &ProjectSnapshot) {
    for listener in listeners {
        listener(snapshot);
    }
}
