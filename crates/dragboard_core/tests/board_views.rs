use dragboard_core::dnd::DROPPABLE_CLASS;
use dragboard_core::view::project_item::item_element_id;
use dragboard_core::view::{SLOT_HEADING, SLOT_PEOPLE, SLOT_TITLE};
use dragboard_core::{
    Board, Component, DataTransfer, DragOverOutcome, DragSession, DragTarget, DropOutcome,
    FormFields, MemoryRenderHost, ProjectList, ProjectStatus, ProjectStore, SharedRenderHost,
    SubmitError, PROJECT_PAYLOAD_TYPE,
};
use std::sync::{Arc, Mutex};

fn memory_host() -> (Arc<Mutex<MemoryRenderHost>>, SharedRenderHost) {
    let memory = Arc::new(Mutex::new(MemoryRenderHost::new()));
    let shared: SharedRenderHost = memory.clone();
    (memory, shared)
}

fn titles(list: &ProjectList<'_>) -> Vec<String> {
    list.assigned_projects()
        .into_iter()
        .map(|project| project.title)
        .collect()
}

#[test]
fn board_mounts_form_first_then_lists() {
    let store = ProjectStore::new();
    let (memory, host) = memory_host();
    let _board = Board::mount(&store, host).unwrap();

    let memory = memory.lock().unwrap();
    let roots: Vec<String> = memory
        .children("app")
        .into_iter()
        .map(|element| element.id.clone())
        .collect();
    assert_eq!(
        roots,
        vec!["user-input", "active-projects", "finished-projects"]
    );
    assert_eq!(
        memory.element("finished-projects").unwrap().text(SLOT_HEADING),
        Some("FINISHED PROJECTS")
    );
}

#[test]
fn lists_filter_by_status() {
    let store = ProjectStore::new();
    let (memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();

    store.add_project("A", "desc1", 3);
    store.add_project("B", "desc2", 4);

    assert_eq!(titles(&board.active), vec!["A", "B"]);
    assert!(titles(&board.finished).is_empty());
    let memory = memory.lock().unwrap();
    assert_eq!(
        memory.child_texts("active-projects-list", SLOT_TITLE),
        vec!["A", "B"]
    );
    assert!(memory.children("finished-projects-list").is_empty());
}

#[test]
fn drag_from_active_to_finished_moves_project() {
    let store = ProjectStore::new();
    let (memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();
    let project = store.add_project("P", "desc for p", 2);
    let item = board.active.item(&project.id).unwrap();
    let finished_list = board.finished.list_element_id();

    let mut session = DragSession::new();
    session.start(&item).unwrap();
    assert_eq!(
        session.transfer().get_data(PROJECT_PAYLOAD_TYPE),
        Some(project.id.as_str())
    );
    assert_eq!(session.over(&board.finished).unwrap(), DragOverOutcome::Accepted);
    assert!(board.finished.is_armed());
    assert!(memory
        .lock()
        .unwrap()
        .element(finished_list)
        .unwrap()
        .has_class(DROPPABLE_CLASS));
    assert_eq!(session.drop_on(&board.finished).unwrap(), DropOutcome::Delivered);
    session.end(&item).unwrap();

    assert_eq!(store.get(&project.id).unwrap().status, ProjectStatus::Finished);
    assert!(!board.active.contains(&project.id));
    assert!(board.finished.contains(&project.id));
    assert!(!board.finished.is_armed());

    let memory = memory.lock().unwrap();
    assert!(memory.children(board.active.list_element_id()).is_empty());
    let card = memory
        .element(&item_element_id(finished_list, &project.id))
        .unwrap();
    assert_eq!(card.parent.as_deref(), Some(finished_list));
    assert_eq!(card.text(SLOT_PEOPLE), Some("2 people assigned"));
    assert!(!memory
        .element("finished-projects-list")
        .unwrap()
        .has_class(DROPPABLE_CLASS));
}

#[test]
fn board_drag_to_round_trips_between_lists() {
    let store = ProjectStore::new();
    let (_memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();
    let a = store.add_project("A", "desc1", 3);
    let b = store.add_project("B", "desc2", 4);

    assert_eq!(board.drag_to(&a.id, ProjectStatus::Finished).unwrap(), DropOutcome::Delivered);
    assert_eq!(titles(&board.active), vec!["B"]);
    assert_eq!(titles(&board.finished), vec!["A"]);

    board.drag_to(&a.id, ProjectStatus::Active).unwrap();
    assert_eq!(titles(&board.active), vec!["A", "B"]);
    assert!(board.finished.items().is_empty());
    let rendered: Vec<String> = board
        .active
        .items()
        .iter()
        .map(|item| item.project().id.clone())
        .collect();
    assert_eq!(rendered, vec![a.id.clone(), b.id.clone()]);
    assert!(board.drag_to("missing", ProjectStatus::Active).is_err());
}

#[test]
fn drop_on_own_list_does_not_notify() {
    let store = ProjectStore::new();
    let (_memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();
    let project = store.add_project("A", "desc1", 3);
    let revision = store.revision();

    board.drag_to(&project.id, ProjectStatus::Active).unwrap();

    assert_eq!(store.revision(), revision);
    assert_eq!(titles(&board.active), vec!["A"]);
}

#[test]
fn foreign_payload_leaves_target_unarmed() {
    let store = ProjectStore::new();
    let (_memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();
    let project = store.add_project("A", "desc1", 3);

    let mut transfer = DataTransfer::new();
    transfer.set_data("text/html", project.id.as_str());
    assert_eq!(board.finished.drag_over(&transfer), DragOverOutcome::Ignored);
    assert!(!board.finished.is_armed());

    let empty = DataTransfer::new();
    assert_eq!(board.finished.drag_over(&empty), DragOverOutcome::Ignored);
    board.finished.drag_leave();
    assert!(!board.finished.is_armed());
    assert_eq!(store.get(&project.id).unwrap().status, ProjectStatus::Active);
}

#[test]
fn drag_leave_disarms_target() {
    let store = ProjectStore::new();
    let (memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();
    let project = store.add_project("A", "desc1", 3);
    let item = board.active.item(&project.id).unwrap();

    let mut session = DragSession::new();
    session.start(&item).unwrap();
    session.over(&board.finished).unwrap();
    session.leave(&board.finished).unwrap();
    session.end(&item).unwrap();

    assert!(!board.finished.is_armed());
    assert!(!memory
        .lock()
        .unwrap()
        .element("finished-projects-list")
        .unwrap()
        .has_class(DROPPABLE_CLASS));
    assert_eq!(store.get(&project.id).unwrap().status, ProjectStatus::Active);
}

#[test]
fn form_submit_adds_project_and_resets_fields() {
    let store = ProjectStore::new();
    let (memory, host) = memory_host();
    let mut board = Board::mount(&store, host).unwrap();

    board.input.set_title("Launch");
    board.input.set_description("launch the board");
    board.input.set_people("3");
    let project = board.input.submit().unwrap();

    assert_eq!(project.people, 3);
    assert_eq!(project.status, ProjectStatus::Active);
    assert!(board.input.fields().is_empty());
    assert_eq!(titles(&board.active), vec!["Launch"]);
    assert_eq!(
        memory
            .lock()
            .unwrap()
            .element(board.input.element_id())
            .unwrap()
            .text(SLOT_TITLE),
        Some("")
    );
}

#[test]
fn invalid_submission_is_rejected_without_mutation() {
    let store = ProjectStore::new();
    let (_memory, host) = memory_host();
    let mut board = Board::mount(&store, host).unwrap();
    let fields = FormFields::new("Launch", "abcd", "3");

    board.input.fill(fields.clone());
    let err = board.input.submit().unwrap_err();

    assert!(matches!(err, SubmitError::InvalidInput { .. }));
    assert!(store.is_empty());
    assert_eq!(board.input.fields(), &fields);
    assert_eq!(store.revision(), 0);
}

#[test]
fn validation_boundaries_for_people_and_description() {
    let store = ProjectStore::new();
    let (_memory, host) = memory_host();
    let mut board = Board::mount(&store, host).unwrap();

    for (people, ok) in [("0", false), ("1", true), ("6", true), ("7", false), ("", false)] {
        board.input.fill(FormFields::new("T", "valid description", people));
        assert_eq!(board.input.submit().is_ok(), ok, "people={people:?}");
    }
    for (description, ok) in [("abcd", false), ("abcde", true)] {
        board.input.fill(FormFields::new("T", description, "2"));
        assert_eq!(board.input.submit().is_ok(), ok, "description={description:?}");
    }
    assert_eq!(store.len(), 3);
}

#[test]
fn list_mounted_late_renders_existing_projects() {
    let store = ProjectStore::new();
    let a = store.add_project("A", "desc1", 3);
    store.move_project(&a.id, ProjectStatus::Finished);
    let (_memory, host) = memory_host();

    let finished = ProjectList::new(&store, host, ProjectStatus::Finished).unwrap();

    assert_eq!(titles(&finished), vec!["A"]);
    assert_eq!(finished.element_id(), "finished-projects");
}

#[test]
fn dropping_a_list_unsubscribes_it() {
    let store = ProjectStore::new();
    let (_memory, host) = memory_host();
    {
        let _board = Board::mount(&store, host).unwrap();
        assert_eq!(store.listener_count(), 2);
    }
    assert_eq!(store.listener_count(), 0);
}

#[test]
fn list_keeps_newest_state_when_listener_moves_during_add() {
    let store = Arc::new(ProjectStore::new());
    let weak = Arc::downgrade(&store);
    store.add_listener(move |snapshot| {
        if snapshot.revision != 1 {
            return;
        }
        if let (Some(store), Some(project)) = (weak.upgrade(), snapshot.projects().first()) {
            store.move_project(&project.id, ProjectStatus::Finished);
        }
    });
    let (memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();

    let project = store.add_project("P", "desc for p", 2);

    assert_eq!(store.revision(), 2);
    assert_eq!(store.get(&project.id).unwrap().status, ProjectStatus::Finished);
    assert!(!board.active.contains(&project.id));
    assert!(board.finished.contains(&project.id));
    assert_eq!(board.active.rendered_revision(), Some(2));
    assert_eq!(board.finished.rendered_revision(), Some(2));
    let memory = memory.lock().unwrap();
    assert!(memory.children(board.active.list_element_id()).is_empty());
    assert_eq!(
        memory.child_texts(board.finished.list_element_id(), SLOT_TITLE),
        vec!["P"]
    );
}

#[test]
fn lists_match_store_after_concurrent_adds() {
    let store = ProjectStore::new();
    let (memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();

    std::thread::scope(|scope| {
        for worker in 0..4 {
            let store = &store;
            scope.spawn(move || {
                for n in 0..25 {
                    let project = store.add_project(format!("W{worker}-{n}"), "concurrent", 1);
                    if n % 5 == 0 {
                        store.move_project(&project.id, ProjectStatus::Finished);
                    }
                }
            });
        }
    });

    let snapshot = store.snapshot();
    assert_eq!(snapshot.len(), 100);
    for status in ProjectStatus::ALL {
        let list = board.list(status);
        assert_eq!(list.rendered_revision(), Some(snapshot.revision));
        assert_eq!(list.assigned_projects(), snapshot.with_status(status));
        assert_eq!(
            memory.lock().unwrap().children(list.list_element_id()).len(),
            snapshot.with_status(status).len()
        );
    }
}

#[test]
fn ending_without_leave_keeps_target_armed_in_session_and_view() {
    let store = ProjectStore::new();
    let (_memory, host) = memory_host();
    let board = Board::mount(&store, host).unwrap();
    let project = store.add_project("A", "desc1", 3);
    let item = board.active.item(&project.id).unwrap();

    let mut session = DragSession::new();
    session.start(&item).unwrap();
    session.over(&board.finished).unwrap();
    session.end(&item).unwrap();

    assert!(session.is_armed(board.finished.target_key()));
    assert!(board.finished.is_armed());

    board.finished.drag_leave();
    assert!(!board.finished.is_armed());
}
