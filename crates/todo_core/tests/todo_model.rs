use std::collections::HashSet;
use todo_core::{FixedClock, FixedIdGenerator, NewTodo, Todo, TodoRecord, TodoStatus};
use uuid::Uuid;

const DEC_01: i64 = 1_606_780_800_000;
const DEC_02: i64 = 1_606_867_200_000;

#[test]
fn future_due_is_pending_and_past_due_is_late() {
    let ids = FixedIdGenerator::new("id-1");
    let clock = FixedClock(DEC_01);

    let ahead = Todo::new_with(NewTodo::new("future", Some(DEC_02)), &clock, &ids);
    assert_eq!(ahead.status(), TodoStatus::Pending);

    let behind = Todo::new_with(NewTodo::new("past", Some(DEC_01 - 1)), &clock, &ids);
    assert_eq!(behind.status(), TodoStatus::Late);
}

#[test]
fn due_exactly_now_is_late() {
    let todo = Todo::new_with(
        NewTodo::new("boundary", Some(DEC_01)),
        &FixedClock(DEC_01),
        &FixedIdGenerator::new("id-1"),
    );
    assert_eq!(todo.status(), TodoStatus::Late);
}

#[test]
fn missing_due_is_late() {
    let todo = Todo::new(NewTodo::new("", None));
    assert_eq!(todo.status(), TodoStatus::Late);
    assert!(!todo.is_valid());
}

#[test]
fn status_is_fixed_at_construction() {
    let todo = Todo::new_with(
        NewTodo::new("trip", Some(DEC_02)),
        &FixedClock(DEC_01),
        &FixedIdGenerator::new("id-1"),
    );
    let rebuilt = Todo::from(todo.to_record());
    assert_eq!(rebuilt.status(), TodoStatus::Pending);
}

#[test]
fn supplied_status_and_id_are_kept() {
    let input = NewTodo {
        text: "imported".to_string(),
        when: Some(DEC_02),
        status: Some(TodoStatus::Late),
        id: Some("de175091-e390-420b-b08c-747f72953203".to_string()),
    };
    let todo = Todo::new_with(input, &FixedClock(DEC_01), &FixedIdGenerator::new("unused"));

    assert_eq!(todo.status(), TodoStatus::Late);
    assert_eq!(todo.id(), "de175091-e390-420b-b08c-747f72953203");
}

#[test]
fn default_ids_are_distinct_uuids() {
    let ids: HashSet<String> = (0..32)
        .map(|_| Todo::new(NewTodo::new("x", Some(DEC_01))).id().to_string())
        .collect();

    assert_eq!(ids.len(), 32);
    for id in &ids {
        assert!(!id.is_empty());
        assert!(Uuid::parse_str(id).is_ok());
    }
}

#[test]
fn construction_does_not_validate() {
    let todo = Todo::new(NewTodo::default());
    assert_eq!(todo.text(), "");
    assert_eq!(todo.when(), None);
    assert!(!todo.id().is_empty());
    assert!(!todo.is_valid());
}

#[test]
fn validity_depends_only_on_text_and_when() {
    let clock = FixedClock(DEC_01);
    let ids = FixedIdGenerator::new("id-1");

    assert!(Todo::new_with(NewTodo::new("a", Some(0)), &clock, &ids).is_valid());
    assert!(Todo::new_with(NewTodo::new(" ", Some(DEC_01)), &clock, &ids).is_valid());
    assert!(!Todo::new_with(NewTodo::new("", Some(DEC_01)), &clock, &ids).is_valid());
    assert!(!Todo::new_with(NewTodo::new("a", None), &clock, &ids).is_valid());
}

#[test]
fn record_conversion_keeps_all_fields() {
    let record = TodoRecord {
        text: "I must plan my trip to Europe".to_string(),
        when: Some(1_701_432_000_000),
        status: TodoStatus::Late,
        id: "de175091-e390-420b-b08c-747f72953203".to_string(),
    };

    let todo = Todo::from(record.clone());
    assert_eq!(todo.to_record(), record);
    assert_eq!(TodoRecord::from(todo), record);
}

#[test]
fn todo_serialization_uses_expected_wire_fields() {
    let todo = Todo::new_with(
        NewTodo::new("I must fix my old car", Some(DEC_02)),
        &FixedClock(DEC_01),
        &FixedIdGenerator::new("fec3e17b-6d1b-4b6a-b5b7-dfb824498d31"),
    );

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "text": "I must fix my old car",
            "when": DEC_02,
            "status": "pending",
            "id": "fec3e17b-6d1b-4b6a-b5b7-dfb824498d31"
        })
    );

    let decoded: Todo = serde_json::from_value(json).unwrap();
    assert_eq!(decoded, todo);
}
