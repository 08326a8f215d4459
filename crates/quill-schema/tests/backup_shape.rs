//! Integration tests: the backup table end to end, through JSON text.
//!
//! Covers acceptance of well-formed backups, rejection of unknown keys at
//! every record level, and the round-trip properties between the wire and
//! native directions.

use proptest::prelude::*;
use serde_json::{json, Value};

use quill_core::{Backup, IdMapping, Note, Notebook, TaskItem};
use quill_schema::{
    backup_table, decode, decode_value, encode, encode_value, ConvertError, TransformError,
    Transformer, BACKUP,
};

fn sample() -> Value {
    json!({
        "version": 1,
        "notes": [
            {
                "id": 1,
                "title": "Hi/Bye",
                "content": "hello",
                "isPinned": true,
                "creationDate": 1_600_000_000_000i64,
                "modifiedDate": 1_600_000_000_500i64,
                "notebookId": 10
            },
            {
                "id": 2,
                "isList": true,
                "taskList": [
                    {"id": 1, "content": "buy milk", "isDone": true},
                    {"id": 2, "content": "walk dog", "isDone": false}
                ],
                "isDeleted": true,
                "deletionDate": 1_600_000_009_000i64,
                "creationDate": 0,
                "modifiedDate": 0
            }
        ],
        "notebooks": [{"id": 10, "name": "Work"}],
        "idMappings": [{
            "mappingId": 1,
            "localNoteId": 1,
            "remoteNoteId": 77,
            "provider": "nextcloud",
            "extras": "",
            "isDeletedLocally": false
        }]
    })
}

fn mismatch_key(err: ConvertError) -> Option<String> {
    match err {
        ConvertError::Shape(TransformError::ShapeMismatch { key, .. }) => key,
        other => panic!("expected a shape mismatch, got {other}"),
    }
}

#[test]
fn minimal_backup_decodes() {
    let backup = decode(
        r#"{"version":1,"notes":[{"id":1,"creationDate":0,"modifiedDate":0,"title":"Hi/Bye","content":"hello"}],"notebooks":[],"idMappings":[]}"#,
    )
    .unwrap();
    assert_eq!(backup.schema_version, 1);
    assert_eq!(backup.notes.len(), 1);
    let note = &backup.notes[0];
    assert_eq!(note.title.as_deref(), Some("Hi/Bye"));
    assert_eq!(note.content.as_deref(), Some("hello"));
    assert_eq!(note.notebook_id, None);
}

#[test]
fn full_sample_decodes_with_native_names() {
    let table = backup_table().unwrap();
    let native = Transformer::new(table).decode(&sample(), BACKUP).unwrap();
    assert_eq!(native["schema_version"], json!(1));
    assert_eq!(native["notes"][0]["creation_date"], json!(1_600_000_000_000i64));
    assert_eq!(native["notes"][1]["task_list"][0]["is_done"], json!(true));
    assert_eq!(native["id_mappings"][0]["remote_note_id"], json!(77));
    assert!(native["notes"][0].get("creationDate").is_none());

    let backup = decode_value(&sample()).unwrap();
    assert_eq!(backup.notes[1].task_list.as_ref().map(Vec::len), Some(2));
    assert_eq!(backup.id_mappings[0].is_being_updated, None);
}

#[test]
fn unknown_top_level_key_is_rejected() {
    let mut doc = sample();
    doc["extra"] = json!(1);
    let err = decode_value(&doc).unwrap_err();
    assert!(err.to_string().contains("\"extra\""));
    assert_eq!(mismatch_key(err).as_deref(), Some("extra"));
}

#[test]
fn unknown_keys_are_rejected_in_every_record() {
    // Task items sit inside the optional task list, so their errors surface
    // as a mismatch of the list itself.
    let cases: [(&str, fn(&mut Value), &str); 4] = [
        ("note", |d: &mut Value| d["notes"][0]["color"] = json!("red"), "color"),
        ("task", |d: &mut Value| d["notes"][1]["taskList"][0]["color"] = json!("red"), "taskList"),
        ("notebook", |d: &mut Value| d["notebooks"][0]["color"] = json!("red"), "color"),
        ("mapping", |d: &mut Value| d["idMappings"][0]["color"] = json!("red"), "color"),
    ];
    for (label, mutate, key) in cases {
        let mut doc = sample();
        mutate(&mut doc);
        let err = decode_value(&doc).unwrap_err();
        assert_eq!(mismatch_key(err).as_deref(), Some(key), "{label}");
    }
}

#[test]
fn missing_required_field_is_rejected() {
    let mut doc = sample();
    doc["notes"][0]
        .as_object_mut()
        .unwrap()
        .remove("modifiedDate");
    let err = decode_value(&doc).unwrap_err();
    assert_eq!(mismatch_key(err).as_deref(), Some("modifiedDate"));
}

#[test]
fn wrong_type_in_optional_field_is_rejected() {
    let mut doc = sample();
    doc["notes"][0]["title"] = json!(12);
    let err = decode_value(&doc).unwrap_err();
    assert_eq!(mismatch_key(err).as_deref(), Some("title"));

    let mut doc = sample();
    doc["notes"][0]["title"] = json!(null);
    assert!(decode_value(&doc).is_err());
}

#[test]
fn fractional_ids_are_rejected() {
    let mut doc = sample();
    doc["notebooks"][0]["id"] = json!(10.5);
    let err = decode_value(&doc).unwrap_err();
    assert_eq!(mismatch_key(err).as_deref(), Some("id"));
}

#[test]
fn non_array_collection_is_rejected() {
    for field in ["notes", "notebooks", "idMappings"] {
        let mut doc = sample();
        doc[field] = json!({});
        let err = decode_value(&doc).unwrap_err();
        assert_eq!(mismatch_key(err).as_deref(), Some(field));
    }
}

#[test]
fn task_error_reports_enclosing_field_without_index() {
    let mut doc = sample();
    doc["notes"][1]["taskList"][1]["isDone"] = json!("no");
    let err = decode_value(&doc).unwrap_err();
    // The union around the task list reports the list as a whole.
    assert_eq!(mismatch_key(err).as_deref(), Some("taskList"));
}

#[test]
fn sample_round_trips_through_text() {
    let backup = decode_value(&sample()).unwrap();
    let text = encode(&backup).unwrap();
    assert_eq!(decode(&text).unwrap(), backup);
    let reparsed: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(reparsed, sample());
}

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 /._-]{0,16}"
}

fn task_item() -> impl Strategy<Value = TaskItem> {
    (any::<i64>(), text(), any::<bool>()).prop_map(|(id, content, is_done)| TaskItem {
        id,
        content,
        is_done,
    })
}

fn note() -> impl Strategy<Value = Note> {
    (
        (
            any::<i64>(),
            proptest::option::of(text()),
            proptest::option::of(text()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
            proptest::option::of(any::<bool>()),
        ),
        (
            proptest::option::of(any::<bool>()),
            any::<i64>(),
            proptest::option::of(any::<i64>()),
            any::<i64>(),
            proptest::option::of(prop::collection::vec(task_item(), 0..4)),
            proptest::option::of(any::<i64>()),
        ),
    )
        .prop_map(
            |(
                (id, title, content, is_pinned, is_hidden, is_deleted, is_local_only),
                (is_list, creation_date, deletion_date, modified_date, task_list, notebook_id),
            )| Note {
                id,
                title,
                content,
                is_pinned,
                is_hidden,
                is_deleted,
                is_local_only,
                is_list,
                creation_date,
                deletion_date,
                modified_date,
                task_list,
                notebook_id,
            },
        )
}

fn notebook() -> impl Strategy<Value = Notebook> {
    (any::<i64>(), text()).prop_map(|(id, name)| Notebook { id, name })
}

fn id_mapping() -> impl Strategy<Value = IdMapping> {
    (
        any::<i64>(),
        any::<i64>(),
        any::<i64>(),
        text(),
        text(),
        any::<bool>(),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(
            |(
                mapping_id,
                local_note_id,
                remote_note_id,
                provider,
                extras,
                is_deleted_locally,
                is_being_updated,
            )| IdMapping {
                mapping_id,
                local_note_id,
                remote_note_id,
                provider,
                extras,
                is_deleted_locally,
                is_being_updated,
            },
        )
}

fn backup() -> impl Strategy<Value = Backup> {
    (
        any::<i64>(),
        prop::collection::vec(note(), 0..5),
        prop::collection::vec(notebook(), 0..3),
        prop::collection::vec(id_mapping(), 0..3),
    )
        .prop_map(|(schema_version, notes, notebooks, id_mappings)| Backup {
            schema_version,
            notes,
            notebooks,
            id_mappings,
        })
}

proptest! {
    /// Encoding then decoding any backup yields the same backup.
    #[test]
    fn encode_then_decode_is_identity(b in backup()) {
        let wire = encode_value(&b).unwrap();
        prop_assert_eq!(decode_value(&wire).unwrap(), b);
    }

    /// Decoding then encoding a wire document reproduces it key for key.
    #[test]
    fn decode_then_encode_restores_wire_names(b in backup()) {
        let wire = encode_value(&b).unwrap();
        let again = encode_value(&decode_value(&wire).unwrap()).unwrap();
        prop_assert_eq!(again, wire);
    }

    /// Any undeclared top-level key fails decoding, whatever its value.
    #[test]
    fn any_extra_top_level_key_fails(
        b in backup(),
        key in "[a-z]{1,12}",
        value in prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::Bool),
            any::<i64>().prop_map(|n| json!(n)),
            "[a-z]{0,8}".prop_map(Value::String),
        ],
    ) {
        prop_assume!(!["version", "notes", "notebooks"].contains(&key.as_str()));
        let mut wire = encode_value(&b).unwrap();
        wire.as_object_mut().unwrap().insert(key.clone(), value);
        let err = decode_value(&wire).unwrap_err();
        prop_assert_eq!(mismatch_key(err), Some(key));
    }
}
