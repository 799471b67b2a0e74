use todo_core::{NewTodo, Todo, TodoPatch};

#[test]
fn todo_serialization_omits_unset_description() {
    let todo = Todo::from_new(1, &NewTodo::new("a"));

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "id": 1, "title": "a", "completed": false })
    );
}

#[test]
fn todo_serialization_includes_set_description() {
    let todo = Todo::from_new(2, &NewTodo::new("b").with_description("d"));

    let json = serde_json::to_value(&todo).unwrap();
    assert_eq!(json["description"], "d");
    assert_eq!(json["completed"], false);
}

#[test]
fn new_todo_deserializes_without_description() {
    let input: NewTodo = serde_json::from_str(r#"{"title":"a"}"#).unwrap();
    assert_eq!(input, NewTodo::new("a"));
}

#[test]
fn patch_missing_key_is_absent_and_null_clears() {
    let absent: TodoPatch = serde_json::from_str(r#"{"completed":true}"#).unwrap();
    assert_eq!(absent.description, None);
    assert_eq!(absent.completed, Some(true));
    assert_eq!(absent.title, None);

    let cleared: TodoPatch = serde_json::from_str(r#"{"description":null}"#).unwrap();
    assert_eq!(cleared.description, Some(None));

    let emptied: TodoPatch = serde_json::from_str(r#"{"description":""}"#).unwrap();
    assert_eq!(emptied.description, Some(Some(String::new())));
}

#[test]
fn empty_patch_object_has_no_fields() {
    let patch: TodoPatch = serde_json::from_str("{}").unwrap();
    assert!(patch.is_empty());
}

#[test]
fn payloads_reject_unknown_fields() {
    let patch = serde_json::from_str::<TodoPatch>(r#"{"complete":true}"#).unwrap_err();
    assert!(patch.to_string().contains("unknown field"));

    let create = serde_json::from_str::<NewTodo>(r#"{"title":"a","desc":"d"}"#).unwrap_err();
    assert!(create.to_string().contains("unknown field"));
}
