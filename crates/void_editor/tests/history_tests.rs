//! End-to-end undo/redo behavior through `SceneEditor`.

use void_editor::{CommandError, EditorConfig, SceneEditor};
use void_scene::{FieldMap, FieldValue, GameObject, ObjectId, Scene, SceneMetadata, Transform, TRANSFORM};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn id(s: &str) -> ObjectId {
    ObjectId::from(s)
}

/// `root` owns `arm` which owns `hand`; `lamp` is a sibling root between them.
fn rig_scene() -> Scene {
    let objects = vec![
        GameObject::with_id("root", "Root"),
        GameObject::with_id("arm", "Arm").with_transform(Transform::from_position(10.0, 0.0).with_parent("root")),
        GameObject::with_id("lamp", "Lamp"),
        GameObject::with_id("hand", "Hand").with_transform(Transform::from_position(5.0, 0.0).with_parent("arm")),
        GameObject::with_id("crate", "Crate").with_component(
            "RigidBody",
            [("mass".to_string(), FieldValue::Float(10.0))].into_iter().collect(),
        ),
    ];
    Scene::from_objects(SceneMetadata::default(), objects).unwrap()
}

#[test]
fn undo_all_then_redo_all_restores_state() {
    init_logging();
    let mut editor = SceneEditor::with_config(rig_scene(), EditorConfig::new().with_merge_field_edits(false));
    let initial = editor.scene().clone();

    let spawned = editor.create_object(GameObject::with_id("spark", "Spark"), Some(1)).unwrap();
    editor.rename(&id("lamp"), "Torch").unwrap();
    editor.reparent(&id("lamp"), Some(spawned.clone())).unwrap();
    editor.set_field(&id("crate"), "RigidBody", "mass", 2.5_f64).unwrap();
    editor.set_field(&id("crate"), "RigidBody", "mass", 4.0_f64).unwrap();
    editor.add_component(&id("hand"), "Grip", FieldMap::new()).unwrap();
    editor.remove_component(&id("crate"), "RigidBody").unwrap();
    editor.delete_object(&id("arm")).unwrap();
    let edited = editor.scene().clone();

    let mut undone = 0;
    while editor.undo() {
        undone += 1;
    }
    assert_eq!(undone, 8);
    assert_eq!(editor.scene(), &initial);

    while editor.redo() {}
    assert_eq!(editor.scene(), &edited);
}

#[test]
fn delete_subtree_restores_original_indices() {
    let mut editor = SceneEditor::new(rig_scene());
    let before = editor.scene().clone();

    assert_eq!(editor.delete_object(&id("root")).unwrap(), 3);
    let remaining: Vec<_> = editor.scene().objects().iter().map(|o| o.id().as_str()).collect();
    assert_eq!(remaining, ["lamp", "crate"]);

    assert!(editor.undo());
    assert_eq!(editor.scene(), &before);
    assert_eq!(editor.scene().position(&id("hand")), Some(3));
}

#[test]
fn consecutive_field_edits_collapse() {
    let mut editor = SceneEditor::new(rig_scene());
    let lamp = id("lamp");

    for step in 1..=5_i32 {
        editor.set_field(&lamp, TRANSFORM, "rotation", f64::from(step) * 10.0).unwrap();
    }
    assert_eq!(editor.history().undo_count(), 1);
    assert_eq!(editor.undo_description(), Some("Set Transform.rotation"));

    assert!(editor.undo());
    assert_eq!(editor.find(&lamp).unwrap().transform.rotation, 0.0);
    assert!(!editor.can_undo());

    assert!(editor.redo());
    assert_eq!(editor.find(&lamp).unwrap().transform.rotation, 50.0);
}

#[test]
fn merged_edit_leaves_redo_in_place() {
    let mut editor = SceneEditor::new(rig_scene());
    let lamp = id("lamp");

    editor.set_field(&lamp, TRANSFORM, "rotation", 10.0_f64).unwrap();
    editor.rename(&lamp, "Torch").unwrap();
    assert!(editor.undo());
    editor.set_field(&lamp, TRANSFORM, "rotation", 20.0_f64).unwrap();

    assert_eq!(editor.history().undo_count(), 1);
    assert_eq!(editor.history().redo_count(), 1);
    assert_eq!(editor.redo_description(), Some("Rename Object"));

    assert!(editor.undo());
    assert_eq!(editor.find(&lamp).unwrap().transform.rotation, 0.0);
}

#[test]
fn edits_to_different_fields_do_not_merge() {
    let mut editor = SceneEditor::new(rig_scene());
    let lamp = id("lamp");
    editor.set_field(&lamp, TRANSFORM, "rotation", 10.0_f64).unwrap();
    editor.set_field(&lamp, TRANSFORM, "scale", [2.0, 2.0]).unwrap();
    editor.set_field(&id("arm"), TRANSFORM, "rotation", 10.0_f64).unwrap();
    assert_eq!(editor.history().undo_count(), 3);
}

#[test]
fn self_reparent_is_rejected() {
    let mut editor = SceneEditor::new(rig_scene());
    let arm = id("arm");

    let err = editor.reparent(&arm, Some(arm.clone())).unwrap_err();
    assert_eq!(err, CommandError::SelfParent(arm.clone()));
    assert_eq!(editor.find(&arm).unwrap().parent_id(), Some(&id("root")));
    assert!(!editor.can_undo());
}

#[test]
fn reparent_under_descendant_is_rejected() {
    let mut editor = SceneEditor::new(rig_scene());
    let err = editor.reparent(&id("root"), Some(id("hand"))).unwrap_err();
    assert!(matches!(err, CommandError::CycleDetected { .. }));
    assert!(editor.find(&id("root")).unwrap().parent_id().is_none());
    assert!(!editor.can_undo());
}

#[test]
fn capacity_evicts_oldest_entry() {
    let mut editor = SceneEditor::with_config(rig_scene(), EditorConfig::new().with_history_capacity(2));

    editor.rename(&id("lamp"), "A").unwrap();
    editor.rename(&id("lamp"), "B").unwrap();
    editor.rename(&id("lamp"), "C").unwrap();
    assert_eq!(editor.history().undo_count(), 2);

    assert!(editor.undo());
    assert!(editor.undo());
    assert!(!editor.undo());
    assert_eq!(editor.find(&id("lamp")).unwrap().name, "A");
}

#[test]
fn new_push_clears_redo() {
    let mut editor = SceneEditor::new(rig_scene());
    let lamp = id("lamp");

    editor.rename(&lamp, "A").unwrap();
    editor.rename(&lamp, "B").unwrap();
    assert!(editor.undo());
    editor.rename(&lamp, "C").unwrap();

    assert!(!editor.can_redo());
    assert!(!editor.redo());
    assert_eq!(editor.find(&lamp).unwrap().name, "C");
}

#[test]
fn world_transform_follows_undo() {
    let mut editor = SceneEditor::new(rig_scene());
    let hand = id("hand");
    assert_eq!(editor.world_transform(&hand).unwrap().position.x, 15.0);

    editor.set_field(&id("root"), TRANSFORM, "position", [100.0, 100.0]).unwrap();
    assert_eq!(editor.world_transform(&hand).unwrap().position.x, 115.0);

    editor.undo();
    assert_eq!(editor.world_transform(&hand).unwrap().position.x, 15.0);
}

#[test]
fn missing_targets_are_rejected() {
    let mut editor = SceneEditor::new(rig_scene());
    let ghost = id("ghost");
    assert!(matches!(editor.rename(&ghost, "Boo"), Err(CommandError::EntityNotFound(_))));
    assert!(matches!(editor.delete_object(&ghost), Err(CommandError::EntityNotFound(_))));
    assert!(matches!(
        editor.reparent(&id("lamp"), Some(ghost)),
        Err(CommandError::ParentNotFound(_))
    ));
    assert!(!editor.can_undo());
}
