//! Integration tests for snapview.
//!
//! These tests drive the sample apps through the public API, verifying that
//! the history, the view tree, the backend and the testing framework work
//! together correctly.

use std::time::Duration;

use pretty_assertions::assert_eq;

use snapview::backend::WidgetEvent;
use snapview::event::KeyEvent;
use snapview::record::{ActionLog, Player, Recorder};
use snapview::samples::{level, todo};
use snapview::testing::Pilot;
use snapview::AppConfig;

// ---------------------------------------------------------------------------
// Todo sample
// ---------------------------------------------------------------------------

fn todo_pilot() -> Pilot<std::sync::Arc<todo::TodoData>> {
    let mut pilot = Pilot::new(todo::build_app(AppConfig::new().with_title("Todo")));
    pilot.tick();
    pilot
}

fn add_todo(pilot: &mut Pilot<std::sync::Arc<todo::TodoData>>, content: &str) {
    assert!(pilot.commit_text("todo-input", content));
    pilot.tick();
}

#[test]
fn todo_add_items_updates_counter() {
    let mut pilot = todo_pilot();
    assert_eq!(pilot.text_of("done-counter").as_deref(), Some("0/0"));

    add_todo(&mut pilot, "milk");
    add_todo(&mut pilot, "eggs");
    assert_eq!(pilot.text_of("done-counter").as_deref(), Some("0/2"));
    assert_eq!(pilot.text_of("todo-input").as_deref(), Some(""));
    assert_eq!(pilot.texts_of("todo-content"), vec!["milk", "eggs"]);
    assert_eq!(pilot.history().len(), 3);
}

#[test]
fn todo_empty_input_is_ignored() {
    let mut pilot = todo_pilot();
    pilot.commit_text("todo-input", "");
    pilot.tick();
    assert_eq!(pilot.history().len(), 1);
    assert_eq!(pilot.count("todo-item"), 0);
}

#[test]
fn todo_toggle_undo_redo() {
    let mut pilot = todo_pilot();
    add_todo(&mut pilot, "milk");
    add_todo(&mut pilot, "eggs");

    assert!(pilot.toggle("todo-done", 1, true));
    pilot.tick();
    assert_eq!(pilot.text_of("done-counter").as_deref(), Some("1/2"));

    assert!(pilot.press_key(KeyEvent::ctrl('z')));
    pilot.tick();
    assert_eq!(pilot.text_of("done-counter").as_deref(), Some("0/2"));
    assert!(!pilot.widget("todo-done").unwrap().selected);

    assert!(pilot.press_key(KeyEvent::ctrl('y')));
    pilot.tick();
    assert_eq!(pilot.text_of("done-counter").as_deref(), Some("1/2"));
}

#[test]
fn todo_rows_survive_reorder_by_undo() {
    let mut pilot = todo_pilot();
    add_todo(&mut pilot, "milk");
    let row = pilot.app().backend().find("todo-item").unwrap();
    add_todo(&mut pilot, "eggs");
    pilot.press_key(KeyEvent::ctrl('z'));
    pilot.tick();
    assert_eq!(pilot.count("todo-item"), 1);
    assert_eq!(pilot.app().backend().find("todo-item"), Some(row));
}

#[test]
fn todo_color_preview_and_pick_is_one_undo_step() {
    let mut pilot = todo_pilot();
    add_todo(&mut pilot, "milk");

    pilot.click("todo-color");
    pilot.emit("todo-color", WidgetEvent::Changed("#FF0000".into()));
    pilot.tick();
    assert_eq!(pilot.widget("todo-color").unwrap().prop("color"), Some("#FF0000"));
    pilot.emit("todo-color", WidgetEvent::Changed("#00FF00".into()));
    pilot.emit("todo-color", WidgetEvent::Committed("#0000FF".into()));
    pilot.tick();

    assert_eq!(pilot.widget("todo-color").unwrap().prop("color"), Some("#0000FF"));
    assert_eq!(pilot.history().len(), 3);

    pilot.press_key(KeyEvent::ctrl('z'));
    pilot.tick();
    assert_eq!(pilot.widget("todo-color").unwrap().prop("color"), Some("#FFFFFF"));
}

#[test]
fn todo_color_cancel_restores_origin() {
    let mut pilot = todo_pilot();
    add_todo(&mut pilot, "milk");

    pilot.click("todo-color");
    pilot.emit("todo-color", WidgetEvent::Changed("#FF0000".into()));
    pilot.tick();
    pilot.emit("todo-color", WidgetEvent::Cancelled);
    pilot.tick();

    assert_eq!(pilot.widget("todo-color").unwrap().prop("color"), Some("#FFFFFF"));
    assert_eq!(pilot.history().len(), 2);
}

#[test]
fn todo_color_history_panel_is_newest_first() {
    let mut pilot = todo_pilot();
    add_todo(&mut pilot, "milk");
    pilot.click("todo-color");
    pilot.emit("todo-color", WidgetEvent::Committed("#FF0000".into()));
    pilot.tick();

    let colors: Vec<String> = pilot
        .app()
        .backend()
        .find_all("color-swatch")
        .into_iter()
        .filter_map(|id| pilot.app().backend().get(id)?.prop("color").map(str::to_owned))
        .collect();
    assert_eq!(colors, vec!["#FF0000", "#FFFFFF"]);
}

#[test]
fn todo_debug_tree_lists_live_views() {
    let mut pilot = Pilot::new(todo::build_app(todo::default_config()));
    pilot.tick();
    add_todo(&mut pilot, "milk");
    assert_eq!(
        pilot.texts_of("tree-item"),
        vec![
            "TodoRootView",
            "TodoInputView",
            "TodoCounterView",
            "TodoListView",
            "TodoItemView",
        ]
    );

    assert!(pilot.press_key(KeyEvent::ctrl('d')));
    assert!(!pilot.widget("debug-tree").unwrap().visible);
}

#[test]
fn todo_render_snapshot() {
    let mut pilot = todo_pilot();
    add_todo(&mut pilot, "milk");
    insta::assert_snapshot!(pilot.render(), @r#"
    Window #todo-window "Todo"
      LineEdit #todo-input
      Label #done-counter "0/1"
      List #todo-list current_row=-
        Row #todo-item
          Checkbox #todo-done
          LineEdit #todo-content "milk" (disabled)
          Button #todo-color color=#FFFFFF
    Dialog #color-history "Color History"
      Swatch #color-swatch color=#FFFFFF
    "#);
}

#[test]
fn todo_record_then_replay() {
    let mut pilot = todo_pilot();
    pilot.app_mut().start_recording(Recorder::new());
    add_todo(&mut pilot, "milk");
    pilot.toggle("todo-done", 0, true);
    pilot.tick();
    let log = pilot.app_mut().take_recorder().unwrap().finish().unwrap();
    assert_eq!(log.len(), 2);

    let json = log.to_json().unwrap();
    let log = ActionLog::from_json(&json).unwrap();
    let mut replay = Pilot::new(todo::build_app(AppConfig::new()));
    replay.app_mut().replay(Player::new(log));
    replay.ticks(4);
    assert_eq!(replay.texts_of("todo-content"), vec!["milk"]);
    assert_eq!(replay.text_of("done-counter").as_deref(), Some("1/1"));
    assert_eq!(replay.current(), pilot.current());
}

// ---------------------------------------------------------------------------
// Level sample
// ---------------------------------------------------------------------------

fn level_pilot() -> Pilot<std::sync::Arc<level::LevelData>> {
    let mut pilot = Pilot::new(level::build_app(level::default_config()));
    pilot.tick();
    pilot
}

/// Add an object of the given toolbar button and wait for its sprite.
fn add_loaded(pilot: &mut Pilot<std::sync::Arc<level::LevelData>>, button: &str, load_ticks: usize) {
    assert!(pilot.click(button));
    pilot.ticks(load_ticks + 1);
}

#[test]
fn level_object_loads_then_shows_sprite() {
    let mut pilot = level_pilot();
    pilot.click("add-tree");
    pilot.tick();
    assert_eq!(pilot.count("loading-icon"), 1);
    assert_eq!(pilot.count("sprite"), 0);
    assert_eq!(pilot.texts_of("object-item"), vec!["Tree 1"]);

    pilot.tick();
    assert_eq!(pilot.count("loading-icon"), 0);
    assert_eq!(pilot.count("sprite"), 1);
}

#[test]
fn level_press_selects_and_shows_attributes() {
    let mut pilot = level_pilot();
    add_loaded(&mut pilot, "add-tree", 1);
    assert!(!pilot.widget("attr-edit").unwrap().visible);
    assert!(!pilot.click("remove-selected"));

    assert!(pilot.emit("sprite", WidgetEvent::Pressed));
    pilot.tick();
    insta::assert_snapshot!(pilot.render(), @r#"
    Window #level-window "Level Designer"
      Toolbar #toolbar
        Button #add-tree "Add Tree"
        Button #add-house "Add House"
        Button #add-mountain "Add Mountain"
        Button #remove-selected "Remove"
      List #object-list current_row=0
        ListItem #object-item "Tree 1" [selected]
      Scene #scene
        SceneObject #scene-object "Tree 1" [selected] x=-200 y=0
          Sprite #sprite texture=treePine_large.png
      GroupBox #attr-edit "Attribute"
        Label #attr-object "Tree 1"
        Label "Position:"
        Row #pos-edit
          SpinBox #pos-x "-200" max=640 min=-640
          SpinBox #pos-y "0" max=640 min=-640
    "#);
}

#[test]
fn level_drag_previews_and_commits_once() {
    let mut pilot = level_pilot();
    add_loaded(&mut pilot, "add-tree", 1);
    pilot.emit("sprite", WidgetEvent::Pressed);
    pilot.tick();
    let before = pilot.history().len();

    pilot.emit("sprite", WidgetEvent::Moved { x: 10, y: 10 });
    pilot.tick();
    pilot.emit("sprite", WidgetEvent::Moved { x: 100, y: 50 });
    pilot.tick();
    assert_eq!(pilot.widget("scene-object").unwrap().prop("x"), Some("100"));
    assert_eq!(pilot.text_of("pos-y").as_deref(), Some("50"));

    pilot.emit("sprite", WidgetEvent::Released);
    pilot.tick();
    assert_eq!(pilot.history().len(), before + 1);

    pilot.press_key(KeyEvent::ctrl('z'));
    pilot.tick();
    assert_eq!(pilot.widget("scene-object").unwrap().prop("x"), Some("-200"));
}

#[test]
fn level_list_row_selects_object() {
    let mut pilot = level_pilot();
    add_loaded(&mut pilot, "add-tree", 1);
    add_loaded(&mut pilot, "add-house", 3);
    assert!(pilot.select_row("object-list", Some(1)));
    pilot.tick();
    assert_eq!(pilot.text_of("attr-object").as_deref(), Some("House 2"));
    let selected: Vec<bool> = pilot
        .app()
        .backend()
        .find_all("scene-object")
        .into_iter()
        .map(|id| pilot.app().backend().get(id).unwrap().selected)
        .collect();
    assert_eq!(selected, vec![false, true]);

    // Pressing the other sprite moves the selection.
    pilot.emit_nth("sprite", 0, WidgetEvent::Pressed);
    pilot.tick();
    assert_eq!(pilot.text_of("attr-object").as_deref(), Some("Tree 1"));
    assert_eq!(
        pilot.widget("object-list").unwrap().prop("current_row"),
        Some("0")
    );
}

#[test]
fn level_spin_box_edits_position() {
    let mut pilot = level_pilot();
    add_loaded(&mut pilot, "add-tree", 1);
    pilot.emit("sprite", WidgetEvent::Pressed);
    pilot.tick();

    assert!(pilot.emit("pos-x", WidgetEvent::ValueChanged(-1000)));
    pilot.tick();
    assert_eq!(pilot.text_of("pos-x").as_deref(), Some("-640"));
    assert_eq!(pilot.widget("scene-object").unwrap().prop("x"), Some("-640"));
}

#[test]
fn level_remove_selected() {
    let mut pilot = level_pilot();
    add_loaded(&mut pilot, "add-tree", 1);
    pilot.emit("sprite", WidgetEvent::Pressed);
    pilot.tick();

    assert!(pilot.click("remove-selected"));
    pilot.tick();
    assert_eq!(pilot.count("scene-object"), 0);
    assert_eq!(pilot.count("object-item"), 0);
    assert!(!pilot.widget("attr-edit").unwrap().visible);
}

#[test]
fn level_scene_ignores_edits_while_loading() {
    let mut pilot = level_pilot();
    add_loaded(&mut pilot, "add-tree", 1);
    pilot.click("add-mountain");
    pilot.ticks(2);
    assert_eq!(pilot.count("loading-icon"), 1);

    let before = pilot.history().len();
    pilot.emit("sprite", WidgetEvent::Pressed);
    pilot.tick();
    assert_eq!(pilot.history().len(), before);
    assert!(!pilot.widget("scene-object").unwrap().selected);

    // The object list is not blocked by the scene.
    assert_eq!(pilot.texts_of("object-item"), vec!["Tree 1", "Mountain 2"]);
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

#[tokio::test]
async fn level_runs_on_scheduler() {
    let config = level::default_config().with_tick_interval(Duration::from_millis(1));
    let mut app = level::build_app(config);
    let scheduler = snapview::scheduler::Scheduler::new();
    let ran = app.run(&scheduler, Some(3)).await;
    assert_eq!(ran, 3);
    assert!(app.backend().find("level-window").is_some());
}
