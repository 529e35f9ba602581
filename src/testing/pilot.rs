//! Pilot: programmatic interaction with a headless App.
//!
//! The `Pilot` wraps an [`App`] and provides methods to simulate user input
//! (key presses, widget events), run refresh ticks, and render the widget
//! tree to text for snapshot testing.

use std::cell::Ref;

use crate::app::App;
use crate::backend::{Backend, WidgetData, WidgetEvent, WidgetId};
use crate::data::Shared;
use crate::event::input::KeyEvent;
use crate::history::SnapshotHistory;

use super::snapshot::tree_to_string;

// ---------------------------------------------------------------------------
// Pilot
// ---------------------------------------------------------------------------

/// A headless app driver for testing.
///
/// Widgets are addressed by name. Every event helper returns whether the
/// event reached a handler; like a real toolkit, events sent to disabled
/// widgets are dropped.
///
/// # Examples
///
/// ```ignore
/// use snapview::samples::todo;
/// use snapview::testing::Pilot;
/// use snapview::AppConfig;
///
/// let mut pilot = Pilot::new(todo::build_app(AppConfig::new()));
/// pilot.tick();
/// pilot.commit_text("todo-input", "buy milk");
/// pilot.tick();
/// assert_eq!(pilot.text_of("done-counter"), Some("0/1".to_owned()));
/// ```
pub struct Pilot<T: Shared + PartialEq> {
    app: App<T>,
}

impl<T: Shared + PartialEq> Pilot<T> {
    /// Wrap an app.
    pub fn new(app: App<T>) -> Self {
        Self { app }
    }

    // ── Ticks ────────────────────────────────────────────────────────

    /// Run a single refresh tick.
    pub fn tick(&mut self) {
        self.app.tick();
    }

    /// Run `count` refresh ticks.
    pub fn ticks(&mut self, count: usize) {
        self.app.tick_n(count);
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate a key press. Returns whether a binding handled it.
    pub fn press_key(&mut self, event: KeyEvent) -> bool {
        self.app.handle_key(event)
    }

    /// Deliver `event` to the first widget named `name`.
    pub fn emit(&mut self, name: &str, event: WidgetEvent) -> bool {
        self.emit_nth(name, 0, event)
    }

    /// Deliver `event` to the `n`-th widget named `name`, in tree order.
    pub fn emit_nth(&mut self, name: &str, n: usize, event: WidgetEvent) -> bool {
        match self.nth(name, n) {
            Some(id) => self.app.backend_mut().emit(id, event),
            None => false,
        }
    }

    /// Click the first widget named `name`.
    pub fn click(&mut self, name: &str) -> bool {
        self.emit(name, WidgetEvent::Clicked)
    }

    /// Toggle the `n`-th widget named `name` to `checked`.
    pub fn toggle(&mut self, name: &str, n: usize, checked: bool) -> bool {
        if let Some(id) = self.nth(name, n) {
            self.app.backend_mut().set_selected(id, checked);
        }
        self.emit_nth(name, n, WidgetEvent::Toggled(checked))
    }

    /// Type `text` into the first widget named `name` and press enter.
    pub fn commit_text(&mut self, name: &str, text: &str) -> bool {
        if let Some(id) = self.app.backend().find(name) {
            self.app.backend_mut().set_text(id, text);
        }
        self.emit(name, WidgetEvent::Committed(text.to_owned()))
    }

    /// Select `row` (or clear the selection) in the first list named `name`.
    pub fn select_row(&mut self, name: &str, row: Option<usize>) -> bool {
        self.emit(name, WidgetEvent::RowSelected(row))
    }

    // ── Inspection ───────────────────────────────────────────────────

    /// Render every mounted window to an indented outline.
    pub fn render(&self) -> String {
        tree_to_string(self.app.backend())
    }

    /// Text of the first widget named `name`.
    pub fn text_of(&self, name: &str) -> Option<String> {
        self.widget(name).map(|data| data.text.clone())
    }

    /// Texts of every widget named `name`, in tree order.
    pub fn texts_of(&self, name: &str) -> Vec<String> {
        let backend = self.app.backend();
        backend
            .find_all(name)
            .into_iter()
            .filter_map(|id| backend.get(id).map(|data| data.text.clone()))
            .collect()
    }

    /// Visible state of the first widget named `name`.
    pub fn widget(&self, name: &str) -> Option<&WidgetData> {
        let backend = self.app.backend();
        backend.find(name).and_then(|id| backend.get(id))
    }

    /// Number of mounted widgets named `name`.
    pub fn count(&self, name: &str) -> usize {
        self.app.backend().find_all(name).len()
    }

    /// The snapshot under the history cursor.
    pub fn current(&self) -> T {
        self.app.current()
    }

    /// Borrow the history.
    pub fn history(&self) -> Ref<'_, SnapshotHistory<T>> {
        self.app.history()
    }

    /// Access the underlying app.
    pub fn app(&self) -> &App<T> {
        &self.app
    }

    /// Mutable access to the underlying app.
    pub fn app_mut(&mut self) -> &mut App<T> {
        &mut self.app
    }

    /// Unwrap the pilot, returning the app.
    pub fn into_app(self) -> App<T> {
        self.app
    }

    fn nth(&self, name: &str, n: usize) -> Option<WidgetId> {
        self.app.backend().find_all(name).get(n).copied()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::AppConfig;
    use crate::view::{Context, View, ViewNode};
    use std::sync::Arc;

    /// A window with a line edit that commits its text and a label echoing
    /// the current snapshot.
    struct EchoView {
        label: Option<WidgetId>,
    }

    impl View for EchoView {
        type Data = Arc<String>;

        fn name(&self) -> &'static str {
            "EchoView"
        }

        fn create_widget(&mut self, cx: &mut Context<'_, Arc<String>>) -> WidgetId {
            let submit = cx.submitter();
            let backend = cx.backend();
            let window = backend.create(WidgetData::new("Window"));
            let input = backend.create(WidgetData::new("LineEdit").with_name("input"));
            let label = backend.create(WidgetData::new("Label").with_name("echo"));
            backend.append_child(window, input);
            backend.append_child(window, label);
            backend.on_event(
                input,
                Box::new(move |event, _| {
                    if let WidgetEvent::Committed(text) = event {
                        submit.commit(Arc::new(text.clone()));
                    }
                }),
            );
            self.label = Some(label);
            window
        }

        fn render(&mut self, cx: &mut Context<'_, Arc<String>>, data: &Arc<String>) {
            if let Some(label) = self.label {
                cx.backend().set_text(label, data);
            }
        }
    }

    fn echo_pilot() -> Pilot<Arc<String>> {
        let app = App::new(AppConfig::new(), Arc::new(String::new()), |backend, submit| {
            ViewNode::new(EchoView { label: None }, backend, submit)
        });
        Pilot::new(app)
    }

    #[test]
    fn commit_text_round_trips_through_history() {
        let mut pilot = echo_pilot();
        pilot.tick();
        assert!(pilot.commit_text("input", "hello"));
        assert_eq!(pilot.text_of("input").as_deref(), Some("hello"));
        pilot.tick();
        assert_eq!(pilot.text_of("echo").as_deref(), Some("hello"));
        assert_eq!(pilot.history().len(), 2);
    }

    #[test]
    fn events_to_missing_widgets_are_ignored() {
        let mut pilot = echo_pilot();
        assert!(!pilot.click("nope"));
        assert!(!pilot.emit_nth("input", 3, WidgetEvent::Cancelled));
        assert_eq!(pilot.count("input"), 1);
    }

    #[test]
    fn undo_key_through_pilot() {
        let mut pilot = echo_pilot();
        pilot.tick();
        pilot.commit_text("input", "a");
        pilot.tick();
        assert!(pilot.press_key(KeyEvent::ctrl('z')));
        pilot.tick();
        assert_eq!(pilot.text_of("echo").as_deref(), Some(""));
        assert_eq!(pilot.current().as_str(), "");
    }

    #[test]
    fn render_outline() {
        let mut pilot = echo_pilot();
        pilot.tick();
        pilot.commit_text("input", "hi");
        pilot.tick();
        insta::assert_snapshot!(pilot.render(), @r#"
        Window
          LineEdit #input "hi"
          Label #echo "hi"
        "#);
    }
}
