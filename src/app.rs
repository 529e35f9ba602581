//! App struct: history, root view, backend, panels and the tick loop.
//!
//! [`App`] ties together the snapshot history, the root component, the
//! headless widget tree, the debug mirror, key bindings and the optional
//! recorder / player. Each [`tick`](App::tick) pumps backend tasks, replays
//! due log entries and pushes the current snapshot into the view tree.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use tracing::{debug, info};

use crate::backend::{Backend, WidgetTree};
use crate::data::Shared;
use crate::debug::{DebugTreeView, ViewMirror};
use crate::event::binding::{BindingAction, KeyBindingRegistry};
use crate::event::input::KeyEvent;
use crate::history::SnapshotHistory;
use crate::record::{Player, Recorder};
use crate::scheduler::Scheduler;
use crate::view::{Component, Inspect, Submitter, ViewNode};

/// Default refresh interval.
pub const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(33);

// ---------------------------------------------------------------------------
// AppConfig
// ---------------------------------------------------------------------------

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Optional title, shown as the root window's text.
    pub title: Option<String>,
    /// Interval between refresh ticks.
    pub tick_interval: Duration,
    /// Whether to build the debug view tree window.
    pub debug_tree: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: None,
            tick_interval: DEFAULT_TICK_INTERVAL,
            debug_tree: false,
        }
    }
}

impl AppConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title (builder).
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the tick interval (builder).
    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval = interval;
        self
    }

    /// Enable or disable the debug view tree (builder).
    pub fn with_debug_tree(mut self, enabled: bool) -> Self {
        self.debug_tree = enabled;
        self
    }
}

// ---------------------------------------------------------------------------
// History panels
// ---------------------------------------------------------------------------

/// A component fed from the whole history rather than the current snapshot.
trait HistoryPanel<T> {
    fn refresh(&mut self, backend: &mut dyn Backend, history: &SnapshotHistory<T>);
}

struct PanelBinding<T, C: Component> {
    component: C,
    select: Box<dyn Fn(&SnapshotHistory<T>) -> C::Data>,
    input: Option<C::Data>,
    revision: Option<u64>,
}

impl<T, C: Component> HistoryPanel<T> for PanelBinding<T, C> {
    fn refresh(&mut self, backend: &mut dyn Backend, history: &SnapshotHistory<T>) {
        if self.revision != Some(history.revision()) {
            self.input = Some((self.select)(history));
            self.revision = Some(history.revision());
        }
        if let Some(input) = self.input.clone() {
            self.component.try_refresh(backend, input);
        }
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// The main application struct.
///
/// Owns the widget tree, the shared snapshot history and the root component.
/// Submissions from the view tree go straight into the history; the next
/// tick renders them.
pub struct App<T: Shared + PartialEq> {
    /// Application configuration.
    pub config: AppConfig,
    /// Key binding registry.
    pub bindings: KeyBindingRegistry,
    backend: WidgetTree,
    history: Rc<RefCell<SnapshotHistory<T>>>,
    root: Box<dyn Component<Data = T>>,
    mirror: ViewMirror,
    debug_view: Option<ViewNode<DebugTreeView>>,
    panels: Vec<Box<dyn HistoryPanel<T>>>,
    recorder: Rc<RefCell<Option<Recorder<T>>>>,
    player: Option<Player<T>>,
    ticks: Rc<Cell<u64>>,
    running: bool,
}

impl<T: Shared + PartialEq> App<T> {
    /// Build the app around `seed`.
    ///
    /// `build_root` receives the backend and the submission channel into the
    /// history, and returns the root component. Its widget is mounted as the
    /// main window.
    pub fn new<C>(
        config: AppConfig,
        seed: T,
        build_root: impl FnOnce(&mut dyn Backend, Submitter<T>) -> C,
    ) -> Self
    where
        C: Component<Data = T>,
    {
        let mut backend = WidgetTree::new();
        let history = Rc::new(RefCell::new(SnapshotHistory::new(seed)));
        let recorder: Rc<RefCell<Option<Recorder<T>>>> = Rc::new(RefCell::new(None));
        let ticks = Rc::new(Cell::new(0));

        let submit = {
            let history = Rc::clone(&history);
            let recorder = Rc::clone(&recorder);
            let ticks = Rc::clone(&ticks);
            let interval = config.tick_interval;
            Submitter::new(move |snapshot: T, record_in_history| {
                if record_in_history {
                    if let Some(recorder) = recorder.borrow_mut().as_mut() {
                        recorder.record(snapshot.clone(), elapsed(ticks.get(), interval));
                    }
                }
                history.borrow_mut().push(snapshot, record_in_history);
            })
        };

        let root = build_root(&mut backend, submit);
        let root_widget = root.widget();
        backend.mount(root_widget);
        if let Some(title) = &config.title {
            backend.set_text(root_widget, title);
        }

        let debug_view = config.debug_tree.then(|| {
            let view = ViewNode::new(DebugTreeView::new(), &mut backend, Submitter::none());
            backend.mount(view.widget());
            view
        });

        info!(title = ?config.title, debug_tree = config.debug_tree, "app created");
        Self {
            config,
            bindings: KeyBindingRegistry::with_defaults(),
            backend,
            history,
            root: Box::new(root),
            mirror: ViewMirror::new(),
            debug_view,
            panels: Vec::new(),
            recorder,
            player: None,
            ticks,
            running: true,
        }
    }

    /// Add a window fed from the history (e.g. a list of past values).
    ///
    /// `select` runs again only when the history changed.
    pub fn add_history_panel<C>(
        &mut self,
        build: impl FnOnce(&mut dyn Backend) -> C,
        select: impl Fn(&SnapshotHistory<T>) -> C::Data + 'static,
    ) where
        C: Component,
    {
        let component = build(&mut self.backend);
        self.backend.mount(component.widget());
        self.panels.push(Box::new(PanelBinding {
            component,
            select: Box::new(select),
            input: None,
            revision: None,
        }));
    }

    /// Record committed submissions from now on.
    pub fn start_recording(&mut self, recorder: Recorder<T>) {
        *self.recorder.borrow_mut() = Some(recorder);
    }

    /// Stop recording and hand the recorder back.
    pub fn take_recorder(&mut self) -> Option<Recorder<T>> {
        self.recorder.borrow_mut().take()
    }

    /// Replay a log: each entry is committed once the app clock reaches it.
    pub fn replay(&mut self, player: Player<T>) {
        self.player = Some(player);
    }

    // ── Tick ─────────────────────────────────────────────────────────

    /// Run one refresh pass.
    pub fn tick(&mut self) {
        let now = elapsed(self.ticks.get(), self.config.tick_interval);
        self.backend.pump();

        if let Some(player) = &mut self.player {
            let due = player.due(now);
            if !due.is_empty() {
                let mut history = self.history.borrow_mut();
                for snapshot in due {
                    history.commit(snapshot);
                }
            }
        }

        let current = self.history.borrow().current().clone();
        self.root.try_refresh(&mut self.backend, current);

        {
            let history = self.history.borrow();
            for panel in &mut self.panels {
                panel.refresh(&mut self.backend, &history);
            }
        }

        if let Some(view) = &mut self.debug_view {
            let shadow = self.mirror.update(self.root.inspect());
            view.try_refresh(&mut self.backend, shadow);
        }

        self.ticks.set(self.ticks.get() + 1);
    }

    /// Run `count` ticks back to back.
    pub fn tick_n(&mut self, count: usize) {
        for _ in 0..count {
            self.tick();
        }
    }

    /// Drive the app from `scheduler` until quit, or until `max_ticks` ticks
    /// ran. Returns the number of ticks run.
    pub async fn run(&mut self, scheduler: &Scheduler, max_ticks: Option<u64>) -> u64 {
        if max_ticks == Some(0) {
            return 0;
        }
        let interval = self.config.tick_interval;
        let mut remaining = max_ticks;
        scheduler
            .start(interval, |scheduler| {
                self.tick();
                if let Some(left) = remaining.as_mut() {
                    *left = left.saturating_sub(1);
                    if *left == 0 {
                        self.running = false;
                    }
                }
                if !self.running {
                    scheduler.stop();
                }
            })
            .await
    }

    // ── Input ────────────────────────────────────────────────────────

    /// Resolve a key against the bindings. Returns whether it was handled.
    pub fn handle_key(&mut self, event: KeyEvent) -> bool {
        let Some(action) = self.bindings.resolve(&event).cloned() else {
            return false;
        };
        debug!(%event, ?action, "key binding");
        match action {
            BindingAction::Undo => {
                self.undo();
            }
            BindingAction::Redo => {
                self.redo();
            }
            BindingAction::ToggleDebugTree => self.toggle_debug_tree(),
            BindingAction::Quit => self.request_quit(),
            BindingAction::Custom(_) => return false,
        }
        true
    }

    /// Step the history back. The next tick renders the result.
    pub fn undo(&mut self) -> bool {
        self.history.borrow_mut().undo()
    }

    /// Step the history forward. The next tick renders the result.
    pub fn redo(&mut self) -> bool {
        self.history.borrow_mut().redo()
    }

    /// Show or hide the debug view tree window.
    pub fn toggle_debug_tree(&mut self) {
        if let Some(view) = &self.debug_view {
            let widget = view.widget();
            let visible = self.backend.get(widget).is_some_and(|w| w.visible);
            self.backend.set_visible(widget, !visible);
        }
    }

    // ── Query ────────────────────────────────────────────────────────

    /// The widget tree.
    pub fn backend(&self) -> &WidgetTree {
        &self.backend
    }

    /// Mutable access to the widget tree, e.g. to emit widget events.
    pub fn backend_mut(&mut self) -> &mut WidgetTree {
        &mut self.backend
    }

    /// Borrow the history.
    pub fn history(&self) -> std::cell::Ref<'_, SnapshotHistory<T>> {
        self.history.borrow()
    }

    /// The snapshot under the history cursor.
    pub fn current(&self) -> T {
        self.history.borrow().current().clone()
    }

    /// Read-only view of the root component.
    pub fn root(&self) -> &dyn Inspect {
        self.root.inspect()
    }

    /// The debug mirror, as of the last tick.
    pub fn mirror(&self) -> &ViewMirror {
        &self.mirror
    }

    /// Number of ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks.get()
    }

    /// App time: ticks run times the tick interval.
    pub fn elapsed(&self) -> Duration {
        elapsed(self.ticks.get(), self.config.tick_interval)
    }

    /// Whether the app should quit.
    pub fn should_quit(&self) -> bool {
        !self.running
    }

    /// Request the app to quit.
    pub fn request_quit(&mut self) {
        self.running = false;
    }
}

impl<T: Shared + PartialEq> fmt::Debug for App<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("config", &self.config)
            .field("backend", &self.backend)
            .field("history_len", &self.history.borrow().len())
            .field("ticks", &self.ticks.get())
            .field("running", &self.running)
            .finish()
    }
}

fn elapsed(ticks: u64, interval: Duration) -> Duration {
    interval.saturating_mul(u32::try_from(ticks).unwrap_or(u32::MAX))
}

// ===========================================================================
// Tests
// ===========================================================================
