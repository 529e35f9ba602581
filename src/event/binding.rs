//! Key binding registry and resolution.
//!
//! [`KeyBindingRegistry`] maps key+modifier combinations to [`BindingAction`]s.
//! The `with_defaults()` constructor installs the history and tooling
//! bindings (Ctrl+Z undo, Ctrl+Y redo, Ctrl+D debug tree, Ctrl+C quit).

use std::collections::HashMap;

use super::input::{Key, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// BindingAction
// ---------------------------------------------------------------------------

/// Action to take when a key binding is matched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingAction {
    /// Step the history cursor back.
    Undo,
    /// Step the history cursor forward.
    Redo,
    /// Show or hide the debug view tree.
    ToggleDebugTree,
    /// Stop the tick loop.
    Quit,
    /// A named action left to the host.
    Custom(String),
}

// ---------------------------------------------------------------------------
// KeyBindingRegistry
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> BindingAction.
#[derive(Debug, Clone)]
pub struct KeyBindingRegistry {
    bindings: HashMap<(Key, Modifiers), BindingAction>,
}

impl KeyBindingRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a registry with the standard bindings.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.bind(Key::Char('z'), Modifiers::CTRL, BindingAction::Undo);
        registry.bind(Key::Char('y'), Modifiers::CTRL, BindingAction::Redo);
        registry.bind(
            Key::Char('d'),
            Modifiers::CTRL,
            BindingAction::ToggleDebugTree,
        );
        registry.bind(Key::Char('c'), Modifiers::CTRL, BindingAction::Quit);
        registry
    }

    /// Register a key binding.
    ///
    /// If a binding already exists for this key+modifier combination, it is replaced.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: BindingAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Remove a key binding.
    ///
    /// Returns the removed action, if any.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<BindingAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for a given key event.
    pub fn resolve(&self, event: &KeyEvent) -> Option<&BindingAction> {
        self.bindings.get(&(event.code, event.modifiers))
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the registry has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for KeyBindingRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn default_registry_is_empty() {
        let reg = KeyBindingRegistry::default();
        assert!(reg.is_empty());
        assert_eq!(reg.len(), 0);
    }

    #[test]
    fn with_defaults_has_four_bindings() {
        let reg = KeyBindingRegistry::with_defaults();
        assert_eq!(reg.len(), 4);
    }

    // ── Bind / Unbind ────────────────────────────────────────────────

    #[test]
    fn resolve_wrong_modifiers() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::Char('q'), Modifiers::CTRL, BindingAction::Quit);

        // Without Ctrl: no match.
        let event = KeyEvent::new(Key::Char('q'), Modifiers::NONE);
        assert!(reg.resolve(&event).is_none());

        let event2 = KeyEvent::new(Key::Char('q'), Modifiers::CTRL);
        assert_eq!(reg.resolve(&event2), Some(&BindingAction::Quit));
    }

    #[test]
    fn unbind_removes_binding() {
        let mut reg = KeyBindingRegistry::with_defaults();
        let removed = reg.unbind(Key::Char('z'), Modifiers::CTRL);
        assert_eq!(removed, Some(BindingAction::Undo));
        assert!(reg.resolve(&KeyEvent::ctrl('z')).is_none());
        assert!(reg.unbind(Key::Char('z'), Modifiers::CTRL).is_none());
    }

    #[test]
    fn bind_overwrites_existing() {
        let mut reg = KeyBindingRegistry::new();
        reg.bind(Key::F(1), Modifiers::NONE, BindingAction::Custom("first".into()));
        reg.bind(Key::F(1), Modifiers::NONE, BindingAction::Custom("second".into()));
        assert_eq!(reg.len(), 1);

        let event = KeyEvent::new(Key::F(1), Modifiers::NONE);
        assert_eq!(
            reg.resolve(&event),
            Some(&BindingAction::Custom("second".into()))
        );
    }

    // ── Default bindings ─────────────────────────────────────────────

    #[test]
    fn defaults_resolve() {
        let reg = KeyBindingRegistry::with_defaults();
        assert_eq!(reg.resolve(&KeyEvent::ctrl('z')), Some(&BindingAction::Undo));
        assert_eq!(reg.resolve(&KeyEvent::ctrl('y')), Some(&BindingAction::Redo));
        assert_eq!(
            reg.resolve(&KeyEvent::ctrl('d')),
            Some(&BindingAction::ToggleDebugTree)
        );
        assert_eq!(reg.resolve(&KeyEvent::ctrl('c')), Some(&BindingAction::Quit));
    }
}
