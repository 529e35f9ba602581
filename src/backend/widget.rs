//! Widget handle and the visible state stored behind it.

use std::collections::BTreeMap;

use slotmap::new_key_type;

new_key_type! {
    /// Opaque handle to a backend widget. Copy, lightweight (u64).
    pub struct WidgetId;
}

/// Visible state of a single widget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetData {
    /// Widget kind (e.g. "Label", "Checkbox", "List").
    pub kind: String,
    /// Optional name used to find the widget from outside (tests, tooling).
    pub name: Option<String>,
    /// Displayed text: label caption, line-edit content, window title.
    pub text: String,
    /// Whether the widget is shown.
    pub visible: bool,
    /// Whether the widget reacts to events.
    pub enabled: bool,
    /// Selection / checked state.
    pub selected: bool,
    /// Free-form properties (colour, position, texture ...).
    pub props: BTreeMap<String, String>,
}

impl WidgetData {
    /// Create a visible, enabled widget of the given kind.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            text: String::new(),
            visible: true,
            enabled: true,
            selected: false,
            props: BTreeMap::new(),
        }
    }

    /// Set the name (builder).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the text (builder).
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set a property (builder).
    pub fn with_prop(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Set whether the widget reacts to events (builder).
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Look up a property.
    pub fn prop(&self, key: &str) -> Option<&str> {
        self.props.get(key).map(String::as_str)
    }

    /// Whether this widget carries the given name.
    pub fn has_name(&self, name: &str) -> bool {
        self.name.as_deref() == Some(name)
    }
}
