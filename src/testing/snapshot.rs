//! Snapshot rendering helpers.
//!
//! Functions for converting a [`WidgetTree`] into plain-text outlines
//! suitable for snapshot testing and assertions.

use std::fmt::Write;

use crate::backend::{WidgetData, WidgetId, WidgetTree};

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render every mounted window as an indented outline.
///
/// One widget per line, children indented by two spaces:
/// `Kind #name "text" [selected] (hidden) (disabled) key=value ...`.
/// Parts that are empty or at their default are omitted. The final line
/// has no trailing newline.
///
/// # Examples
///
/// ```
/// use snapview::backend::{Backend, WidgetData, WidgetTree};
/// use snapview::testing::tree_to_string;
///
/// let mut tree = WidgetTree::new();
/// let win = tree.create(WidgetData::new("Window").with_text("Todo"));
/// tree.mount(win);
/// let ok = tree.create(WidgetData::new("Button").with_name("ok"));
/// tree.append_child(win, ok);
/// assert_eq!(tree_to_string(&tree), "Window \"Todo\"\n  Button #ok");
/// ```
pub fn tree_to_string(tree: &WidgetTree) -> String {
    let lines: Vec<String> = tree
        .roots()
        .iter()
        .flat_map(|&root| outline(tree, root))
        .collect();
    lines.join("\n")
}

/// Render the subtree below `start` (inclusive) as an indented outline.
pub fn subtree_to_string(tree: &WidgetTree, start: WidgetId) -> String {
    outline(tree, start).join("\n")
}

/// Describe a single widget on one line, without indentation.
pub fn describe_widget(data: &WidgetData) -> String {
    let mut line = data.kind.clone();
    if let Some(name) = &data.name {
        let _ = write!(line, " #{name}");
    }
    if !data.text.is_empty() {
        let _ = write!(line, " {:?}", data.text);
    }
    if data.selected {
        line.push_str(" [selected]");
    }
    if !data.visible {
        line.push_str(" (hidden)");
    }
    if !data.enabled {
        line.push_str(" (disabled)");
    }
    for (key, value) in &data.props {
        let _ = write!(line, " {key}={value}");
    }
    line
}

fn outline(tree: &WidgetTree, start: WidgetId) -> Vec<String> {
    let mut lines = Vec::new();
    let mut stack = vec![(start, 0usize)];
    while let Some((id, depth)) = stack.pop() {
        let Some(data) = tree.get(id) else {
            continue;
        };
        lines.push(format!("{}{}", "  ".repeat(depth), describe_widget(data)));
        for &child in tree.children(id).iter().rev() {
            stack.push((child, depth + 1));
        }
    }
    lines
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::Backend;

    #[test]
    fn describe_all_parts() {
        let mut data = WidgetData::new("Checkbox")
            .with_name("done")
            .with_text("milk")
            .with_prop("color", "#FFFFFF")
            .enabled(false);
        data.selected = true;
        data.visible = false;
        assert_eq!(
            describe_widget(&data),
            "Checkbox #done \"milk\" [selected] (hidden) (disabled) color=#FFFFFF"
        );
    }

    #[test]
    fn describe_minimal() {
        assert_eq!(describe_widget(&WidgetData::new("Label")), "Label");
    }

    #[test]
    fn empty_tree_is_empty_string() {
        assert_eq!(tree_to_string(&WidgetTree::new()), "");
    }

    #[test]
    fn nested_outline() {
        let mut tree = WidgetTree::new();
        let win = tree.create(WidgetData::new("Window"));
        tree.mount(win);
        let list = tree.create(WidgetData::new("List"));
        let row = tree.create(WidgetData::new("Label").with_text("a"));
        let ok = tree.create(WidgetData::new("Button"));
        tree.append_child(win, list);
        tree.append_child(list, row);
        tree.append_child(win, ok);
        insta::assert_snapshot!(tree_to_string(&tree), @r#"
        Window
          List
            Label "a"
          Button
        "#);
        assert_eq!(subtree_to_string(&tree, list), "List\n  Label \"a\"");
    }

    #[test]
    fn detached_widgets_are_not_rendered() {
        let mut tree = WidgetTree::new();
        let win = tree.create(WidgetData::new("Window"));
        tree.mount(win);
        tree.create(WidgetData::new("Orphan"));
        assert_eq!(tree_to_string(&tree), "Window");
    }

    #[test]
    fn multiple_windows_in_mount_order() {
        let mut tree = WidgetTree::new();
        let a = tree.create(WidgetData::new("Window").with_name("a"));
        let b = tree.create(WidgetData::new("Window").with_name("b"));
        tree.mount(b);
        tree.mount(a);
        assert_eq!(tree_to_string(&tree), "Window #b\nWindow #a");
    }
}
