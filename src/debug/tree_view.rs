//! A view that shows the mirror of the live view tree as backend tree items.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::backend::{Backend, WidgetData, WidgetId};
use crate::diff::{list_diff, OpKind};
use crate::view::{Context, View, ViewId};

use super::mirror::MirrorNode;

struct Item {
    widget: WidgetId,
    rendered: Option<Arc<MirrorNode>>,
    children: Vec<ViewId>,
}

/// Window listing every live node with its name, data and channel state.
///
/// Items are keyed by [`ViewId`]. Child order is kept in sync with the
/// differ, and subtrees whose shadow node did not change are skipped.
#[derive(Default)]
pub struct DebugTreeView {
    items_widget: Option<WidgetId>,
    items: HashMap<ViewId, Item>,
    top: Vec<ViewId>,
}

impl DebugTreeView {
    /// A view with no items yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of tree items currently alive.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    fn item_widget(&mut self, backend: &mut dyn Backend, id: ViewId) -> WidgetId {
        if let Some(item) = self.items.get(&id) {
            return item.widget;
        }
        let widget = backend.create(WidgetData::new("TreeItem").with_name("tree-item"));
        self.items.insert(
            id,
            Item {
                widget,
                rendered: None,
                children: Vec::new(),
            },
        );
        widget
    }

    fn sync_children(
        &mut self,
        backend: &mut dyn Backend,
        container: WidgetId,
        old: Vec<ViewId>,
        nodes: &[Arc<MirrorNode>],
    ) -> Vec<ViewId> {
        let new: Vec<ViewId> = nodes.iter().map(|node| node.id).collect();
        for op in list_diff(&old, &new, |id: &ViewId| *id) {
            match op.kind {
                OpKind::Remove => {
                    backend.take_child(container, op.index);
                }
                OpKind::Insert => {
                    let widget = self.item_widget(backend, op.item);
                    backend.insert_child(container, op.index, widget);
                }
            }
        }
        for node in nodes {
            self.sync_item(backend, node);
        }
        new
    }

    fn sync_item(&mut self, backend: &mut dyn Backend, node: &Arc<MirrorNode>) {
        let Some(item) = self.items.get_mut(&node.id) else {
            return;
        };
        if item
            .rendered
            .as_ref()
            .is_some_and(|rendered| Arc::ptr_eq(rendered, node))
        {
            return;
        }
        item.rendered = Some(Arc::clone(node));
        let widget = item.widget;
        let old = std::mem::take(&mut item.children);

        backend.set_text(widget, &node.name);
        backend.set_prop(widget, "id", node.id.to_string());
        backend.set_prop(widget, "data", node.data.clone());
        let channel = if node.connected { "connected" } else { "none" };
        backend.set_prop(widget, "submit", channel.to_owned());

        let children = self.sync_children(backend, widget, old, &node.children);
        if let Some(item) = self.items.get_mut(&node.id) {
            item.children = children;
        }
    }

    fn forget_missing(&mut self, backend: &mut dyn Backend, root: &MirrorNode) {
        let live: HashSet<ViewId> = root.flatten().into_iter().map(|(_, node)| node.id).collect();
        self.items.retain(|id, item| {
            let keep = live.contains(id);
            if !keep {
                backend.destroy(item.widget);
            }
            keep
        });
    }
}

impl View for DebugTreeView {
    type Data = Arc<MirrorNode>;

    fn name(&self) -> &'static str {
        "DebugTreeView"
    }

    fn create_widget(&mut self, cx: &mut Context<'_, Arc<MirrorNode>>) -> WidgetId {
        let backend = cx.backend();
        let window = backend.create(
            WidgetData::new("Window")
                .with_name("debug-tree")
                .with_text("View Tree"),
        );
        let items = backend.create(WidgetData::new("Tree").with_name("debug-items"));
        backend.append_child(window, items);
        self.items_widget = Some(items);
        window
    }

    fn render(&mut self, cx: &mut Context<'_, Arc<MirrorNode>>, data: &Arc<MirrorNode>) {
        let Some(container) = self.items_widget else {
            return;
        };
        let backend = cx.backend();
        let old = std::mem::take(&mut self.top);
        self.top = self.sync_children(backend, container, old, std::slice::from_ref(data));
        self.forget_missing(backend, data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::WidgetTree;
    use crate::view::{Component, Submitter, ViewNode};

    fn node(id: ViewId, data: &str, children: Vec<Arc<MirrorNode>>) -> Arc<MirrorNode> {
        Arc::new(MirrorNode {
            id,
            name: format!("N{}", id.as_u64()),
            data_identity: None,
            data: data.to_owned(),
            connected: true,
            children,
        })
    }

    fn items(tree: &WidgetTree) -> Vec<String> {
        tree.find_all("tree-item")
            .into_iter()
            .map(|id| tree.get(id).unwrap().prop("data").unwrap_or_default().to_owned())
            .collect()
    }

    #[test]
    fn renders_items_in_tree_order() {
        let mut tree = WidgetTree::new();
        let mut view = ViewNode::new(DebugTreeView::new(), &mut tree, Submitter::none());
        tree.mount(view.widget());
        let (a, b, c) = (ViewId::next(), ViewId::next(), ViewId::next());
        view.try_refresh(&mut tree, node(a, "root", vec![node(b, "b", vec![]), node(c, "c", vec![])]));
        assert_eq!(items(&tree), vec!["root", "b", "c"]);
        assert_eq!(view.view().item_count(), 3);
    }

    #[test]
    fn reuses_items_and_drops_vanished_ones() {
        let mut tree = WidgetTree::new();
        let mut view = ViewNode::new(DebugTreeView::new(), &mut tree, Submitter::none());
        tree.mount(view.widget());
        let (a, b, c, d) = (ViewId::next(), ViewId::next(), ViewId::next(), ViewId::next());
        let leaf_b = node(b, "b", vec![]);
        view.try_refresh(&mut tree, node(a, "root", vec![leaf_b.clone(), node(c, "c", vec![])]));
        let b_widget = tree.find_all("tree-item")[1];

        view.try_refresh(&mut tree, node(a, "root2", vec![node(d, "d", vec![]), leaf_b]));
        assert_eq!(items(&tree), vec!["root2", "d", "b"]);
        assert_eq!(tree.find_all("tree-item")[2], b_widget);
        assert_eq!(view.view().item_count(), 3);
        // Window, tree widget and three items.
        assert_eq!(tree.len(), 5);
    }
}
