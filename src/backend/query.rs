//! Widget queries: by name, by kind, generic predicate matching.
//!
//! Queries walk the mounted windows in tree order, so detached widgets held
//! in a reuse pool are never returned.

use super::tree::WidgetTree;
use super::widget::{WidgetData, WidgetId};

impl WidgetTree {
    /// First mounted widget carrying `name`, in tree order.
    pub fn find(&self, name: &str) -> Option<WidgetId> {
        self.iter_mounted()
            .find(|(_, data)| data.has_name(name))
            .map(|(id, _)| id)
    }

    /// Every mounted widget carrying `name`, in tree order.
    pub fn find_all(&self, name: &str) -> Vec<WidgetId> {
        self.query_all(|data| data.has_name(name))
    }

    /// Every mounted widget of the given kind, in tree order.
    pub fn query_by_kind(&self, kind: &str) -> Vec<WidgetId> {
        self.query_all(|data| data.kind == kind)
    }

    /// Every mounted widget matching an arbitrary predicate.
    pub fn query_all(&self, predicate: impl Fn(&WidgetData) -> bool) -> Vec<WidgetId> {
        self.iter_mounted()
            .filter(|(_, data)| predicate(data))
            .map(|(id, _)| id)
            .collect()
    }

    /// First widget named `name` below `start` (inclusive), in tree order.
    pub fn find_in(&self, start: WidgetId, name: &str) -> Option<WidgetId> {
        self.walk_depth_first(start)
            .into_iter()
            .find(|&id| self.get(id).is_some_and(|data| data.has_name(name)))
    }

    fn iter_mounted(&self) -> impl Iterator<Item = (WidgetId, &WidgetData)> {
        self.walk_mounted()
            .into_iter()
            .filter_map(move |id| self.get(id).map(|data| (id, data)))
    }
}
