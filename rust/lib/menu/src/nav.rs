//! Sidebar navigation state: auto-expansion toward the active route with a
//! manual override layer on top.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::forest::Forest;
use crate::model::NodeId;

/// A user's explicit choice for one node. Absent from the map means the
/// node follows auto-expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Override {
    Expanded,
    Collapsed,
}

/// What a click on a sidebar node resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Node with children: expansion flipped, no navigation.
    Toggled { expanded: bool },
    /// Leaf with a route: navigate, expansion untouched.
    Navigate(String),
    /// Leaf without a route, or unknown id.
    Ignored,
}

/// One visible sidebar row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavRow {
    pub id: NodeId,
    pub label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    pub depth: usize,
    pub has_children: bool,
    pub expanded: bool,
    pub active: bool,
}

/// Expansion and highlight state for one sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct NavState {
    forest: Arc<Forest>,
    route: String,
    overrides: HashMap<NodeId, Override>,
}

impl NavState {
    pub fn new(forest: Arc<Forest>, route: impl Into<String>) -> Self {
        Self {
            forest,
            route: route.into(),
            overrides: HashMap::new(),
        }
    }

    pub fn forest(&self) -> &Arc<Forest> {
        &self.forest
    }

    pub fn route(&self) -> &str {
        &self.route
    }

    /// Follow a route change. Manual overrides are kept.
    pub fn set_route(&mut self, route: impl Into<String>) {
        self.route = route.into();
    }

    /// Drop every manual override (full reload).
    pub fn reset(&mut self) {
        self.overrides.clear();
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Exact route match on the node's own path. No prefix matching.
    pub fn is_active(&self, id: NodeId) -> bool {
        self.forest
            .node(id)
            .and_then(|n| n.route())
            .is_some_and(|p| p == self.route)
    }

    /// Some descendant (not the node itself) is the active route.
    pub fn should_auto_expand(&self, id: NodeId) -> bool {
        self.forest
            .descendants(id)
            .into_iter()
            .any(|d| self.is_active(d))
    }

    /// Collapsed override, then expanded override, then auto-expansion.
    pub fn is_expanded(&self, id: NodeId) -> bool {
        match self.overrides.get(&id) {
            Some(Override::Collapsed) => false,
            Some(Override::Expanded) => true,
            None => self.should_auto_expand(id),
        }
    }

    pub fn override_of(&self, id: NodeId) -> Option<Override> {
        self.overrides.get(&id).copied()
    }

    /// Nodes the user explicitly opened, sorted.
    pub fn manually_expanded(&self) -> Vec<NodeId> {
        self.with_override(Override::Expanded)
    }

    /// Nodes the user explicitly closed, sorted.
    pub fn manually_collapsed(&self) -> Vec<NodeId> {
        self.with_override(Override::Collapsed)
    }

    fn with_override(&self, want: Override) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self
            .overrides
            .iter()
            .filter(|(_, o)| **o == want)
            .map(|(id, _)| *id)
            .collect();
        ids.sort_unstable();
        ids
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Flip the rendered state of a node with children and pin it with an
    /// override. Returns the new state, or `None` for leaves and unknown ids.
    pub fn toggle(&mut self, id: NodeId) -> Option<bool> {
        let node = self.forest.node(id)?;
        if node.is_leaf() {
            return None;
        }
        let expanded = !self.is_expanded(id);
        let pin = if expanded { Override::Expanded } else { Override::Collapsed };
        self.overrides.insert(id, pin);
        debug!(id, expanded, "sidebar node toggled");
        Some(expanded)
    }

    /// Dispatch a click: branches toggle, routed leaves navigate.
    pub fn click(&mut self, id: NodeId) -> ClickOutcome {
        let Some(node) = self.forest.node(id) else {
            return ClickOutcome::Ignored;
        };
        if node.is_leaf() {
            return match node.route() {
                Some(path) => ClickOutcome::Navigate(path.to_string()),
                None => ClickOutcome::Ignored,
            };
        }
        match self.toggle(id) {
            Some(expanded) => ClickOutcome::Toggled { expanded },
            None => ClickOutcome::Ignored,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────

    /// Visible rows in pre-order; children of collapsed nodes are skipped.
    pub fn rows(&self) -> Vec<NavRow> {
        let mut rows = Vec::new();
        let mut stack: Vec<NodeId> = self.forest.roots().into_iter().rev().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.forest.node(id) else { continue };
            let has_children = !node.is_leaf();
            let expanded = has_children && self.is_expanded(id);
            rows.push(NavRow {
                id,
                label: node.label.clone(),
                icon: node.icon.clone(),
                path: node.route().map(str::to_string),
                depth: node.depth,
                has_children,
                expanded,
                active: self.is_active(id),
            });
            if expanded {
                stack.extend(self.forest.children(id).into_iter().rev());
            }
        }
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;
    use crate::model::MenuNode;

    fn sidebar(route: &str) -> NavState {
        NavState::new(Arc::new(Forest::from_tree(sample()).unwrap()), route)
    }

    fn users_forest() -> Arc<Forest> {
        // A(1) -> [D(2) /users]
        Arc::new(
            Forest::from_tree(vec![MenuNode::branch(1, "A", vec![
                MenuNode::leaf(2, "D", "user:list", "/users"),
            ])])
            .unwrap(),
        )
    }

    #[test]
    fn active_descendant_auto_expands() {
        let mut nav = NavState::new(users_forest(), "/users");
        assert!(nav.should_auto_expand(1));
        assert!(nav.is_expanded(1));

        assert_eq!(nav.toggle(1), Some(false));
        assert_eq!(nav.manually_collapsed(), vec![1]);
        assert!(nav.should_auto_expand(1));
        assert!(!nav.is_expanded(1));
    }

    #[test]
    fn auto_expand_reaches_transitive_descendants() {
        let nav = sidebar("/students/transfers");
        assert!(nav.should_auto_expand(1));
        assert!(nav.should_auto_expand(3));
        assert!(!nav.should_auto_expand(5));
        assert!(!nav.should_auto_expand(6));
    }

    #[test]
    fn active_is_exact_match_only() {
        let nav = sidebar("/students/transfers");
        assert!(nav.is_active(5));
        assert!(!nav.is_active(4), "prefix /students must not match");

        let nav = sidebar("/students");
        assert!(nav.is_active(4));
        assert!(!nav.is_active(5));
    }

    #[test]
    fn node_is_not_its_own_auto_expand_trigger() {
        let forest = Arc::new(
            Forest::from_tree(vec![MenuNode::branch(1, "A", vec![
                MenuNode::leaf(2, "B", "b", "/b"),
            ])
            .with_path("/a")])
            .unwrap(),
        );
        let nav = NavState::new(forest, "/a");
        assert!(nav.is_active(1));
        assert!(!nav.should_auto_expand(1));
        assert!(!nav.is_expanded(1));
    }

    #[test]
    fn default_state_is_collapsed() {
        let nav = sidebar("/nowhere");
        for node in nav.forest().iter() {
            assert!(!nav.is_expanded(node.id));
        }
        let rows = nav.rows();
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 6]);
    }

    #[test]
    fn toggle_keeps_override_classes_disjoint() {
        let mut nav = sidebar("/classes");
        for _ in 0..4 {
            for id in [1, 3] {
                nav.toggle(id);
                let open = nav.manually_expanded();
                let closed = nav.manually_collapsed();
                assert!(open.iter().all(|i| !closed.contains(i)));
                assert!(open.contains(&id) ^ closed.contains(&id));
            }
        }
    }

    #[test]
    fn toggle_flips_rendered_state() {
        let mut nav = sidebar("/nowhere");
        assert_eq!(nav.toggle(1), Some(true));
        assert_eq!(nav.override_of(1), Some(Override::Expanded));
        assert_eq!(nav.toggle(1), Some(false));
        assert_eq!(nav.override_of(1), Some(Override::Collapsed));
        assert_eq!(nav.toggle(2), None);
        assert_eq!(nav.toggle(99), None);
    }

    #[test]
    fn manual_expand_survives_route_change_and_reset_clears_it() {
        let mut nav = sidebar("/nowhere");
        nav.toggle(1);
        nav.set_route("/settings");
        assert!(nav.is_expanded(1));

        nav.reset();
        assert!(!nav.is_expanded(1));
        assert!(nav.manually_expanded().is_empty());
    }

    #[test]
    fn click_dispatch() {
        let mut forest_tree = sample();
        forest_tree.push(MenuNode::leaf(7, "Help", "help", ""));
        let mut nav = NavState::new(Arc::new(Forest::from_tree(forest_tree).unwrap()), "/");

        assert_eq!(nav.click(1), ClickOutcome::Toggled { expanded: true });
        assert_eq!(nav.click(2), ClickOutcome::Navigate("/classes".into()));
        assert_eq!(nav.override_of(2), None);
        assert_eq!(nav.click(7), ClickOutcome::Ignored);
        assert_eq!(nav.click(404), ClickOutcome::Ignored);
        assert_eq!(nav.click(1), ClickOutcome::Toggled { expanded: false });
    }

    #[test]
    fn rows_follow_expansion() {
        let mut nav = sidebar("/students");
        let rows = nav.rows();
        let ids: Vec<_> = rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        let roster = rows.iter().find(|r| r.id == 4).unwrap();
        assert!(roster.active);
        assert_eq!(roster.depth, 2);
        assert_eq!(roster.path.as_deref(), Some("/students"));
        assert!(rows.iter().filter(|r| r.active).count() == 1);

        nav.toggle(3);
        let ids: Vec<_> = nav.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 6]);

        nav.toggle(1);
        let ids: Vec<_> = nav.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 6]);
    }
}
