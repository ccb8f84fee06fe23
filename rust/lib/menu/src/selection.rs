//! Tri-state checkbox selection over a forest.
//!
//! The selection set stores ids; whether an interior node is checked is
//! always derived from its descendant leaves, never stored on its own.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::forest::Forest;
use crate::model::NodeId;

/// Rendered state of one checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CheckState {
    Unchecked,
    Indeterminate,
    Checked,
}

/// Ids explicitly selected in one edit session. Ordered, so payloads are
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectionSet(BTreeSet<NodeId>);

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.0.contains(&id)
    }

    pub fn insert(&mut self, id: NodeId) -> bool {
        self.0.insert(id)
    }

    pub fn remove(&mut self, id: NodeId) -> bool {
        self.0.remove(&id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.0.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<NodeId> {
        self.0.iter().copied().collect()
    }
}

impl FromIterator<NodeId> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Selection engine: a forest plus the ids selected in it.
#[derive(Debug, Clone, PartialEq)]
pub struct TreeSelection {
    forest: Arc<Forest>,
    selected: SelectionSet,
    disabled: bool,
}

impl TreeSelection {
    /// Start a session from the persisted selection. Ids are kept as given.
    pub fn new(forest: Arc<Forest>, initial: impl IntoIterator<Item = NodeId>) -> Self {
        Self {
            forest,
            selected: initial.into_iter().collect(),
            disabled: false,
        }
    }

    pub fn forest(&self) -> &Arc<Forest> {
        &self.forest
    }

    pub fn selected(&self) -> &SelectionSet {
        &self.selected
    }

    pub fn selected_ids(&self) -> Vec<NodeId> {
        self.selected.to_vec()
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Leaf: own id selected. Interior: every descendant leaf selected.
    pub fn is_checked(&self, id: NodeId) -> bool {
        if !self.forest.contains(id) {
            return false;
        }
        if self.forest.is_leaf(id) {
            return self.selected.contains(id);
        }
        self.forest
            .leaf_descendants(id)
            .into_iter()
            .all(|leaf| self.selected.contains(leaf))
    }

    /// Interior node with some, but not all, descendant leaves selected.
    pub fn is_indeterminate(&self, id: NodeId) -> bool {
        if self.forest.is_leaf(id) || !self.forest.contains(id) {
            return false;
        }
        let leaves = self.forest.leaf_descendants(id);
        let hit = leaves.iter().filter(|&&l| self.selected.contains(l)).count();
        hit > 0 && hit < leaves.len()
    }

    pub fn check_state(&self, id: NodeId) -> CheckState {
        if self.is_checked(id) {
            CheckState::Checked
        } else if self.is_indeterminate(id) {
            CheckState::Indeterminate
        } else {
            CheckState::Unchecked
        }
    }

    /// Number of selected leaves under `id` and the total leaf count.
    /// A leaf counts itself.
    pub fn checked_leaf_count(&self, id: NodeId) -> (usize, usize) {
        let leaves = if self.forest.is_leaf(id) {
            vec![id]
        } else {
            self.forest.leaf_descendants(id)
        };
        let hit = leaves.iter().filter(|&&l| self.selected.contains(l)).count();
        (hit, leaves.len())
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Check or uncheck `id` with its whole subtree, then repair ancestors.
    ///
    /// Checking re-evaluates every ancestor up to the root and adds each one
    /// whose children are now all checked. Unchecking drops every ancestor.
    /// No-op while disabled or for unknown ids.
    pub fn set_selected(&mut self, id: NodeId, checked: bool) {
        if self.disabled {
            debug!(id, checked, "selection disabled, ignoring toggle");
            return;
        }
        if !self.forest.contains(id) {
            debug!(id, "toggle on unknown node ignored");
            return;
        }

        let subtree = std::iter::once(id).chain(self.forest.descendants(id));
        if checked {
            for n in subtree {
                self.selected.insert(n);
            }
            for ancestor in self.forest.ancestors(id) {
                let complete = self
                    .forest
                    .children(ancestor)
                    .into_iter()
                    .all(|c| self.is_checked(c));
                if complete {
                    self.selected.insert(ancestor);
                }
            }
        } else {
            for n in subtree {
                self.selected.remove(n);
            }
            for ancestor in self.forest.ancestors(id) {
                self.selected.remove(ancestor);
            }
        }
    }

    /// Check every root subtree.
    pub fn select_all(&mut self) {
        for root in self.forest.roots() {
            self.set_selected(root, true);
        }
    }

    /// Empty the selection.
    pub fn clear(&mut self) {
        if self.disabled {
            debug!("selection disabled, ignoring clear");
            return;
        }
        self.selected = SelectionSet::new();
    }
}
