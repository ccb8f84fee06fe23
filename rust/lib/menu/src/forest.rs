//! Arena-backed forest of menu nodes.
//!
//! Nodes live in a single `Vec` in pre-order; each slot keeps the index of
//! its parent and the indices of its children. Every walk uses an explicit
//! stack or the parent chain, so arbitrarily deep trees cannot overflow.

use std::collections::HashMap;

use crate::error::TreeError;
use crate::model::{MenuNode, NodeId};

/// One node in the arena.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub id: NodeId,
    pub label: String,
    pub code: Option<String>,
    pub path: Option<String>,
    pub icon: Option<String>,
    pub depth: usize,
    parent: Option<usize>,
    children: Vec<usize>,
}

impl Node {
    /// Whether the node owns no children.
    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Route path, treating an empty string as absent.
    pub fn route(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }
}

/// A rooted forest, read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forest {
    nodes: Vec<Node>,
    index: HashMap<NodeId, usize>,
    roots: Vec<usize>,
}

impl Forest {
    /// Build from the nested shape the backend returns.
    ///
    /// A declared `parent_id` must agree with the nesting: `None`/`0` for
    /// roots, the enclosing node's id for children.
    pub fn from_tree(tree: Vec<MenuNode>) -> Result<Self, TreeError> {
        let mut forest = Forest::default();
        let mut stack: Vec<(MenuNode, Option<usize>)> =
            tree.into_iter().rev().map(|n| (n, None)).collect();

        while let Some((mut menu, parent)) = stack.pop() {
            let actual = parent.map(|p| forest.nodes[p].id);
            let consistent = match (menu.parent_id, actual) {
                (None, _) => true,
                (Some(0), None) => true,
                (Some(declared), Some(actual)) => declared == actual,
                (Some(_), None) => false,
            };
            if !consistent {
                return Err(TreeError::ParentMismatch {
                    id: menu.id,
                    declared: menu.parent_id,
                    actual,
                });
            }

            let children = std::mem::take(&mut menu.children);
            let idx = forest.push(menu, parent)?;
            stack.extend(children.into_iter().rev().map(|c| (c, Some(idx))));
        }

        Ok(forest)
    }

    /// Build from flat records linked by `parent_id`. Nested `children` on
    /// the records are ignored. Sibling order follows input order.
    pub fn from_flat(records: Vec<MenuNode>) -> Result<Self, TreeError> {
        let mut seen = HashMap::new();
        for (i, r) in records.iter().enumerate() {
            if seen.insert(r.id, i).is_some() {
                return Err(TreeError::DuplicateId(r.id));
            }
        }

        let mut roots = Vec::new();
        let mut children_of: HashMap<NodeId, Vec<usize>> = HashMap::new();
        for (i, r) in records.iter().enumerate() {
            match r.parent_id {
                None | Some(0) => roots.push(i),
                Some(p) if seen.contains_key(&p) => children_of.entry(p).or_default().push(i),
                Some(p) => return Err(TreeError::UnknownParent { id: r.id, parent: p }),
            }
        }

        let mut slots: Vec<Option<MenuNode>> = records.into_iter().map(Some).collect();
        let mut forest = Forest::default();
        let mut stack: Vec<(usize, Option<usize>)> =
            roots.into_iter().rev().map(|i| (i, None)).collect();

        while let Some((i, parent)) = stack.pop() {
            let Some(mut menu) = slots[i].take() else { continue };
            menu.children.clear();
            let id = menu.id;
            let idx = forest.push(menu, parent)?;
            if let Some(kids) = children_of.get(&id) {
                stack.extend(kids.iter().rev().map(|&k| (k, Some(idx))));
            }
        }

        // Anything never reached from a root hangs off a parent cycle.
        if let Some(stranded) = slots.iter().flatten().next() {
            return Err(TreeError::Cycle(stranded.id));
        }

        Ok(forest)
    }

    /// A forest of root leaves, e.g. flat data permissions.
    pub fn from_leaves<I, S>(leaves: I) -> Result<Self, TreeError>
    where
        I: IntoIterator<Item = (NodeId, S)>,
        S: Into<String>,
    {
        let mut forest = Forest::default();
        for (id, label) in leaves {
            let node = MenuNode {
                id,
                parent_id: None,
                name: label.into(),
                code: None,
                path: None,
                icon: None,
                children: vec![],
            };
            forest.push(node, None)?;
        }
        Ok(forest)
    }

    fn push(&mut self, menu: MenuNode, parent: Option<usize>) -> Result<usize, TreeError> {
        let idx = self.nodes.len();
        if self.index.insert(menu.id, idx).is_some() {
            return Err(TreeError::DuplicateId(menu.id));
        }
        let depth = parent.map(|p| self.nodes[p].depth + 1).unwrap_or(0);
        self.nodes.push(Node {
            id: menu.id,
            label: menu.name,
            code: menu.code,
            path: menu.path,
            icon: menu.icon,
            depth,
            parent,
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.nodes[p].children.push(idx),
            None => self.roots.push(idx),
        }
        Ok(idx)
    }

    /// Copy of this forest keeping only nodes for which `keep` is true.
    /// `keep` must be closed upward: a kept node's parent is kept too.
    pub(crate) fn retain_closed(&self, keep: &[bool]) -> Forest {
        let mut out = Forest::default();
        let mut remap: Vec<Option<usize>> = vec![None; self.nodes.len()];
        for (old, node) in self.nodes.iter().enumerate() {
            if !keep[old] {
                continue;
            }
            let parent = node.parent.and_then(|p| remap[p]);
            let idx = out.nodes.len();
            out.index.insert(node.id, idx);
            out.nodes.push(Node {
                parent,
                children: Vec::new(),
                ..node.clone()
            });
            match parent {
                Some(p) => out.nodes[p].children.push(idx),
                None => out.roots.push(idx),
            }
            remap[old] = Some(idx);
        }
        out
    }

    // ── Lookups ─────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    /// Whether `id` is a leaf. Unknown ids are not leaves.
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.node(id).map(Node::is_leaf).unwrap_or(false)
    }

    /// Root ids in order.
    pub fn roots(&self) -> Vec<NodeId> {
        self.roots.iter().map(|&i| self.nodes[i].id).collect()
    }

    /// Direct children of `id`, in order.
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.index
            .get(&id)
            .map(|&i| self.nodes[i].children.iter().map(|&c| self.nodes[c].id).collect())
            .unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let &i = self.index.get(&id)?;
        self.nodes[i].parent.map(|p| self.nodes[p].id)
    }

    /// All nodes in pre-order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    // ── Traversal ───────────────────────────────────────────────────

    /// Every node below `id` (excluding `id`), in pre-order.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let Some(&start) = self.index.get(&id) else {
            return Vec::new();
        };
        let mut out = Vec::new();
        let mut stack: Vec<usize> = self.nodes[start].children.iter().rev().copied().collect();
        while let Some(i) = stack.pop() {
            out.push(self.nodes[i].id);
            stack.extend(self.nodes[i].children.iter().rev());
        }
        out
    }

    /// Whole forest as `(id, depth)` pairs, in pre-order.
    pub fn preorder(&self) -> Vec<(NodeId, usize)> {
        self.nodes.iter().map(|n| (n.id, n.depth)).collect()
    }

    /// Leaves below `id` (excluding `id` itself).
    pub fn leaf_descendants(&self, id: NodeId) -> Vec<NodeId> {
        self.descendants(id)
            .into_iter()
            .filter(|&d| self.is_leaf(d))
            .collect()
    }

    /// Ancestors of `id`, nearest first.
    pub fn ancestors(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(&start) = self.index.get(&id) else {
            return out;
        };
        let mut cur = self.nodes[start].parent;
        while let Some(p) = cur {
            out.push(self.nodes[p].id);
            cur = self.nodes[p].parent;
        }
        out
    }

    /// Rebuild the nested shape.
    pub fn to_tree(&self) -> Vec<MenuNode> {
        let mut built: Vec<Option<MenuNode>> = vec![None; self.nodes.len()];
        // Pre-order storage: every child sits after its parent, so a
        // reverse sweep always finds children already built.
        for i in (0..self.nodes.len()).rev() {
            let node = &self.nodes[i];
            let children = node
                .children
                .iter()
                .filter_map(|&c| built[c].take())
                .collect();
            built[i] = Some(MenuNode {
                id: node.id,
                parent_id: node.parent.map(|p| self.nodes[p].id),
                name: node.label.clone(),
                code: node.code.clone(),
                path: node.path.clone(),
                icon: node.icon.clone(),
                children,
            });
        }
        self.roots.iter().filter_map(|&r| built[r].take()).collect()
    }
}
