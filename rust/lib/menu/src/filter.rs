//! Permission filtering of the menu forest.

use std::collections::HashSet;

use crate::forest::Forest;
use crate::model::PermissionRecord;

/// Flatten permission records into the code set used for filtering.
pub fn permission_codes(records: &[PermissionRecord]) -> HashSet<String> {
    records.iter().map(|r| r.code.clone()).collect()
}

/// Keep leaves whose code is granted, and interior nodes with at least one
/// surviving descendant. Interior nodes are never matched on their own code.
pub fn filter_by_codes(forest: &Forest, codes: &HashSet<String>) -> Forest {
    let nodes: Vec<_> = forest.iter().collect();
    let mut keep = vec![false; nodes.len()];
    let position: std::collections::HashMap<_, _> =
        nodes.iter().enumerate().map(|(i, n)| (n.id, i)).collect();

    // Pre-order storage: walking backwards visits children before parents.
    for i in (0..nodes.len()).rev() {
        let node = nodes[i];
        keep[i] = if node.is_leaf() {
            node.code.as_ref().is_some_and(|c| codes.contains(c))
        } else {
            forest
                .children(node.id)
                .iter()
                .any(|c| keep[position[c]])
        };
    }

    forest.retain_closed(&keep)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::sample;
    use crate::model::MenuNode;

    fn codes(list: &[&str]) -> HashSet<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn drops_ungranted_sibling() {
        // A(1) -> [B(2) "x", C(3) "y"], permissions {"x"}
        let forest = Forest::from_tree(vec![MenuNode::branch(1, "A", vec![
            MenuNode::leaf(2, "B", "x", "/b"),
            MenuNode::leaf(3, "C", "y", "/c"),
        ])])
        .unwrap();

        let filtered = filter_by_codes(&forest, &codes(&["x"]));
        assert_eq!(filtered.roots(), vec![1]);
        assert_eq!(filtered.children(1), vec![2]);
        assert!(!filtered.contains(3));
    }

    #[test]
    fn interior_survives_through_deep_descendant() {
        let forest = Forest::from_tree(sample()).unwrap();
        let filtered = filter_by_codes(&forest, &codes(&["student:move"]));

        let ids: Vec<_> = filtered.iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![1, 3, 5]);
        assert_eq!(filtered.ancestors(5), vec![3, 1]);
        assert_eq!(filtered.node(5).unwrap().depth, 2);
    }

    #[test]
    fn interior_code_is_not_a_grant() {
        let mut root = MenuNode::branch(1, "Admin", vec![MenuNode::leaf(2, "Users", "user:list", "/users")]);
        root.code = Some("admin".to_string());
        let forest = Forest::from_tree(vec![root]).unwrap();

        let filtered = filter_by_codes(&forest, &codes(&["admin"]));
        assert!(filtered.is_empty());
    }

    #[test]
    fn childless_container_without_code_is_dropped() {
        let forest = Forest::from_tree(vec![
            MenuNode::branch(1, "Empty", vec![]),
            MenuNode::leaf(2, "Settings", "sys:settings", "/settings"),
        ])
        .unwrap();
        let filtered = filter_by_codes(&forest, &codes(&["sys:settings"]));
        assert_eq!(filtered.roots(), vec![2]);
    }

    #[test]
    fn no_permissions_yields_empty_forest() {
        let forest = Forest::from_tree(sample()).unwrap();
        assert!(filter_by_codes(&forest, &HashSet::new()).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let forest = Forest::from_tree(sample()).unwrap();
        let all = codes(&["class:list", "student:list", "student:move", "sys:settings"]);
        let filtered = filter_by_codes(&forest, &all);
        assert_eq!(filtered, forest);
    }

    #[test]
    fn codes_from_records() {
        let records = vec![
            PermissionRecord { id: 1, code: "x".into(), menu_id: Some(2), name: String::new() },
            PermissionRecord { id: 2, code: "x".into(), menu_id: Some(3), name: String::new() },
            PermissionRecord { id: 3, code: "y".into(), menu_id: None, name: String::new() },
        ];
        assert_eq!(permission_codes(&records), codes(&["x", "y"]));
    }
}
