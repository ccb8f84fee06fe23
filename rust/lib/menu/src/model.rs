//! Wire shapes returned by the menu/permission source.

use serde::{Deserialize, Serialize};

/// Node identifier, unique within one forest.
pub type NodeId = i64;

/// A menu (or permission) node as delivered by the backend: nested,
/// each node owning its children.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuNode {
    pub id: NodeId,

    /// Owning node. `None` or `Some(0)` for roots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,

    /// Display label. e.g. "Students", "Attendance"
    #[serde(default)]
    pub name: String,

    /// Permission key, only meaningful on leaf menus. e.g. "student:list"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,

    /// Route path. e.g. "/students"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Icon name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    #[serde(default)]
    pub children: Vec<MenuNode>,
}

impl MenuNode {
    /// Create a container node.
    pub fn branch(id: NodeId, name: &str, children: Vec<MenuNode>) -> Self {
        let children = children
            .into_iter()
            .map(|mut c| {
                c.parent_id = Some(id);
                c
            })
            .collect();
        Self {
            id,
            parent_id: None,
            name: name.to_string(),
            code: None,
            path: None,
            icon: None,
            children,
        }
    }

    /// Create a leaf menu with a permission code and a route path.
    pub fn leaf(id: NodeId, name: &str, code: &str, path: &str) -> Self {
        Self {
            id,
            parent_id: None,
            name: name.to_string(),
            code: (!code.is_empty()).then(|| code.to_string()),
            path: (!path.is_empty()).then(|| path.to_string()),
            icon: None,
            children: vec![],
        }
    }

    /// Set the route path.
    pub fn with_path(mut self, path: &str) -> Self {
        self.path = Some(path.to_string());
        self
    }

    /// Set the icon.
    pub fn with_icon(mut self, icon: &str) -> Self {
        self.icon = Some(icon.to_string());
        self
    }
}

/// A data-permission record granted to the current actor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PermissionRecord {
    pub id: NodeId,
    pub code: String,
    /// Menu this permission belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub menu_id: Option<NodeId>,
    #[serde(default)]
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_backend_menu() {
        let json = r#"[
            {"id": 1, "name": "Academics", "children": [
                {"id": 2, "parentId": 1, "name": "Classes", "code": "class:list", "path": "/classes"}
            ]}
        ]"#;
        let nodes: Vec<MenuNode> = serde_json::from_str(json).unwrap();
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].parent_id, None);
        assert_eq!(nodes[0].children[0].parent_id, Some(1));
        assert_eq!(nodes[0].children[0].code.as_deref(), Some("class:list"));
        assert!(nodes[0].children[0].children.is_empty());
    }

    #[test]
    fn branch_links_children() {
        let n = MenuNode::branch(1, "A", vec![MenuNode::leaf(2, "B", "x", "")]);
        assert_eq!(n.children[0].parent_id, Some(1));
        assert_eq!(n.children[0].path, None);
    }

    #[test]
    fn deserialize_permission_record() {
        let p: PermissionRecord =
            serde_json::from_str(r#"{"id": 9, "code": "student:export", "menuId": 3}"#).unwrap();
        assert_eq!(p.menu_id, Some(3));
        assert!(p.name.is_empty());
    }
}
