//! Exportable-node catalog: which frames/components a user can pick for export,
//! with the page-rooted breadcrumb path shown next to each.
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::config::ExportableTypes;
use crate::error::Result;
use crate::node::{DesignFile, Node, NodeType};
use crate::traverse::{walk_all, Visitor, Walk};

pub const PATH_SEPARATOR: &str = " / ";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportableNode {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: NodeType,
    pub path: String,
    /// Direct parent's id; absent for nodes sitting right on a page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// ENUMERATION
// ————————————————————————————————————————————————————————————————————————————

struct Frame<'a> {
    name: Option<&'a str>,
    id: Option<&'a str>,
}

struct Collect<'a, 't> {
    types: &'t ExportableTypes,
    /// The walk starts at a DOCUMENT: depth 0 is the document, depth 1 pages.
    from_document: bool,
    stack: Vec<Frame<'a>>,
    out: Vec<ExportableNode>,
}

impl<'a> Visitor<'a> for Collect<'a, '_> {
    fn enter(&mut self, node: &'a Node, depth: usize) -> Walk {
        if self.from_document && depth == 0 {
            self.stack.push(Frame { name: None, id: None });
            return Walk::Continue;
        }
        if self.from_document && depth == 1 {
            self.stack.push(Frame { name: Some(node.display_name()), id: None });
            return Walk::Continue;
        }

        let parent = self.stack.last().and_then(|f| f.id).map(str::to_string);
        self.stack.push(Frame { name: Some(node.display_name()), id: Some(node.id.as_str()) });
        if self.types.contains(&node.kind) {
            let path = self
                .stack
                .iter()
                .filter_map(|f| f.name)
                .collect::<Vec<_>>()
                .join(PATH_SEPARATOR);
            self.out.push(ExportableNode {
                id: node.id.clone(),
                name: node.display_name().to_string(),
                kind: node.kind.clone(),
                path,
                parent,
            });
        }
        Walk::Continue
    }

    fn leave(&mut self, _node: &'a Node, _depth: usize) {
        self.stack.pop();
    }
}

/// Exportable nodes in pre-order. A DOCUMENT root seeds each path with the
/// page name and is itself never listed, nor are its pages.
pub fn enumerate_exportable(
    root: &Node,
    types: &ExportableTypes,
    max_depth: usize,
) -> Result<Vec<ExportableNode>> {
    let mut collect = Collect {
        types,
        from_document: root.kind == NodeType::Document,
        stack: Vec::new(),
        out: Vec::new(),
    };
    walk_all(root, &mut collect, max_depth)?;
    log::debug!("catalog: {} exportable nodes under {}", collect.out.len(), root.id);
    Ok(collect.out)
}

/// Document catalog plus published components that the tree walk did not
/// reach, listed under a synthetic `Components` path.
pub fn catalog_file(
    file: &DesignFile,
    types: &ExportableTypes,
    max_depth: usize,
) -> Result<Vec<ExportableNode>> {
    let mut entries = enumerate_exportable(&file.document, types, max_depth)?;
    let seen = entries.iter().map(|e| e.id.clone()).collect::<BTreeSet<_>>();
    for (id, meta) in &file.components {
        if seen.contains(id) {
            continue;
        }
        entries.push(ExportableNode {
            id: id.clone(),
            name: meta.name.clone(),
            kind: NodeType::Component,
            path: format!("Components{PATH_SEPARATOR}{}", meta.name),
            parent: None,
        });
    }
    Ok(entries)
}

// ————————————————————————————————————————————————————————————————————————————
// FILTERING
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    /// Case-insensitive substring of name or path.
    pub search: Option<String>,
    pub node_type: Option<NodeType>,
}

impl CatalogFilter {
    pub fn matches(&self, entry: &ExportableNode) -> bool {
        let search_ok = match self.search.as_deref().filter(|s| !s.is_empty()) {
            None => true,
            Some(term) => {
                let term = term.to_lowercase();
                entry.name.to_lowercase().contains(&term) || entry.path.to_lowercase().contains(&term)
            }
        };
        let type_ok = self.node_type.as_ref().is_none_or(|kind| *kind == entry.kind);
        search_ok && type_ok
    }

    pub fn apply(&self, entries: Vec<ExportableNode>) -> Vec<ExportableNode> {
        entries.into_iter().filter(|e| self.matches(e)).collect()
    }
}

/// Distinct type tags present in a catalog, alphabetically.
pub fn component_types(entries: &[ExportableNode]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.kind.to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::ComponentMeta;
    use pretty_assertions::assert_eq;

    fn document() -> Node {
        Node::new("0:0", "Document", NodeType::Document).with_children(vec![
            Node::new("0:1", "Page1", NodeType::Page).with_children(vec![
                Node::new("1:1", "Button", NodeType::Frame)
                    .with_children(vec![Node::new("1:2", "Label", NodeType::Text)]),
            ]),
            Node::new("0:2", "Icons", NodeType::Page).with_children(vec![
                Node::new("2:1", "Set", NodeType::ComponentSet).with_children(vec![
                    Node::new("2:2", "Group", NodeType::Group)
                        .with_children(vec![Node::new("2:3", "", NodeType::Component)]),
                ]),
            ]),
        ])
    }

    #[test]
    fn single_frame_on_a_page() {
        let root = Node::new("0:0", "Document", NodeType::Document).with_children(vec![
            Node::new("0:1", "Page1", NodeType::Page).with_children(vec![
                Node::new("1:1", "Button", NodeType::Frame)
                    .with_children(vec![Node::new("1:2", "Label", NodeType::Text)]),
            ]),
        ]);
        let entries = enumerate_exportable(&root, &ExportableTypes::default(), 48).unwrap();
        assert_eq!(
            entries,
            vec![ExportableNode {
                id: "1:1".into(),
                name: "Button".into(),
                kind: NodeType::Frame,
                path: "Page1 / Button".into(),
                parent: None,
            }]
        );
    }

    #[test]
    fn paths_parents_and_groups() {
        let entries = enumerate_exportable(&document(), &ExportableTypes::default(), 48).unwrap();
        let summary = entries
            .iter()
            .map(|e| (e.path.as_str(), e.parent.as_deref()))
            .collect::<Vec<_>>();
        assert_eq!(
            summary,
            vec![
                ("Page1 / Button", None),
                ("Icons / Set", None),
                ("Icons / Set / Group / Unnamed", Some("2:2")),
            ]
        );

        let with_groups = enumerate_exportable(&document(), &ExportableTypes::with_groups(), 48).unwrap();
        assert_eq!(with_groups.len(), 4);
        assert_eq!(with_groups[2].path, "Icons / Set / Group");
        assert_eq!(with_groups[2].parent.as_deref(), Some("2:1"));
    }

    #[test]
    fn non_document_root_starts_path_at_root() {
        let frame = Node::new("5:0", "Card", NodeType::Frame)
            .with_children(vec![Node::new("5:1", "Avatar", NodeType::Instance)]);
        let entries = enumerate_exportable(&frame, &ExportableTypes::default(), 48).unwrap();
        assert_eq!(entries[0].path, "Card");
        assert_eq!(entries[1].path, "Card / Avatar");
        assert_eq!(entries[1].parent.as_deref(), Some("5:0"));
    }

    #[test]
    fn file_components_fill_gaps() {
        let mut file = DesignFile { name: Some("Kit".into()), document: document(), components: Default::default() };
        file.components.insert("1:1".into(), ComponentMeta { name: "Button".into(), description: String::new() });
        file.components.insert("9:9".into(), ComponentMeta { name: "Remote".into(), description: String::new() });
        let entries = catalog_file(&file, &ExportableTypes::default(), 48).unwrap();
        assert_eq!(entries.len(), 4);
        let last = entries.last().unwrap();
        assert_eq!(last.id, "9:9");
        assert_eq!(last.kind, NodeType::Component);
        assert_eq!(last.path, "Components / Remote");
    }

    #[test]
    fn filter_and_types() {
        let entries = enumerate_exportable(&document(), &ExportableTypes::with_groups(), 48).unwrap();
        let by_search = CatalogFilter { search: Some("ICONS".into()), node_type: None };
        assert_eq!(by_search.apply(entries.clone()).len(), 3);

        let by_type = CatalogFilter { search: None, node_type: Some(NodeType::Frame) };
        assert_eq!(by_type.apply(entries.clone())[0].name, "Button");

        assert_eq!(component_types(&entries), vec!["COMPONENT", "COMPONENT_SET", "FRAME", "GROUP"]);
    }
}
