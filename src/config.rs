use serde::{Deserialize, Serialize};

use crate::node::NodeType;

/// Deepest node level the walker will enter. Kept below the point where
/// `serde_json`'s own recursion limit would reject the document first.
pub const DEFAULT_MAX_DEPTH: usize = 48;
pub const DEFAULT_MAX_NODES: usize = 50_000;
/// Markup starts two levels in: one for the component body, one for `return (`.
pub const DEFAULT_BASE_INDENT: usize = 2;

/// Per-call settings for the translator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TranslateOptions {
    pub max_depth: usize,
    pub max_nodes: usize,
    pub base_indent: usize,
    pub exportable: ExportableTypes,
}

impl Default for TranslateOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_nodes: DEFAULT_MAX_NODES,
            base_indent: DEFAULT_BASE_INDENT,
            exportable: ExportableTypes::default(),
        }
    }
}

/// Node types listed by the exportable catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportableTypes(pub Vec<NodeType>);

impl Default for ExportableTypes {
    fn default() -> Self {
        Self(vec![
            NodeType::Frame,
            NodeType::Component,
            NodeType::ComponentSet,
            NodeType::Instance,
        ])
    }
}

impl ExportableTypes {
    /// Default set plus GROUP, as the extraction screen lists them.
    pub fn with_groups() -> Self {
        let mut types = Self::default();
        types.0.push(NodeType::Group);
        types
    }

    pub fn contains(&self, kind: &NodeType) -> bool {
        self.0.contains(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_options_fill_defaults() {
        let opts: TranslateOptions = serde_json::from_str(r#"{"maxDepth": 8}"#).unwrap();
        assert_eq!(opts.max_depth, 8);
        assert_eq!(opts.max_nodes, DEFAULT_MAX_NODES);
        assert!(!opts.exportable.contains(&NodeType::Group));
    }

    #[test]
    fn groups_are_opt_in() {
        assert!(ExportableTypes::with_groups().contains(&NodeType::Group));
        assert!(ExportableTypes::with_groups().contains(&NodeType::Frame));
    }
}
