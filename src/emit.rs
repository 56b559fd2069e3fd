//! Design tree → React component source.
//!
//! Markup comes from one walk over the tree; it is then wrapped in the fixed
//! component scaffold (props interface, named export, default export).
use indexmap::IndexSet;
use serde::Serialize;
use serde_json::Value;

use crate::config::TranslateOptions;
use crate::error::Result;
use crate::ident::{component_identifier, slugify};
use crate::node::{Node, NodeType};
use crate::path_de::node_from_value;
use crate::style;
use crate::traverse::{count_nodes, walk_all, Visitor, Walk};

const REACT_IMPORT: &str = "import React from 'react';";
const INDENT: &str = "  ";

/// Output of one translate call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentEmission {
    pub component_name: String,
    pub source_text: String,
    /// Import lines at the top of `source_text`, in emission order.
    pub imports: Vec<String>,
    /// Raw tags of nodes rendered as placeholders.
    pub unsupported: Vec<String>,
}

// ————————————————————————————————————————————————————————————————————————————
// EMITTER
// ————————————————————————————————————————————————————————————————————————————

#[derive(Debug, Default)]
pub struct Emitter {
    options: TranslateOptions,
    imports: IndexSet<String>,
    unsupported: Vec<String>,
}

impl Emitter {
    pub fn new(options: TranslateOptions) -> Self {
        Self { options, ..Self::default() }
    }

    /// Clears everything a previous call accumulated.
    fn reset(&mut self) {
        self.imports.clear();
        self.unsupported.clear();
    }

    pub fn translate(&mut self, root: &Node, component_name: Option<&str>) -> Result<ComponentEmission> {
        self.reset();
        let node_count = count_nodes(root, self.options.max_nodes, self.options.max_depth)?;

        let component_name = component_identifier(component_name.unwrap_or(root.display_name()));
        self.imports.insert(REACT_IMPORT.to_string());

        let jsx = self.emit_markup(root, 0)?;
        let source_text = self.scaffold(&component_name, &jsx);
        log::debug!(
            "emitted {component_name}: {node_count} nodes, {} imports, {} placeholders",
            self.imports.len(),
            self.unsupported.len()
        );
        Ok(ComponentEmission {
            component_name,
            source_text,
            imports: self.imports.iter().cloned().collect(),
            unsupported: std::mem::take(&mut self.unsupported),
        })
    }

    /// JSX for `root` and its subtree, `depth` levels below the base indent.
    pub fn emit_markup(&mut self, root: &Node, depth: usize) -> Result<String> {
        let mut markup = Markup {
            indent_base: self.options.base_indent + depth,
            lines: Vec::new(),
            unsupported: Vec::new(),
        };
        walk_all(root, &mut markup, self.options.max_depth)?;
        for tag in &markup.unsupported {
            log::warn!("unsupported node type {tag}; emitted a placeholder");
        }
        self.unsupported.extend(markup.unsupported);
        Ok(markup.lines.join("\n"))
    }

    fn scaffold(&self, name: &str, jsx: &str) -> String {
        let imports = self.imports.iter().cloned().collect::<Vec<_>>().join("\n");
        format!(
            "{imports}

interface {name}Props {{
  children?: React.ReactNode;
  className?: string;
  onClick?: () => void;
}}

export const {name}: React.FC<{name}Props> = ({{
  children,
  className = '',
  onClick
}}) => {{
  return (
{jsx}
  );
}};

export default {name};
"
        )
    }
}

/// One-shot translation with a fresh emitter.
pub fn translate(
    root: &Node,
    component_name: Option<&str>,
    options: &TranslateOptions,
) -> Result<ComponentEmission> {
    Emitter::new(options.clone()).translate(root, component_name)
}

/// Validates an untyped tree, then translates it.
pub fn translate_value(
    value: Value,
    component_name: Option<&str>,
    options: &TranslateOptions,
) -> Result<ComponentEmission> {
    let root = node_from_value(value)?;
    translate(&root, component_name, options)
}

// ————————————————————————————————————————————————————————————————————————————
// MARKUP
// ————————————————————————————————————————————————————————————————————————————

struct Markup {
    indent_base: usize,
    lines: Vec<String>,
    unsupported: Vec<String>,
}

impl Markup {
    fn indent(&self, depth: usize) -> String {
        INDENT.repeat(self.indent_base + depth)
    }

    fn open_tag(node: &Node, tag: &str) -> String {
        let class_name = slugify(node);
        let styles = style::resolve(node).to_inline_object();
        format!(r#"<{tag} className="{class_name}" style={{{styles}}}"#)
    }
}

impl<'a> Visitor<'a> for Markup {
    fn enter(&mut self, node: &'a Node, depth: usize) -> Walk {
        let indent = self.indent(depth);
        match &node.kind {
            NodeType::Text => {
                let open = Self::open_tag(node, "span");
                let text = text_content(node.characters.as_deref());
                self.lines.push(format!("{indent}{open}>"));
                self.lines.push(format!("{indent}{INDENT}{text}"));
                self.lines.push(format!("{indent}</span>"));
                Walk::SkipChildren
            }
            NodeType::Rectangle | NodeType::Ellipse | NodeType::Vector => {
                self.lines.push(format!("{indent}{} />", Self::open_tag(node, "div")));
                Walk::SkipChildren
            }
            _ if node.is_container() => {
                let open = Self::open_tag(node, "div");
                if node.children.is_empty() {
                    self.lines.push(format!("{indent}{open} />"));
                    Walk::SkipChildren
                } else {
                    self.lines.push(format!("{indent}{open}>"));
                    Walk::Continue
                }
            }
            other => {
                self.lines.push(format!("{indent}{{/* Unsupported node type: {other} */}}"));
                self.unsupported.push(other.to_string());
                Walk::SkipChildren
            }
        }
    }

    fn leave(&mut self, node: &'a Node, depth: usize) {
        if node.is_container() && !node.children.is_empty() {
            let indent = self.indent(depth);
            self.lines.push(format!("{indent}</div>"));
        }
    }
}

/// Text child of a `<span>`. Characters JSX would read as markup or an
/// expression go through a string literal instead.
fn text_content(characters: Option<&str>) -> String {
    let text = characters.filter(|c| !c.is_empty()).unwrap_or("Text");
    if text.contains(['{', '}', '<', '>']) {
        let literal = serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
        format!("{{{literal}}}")
    } else {
        text.to_string()
    }
}
