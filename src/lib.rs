//! Design-tree → React component translator.
//!
//! Takes a node tree from a design tool's document API and produces component
//! source text, plus the structural summaries (id lists, lookups, exportable
//! node catalogs) the rest of an export pipeline needs. No I/O happens here.
pub mod catalog;
pub mod color;
pub mod config;
pub mod emit;
pub mod error;
pub mod ident;
pub mod jq_exec;
pub mod node;
pub mod path_de;
pub mod style;
pub mod traverse;

pub use catalog::{catalog_file, enumerate_exportable, CatalogFilter, ExportableNode};
pub use config::{ExportableTypes, TranslateOptions};
pub use emit::{translate, translate_value, ComponentEmission, Emitter};
pub use error::{Result, TranslateError};
pub use node::{DesignFile, Node, NodeType};
pub use path_de::DesignInput;
pub use style::{resolve as resolve_style, StyleMap, StyleValue};
pub use traverse::{collect_ids, find_by_id, NodeIndex};
