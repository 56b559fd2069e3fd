//! Path-aware decoding of design trees.
//!
//! A tree coming from the document API is only trusted after it decodes into
//! [`Node`]; when it doesn't, the error names the JSON path of the bad value.
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{Result, TranslateError};
use crate::node::{DesignFile, Node};

/// Deserialize with JSON-path context in error messages.
pub fn from_str_with_path<T: DeserializeOwned>(src: &str) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_str(src);
    serde_path_to_error::deserialize::<_, T>(de).map_err(structure_error)
}

pub fn from_value_with_path<T: DeserializeOwned>(value: Value) -> Result<T> {
    serde_path_to_error::deserialize::<_, T>(value).map_err(structure_error)
}

pub fn node_from_str(src: &str) -> Result<Node> {
    from_str_with_path(src)
}

pub fn node_from_value(value: Value) -> Result<Node> {
    from_value_with_path(value)
}

/// Either a whole file envelope (`{ "document": … }`) or a bare node.
#[derive(Debug, Clone)]
pub enum DesignInput {
    File(DesignFile),
    Node(Node),
}

impl DesignInput {
    pub fn from_value(value: Value) -> Result<Self> {
        let is_file = value.as_object().is_some_and(|map| map.contains_key("document"));
        if is_file {
            from_value_with_path(value).map(DesignInput::File)
        } else {
            node_from_value(value).map(DesignInput::Node)
        }
    }

    pub fn root(&self) -> &Node {
        match self {
            DesignInput::File(file) => &file.document,
            DesignInput::Node(node) => node,
        }
    }
}

fn structure_error<E: std::fmt::Display>(err: serde_path_to_error::Error<E>) -> TranslateError {
    let path = err.path().to_string();
    TranslateError::Structure { path, message: err.into_inner().to_string() }
}
