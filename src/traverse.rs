//! The one pre-order walker every tree consumer goes through.
//!
//! Rules:
//! 1. Children are visited in source order, parent before children.
//! 2. `leave` runs after a node's subtree, or right after `enter` when the
//!    visitor returned [`Walk::SkipChildren`]. It never runs once the walk stopped.
//! 3. Entering a node deeper than the configured limit aborts the walk with
//!    [`TranslateError::TooDeep`].
use std::ops::ControlFlow;

use indexmap::IndexMap;

use crate::error::{Result, TranslateError};
use crate::node::Node;

/// What the walker does after `enter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Walk {
    Continue,
    SkipChildren,
    Stop,
}

pub trait Visitor<'a> {
    fn enter(&mut self, node: &'a Node, depth: usize) -> Walk;

    fn leave(&mut self, _node: &'a Node, _depth: usize) {}
}

/// Walks `root` (depth 0) and everything under it.
///
/// Returns `Break` when the visitor stopped the walk early.
pub fn walk<'a, V>(root: &'a Node, visitor: &mut V, max_depth: usize) -> Result<ControlFlow<()>>
where
    V: Visitor<'a> + ?Sized,
{
    let mut trail = Vec::new();
    walk_node(root, 0, visitor, max_depth, &mut trail)
}

/// [`walk`] for visitors that never return [`Walk::Stop`].
pub fn walk_all<'a, V>(root: &'a Node, visitor: &mut V, max_depth: usize) -> Result<()>
where
    V: Visitor<'a> + ?Sized,
{
    walk(root, visitor, max_depth).map(|_| ())
}

fn walk_node<'a, V>(
    node: &'a Node,
    depth: usize,
    visitor: &mut V,
    max_depth: usize,
    trail: &mut Vec<&'a str>,
) -> Result<ControlFlow<()>>
where
    V: Visitor<'a> + ?Sized,
{
    trail.push(&node.id);
    if depth > max_depth {
        log::warn!("design tree deeper than {max_depth} levels at node {}", node.id);
        return Err(TranslateError::TooDeep { limit: max_depth, path: trail.join(" > ") });
    }
    match visitor.enter(node, depth) {
        Walk::Stop => return Ok(ControlFlow::Break(())),
        Walk::SkipChildren => {}
        Walk::Continue => {
            for child in &node.children {
                if walk_node(child, depth + 1, visitor, max_depth, trail)?.is_break() {
                    return Ok(ControlFlow::Break(()));
                }
            }
        }
    }
    visitor.leave(node, depth);
    trail.pop();
    Ok(ControlFlow::Continue(()))
}

// ————————————————————————————————————————————————————————————————————————————
// CONSUMERS
// ————————————————————————————————————————————————————————————————————————————

struct CollectIds<'a>(Vec<&'a str>);

impl<'a> Visitor<'a> for CollectIds<'a> {
    fn enter(&mut self, node: &'a Node, _depth: usize) -> Walk {
        self.0.push(&node.id);
        Walk::Continue
    }
}

/// Every id in pre-order, root included; repeated ids stay repeated.
pub fn collect_ids(root: &Node, max_depth: usize) -> Result<Vec<&str>> {
    let mut ids = CollectIds(Vec::new());
    walk_all(root, &mut ids, max_depth)?;
    Ok(ids.0)
}

struct FindById<'a, 'q> {
    target: &'q str,
    found: Option<&'a Node>,
}

impl<'a> Visitor<'a> for FindById<'a, '_> {
    fn enter(&mut self, node: &'a Node, _depth: usize) -> Walk {
        if node.id == self.target {
            self.found = Some(node);
            Walk::Stop
        } else {
            Walk::Continue
        }
    }
}

/// First node in pre-order with the given id. Walks the tree on every call;
/// use [`NodeIndex`] for repeated lookups.
pub fn find_by_id<'a>(root: &'a Node, id: &str, max_depth: usize) -> Result<Option<&'a Node>> {
    let mut finder = FindById { target: id, found: None };
    match walk(root, &mut finder, max_depth)? {
        ControlFlow::Break(()) => Ok(finder.found),
        ControlFlow::Continue(()) => Ok(None),
    }
}

struct CountNodes {
    count: usize,
    limit: usize,
}

impl<'a> Visitor<'a> for CountNodes {
    fn enter(&mut self, _node: &'a Node, _depth: usize) -> Walk {
        self.count += 1;
        if self.count > self.limit { Walk::Stop } else { Walk::Continue }
    }
}

/// Number of nodes in the tree, or `TooManyNodes` once `limit` is passed.
pub fn count_nodes(root: &Node, limit: usize, max_depth: usize) -> Result<usize> {
    let mut counter = CountNodes { count: 0, limit };
    if walk(root, &mut counter, max_depth)?.is_break() {
        log::warn!("design tree rejected: more than {limit} nodes");
        return Err(TranslateError::TooManyNodes { limit });
    }
    Ok(counter.count)
}

// ————————————————————————————————————————————————————————————————————————————
// INDEX
// ————————————————————————————————————————————————————————————————————————————

/// `id → node` built with one walk. On repeated ids the first node in
/// pre-order wins, same as [`find_by_id`].
#[derive(Debug, Default)]
pub struct NodeIndex<'a> {
    by_id: IndexMap<&'a str, &'a Node>,
    duplicates: usize,
}

impl<'a> Visitor<'a> for NodeIndex<'a> {
    fn enter(&mut self, node: &'a Node, _depth: usize) -> Walk {
        if self.by_id.contains_key(node.id.as_str()) {
            self.duplicates += 1;
        } else {
            self.by_id.insert(&node.id, node);
        }
        Walk::Continue
    }
}

impl<'a> NodeIndex<'a> {
    pub fn build(root: &'a Node, max_depth: usize) -> Result<Self> {
        let mut index = NodeIndex::default();
        walk_all(root, &mut index, max_depth)?;
        if index.duplicates > 0 {
            log::debug!("node index: {} repeated ids under {}", index.duplicates, root.id);
        }
        Ok(index)
    }

    pub fn get(&self, id: &str) -> Option<&'a Node> {
        self.by_id.get(id).copied()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.by_id.contains_key(id)
    }

    /// Distinct ids.
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    /// Nodes whose id was already taken by an earlier node.
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }
}
