//! Level-order traversal of a built tree.
use colored::Colorize;
use serde::Serialize;

use super::dtree::DecisionTree;
use super::node::{Category, NodeId};

use std::collections::VecDeque;
use std::fmt;


const HEADER_WIDTH: usize = 48;
const KEY_WIDTH: usize = 24;


/// What a visited node does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Outcome<'a> {
    /// An internal node branching on the attribute.
    Split(&'a str),
    /// A leaf predicting the category.
    Leaf(&'a Category),
}


/// One visited node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraversalRecord<'a> {
    /// One-based position in level order.
    pub level_index: usize,
    /// Number of edges from the root.
    pub depth: usize,
    /// The visited node.
    pub node: NodeId,
    /// The attribute the parent branches on. `None` for the root.
    pub parent_split_attr: Option<&'a str>,
    /// The attribute value on the edge from the parent. `None` for the root.
    pub incoming_value: Option<&'a str>,
    /// The split attribute or the category of the node.
    pub outcome: Outcome<'a>,
}


/// Breadth-first iterator over a [`DecisionTree`].
///
/// The children of a node are visited in the order they were created,
/// that is, in order of first appearance of their attribute values.
/// The tree is only read.
pub struct Traversal<'a> {
    tree: &'a DecisionTree,
    queue: VecDeque<(NodeId, usize)>,
    visited: usize,
}


impl<'a> Traversal<'a> {
    pub(super) fn new(tree: &'a DecisionTree) -> Self {
        let mut queue = VecDeque::new();
        queue.push_back((tree.root(), 0));
        Self { tree, queue, visited: 0 }
    }
}


impl<'a> Iterator for Traversal<'a> {
    type Item = TraversalRecord<'a>;


    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            let (id, depth) = self.queue.pop_front()?;
            let Some(node) = tree.node(id) else { continue; };

            for (_, child) in node.children() {
                self.queue.push_back((*child, depth + 1));
            }

            let outcome = match (node.category(), node.split_attribute()) {
                (Some(category), _) => Outcome::Leaf(category),
                (None, Some(attribute)) => Outcome::Split(attribute),
                // Not trained; nothing to report.
                (None, None) => continue,
            };

            let parent_split_attr = node.parent()
                .and_then(|parent| tree.node(parent))
                .and_then(|parent| parent.split_attribute());

            self.visited += 1;
            let record = TraversalRecord {
                level_index: self.visited,
                depth,
                node: id,
                parent_split_attr,
                incoming_value: node.split_value(),
                outcome,
            };
            return Some(record);
        }
    }
}


impl fmt::Display for TraversalRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let title = format!(" Node {} (depth {}) ", self.level_index, self.depth);
        writeln!(f, "{:-^HEADER_WIDTH$}", title.bold())?;

        if let (Some(attribute), Some(value))
            = (self.parent_split_attr, self.incoming_value)
        {
            writeln!(
                f, "{:<KEY_WIDTH$}: {}", "Parent split attribute", attribute.bold()
            )?;
            writeln!(
                f, "{:<KEY_WIDTH$}: {}", "Incoming value", value.yellow()
            )?;
        }

        match self.outcome {
            Outcome::Split(attribute) => writeln!(
                f, "{:<KEY_WIDTH$}: {}", "Internal node splits on", attribute.bold().blue()
            ),
            Outcome::Leaf(category) if !category.is_failure() => writeln!(
                f, "{:<KEY_WIDTH$}: {}", "Leaf category", category.to_string().bold().green()
            ),
            Outcome::Leaf(category) => writeln!(
                f, "{:<KEY_WIDTH$}: {}", "Leaf category", category.to_string().bold().red()
            ),
        }
    }
}
