//! The ID3 decision tree.
//!
//! [`DecisionTreeBuilder`] grows the tree,
//! and [`DecisionTree`] holds the finished one.

/// Defines the builder that grows the tree.
pub mod builder;
/// Defines the entropy-based splitting criterion.
pub mod criterion;
/// Defines the trained tree.
pub mod dtree;
/// Defines the vertex of the tree.
pub mod node;
/// Defines the level-order traversal.
pub mod traversal;


pub use builder::{build, DecisionTreeBuilder};
pub use criterion::{entropy, find_best_attr, find_majority, gain};
pub use dtree::{DecisionTree, Prediction};
pub use node::{Category, Node, NodeId, NodeType, SplitCondition};
pub use traversal::{Outcome, Traversal, TraversalRecord};
