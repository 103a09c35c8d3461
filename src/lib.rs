#![warn(missing_docs)]

//!
//! A crate that grows classification trees with the ID3 algorithm.
//!
//! Every attribute is categorical.
//! At each node, the tree branches on the attribute
//! with the maximal information gain,
//! and creates one child per value observed in the examples
//! that reach the node.
//! A node becomes a leaf when
//!
//! - no example reaches it (a failure leaf),
//! - all of its examples share one label, or
//! - no attribute is left to split on (the majority label).
//!
//! ```
//! use id3tree::prelude::*;
//!
//! let sample = Dataset::from_rows(
//!     &["Outlook", "Windy"],
//!     "Play",
//!     [
//!         ["Sunny", "False", "No"],
//!         ["Sunny", "True", "No"],
//!         ["Overcast", "False", "Yes"],
//!         ["Rain", "False", "Yes"],
//!         ["Rain", "True", "No"],
//!     ],
//! ).unwrap();
//!
//! let tree = DecisionTreeBuilder::new(sample).build().unwrap();
//! for record in tree.traverse() {
//!     println!("{record}");
//! }
//! ```

pub mod error;
pub mod dataset;
pub mod decision_tree;
pub mod prelude;


pub use error::{Id3Error, Result};

pub use dataset::{Dataset, DatasetReader, Instance, Row};

pub use decision_tree::{
    build,
    Category,
    DecisionTree,
    DecisionTreeBuilder,
    Node,
    NodeId,
    NodeType,
    Outcome,
    Prediction,
    SplitCondition,
    Traversal,
    TraversalRecord,
};
