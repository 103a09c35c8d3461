//! Exports the standard structs and traits.
//!
pub use crate::dataset::{
    Dataset,
    DatasetReader,
    Instance,
};


pub use crate::decision_tree::{
    // Tree construction
    DecisionTreeBuilder,
    DecisionTree,


    // Tree components
    Category,
    Node,
    NodeId,
    NodeType,
    Prediction,


    // Traversal
    Outcome,
    TraversalRecord,
};


pub use crate::error::Id3Error;
