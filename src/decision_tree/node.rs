//! Defines the vertex type of the decision tree.
use serde::Serialize;

use crate::Dataset;

use std::fmt;


/// Index of a [`Node`] in the arena owned by the tree.
/// A child refers to its parent through this index,
/// so the ownership of the tree stays acyclic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[repr(transparent)]
pub struct NodeId(pub(crate) usize);


impl NodeId {
    /// Returns the position of the node in the arena.
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}


impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}


/// The role of a node in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeType {
    /// The entry node, before training resolves it.
    /// Training turns the root into [`NodeType::Internal`] or
    /// [`NodeType::Leaf`], so on a built tree only
    /// [`Node::is_root`] identifies the root.
    Root,
    /// A node that branches on an attribute.
    Internal,
    /// A terminal node that holds a category.
    Leaf,
}


/// The class predicted by a leaf.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    /// A label that occurs in the training data.
    Label(String),
    /// No example reached this leaf.
    Failure,
}


impl Category {
    /// Returns the label, or `None` for [`Category::Failure`].
    pub fn label(&self) -> Option<&str> {
        match self {
            Self::Label(label) => Some(label.as_str()),
            Self::Failure => None,
        }
    }


    /// Returns `true` for [`Category::Failure`].
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure)
    }
}


impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Label(label) => write!(f, "{label}"),
            Self::Failure => write!(f, "failure to construct the tree"),
        }
    }
}


/// The attribute a node branches on and
/// the attribute value on the edge from its parent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SplitCondition {
    /// Set only on internal nodes.
    pub attribute: Option<String>,
    /// Unset only on the root.
    pub value: Option<String>,
}


/// A vertex of the decision tree.
///
/// Only the builder creates and mutates nodes.
/// Once the tree is built, every node is either a leaf or internal.
#[derive(Debug, Clone)]
pub struct Node {
    pub(super) data_set: Dataset,
    pub(super) attributes: Vec<String>,
    pub(super) labels: Vec<String>,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<(String, NodeId)>,
    pub(super) node_type: Option<NodeType>,
    pub(super) split_condition: SplitCondition,
    pub(super) category: Option<Category>,
}


impl Node {
    /// Construct a node over `data_set`.
    /// The labels are derived from the target column here, once.
    pub(super) fn new(
        data_set: Dataset,
        attributes: Vec<String>,
        parent: Option<NodeId>,
    ) -> Self
    {
        let labels = data_set.labels();
        let node_type = parent.is_none().then_some(NodeType::Root);
        Self {
            data_set,
            attributes,
            labels,
            parent,
            children: Vec::new(),
            node_type,
            split_condition: SplitCondition::default(),
            category: None,
        }
    }


    // ---------------------------------------------------------------------
    // Mutators used by the builder


    #[inline]
    pub(super) fn set_type(&mut self, node_type: NodeType) {
        self.node_type = Some(node_type);
    }


    #[inline]
    pub(super) fn set_category(&mut self, category: Category) {
        self.category = Some(category);
    }


    #[inline]
    pub(super) fn set_split_attribute(&mut self, attribute: String) {
        self.split_condition.attribute = Some(attribute);
    }


    #[inline]
    pub(super) fn set_split_value(&mut self, value: String) {
        self.split_condition.value = Some(value);
    }


    #[inline]
    pub(super) fn insert_child(&mut self, value: String, child: NodeId) {
        self.children.push((value, child));
    }


    /// Turns this node into a leaf predicting `category`.
    #[inline]
    pub(super) fn resolve_leaf(&mut self, category: Category) {
        self.set_type(NodeType::Leaf);
        self.set_category(category);
    }


    /// Returns `true` once training decided the type of this node.
    #[inline]
    pub(super) fn is_resolved(&self) -> bool {
        matches!(
            self.node_type,
            Some(NodeType::Internal) | Some(NodeType::Leaf)
        )
    }


    // ---------------------------------------------------------------------
    // Accessors


    /// Returns the examples that reach this node.
    pub fn data_set(&self) -> &Dataset {
        &self.data_set
    }


    /// Returns the attributes still eligible for splitting.
    pub fn attributes(&self) -> &[String] {
        &self.attributes[..]
    }


    /// Returns the distinct labels of [`Node::data_set`].
    pub fn labels(&self) -> &[String] {
        &self.labels[..]
    }


    /// Returns the parent, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }


    /// Returns the pairs of attribute value and child.
    pub fn children(&self) -> &[(String, NodeId)] {
        &self.children[..]
    }


    /// Returns the child on the edge labelled `value`.
    pub fn child(&self, value: &str) -> Option<NodeId> {
        self.children.iter()
            .find_map(|(v, id)| (v == value).then_some(*id))
    }


    /// Returns the type of this node.
    /// `None` only for a non-root node that is not trained yet.
    pub fn node_type(&self) -> Option<NodeType> {
        self.node_type
    }


    /// Returns the split condition.
    pub fn split_condition(&self) -> &SplitCondition {
        &self.split_condition
    }


    /// Returns the attribute this node branches on.
    pub fn split_attribute(&self) -> Option<&str> {
        self.split_condition.attribute.as_deref()
    }


    /// Returns the attribute value on the edge from the parent.
    pub fn split_value(&self) -> Option<&str> {
        self.split_condition.value.as_deref()
    }


    /// Returns the category of a leaf.
    pub fn category(&self) -> Option<&Category> {
        self.category.as_ref()
    }


    /// Returns `true` if this node is the root.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }


    /// Returns `true` if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.node_type == Some(NodeType::Leaf)
    }


    /// Returns `true` if this node branches.
    pub fn is_internal(&self) -> bool {
        self.node_type == Some(NodeType::Internal)
    }
}
