use tracing::{debug, info};

use crate::Dataset;
use crate::error::{Id3Error, Result};
use super::criterion::{find_best_attr, find_majority};
use super::dtree::DecisionTree;
use super::node::*;

use std::collections::HashSet;


/// A struct that grows a [`DecisionTree`] with the ID3 algorithm.
/// `DecisionTreeBuilder` owns the nodes of the tree while it grows.
///
/// # Example
///
/// ```
/// use id3tree::prelude::*;
///
/// let sample = Dataset::from_rows(
///     &["Weather"],
///     "Play",
///     [
///         ["Sunny", "Yes"],
///         ["Sunny", "Yes"],
///         ["Rain", "No"],
///         ["Rain", "No"],
///     ],
/// ).unwrap();
///
/// let tree = DecisionTreeBuilder::new(sample)
///     .build()
///     .unwrap();
///
/// assert_eq!(tree.root_node().split_attribute(), Some("Weather"));
/// ```
#[derive(Debug, Clone)]
pub struct DecisionTreeBuilder {
    nodes: Vec<Node>,
    root: NodeId,
}


impl DecisionTreeBuilder {
    /// Construct a new instance of [`DecisionTreeBuilder`].
    /// The root owns the whole `dataset`, and every attribute
    /// of `dataset` is eligible for splitting, in column order.
    pub fn new(dataset: Dataset) -> Self {
        let attributes = dataset.attributes().to_vec();
        let root = Node::new(dataset, attributes, None);

        Self { nodes: vec![root], root: NodeId(0) }
    }


    /// Set the attributes eligible at the root.
    /// The order given here is the order in which ties are broken.
    /// Attributes not listed are never used for splitting.
    pub fn attributes<S, T>(mut self, attributes: T) -> Result<Self>
        where S: AsRef<str>,
              T: IntoIterator<Item = S>,
    {
        if self.nodes.len() > 1 || self.nodes[self.root.0].is_resolved() {
            return Err(Id3Error::AlreadyTrained);
        }

        let root = &mut self.nodes[self.root.0];
        let dataset = root.data_set();

        let mut seen = HashSet::new();
        let mut order = Vec::new();
        for name in attributes {
            let name = name.as_ref();
            if name == dataset.target_name() {
                return Err(Id3Error::TargetAsAttribute {
                    target: name.to_string(),
                });
            }
            if !dataset.has_attribute(name) {
                return Err(Id3Error::MissingAttribute {
                    attribute: name.to_string(),
                });
            }
            if !seen.insert(name.to_string()) {
                return Err(Id3Error::DuplicateAttribute {
                    attribute: name.to_string(),
                });
            }
            order.push(name.to_string());
        }

        root.attributes = order;
        Ok(self)
    }


    /// Returns the id of the root.
    pub fn root(&self) -> NodeId {
        self.root
    }


    /// Returns the node of `id`.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }


    /// Resolves the node `id` and its whole subtree.
    ///
    /// The nodes are resolved depth-first, with an explicit stack
    /// so that the depth of the tree never touches the call stack.
    /// A node that is already resolved is left untouched.
    pub fn train(&mut self, id: NodeId) -> Result<()> {
        if id.0 >= self.nodes.len() {
            return Err(Id3Error::UnknownNode(id.0));
        }

        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if self.nodes[id.0].is_resolved() { continue; }

            let children = self.resolve(id)?;
            // Reversed, so that the first child is trained first.
            stack.extend(children.into_iter().rev());
        }
        Ok(())
    }


    /// Trains the tree from the root and returns the finished tree.
    /// This method consumes `self`.
    pub fn build(mut self) -> Result<DecisionTree> {
        self.train(self.root)?;

        let tree = DecisionTree::from_components(self.nodes, self.root);
        info!(
            nodes = tree.len(),
            leaves = tree.n_leaves(),
            depth = tree.depth(),
            "decision tree is built"
        );
        Ok(tree)
    }


    /// Decides the type of the node `id`.
    /// Returns the children created for an internal node,
    /// in order of first appearance of their attribute values.
    fn resolve(&mut self, id: NodeId) -> Result<Vec<NodeId>> {
        let node = &mut self.nodes[id.0];

        // No example reaches this node.
        if node.data_set().is_empty() {
            node.resolve_leaf(Category::Failure);
            debug!(node = %id, "failure leaf, no example reaches the node");
            return Ok(Vec::new());
        }

        // All examples share one label.
        if node.labels().len() <= 1 {
            let label = node.labels()[0].clone();
            debug!(
                node = %id, rows = node.data_set().len(), label = label.as_str(),
                "pure leaf"
            );
            node.resolve_leaf(Category::Label(label));
            return Ok(Vec::new());
        }

        // No attribute left, so the majority label is predicted.
        let best_attr = match find_best_attr(node)? {
            Some(attribute) => attribute,
            None => {
                let category = find_majority(node.data_set(), node.labels())
                    .map_or(Category::Failure, Category::Label);
                debug!(
                    node = %id, rows = node.data_set().len(), %category,
                    "majority leaf"
                );
                node.resolve_leaf(category);
                return Ok(Vec::new());
            },
        };

        node.set_type(NodeType::Internal);
        node.set_split_attribute(best_attr.clone());
        debug!(
            node = %id, rows = node.data_set().len(),
            attribute = best_attr.as_str(),
            "internal node"
        );

        let child_attributes = node.attributes()
            .iter()
            .filter(|name| **name != best_attr)
            .cloned()
            .collect::<Vec<_>>();
        let partitions = node.data_set().partition(&best_attr)?;

        let mut children = Vec::with_capacity(partitions.len());
        for (value, examples) in partitions {
            let child_id = NodeId(self.nodes.len());
            let mut child = Node::new(
                examples, child_attributes.clone(), Some(id)
            );
            child.set_split_value(value.clone());

            self.nodes.push(child);
            self.nodes[id.0].insert_child(value, child_id);
            children.push(child_id);
        }
        Ok(children)
    }
}


/// Grows a [`DecisionTree`] over `dataset` with default settings.
/// Equivalent to `DecisionTreeBuilder::new(dataset).build()`.
pub fn build(dataset: Dataset) -> Result<DecisionTree> {
    DecisionTreeBuilder::new(dataset).build()
}


#[cfg(test)]
mod tests {
    use super::*;

    fn weather() -> Dataset {
        Dataset::from_rows(
            &["Weather"],
            "Play",
            [
                ["Sunny", "Yes"],
                ["Sunny", "Yes"],
                ["Rain", "No"],
                ["Rain", "No"],
            ],
        ).unwrap()
    }


    #[test]
    fn train_is_a_no_op_on_resolved_nodes() {
        let mut builder = DecisionTreeBuilder::new(weather());
        let root = builder.root();
        builder.train(root).unwrap();
        let n_nodes = builder.nodes.len();

        builder.train(root).unwrap();
        assert_eq!(builder.nodes.len(), n_nodes);
    }


    #[test]
    fn train_on_unknown_node_fails() {
        let mut builder = DecisionTreeBuilder::new(weather());
        let err = builder.train(NodeId(7)).unwrap_err();
        assert!(matches!(err, Id3Error::UnknownNode(7)));
    }


    #[test]
    fn attributes_are_validated() {
        let err = DecisionTreeBuilder::new(weather())
            .attributes(["Humidity"])
            .unwrap_err();
        assert!(matches!(err, Id3Error::MissingAttribute { .. }));

        let err = DecisionTreeBuilder::new(weather())
            .attributes(["Play"])
            .unwrap_err();
        assert!(matches!(err, Id3Error::TargetAsAttribute { .. }));

        let err = DecisionTreeBuilder::new(weather())
            .attributes(["Weather", "Weather"])
            .unwrap_err();
        assert!(matches!(err, Id3Error::DuplicateAttribute { .. }));
    }


    #[test]
    fn attributes_cannot_change_after_training() {
        let mut builder = DecisionTreeBuilder::new(weather());
        let root = builder.root();
        builder.train(root).unwrap();

        let err = builder.attributes(["Weather"]).unwrap_err();
        assert!(matches!(err, Id3Error::AlreadyTrained));
    }


    #[test]
    fn children_are_created_in_order_of_appearance() {
        let mut builder = DecisionTreeBuilder::new(weather());
        let root = builder.root();
        builder.train(root).unwrap();

        let values = builder.node(root).unwrap()
            .children()
            .iter()
            .map(|(v, _)| v.as_str())
            .collect::<Vec<_>>();
        assert_eq!(values, vec!["Sunny", "Rain"]);
    }


    #[test]
    fn empty_attribute_list_gives_a_majority_leaf() {
        let tree = DecisionTreeBuilder::new(weather())
            .attributes(Vec::<String>::new())
            .unwrap()
            .build()
            .unwrap();
        // Two `Yes` against two `No`: the first label wins.
        assert_eq!(
            tree.root_node().category(),
            Some(&Category::Label("Yes".into()))
        );
    }
}
