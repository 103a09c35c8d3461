//! Defines the trained decision tree.
use crate::{Dataset, Instance};
use crate::error::Result;
use super::node::*;
use super::traversal::Traversal;

use std::path::Path;
use std::fs::File;
use std::io::prelude::*;


/// The outcome of classifying one example.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Prediction<'a> {
    /// The example reached a leaf.
    Category(&'a Category),


    /// The example stopped at an internal node that has
    /// no branch for its value of `attribute`.
    /// `attribute` is empty if the node was never trained.
    ///
    /// Branches exist only for the values observed in the training
    /// examples that reached the node, so this is a known gap of ID3.
    Unseen {
        /// The attribute of the internal node.
        attribute: &'a str,
        /// The value of the example, `None` if the example lacks it.
        value: Option<String>,
    },
}


impl<'a> Prediction<'a> {
    /// Returns the category, or `None` for [`Prediction::Unseen`].
    pub fn category(&self) -> Option<&'a Category> {
        match self {
            Self::Category(category) => Some(*category),
            Self::Unseen { .. } => None,
        }
    }


    /// Returns the predicted label.
    /// Returns `None` for a failure leaf or an unseen value.
    pub fn label(&self) -> Option<&'a str> {
        self.category().and_then(Category::label)
    }
}


/// Decision tree classifier grown by ID3.
/// The nodes live in an arena; [`NodeId`] indexes into it.
/// A parent is always stored before its children.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    nodes: Vec<Node>,
    root: NodeId,
}


impl DecisionTree {
    #[inline]
    pub(super) fn from_components(nodes: Vec<Node>, root: NodeId) -> Self {
        Self { nodes, root }
    }


    /// Returns the id of the root.
    pub fn root(&self) -> NodeId {
        self.root
    }


    /// Returns the root node.
    pub fn root_node(&self) -> &Node {
        &self.nodes[self.root.0]
    }


    /// Returns the node of `id`.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }


    /// Returns every node, parents before children.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes[..]
    }


    /// Returns the number of nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }


    /// A tree always has the root, so this returns `false`.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }


    /// Returns the number of leaves.
    pub fn n_leaves(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }


    /// Returns the number of edges on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut depths = vec![0_usize; self.nodes.len()];
        for (i, node) in self.nodes.iter().enumerate() {
            if let Some(parent) = node.parent() {
                depths[i] = depths[parent.0] + 1;
            }
        }
        depths.into_iter().max().unwrap_or(0)
    }


    /// Walks the tree in level order.
    /// See [`Traversal`].
    pub fn traverse(&self) -> Traversal<'_> {
        Traversal::new(self)
    }


    /// Classifies `instance` by walking from the root to a leaf.
    pub fn predict<I>(&self, instance: &I) -> Prediction<'_>
        where I: Instance + ?Sized,
    {
        let mut node = self.root_node();
        loop {
            if let Some(category) = node.category() {
                return Prediction::Category(category);
            }

            // Only an untrained node lacks both; it has no branch to take.
            let Some(attribute) = node.split_attribute() else {
                return Prediction::Unseen { attribute: "", value: None };
            };
            let value = instance.value(attribute);
            match value.and_then(|v| node.child(v)) {
                Some(child) => { node = &self.nodes[child.0]; },
                None => {
                    return Prediction::Unseen {
                        attribute,
                        value: value.map(str::to_string),
                    };
                },
            }
        }
    }


    /// Classifies every example in `dataset`.
    pub fn predict_all(&self, dataset: &Dataset) -> Vec<Prediction<'_>> {
        (0..dataset.len())
            .map(|i| self.predict(&dataset.row(i)))
            .collect()
    }


    /// Returns the ratio of examples in `dataset`
    /// whose predicted label equals to their target.
    /// Failure leaves and unseen values count as mistakes.
    /// Returns `0.0` for an empty `dataset`.
    pub fn accuracy(&self, dataset: &Dataset) -> f64 {
        let n_sample = dataset.len();
        if n_sample == 0 { return 0.0; }

        let hits = self.predict_all(dataset)
            .into_iter()
            .zip(dataset.target())
            .filter(|(p, y)| p.label() == Some(y.as_str()))
            .count();
        hits as f64 / n_sample as f64
    }


    /// Write the current decision tree to dot file.
    #[inline]
    pub fn to_dot_file<P>(&self, path: P) -> Result<()>
        where P: AsRef<Path>
    {
        let mut f = File::create(path)?;
        f.write_all(b"graph DecisionTree {\n")?;

        for row in self.to_dot_info() {
            f.write_all(row.as_bytes())?;
        }

        f.write_all(b"}\n")?;

        Ok(())
    }


    fn to_dot_info(&self) -> Vec<String> {
        let mut info = Vec::new();
        for (id, node) in self.nodes.iter().enumerate() {
            match (node.split_attribute(), node.category()) {
                (_, Some(category)) => {
                    info.push(format!(
                        "\tnode_{id} [ label = \"{}\", shape = box ];\n",
                        escape(&category.to_string()),
                    ));
                },
                (Some(attribute), None) => {
                    info.push(format!(
                        "\tnode_{id} [ label = \"{} ?\" ];\n",
                        escape(attribute),
                    ));
                },
                (None, None) => {},
            }

            for (value, child) in node.children() {
                info.push(format!(
                    "\tnode_{id} -- node_{child_id} [ label = \"{}\" ];\n",
                    escape(value),
                    child_id = child.0,
                ));
            }
        }
        info
    }
}


fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}
