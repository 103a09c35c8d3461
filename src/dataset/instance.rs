//! Attribute lookup for a single example.
use std::collections::{BTreeMap, HashMap};

use super::dataset_struct::Dataset;


/// A single example that a tree can classify.
/// Returns `None` if the example has no value for `attribute`.
pub trait Instance {
    /// Returns the value of `attribute`.
    fn value(&self, attribute: &str) -> Option<&str>;
}


impl Instance for HashMap<String, String> {
    #[inline]
    fn value(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).map(String::as_str)
    }
}


impl Instance for BTreeMap<String, String> {
    #[inline]
    fn value(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).map(String::as_str)
    }
}


impl<'a> Instance for HashMap<&'a str, &'a str> {
    #[inline]
    fn value(&self, attribute: &str) -> Option<&str> {
        self.get(attribute).copied()
    }
}


/// A borrowed view of the `row`-th example of a [`Dataset`].
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    dataset: &'a Dataset,
    row: usize,
}


impl<'a> Row<'a> {
    pub(crate) fn new(dataset: &'a Dataset, row: usize) -> Self {
        Self { dataset, row }
    }


    /// Returns the label of this example.
    pub fn label(&self) -> &'a str {
        self.dataset.label(self.row)
    }
}


impl Instance for Row<'_> {
    #[inline]
    fn value(&self, attribute: &str) -> Option<&str> {
        self.dataset.value(self.row, attribute).ok()
    }
}
