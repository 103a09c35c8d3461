//! Splitting criterion of ID3.
//!
//! * [`entropy`] measures the impurity of the labels in a data set.
//! * [`gain`] is the reduction of entropy obtained by splitting on an attribute.
//! * [`find_best_attr`] picks the attribute with the maximal gain.
//! * [`find_majority`] picks the most frequent label.
use tracing::trace;

use crate::Dataset;
use crate::error::Result;
use super::node::Node;

use std::collections::HashMap;


/// Counts the target values of `data_set`.
/// Every label in `labels` gets an entry, even with zero count,
/// and the entries follow the order of `labels`.
/// A target value not listed in `labels` is appended at the end.
fn label_counts<'a>(data_set: &'a Dataset, labels: &'a [String])
    -> Vec<(&'a str, usize)>
{
    let mut position = labels.iter()
        .enumerate()
        .map(|(i, label)| (label.as_str(), i))
        .collect::<HashMap<_, _>>();
    let mut counts = labels.iter()
        .map(|label| (label.as_str(), 0_usize))
        .collect::<Vec<_>>();

    for y in data_set.target() {
        let k = *position.entry(y.as_str())
            .or_insert_with(|| {
                counts.push((y.as_str(), 0));
                counts.len() - 1
            });
        counts[k].1 += 1;
    }
    counts
}


/// Returns the most frequent label of `data_set`.
/// Ties are broken by the order of `labels`:
/// the first label with the maximal count wins.
/// Returns `None` if there is neither a label nor an example.
pub fn find_majority(data_set: &Dataset, labels: &[String])
    -> Option<String>
{
    label_counts(data_set, labels)
        .into_iter()
        .fold(None, |best: Option<(&str, usize)>, (label, count)| {
            match best {
                Some((_, max)) if max >= count => best,
                _ => Some((label, count)),
            }
        })
        .map(|(label, _)| label.to_string())
}


/// Returns the Shannon entropy (in bits) of the labels of `data_set`.
/// Labels with zero count contribute `0`,
/// and an empty data set has zero entropy.
pub fn entropy(data_set: &Dataset, labels: &[String]) -> f64 {
    let counts = label_counts(data_set, labels)
        .into_iter()
        .map(|(_, count)| count);
    entropy_of_counts(counts, data_set.len())
}


/// Entropy of a distribution given by its counts, summing to `total`.
fn entropy_of_counts<I>(counts: I, total: usize) -> f64
    where I: IntoIterator<Item = usize>,
{
    if total == 0 { return 0.0; }

    let total = total as f64;
    counts.into_iter()
        .map(|count| {
            if count == 0 { return 0.0; }
            let p = count as f64 / total;
            -p * p.log2()
        })
        .sum::<f64>()
}


/// Returns the information gain of splitting `data_set` on `attribute`,
/// given the entropy `entropy0` of `data_set` itself.
///
/// The conditional entropy is computed from the counts of
/// `(value, label)` pairs in a single pass over the column,
/// so no subset of `data_set` is materialized.
pub(crate) fn information_gain(
    data_set: &Dataset,
    attribute: &str,
    entropy0: f64,
) -> Result<f64>
{
    let column = data_set.column(attribute)?;
    let n_sample = data_set.len();
    if n_sample == 0 { return Ok(0.0); }

    // Per value, in order of first appearance:
    // the number of rows and the label counts in order of first appearance.
    let mut position: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(usize, Vec<(&str, usize)>)> = Vec::new();
    for (x, y) in column.iter().zip(data_set.target()) {
        let k = *position.entry(x.as_str())
            .or_insert_with(|| {
                groups.push((0, Vec::new()));
                groups.len() - 1
            });
        let (size, counts) = &mut groups[k];
        *size += 1;
        match counts.iter_mut().find(|(label, _)| *label == y.as_str()) {
            Some((_, count)) => *count += 1,
            None => counts.push((y.as_str(), 1)),
        }
    }

    let n_sample = n_sample as f64;
    let conditional = groups.into_iter()
        .map(|(size, counts)| {
            let weight = size as f64 / n_sample;
            let counts = counts.into_iter().map(|(_, count)| count);
            weight * entropy_of_counts(counts, size)
        })
        .sum::<f64>();

    Ok(entropy0 - conditional)
}


/// Returns the information gain of splitting `node` on `attribute`.
/// `entropy0` is the entropy of the node's own data set.
pub fn gain(node: &Node, attribute: &str, entropy0: f64) -> Result<f64> {
    information_gain(node.data_set(), attribute, entropy0)
}


/// Returns the attribute of `node` with the maximal information gain.
///
/// The attributes are scanned in the order of [`Node::attributes`],
/// and an attribute replaces the current best one
/// only if its gain is strictly larger.
/// Hence ties keep the earlier attribute, and
/// the first attribute is returned when no gain is positive.
/// Returns `None` if no attribute is left.
pub fn find_best_attr(node: &Node) -> Result<Option<String>> {
    let Some(first) = node.attributes().first() else {
        return Ok(None);
    };

    let entropy0 = entropy(node.data_set(), node.labels());
    let mut best = first;
    let mut max_gain = 0.0;

    for attribute in node.attributes() {
        let new_gain = gain(node, attribute, entropy0)?;
        trace!(attribute = attribute.as_str(), gain = new_gain, "candidate split");
        if new_gain > max_gain {
            max_gain = new_gain;
            best = attribute;
        }
    }
    Ok(Some(best.clone()))
}
