use id3tree::prelude::*;
use id3tree::decision_tree::{entropy, gain};

use polars::prelude::*;

use std::collections::HashMap;
use std::time::{Duration, Instant};


const TOLERANCE: f64 = 1e-9;


// PlayTennis (Mitchell, 1997).
//
//                 Outlook
//         ┌──────────┼──────────┐
//       Sunny     Overcast     Rain
//         │          │          │
//     Humidity      Yes        Wind
//      ┌────┐               ┌─────┐
//    High  Normal         Weak  Strong
//     No    Yes            Yes    No
fn play_tennis() -> Dataset {
    let mut path = std::env::current_dir().unwrap();
    path.push("tests/dataset/samples.csv");
    Dataset::from_csv(path, true).unwrap()
}


fn child<'a>(tree: &'a DecisionTree, node: &Node, value: &str) -> &'a Node {
    let id = node.child(value)
        .unwrap_or_else(|| panic!("no branch for `{value}`"));
    tree.node(id).unwrap()
}


fn label(node: &Node) -> Option<&str> {
    node.category().and_then(Category::label)
}


#[test]
fn weather_scenario() {
    let sample = Dataset::from_rows(
        &["Weather"],
        "Play",
        [
            ["Sunny", "Yes"],
            ["Sunny", "Yes"],
            ["Rain", "No"],
            ["Rain", "No"],
        ],
    ).unwrap();

    let labels = sample.labels();
    let h = entropy(&sample, &labels);
    assert!((h - 1.0).abs() < TOLERANCE);

    let tree = DecisionTreeBuilder::new(sample).build().unwrap();
    let root = tree.root_node();

    assert!(root.is_internal());
    assert!(root.is_root());
    assert_eq!(root.split_attribute(), Some("Weather"));
    assert!((gain(root, "Weather", h).unwrap() - 1.0).abs() < TOLERANCE);

    let sunny = child(&tree, root, "Sunny");
    let rain = child(&tree, root, "Rain");
    assert_eq!(label(sunny), Some("Yes"));
    assert_eq!(label(rain), Some("No"));
    assert_eq!(entropy(sunny.data_set(), sunny.labels()), 0.0);
    assert_eq!(entropy(rain.data_set(), rain.labels()), 0.0);

    assert_eq!(tree.len(), 3);
    assert_eq!(tree.n_leaves(), 2);
    assert_eq!(tree.depth(), 1);
}


#[test]
fn empty_dataset_gives_a_failure_leaf() {
    let sample = Dataset::from_rows(
        &["Weather"], "Play", Vec::<[&str; 2]>::new(),
    ).unwrap();

    let tree = id3tree::build(sample).unwrap();
    let root = tree.root_node();

    assert!(root.is_leaf());
    assert!(root.labels().is_empty());
    assert_eq!(root.category(), Some(&Category::Failure));
    assert_eq!(tree.len(), 1);
}


#[test]
fn exhausted_attributes_take_the_majority() {
    // One attribute that cannot separate anything.
    let sample = Dataset::from_rows(
        &["Constant"],
        "Play",
        [
            ["A", "No"],
            ["A", "Yes"],
            ["A", "Yes"],
            ["A", "No"],
            ["A", "Yes"],
        ],
    ).unwrap();

    let tree = DecisionTreeBuilder::new(sample.clone()).build().unwrap();
    let root = tree.root_node();

    // Zero gain everywhere: the first attribute is used by default.
    assert_eq!(root.split_attribute(), Some("Constant"));
    let leaf = child(&tree, root, "A");
    assert!(leaf.attributes().is_empty());
    assert_eq!(label(leaf), Some("Yes"));

    // No attribute at all: the root itself is the majority leaf.
    let tree = DecisionTreeBuilder::new(sample)
        .attributes(Vec::<&str>::new())
        .unwrap()
        .build()
        .unwrap();
    assert!(tree.root_node().is_leaf());
    assert_eq!(label(tree.root_node()), Some("Yes"));
}


#[test]
fn play_tennis_tree() {
    let tree = DecisionTreeBuilder::new(play_tennis()).build().unwrap();

    let root = tree.root_node();
    assert_eq!(root.split_attribute(), Some("Outlook"));
    let values = root.children()
        .iter()
        .map(|(v, _)| v.as_str())
        .collect::<Vec<_>>();
    assert_eq!(values, vec!["Sunny", "Overcast", "Rain"]);

    let sunny = child(&tree, root, "Sunny");
    assert_eq!(sunny.split_attribute(), Some("Humidity"));
    assert_eq!(sunny.split_value(), Some("Sunny"));
    assert_eq!(label(child(&tree, sunny, "High")), Some("No"));
    assert_eq!(label(child(&tree, sunny, "Normal")), Some("Yes"));

    let overcast = child(&tree, root, "Overcast");
    assert_eq!(label(overcast), Some("Yes"));

    let rain = child(&tree, root, "Rain");
    assert_eq!(rain.split_attribute(), Some("Wind"));
    assert_eq!(label(child(&tree, rain, "Weak")), Some("Yes"));
    assert_eq!(label(child(&tree, rain, "Strong")), Some("No"));

    assert_eq!(tree.len(), 8);
    assert_eq!(tree.n_leaves(), 5);
    assert_eq!(tree.depth(), 2);
}


#[test]
fn play_tennis_fits_the_training_sample() {
    let sample = play_tennis();
    let tree = DecisionTreeBuilder::new(sample.clone()).build().unwrap();
    assert_eq!(tree.accuracy(&sample), 1.0);
}


#[test]
fn attribute_order_breaks_ties() {
    // `A` and `B` carry the same information.
    let rows = [
        ["x", "p", "Yes"],
        ["y", "q", "No"],
        ["x", "p", "Yes"],
    ];
    let sample = Dataset::from_rows(&["A", "B"], "Class", rows).unwrap();

    let tree = DecisionTreeBuilder::new(sample.clone()).build().unwrap();
    assert_eq!(tree.root_node().split_attribute(), Some("A"));

    let tree = DecisionTreeBuilder::new(sample)
        .attributes(["B", "A"])
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(tree.root_node().split_attribute(), Some("B"));
}


#[test]
fn contradicting_examples() {
    let mut path = std::env::current_dir().unwrap();
    path.push("tests/dataset/samples_2.csv");
    let sample = Dataset::from_csv(path, true).unwrap();

    let tree = DecisionTreeBuilder::new(sample).build().unwrap();
    let root = tree.root_node();
    assert_eq!(root.split_attribute(), Some("Color"));

    // `Size` cannot separate the red examples,
    // but it is the only attribute left.
    let red = child(&tree, root, "Red");
    assert_eq!(red.split_attribute(), Some("Size"));
    let small = child(&tree, red, "Small");
    assert!(small.attributes().is_empty());
    assert_eq!(label(small), Some("Yes"));

    assert_eq!(label(child(&tree, root, "Blue")), Some("No"));
}


#[test]
fn prediction_and_unseen_values() {
    let tree = DecisionTreeBuilder::new(play_tennis()).build().unwrap();

    let mut day = HashMap::new();
    day.insert("Outlook".to_string(), "Rain".to_string());
    day.insert("Wind".to_string(), "Strong".to_string());
    assert_eq!(tree.predict(&day).label(), Some("No"));

    day.insert("Outlook".to_string(), "Foggy".to_string());
    assert_eq!(
        tree.predict(&day),
        Prediction::Unseen { attribute: "Outlook", value: Some("Foggy".into()) }
    );

    day.remove("Outlook");
    assert_eq!(
        tree.predict(&day),
        Prediction::Unseen { attribute: "Outlook", value: None }
    );
}


#[test]
fn deterministic_structure() {
    let first = DecisionTreeBuilder::new(play_tennis()).build().unwrap();
    let second = DecisionTreeBuilder::new(play_tennis()).build().unwrap();

    let first = first.traverse().collect::<Vec<_>>();
    let second = second.traverse().collect::<Vec<_>>();
    assert_eq!(first, second);
}


#[test]
fn from_dataframe() {
    let s1 = Series::new("Weather", &["Sunny", "Sunny", "Rain", "Rain"]);
    let s2 = Series::new("Wind", &[1_i64, 0, 1, 0]);
    let df = DataFrame::new(vec![s1, s2]).unwrap();
    let target = Series::new("Play", &["Yes", "Yes", "No", "No"]);

    let sample = Dataset::from_dataframe(df, target).unwrap();
    assert_eq!(sample.attributes(), &["Weather", "Wind"]);
    assert_eq!(sample.distinct("Wind").unwrap(), vec!["1", "0"]);

    let tree = DecisionTreeBuilder::new(sample).build().unwrap();
    assert_eq!(tree.root_node().split_attribute(), Some("Weather"));
}


#[test]
fn to_dot_file() {
    let tree = DecisionTreeBuilder::new(play_tennis()).build().unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("play_tennis.dot");
    tree.to_dot_file(&path).unwrap();

    let dot = std::fs::read_to_string(&path).unwrap();
    assert!(dot.starts_with("graph DecisionTree {"));
    assert!(dot.contains("node_0 [ label = \"Outlook ?\" ];"));
    assert!(dot.contains("[ label = \"Sunny\" ];"));
    assert!(dot.contains("shape = box"));
    assert!(dot.trim_end().ends_with('}'));
}


#[test]
fn wide_schema_of_constant_attributes() {
    let n_attribute = 300;
    let attributes = (0..n_attribute)
        .map(|i| format!("A{i}"))
        .collect::<Vec<_>>();
    let rows = ["Y", "N", "Y", "N"].into_iter()
        .map(|y| {
            let mut row = vec!["c".to_string(); n_attribute];
            row.push(y.to_string());
            row
        })
        .collect::<Vec<_>>();
    let sample = Dataset::from_rows(&attributes, "Label", rows).unwrap();

    let start = Instant::now();
    let tree = DecisionTreeBuilder::new(sample).build().unwrap();
    assert!(start.elapsed() < Duration::from_secs(10));

    // No attribute separates the labels, so every node splits
    // on its first attribute and the chain ends in a majority leaf.
    assert_eq!(tree.depth(), n_attribute);
    assert_eq!(tree.len(), n_attribute + 1);
    assert_eq!(tree.n_leaves(), 1);
    assert_eq!(tree.root_node().split_attribute(), Some("A0"));

    let leaf = tree.nodes().iter().find(|n| n.is_leaf()).unwrap();
    assert_eq!(label(leaf), Some("Y"));
}


#[test]
fn trained_root_keeps_its_place() {
    let tree = DecisionTreeBuilder::new(play_tennis()).build().unwrap();
    let root = tree.root_node();
    assert!(root.is_root());
    assert_eq!(root.node_type(), Some(NodeType::Internal));
    assert!(tree.nodes().iter().all(|n| n.node_type() != Some(NodeType::Root)));
}
