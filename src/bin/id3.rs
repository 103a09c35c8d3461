//! ID3 decision tree CLI
//!
//! Grows a decision tree for each input CSV file
//! and prints the tree in level order.

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use id3tree::{DatasetReader, DecisionTreeBuilder};
use std::path::PathBuf;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "id3")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Grows ID3 decision trees from categorical CSV files", long_about = None)]
struct Args {
    /// Input CSV files (the last column is the target unless `--target` is set)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Name of the target column
    #[arg(short, long)]
    target: Option<String>,

    /// The files have no header row
    #[arg(long)]
    no_header: bool,

    /// Print one JSON object per visited node
    #[arg(long)]
    json: bool,

    /// Write a Graphviz file per tree; `-<n>` is appended for several inputs
    #[arg(long)]
    dot: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let several = args.inputs.len() > 1;
    for (k, input) in args.inputs.iter().enumerate() {
        let k = k + 1;
        info!("Loading dataset from: {}", input.display());

        let mut reader = DatasetReader::<&PathBuf, &String>::new()
            .file(input)
            .has_header(!args.no_header);
        if let Some(target) = args.target.as_ref() {
            reader = reader.target_feature(target);
        }
        let dataset = reader.read()
            .with_context(|| format!("Failed to load {}", input.display()))?;

        let (n_sample, n_attribute) = dataset.shape();
        info!(
            "Loaded {} examples with {} attributes, target `{}`",
            n_sample, n_attribute, dataset.target_name()
        );

        let tree = DecisionTreeBuilder::new(dataset)
            .build()
            .with_context(|| format!("Failed to grow a tree on {}", input.display()))?;

        if several && !args.json {
            let banner = format!(" Tree {k}: {} ", input.display());
            println!("\n{:#^60}\n", banner.bold());
        }

        for record in tree.traverse() {
            if args.json {
                println!("{}", serde_json::to_string(&record)?);
            } else {
                println!("{record}");
            }
        }

        if let Some(dot) = args.dot.as_ref() {
            let path = if several {
                let mut name = dot.file_stem()
                    .map(|stem| stem.to_os_string())
                    .unwrap_or_default();
                name.push(format!("-{k}.dot"));
                dot.with_file_name(name)
            } else {
                dot.clone()
            };
            tree.to_dot_file(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
    }

    Ok(())
}
