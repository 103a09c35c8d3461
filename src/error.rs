//! Errors raised by the dataset collaborator and the tree builder.
//!
//! Only malformed input surfaces as an error.
//! An empty subset reaching a node is resolved in-band
//! as a failure leaf, see [`Category::Failure`](crate::Category).
use thiserror::Error;

use std::io;


/// A `Result` alias with [`Id3Error`] as the error type.
pub type Result<T> = std::result::Result<T, Id3Error>;


/// Errors returned by this crate.
#[derive(Debug, Error)]
pub enum Id3Error {
    /// An attribute named by a node or by the caller
    /// does not exist in the dataset.
    #[error("the attribute `{attribute}` does not exist in the dataset")]
    MissingAttribute {
        /// The requested attribute name.
        attribute: String,
    },


    /// The same attribute was listed twice.
    #[error("the attribute `{attribute}` is listed more than once")]
    DuplicateAttribute {
        /// The duplicated attribute name.
        attribute: String,
    },


    /// The target column was passed as a splitting attribute.
    #[error("the target column `{target}` cannot be used as an attribute")]
    TargetAsAttribute {
        /// The target column name.
        target: String,
    },


    /// The target column could not be located.
    #[error("the target column `{target}` does not exist")]
    MissingTarget {
        /// The requested target column name.
        target: String,
    },


    /// A cell has no value.
    #[error("missing value at row {row} in column `{column}`")]
    MissingValue {
        /// Column name of the empty cell.
        column: String,
        /// Zero-based row index of the empty cell.
        row: usize,
    },


    /// A row has a different number of cells than the header.
    #[error("line {line}: expected {expected} columns, got {got}")]
    RaggedRow {
        /// One-based line number in the source.
        line: usize,
        /// Number of columns in the header.
        expected: usize,
        /// Number of columns found on the line.
        got: usize,
    },


    /// A row index past the last example.
    #[error("row {row} is out of range for {len} examples")]
    RowOutOfRange {
        /// The requested row.
        row: usize,
        /// Number of examples in the dataset.
        len: usize,
    },


    /// The input has no column at all, or no attribute besides the target.
    #[error("the dataset needs at least one attribute and a target column")]
    EmptyHeader,


    /// The builder was reconfigured after training started.
    #[error("training has already started on this tree")]
    AlreadyTrained,


    /// A node id that does not belong to this tree.
    #[error("node #{0} does not exist")]
    UnknownNode(usize),


    /// I/O failure while reading or writing a file.
    #[error(transparent)]
    Io(#[from] io::Error),


    /// Malformed delimited text, such as an unterminated quote.
    #[error(transparent)]
    Csv(#[from] csv::Error),


    /// Failure inside `polars` while converting a `DataFrame`.
    #[error(transparent)]
    Polars(#[from] polars::prelude::PolarsError),
}
