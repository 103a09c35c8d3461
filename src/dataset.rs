//! Struct `Dataset` represents a categorical training table.

// Provides the dataset struct.
pub(crate) mod dataset_struct;

// Provides a struct that reads a file.
pub(crate) mod dataset_reader;

// Provides row access used in prediction.
pub(crate) mod instance;


pub use dataset_reader::DatasetReader;
pub use dataset_struct::Dataset;
pub use instance::{Instance, Row};
