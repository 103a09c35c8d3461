use std::path::Path;
use std::fs::File;
use std::io::{self, BufReader};

use crate::error::{Id3Error, Result};
use super::dataset_struct::Dataset;


/// A struct that returns [`Dataset`].
/// Using this struct, one can read a delimited text file to [`Dataset`].
/// # Example
/// The following code is a simple example to read a CSV file.
/// ```no_run
/// use id3tree::DatasetReader;
///
/// let filename = "/path/to/csv/file.csv";
/// let sample = DatasetReader::new()
///     .file(filename)
///     .has_header(true)
///     .target_feature("Play")
///     .read()
///     .unwrap();
/// ```
pub struct DatasetReader<P, S> {
    file: Option<P>,
    has_header: bool,
    target: Option<S>,
    delimiter: char,
}


impl<P, S> DatasetReader<P, S> {
    /// Construct a new instance of [`DatasetReader`].
    pub fn new() -> Self {
        Self {
            file: None,
            has_header: true,
            target: None,
            delimiter: ',',
        }
    }


    /// Set the flag whether the file has the header row or not.
    /// Default is `true`.
    pub fn has_header(mut self, flag: bool) -> Self {
        self.has_header = flag;
        self
    }


    /// Set the column delimiter.
    /// Default is `,`.
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }
}


impl<P, S> Default for DatasetReader<P, S> {
    fn default() -> Self {
        Self::new()
    }
}


impl<P, S> DatasetReader<P, S>
    where P: AsRef<Path>
{
    /// Set the file name.
    pub fn file(mut self, file: P) -> Self {
        self.file = Some(file);
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where S: AsRef<str>
{
    /// Set the column name that is used for target label.
    /// If not set, the last column is the target.
    pub fn target_feature(mut self, column: S) -> Self {
        self.target = Some(column);
        self
    }
}


impl<P, S> DatasetReader<P, S>
    where P: AsRef<Path>,
          S: AsRef<str>
{
    /// Reads the file based on the arguments,
    /// and returns [`Dataset`].
    /// This method consumes `self.`
    pub fn read(self) -> Result<Dataset> {
        let file = self.file.ok_or_else(|| {
            Id3Error::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "the file name is not set. Use `DatasetReader::file`",
            ))
        })?;
        let file = File::open(file.as_ref())?;

        let sample = Dataset::from_reader(
            BufReader::new(file), self.has_header, self.delimiter
        )?;

        match self.target {
            Some(target) => sample.set_target(target.as_ref()),
            None => Ok(sample),
        }
    }
}
