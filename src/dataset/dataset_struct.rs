use std::path::Path;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::collections::{HashMap, HashSet};
use std::ops::Index;

use polars::prelude::*;

use crate::error::{Id3Error, Result};
use super::instance::Row;


/// Name of the target column when the file has no header.
const DEFAULT_TARGET_NAME: &str = "Target";


/// Struct `Dataset` holds a categorical sample in column-major format.
/// Every cell, including the target, is kept as a string.
///
/// The attributes keep their column order.
/// This order is the one the tree builder iterates over,
/// so it decides which attribute wins a tie in information gain.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub(super) name_to_index: HashMap<String, usize>,
    pub(super) attributes: Vec<String>,
    pub(super) columns: Vec<Vec<String>>,
    pub(super) target_name: String,
    pub(super) target: Vec<String>,
}


impl Dataset {
    /// Construct a `Dataset` from row-major records.
    /// Each row holds the attribute values in the order of `attributes`
    /// followed by the label.
    ///
    /// ```
    /// use id3tree::Dataset;
    ///
    /// let sample = Dataset::from_rows(
    ///     &["Weather"],
    ///     "Play",
    ///     [["Sunny", "Yes"], ["Rain", "No"]],
    /// ).unwrap();
    /// assert_eq!(sample.shape(), (2, 1));
    /// ```
    pub fn from_rows<S, T, R>(attributes: &[S], target: T, rows: R)
        -> Result<Self>
        where S: AsRef<str>,
              T: AsRef<str>,
              R: IntoIterator,
              R::Item: AsRef<[S]>,
    {
        let attributes = attributes.iter()
            .map(|name| name.as_ref().to_string())
            .collect::<Vec<_>>();
        let expected = attributes.len() + 1;

        let mut columns = vec![Vec::new(); attributes.len()];
        let mut labels = Vec::new();
        for (i, row) in rows.into_iter().enumerate() {
            let row = row.as_ref();
            if row.len() != expected {
                return Err(Id3Error::RaggedRow {
                    line: i + 1, expected, got: row.len(),
                });
            }
            let (values, label) = row.split_at(expected - 1);
            for (column, value) in columns.iter_mut().zip(values) {
                column.push(value.as_ref().to_string());
            }
            labels.push(label[0].as_ref().to_string());
        }

        Self::from_columns(attributes, target.as_ref(), columns, labels)
    }


    /// Convert `polars::DataFrame` and `polars::Series` into `Dataset`.
    /// This method takes the ownership for the given pair
    /// `data` and `target`.
    /// Every column is cast to a string column,
    /// so numerical columns are treated as categorical ones.
    pub fn from_dataframe(data: DataFrame, target: Series) -> Result<Self> {
        let target_name = target.name().to_string();
        let labels = series_to_strings(&target)?;

        let mut attributes = Vec::with_capacity(data.width());
        let mut columns = Vec::with_capacity(data.width());
        for series in data.get_columns() {
            attributes.push(series.name().to_string());
            columns.push(series_to_strings(series)?);
        }

        if columns.iter().any(|column| column.len() != labels.len()) {
            return Err(Id3Error::Polars(PolarsError::ShapeMismatch(
                "the target length differs from the data height".into()
            )));
        }

        Self::from_columns(attributes, &target_name, columns, labels)
    }


    /// Read a CSV format file to `Dataset` type.
    /// The last column is the target.
    /// If `has_header` is `false`, the columns are named
    /// `Attr. [1]`, `Attr. [2]`, ... and `Target`.
    pub fn from_csv<P>(file: P, has_header: bool) -> Result<Self>
        where P: AsRef<Path>,
    {
        let file = File::open(file)?;
        Self::from_reader(BufReader::new(file), has_header, ',')
    }


    /// Read delimited text from `reader`.
    /// Cells may be quoted, so a quoted cell can hold the delimiter.
    /// Blank lines are skipped and cells are trimmed.
    pub(crate) fn from_reader<B>(reader: B, has_header: bool, delimiter: char)
        -> Result<Self>
        where B: BufRead,
    {
        let delimiter = u8::try_from(delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("the delimiter `{delimiter}` is not an ASCII character"),
            ))?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .delimiter(delimiter)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut header: Option<Vec<String>> = None;
        let mut rows: Vec<Vec<String>> = Vec::new();

        for record in reader.records() {
            let record = record?;
            let line_no = record.position()
                .map_or(rows.len() + 1, |pos| pos.line() as usize);

            let cells = record.iter()
                .map(str::to_string)
                .collect::<Vec<_>>();

            if header.is_none() {
                if has_header {
                    header = Some(cells);
                    continue;
                }
                header = Some(dummy_header(cells.len()));
            }

            let expected = header.as_ref().map_or(0, Vec::len);
            if cells.len() != expected {
                return Err(Id3Error::RaggedRow {
                    line: line_no, expected, got: cells.len(),
                });
            }
            rows.push(cells);
        }

        let mut header = header.ok_or(Id3Error::EmptyHeader)?;
        let target_name = header.pop().ok_or(Id3Error::EmptyHeader)?;

        for (row, cells) in rows.iter().enumerate() {
            if let Some(k) = cells.iter().position(|x| x.is_empty()) {
                let column = header.get(k)
                    .cloned()
                    .unwrap_or_else(|| target_name.clone());
                return Err(Id3Error::MissingValue { column, row });
            }
        }

        Self::from_rows(&header, target_name, rows)
    }


    /// Assemble a dataset from its columns.
    /// Attribute names must be unique and differ from the target name.
    fn from_columns(
        attributes: Vec<String>,
        target_name: &str,
        columns: Vec<Vec<String>>,
        target: Vec<String>,
    ) -> Result<Self>
    {
        if attributes.is_empty() {
            return Err(Id3Error::EmptyHeader);
        }

        let mut seen = HashSet::new();
        for name in attributes.iter() {
            if name == target_name {
                return Err(Id3Error::TargetAsAttribute {
                    target: target_name.to_string(),
                });
            }
            if !seen.insert(name.as_str()) {
                return Err(Id3Error::DuplicateAttribute {
                    attribute: name.clone(),
                });
            }
        }

        let name_to_index = index_names(&attributes);
        let dataset = Self {
            name_to_index,
            attributes,
            columns,
            target_name: target_name.to_string(),
            target,
        };
        Ok(dataset)
    }


    /// Set the attribute named `target` to be the target column.
    /// The old target column is appended to the attributes.
    pub fn set_target<S: AsRef<str>>(mut self, target: S) -> Result<Self> {
        let target = target.as_ref();
        if target == self.target_name {
            return Ok(self);
        }
        let pos = self.attributes.iter()
            .position(|name| name == target)
            .ok_or_else(|| Id3Error::MissingTarget {
                target: target.to_string(),
            })?;

        let name = self.attributes.remove(pos);
        let column = self.columns.remove(pos);

        let old_name = std::mem::replace(&mut self.target_name, name);
        let old_column = std::mem::replace(&mut self.target, column);
        self.attributes.push(old_name);
        self.columns.push(old_column);

        self.name_to_index = index_names(&self.attributes);
        Ok(self)
    }


    /// Returns the attribute names in column order.
    /// The target column is not included.
    pub fn attributes(&self) -> &[String] {
        &self.attributes[..]
    }


    /// Returns the name of the target column.
    pub fn target_name(&self) -> &str {
        &self.target_name
    }


    /// Returns the target values.
    pub fn target(&self) -> &[String] {
        &self.target[..]
    }


    /// Returns the pair of the number of examples and
    /// the number of attributes.
    pub fn shape(&self) -> (usize, usize) {
        (self.target.len(), self.attributes.len())
    }


    /// Returns the number of examples.
    pub fn len(&self) -> usize {
        self.target.len()
    }


    /// Returns `true` if there is no example.
    pub fn is_empty(&self) -> bool {
        self.target.is_empty()
    }


    /// Returns `true` if `attribute` is a column of this dataset.
    pub fn has_attribute(&self, attribute: &str) -> bool {
        self.name_to_index.contains_key(attribute)
    }


    /// Returns the column of `attribute`.
    pub fn column(&self, attribute: &str) -> Result<&[String]> {
        self.name_to_index.get(attribute)
            .map(|&k| &self.columns[k][..])
            .ok_or_else(|| Id3Error::MissingAttribute {
                attribute: attribute.to_string(),
            })
    }


    /// Returns the value of `attribute` at the `row`-th example.
    /// Fails if `attribute` does not exist or `row` is out of range.
    pub fn value(&self, row: usize, attribute: &str) -> Result<&str> {
        self.column(attribute)?
            .get(row)
            .map(String::as_str)
            .ok_or(Id3Error::RowOutOfRange { row, len: self.len() })
    }


    /// Returns the label of the `row`-th example.
    ///
    /// # Panics
    /// Panics if `row >= self.len()`.
    pub fn label(&self, row: usize) -> &str {
        &self.target[row]
    }


    /// Returns the `row`-th example as a pair `(x, y)`.
    ///
    /// # Panics
    /// Panics if `row >= self.len()`.
    pub fn at(&self, row: usize) -> (Vec<&str>, &str) {
        let x = self.columns.iter()
            .map(|column| column[row].as_str())
            .collect::<Vec<_>>();
        (x, self.label(row))
    }


    /// Returns a view of the `row`-th example.
    /// [`Row::label`] panics if `row` is out of range,
    /// while lookups through [`Instance`](crate::Instance) return `None`.
    pub fn row(&self, row: usize) -> Row<'_> {
        Row::new(self, row)
    }


    /// Returns the distinct target values in order of first appearance.
    pub fn labels(&self) -> Vec<String> {
        distinct_in_order(&self.target)
    }


    /// Returns the distinct values of `attribute`
    /// in order of first appearance.
    pub fn distinct(&self, attribute: &str) -> Result<Vec<String>> {
        self.column(attribute).map(distinct_in_order)
    }


    /// Returns the distinct values of every attribute.
    pub fn domains(&self) -> Vec<(&str, Vec<String>)> {
        self.attributes.iter()
            .zip(&self.columns)
            .map(|(name, column)| (name.as_str(), distinct_in_order(column)))
            .collect()
    }


    /// Returns the examples whose `attribute` equals to `value`.
    pub fn filter(&self, attribute: &str, value: &str) -> Result<Self> {
        let column = self.column(attribute)?;
        let rows = column.iter()
            .enumerate()
            .filter_map(|(i, x)| (x == value).then_some(i))
            .collect::<Vec<_>>();
        Ok(self.select(&rows))
    }


    /// Splits the examples by the value of `attribute`.
    /// The groups follow the order of first appearance of the values,
    /// and the rows keep their relative order inside each group.
    pub fn partition(&self, attribute: &str) -> Result<Vec<(String, Self)>> {
        let column = self.column(attribute)?;

        let mut position: HashMap<&str, usize> = HashMap::new();
        let mut groups: Vec<(&str, Vec<usize>)> = Vec::new();
        for (i, x) in column.iter().enumerate() {
            let k = *position.entry(x.as_str())
                .or_insert_with(|| {
                    groups.push((x.as_str(), Vec::new()));
                    groups.len() - 1
                });
            groups[k].1.push(i);
        }

        let groups = groups.into_iter()
            .map(|(value, rows)| (value.to_string(), self.select(&rows)))
            .collect();
        Ok(groups)
    }


    /// Returns the examples at `rows`, in the given order.
    pub fn select(&self, rows: &[usize]) -> Self {
        let columns = self.columns.iter()
            .map(|column| {
                rows.iter().map(|&i| column[i].clone()).collect()
            })
            .collect();
        let target = rows.iter()
            .map(|&i| self.target[i].clone())
            .collect();

        Self {
            name_to_index: self.name_to_index.clone(),
            attributes: self.attributes.clone(),
            columns,
            target_name: self.target_name.clone(),
            target,
        }
    }
}


impl<S> Index<S> for Dataset
    where S: AsRef<str>
{
    type Output = [String];


    fn index(&self, name: S) -> &Self::Output {
        let name: &str = name.as_ref();
        let k = *self.name_to_index.get(name)
            .unwrap_or_else(|| panic!("The attribute `{name}` does not exist"));
        &self.columns[k][..]
    }
}


/// Returns the distinct items of `values` in order of first appearance.
pub(crate) fn distinct_in_order<'a, I>(values: I) -> Vec<String>
    where I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    values.into_iter()
        .filter(|x| seen.insert(x.as_str()))
        .cloned()
        .collect()
}


fn index_names(names: &[String]) -> HashMap<String, usize> {
    names.iter()
        .enumerate()
        .map(|(i, name)| (name.clone(), i))
        .collect()
}


fn dummy_header(n_column: usize) -> Vec<String> {
    let mut header = (1..n_column).map(|i| format!("Attr. [{i}]"))
        .collect::<Vec<_>>();
    header.push(DEFAULT_TARGET_NAME.to_string());
    header
}


fn series_to_strings(series: &Series) -> Result<Vec<String>> {
    let name = series.name();
    let series = series.cast(&DataType::Utf8)?;
    series.utf8()?
        .into_iter()
        .enumerate()
        .map(|(row, x)| {
            x.map(str::to_string)
                .ok_or_else(|| Id3Error::MissingValue {
                    column: name.to_string(), row,
                })
        })
        .collect()
}
