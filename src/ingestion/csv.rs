//! CSV reading: first column of every non-empty row.

use std::path::Path;

use crate::error::ConversionResult;

/// Read the first field of every row of the CSV file at `path`.
///
/// Rules:
///
/// - There is no header row; the first row is data.
/// - Rows may have any number of fields; only the first one is kept.
/// - Rows with zero fields (blank lines) are skipped.
/// - Values are kept verbatim (no trimming).
///
/// The file is closed before this function returns, on success and on error.
pub fn read_first_column_from_path(path: impl AsRef<Path>) -> ConversionResult<Vec<String>> {
    let mut rdr = reader_builder().from_path(path)?;
    read_first_column_from_reader(&mut rdr)
}

/// Read the first field of every row from an existing CSV reader.
///
/// Build the reader with [`reader_builder`] to get the same row handling as
/// [`read_first_column_from_path`].
pub fn read_first_column_from_reader<R: std::io::Read>(
    rdr: &mut csv::Reader<R>,
) -> ConversionResult<Vec<String>> {
    let mut values = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if let Some(first) = record.get(0) {
            values.push(first.to_owned());
        }
    }
    Ok(values)
}

/// Reader settings used for input files: headerless and tolerant of ragged rows.
pub fn reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.has_headers(false).flexible(true);
    builder
}
