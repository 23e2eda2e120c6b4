//! CSV export serializer.
//!
//! Writes a sampled series as `x,y` records using the [`csv`] crate.
//! The writer variant streams into any [`std::io::Write`]; the string
//! variant is a convenience for tests and small previews.

use std::io;

use mabiki::Point;

/// Errors that can occur while exporting a series.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// A record failed to serialize.
    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),

    /// The underlying writer failed.
    #[error("I/O error during export: {0}")]
    Io(#[from] io::Error),

    /// The produced bytes were not valid UTF-8.
    #[error("exported CSV was not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Write `series` as CSV records (with an `x,y` header) to `writer`.
///
/// # Errors
///
/// Returns [`ExportError::Csv`] when a record fails to serialize and
/// [`ExportError::Io`] when flushing the underlying writer fails.
pub fn write_csv<W: io::Write>(series: &[Point], writer: W) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    for point in series {
        out.serialize(point)?;
    }
    out.flush()?;
    Ok(())
}

/// Serialize `series` into a CSV string (with an `x,y` header).
///
/// # Errors
///
/// Returns [`ExportError::Csv`] when a record fails to serialize;
/// [`ExportError::Io`] / [`ExportError::Utf8`] cannot occur for an
/// in-memory buffer of float records but are propagated for
/// completeness.
pub fn to_csv_string(series: &[Point]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(series, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}
