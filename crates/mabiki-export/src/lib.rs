//! mabiki-export: Pure format serializers (sans-IO)
//!
//! Converts sampled point series into output formats: an SVG preview
//! chart and CSV. Serializers return strings or write to a caller
//! supplied writer; no files are opened here.

pub mod csv;
pub mod svg;

pub use csv::{ExportError, to_csv_string, write_csv};
pub use svg::{SvgMetadata, to_svg};
