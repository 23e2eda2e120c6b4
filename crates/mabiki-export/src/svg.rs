//! SVG export serializer.
//!
//! Renders a sampled series as a single `<path>` polyline inside a
//! fixed-size preview document, using the [`svg`] crate for document
//! construction, XML escaping, and path data formatting.
//!
//! The chart maps data bounds onto the drawing area with independent
//! x and y scales (series axes rarely share units, so aspect ratio is
//! not preserved) and flips y so larger values render higher.
//!
//! Optional [`SvgMetadata`] embeds `<title>` and `<desc>` elements for
//! accessibility and to help file managers identify exported files.
//!
//! This is a pure function with no I/O -- it returns a `String`.

use svg::Document;
use svg::node::Text;
use svg::node::element::path::Data;
use svg::node::element::{Description, Path, Title};

use mabiki::Point;

/// SVG document width in pixels.
const DOCUMENT_WIDTH: f64 = 800.0;
/// SVG document height in pixels.
const DOCUMENT_HEIGHT: f64 = 400.0;
/// Margin between the drawing area and the document edge, in pixels.
const MARGIN: f64 = 20.0;

/// Metadata to embed in the SVG document.
///
/// Both fields are optional.  When present, a `<title>` and/or `<desc>`
/// element is emitted immediately after the opening `<svg>` tag.  These
/// are standard SVG accessibility elements and are surfaced by some
/// file managers and screen readers.
///
/// Text values are XML-escaped automatically by the `svg` crate.
#[derive(Debug, Clone, Default)]
pub struct SvgMetadata<'a> {
    /// Document title — emitted as `<title>`.
    ///
    /// Typically the signal or source name.
    pub title: Option<&'a str>,

    /// Document description — emitted as `<desc>`.
    ///
    /// Typically the sampling parameters, so exported previews are
    /// distinguishable.
    pub description: Option<&'a str>,
}

/// Serialize a sampled series into an SVG document string.
///
/// The series becomes one `<path>` polyline fitted to the document's
/// drawing area. Points with non-finite coordinates cannot be
/// expressed in path data and are dropped; if fewer than two
/// expressible points remain, the document is emitted without a path.
///
/// # Examples
///
/// ```
/// use mabiki::Point;
/// use mabiki_export::{SvgMetadata, to_svg};
///
/// let series = vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)];
/// let metadata = SvgMetadata {
///     title: Some("spikes"),
///     description: Some("budget 4000"),
/// };
/// let svg = to_svg(&series, &metadata);
/// assert!(svg.contains("<title>spikes</title>"));
/// assert!(svg.contains("<desc>budget 4000</desc>"));
/// assert!(svg.contains("<path"));
/// ```
#[must_use]
pub fn to_svg(series: &[Point], metadata: &SvgMetadata<'_>) -> String {
    let mut doc = Document::new()
        .set("width", DOCUMENT_WIDTH)
        .set("height", DOCUMENT_HEIGHT)
        .set("viewBox", (0.0, 0.0, DOCUMENT_WIDTH, DOCUMENT_HEIGHT));

    // Optional <title> element
    if let Some(title) = metadata.title {
        doc = doc.add(Title::new(title));
    }

    // Optional <desc> element
    if let Some(description) = metadata.description {
        doc = doc.add(Description::new().add(Text::new(description)));
    }

    if let Some(d) = build_path_data(series) {
        let path = Path::new()
            .set("d", d)
            .set("fill", "none")
            .set("stroke", "black")
            .set("stroke-width", 1);
        doc = doc.add(path);
    }

    doc.to_string()
}

/// Build the `d` attribute mapping data bounds onto the drawing area.
///
/// Returns `None` when fewer than two finite points exist (nothing to
/// draw). A zero-width or zero-height data range collapses onto the
/// drawing area's left edge / bottom edge respectively.
fn build_path_data(series: &[Point]) -> Option<String> {
    let finite: Vec<Point> = series
        .iter()
        .copied()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();
    if finite.len() < 2 {
        return None;
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in &finite {
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }
    let x_span = if x_max > x_min { x_max - x_min } else { 1.0 };
    let y_span = if y_max > y_min { y_max - y_min } else { 1.0 };

    let plot_width = DOCUMENT_WIDTH - 2.0 * MARGIN;
    let plot_height = DOCUMENT_HEIGHT - 2.0 * MARGIN;
    let tx = |p: &Point| {
        let x = (p.x - x_min) / x_span * plot_width + MARGIN;
        // SVG y grows downward; flip so larger values render higher.
        let y = DOCUMENT_HEIGHT - MARGIN - (p.y - y_min) / y_span * plot_height;
        (x, y)
    };

    let mut data = Data::new().move_to(tx(&finite[0]));
    for p in &finite[1..] {
        data = data.line_to(tx(p));
    }
    Some(String::from(svg::node::Value::from(data)))
}
