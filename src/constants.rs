//! Constants for page dimensions, selectors and common values

/// Printable page height in layout pixels for A4 at scale 1
pub const PAGE_HEIGHT_PX: f64 = 1142.0;

/// Default height increment of one repeating content row in layout pixels
pub const DEFAULT_REPEATABLE_ELEMENT_HEIGHT: f64 = 20.0;

/// Safety margin subtracted from the computed filler height, in layout pixels.
/// Avoids an exact-fit filler pushing an extra blank page out of rounding.
pub const FILLER_SAFETY_MARGIN_PX: f64 = 12.0;

/// Selector for the mandatory main content container
pub const CONTENT_SELECTOR: &str = "main";

/// Selector for the optional header container
pub const HEADER_SELECTOR: &str = "#header";

/// Selector for the optional footer container
pub const FOOTER_SELECTOR: &str = "#footer";

/// Selector for elements that receive the computed filler height
pub const FILLER_SELECTOR: &str = ".pageFiller";

/// CSS pixels per inch (Chromium print parameters are inch-based)
pub const PX_PER_INCH: f64 = 96.0;

/// A4 paper width in inches
pub const A4_WIDTH_IN: f64 = 8.27;

/// A4 paper height in inches
pub const A4_HEIGHT_IN: f64 = 11.69;

/// US Letter paper width in inches
pub const LETTER_WIDTH_IN: f64 = 8.5;

/// US Letter paper height in inches
pub const LETTER_HEIGHT_IN: f64 = 11.0;
