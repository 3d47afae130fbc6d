//! Rendering and print options

use crate::constants::{
    A4_HEIGHT_IN, A4_WIDTH_IN, DEFAULT_REPEATABLE_ELEMENT_HEIGHT, LETTER_HEIGHT_IN,
    LETTER_WIDTH_IN, PX_PER_INCH,
};
use headless_chrome::types::PrintToPdfOptions;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Target paper format for printed output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PageFormat {
    A4,
    Letter,
}

impl PageFormat {
    /// Paper dimensions in inches as (width, height)
    pub fn dimensions_in(&self) -> (f64, f64) {
        match self {
            PageFormat::A4 => (A4_WIDTH_IN, A4_HEIGHT_IN),
            PageFormat::Letter => (LETTER_WIDTH_IN, LETTER_HEIGHT_IN),
        }
    }
}

impl Default for PageFormat {
    fn default() -> Self {
        Self::A4
    }
}

/// Print margins in layout pixels
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    /// Create uniform margins
    pub fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Create margins with vertical and horizontal values
    pub fn symmetric(vertical: f64, horizontal: f64) -> Self {
        Self {
            top: vertical,
            bottom: vertical,
            left: horizontal,
            right: horizontal,
        }
    }
}

/// Options controlling the printed PDF output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfOptions {
    /// Print CSS backgrounds
    pub print_background: bool,
    /// Paper format
    pub format: PageFormat,
    /// Print scale factor
    pub scale: f64,
    /// Landscape orientation
    pub landscape: bool,
    /// Print margins in layout pixels
    pub margins: Margins,
    /// Height increment of one repeating content row, in layout pixels.
    /// Feeds the page filler computation.
    pub repeatable_element_height: f64,
}

impl Default for PdfOptions {
    fn default() -> Self {
        Self {
            print_background: true,
            format: PageFormat::A4,
            scale: 1.0,
            landscape: false,
            margins: Margins::default(),
            repeatable_element_height: DEFAULT_REPEATABLE_ELEMENT_HEIGHT,
        }
    }
}

impl PdfOptions {
    /// Set the paper format
    pub fn with_format(mut self, format: PageFormat) -> Self {
        self.format = format;
        self
    }

    /// Set the print margins
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    /// Set the repeating-row height increment
    pub fn with_repeatable_element_height(mut self, height: f64) -> Self {
        self.repeatable_element_height = height;
        self
    }

    /// Convert to Chromium print parameters (inch-based)
    pub(crate) fn to_print_options(&self) -> PrintToPdfOptions {
        let (paper_width, paper_height) = self.format.dimensions_in();
        PrintToPdfOptions {
            landscape: Some(self.landscape),
            display_header_footer: Some(false),
            print_background: Some(self.print_background),
            scale: Some(self.scale),
            paper_width: Some(paper_width),
            paper_height: Some(paper_height),
            margin_top: Some(self.margins.top / PX_PER_INCH),
            margin_bottom: Some(self.margins.bottom / PX_PER_INCH),
            margin_left: Some(self.margins.left / PX_PER_INCH),
            margin_right: Some(self.margins.right / PX_PER_INCH),
            ..Default::default()
        }
    }
}

/// Options controlling template rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Locale identifier used by the formatting helpers (e.g. "en", "de").
    /// Explicit per render; there is no process-wide locale state.
    pub locale: String,
    /// Partial templates substituted for `##INCLUDE:<key>##` markers,
    /// keyed by marker name
    pub partials: BTreeMap<String, PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            locale: "en".to_string(),
            partials: BTreeMap::new(),
        }
    }
}

impl RenderOptions {
    /// Set the formatting locale
    pub fn with_locale<S: Into<String>>(mut self, locale: S) -> Self {
        self.locale = locale.into();
        self
    }

    /// Register a partial template for an include marker
    pub fn with_partial<S: Into<String>, P: Into<PathBuf>>(mut self, key: S, path: P) -> Self {
        self.partials.insert(key.into(), path.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = PdfOptions::default();
        assert!(options.print_background);
        assert_eq!(options.format, PageFormat::A4);
        assert_eq!(options.scale, 1.0);
        assert_eq!(options.margins, Margins::default());
        assert_eq!(options.repeatable_element_height, 20.0);
    }

    #[test]
    fn test_margin_conversion_to_inches() {
        let options = PdfOptions::default().with_margins(Margins::symmetric(96.0, 48.0));
        let print = options.to_print_options();
        assert_eq!(print.margin_top, Some(1.0));
        assert_eq!(print.margin_bottom, Some(1.0));
        assert_eq!(print.margin_left, Some(0.5));
        assert_eq!(print.margin_right, Some(0.5));
    }

    #[test]
    fn test_paper_dimensions() {
        let print = PdfOptions::default()
            .with_format(PageFormat::Letter)
            .to_print_options();
        assert_eq!(print.paper_width, Some(8.5));
        assert_eq!(print.paper_height, Some(11.0));
    }
}
