//! Measured page geometry for the filler computation

use crate::Result;
use crate::constants::{DEFAULT_REPEATABLE_ELEMENT_HEIGHT, PAGE_HEIGHT_PX};
use crate::error::MakerError;
use tracing::trace;

/// Measured geometry for a single filler computation
///
/// All values are in layout pixels. The object carries no identity beyond one
/// computation; it is built from fresh measurements, used once, and discarded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    /// Printable height of the target page
    pub page_height: f64,
    /// Configured top print margin
    pub top_margin: f64,
    /// Configured bottom print margin
    pub bottom_margin: f64,
    /// Measured header height (0 when the header element is absent)
    pub header_height: f64,
    /// Measured footer height (0 when the footer element is absent)
    pub footer_height: f64,
    /// Measured height of the main content block
    pub content_height: f64,
    /// Height increment of one repeating content row
    pub repeatable_element_height: f64,
}

impl PageGeometry {
    /// Create geometry for a measured content height with default page
    /// height, zero margins and no header or footer
    pub fn new(content_height: f64) -> Self {
        trace!("New page geometry for content height {}", content_height);
        Self {
            page_height: PAGE_HEIGHT_PX,
            top_margin: 0.0,
            bottom_margin: 0.0,
            header_height: 0.0,
            footer_height: 0.0,
            content_height,
            repeatable_element_height: DEFAULT_REPEATABLE_ELEMENT_HEIGHT,
        }
    }

    /// Set the printable page height
    pub fn with_page_height(mut self, height: f64) -> Self {
        self.page_height = height;
        self
    }

    /// Set the top and bottom print margins
    pub fn with_margins(mut self, top: f64, bottom: f64) -> Self {
        self.top_margin = top;
        self.bottom_margin = bottom;
        self
    }

    /// Set the measured header height
    pub fn with_header_height(mut self, height: f64) -> Self {
        self.header_height = height;
        self
    }

    /// Set the measured footer height
    pub fn with_footer_height(mut self, height: f64) -> Self {
        self.footer_height = height;
        self
    }

    /// Set the repeating-row height increment
    pub fn with_repeatable_element_height(mut self, height: f64) -> Self {
        self.repeatable_element_height = height;
        self
    }

    /// Vertical space usable by content plus filler on one page
    pub fn available_space(&self) -> f64 {
        self.page_height
            - self.top_margin
            - self.bottom_margin
            - self.footer_height
            - self.header_height
    }

    /// Validate that all inputs are usable measurements
    pub fn validate(&self) -> Result<()> {
        let fields = [
            ("page_height", self.page_height),
            ("top_margin", self.top_margin),
            ("bottom_margin", self.bottom_margin),
            ("header_height", self.header_height),
            ("footer_height", self.footer_height),
            ("content_height", self.content_height),
            ("repeatable_element_height", self.repeatable_element_height),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(MakerError::InvalidGeometry(format!(
                    "{} must be a non-negative number, got {}",
                    name, value
                )));
            }
        }

        if self.available_space() < 0.0 {
            return Err(MakerError::InvalidGeometry(format!(
                "margins, header and footer ({}) exceed the page height ({})",
                self.top_margin + self.bottom_margin + self.header_height + self.footer_height,
                self.page_height
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let geometry = PageGeometry::new(800.0);
        assert_eq!(geometry.page_height, PAGE_HEIGHT_PX);
        assert_eq!(geometry.top_margin, 0.0);
        assert_eq!(geometry.bottom_margin, 0.0);
        assert_eq!(geometry.header_height, 0.0);
        assert_eq!(geometry.footer_height, 0.0);
        assert_eq!(
            geometry.repeatable_element_height,
            DEFAULT_REPEATABLE_ELEMENT_HEIGHT
        );
    }

    #[test]
    fn test_available_space() {
        let geometry = PageGeometry::new(900.0)
            .with_margins(10.0, 10.0)
            .with_header_height(40.0)
            .with_footer_height(30.0);
        assert_eq!(geometry.available_space(), 1052.0);
    }

    #[test]
    fn test_validate_rejects_negative_inputs() {
        let geometry = PageGeometry::new(-1.0);
        assert!(geometry.validate().is_err());

        let geometry = PageGeometry::new(100.0).with_margins(-5.0, 0.0);
        assert!(geometry.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_oversized_chrome() {
        // Header and footer together exceed the page height
        let geometry = PageGeometry::new(100.0)
            .with_page_height(100.0)
            .with_header_height(80.0)
            .with_footer_height(80.0);
        assert!(matches!(
            geometry.validate(),
            Err(MakerError::InvalidGeometry(_))
        ));
    }

    #[test]
    fn test_validate_accepts_exact_fit_chrome() {
        let geometry = PageGeometry::new(0.0)
            .with_page_height(100.0)
            .with_header_height(50.0)
            .with_footer_height(50.0);
        assert!(geometry.validate().is_ok());
    }
}
