//! Page filler height calculation
//!
//! Repeating content (multi-page tables and the like) rarely ends on a page
//! boundary, which lets the footer drift upward on the last page. A filler
//! element padded to the height computed here keeps the printed pages at a
//! uniform length.

use crate::Result;
use crate::constants::{FILLER_SAFETY_MARGIN_PX, FILLER_SELECTOR};
use crate::geometry::PageGeometry;
use tracing::{debug, trace};

/// Compute the filler height for a measured page geometry
///
/// Returns `Ok(None)` when no filler should be applied, either because the
/// content already fills the page or because the result does not survive the
/// safety margin. The computation is pure and deterministic.
pub fn compute_filler_height(geometry: &PageGeometry) -> Result<Option<f64>> {
    geometry.validate()?;

    let available = geometry.available_space();
    let content = geometry.content_height;

    debug!(
        "Computing filler height: content {} in available space {}",
        content, available
    );

    let raw = if content > available {
        // Content spans multiple pages. The remainder term nudges the filler
        // so the last page is padded in repeatable-row increments. Downstream
        // layouts depend on this exact arithmetic; do not rework it.
        (content + (content % available).floor() * geometry.repeatable_element_height) % available
    } else {
        available - content
    };

    let filler = raw - FILLER_SAFETY_MARGIN_PX;
    trace!("Filler height {} after safety margin (raw {})", filler, raw);

    if filler > 0.0 {
        Ok(Some(filler))
    } else {
        Ok(None)
    }
}

/// Build the CSS rule that applies a filler height to tagged elements
pub fn filler_style_rule(height: f64) -> String {
    format!("{} {{ height: {}px !important; }}", FILLER_SELECTOR, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_page_content_is_padded_to_fill() {
        // 1142 available, 800 content: 342 raw, 330 after the safety margin
        let geometry = PageGeometry::new(800.0);
        let filler = compute_filler_height(&geometry).unwrap();
        assert_eq!(filler, Some(330.0));
    }

    #[test]
    fn test_exact_fit_applies_no_filler() {
        let geometry = PageGeometry::new(1142.0);
        let filler = compute_filler_height(&geometry).unwrap();
        assert_eq!(filler, None);
    }

    #[test]
    fn test_multi_page_formula() {
        // available = 1142, content = 1300:
        // remainder = 158, 1300 + 158 * 20 = 4460, 4460 % 1142 = 1034
        let geometry = PageGeometry::new(1300.0);
        let filler = compute_filler_height(&geometry).unwrap();
        assert_eq!(filler, Some(1034.0 - FILLER_SAFETY_MARGIN_PX));
    }

    #[test]
    fn test_margins_header_and_footer_reduce_available_space() {
        // available = 1142 - 10 - 10 - 30 - 40 = 1052, content 900 fits
        let geometry = PageGeometry::new(900.0)
            .with_margins(10.0, 10.0)
            .with_header_height(40.0)
            .with_footer_height(30.0);
        let filler = compute_filler_height(&geometry).unwrap();
        assert_eq!(filler, Some(140.0));
    }

    #[test]
    fn test_zero_repeatable_height_degenerates_safely() {
        // The modulo divisor is the available space, so a zero row height
        // only zeroes the nudge term
        let geometry = PageGeometry::new(1300.0).with_repeatable_element_height(0.0);
        let filler = compute_filler_height(&geometry).unwrap();
        // 1300 % 1142 = 158, minus safety margin
        assert_eq!(filler, Some(158.0 - FILLER_SAFETY_MARGIN_PX));
    }

    #[test]
    fn test_result_just_inside_safety_margin_is_dropped() {
        // raw filler of exactly 12 must not produce a style
        let geometry = PageGeometry::new(1130.0);
        let filler = compute_filler_height(&geometry).unwrap();
        assert_eq!(filler, None);
    }

    #[test]
    fn test_deterministic() {
        let geometry = PageGeometry::new(1300.0).with_margins(15.0, 25.0);
        let first = compute_filler_height(&geometry).unwrap();
        let second = compute_filler_height(&geometry).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_invalid_geometry_is_rejected() {
        let geometry = PageGeometry::new(500.0)
            .with_page_height(100.0)
            .with_header_height(200.0);
        assert!(compute_filler_height(&geometry).is_err());
    }

    #[test]
    fn test_style_rule_format() {
        assert_eq!(
            filler_style_rule(330.0),
            ".pageFiller { height: 330px !important; }"
        );
    }
}
