//! Render Handlebars HTML templates to paginated PDF documents
//!
//! Data binding uses Handlebars with locale-aware formatting helpers; layout
//! and print-to-PDF are delegated to a headless Chromium instance. The one
//! piece of layout logic owned here is the page filler computation: pages
//! with repeating content get a filler element sized so the printed footer
//! sits at a stable position on every page.
//!
//! Templates mark up three well-known regions: a mandatory `<main>` content
//! block, optional `#header` and `#footer` elements whose measured heights
//! feed the filler computation, and elements carrying the `pageFiller` class
//! that receive the computed height.

use headless_chrome::Tab;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument};

mod browser;
pub mod constants;
pub mod error;
pub mod filler;
pub mod geometry;
pub mod helpers;
pub mod options;
pub mod template;

pub use error::{MakerError, Result};
pub use filler::{compute_filler_height, filler_style_rule};
pub use geometry::PageGeometry;
pub use helpers::{HelperCapability, HelperFn, HelperRegistry};
pub use options::{Margins, PageFormat, PdfOptions, RenderOptions};

use constants::{CONTENT_SELECTOR, FOOTER_SELECTOR, HEADER_SELECTOR};

/// Renders HTML templates to paginated PDF documents
pub struct PdfMaker {
    template_root: PathBuf,
    helpers: HelperRegistry,
    browser_args: Vec<String>,
}

impl PdfMaker {
    /// Create a maker with the default helpers, resolving relative template
    /// paths against the current directory
    pub fn new() -> Self {
        Self {
            template_root: PathBuf::from("."),
            helpers: HelperRegistry::with_defaults(),
            browser_args: Vec::new(),
        }
    }

    /// Set the directory relative template paths resolve against
    pub fn with_template_root<P: Into<PathBuf>>(mut self, root: P) -> Self {
        self.template_root = root.into();
        self
    }

    /// Pass an extra command line argument to the browser process
    pub fn with_browser_arg<S: Into<String>>(mut self, arg: S) -> Self {
        self.browser_args.push(arg.into());
        self
    }

    /// Register an additional formatting helper
    ///
    /// See [`HelperRegistry::register`] for the validation rules.
    pub fn register_helper<S: Into<String>>(
        &mut self,
        name: S,
        capability: HelperCapability,
        func: HelperFn,
    ) -> Result<()> {
        self.helpers.register(name, capability, func)
    }

    /// Resolve a template with the given data and return the generated HTML
    #[instrument(skip(self, data))]
    pub fn render_html(
        &self,
        template_path: &Path,
        data: &Value,
        options: &RenderOptions,
    ) -> Result<String> {
        template::load_and_render(&self.template_root, template_path, data, options, &self.helpers)
    }

    /// Render a template to PDF bytes
    ///
    /// Renders the HTML, loads it into a fresh browser tab, applies the page
    /// filler and prints. Measurement, filler computation and style
    /// application run sequentially on the loaded document; nothing else
    /// mutates the layout in between.
    #[instrument(skip(self, data))]
    pub fn render_pdf(
        &self,
        template_path: &Path,
        data: &Value,
        render_options: &RenderOptions,
        pdf_options: &PdfOptions,
    ) -> Result<Vec<u8>> {
        let html = self.render_html(template_path, data, render_options)?;

        let browser = browser::launch(&self.browser_args)?;
        let (tab, _html_file) = browser::load_page(&browser, &html)?;

        self.apply_page_filler(&tab, pdf_options)?;

        browser::print_pdf(&tab, pdf_options)
    }

    /// Measure the loaded document and size its filler elements
    fn apply_page_filler(&self, tab: &Tab, options: &PdfOptions) -> Result<()> {
        let content_height = browser::measure_height(tab, CONTENT_SELECTOR)?;
        let header_height = browser::measure_optional_height(tab, HEADER_SELECTOR);
        let footer_height = browser::measure_optional_height(tab, FOOTER_SELECTOR);

        let geometry = PageGeometry::new(content_height)
            .with_margins(options.margins.top, options.margins.bottom)
            .with_header_height(header_height)
            .with_footer_height(footer_height)
            .with_repeatable_element_height(options.repeatable_element_height);

        if let Some(height) = filler::compute_filler_height(&geometry)? {
            debug!("Applying filler height {}", height);
            browser::inject_style(tab, &filler::filler_style_rule(height))?;
        } else {
            debug!("No filler applied");
        }

        Ok(())
    }
}

impl Default for PdfMaker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs::write;
    use std::sync::Arc;
    use tempfile::tempdir;

    #[test]
    fn test_render_html_end_to_end() {
        let dir = tempdir().unwrap();
        write(
            dir.path().join("statement.html"),
            "<main>{{uppercase holder}}: {{amount balance \"1.2-2\"}}</main>",
        )
        .unwrap();

        let maker = PdfMaker::new().with_template_root(dir.path());
        let html = maker
            .render_html(
                Path::new("statement.html"),
                &json!({ "holder": "acme", "balance": 1042.5 }),
                &RenderOptions::default(),
            )
            .unwrap();
        assert_eq!(html, "<main>ACME: 1,042.50</main>");
    }

    #[test]
    fn test_custom_helper_registration() {
        let mut maker = PdfMaker::new();
        maker
            .register_helper(
                "initials",
                HelperCapability::CaseTransform,
                Arc::new(|params, _| {
                    Ok(params
                        .first()
                        .and_then(Value::as_str)
                        .unwrap_or_default()
                        .split_whitespace()
                        .filter_map(|w| w.chars().next())
                        .collect())
                }),
            )
            .unwrap();

        // Default names stay protected
        let clash = maker.register_helper(
            "escape",
            HelperCapability::NullSafeEscape,
            Arc::new(|_, _| Ok(String::new())),
        );
        assert!(clash.is_err());
    }

    // Needs a local Chromium install; run with `cargo test -- --ignored`
    #[test]
    #[ignore]
    fn test_render_pdf_produces_a_document() {
        let dir = tempdir().unwrap();
        write(
            dir.path().join("doc.html"),
            "<html><body><main><h1>{{title}}</h1>\
             <div class=\"pageFiller\"></div></main></body></html>",
        )
        .unwrap();

        let maker = PdfMaker::new()
            .with_template_root(dir.path())
            .with_browser_arg("--no-sandbox");
        let pdf = maker
            .render_pdf(
                Path::new("doc.html"),
                &json!({ "title": "Hello" }),
                &RenderOptions::default(),
                &PdfOptions::default(),
            )
            .unwrap();
        assert!(pdf.starts_with(b"%PDF"));
    }

    // Needs a local Chromium install; run with `cargo test -- --ignored`
    #[test]
    #[ignore]
    fn test_render_pdf_without_main_element_is_fatal() {
        let dir = tempdir().unwrap();
        write(
            dir.path().join("doc.html"),
            "<html><body><div><h1>{{title}}</h1></div></body></html>",
        )
        .unwrap();

        let maker = PdfMaker::new()
            .with_template_root(dir.path())
            .with_browser_arg("--no-sandbox");
        let result = maker.render_pdf(
            Path::new("doc.html"),
            &json!({ "title": "Hello" }),
            &RenderOptions::default(),
            &PdfOptions::default(),
        );
        assert!(matches!(result, Err(MakerError::ContentNotFound(_))));
    }
}
