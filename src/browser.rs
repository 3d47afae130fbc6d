//! Headless Chromium lifecycle and page interaction

use crate::Result;
use crate::error::MakerError;
use crate::options::PdfOptions;
use headless_chrome::{Browser, LaunchOptions, Tab};
use std::ffi::OsStr;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;
use tracing::{debug, trace};
use url::Url;

/// Launch a headless Chromium instance with optional extra arguments
pub(crate) fn launch(extra_args: &[String]) -> Result<Browser> {
    debug!("Launching headless browser with {} extra args", extra_args.len());
    let args: Vec<&OsStr> = extra_args.iter().map(OsStr::new).collect();
    let options = LaunchOptions::default_builder()
        .headless(true)
        .args(args)
        .build()
        .map_err(|e| MakerError::Browser(anyhow::anyhow!(e)))?;
    Ok(Browser::new(options)?)
}

/// Load rendered HTML into a new tab
///
/// The HTML is staged in a temp file and served over a file URL; the returned
/// file handle must outlive the tab's use of the page.
pub(crate) fn load_page(browser: &Browser, html: &str) -> Result<(Arc<Tab>, NamedTempFile)> {
    let mut file = tempfile::Builder::new()
        .prefix("html-pdf-maker-")
        .suffix(".html")
        .tempfile()?;
    file.write_all(html.as_bytes())?;
    file.flush()?;

    let url = Url::from_file_path(file.path())
        .map_err(|_| MakerError::Browser(anyhow::anyhow!("temp file path is not absolute")))?;
    trace!("Navigating to {}", url);

    let tab = browser.new_tab()?;
    tab.navigate_to(url.as_str())?;
    tab.wait_until_navigated()?;
    Ok((tab, file))
}

/// Measure the rendered border-box height of a mandatory element
pub(crate) fn measure_height(tab: &Tab, selector: &str) -> Result<f64> {
    let element = tab
        .find_element(selector)
        .map_err(|_| MakerError::ContentNotFound(selector.to_string()))?;
    let height = element.get_box_model()?.border.height();
    trace!("Measured {} at height {}", selector, height);
    Ok(height)
}

/// Measure an optional element's height, treating absence as zero
pub(crate) fn measure_optional_height(tab: &Tab, selector: &str) -> f64 {
    let height = tab
        .find_element(selector)
        .and_then(|element| element.get_box_model())
        .map(|model| model.border.height())
        .unwrap_or(0.0);
    trace!("Measured optional {} at height {}", selector, height);
    height
}

/// Inject a CSS rule into the loaded document
pub(crate) fn inject_style(tab: &Tab, rule: &str) -> Result<()> {
    debug!("Injecting style rule: {}", rule);
    let script = format!(
        "(() => {{ const style = document.createElement('style'); \
         style.textContent = {}; document.head.appendChild(style); }})()",
        serde_json::to_string(rule)?
    );
    tab.evaluate(&script, false)?;
    Ok(())
}

/// Print the loaded document to PDF bytes
pub(crate) fn print_pdf(tab: &Tab, options: &PdfOptions) -> Result<Vec<u8>> {
    debug!("Printing page to PDF");
    Ok(tab.print_to_pdf(Some(options.to_print_options()))?)
}
