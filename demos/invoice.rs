//! Render an invoice template to PDF
//!
//! Requires a local Chromium install discoverable by headless_chrome.

use html_pdf_maker::{Margins, PdfMaker, PdfOptions, RenderOptions};
use serde_json::json;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging with debug level
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into()))
        .init();

    let maker = PdfMaker::new()
        .with_template_root("demos/templates")
        .with_browser_arg("--no-sandbox");

    let data = json!({
        "invoice_number": "2024-0042",
        "issued": "2024-03-05",
        "customer": "Acme Corp",
        "total": 1042.5,
        "lines": [
            { "description": "Design work", "amount": 800 },
            { "description": "Hosting", "amount": 242.5 },
        ],
    });

    let render_options = RenderOptions::default()
        .with_locale("en")
        .with_partial("lines", "invoice-lines.html");
    let pdf_options = PdfOptions::default()
        .with_margins(Margins::uniform(24.0))
        .with_repeatable_element_height(22.0);

    let pdf = maker.render_pdf(
        Path::new("invoice.html"),
        &data,
        &render_options,
        &pdf_options,
    )?;

    std::fs::write("invoice.pdf", &pdf)?;
    println!("Wrote invoice.pdf ({} bytes)", pdf.len());
    Ok(())
}
