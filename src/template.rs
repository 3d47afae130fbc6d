//! Template loading, partial inclusion and rendering

use crate::Result;
use crate::helpers::{HelperRegistry, resolve_locale};
use crate::options::RenderOptions;
use handlebars::Handlebars;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Marker string replaced by a rendered partial template
pub fn include_marker(key: &str) -> String {
    format!("##INCLUDE:{}##", key)
}

/// Resolve a template path against the template root
pub(crate) fn resolve_template_path(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

/// Load a template file, expand its include markers and render it
///
/// Each partial is itself a template: it is rendered with the same data
/// before being substituted, and the combined document is compiled again.
/// Partials do not expand further include markers of their own.
pub(crate) fn load_and_render(
    root: &Path,
    path: &Path,
    data: &Value,
    options: &RenderOptions,
    registry: &HelperRegistry,
) -> Result<String> {
    let resolved = resolve_template_path(root, path);
    debug!("Loading template {}", resolved.display());
    let mut source = fs::read_to_string(&resolved)?;

    for (key, partial_path) in &options.partials {
        let marker = include_marker(key);
        if source.contains(&marker) {
            trace!("Expanding partial {} from {}", key, partial_path.display());
            let nested = RenderOptions {
                locale: options.locale.clone(),
                partials: BTreeMap::new(),
            };
            let rendered = load_and_render(root, partial_path, data, &nested, registry)?;
            source = source.replace(&marker, &rendered);
        }
    }

    render_source(&source, data, options, registry)
}

/// Compile a template source string and render it with the given data
pub(crate) fn render_source(
    source: &str,
    data: &Value,
    options: &RenderOptions,
    registry: &HelperRegistry,
) -> Result<String> {
    let locale = resolve_locale(&options.locale)?;
    let mut handlebars = Handlebars::new();
    registry.install(&mut handlebars, locale);
    handlebars.register_template_string("document", source)?;
    Ok(handlebars.render("document", data)?)
}
