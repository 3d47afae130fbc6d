//! Formatting helpers available to templates
//!
//! Helpers cover a fixed capability set: date formatting, locale-aware
//! amount formatting, case transforms and null-safe escaping. The locale is
//! explicit per render call; there is no process-wide locale state. Custom
//! helpers register under a declared capability, and unknown capabilities or
//! colliding names are registration errors rather than silent overwrites.

use crate::Result;
use crate::error::MakerError;
use chrono::format::{Fixed, Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
    RenderErrorReason,
};
use num_format::{Grouping, Locale};
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::trace;

/// Capabilities a formatting helper may declare
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelperCapability {
    /// Format a date value with a format string
    Date,
    /// Format a numeric amount with locale-aware separators
    Amount,
    /// Transform the case of a string
    CaseTransform,
    /// Render missing values as a placeholder instead of failing
    NullSafeEscape,
}

/// A pure formatting function: positional helper parameters in, text out
pub type HelperFn =
    Arc<dyn Fn(&[Value], Locale) -> std::result::Result<String, String> + Send + Sync>;

struct HelperEntry {
    capability: HelperCapability,
    func: HelperFn,
}

/// Registry mapping helper names to formatting functions
pub struct HelperRegistry {
    entries: BTreeMap<String, HelperEntry>,
}

impl HelperRegistry {
    /// Create a registry with the default helpers: `date`, `amount`,
    /// `lowercase`, `uppercase` and `escape`
    pub fn with_defaults() -> Self {
        let mut entries = BTreeMap::new();
        let defaults: [(&str, HelperCapability, HelperFn); 5] = [
            ("date", HelperCapability::Date, Arc::new(date_value)),
            ("amount", HelperCapability::Amount, Arc::new(amount_value)),
            (
                "lowercase",
                HelperCapability::CaseTransform,
                Arc::new(lowercase_value),
            ),
            (
                "uppercase",
                HelperCapability::CaseTransform,
                Arc::new(uppercase_value),
            ),
            (
                "escape",
                HelperCapability::NullSafeEscape,
                Arc::new(escape_value),
            ),
        ];
        for (name, capability, func) in defaults {
            entries.insert(name.to_string(), HelperEntry { capability, func });
        }
        Self { entries }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self {
            entries: BTreeMap::new(),
        }
    }

    /// Register a helper under a declared capability
    ///
    /// Names must be non-empty identifiers. A name that is already taken is
    /// rejected; existing helpers are never overwritten.
    pub fn register<S: Into<String>>(
        &mut self,
        name: S,
        capability: HelperCapability,
        func: HelperFn,
    ) -> Result<()> {
        let name = name.into();
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_')
            || name.starts_with(|c: char| c.is_ascii_digit())
        {
            return Err(MakerError::HelperRegistration(format!(
                "{:?} is not a valid helper name",
                name
            )));
        }
        if self.entries.contains_key(&name) {
            return Err(MakerError::HelperCollision(name));
        }
        trace!("Registering helper {} ({:?})", name, capability);
        self.entries
            .insert(name, HelperEntry { capability, func });
        Ok(())
    }

    /// Look up the capability a helper was registered under
    pub fn capability(&self, name: &str) -> Option<HelperCapability> {
        self.entries.get(name).map(|e| e.capability)
    }

    /// Names of all registered helpers
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Install all helpers on a Handlebars instance with the given locale
    pub(crate) fn install(&self, handlebars: &mut Handlebars<'_>, locale: Locale) {
        for (name, entry) in &self.entries {
            handlebars.register_helper(
                name,
                Box::new(RegisteredHelper {
                    func: entry.func.clone(),
                    locale,
                }),
            );
        }
    }
}

impl Default for HelperRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Resolve a locale identifier against the formatting backend's locale data
pub(crate) fn resolve_locale(name: &str) -> Result<Locale> {
    Locale::from_name(name)
        .or_else(|_| Locale::from_name(name.replace('_', "-")))
        .map_err(|_| MakerError::UnknownLocale(name.to_string()))
}

/// Adapter installing a [`HelperFn`] as a Handlebars helper
struct RegisteredHelper {
    func: HelperFn,
    locale: Locale,
}

impl HelperDef for RegisteredHelper {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let params: Vec<Value> = h.params().iter().map(|p| p.value().clone()).collect();
        match (self.func)(&params, self.locale) {
            Ok(text) => {
                out.write(&text)?;
                Ok(())
            }
            Err(message) => Err(RenderErrorReason::Other(message).into()),
        }
    }
}

fn date_value(params: &[Value], _locale: Locale) -> std::result::Result<String, String> {
    let value = params.first().cloned().unwrap_or(Value::Null);
    let format = params
        .get(1)
        .and_then(Value::as_str)
        .ok_or_else(|| "date helper expects a format string".to_string())?;

    match value {
        Value::Null => Ok(String::new()),
        Value::String(s) if s.is_empty() => Ok(String::new()),
        Value::String(s) => {
            let parsed = parse_date(&s)
                .ok_or_else(|| format!("date helper cannot parse {:?} as a date", s))?;
            format_datetime(&parsed, format)
        }
        other => Err(format!("date helper expects a date string, got {}", other)),
    }
}

/// Format a date with a strftime format string
///
/// Invalid specifiers, and timezone specifiers that have no meaning for a
/// naive date, are rejected up front; chrono's delayed formatter escalates
/// them to a panic at display time.
fn format_datetime(dt: &NaiveDateTime, format: &str) -> std::result::Result<String, String> {
    let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
    let unsupported = items.iter().any(|item| {
        matches!(item, Item::Error)
            || matches!(
                item,
                Item::Fixed(
                    Fixed::TimezoneName
                        | Fixed::TimezoneOffset
                        | Fixed::TimezoneOffsetColon
                        | Fixed::TimezoneOffsetColonZ
                        | Fixed::TimezoneOffsetZ
                )
            )
    });
    if unsupported {
        return Err(format!(
            "date helper cannot format with {:?}: invalid or unsupported specifier",
            format
        ));
    }
    Ok(dt.format_with_items(items.into_iter()).to_string())
}

fn parse_date(s: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S") {
        return Some(dt);
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

fn amount_value(params: &[Value], locale: Locale) -> std::result::Result<String, String> {
    let value = params.first().cloned().unwrap_or(Value::Null);
    let spec = AmountFormat::parse(params.get(1).and_then(Value::as_str).unwrap_or(""));

    let number = match value {
        Value::Null => return Ok(String::new()),
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) if s.trim().is_empty() => return Ok(String::new()),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("amount helper cannot parse {:?} as a number", s))?,
        other => return Err(format!("amount helper expects a number, got {}", other)),
    };

    // Zero and absent amounts render empty, matching existing documents
    if number == 0.0 {
        return Ok(String::new());
    }

    Ok(format_amount(number, &spec, locale))
}

/// Parsed amount format spec: `<minIntDigits>.<minFrac>-<maxFrac>`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct AmountFormat {
    min_int: usize,
    min_frac: usize,
    max_frac: usize,
}

impl AmountFormat {
    /// Parse a spec string, falling back to 1 integer digit and 2 to 3
    /// fraction digits where parts are missing. An explicit dot with an
    /// empty minimum (e.g. `"1."`) means zero minimum fraction digits.
    fn parse(spec: &str) -> Self {
        let (int_spec, frac_spec) = match spec.split_once('.') {
            Some((int, frac)) => (int, Some(frac)),
            None => (spec, None),
        };
        let min_int = int_spec.parse().ok().filter(|v| *v > 0).unwrap_or(1);

        let (min_frac, max_frac) = match frac_spec {
            None => (2, 3),
            Some(frac) => {
                let (min_spec, max_spec) = match frac.split_once('-') {
                    Some((min, max)) => (min, Some(max)),
                    None => (frac, None),
                };
                let min = if min_spec.is_empty() {
                    0
                } else {
                    min_spec.parse().unwrap_or(2)
                };
                let max = match max_spec {
                    Some(max) if !max.is_empty() => max.parse().unwrap_or(3),
                    _ => 3,
                };
                (min, max)
            }
        };

        Self {
            min_int,
            min_frac,
            max_frac: max_frac.max(min_frac),
        }
    }
}

fn format_amount(value: f64, spec: &AmountFormat, locale: Locale) -> String {
    let negative = value < 0.0;
    let rounded = format!("{:.*}", spec.max_frac, value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((int, frac)) => (int, frac),
        None => (rounded.as_str(), ""),
    };

    let mut digits = int_part.to_string();
    while digits.len() < spec.min_int {
        digits.insert(0, '0');
    }
    let grouped = group_digits(&digits, locale.grouping(), locale.separator());

    let mut fraction = frac_part.trim_end_matches('0').to_string();
    while fraction.len() < spec.min_frac {
        fraction.push('0');
    }

    let mut out = String::new();
    if negative {
        out.push_str(locale.minus_sign());
    }
    out.push_str(&grouped);
    if !fraction.is_empty() {
        out.push_str(locale.decimal());
        out.push_str(&fraction);
    }
    out
}

/// Insert grouping separators into a digit string per the locale's grouping
fn group_digits(digits: &str, grouping: Grouping, separator: &str) -> String {
    if matches!(grouping, Grouping::Posix) {
        return digits.to_string();
    }

    let mut reversed = String::new();
    let mut in_group = 0usize;
    // Indian grouping separates the last three digits, then pairs
    let mut group_size = 3usize;
    for c in digits.chars().rev() {
        if in_group == group_size {
            reversed.extend(separator.chars().rev());
            in_group = 0;
            if matches!(grouping, Grouping::Indian) {
                group_size = 2;
            }
        }
        reversed.push(c);
        in_group += 1;
    }
    reversed.chars().rev().collect()
}

fn lowercase_value(params: &[Value], _locale: Locale) -> std::result::Result<String, String> {
    case_param(params, "lowercase").map(|s| s.to_lowercase())
}

fn uppercase_value(params: &[Value], _locale: Locale) -> std::result::Result<String, String> {
    case_param(params, "uppercase").map(|s| s.to_uppercase())
}

fn case_param(params: &[Value], helper: &str) -> std::result::Result<String, String> {
    params
        .first()
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| format!("{} helper expects a string parameter", helper))
}

fn escape_value(params: &[Value], _locale: Locale) -> std::result::Result<String, String> {
    let value = params.first().cloned().unwrap_or(Value::Null);
    Ok(match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s,
        other => other.to_string(),
    })
}
