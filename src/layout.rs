//! Result page layout resolution.
//!
//! Reports either print their results on a single page or split them over
//! several pages, one per accounting scope. The caller may pass a small JSON
//! hint telling which layout to expect:
//!
//! ```json
//! { "resultPageConfig": { "type": "Multi", "pageType": "Standalone" } }
//! ```
//!
//! A missing hint is not an error; the engine falls back to the single page
//! layout. A hint that is present but cannot be understood is rejected.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Key of the layout object inside the hint.
const HINT_KEY: &str = "resultPageConfig";

/// Whether results sit on one page or span several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// A single results page is expected
    #[default]
    SinglePage,
    /// Results span several pages, one per accounting scope
    MultiPage,
}

impl FromStr for LayoutKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" | "single_page" => Ok(LayoutKind::SinglePage),
            "multi" | "multi_page" => Ok(LayoutKind::MultiPage),
            other => Err(Error::InvalidLayoutHint(format!(
                "unknown layout `{}` (expected single or multi)",
                other
            ))),
        }
    }
}

/// Accounting scope of a financial statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScopeVariant {
    /// Group-level statement
    #[default]
    Consolidated,
    /// Entity-level statement
    Standalone,
}

impl ScopeVariant {
    /// Keyword as it appears in report headings.
    pub fn keyword(&self) -> &'static str {
        match self {
            ScopeVariant::Consolidated => "Consolidated",
            ScopeVariant::Standalone => "Standalone",
        }
    }
}

impl fmt::Display for ScopeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for ScopeVariant {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "consolidated" => Ok(ScopeVariant::Consolidated),
            "standalone" => Ok(ScopeVariant::Standalone),
            other => Err(Error::InvalidLayoutHint(format!(
                "unknown page type `{}` (expected Consolidated or Standalone)",
                other
            ))),
        }
    }
}

/// Resolved layout for one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ResultLayoutConfig {
    /// Single or multi page layout
    pub layout: LayoutKind,

    /// Expected accounting scope, only set for the multi page layout
    pub variant: Option<ScopeVariant>,
}

impl ResultLayoutConfig {
    /// Single results page layout.
    pub fn single_page() -> Self {
        Self {
            layout: LayoutKind::SinglePage,
            variant: None,
        }
    }

    /// Multi page layout expecting the given scope.
    pub fn multi_page(variant: ScopeVariant) -> Self {
        Self {
            layout: LayoutKind::MultiPage,
            variant: Some(variant),
        }
    }

    /// Resolve the layout from an optional JSON hint.
    ///
    /// `None` or a blank string yields the single page layout. Unparseable
    /// JSON is an [`Error::InvalidLayoutHint`].
    ///
    /// # Example
    ///
    /// ```
    /// use resultpage::{ResultLayoutConfig, ScopeVariant};
    ///
    /// let hint = r#"{"resultPageConfig": {"type": "Multi", "pageType": "Standalone"}}"#;
    /// let config = ResultLayoutConfig::from_hint(Some(hint)).unwrap();
    /// assert_eq!(config, ResultLayoutConfig::multi_page(ScopeVariant::Standalone));
    ///
    /// assert!(ResultLayoutConfig::from_hint(Some("{not json")).is_err());
    /// ```
    pub fn from_hint(hint: Option<&str>) -> Result<Self> {
        let Some(raw) = hint.map(str::trim).filter(|s| !s.is_empty()) else {
            log::warn!("No layout hint provided, using single page layout");
            return Ok(Self::single_page());
        };

        let value: Value = serde_json::from_str(raw)
            .map_err(|e| Error::InvalidLayoutHint(format!("unparseable JSON: {}", e)))?;
        Self::from_hint_value(&value)
    }

    /// Resolve the layout from an already parsed hint.
    pub fn from_hint_value(value: &Value) -> Result<Self> {
        let root = value.as_object().ok_or_else(|| {
            Error::InvalidLayoutHint(format!("expected a JSON object, found {}", kind(value)))
        })?;

        let config = match root.get(HINT_KEY) {
            None | Some(Value::Null) => {
                log::debug!("Hint has no `{}`, using single page layout", HINT_KEY);
                return Ok(Self::single_page());
            }
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(Error::InvalidLayoutHint(format!(
                    "`{}` must be an object, found {}",
                    HINT_KEY,
                    kind(other)
                )))
            }
        };

        let layout = match string_field(config, "type")? {
            None => LayoutKind::SinglePage,
            Some(name) if name.eq_ignore_ascii_case("multi") => LayoutKind::MultiPage,
            Some(name) if name.eq_ignore_ascii_case("single") => LayoutKind::SinglePage,
            Some(name) => {
                log::warn!("Unknown result page type `{}`, using single page layout", name);
                LayoutKind::SinglePage
            }
        };

        let resolved = match layout {
            LayoutKind::SinglePage => Self::single_page(),
            LayoutKind::MultiPage => {
                let variant = match string_field(config, "pageType")? {
                    None | Some("") => ScopeVariant::default(),
                    Some(name) => name.parse()?,
                };
                Self::multi_page(variant)
            }
        };

        log::debug!("Resolved result layout: {}", resolved);
        Ok(resolved)
    }

    /// Build a layout from plain names such as `"multi"` and `"standalone"`.
    ///
    /// The variant is ignored for the single page layout and defaults to
    /// Consolidated for the multi page layout.
    pub fn from_names(layout: &str, variant: Option<&str>) -> Result<Self> {
        match layout.parse::<LayoutKind>()? {
            LayoutKind::SinglePage => Ok(Self::single_page()),
            LayoutKind::MultiPage => {
                let variant = match variant {
                    Some(name) => name.parse()?,
                    None => ScopeVariant::default(),
                };
                Ok(Self::multi_page(variant))
            }
        }
    }

    /// Check if this is the multi page layout.
    pub fn is_multi_page(&self) -> bool {
        self.layout == LayoutKind::MultiPage
    }

    /// Scope the results page must carry, if any.
    pub fn expected_scope(&self) -> Option<ScopeVariant> {
        match self.layout {
            LayoutKind::SinglePage => None,
            LayoutKind::MultiPage => Some(self.variant.unwrap_or_default()),
        }
    }
}

impl fmt::Display for ResultLayoutConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected_scope() {
            None => f.write_str("single page"),
            Some(scope) => write!(f, "multi page ({})", scope),
        }
    }
}

/// Read an optional string field, rejecting non-string values.
fn string_field<'a>(map: &'a Map<String, Value>, key: &str) -> Result<Option<&'a str>> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.trim())),
        Some(other) => Err(Error::InvalidLayoutHint(format!(
            "`{}` must be a string, found {}",
            key,
            kind(other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
