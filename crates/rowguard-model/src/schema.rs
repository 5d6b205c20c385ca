//! Validation templates.
//!
//! A template arrives as a loosely typed document ([`TemplateDef`]) and is
//! turned into a [`Schema`]: an ordered, immutable list of column rules with
//! every regular expression compiled up front.

use std::fmt;

use indexmap::IndexMap;
use indexmap::map::Entry;
use regex::Regex;
use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use tracing::{debug, warn};

use crate::error::{Result, SchemaError};

/// Raw template document, as read from a template store.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateDef {
    #[serde(default)]
    pub columns: Option<RawColumns>,
}

/// Column definitions in document order.
///
/// Duplicate keys are kept so that [`Schema::from_template`] can reject them.
#[derive(Debug, Clone, Default)]
pub struct RawColumns(pub Vec<(String, RawColumnDef)>);

impl<'de> Deserialize<'de> for RawColumns {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ColumnsVisitor;

        impl<'de> Visitor<'de> for ColumnsVisitor {
            type Value = RawColumns;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a mapping of column keys to column definitions")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut columns = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some(key) = map.next_key::<String>()? {
                    // `column:` with no body is an unconstrained optional column.
                    let def = map.next_value::<Option<RawColumnDef>>()?.unwrap_or_default();
                    columns.push((key, def));
                }
                Ok(RawColumns(columns))
            }
        }

        deserializer.deserialize_map(ColumnsVisitor)
    }
}

/// One column as written in a template.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawColumnDef {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub required: bool,
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    pub pattern: Option<String>,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub format: Option<String>,
}

impl RawColumnDef {
    /// Names of the constraints present on this definition.
    fn present_constraints(&self) -> Vec<&'static str> {
        let mut present = Vec::new();
        if self.max_length.is_some() {
            present.push("maxLength");
        }
        if self.min_length.is_some() {
            present.push("minLength");
        }
        if self.pattern.is_some() {
            present.push("pattern");
        }
        if self.min.is_some() {
            present.push("min");
        }
        if self.max.is_some() {
            present.push("max");
        }
        if self.format.is_some() {
            present.push("format");
        }
        present
    }
}

/// Literal layout a date column must follow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateFormat {
    /// `YYYY-MM-DD`
    IsoDate,
    /// `MM/DD/YYYY`
    UsDate,
    /// Any other format string; accepted but never enforced.
    Other(String),
}

impl DateFormat {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "YYYY-MM-DD" => Self::IsoDate,
            "MM/DD/YYYY" => Self::UsDate,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::IsoDate => "YYYY-MM-DD",
            Self::UsDate => "MM/DD/YYYY",
            Self::Other(raw) => raw,
        }
    }

    /// Whether this format has a fixed literal layout to check against.
    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl fmt::Display for DateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default)]
pub struct StringRule {
    pub max_length: Option<usize>,
    pub min_length: Option<usize>,
    pub pattern: Option<Regex>,
}

#[derive(Debug, Clone, Default)]
pub struct DateRule {
    pub format: Option<DateFormat>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct NumberRule {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// Type of a column together with the constraints that apply to it.
#[derive(Debug, Clone)]
pub enum ColumnRule {
    String(StringRule),
    Date(DateRule),
    Number(NumberRule),
    Sin,
    Email,
    Phone,
    /// No type declared: only requiredness is checked.
    Untyped,
    /// A type name outside the fixed registry; tolerated as a no-op.
    Unrecognized(String),
}

impl ColumnRule {
    /// Type name as it appears in templates.
    pub fn type_name(&self) -> Option<&str> {
        match self {
            Self::String(_) => Some("string"),
            Self::Date(_) => Some("date"),
            Self::Number(_) => Some("number"),
            Self::Sin => Some("sin"),
            Self::Email => Some("email"),
            Self::Phone => Some("phone"),
            Self::Untyped => None,
            Self::Unrecognized(name) => Some(name),
        }
    }

    fn from_raw(column: &str, raw: &RawColumnDef) -> Result<Self> {
        let kind = raw.kind.as_deref().unwrap_or("");
        let rule = match kind {
            "" => Self::Untyped,
            "string" => Self::String(StringRule {
                // Zero lengths and empty patterns count as unset.
                max_length: raw.max_length.filter(|len| *len > 0),
                min_length: raw.min_length.filter(|len| *len > 0),
                pattern: compile_pattern(column, raw.pattern.as_deref())?,
            }),
            "date" => Self::Date(DateRule {
                format: raw
                    .format
                    .as_deref()
                    .filter(|format| !format.is_empty())
                    .map(DateFormat::parse),
            }),
            "number" => Self::Number(NumberRule {
                min: raw.min,
                max: raw.max,
            }),
            "sin" => Self::Sin,
            "email" => Self::Email,
            "phone" => Self::Phone,
            other => {
                warn!(column, column_type = other, "unrecognized column type; no type check");
                Self::Unrecognized(other.to_string())
            }
        };

        let allowed = allowed_constraints(kind);
        let ignored: Vec<&str> = raw
            .present_constraints()
            .into_iter()
            .filter(|name| !allowed.contains(name))
            .collect();
        if !ignored.is_empty() {
            debug!(column, column_type = kind, ?ignored, "ignoring constraints not used by type");
        }
        Ok(rule)
    }
}

fn allowed_constraints(kind: &str) -> &'static [&'static str] {
    match kind {
        "string" => &["maxLength", "minLength", "pattern"],
        "date" => &["format"],
        "number" => &["min", "max"],
        _ => &[],
    }
}

fn compile_pattern(column: &str, pattern: Option<&str>) -> Result<Option<Regex>> {
    let Some(pattern) = pattern.filter(|p| !p.is_empty()) else {
        return Ok(None);
    };
    Regex::new(pattern)
        .map(Some)
        .map_err(|source| SchemaError::InvalidPattern {
            column: column.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// One column's rule and requiredness.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    pub rule: ColumnRule,
    pub required: bool,
}

impl ColumnDef {
    pub fn new(rule: ColumnRule) -> Self {
        Self {
            rule,
            required: false,
        }
    }

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn from_raw(column: &str, raw: &RawColumnDef) -> Result<Self> {
        Ok(Self {
            rule: ColumnRule::from_raw(column, raw)?,
            required: raw.required,
        })
    }
}

/// An immutable, ordered set of column rules.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    columns: IndexMap<String, ColumnDef>,
}

impl Schema {
    /// Build a schema from column definitions, keeping their order.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::DuplicateColumn`] if a key repeats.
    pub fn new<I>(columns: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, ColumnDef)>,
    {
        let mut map = IndexMap::new();
        for (key, def) in columns {
            match map.entry(key) {
                Entry::Occupied(entry) => {
                    return Err(SchemaError::DuplicateColumn {
                        column: entry.key().clone(),
                    });
                }
                Entry::Vacant(entry) => {
                    entry.insert(def);
                }
            }
        }
        Ok(Self { columns: map })
    }

    /// Materialize a raw template document.
    ///
    /// # Errors
    ///
    /// Fails when `columns` is missing, a column key repeats, or a pattern
    /// does not compile.
    pub fn from_template(template: TemplateDef) -> Result<Self> {
        let RawColumns(raw) = template.columns.ok_or(SchemaError::MissingColumns)?;
        let mut columns = Vec::with_capacity(raw.len());
        for (key, def) in &raw {
            columns.push((key.clone(), ColumnDef::from_raw(key, def)?));
        }
        Self::new(columns)
    }

    /// Columns in template order.
    pub fn columns(&self) -> impl Iterator<Item = (&str, &ColumnDef)> {
        self.columns.iter().map(|(key, def)| (key.as_str(), def))
    }

    pub fn column_keys(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn get(&self, key: &str) -> Option<&ColumnDef> {
        self.columns.get(key)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
