//! Path patterns and ordered pattern→target mapping tables.
//!
//! A [`MappingTable`] is the heart of every builder: it decides where each
//! source file of a feature lands inside a consumer project.
//!
//! ## Pattern forms
//!
//! | Form              | Example            | Matches                         |
//! |-------------------|--------------------|---------------------------------|
//! | Exact             | `db.ts`            | the literal path only           |
//! | Prefix wildcard   | `server/*`         | any path under `server/`        |
//! | Embedded wildcard | `.env.example.*`   | full-string glob, `*` = `.*`    |
//! | Catch-all         | `*`                | every path                      |
//!
//! Tables are scanned in declaration order and the **first** matching entry
//! wins. A broad entry declared early shadows narrower ones declared later.
//!
//! ## Target templates
//!
//! Templates may contain a `{feature}` placeholder and at most one `*`:
//!
//! - `{feature}` is replaced by the builder's feature name, every occurrence,
//!   exactly once (the substituted text is never rescanned).
//! - `*.ext` rewrites the extension: `*` becomes the source base name without
//!   its own extension.
//! - A bare `*` becomes the path suffix after a prefix pattern, the whole path
//!   for the catch-all, and the untouched path for embedded wildcards.

use std::fmt;

use regex::Regex;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde::Deserialize;

use crate::domain::error::DomainError;

/// Placeholder substituted with the builder's feature name.
pub const FEATURE_PLACEHOLDER: &str = "{feature}";

const CATCH_ALL: &str = "*";

/// Classified form of a pattern string.
#[derive(Debug, Clone)]
pub enum PatternKind {
    /// No wildcard; literal comparison.
    Exact,
    /// `dir/*`; holds `dir/` including the trailing slash.
    Prefix(String),
    /// Wildcard inside the pattern, compiled to an anchored regex.
    Embedded(Regex),
    /// `*` alone.
    CatchAll,
}

/// A parsed pattern string.
#[derive(Debug, Clone)]
pub struct PathPattern {
    raw: String,
    kind: PatternKind,
}

impl PathPattern {
    /// Classify and (for embedded wildcards) compile a pattern.
    pub fn parse(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.is_empty() {
            return Err(DomainError::InvalidPattern {
                pattern: raw,
                reason: "pattern cannot be empty".into(),
            });
        }

        let kind = if raw == CATCH_ALL {
            PatternKind::CatchAll
        } else if let Some(dir) = raw.strip_suffix("/*").filter(|dir| !dir.contains('*')) {
            PatternKind::Prefix(format!("{dir}/"))
        } else if raw.contains('*') {
            PatternKind::Embedded(compile_glob(&raw)?)
        } else {
            PatternKind::Exact
        };

        Ok(Self { raw, kind })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &PatternKind {
        &self.kind
    }

    /// Whether `path` (forward-slash, feature-relative) matches.
    pub fn matches(&self, path: &str) -> bool {
        if self.raw == path {
            return true;
        }
        match &self.kind {
            PatternKind::Exact => false,
            PatternKind::Prefix(prefix) => path.starts_with(prefix.as_str()),
            PatternKind::Embedded(re) => re.is_match(path),
            PatternKind::CatchAll => true,
        }
    }
}

impl PartialEq for PathPattern {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for PathPattern {}

impl fmt::Display for PathPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

fn compile_glob(raw: &str) -> Result<Regex, DomainError> {
    let body = raw
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    Regex::new(&format!("^{body}$")).map_err(|e| DomainError::InvalidPattern {
        pattern: raw.to_owned(),
        reason: e.to_string(),
    })
}

/// One `(pattern, targetTemplate)` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMapping {
    pub pattern: PathPattern,
    pub template: String,
}

impl PatternMapping {
    pub fn new(pattern: &str, template: impl Into<String>) -> Result<Self, DomainError> {
        Ok(Self {
            pattern: PathPattern::parse(pattern)?,
            template: template.into(),
        })
    }

    /// Compute the installed path for `path`, which this row must match.
    pub fn resolve(&self, path: &str, feature: &str) -> String {
        let substitute = |part: &str| part.replace(FEATURE_PLACEHOLDER, feature);
        let Some((head, tail)) = self.template.split_once('*') else {
            return substitute(&self.template);
        };

        let replacement = match &self.pattern.kind {
            PatternKind::Embedded(_) => path,
            _ if tail.starts_with('.') => base_stem(path),
            PatternKind::Prefix(prefix) => path.strip_prefix(prefix.as_str()).unwrap_or(path),
            PatternKind::CatchAll => path,
            PatternKind::Exact => return substitute(&self.template),
        };

        format!("{}{replacement}{}", substitute(head), substitute(tail))
    }
}

/// Base name of `path` with its final extension removed.
fn base_stem(path: &str) -> &str {
    let name = path.rsplit('/').next().unwrap_or(path);
    match name.rfind('.') {
        Some(dot) if dot > 0 => &name[..dot],
        _ => name,
    }
}

/// Ordered pattern→target rules; first match wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingTable {
    entries: Vec<PatternMapping>,
}

impl MappingTable {
    pub fn new(entries: Vec<PatternMapping>) -> Self {
        Self { entries }
    }

    /// Build a table from literal `(pattern, template)` pairs, preserving order.
    pub fn from_pairs<P, T>(pairs: impl IntoIterator<Item = (P, T)>) -> Result<Self, DomainError>
    where
        P: AsRef<str>,
        T: Into<String>,
    {
        pairs
            .into_iter()
            .map(|(pattern, template)| PatternMapping::new(pattern.as_ref(), template))
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// First row whose pattern matches `path`.
    pub fn first_match(&self, path: &str) -> Option<&PatternMapping> {
        self.entries.iter().find(|entry| entry.pattern.matches(path))
    }

    /// Resolve `path` through the first matching row.
    pub fn resolve(&self, path: &str, feature: &str) -> Option<String> {
        self.first_match(path).map(|entry| entry.resolve(path, feature))
    }

    pub fn entries(&self) -> &[PatternMapping] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// JSON objects are deserialized entry by entry so declaration order survives.
impl<'de> Deserialize<'de> for MappingTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct TableVisitor;

        impl<'de> Visitor<'de> for TableVisitor {
            type Value = MappingTable;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping path patterns to target templates")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((pattern, template)) = map.next_entry::<String, String>()? {
                    let entry = PatternMapping::new(&pattern, template)
                        .map_err(serde::de::Error::custom)?;
                    entries.push(entry);
                }
                Ok(MappingTable::new(entries))
            }
        }

        deserializer.deserialize_map(TableVisitor)
    }
}

/// Per-framework override tables from a descriptor's `targetMappings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetMappings {
    tables: Vec<(String, MappingTable)>,
}

impl TargetMappings {
    pub fn new(tables: Vec<(String, MappingTable)>) -> Self {
        Self { tables }
    }

    /// Override table for a framework key, if the descriptor declared one.
    pub fn get(&self, framework: &str) -> Option<&MappingTable> {
        self.tables
            .iter()
            .find(|(key, _)| key == framework)
            .map(|(_, table)| table)
    }

    pub fn frameworks(&self) -> impl Iterator<Item = &str> {
        self.tables.iter().map(|(key, _)| key.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

impl<'de> Deserialize<'de> for TargetMappings {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MappingsVisitor;

        impl<'de> Visitor<'de> for MappingsVisitor {
            type Value = TargetMappings;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping framework keys to pattern tables")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut tables = Vec::new();
                while let Some((framework, table)) = map.next_entry::<String, MappingTable>()? {
                    tables.push((framework, table));
                }
                Ok(TargetMappings::new(tables))
            }
        }

        deserializer.deserialize_map(MappingsVisitor)
    }
}
