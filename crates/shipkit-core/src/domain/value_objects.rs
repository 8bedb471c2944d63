//! Domain value objects: Orm, Framework, Capability, FileRole.
//!
//! # Design
//!
//! These are pure value types: `Copy` where possible, equality-by-value,
//! no identity. This file's only job is to define the types, their string
//! representations, and their `FromStr` parsers.
//!
//! # Adding New Variants
//!
//! 1. Add the enum variant here
//! 2. Add the `as_str` arm, the `ALL` entry and the `FromStr` arm here
//! 3. Reference it from a builder definition in `builders.rs` if needed

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Wildcard accepted wherever a capability value is expected.
pub const WILDCARD: &str = "*";

// ── Orm ──────────────────────────────────────────────────────────────────────

/// A database layer a feature can be built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orm {
    Prisma,
    Drizzle,
    TypeOrm,
    #[serde(rename = "none")]
    NoOrm,
}

impl Orm {
    pub const ALL: [Self; 4] = [Self::Prisma, Self::Drizzle, Self::TypeOrm, Self::NoOrm];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Prisma => "prisma",
            Self::Drizzle => "drizzle",
            Self::TypeOrm => "typeorm",
            Self::NoOrm => "none",
        }
    }

    /// Every accepted descriptor value, wildcard included.
    pub fn valid_values() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .chain(std::iter::once(WILDCARD))
            .collect()
    }
}

impl fmt::Display for Orm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Orm {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|orm| orm.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCapabilities {
                invalid: vec![format!("orm: \"{s}\"")],
            })
    }
}

// ── Framework ────────────────────────────────────────────────────────────────

/// A consumer-side framework a feature can be installed into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Framework {
    NextJs,
    Vite,
    TanstackStart,
    Remix,
    Astro,
}

impl Framework {
    pub const ALL: [Self; 5] = [
        Self::NextJs,
        Self::Vite,
        Self::TanstackStart,
        Self::Remix,
        Self::Astro,
    ];

    /// Key used for `targetMappings` lookups when a descriptor declares no
    /// concrete framework.
    pub const DEFAULT: Self = Self::NextJs;

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NextJs => "nextjs",
            Self::Vite => "vite",
            Self::TanstackStart => "tanstack-start",
            Self::Remix => "remix",
            Self::Astro => "astro",
        }
    }

    /// Every accepted descriptor value, wildcard included.
    pub fn valid_values() -> Vec<&'static str> {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .chain(std::iter::once(WILDCARD))
            .collect()
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Framework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|fw| fw.as_str() == s)
            .ok_or_else(|| DomainError::InvalidCapabilities {
                invalid: vec![format!("framework: \"{s}\"")],
            })
    }
}

// ── Capability ───────────────────────────────────────────────────────────────

/// A validated capability declaration: either the wildcard or an ordered set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capability<T> {
    /// `"*"`, compatible with every value.
    Any,
    /// Explicit values in declaration order, without duplicates.
    Only(Vec<T>),
}

impl<T: PartialEq> Capability<T> {
    /// The explicit values, or `None` for the wildcard or an empty list.
    pub fn explicit(&self) -> Option<&[T]> {
        match self {
            Self::Only(values) if !values.is_empty() => Some(values),
            _ => None,
        }
    }
}

// ── FileRole ─────────────────────────────────────────────────────────────────

/// What a file is to the installer, derived from its leading path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FileRole {
    #[serde(rename = "registry:lib")]
    Library,
    #[serde(rename = "registry:block")]
    Block,
    #[serde(rename = "registry:page")]
    Page,
}

impl FileRole {
    /// Classify a forward-slash relative path by its first segment.
    pub fn from_relative_path(path: &str) -> Self {
        let leading = path.split('/').next().unwrap_or_default();
        match leading {
            "components" | "blocks" | "ui" => Self::Block,
            "pages" | "app" | "routes" => Self::Page,
            _ => Self::Library,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Library => "registry:lib",
            Self::Block => "registry:block",
            Self::Page => "registry:page",
        }
    }
}

impl fmt::Display for FileRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
