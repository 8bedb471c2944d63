//! Built-in builder definitions.
//!
//! Every builder is described exactly once by a [`BuilderDef`] in
//! [`BUILDER_REGISTRY`]. Position in the slice is precedence: selection walks
//! it top to bottom and stops at the first builder that accepts a feature.
//!
//! # Adding a Builder
//!
//! 1. Add one [`BuilderDef`] entry above the ones it must take precedence over
//! 2. Keep the generic fallback last
//!
//! Mapping rows are also ordered. Put specific patterns before `*`.
//! Env templates (`.env.example` and its `.env.example.*` variants) install at
//! the project root.

use crate::domain::{
    entities::builder::{FeatureName, NameConvention},
    value_objects::Framework,
};

/// Static description of one builder.
#[derive(Debug, Clone, Copy)]
pub struct BuilderDef {
    /// Stable identifier, shown in logs and `list` output.
    pub name: &'static str,

    /// Name substituted for `{feature}` in target templates.
    pub feature: FeatureName,

    /// Frameworks the builder produces files for; empty means any.
    pub frameworks: &'static [Framework],

    /// Naming rule used when a descriptor declares no framework.
    pub convention: NameConvention,

    /// Base `(pattern, template)` rows, first match wins.
    pub mappings: &'static [(&'static str, &'static str)],
}

/// Every built-in builder, in precedence order.
pub static BUILDER_REGISTRY: &[BuilderDef] = &[
    // ── auth ─────────────────────────────────────────────────────────────────
    BuilderDef {
        name: "tanstack-auth",
        feature: FeatureName::Fixed("auth"),
        frameworks: &[Framework::TanstackStart],
        convention: NameConvention::marked("auth", "tanstack"),
        mappings: &[
            ("routes/*", "src/routes/*"),
            ("api/*", "src/routes/api/auth/*"),
            ("components/*", "src/components/auth/*"),
            ("server/*", "src/lib/server/{feature}/*"),
            ("db.ts", "src/lib/server/db.ts"),
            (".env.example", ".env.example"),
            (".env.example.*", "*"),
            ("*", "src/lib/{feature}/*"),
        ],
    },
    BuilderDef {
        name: "nextjs-auth",
        feature: FeatureName::Fixed("auth"),
        frameworks: &[Framework::NextJs],
        convention: NameConvention::family("auth"),
        mappings: &[
            ("api/*", "app/api/*"),
            ("components/*", "components/*"),
            ("server/*", "lib/server/{feature}/*"),
            ("db.ts", "lib/server/db.ts"),
            ("pages/*", "app/*"),
            (".env.example", ".env.example"),
            (".env.example.*", "*"),
            ("*", "lib/{feature}/*"),
        ],
    },
    // ── i18n ─────────────────────────────────────────────────────────────────
    BuilderDef {
        name: "nextjs-i18n",
        feature: FeatureName::Fixed("i18n"),
        frameworks: &[Framework::NextJs],
        convention: NameConvention::family("i18n"),
        mappings: &[
            ("messages/*", "messages/*"),
            ("middleware.ts", "middleware.ts"),
            ("components/*", "components/i18n/*.tsx"),
            ("config/*", "lib/i18n/*"),
            ("*", "lib/{feature}/*"),
        ],
    },
    // ── payments ─────────────────────────────────────────────────────────────
    BuilderDef {
        name: "payments",
        feature: FeatureName::Fixed("payments"),
        frameworks: &[Framework::NextJs, Framework::Remix],
        convention: NameConvention::family("payment"),
        mappings: &[
            ("api/*", "app/api/{feature}/*"),
            ("webhooks/*", "app/api/webhooks/*"),
            ("components/*", "components/{feature}/*"),
            ("server/*", "lib/server/{feature}/*"),
            ("*", "lib/{feature}/*"),
        ],
    },
    // ── fallback ─────────────────────────────────────────────────────────────
    BuilderDef {
        name: "generic",
        feature: FeatureName::FromDescriptor,
        frameworks: &[],
        convention: NameConvention::ANY,
        mappings: &[
            (".env.example", ".env.example"),
            (".env.example.*", "*"),
            ("*", "lib/{feature}/*"),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::pattern::MappingTable;

    #[test]
    fn every_builtin_table_compiles() {
        for def in BUILDER_REGISTRY {
            MappingTable::from_pairs(def.mappings.iter().copied())
                .unwrap_or_else(|e| panic!("{}: {e}", def.name));
        }
    }

    #[test]
    fn builder_names_are_unique() {
        let mut names: Vec<_> = BUILDER_REGISTRY.iter().map(|d| d.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), BUILDER_REGISTRY.len());
    }

    #[test]
    fn generic_fallback_is_last() {
        let last = BUILDER_REGISTRY.last().unwrap();
        assert_eq!(last.convention, NameConvention::ANY);
        assert!(last.frameworks.is_empty());
    }

    #[test]
    fn tanstack_precedes_nextjs_auth() {
        let pos = |name| BUILDER_REGISTRY.iter().position(|d| d.name == name).unwrap();
        assert!(pos("tanstack-auth") < pos("nextjs-auth"));
    }
}
