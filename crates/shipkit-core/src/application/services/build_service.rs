//! Registry Build Service - main application orchestrator.
//!
//! This service coordinates the registry build:
//! 1. Discover feature directories
//! 2. Pass 1: collect every declared feature name, rejecting duplicates
//! 3. Pass 2, per feature in discovery order: validate, select a builder,
//!    read sources, assemble, link dependencies, write the manifest
//! 4. Write the registry index
//!
//! The run is fail-fast: the first failing feature aborts it. Manifests
//! written before the failure stay on disk.

use std::collections::BTreeMap;
use std::path::PathBuf;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        ports::{FeatureSource, ManifestSink},
    },
    domain::{
        BuilderRegistry, DEFAULT_INDEX_SCHEMA, DEFAULT_ITEM_SCHEMA, DependencyLinker,
        DescriptorValidator, DomainError, FeatureDir, INDEX_NAME, RegistryIndex, RegistryItem,
        RegistryItemAssembler,
    },
    error::{ShipkitError, ShipkitResult},
};

/// Base URL used when none is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/r";

/// Knobs for one build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildOptions {
    /// Prefix of every manifest URL.
    pub base_url: String,
    /// `$schema` of item manifests.
    pub schema_url: String,
    /// `$schema` of the registry index.
    pub index_schema_url: String,
    /// Whether `build` writes `index.json`.
    pub write_index: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            schema_url: DEFAULT_ITEM_SCHEMA.into(),
            index_schema_url: DEFAULT_INDEX_SCHEMA.into(),
            write_index: true,
        }
    }
}

impl BuildOptions {
    /// Reject settings that would produce unusable manifest URLs.
    pub fn validate(&self) -> ShipkitResult<()> {
        let blank = [
            ("base_url", self.base_url.trim_end_matches('/')),
            ("schema_url", self.schema_url.as_str()),
            ("index_schema_url", self.index_schema_url.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key)
        .collect::<Vec<_>>();

        if blank.is_empty() {
            Ok(())
        } else {
            Err(ShipkitError::Configuration {
                message: format!("registry.{} must not be empty", blank.join(", registry.")),
            })
        }
    }
}

/// One feature assembled in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledFeature {
    pub dir: FeatureDir,
    pub builder: &'static str,
    pub item: RegistryItem,
}

/// One manifest written by [`RegistryBuildService::build`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltFeature {
    pub name: String,
    pub builder: &'static str,
    pub files: usize,
    pub output: PathBuf,
}

/// Outcome of a successful build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub features: Vec<BuiltFeature>,
    /// Where `index.json` went, if it was written.
    pub index: Option<PathBuf>,
}

impl BuildReport {
    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &BuiltFeature> {
        self.features.iter()
    }
}

/// Main registry build service.
pub struct RegistryBuildService {
    source: Box<dyn FeatureSource>,
    sink: Box<dyn ManifestSink>,
    builders: BuilderRegistry,
    assembler: RegistryItemAssembler,
    options: BuildOptions,
}

impl RegistryBuildService {
    /// Create a new build service with the given adapters.
    pub fn new(
        source: Box<dyn FeatureSource>,
        sink: Box<dyn ManifestSink>,
        builders: BuilderRegistry,
        options: BuildOptions,
    ) -> Self {
        Self {
            source,
            sink,
            builders,
            assembler: RegistryItemAssembler::new(options.schema_url.clone()),
            options,
        }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Run the whole pipeline and write every manifest.
    #[instrument(skip_all, fields(base_url = %self.options.base_url))]
    pub fn build(&self) -> ShipkitResult<BuildReport> {
        let dirs = self.discover()?;
        let linker = self.collect_names(&dirs)?;

        let mut report = BuildReport::default();
        let mut index = RegistryIndex::new(self.options.index_schema_url.clone());

        for dir in &dirs {
            let assembled = self.assemble_feature(dir, &linker)?;
            let output = self
                .sink
                .write_item(&assembled.item)
                .map_err(|e| ApplicationError::feature_failed(&assembled.item.name, e))?;

            info!(
                feature = %assembled.item.name,
                builder = assembled.builder,
                files = assembled.item.files.len(),
                output = %output.display(),
                "Manifest written"
            );

            index.push(&assembled.item, &linker);
            report.features.push(BuiltFeature {
                name: assembled.item.name,
                builder: assembled.builder,
                files: assembled.item.files.len(),
                output,
            });
        }

        if self.options.write_index {
            let path = self.sink.write_index(&index)?;
            info!(items = index.len(), output = %path.display(), "Index written");
            report.index = Some(path);
        }

        Ok(report)
    }

    /// Run discovery, both passes and assembly without writing anything.
    #[instrument(skip_all)]
    pub fn check(&self) -> ShipkitResult<Vec<AssembledFeature>> {
        let dirs = self.discover()?;
        let linker = self.collect_names(&dirs)?;
        dirs.iter()
            .map(|dir| self.assemble_feature(dir, &linker))
            .collect()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn discover(&self) -> ShipkitResult<Vec<FeatureDir>> {
        self.options.validate()?;
        let dirs = self.source.discover()?;
        if dirs.is_empty() {
            warn!("No feature directories found");
        } else {
            info!(count = dirs.len(), "Discovered feature directories");
        }
        Ok(dirs)
    }

    /// Pass 1: read every descriptor just far enough to learn its name.
    ///
    /// Descriptors without a name are skipped here; validation reports them
    /// in pass 2. With the index enabled, a feature named like the index is
    /// rejected here too, since its manifest would be overwritten.
    fn collect_names(&self, dirs: &[FeatureDir]) -> ShipkitResult<DependencyLinker> {
        let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();

        for dir in dirs {
            let raw = self.source.read_descriptor(dir)?;
            let Some(name) = raw.declared_name() else {
                debug!(dir = %dir.root.display(), "descriptor declares no name");
                continue;
            };
            if self.options.write_index && name == INDEX_NAME {
                return Err(DomainError::ReservedFeatureName {
                    name: name.to_owned(),
                    file: format!("{INDEX_NAME}.json"),
                }
                .into());
            }
            if let Some(first) = seen.get(name) {
                return Err(DomainError::DuplicateFeature {
                    name: name.to_owned(),
                    first: first.clone(),
                    second: dir.root.clone(),
                }
                .into());
            }
            seen.insert(name.to_owned(), dir.root.clone());
        }

        debug!(known = seen.len(), "Collected internal feature names");
        Ok(DependencyLinker::new(&self.options.base_url, seen.into_keys()))
    }

    /// Pass 2 for a single feature.
    #[instrument(skip_all, fields(dir = %dir.label()))]
    fn assemble_feature(
        &self,
        dir: &FeatureDir,
        linker: &DependencyLinker,
    ) -> ShipkitResult<AssembledFeature> {
        let assemble = || -> ShipkitResult<AssembledFeature> {
            let raw = self.source.read_descriptor(dir)?;
            let descriptor = DescriptorValidator::validate(raw)?;
            let builder = self.builders.select(&descriptor.name, &descriptor)?;
            let files = self.source.read_sources(dir)?;
            let item = self
                .assembler
                .assemble(&descriptor, builder, &files, linker);
            Ok(AssembledFeature {
                dir: dir.clone(),
                builder: builder.name(),
                item,
            })
        };

        assemble().map_err(|e: ShipkitError| ApplicationError::feature_failed(dir.label(), e).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{MockFeatureSource, MockManifestSink};
    use crate::domain::{RawDescriptor, SourceFile};
    use crate::error::ErrorCategory;
    use std::path::Path;
    use std::sync::{Arc, Mutex};

    // ── fixtures ─────────────────────────────────────────────────────────

    fn dir(name: &str) -> FeatureDir {
        FeatureDir::new(format!("features/{name}"), "feature.json")
    }

    fn raw(json: &str) -> RawDescriptor {
        serde_json::from_str(json).unwrap()
    }

    fn descriptor_json(name: &str, extra: &str) -> String {
        format!(
            r#"{{ "name": "{name}", "type": "registry:lib", "title": "T", "description": "D"{extra} }}"#
        )
    }

    /// Source serving fixed descriptors and files per directory name.
    fn source(features: Vec<(&'static str, String, Vec<&'static str>)>) -> MockFeatureSource {
        let dirs: Vec<FeatureDir> = features.iter().map(|(d, _, _)| dir(d)).collect();
        let descriptors: BTreeMap<String, String> = features
            .iter()
            .map(|(d, json, _)| (dir(d).label(), json.clone()))
            .collect();
        let files: BTreeMap<String, Vec<&'static str>> = features
            .iter()
            .map(|(d, _, files)| (dir(d).label(), files.clone()))
            .collect();

        let mut source = MockFeatureSource::new();
        source.expect_discover().returning(move || Ok(dirs.clone()));
        source
            .expect_read_descriptor()
            .returning(move |d| Ok(raw(&descriptors[&d.label()])));
        source.expect_read_sources().returning(move |d| {
            Ok(files[&d.label()]
                .iter()
                .map(|p| SourceFile::under(&d.root, p, format!("// {p}")))
                .collect())
        });
        source
    }

    /// Sink recording every item it is asked to write.
    fn recording_sink() -> (MockManifestSink, Arc<Mutex<Vec<RegistryItem>>>) {
        let written = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&written);
        let mut sink = MockManifestSink::new();
        sink.expect_write_item().returning(move |item| {
            log.lock().unwrap().push(item.clone());
            Ok(PathBuf::from("out").join(item.file_name()))
        });
        sink.expect_write_index()
            .returning(|_| Ok(PathBuf::from("out/index.json")));
        (sink, written)
    }

    fn service(source: MockFeatureSource, sink: MockManifestSink) -> RegistryBuildService {
        RegistryBuildService::new(
            Box::new(source),
            Box::new(sink),
            BuilderRegistry::builtin().unwrap(),
            BuildOptions {
                base_url: "https://r.example".into(),
                ..BuildOptions::default()
            },
        )
    }

    // ── build ────────────────────────────────────────────────────────────

    #[test]
    fn builds_auth_feature_end_to_end() {
        let source = source(vec![(
            "auth-otp",
            descriptor_json("auth-otp", ""),
            vec!["api/login.ts", "components/form.tsx", "db.ts", "server/session.ts"],
        )]);
        let (sink, written) = recording_sink();

        let report = service(source, sink).build().unwrap();

        assert_eq!(report.len(), 1);
        assert_eq!(report.features[0].builder, "nextjs-auth");
        assert_eq!(report.features[0].files, 4);
        assert_eq!(report.features[0].output, Path::new("out/auth-otp.json"));
        assert_eq!(report.index, Some(PathBuf::from("out/index.json")));

        let written = written.lock().unwrap();
        let targets: Vec<_> = written[0].files.iter().map(|f| f.target.as_str()).collect();
        assert_eq!(
            targets,
            vec![
                "app/api/login.ts",
                "components/form.tsx",
                "lib/server/db.ts",
                "lib/server/auth/session.ts",
            ]
        );
    }

    #[test]
    fn links_dependencies_between_features_of_one_run() {
        let source = source(vec![
            (
                "auth-otp",
                descriptor_json(
                    "auth-otp",
                    r#", "registryDependencies": ["auth-otp-shared", "https://x/y.json", "external-widget"]"#,
                ),
                vec!["db.ts"],
            ),
            ("auth-otp-shared", descriptor_json("auth-otp-shared", ""), vec!["db.ts"]),
        ]);
        let (sink, written) = recording_sink();

        service(source, sink).build().unwrap();

        let written = written.lock().unwrap();
        assert_eq!(
            written[0].registry_dependencies,
            vec![
                "https://r.example/auth-otp-shared.json",
                "https://x/y.json",
                "external-widget",
            ]
        );
    }

    #[test]
    fn builds_are_idempotent() {
        let features = || {
            vec![
                ("auth-otp", descriptor_json("auth-otp", ""), vec!["api/login.ts", "db.ts"]),
                ("i18n-basic", descriptor_json("i18n-basic", ""), vec!["components/switcher.ts"]),
            ]
        };
        let (first_sink, first) = recording_sink();
        let (second_sink, second) = recording_sink();

        service(source(features()), first_sink).build().unwrap();
        service(source(features()), second_sink).build().unwrap();

        assert_eq!(*first.lock().unwrap(), *second.lock().unwrap());
    }

    #[test]
    fn duplicate_names_fail_before_anything_is_written() {
        let source = source(vec![
            ("a", descriptor_json("auth-otp", ""), vec!["db.ts"]),
            ("b", descriptor_json("auth-otp", ""), vec!["db.ts"]),
        ]);
        let mut sink = MockManifestSink::new();
        sink.expect_write_item().never();
        sink.expect_write_index().never();

        let err = service(source, sink).build().unwrap_err();
        match err {
            ShipkitError::Domain(DomainError::DuplicateFeature {
                name,
                first,
                second,
            }) => {
                assert_eq!(name, "auth-otp");
                assert_eq!(first, Path::new("features/a"));
                assert_eq!(second, Path::new("features/b"));
            }
            other => panic!("expected DuplicateFeature, got {other:?}"),
        }
    }

    #[test]
    fn first_failing_feature_stops_the_run() {
        let source = source(vec![
            ("auth-otp", descriptor_json("auth-otp", ""), vec!["db.ts"]),
            ("broken", r#"{ "name": "broken" }"#.to_owned(), vec![]),
            ("i18n-basic", descriptor_json("i18n-basic", ""), vec!["db.ts"]),
        ]);
        let written = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&written);
        let mut sink = MockManifestSink::new();
        sink.expect_write_item().times(1).returning(move |item| {
            log.lock().unwrap().push(item.clone());
            Ok(PathBuf::from("out").join(item.file_name()))
        });
        sink.expect_write_index().never();

        let err = service(source, sink).build().unwrap_err();

        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.to_string().contains("broken"));
        assert!(err.to_string().contains("type, title, description"));
        assert_eq!(written.lock().unwrap().len(), 1);
    }

    #[test]
    fn feature_named_like_the_index_is_rejected_before_writing() {
        let source = source(vec![
            ("auth-otp", descriptor_json("auth-otp", ""), vec!["db.ts"]),
            ("index", descriptor_json("index", ""), vec!["index.ts"]),
        ]);
        let mut sink = MockManifestSink::new();
        sink.expect_write_item().never();
        sink.expect_write_index().never();

        let err = service(source, sink).build().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(matches!(
            err,
            ShipkitError::Domain(DomainError::ReservedFeatureName { ref name, .. }) if name == "index"
        ));
    }

    #[test]
    fn feature_named_index_builds_when_index_is_disabled() {
        let source = source(vec![("index", descriptor_json("index", ""), vec!["index.ts"])]);
        let (sink, written) = recording_sink();

        let service = RegistryBuildService::new(
            Box::new(source),
            Box::new(sink),
            BuilderRegistry::builtin().unwrap(),
            BuildOptions {
                write_index: false,
                ..BuildOptions::default()
            },
        );
        let report = service.build().unwrap();
        assert!(report.index.is_none());
        assert_eq!(written.lock().unwrap()[0].name, "index");
    }

    #[test]
    fn index_is_skipped_when_disabled() {
        let source = source(vec![("auth-otp", descriptor_json("auth-otp", ""), vec![])]);
        let mut sink = MockManifestSink::new();
        sink.expect_write_item()
            .returning(|item| Ok(PathBuf::from(item.file_name())));
        sink.expect_write_index().never();

        let service = RegistryBuildService::new(
            Box::new(source),
            Box::new(sink),
            BuilderRegistry::builtin().unwrap(),
            BuildOptions {
                write_index: false,
                ..BuildOptions::default()
            },
        );
        let report = service.build().unwrap();
        assert!(report.index.is_none());
    }

    #[test]
    fn parse_errors_in_pass_one_propagate() {
        let mut source = MockFeatureSource::new();
        source
            .expect_discover()
            .returning(|| Ok(vec![dir("auth-otp")]));
        source.expect_read_descriptor().returning(|d| {
            Err(DomainError::DescriptorParse {
                path: d.descriptor.clone(),
                reason: "expected value at line 1 column 1".into(),
            }
            .into())
        });
        source.expect_read_sources().never();
        let mut sink = MockManifestSink::new();
        sink.expect_write_item().never();

        let err = service(source, sink).build().unwrap_err();
        assert!(matches!(
            err,
            ShipkitError::Domain(DomainError::DescriptorParse { .. })
        ));
    }

    // ── check ────────────────────────────────────────────────────────────

    #[test]
    fn check_assembles_without_writing() {
        let source = source(vec![(
            "auth-tanstack-otp",
            descriptor_json("auth-tanstack-otp", ""),
            vec!["api/login.ts"],
        )]);
        let mut sink = MockManifestSink::new();
        sink.expect_write_item().never();
        sink.expect_write_index().never();

        let assembled = service(source, sink).check().unwrap();
        assert_eq!(assembled.len(), 1);
        assert_eq!(assembled[0].builder, "tanstack-auth");
        assert_eq!(
            assembled[0].item.files[0].target,
            "src/routes/api/auth/login.ts"
        );
    }

    #[test]
    fn check_reports_missing_builder_as_not_found() {
        let source = source(vec![("x", descriptor_json("x", ""), vec![])]);
        let sink = MockManifestSink::new();
        let service = RegistryBuildService::new(
            Box::new(source),
            Box::new(sink),
            BuilderRegistry::new(Vec::new()),
            BuildOptions::default(),
        );
        let err = service.check().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn blank_base_url_is_a_configuration_error() {
        let mut source = MockFeatureSource::new();
        source.expect_discover().never();
        let options = BuildOptions {
            base_url: "/".into(),
            schema_url: String::new(),
            ..BuildOptions::default()
        };
        let service = RegistryBuildService::new(
            Box::new(source),
            Box::new(MockManifestSink::new()),
            BuilderRegistry::builtin().unwrap(),
            options,
        );

        let err = service.build().unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.to_string().contains("registry.base_url, registry.schema_url"));
    }
}
