//! In-memory feature source for testing.

use std::path::{Path, PathBuf};

use shipkit_core::{
    application::{ApplicationError, ports::FeatureSource},
    domain::{DESCRIPTOR_FILE, FeatureDir, RawDescriptor, RelativePath, SourceFile, is_eligible},
    error::ShipkitResult,
};

use super::parse_descriptor;

#[derive(Debug, Clone)]
struct MemoryFeature {
    dir: FeatureDir,
    descriptor: String,
    files: Vec<(String, String)>,
}

/// Feature source backed by literal descriptors and files.
///
/// Features are served in root-path order, like [`super::FsFeatureSource`].
#[derive(Debug, Clone)]
pub struct MemoryFeatureSource {
    root: PathBuf,
    features: Vec<MemoryFeature>,
}

impl MemoryFeatureSource {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("features"),
            features: Vec::new(),
        }
    }

    /// Add a feature directory named `dir` holding `descriptor` and `files`.
    pub fn with_feature(
        mut self,
        dir: &str,
        descriptor: impl Into<String>,
        files: &[(&str, &str)],
    ) -> Self {
        self.features.push(MemoryFeature {
            dir: FeatureDir::new(self.root.join(dir), DESCRIPTOR_FILE),
            descriptor: descriptor.into(),
            files: files
                .iter()
                .map(|(path, content)| ((*path).to_owned(), (*content).to_owned()))
                .collect(),
        });
        self.features.sort_by(|a, b| a.dir.root.cmp(&b.dir.root));
        self
    }

    fn find(&self, dir: &FeatureDir) -> ShipkitResult<&MemoryFeature> {
        self.features
            .iter()
            .find(|f| f.dir == *dir)
            .ok_or_else(|| missing(&dir.root))
    }
}

impl Default for MemoryFeatureSource {
    fn default() -> Self {
        Self::new()
    }
}

impl FeatureSource for MemoryFeatureSource {
    fn discover(&self) -> ShipkitResult<Vec<FeatureDir>> {
        Ok(self.features.iter().map(|f| f.dir.clone()).collect())
    }

    fn read_descriptor(&self, dir: &FeatureDir) -> ShipkitResult<RawDescriptor> {
        let feature = self.find(dir)?;
        parse_descriptor(&dir.descriptor, &feature.descriptor)
    }

    fn read_sources(&self, dir: &FeatureDir) -> ShipkitResult<Vec<SourceFile>> {
        let feature = self.find(dir)?;
        let mut files = Vec::with_capacity(feature.files.len());
        for (path, content) in &feature.files {
            let relative = RelativePath::try_new(path)?;
            if is_eligible(&relative, dir.descriptor_file_name()) {
                files.push((relative, content));
            }
        }
        // Segment-wise, matching a sorted directory walk.
        files.sort_by(|a, b| a.0.as_str().split('/').cmp(b.0.as_str().split('/')));

        Ok(files
            .into_iter()
            .map(|(relative, content)| {
                SourceFile::new(dir.root.join(relative.as_str()), relative, content.clone())
            })
            .collect())
    }
}

fn missing(path: &Path) -> shipkit_core::error::ShipkitError {
    ApplicationError::SourceRead {
        path: path.to_path_buf(),
        reason: "no such feature".into(),
    }
    .into()
}
