//! Filesystem-based feature source.
//!
//! Discovers feature directories under a features root and reads their
//! descriptors and source files.
//!
//! # Directory layout expected
//!
//! ```text
//! features/
//! ├── auth-otp/
//! │   ├── feature.json         ← descriptor (required)
//! │   ├── api/
//! │   │   └── login.ts
//! │   ├── components/
//! │   │   └── form.tsx
//! │   ├── server/
//! │   │   └── session.ts
//! │   └── db.ts
//! └── i18n-basic/
//!     ├── feature.json
//!     └── messages/
//!         └── en.json
//! ```
//!
//! Immediate subdirectories without a descriptor are skipped with a `DEBUG`
//! log. Files at the top level of the features root are ignored.

use std::{
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, instrument, trace};
use walkdir::WalkDir;

use shipkit_core::{
    application::{ApplicationError, ports::FeatureSource},
    domain::{DESCRIPTOR_FILE, FeatureDir, RawDescriptor, RelativePath, SourceFile, is_eligible},
    error::{ShipkitError, ShipkitResult},
};

use super::parse_descriptor;

/// Reads features from directories on disk.
#[derive(Debug, Clone)]
pub struct FsFeatureSource {
    features_dir: PathBuf,
    descriptor_file: String,
}

impl FsFeatureSource {
    /// Create a source rooted at `features_dir`.
    ///
    /// The directory does not need to exist yet; [`FeatureSource::discover`]
    /// reports it if it is missing when called.
    pub fn new(features_dir: impl Into<PathBuf>) -> Self {
        Self {
            features_dir: features_dir.into(),
            descriptor_file: DESCRIPTOR_FILE.to_owned(),
        }
    }

    /// Use `name` instead of `feature.json` as the descriptor file name.
    pub fn with_descriptor_file(mut self, name: impl Into<String>) -> Self {
        self.descriptor_file = name.into();
        self
    }
}

impl FeatureSource for FsFeatureSource {
    #[instrument(skip(self), fields(dir = %self.features_dir.display()))]
    fn discover(&self) -> ShipkitResult<Vec<FeatureDir>> {
        if !self.features_dir.is_dir() {
            return Err(ApplicationError::FeaturesDirNotFound {
                path: self.features_dir.clone(),
            }
            .into());
        }

        let read_dir =
            fs::read_dir(&self.features_dir).map_err(|e| read_error(&self.features_dir, e))?;

        let mut dirs = Vec::new();
        for entry in read_dir {
            let path = entry.map_err(|e| read_error(&self.features_dir, e))?.path();
            if !path.is_dir() {
                continue;
            }

            let dir = FeatureDir::new(path, &self.descriptor_file);
            if dir.descriptor.is_file() {
                dirs.push(dir);
            } else {
                debug!(dir = %dir.root.display(), "skipping directory without descriptor");
            }
        }

        dirs.sort_by(|a, b| a.root.cmp(&b.root));
        debug!(count = dirs.len(), "discovered features");
        Ok(dirs)
    }

    fn read_descriptor(&self, dir: &FeatureDir) -> ShipkitResult<RawDescriptor> {
        let text =
            fs::read_to_string(&dir.descriptor).map_err(|e| read_error(&dir.descriptor, e))?;
        parse_descriptor(&dir.descriptor, &text)
    }

    #[instrument(skip(self), fields(dir = %dir.root.display()))]
    fn read_sources(&self, dir: &FeatureDir) -> ShipkitResult<Vec<SourceFile>> {
        let descriptor_file = dir.descriptor_file_name();
        let mut files = Vec::new();

        for walk_entry in WalkDir::new(&dir.root).min_depth(1).sort_by_file_name() {
            let walk_entry = walk_entry.map_err(|e| {
                let path = e.path().unwrap_or(&dir.root).to_path_buf();
                ShipkitError::from(ApplicationError::SourceRead {
                    path,
                    reason: format!("directory walk error: {e}"),
                })
            })?;
            if !walk_entry.file_type().is_file() {
                continue; // Directories, symlinks and other special types.
            }

            let abs_path = walk_entry.path();
            let relative = RelativePath::from_root(&dir.root, abs_path)?;
            if !is_eligible(&relative, descriptor_file) {
                trace!(path = %relative, "skipping ineligible file");
                continue;
            }

            let content = fs::read_to_string(abs_path).map_err(|e| read_error(abs_path, e))?;
            files.push(SourceFile::new(abs_path, relative, content));
        }

        debug!(count = files.len(), "read source files");
        Ok(files)
    }
}

fn read_error(path: &Path, e: std::io::Error) -> ShipkitError {
    ApplicationError::SourceRead {
        path: path.to_path_buf(),
        reason: e.to_string(),
    }
    .into()
}
