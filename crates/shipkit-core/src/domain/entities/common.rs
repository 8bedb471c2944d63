use super::DomainError;
use std::fmt;
use std::path::Path;

/// A feature-relative path, normalized to forward slashes.
///
/// Invariant: never absolute, never contains `\`. Enforced at construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RelativePath(String);

impl RelativePath {
    /// Create a new relative path.
    ///
    /// # Panics
    /// Panics if path is absolute (use `try_new` for fallible).
    pub fn new(path: impl AsRef<str>) -> Self {
        match Self::try_new(path.as_ref()) {
            Ok(path) => path,
            Err(e) => panic!("{e}"),
        }
    }

    /// Fallible constructor.
    pub fn try_new(path: impl AsRef<str>) -> Result<Self, DomainError> {
        let normalized = normalize(path.as_ref());
        if normalized.starts_with('/') || Path::new(path.as_ref()).is_absolute() {
            return Err(DomainError::AbsolutePathNotAllowed { path: normalized });
        }
        Ok(Self(normalized))
    }

    /// Relativise `path` against `root`.
    pub fn from_root(root: &Path, path: &Path) -> Result<Self, DomainError> {
        let rel = path
            .strip_prefix(root)
            .map_err(|_| DomainError::AbsolutePathNotAllowed {
                path: path.display().to_string(),
            })?;
        Self::try_new(rel.to_string_lossy())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First path segment (`"server"` for `"server/session.ts"`).
    pub fn leading_segment(&self) -> &str {
        self.0.split('/').next().unwrap_or_default()
    }

    /// Final path segment.
    pub fn file_name(&self) -> &str {
        self.0.rsplit('/').next().unwrap_or_default()
    }

    /// Extension of the final segment, without the dot.
    pub fn extension(&self) -> Option<&str> {
        Path::new(self.file_name())
            .extension()
            .and_then(|ext| ext.to_str())
    }
}

/// Normalise a filesystem path to forward slashes so Windows and Unix paths
/// compare identically.
pub fn normalize(path: &str) -> String {
    path.replace('\\', "/")
}

impl AsRef<str> for RelativePath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RelativePath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn normalizes_backslashes() {
        assert_eq!(RelativePath::new("server\\session.ts").as_str(), "server/session.ts");
    }

    #[test]
    fn rejects_absolute() {
        assert!(RelativePath::try_new("/etc/passwd").is_err());
    }

    #[test]
    fn segments() {
        let p = RelativePath::new("components/auth/form.tsx");
        assert_eq!(p.leading_segment(), "components");
        assert_eq!(p.file_name(), "form.tsx");
        assert_eq!(p.extension(), Some("tsx"));
        assert_eq!(RelativePath::new(".env").extension(), None);
    }

    #[test]
    fn from_root_strips_prefix() {
        let root = PathBuf::from("features/auth");
        let file = root.join("api").join("login.ts");
        assert_eq!(RelativePath::from_root(&root, &file).unwrap().as_str(), "api/login.ts");
    }
}
