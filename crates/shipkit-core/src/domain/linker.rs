use std::collections::BTreeSet;

use tracing::trace;

/// Rewrites registry dependency names that refer to features of the same run
/// into absolute manifest URLs.
///
/// Entries that already look like URLs, and names no feature in the run
/// declares, pass through untouched. Order and count are preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyLinker {
    base_url: String,
    known: BTreeSet<String>,
}

impl DependencyLinker {
    pub fn new<I, S>(base_url: &str, known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_url: base_url.trim_end_matches('/').to_owned(),
            known: known.into_iter().map(Into::into).collect(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_known(&self, name: &str) -> bool {
        self.known.contains(name)
    }

    /// Manifest URL of `name` under the base URL.
    pub fn url_for(&self, name: &str) -> String {
        format!("{}/{name}.json", self.base_url)
    }

    pub fn link(&self, dependencies: &[String]) -> Vec<String> {
        dependencies
            .iter()
            .map(|dep| {
                if is_absolute_url(dep) || !self.is_known(dep) {
                    dep.clone()
                } else {
                    let url = self.url_for(dep);
                    trace!(dependency = %dep, %url, "linked internal dependency");
                    url
                }
            })
            .collect()
    }
}

fn is_absolute_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}
