use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Identity of the package being documented, as resolved by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageId {
    /// Import path, e.g. `github.com/acme/demo`
    pub import_path: String,
    /// Directory holding the package's source files
    pub dir: PathBuf,
}

impl PackageId {
    pub fn new(import_path: impl Into<String>, dir: impl Into<PathBuf>) -> Self {
        Self {
            import_path: import_path.into(),
            dir: dir.into(),
        }
    }

    /// Locate a package under a GOPATH-style source root, where the import
    /// path is also the relative directory.
    pub fn in_src_root(src_root: &Path, import_path: impl Into<String>) -> Self {
        let import_path = import_path.into();
        let dir = import_path
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(src_root.to_path_buf(), |dir, segment| dir.join(segment));
        Self { import_path, dir }
    }

    /// Package clause name the import path suggests: its last segment.
    pub fn expected_package_name(&self) -> Option<&str> {
        self.import_path.rsplit('/').find(|segment| !segment.is_empty())
    }

    /// The `import "..."` line shown at the top of the package docs.
    pub fn import_statement(&self) -> String {
        format!("import \"{}\"", self.import_path)
    }
}
