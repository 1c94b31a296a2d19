//! Extraction options and their TOML representation.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{DocError, Result};

/// Order in which functions, methods and types are listed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Declaration order, files taken in name order
    #[default]
    Source,
    /// Alphabetical by name; values always keep declaration order
    Name,
}

impl SortOrder {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "source" => Some(SortOrder::Source),
            "name" => Some(SortOrder::Name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// Leave out unexported functions, methods, types and value groups
    pub exported_only: bool,
    /// Print function declarations without their bodies
    pub strip_bodies: bool,
    pub sort: SortOrder,
}

/// Contents of a `pkgdoc.toml` file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    /// GOPATH-style source root that import paths are resolved against
    pub src_root: Option<PathBuf>,
    pub options: ExtractOptions,
}

impl DocConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| DocError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DocError::Config(e.to_string()))
    }

    /// Configured source root, else `$GOPATH/src` (first entry), else `~/go/src`.
    pub fn resolve_src_root(&self) -> Option<PathBuf> {
        if let Some(root) = &self.src_root {
            return Some(root.clone());
        }

        let gopath = std::env::var_os("GOPATH")
            .and_then(|value| std::env::split_paths(&value).find(|p| !p.as_os_str().is_empty()));

        gopath
            .or_else(|| dirs::home_dir().map(|home| home.join("go")))
            .map(|root| root.join("src"))
    }
}
