use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::{DocError, Result};

pub const SOURCE_EXTENSION: &str = ".go";
pub const TEST_SUFFIX: &str = "_test.go";

/// Whether a file name belongs to the documented package: not hidden, a Go
/// source file, and not a test file.
pub fn is_package_source(name: &str) -> bool {
    !name.starts_with('.') && name.ends_with(SOURCE_EXTENSION) && !name.ends_with(TEST_SUFFIX)
}

/// Files directly inside `dir` accepted by `filter`, sorted by file name.
/// Symlinks to regular files count as files.
pub fn package_files<F>(dir: &Path, filter: F) -> Result<Vec<PathBuf>>
where
    F: Fn(&str) -> bool,
{
    if !dir.is_dir() {
        return Err(DocError::PackageNotFound(dir.display().to_string()));
    }

    let walker = WalkBuilder::new(dir)
        .standard_filters(false)
        .max_depth(Some(1))
        .sort_by_file_name(|a, b| a.cmp(b))
        .build();

    let mut files = Vec::new();
    for entry in walker {
        let entry = entry?;
        if entry.depth() == 0 || !entry.path().is_file() {
            continue;
        }

        let accepted = entry.file_name().to_str().is_some_and(&filter);
        if accepted {
            files.push(entry.into_path());
        }
    }

    Ok(files)
}
