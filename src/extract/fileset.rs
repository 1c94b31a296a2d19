//! Per-run table of parsed source files.
//!
//! The renderer resolves declaration byte ranges against this table to
//! reproduce the original text and indentation. A `FileSet` only grows while a
//! run is in progress and is never shared between runs.

use std::ops::Range;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FileId(pub usize);

/// 1-based line and column (column counted in bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

#[derive(Debug)]
pub struct SourceFile {
    pub path: PathBuf,
    pub name: String,
    pub source: String,
    line_starts: Vec<usize>,
}

impl SourceFile {
    fn new(path: PathBuf, source: String) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(i, _)| i + 1))
            .collect();

        Self {
            path,
            name,
            source,
            line_starts,
        }
    }

    /// Byte offset at which the line containing `offset` starts.
    pub fn line_start(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(i) => self.line_starts[i],
            Err(i) => self.line_starts[i - 1],
        }
    }

    pub fn position(&self, offset: usize) -> Option<Position> {
        if offset > self.source.len() {
            return None;
        }
        let line = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        Some(Position {
            line: line + 1,
            column: offset - self.line_starts[line] + 1,
        })
    }

    /// Visual width of the whitespace between the start of the line and
    /// `offset`; zero when anything other than whitespace precedes it.
    pub fn indent_width(&self, offset: usize, tab_width: usize) -> usize {
        let start = self.line_start(offset);
        match self.source.get(start..offset) {
            Some(prefix) if prefix.chars().all(|c| c == ' ' || c == '\t') => {
                visual_width(prefix, tab_width)
            }
            _ => 0,
        }
    }

    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}

/// Column width of a run of spaces and tabs, tabs advancing to the next stop.
pub fn visual_width(whitespace: &str, tab_width: usize) -> usize {
    whitespace.chars().fold(0, |width, c| match c {
        '\t' => (width / tab_width + 1) * tab_width,
        _ => width + 1,
    })
}

#[derive(Debug, Default)]
pub struct FileSet {
    files: Vec<SourceFile>,
}

impl FileSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, path: &Path, source: String) -> FileId {
        self.files.push(SourceFile::new(path.to_path_buf(), source));
        FileId(self.files.len() - 1)
    }

    pub fn file(&self, id: FileId) -> Option<&SourceFile> {
        self.files.get(id.0)
    }

    pub fn slice(&self, id: FileId, range: Range<usize>) -> Option<&str> {
        self.file(id)?.source.get(range)
    }

    pub fn position(&self, id: FileId, offset: usize) -> Option<Position> {
        self.file(id)?.position(offset)
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FileId, &SourceFile)> {
        self.files.iter().enumerate().map(|(i, f)| (FileId(i), f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fileset_with(source: &str) -> (FileSet, FileId) {
        let mut fset = FileSet::new();
        let id = fset.add(Path::new("/pkg/demo.go"), source.to_string());
        (fset, id)
    }

    #[test]
    fn test_add_assigns_sequential_ids() {
        let mut fset = FileSet::new();
        let a = fset.add(Path::new("a.go"), String::new());
        let b = fset.add(Path::new("b.go"), String::new());

        assert_eq!(a, FileId(0));
        assert_eq!(b, FileId(1));
        assert_eq!(fset.len(), 2);
        assert_eq!(fset.file(b).unwrap().name, "b.go");
    }

    #[test]
    fn test_position_is_one_based() {
        let (fset, id) = fileset_with("package demo\n\nfunc Hi() {}\n");

        assert_eq!(fset.position(id, 0), Some(Position { line: 1, column: 1 }));
        assert_eq!(fset.position(id, 14), Some(Position { line: 3, column: 1 }));
        assert_eq!(fset.position(id, 19), Some(Position { line: 3, column: 6 }));
        assert_eq!(fset.position(id, 1000), None);
    }

    #[test]
    fn test_slice_rejects_bad_ranges() {
        let (fset, id) = fileset_with("package demo");

        assert_eq!(fset.slice(id, 0..7), Some("package"));
        assert_eq!(fset.slice(id, 5..100), None);
        assert_eq!(fset.slice(FileId(9), 0..1), None);
    }

    #[test]
    fn test_indent_width() {
        let (fset, id) = fileset_with("type (\n\tA int\n    B int\n)\n");
        let file = fset.file(id).unwrap();

        assert_eq!(file.indent_width(8, 4), 4);
        assert_eq!(file.indent_width(18, 4), 4);
        assert_eq!(file.indent_width(0, 4), 0);
        // preceded by code, not indentation
        assert_eq!(file.indent_width(5, 4), 0);
    }

    #[test]
    fn test_visual_width_tab_stops() {
        assert_eq!(visual_width("\t", 4), 4);
        assert_eq!(visual_width("  \t", 4), 4);
        assert_eq!(visual_width("\t  ", 4), 6);
        assert_eq!(visual_width("", 4), 0);
    }

    #[test]
    fn test_line_count() {
        let (fset, id) = fileset_with("a\nb\nc");
        assert_eq!(fset.file(id).unwrap().line_count(), 3);
    }
}
