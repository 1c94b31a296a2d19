use std::path::Path;

use tree_sitter::Node;

use crate::error::{DocError, Result, SyntaxError};
use crate::extract::fileset::{FileId, FileSet};
use crate::extract::filter::package_files;

pub fn go_language() -> tree_sitter::Language {
    tree_sitter_go::LANGUAGE.into()
}

/// One parsed Go file. Its text lives in the run's [`FileSet`] under `file`.
pub struct ParsedFile {
    pub file: FileId,
    pub tree: tree_sitter::Tree,
    /// Name from the `package` clause
    pub package: String,
}

impl ParsedFile {
    pub fn root_node(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

#[derive(Debug, Default)]
pub struct Parser {
    preferred_package: Option<String>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Package clause name to keep when a directory mixes packages.
    pub fn with_preferred_package(mut self, name: impl Into<String>) -> Self {
        self.preferred_package = Some(name.into());
        self
    }

    /// Parse every file in `dir` accepted by `filter`. Fails as a whole if no
    /// file is accepted or any accepted file does not parse cleanly. Files
    /// constrained by `//go:build ignore` are skipped. When files declare
    /// different packages, the preferred package wins if present, else the
    /// one with the most files; the others are left out.
    pub fn parse_dir<F>(&self, dir: &Path, filter: F, fset: &mut FileSet) -> Result<Vec<ParsedFile>>
    where
        F: Fn(&str) -> bool,
    {
        let paths = package_files(dir, filter)?;
        if paths.is_empty() {
            return Err(DocError::NoSourceFiles(dir.display().to_string()));
        }

        let mut parsed = Vec::with_capacity(paths.len());
        for path in &paths {
            let source = std::fs::read_to_string(path).map_err(|e| DocError::Read {
                path: path.display().to_string(),
                source: e,
            })?;
            if is_build_ignored(&source) {
                tracing::debug!("Skipping {}: build constraint is `ignore`", path.display());
                continue;
            }
            tracing::debug!("Parsing {}", path.display());
            parsed.push(self.parse_source(path, source, fset)?);
        }
        if parsed.is_empty() {
            return Err(DocError::NoSourceFiles(dir.display().to_string()));
        }

        let package = select_package(&parsed, self.preferred_package.as_deref());
        parsed.retain(|file| {
            let same = file.package == package;
            if !same {
                let name = fset.file(file.file).map(|f| f.name.as_str()).unwrap_or("?");
                tracing::warn!(
                    "Skipping {}: declares package {} instead of {}",
                    name,
                    file.package,
                    package
                );
            }
            same
        });

        Ok(parsed)
    }

    /// Parse one file's text and register it in `fset`.
    pub fn parse_source(&self, path: &Path, source: String, fset: &mut FileSet) -> Result<ParsedFile> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&go_language())
            .map_err(|e| DocError::Grammar(e.to_string()))?;

        let tree = parser.parse(&source, None).ok_or_else(|| DocError::Parse {
            path: path.display().to_string(),
            source: SyntaxError {
                line: 1,
                column: 1,
                message: "parser produced no tree".to_string(),
            },
        })?;

        let root = tree.root_node();
        if let Some(bad) = first_error(root) {
            let pos = bad.start_position();
            let message = if bad.is_missing() {
                format!("missing {}", bad.kind())
            } else {
                let snippet = source
                    .get(bad.byte_range())
                    .and_then(|text| text.lines().next())
                    .unwrap_or("")
                    .trim();
                if snippet.is_empty() {
                    "unexpected input".to_string()
                } else {
                    format!("unexpected `{}`", snippet)
                }
            };
            return Err(DocError::Parse {
                path: path.display().to_string(),
                source: SyntaxError {
                    line: pos.row + 1,
                    column: pos.column + 1,
                    message,
                },
            });
        }

        let package = package_name(root, &source).ok_or_else(|| DocError::Parse {
            path: path.display().to_string(),
            source: SyntaxError {
                line: 1,
                column: 1,
                message: "missing package clause".to_string(),
            },
        })?;

        let file = fset.add(path, source);
        Ok(ParsedFile {
            file,
            tree,
            package,
        })
    }
}

/// Whether the file's leading `//go:build` line is exactly `ignore`.
fn is_build_ignored(source: &str) -> bool {
    let mut in_block = false;
    for line in source.lines() {
        let line = line.trim();
        if in_block {
            in_block = !line.contains("*/");
            continue;
        }
        if line.is_empty() {
            continue;
        }
        if let Some(constraint) = line.strip_prefix("//go:build") {
            return constraint.trim() == "ignore";
        }
        if line.starts_with("//") {
            continue;
        }
        if line.starts_with("/*") {
            in_block = !line.contains("*/");
            continue;
        }
        break;
    }
    false
}

/// The preferred package if any file declares it, else the most common one
/// (earliest file wins ties).
fn select_package(files: &[ParsedFile], preferred: Option<&str>) -> String {
    if let Some(name) = preferred {
        if files.iter().any(|f| f.package == name) {
            return name.to_string();
        }
    }

    let mut counts: Vec<(&str, usize)> = Vec::new();
    for file in files {
        let package = file.package.as_str();
        match counts.iter_mut().find(|(name, _)| *name == package) {
            Some((_, count)) => *count += 1,
            None => counts.push((package, 1)),
        }
    }

    let mut best = ("", 0);
    for (name, count) in counts {
        if count > best.1 {
            best = (name, count);
        }
    }
    best.0.to_string()
}

fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }

    let mut cursor = node.walk();
    for child in node.children(&mut cursor) {
        if let Some(bad) = first_error(child) {
            return Some(bad);
        }
    }
    None
}

fn package_name(root: Node<'_>, source: &str) -> Option<String> {
    let mut cursor = root.walk();
    let clause = root
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_clause")?;

    let mut cursor = clause.walk();
    let ident = clause
        .named_children(&mut cursor)
        .find(|n| n.kind() == "package_identifier")?;
    source.get(ident.byte_range()).map(str::to_string)
}
