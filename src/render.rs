//! Prints declarations back as source, paired with their doc text.

use crate::extract::fileset::{visual_width, FileSet};
use crate::model::DeclNode;

/// Columns per indentation tab.
pub const TAB_WIDTH: usize = 4;
pub const FENCE: &str = "```";

pub struct Renderer<'a> {
    fset: &'a FileSet,
    strip_bodies: bool,
}

impl<'a> Renderer<'a> {
    pub fn new(fset: &'a FileSet, strip_bodies: bool) -> Self {
        Self { fset, strip_bodies }
    }

    /// Doc text followed by the fenced declaration. Returns an empty string
    /// when the declaration cannot be printed.
    pub fn render(&self, node: &DeclNode, doc: &str) -> String {
        let Some(code) = self.print(node) else {
            tracing::debug!(
                "Could not print {:?} declaration at {:?} in file {}; leaving it out",
                node.kind,
                node.range,
                node.file.0
            );
            return String::new();
        };

        let mut out = String::with_capacity(doc.len() + code.len() + 2 * FENCE.len() + 4);
        if !doc.is_empty() {
            out.push_str(doc);
            out.push('\n');
        }
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&code);
        out.push('\n');
        out.push_str(FENCE);
        out.push('\n');
        out
    }

    /// The declaration's source with indentation normalized to tabs relative
    /// to its first line.
    pub fn print(&self, node: &DeclNode) -> Option<String> {
        let file = self.fset.file(node.file)?;
        let end = match (&node.body, self.strip_bodies) {
            (Some(body), true) => body.start,
            _ => node.range.end,
        };
        let text = file.source.get(node.range.start..end)?.trim_end();
        if text.trim().is_empty() {
            return None;
        }

        let base = file.indent_width(node.range.start, TAB_WIDTH);
        let mut out = String::with_capacity(text.len() + 8);
        if let Some(keyword) = node.keyword {
            out.push_str(keyword);
            out.push(' ');
        }

        let mut offset = node.range.start;
        for (i, line) in text.split('\n').enumerate() {
            if i == 0 {
                out.push_str(line.trim_end());
            } else {
                out.push('\n');
                let inside_literal = node.verbatim.iter().any(|r| r.start < offset && offset < r.end);
                if inside_literal {
                    out.push_str(line);
                } else {
                    out.push_str(&reindent(line, base));
                }
            }
            offset += line.len() + 1;
        }

        Some(out)
    }
}

fn reindent(line: &str, base: usize) -> String {
    let content = line.trim_start_matches([' ', '\t']);
    let indent = &line[..line.len() - content.len()];
    let content = content.trim_end();
    if content.is_empty() {
        return String::new();
    }

    let width = visual_width(indent, TAB_WIDTH).saturating_sub(base);
    let mut out = String::with_capacity(width / TAB_WIDTH + width % TAB_WIDTH + content.len());
    out.push_str(&"\t".repeat(width / TAB_WIDTH));
    out.push_str(&" ".repeat(width % TAB_WIDTH));
    out.push_str(content);
    out
}
