//! Doc comment lookup and text extraction.

use tree_sitter::Node;

/// The comment group documenting `siblings[index]`: the comments directly
/// above it, with no blank line in between and not trailing other code.
pub fn doc_comments<'t>(siblings: &[Node<'t>], index: usize) -> Vec<Node<'t>> {
    let mut group = Vec::new();
    let Some(target) = siblings.get(index) else {
        return group;
    };

    let mut next_row = target.start_position().row;
    for j in (0..index).rev() {
        let comment = siblings[j];
        if comment.kind() != "comment" || comment.end_position().row + 1 != next_row {
            break;
        }
        if trails_token(comment) {
            break;
        }
        group.push(comment);
        next_row = comment.start_position().row;
    }

    group.reverse();
    group
}

/// Whether code or punctuation (such as a group's opening `(`) precedes the
/// comment on its line. Newline terminators are not counted.
fn trails_token(comment: Node<'_>) -> bool {
    let mut prev = comment.prev_sibling();
    while let Some(p) = prev.filter(|p| p.kind() == "\n") {
        prev = p.prev_sibling();
    }
    prev.is_some_and(|p| {
        p.kind() != "comment" && p.end_position().row == comment.start_position().row
    })
}

/// Text of a comment group with markers and directives removed.
pub fn group_text(comments: &[Node<'_>], source: &str) -> String {
    let mut lines: Vec<&str> = Vec::new();

    for comment in comments {
        let Some(raw) = source.get(comment.byte_range()) else {
            continue;
        };
        if let Some(body) = raw.strip_prefix("//") {
            if is_directive(body) {
                continue;
            }
            lines.push(body.strip_prefix(' ').unwrap_or(body));
        } else if let Some(body) = raw.strip_prefix("/*") {
            let body = body.strip_suffix("*/").unwrap_or(body);
            lines.extend(body.split('\n'));
        }
    }

    clean_lines(&lines)
}

/// Trailing whitespace stripped, outer blank lines dropped, inner runs of
/// blank lines collapsed to one.
fn clean_lines(lines: &[&str]) -> String {
    let mut out: Vec<&str> = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.trim_end();
        if line.is_empty() && out.last().map_or(true, |prev| prev.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }
    out.join("\n")
}

/// `//go:generate`, `//line`, `//export` and friends are tool directives, not
/// documentation.
fn is_directive(body: &str) -> bool {
    if body.starts_with("line ") || body.starts_with("extern ") || body.starts_with("export ") {
        return true;
    }

    let Some((prefix, rest)) = body.split_once(':') else {
        return false;
    };
    !prefix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        && rest.starts_with(|c: char| c.is_ascii_lowercase() || c.is_ascii_digit())
}
