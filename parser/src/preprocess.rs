//! Source normalization run before tokenizing.

/// Marker starting a whole-line comment.
pub const COMMENT_MARKER: char = '%';

/// Canonical indentation unit produced by [`preprocess`].
pub const INDENT: char = '\t';

/// Normalize raw source text.
///
/// Drops blank and comment lines, rewrites each leading indentation unit
/// (a tab, four spaces or two spaces) to one tab, and terminates the text
/// with a newline. Never fails.
pub fn preprocess(source: &str) -> String {
    let mut out = String::with_capacity(source.len() + 1);

    for line in source.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with(COMMENT_MARKER) {
            continue;
        }

        let (depth, rest) = split_indentation(line);
        for _ in 0..depth {
            out.push(INDENT);
        }
        out.push_str(rest.trim_end());
        out.push('\n');
    }

    if out.is_empty() {
        out.push('\n');
    }
    out
}

/// Count leading indentation units and return the remainder of the line.
fn split_indentation(line: &str) -> (usize, &str) {
    let mut rest = line;
    let mut depth = 0;

    loop {
        if let Some(r) = rest.strip_prefix(INDENT) {
            rest = r;
        } else if let Some(r) = rest.strip_prefix("    ") {
            rest = r;
        } else if let Some(r) = rest.strip_prefix("  ") {
            rest = r;
        } else {
            break;
        }
        depth += 1;
    }

    (depth, rest.trim_start_matches(' '))
}
