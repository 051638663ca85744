//! Single-line classification: strips comments and tree glyphs, measures the
//! indent, and sanitizes the remaining name.

/// Columns a tab contributes to the indent width.
pub const TAB_WIDTH: usize = 4;

/// Characters that may appear in the drawing prefix of a tree line.
const TREE_GLYPHS: &[char] = &[
    '\u{2502}', // │
    '\u{251c}', // ├
    '\u{2514}', // └
    '\u{2500}', // ─
    '\u{252c}', // ┬
    '\u{253c}', // ┼
    '\u{2503}', // ┃
    '\u{2523}', // ┣
    '\u{2517}', // ┗
    '\u{2501}', // ━
    '|',
    '+',
    '-',
    '\\',
];

/// Wrapping characters removed from both ends of a name.
const QUOTE_CHARS: &[char] = &['"', '\'', '`', '*'];

/// Characters rejected by common filesystems.
const ILLEGAL_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

const SEPARATORS: &[char] = &['/', '\\'];

fn is_prefix_char(c: char) -> bool {
    c.is_whitespace() || TREE_GLYPHS.contains(&c)
}

/// Byte offset where the name starts, or `None` for a prefix-only line.
///
/// A backtick is a glyph only when it opens an ASCII corner (`` `-- ``), so
/// backtick-quoted names keep their column.
fn name_offset(content: &str) -> Option<usize> {
    let mut chars = content.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        let glyph = match c {
            '`' => matches!(chars.peek(), Some((_, '-'))),
            _ => is_prefix_char(c),
        };
        if !glyph {
            return Some(i);
        }
    }
    None
}

/// Remove everything from the first unescaped `#`. `\#` is kept as `#`.
pub fn strip_comment(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' if chars.peek() == Some(&'#') => {
                out.push('#');
                chars.next();
            }
            '#' => break,
            _ => out.push(c),
        }
    }
    out
}

/// Width of a prefix in columns, tabs expanded.
pub fn indent_width(prefix: &str) -> usize {
    prefix
        .chars()
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

/// Remove filesystem-illegal characters and traversal sequences.
///
/// Illegal characters go first so that dropping one can never join two
/// dots into a fresh `..`.
pub fn sanitize_name(name: &str) -> String {
    let mut cleaned: String = name
        .chars()
        .filter(|c| !ILLEGAL_CHARS.contains(c))
        .collect();
    while cleaned.contains("..") {
        cleaned = cleaned.replace("..", "");
    }
    cleaned.trim().to_string()
}

/// Classify one raw line.
///
/// Returns the sanitized name and the indent width, or `None` if the line
/// carries no entry (blank, comment-only, glyph-only, or empty after
/// sanitizing).
pub fn classify_line(line: &str) -> Option<(String, usize)> {
    let content = strip_comment(line);
    let content = content.trim_end();
    if content.trim().is_empty() {
        return None;
    }

    let (prefix, rest) = content.split_at(name_offset(content)?);

    let raw = rest.trim().trim_matches(QUOTE_CHARS);
    let raw = raw.trim_start_matches("./").trim_start_matches(SEPARATORS);
    // Removing `..` can expose a new leading separator.
    let name = sanitize_name(raw)
        .trim_start_matches(SEPARATORS)
        .to_string();
    // A bare `.` names the root itself, as in `tree` output.
    if name.is_empty() || name == "." {
        return None;
    }

    Some((name, indent_width(prefix)))
}
