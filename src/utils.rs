//! Common utility functions shared across the codebase.

use std::path::Path;

/// Build an index of line start byte offsets for O(log n) line lookups.
///
/// Line 1 starts at offset 0, line 2 starts after the first '\n', etc.
pub fn build_line_index(content: &str) -> Vec<usize> {
    let mut offsets = vec![0];
    for (i, b) in content.bytes().enumerate() {
        if b == b'\n' {
            offsets.push(i + 1);
        }
    }
    offsets
}

/// Find the 1-based line number for a byte offset using binary search.
pub fn offset_to_line(line_index: &[usize], offset: usize) -> usize {
    match line_index.binary_search(&offset) {
        Ok(line) => line + 1,
        Err(line) => line,
    }
}

/// Quote a CSV field when it contains a separator, a quote or a line break.
///
/// # Examples
///
/// ```
/// use locscan::utils::csv_field;
///
/// assert_eq!(csv_field("plain"), "plain");
/// assert_eq!(csv_field("a, b"), "\"a, b\"");
/// assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
/// ```
pub fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Render a path for display, without a leading `./`.
pub fn display_path(path: &Path) -> String {
    let text = path.to_string_lossy();
    text.strip_prefix("./").unwrap_or(&text).to_string()
}

#[cfg(test)]
mod tests {
    use crate::utils::*;

    #[test]
    fn test_line_index_lookup() {
        let content = "first\nsecond\n\nfourth";
        let index = build_line_index(content);
        assert_eq!(index, vec![0, 6, 13, 14]);

        assert_eq!(offset_to_line(&index, 0), 1);
        assert_eq!(offset_to_line(&index, 5), 1);
        assert_eq!(offset_to_line(&index, 6), 2);
        assert_eq!(offset_to_line(&index, 13), 3);
        assert_eq!(offset_to_line(&index, 16), 4);
    }

    #[test]
    fn test_csv_field_line_break() {
        assert_eq!(csv_field("one\ntwo"), "\"one\ntwo\"");
        assert_eq!(csv_field(""), "");
    }

    #[test]
    fn test_display_path_strips_dot_prefix() {
        assert_eq!(display_path(Path::new("./ts/app.tsx")), "ts/app.tsx");
        assert_eq!(display_path(Path::new("ts/app.tsx")), "ts/app.tsx");
    }
}
