//! Shared helpers for the integration tests.

/// Replaces single quotes with double quotes so test fixtures can be written
/// without a forest of escaped `"` characters.
pub fn loosen_quotes(input: &str) -> String {
    input.replace('\'', "\"")
}

/// True if every line containing `needle` has it starting at the same column.
pub fn columns_align(lines: &[impl AsRef<str>], needle: &str) -> bool {
    let mut column = None;
    for line in lines {
        if let Some(idx) = line.as_ref().find(needle) {
            match column {
                None => column = Some(idx),
                Some(expected) if expected != idx => return false,
                _ => {}
            }
        }
    }
    true
}

pub fn char_index_of(line: &str, needle: &str) -> Option<usize> {
    line.find(needle).map(|byte_idx| line[..byte_idx].chars().count())
}

pub fn lines_of(text: &str) -> Vec<String> {
    text.trim_end().split('\n').map(|s| s.to_string()).collect()
}
