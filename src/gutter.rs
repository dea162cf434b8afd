//! Line number gutter

/// Number of decimal digits in `n`
pub fn digits(n: usize) -> usize {
    let mut n = n.max(1);
    let mut count = 0;
    while n > 0 {
        n /= 10;
        count += 1;
    }
    count
}

/// Gutter width in columns for a document, including one space of padding
pub fn width(line_count: usize) -> usize {
    digits(line_count.max(1)) + 1
}

/// Right-aligned label for a 0-indexed line
pub fn label(line_idx: usize, width: usize) -> String {
    format!("{:>w$} ", line_idx + 1, w = width.saturating_sub(1))
}
