use std::ops::Range;

pub mod config;
pub mod hints;
pub mod jump;
pub mod view;

/// 1-based line and byte column of `offset` in `text`.
pub(crate) fn position(text: &str, offset: usize) -> (usize, usize) {
    let offset = offset.min(text.len());
    let before = &text.as_bytes()[..offset];
    let line = before.iter().filter(|byte| **byte == b'\n').count() + 1;
    let line_start = before
        .iter()
        .rposition(|byte| *byte == b'\n')
        .map_or(0, |index| index + 1);
    (line, offset - line_start + 1)
}

/// Byte range of the 1-based `line` without its surrounding whitespace.
pub(crate) fn line_span(text: &str, line: usize) -> Option<Range<usize>> {
    let mut start = 0;
    for (index, content) in text.split('\n').enumerate() {
        if index + 1 == line {
            let first = start + content.len() - content.trim_start().len();
            let last = start + content.trim_end().len();
            return Some(first..last.max(first));
        }
        start += content.len() + 1;
    }
    None
}
