use ropey::Rope;
use tower_lsp::lsp_types::{Position, Range};

use crate::ast::{PrimitiveKind, Value};

// Convert an LSP UTF-16 position to a char index, clamped to the end of the line.
pub fn position_to_offset(text: &Rope, pos: Position) -> usize {
    let line_idx = pos.line as usize;
    if line_idx >= text.len_lines() {
        return text.len_chars();
    }
    let line_start_char = text.line_to_char(line_idx);
    let line_slice = text.line(line_idx);
    let target_utf16 = pos.character as usize;

    let mut seen_utf16 = 0usize;
    let mut chars_in_line = 0usize;
    for ch in line_slice.chars() {
        if ch == '\n' || ch == '\r' {
            break;
        }
        let u16_len = ch.len_utf16();
        if seen_utf16 + u16_len > target_utf16 {
            break;
        }
        seen_utf16 += u16_len;
        chars_in_line += 1;
        if seen_utf16 == target_utf16 {
            break;
        }
    }
    line_start_char + chars_in_line
}

// Inverse of `position_to_offset`; offsets past the end clamp to the last position.
pub fn offset_to_position(text: &Rope, offset: usize) -> Position {
    let offset = offset.min(text.len_chars());
    let line = text.char_to_line(offset);
    let line_start = text.line_to_char(line);
    let character: usize = text
        .slice(line_start..offset)
        .chars()
        .map(char::len_utf16)
        .sum();
    Position::new(line as u32, character as u32)
}

/// Inclusive on both ends: a cursor right after the last character still counts.
pub fn range_contains(range: &Range, pos: Position) -> bool {
    range.start <= pos && pos <= range.end
}

/// Strictly inside: the cursor is neither on the first nor after the last character.
pub fn range_strictly_contains(range: &Range, pos: Position) -> bool {
    range.start < pos && pos < range.end
}

pub fn range_contains_range(outer: &Range, inner: &Range) -> bool {
    outer.start <= inner.start && inner.end <= outer.end
}

/// `target` starts where `anchor` ends, tolerating one boundary character
/// (e.g. a closing quote left out of a key range).
pub fn is_right_after(anchor: &Range, target: &Range) -> bool {
    if target.start == anchor.end {
        return true;
    }
    target.start.line == anchor.end.line && target.start.character == anchor.end.character + 1
}

/// `target` ends where `anchor` starts, tolerating one boundary character.
pub fn is_right_before(anchor: &Range, target: &Range) -> bool {
    if target.end == anchor.start {
        return true;
    }
    target.end.line == anchor.start.line && target.end.character + 1 == anchor.start.character
}

/// Range spanning from the start of `first` to the end of `last`.
pub fn cover(first: &Range, last: &Range) -> Range {
    Range::new(first.start, last.end)
}

/// Abstract kind of a value node, as the schema sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Boolean,
    Integer,
    Null,
    Object,
    Array,
}

pub fn value_kind(value: &Value) -> ValueKind {
    match value {
        Value::Structure(_) => ValueKind::Object,
        Value::Collection(_) => ValueKind::Array,
        Value::Primitive(p) => match p.kind {
            PrimitiveKind::String => ValueKind::String,
            PrimitiveKind::Boolean => ValueKind::Boolean,
            PrimitiveKind::Number => ValueKind::Integer,
            PrimitiveKind::Null => ValueKind::Null,
        },
    }
}
