//! Field path grammar
//!
//! Field keys look like `order.items[3].sku`: dotted property names with
//! bracketed indexes or dictionary keys. This module splits such keys into
//! segments and defines the ordering used to keep sibling segments sorted.
//!
//! | Input                 | Segments                              |
//! |-----------------------|---------------------------------------|
//! | `foo`                 | `foo`                                 |
//! | `foo.bar`             | `foo`, `bar`                          |
//! | `foo[0]`              | `foo`, `[0]`                          |
//! | `foo.bar[3].baz[qux]` | `foo`, `bar`, `[3]`, `baz`, `[qux]`   |
//! | (empty)               | none                                  |
//!
//! A `.` is dropped from both neighbours; a `[` stays on the segment it
//! opens, so `[0]` and `0` never compare equal. Brackets are not checked for
//! balance: segment text is an opaque comparison key.

use std::cmp::Ordering;

/// Separator between property names.
pub const DELIMITER_DOT: u8 = b'.';

/// Opens an index or dictionary-key segment.
pub const DELIMITER_OPEN: u8 = b'[';

/// The delimiter that ended a segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// End of the key. No further segments follow.
    #[default]
    None,
    /// A `.` ended the segment.
    Dot,
    /// A `[` ended the segment; it begins the next one.
    OpenBracket,
}

/// One segment of a field key, borrowed from the key it was cut from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathSegment<'k> {
    /// Segment text. Bracketed segments keep their leading `[`.
    pub text: &'k str,
    /// What ended this segment.
    pub delimiter: Delimiter,
}

/// Scan position inside a key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Cursor {
    index: usize,
    delimiter: Delimiter,
}

impl Cursor {
    /// Byte offset where the next scan starts.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Delimiter that ended the previous segment.
    pub fn delimiter(&self) -> Delimiter {
        self.delimiter
    }
}

/// Cut the next segment out of `key` and advance `cursor` past it.
///
/// Both delimiters are ASCII, so scanning bytes never splits a UTF-8
/// sequence and the returned slice always lands on char boundaries.
#[inline]
pub fn next_segment<'k>(key: &'k str, cursor: &mut Cursor) -> PathSegment<'k> {
    let bytes = key.as_bytes();
    let mut index = cursor.index;
    let mut delimiter = Delimiter::None;

    while index < bytes.len() {
        match bytes[index] {
            DELIMITER_DOT => {
                delimiter = Delimiter::Dot;
                break;
            }
            DELIMITER_OPEN => {
                delimiter = Delimiter::OpenBracket;
                break;
            }
            _ => index += 1,
        }
    }

    // A bracket that ended the previous segment belongs to this one.
    let start = if cursor.delimiter == Delimiter::OpenBracket {
        cursor.index - 1
    } else {
        cursor.index
    };

    cursor.delimiter = delimiter;
    cursor.index = index + 1;

    PathSegment {
        text: &key[start..index],
        delimiter,
    }
}

/// Iterator over the segments of a key.
///
/// ```
/// use fieldstate_core::path::tokenize;
///
/// let segments: Vec<&str> = tokenize("foo.bar[3].baz[qux]").map(|s| s.text).collect();
/// assert_eq!(segments, vec!["foo", "bar", "[3]", "baz", "[qux]"]);
/// ```
#[derive(Debug, Clone)]
pub struct PathSegments<'k> {
    key: &'k str,
    cursor: Cursor,
    done: bool,
}

impl<'k> Iterator for PathSegments<'k> {
    type Item = PathSegment<'k>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let segment = next_segment(self.key, &mut self.cursor);
        self.done = segment.delimiter == Delimiter::None;
        Some(segment)
    }
}

/// Split `key` into segments. The empty key has none.
pub fn tokenize(key: &str) -> PathSegments<'_> {
    PathSegments {
        key,
        cursor: Cursor::default(),
        done: key.is_empty(),
    }
}

/// Rebuild a key from its segments, restoring the dropped dots.
pub fn join_segments<'k>(segments: impl IntoIterator<Item = PathSegment<'k>>) -> String {
    let mut key = String::new();
    for segment in segments {
        key.push_str(segment.text);
        if segment.delimiter == Delimiter::Dot {
            key.push(DELIMITER_DOT as char);
        }
    }
    key
}

// =============================================================================
// Segment ordering
// =============================================================================

/// Order two segments: shorter first, then ordinal case-insensitive text.
///
/// Length is compared in bytes, which rejects most mismatches before any
/// character is folded. Case folding is one char to one char: a character
/// whose uppercase form is several chars (`ß` to `SS`) is compared as
/// itself, so `straße` and `strasse` stay distinct.
#[inline]
pub fn compare_segments(a: &str, b: &str) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| compare_ignore_case(a, b))
}

/// `true` when both segments name the same child.
#[inline]
pub fn segments_eq(a: &str, b: &str) -> bool {
    compare_segments(a, b) == Ordering::Equal
}

fn compare_ignore_case(a: &str, b: &str) -> Ordering {
    if a.is_ascii() && b.is_ascii() {
        return a
            .bytes()
            .map(|c| c.to_ascii_uppercase())
            .cmp(b.bytes().map(|c| c.to_ascii_uppercase()));
    }
    a.chars().map(fold_char).cmp(b.chars().map(fold_char))
}

/// Simple uppercase mapping; multi-char expansions leave `c` unchanged.
#[inline]
fn fold_char(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// `true` when `key` lies at or beneath `prefix`.
///
/// The empty prefix matches every key. Otherwise `key` must start with
/// `prefix` (ignoring case) and the prefix must end on a segment boundary:
/// `Product` matches `Product`, `Product.Name` and `Product[0]`, but not
/// `ProductName`.
pub fn starts_with_prefix(prefix: &str, key: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    let Some(head) = key.get(..prefix.len()) else {
        return false;
    };
    if !segments_eq(head, prefix) {
        return false;
    }
    matches!(
        key.as_bytes().get(prefix.len()),
        None | Some(&DELIMITER_DOT) | Some(&DELIMITER_OPEN)
    )
}
