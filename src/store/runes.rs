//! Rune iteration over raw line bytes.
//!
//! Lines are stored as bytes and may contain invalid UTF-8. Every column in
//! the store is a rune index computed here: a valid UTF-8 sequence is one
//! rune, and each byte that does not start a valid sequence is one rune
//! decoding to U+FFFD.

/// Iterator over `(byte_offset, rune)` pairs of a byte slice.
#[derive(Debug, Clone)]
pub struct Runes<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> Runes<'a> {
    /// Iterate the runes of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }
}

impl Iterator for Runes<'_> {
    type Item = (usize, char);

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.data[self.pos..];
        if rest.is_empty() {
            return None;
        }
        let start = self.pos;
        let (ch, len) = decode(rest);
        self.pos += len;
        Some((start, ch))
    }
}

/// Decode the first rune of a non-empty slice, returning it and its byte length.
fn decode(bytes: &[u8]) -> (char, usize) {
    let len = sequence_len(bytes[0]);
    if len > 0 && bytes.len() >= len {
        if let Some(ch) = std::str::from_utf8(&bytes[..len])
            .ok()
            .and_then(|s| s.chars().next())
        {
            return (ch, len);
        }
    }
    (char::REPLACEMENT_CHARACTER, 1)
}

/// Expected sequence length for a leading byte, 0 when it cannot lead.
fn sequence_len(lead: u8) -> usize {
    match lead {
        0x00..=0x7F => 1,
        0xC2..=0xDF => 2,
        0xE0..=0xEF => 3,
        0xF0..=0xF4 => 4,
        _ => 0,
    }
}

/// Number of runes in `data`.
pub fn rune_count(data: &[u8]) -> usize {
    Runes::new(data).count()
}

/// Byte offset of rune `index`, or `data.len()` when `index` is the rune count.
///
/// Returns `None` when `index` is past the end of the line.
pub fn rune_to_byte(data: &[u8], index: usize) -> Option<usize> {
    let mut runes = Runes::new(data);
    match runes.nth(index) {
        Some((offset, _)) => Some(offset),
        None if rune_count(data) == index => Some(data.len()),
        None => None,
    }
}
