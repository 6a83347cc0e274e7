//! Character classes used by the scanner.

use rsharp_ast::is_formatting_char;
use unicode_xid::UnicodeXID;

pub const LINE_FEED: char = '\n';
pub const CARRIAGE_RETURN: char = '\r';
pub const NEXT_LINE: char = '\u{0085}';
pub const LINE_SEPARATOR: char = '\u{2028}';
pub const PARAGRAPH_SEPARATOR: char = '\u{2029}';

/// Check if a character ends a line.
#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(
        ch,
        LINE_FEED | CARRIAGE_RETURN | NEXT_LINE | LINE_SEPARATOR | PARAGRAPH_SEPARATOR
    )
}

/// Check if a character is whitespace other than a line break.
#[inline]
pub fn is_white_space(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t'
            | '\u{000B}' // vertical tab
            | '\u{000C}' // form feed
            | '\u{00A0}' // no-break space
            | '\u{1680}' // ogham space mark
            | '\u{2000}'..='\u{200A}' // various spaces
            | '\u{202F}' // narrow no-break space
            | '\u{205F}' // medium mathematical space
            | '\u{3000}' // ideographic space
            | '\u{FEFF}' // byte order mark
    )
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_xid_start())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    ch == '_'
        || ch.is_ascii_alphanumeric()
        || (!ch.is_ascii() && (ch.is_xid_continue() || is_formatting_char(ch)))
}

#[inline]
pub fn is_decimal_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

#[inline]
pub fn is_hex_digit(ch: char) -> bool {
    ch.is_ascii_hexdigit()
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}

/// Byte length of the line break starting at `text[0]`, or 0.
pub fn line_break_len(text: &str) -> usize {
    let mut chars = text.chars();
    match chars.next() {
        Some(CARRIAGE_RETURN) if chars.next() == Some(LINE_FEED) => 2,
        Some(ch) if is_line_break(ch) => ch.len_utf8(),
        _ => 0,
    }
}

/// Byte offset of the next line break in `text`, or `text.len()`.
pub fn find_line_end(text: &str) -> usize {
    let bytes = text.as_bytes();
    let ascii = memchr::memchr2(b'\n', b'\r', bytes).unwrap_or(bytes.len());
    // U+0085, U+2028 and U+2029 are multi-byte; only look for them before the
    // first ASCII line break.
    text[..ascii]
        .char_indices()
        .find(|(_, c)| is_line_break(*c))
        .map_or(ascii, |(i, _)| i)
}
