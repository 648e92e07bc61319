//! Resolution of Java-style `\uXXXX` escapes ahead of scanning.
//!
//! The [`UnicodeEscapeBuffer`] type accumulates exactly four ASCII
//! hexadecimal digits (`0-9`, `A-F`, `a-f`) and yields the UTF-16 code unit
//! they spell. [`resolve_unicode_escapes`] drives it over a whole input:
//!
//! - A backslash starts an escape only when it is preceded by an even number
//!   of contiguous backslashes and followed by at least one `u`. Any number of
//!   `u` characters may follow (`\uuuu0041` is `A`).
//! - Characters produced by an escape never start another escape, so
//!   `\u005cu0041` decodes to the six characters `\u0041`.
//! - A high surrogate escape immediately followed by a low surrogate escape is
//!   combined into one `char`.
//!
//! # Errors
//!
//! - A non-hexadecimal digit inside an escape yields
//!   [`EscapeError::InvalidDigit`].
//! - Input ending before four digits were read yields
//!   [`EscapeError::Truncated`].
//! - A surrogate escape without its partner yields
//!   [`EscapeError::UnpairedSurrogate`].
use std::borrow::Cow;

use crate::error::EscapeError;

#[derive(Debug)]
/// Buffer for accumulating four hexadecimal digits and decoding them into a
/// UTF-16 code unit.
pub(crate) struct UnicodeEscapeBuffer {
    value: u16,
    len: u8,
}

impl UnicodeEscapeBuffer {
    /// Creates a new, empty `UnicodeEscapeBuffer`.
    pub fn new() -> Self {
        Self { value: 0, len: 0 }
    }

    /// Clears any accumulated digits, returning the buffer to its initial
    /// state.
    pub fn reset(&mut self) {
        self.value = 0;
        self.len = 0;
    }

    /// Feeds a single hexadecimal digit found at byte `offset`.
    ///
    /// - Returns `Ok(None)` while fewer than four digits have been provided.
    /// - Returns `Ok(Some(unit))` once the fourth digit arrives, and resets.
    /// - Returns `Err` if `c` is not an ASCII hex digit.
    pub fn feed(&mut self, c: char, offset: usize) -> Result<Option<u16>, EscapeError> {
        let Some(digit) = c.to_digit(16) else {
            return Err(EscapeError::InvalidDigit { found: c, offset });
        };
        // `to_digit(16)` is at most 15, so the cast is lossless.
        #[allow(clippy::cast_possible_truncation)]
        let digit = digit as u16;
        self.value = (self.value << 4) | digit;
        self.len += 1;

        if self.len == 4 {
            let unit = self.value;
            self.reset();
            Ok(Some(unit))
        } else {
            Ok(None)
        }
    }
}

const HIGH_SURROGATES: core::ops::RangeInclusive<u16> = 0xD800..=0xDBFF;
const LOW_SURROGATES: core::ops::RangeInclusive<u16> = 0xDC00..=0xDFFF;

/// Replaces every unicode escape in `text` with the character it denotes.
///
/// Returns the input unchanged (borrowed) when it contains no `\u` at all.
pub fn resolve_unicode_escapes(text: &str) -> Result<Cow<'_, str>, EscapeError> {
    if !text.contains("\\u") {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    // Contiguous raw backslashes immediately before the current character.
    let mut run = 0usize;
    let mut pending_high: Option<(u16, usize)> = None;
    let mut buffer = UnicodeEscapeBuffer::new();

    while let Some((offset, ch)) = chars.next() {
        if ch == '\\' && run % 2 == 0 && matches!(chars.peek(), Some((_, 'u'))) {
            while chars.next_if(|&(_, c)| c == 'u').is_some() {}

            buffer.reset();
            let unit = loop {
                let Some((at, digit)) = chars.next() else {
                    return Err(EscapeError::Truncated { offset });
                };
                if let Some(unit) = buffer.feed(digit, at)? {
                    break unit;
                }
            };
            run = 0;

            match (pending_high.take(), unit) {
                (Some((high, _)), low) if LOW_SURROGATES.contains(&low) => {
                    let code = 0x10000
                        + ((u32::from(high) - 0xD800) << 10)
                        + (u32::from(low) - 0xDC00);
                    out.push(char::from_u32(code).ok_or(EscapeError::UnpairedSurrogate {
                        code: u32::from(high),
                        offset,
                    })?);
                }
                (Some((high, at)), _) => {
                    return Err(EscapeError::UnpairedSurrogate {
                        code: u32::from(high),
                        offset: at,
                    });
                }
                (None, high) if HIGH_SURROGATES.contains(&high) => {
                    pending_high = Some((high, offset));
                }
                (None, unit) => {
                    out.push(char::from_u32(u32::from(unit)).ok_or(
                        EscapeError::UnpairedSurrogate {
                            code: u32::from(unit),
                            offset,
                        },
                    )?);
                }
            }
            continue;
        }

        if let Some((high, at)) = pending_high.take() {
            return Err(EscapeError::UnpairedSurrogate {
                code: u32::from(high),
                offset: at,
            });
        }
        run = if ch == '\\' { run + 1 } else { 0 };
        out.push(ch);
    }

    if let Some((high, at)) = pending_high {
        return Err(EscapeError::UnpairedSurrogate {
            code: u32::from(high),
            offset: at,
        });
    }

    Ok(Cow::Owned(out))
}
