use core::{fmt, ops::Range, str::FromStr};
use std::{path::Path, sync::Arc};

use bstr::ByteSlice;
use regex::{Captures, Regex};
use tracing::debug;

use super::{Scanner, Tape};
use crate::{
    error::{Error, EscapeError},
    escape_buffer::resolve_unicode_escapes,
    options::ScannerOptions,
};

/// Decoded text walked one `char` at a time. Offsets are UTF-8 byte offsets.
#[derive(Debug, Clone)]
pub struct CharTape {
    text: Arc<str>,
}

impl CharTape {
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        Self { text: text.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }
}

impl Tape for CharTape {
    type Slice = str;
    type Sink = String;

    fn len(&self) -> usize {
        self.text.len()
    }

    fn step(&self, at: usize) -> Option<usize> {
        let ch = self.text.get(at..)?.chars().next()?;
        Some(at + ch.len_utf8())
    }

    fn is_boundary(&self, at: usize) -> bool {
        self.text.is_char_boundary(at)
    }

    fn slice(&self, range: Range<usize>) -> &str {
        &self.text[range]
    }

    fn commit(&self, range: Range<usize>, sink: Option<&mut String>) {
        if let Some(sink) = sink {
            sink.push_str(&self.text[range]);
        }
    }
}

/// A regular expression that only matches at the scanner's window end.
///
/// The source is wrapped as `\A(?:…)` when compiled, so a match must start
/// exactly at the current position and never searches forward.
#[derive(Clone)]
pub struct Pattern {
    source: Box<str>,
    regex: Regex,
}

impl Pattern {
    /// Compiles `pattern` anchored at its start.
    ///
    /// # Errors
    ///
    /// Returns the regex engine's error for invalid syntax.
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(&format!(r"\A(?:{pattern})"))?;
        Ok(Self {
            source: pattern.into(),
            regex,
        })
    }

    /// The pattern as written, without the anchor.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Length in bytes of the anchored match at the start of `haystack`.
    pub fn match_len(&self, haystack: &str) -> Option<usize> {
        self.regex.find(haystack).map(|m| m.end())
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl FromStr for Pattern {
    type Err = regex::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Scanner over decoded text.
pub type CharScanner = Scanner<CharTape>;

/// Generates the non-mutating `test_*` twin of a `next_*` primitive.
macro_rules! probes {
    ($( $(#[$doc:meta])* $test:ident => $next:ident($($arg:ident: $ty:ty),*); )*) => {
        $(
            $(#[$doc])*
            pub fn $test(&mut self, $($arg: $ty),*) -> bool {
                self.probe(|s| s.$next($($arg),*))
            }
        )*
    };
}

impl Scanner<CharTape> {
    /// Creates a scanner over `text`, resolving unicode escapes first.
    ///
    /// # Errors
    ///
    /// Returns an [`EscapeError`] for a malformed escape.
    pub fn new(text: &str) -> Result<Self, EscapeError> {
        Self::with_options(text, ScannerOptions::default())
    }

    /// Creates a scanner over `text` as is.
    pub fn raw(text: &str) -> Self {
        Self::from_tape(CharTape::new(text))
    }

    /// Creates a scanner over `text` configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns an [`EscapeError`] for a malformed escape when
    /// [`ScannerOptions::resolve_unicode_escapes`] is set.
    pub fn with_options(text: &str, options: ScannerOptions) -> Result<Self, EscapeError> {
        if !options.resolve_unicode_escapes {
            return Ok(Self::raw(text));
        }
        let resolved = resolve_unicode_escapes(text).inspect_err(|err| {
            debug!(%err, "rejecting scanner input");
        })?;
        Ok(Self::from_tape(CharTape::new(resolved.as_ref())))
    }

    /// Creates a scanner over `bytes`, decoding them as UTF-8 and replacing
    /// invalid sequences with U+FFFD.
    ///
    /// # Errors
    ///
    /// See [`with_options`](Self::with_options).
    pub fn from_bytes(bytes: &[u8], options: ScannerOptions) -> Result<Self, EscapeError> {
        Self::with_options(&bytes.to_str_lossy(), options)
    }

    /// Creates a scanner over the contents of the file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read and
    /// [`Error::Escape`] for a malformed escape.
    pub fn from_path(path: impl AsRef<Path>, options: ScannerOptions) -> Result<Self, Error> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).inspect_err(|err| {
            debug!(path = %path.display(), %err, "failed to read scanner input");
        })?;
        Ok(Self::from_bytes(&bytes, options)?)
    }

    /// The whole decoded input.
    pub fn text(&self) -> &str {
        self.tape().as_str()
    }

    /// The current window.
    pub fn window(&self) -> &str {
        self.consumption()
    }

    /// Input from the window end on.
    pub fn remainder(&self) -> &str {
        &self.text()[self.cursor().end()..]
    }

    /// The character right after the window, if any.
    pub fn peek_char(&self) -> Option<char> {
        self.remainder().chars().next()
    }

    /// Extends the window by `len` bytes, one character at a time.
    fn advance_by(&mut self, len: usize) -> bool {
        let target = self.cursor().end() + len;
        while self.cursor().end() < target {
            if !self.next() {
                return false;
            }
        }
        true
    }

    /// Extends the window by any one character.
    pub fn next_character(&mut self) -> bool {
        self.next()
    }

    /// Extends the window by one character if it is `expected`.
    pub fn next_character_eq(&mut self, expected: char) -> bool {
        match self.peek_char() {
            Some(ch) if ch == expected => self.next(),
            _ => false,
        }
    }

    /// Extends the window by the first of `candidates` found next.
    pub fn next_character_alternation(&mut self, candidates: &[char]) -> bool {
        candidates.iter().any(|&ch| self.next_character_eq(ch))
    }

    /// Extends the window over all of `sequence`, or not at all.
    pub fn next_character_concatenation(&mut self, sequence: &[char]) -> bool {
        self.attempt_if(|s| sequence.iter().all(|&ch| s.next_character_eq(ch)))
    }

    /// Extends the window over `expected`, or not at all.
    pub fn next_string(&mut self, expected: &str) -> bool {
        self.attempt_if(|s| expected.chars().all(|ch| s.next_character_eq(ch)))
    }

    /// Extends the window over the first of `candidates` found next.
    pub fn next_string_alternation(&mut self, candidates: &[&str]) -> bool {
        candidates.iter().any(|candidate| self.next_string(candidate))
    }

    /// Extends the window over all of `sequence` in order, or not at all.
    pub fn next_string_concatenation(&mut self, sequence: &[&str]) -> bool {
        self.attempt_if(|s| sequence.iter().all(|part| s.next_string(part)))
    }

    /// Extends the window over a match of `pattern` starting exactly at the
    /// window end. Leaves the cursor alone if there is none.
    pub fn next_regex(&mut self, pattern: &Pattern) -> bool {
        match pattern.match_len(self.remainder()) {
            Some(len) => self.advance_by(len),
            None => false,
        }
    }

    /// Like [`next_regex`](Self::next_regex), then hands the match to
    /// `on_match`. The captures borrow cannot outlive the callback.
    pub fn next_regex_with(
        &mut self,
        pattern: &Pattern,
        on_match: impl FnOnce(&Captures<'_>),
    ) -> bool {
        let text = Arc::clone(&self.tape().text);
        let Some(captures) = pattern.regex.captures(&text[self.cursor().end()..]) else {
            return false;
        };
        let len = captures.get(0).map_or(0, |m| m.end());
        if !self.advance_by(len) {
            return false;
        }
        on_match(&captures);
        true
    }

    /// Extends the window over the first of `patterns` that matches.
    pub fn next_regex_alternation(&mut self, patterns: &[&Pattern]) -> bool {
        patterns.iter().any(|pattern| self.next_regex(pattern))
    }

    /// Extends the window over consecutive matches of all `patterns`, or not
    /// at all.
    pub fn next_regex_concatenation(&mut self, patterns: &[&Pattern]) -> bool {
        self.attempt_if(|s| patterns.iter().all(|pattern| s.next_regex(pattern)))
    }

    probes! {
        /// Whether [`next_character`](Self::next_character) would succeed.
        test_next_character => next_character();
        /// Whether [`next_character_eq`](Self::next_character_eq) would succeed.
        test_next_character_eq => next_character_eq(expected: char);
        /// Whether [`next_character_alternation`](Self::next_character_alternation) would succeed.
        test_next_character_alternation => next_character_alternation(candidates: &[char]);
        /// Whether [`next_character_concatenation`](Self::next_character_concatenation) would succeed.
        test_next_character_concatenation => next_character_concatenation(sequence: &[char]);
        /// Whether [`next_string`](Self::next_string) would succeed.
        test_next_string => next_string(expected: &str);
        /// Whether [`next_string_alternation`](Self::next_string_alternation) would succeed.
        test_next_string_alternation => next_string_alternation(candidates: &[&str]);
        /// Whether [`next_string_concatenation`](Self::next_string_concatenation) would succeed.
        test_next_string_concatenation => next_string_concatenation(sequence: &[&str]);
        /// Whether [`next_regex`](Self::next_regex) would succeed.
        test_next_regex => next_regex(pattern: &Pattern);
        /// Whether [`next_regex_with`](Self::next_regex_with) would succeed.
        /// `on_match` still sees the match.
        test_next_regex_with => next_regex_with(pattern: &Pattern, on_match: impl FnOnce(&Captures<'_>));
        /// Whether [`next_regex_alternation`](Self::next_regex_alternation) would succeed.
        test_next_regex_alternation => next_regex_alternation(patterns: &[&Pattern]);
        /// Whether [`next_regex_concatenation`](Self::next_regex_concatenation) would succeed.
        test_next_regex_concatenation => next_regex_concatenation(patterns: &[&Pattern]);
    }
}
