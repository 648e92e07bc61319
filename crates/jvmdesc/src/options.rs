/// Configuration applied when a [`CharScanner`](crate::CharScanner) is
/// constructed.
///
/// # Examples
///
/// ```rust
/// use jvmdesc::{CharScanner, ScannerOptions};
///
/// let options = ScannerOptions {
///     resolve_unicode_escapes: false,
/// };
/// let scanner = CharScanner::with_options(r"I", options).unwrap();
/// assert_eq!(scanner.text(), r"I");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerOptions {
    /// Whether to replace `\uXXXX` escapes with the characters they denote
    /// before any scanning happens.
    ///
    /// Escapes follow the Java lexical rule: one or more `u` after a
    /// backslash that is not itself escaped, then exactly four hex digits.
    /// Two escapes forming a UTF-16 surrogate pair decode to one character.
    ///
    /// # Default
    ///
    /// `true`
    pub resolve_unicode_escapes: bool,
}

impl Default for ScannerOptions {
    fn default() -> Self {
        Self {
            resolve_unicode_escapes: true,
        }
    }
}

/// Configuration for the text-level `parse_*_str` entry points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Options for the scanner built over the input text.
    pub scanner: ScannerOptions,

    /// Whether input may continue after a complete value.
    ///
    /// When `false`, anything left over is reported as a grammar error
    /// expecting end of input.
    ///
    /// # Default
    ///
    /// `false`
    pub allow_trailing_input: bool,
}
