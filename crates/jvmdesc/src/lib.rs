//! Parsing JVM field and method descriptors over a checkpointing scanner.
//!
//! The crate has three layers:
//!
//! - [`scanner`]: a cursor over immutable input with a `[begin, end)` window,
//!   one-unit lookahead, speculative rollback and regex matching anchored at
//!   the window end.
//! - [`grammar`]: a recursive-descent parser with a `can_parse_x` /
//!   `parse_x` pair for every nonterminal of the descriptor grammar.
//! - [`descriptor`]: immutable values with internal (`[Ljava/lang/String;`)
//!   and external (`java.lang.String[]`) renderings, plus
//!   [`ExcludePackageName`] for dropping a package from class names.
//!
//! ```rust
//! use jvmdesc::{Descriptor, ExcludePackageName, MethodDescriptor};
//!
//! let method: MethodDescriptor = "(I[Ljava/lang/String;)Ljava/util/List;".parse().unwrap();
//! assert_eq!(method.parameters().len(), 2);
//! assert_eq!(
//!     method.exclude_default_package().to_external_form(),
//!     "java.util.List(int,String[])"
//! );
//! ```
#![allow(missing_docs)]

mod error;
mod escape_buffer;
mod exclude;
mod options;

pub mod descriptor;
pub mod grammar;
pub mod scanner;

#[cfg(test)]
mod tests;

pub use descriptor::{
    ArrayType, BaseType, ClassName, ComponentType, Descriptor, FieldDescriptor, FieldType,
    MethodDescriptor, ObjectType, ParameterDescriptor, ReturnDescriptor,
};
pub use error::{Error, EscapeError, GrammarError, Nonterminal, RangeError};
pub use escape_buffer::resolve_unicode_escapes;
pub use exclude::{DEFAULT_EXCLUDED_PACKAGE, ExcludePackageName};
pub use grammar::text::*;
pub use options::{ParseOptions, ScannerOptions};
pub use scanner::{CharScanner, CharTape, Checkpoint, Cursor, Pattern, Scanner, Speculation, Tape};
