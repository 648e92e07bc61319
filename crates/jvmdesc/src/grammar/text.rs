//! Whole-input entry points.
//!
//! These build a [`CharScanner`] over a string, parse one value and, unless
//! [`ParseOptions::allow_trailing_input`] is set, require that nothing is
//! left over. `can_parse_*_str` answers the same question without building
//! a value and agrees with `parse_*_str` on every input.
use core::str::FromStr;

use super::{patterns, reject};
use crate::{
    descriptor::{
        ArrayType, BaseType, ClassName, FieldType, MethodDescriptor, ObjectType, ReturnDescriptor,
    },
    error::{Error, GrammarError, Nonterminal},
    options::ParseOptions,
    scanner::CharScanner,
};

/// A node that can be parsed from descriptor text.
pub trait Parse: Sized {
    /// Parses one value at the scanner's window end. See the
    /// [module docs](crate::grammar) for cursor behavior.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] if the input does not start with a value.
    fn parse(scanner: &mut CharScanner) -> Result<Self, GrammarError>;

    /// Advances over one value without building it. Leaves the cursor alone
    /// on failure.
    fn recognize(scanner: &mut CharScanner) -> bool;

    /// Whether [`parse`](Self::parse) would succeed. Never moves the cursor.
    fn can_parse(scanner: &mut CharScanner) -> bool {
        scanner.probe(Self::recognize)
    }

    /// Parses all of `text` with default options.
    ///
    /// # Errors
    ///
    /// See [`parse_str_with`](Self::parse_str_with).
    fn parse_str(text: &str) -> Result<Self, Error> {
        Self::parse_str_with(text, ParseOptions::default())
    }

    /// Parses `text` configured by `options`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Escape`] for a malformed unicode escape and
    /// [`Error::Grammar`] if `text` is not a value of this type. Leftover
    /// input is reported as expecting [`Nonterminal::EndOfInput`].
    fn parse_str_with(text: &str, options: ParseOptions) -> Result<Self, Error> {
        let mut scanner = CharScanner::with_options(text, options.scanner)?;
        let value = Self::parse(&mut scanner)?;
        if !options.allow_trailing_input && !scanner.is_at_end() {
            let offset = scanner.cursor().end();
            return Err(reject(&scanner, offset, Nonterminal::EndOfInput).into());
        }
        scanner.consume();
        Ok(value)
    }

    /// Whether [`parse_str`](Self::parse_str) would succeed on `text`.
    fn can_parse_str(text: &str) -> bool {
        Self::can_parse_str_with(text, ParseOptions::default())
    }

    /// Whether [`parse_str_with`](Self::parse_str_with) would succeed.
    fn can_parse_str_with(text: &str, options: ParseOptions) -> bool {
        let Ok(mut scanner) = CharScanner::with_options(text, options.scanner) else {
            return false;
        };
        scanner.probe(|s| {
            Self::recognize(s) && (options.allow_trailing_input || s.is_at_end())
        })
    }
}

impl Parse for ClassName {
    fn parse(scanner: &mut CharScanner) -> Result<Self, GrammarError> {
        super::parse_class_name(scanner)
    }

    fn recognize(scanner: &mut CharScanner) -> bool {
        scanner.next_regex(&patterns::CLASS_NAME)
    }
}

impl Parse for BaseType {
    fn parse(scanner: &mut CharScanner) -> Result<Self, GrammarError> {
        super::parse_base_type(scanner)
    }

    fn recognize(scanner: &mut CharScanner) -> bool {
        scanner.next_character_alternation(&BaseType::TERM_CODES)
    }
}

impl Parse for ObjectType {
    fn parse(scanner: &mut CharScanner) -> Result<Self, GrammarError> {
        super::parse_object_type(scanner)
    }

    fn recognize(scanner: &mut CharScanner) -> bool {
        scanner.next_regex(&patterns::OBJECT_TYPE)
    }
}

impl Parse for ArrayType {
    fn parse(scanner: &mut CharScanner) -> Result<Self, GrammarError> {
        super::parse_array_type(scanner)
    }

    fn recognize(scanner: &mut CharScanner) -> bool {
        scanner.next_regex(&patterns::ARRAY_TYPE)
    }
}

impl Parse for FieldType {
    fn parse(scanner: &mut CharScanner) -> Result<Self, GrammarError> {
        super::parse_field_type(scanner)
    }

    fn recognize(scanner: &mut CharScanner) -> bool {
        scanner.next_regex(&patterns::FIELD_TYPE)
    }
}

impl Parse for ReturnDescriptor {
    fn parse(scanner: &mut CharScanner) -> Result<Self, GrammarError> {
        super::parse_return_descriptor(scanner)
    }

    fn recognize(scanner: &mut CharScanner) -> bool {
        scanner.next_regex(&patterns::RETURN_DESCRIPTOR)
    }
}

impl Parse for MethodDescriptor {
    fn parse(scanner: &mut CharScanner) -> Result<Self, GrammarError> {
        super::parse_method_descriptor(scanner)
    }

    fn recognize(scanner: &mut CharScanner) -> bool {
        scanner.next_regex(&patterns::METHOD_DESCRIPTOR)
    }
}

macro_rules! impl_from_str {
    ($($ty:ty),* $(,)?) => {
        $(
            impl FromStr for $ty {
                type Err = Error;

                fn from_str(s: &str) -> Result<Self, Self::Err> {
                    <$ty as Parse>::parse_str(s)
                }
            }
        )*
    };
}

impl_from_str!(
    ClassName,
    BaseType,
    ObjectType,
    ArrayType,
    FieldType,
    ReturnDescriptor,
    MethodDescriptor,
);

/// Field types under another name: the same grammar, but errors name the
/// role the caller asked for.
fn parse_role(text: &str, role: Nonterminal) -> Result<FieldType, Error> {
    FieldType::parse_str(text).map_err(|err| match err {
        Error::Grammar(mut grammar) if grammar.expected == Nonterminal::FieldType => {
            grammar.expected = role;
            Error::Grammar(grammar)
        }
        other => other,
    })
}

macro_rules! text_entry_points {
    ($( $node:ty => $parse:ident, $can_parse:ident; )*) => {
        $(
            #[doc = concat!("Parses all of `text` as a `", stringify!($node), "`.")]
            ///
            /// # Errors
            ///
            /// See [`Parse::parse_str_with`].
            pub fn $parse(text: &str) -> Result<$node, Error> {
                <$node as Parse>::parse_str(text)
            }

            #[doc = concat!("Whether all of `text` is a `", stringify!($node), "`.")]
            pub fn $can_parse(text: &str) -> bool {
                <$node as Parse>::can_parse_str(text)
            }
        )*
    };
}

text_entry_points! {
    ClassName => parse_class_name_str, can_parse_class_name_str;
    BaseType => parse_base_type_str, can_parse_base_type_str;
    ObjectType => parse_object_type_str, can_parse_object_type_str;
    ArrayType => parse_array_type_str, can_parse_array_type_str;
    FieldType => parse_field_type_str, can_parse_field_type_str;
    ReturnDescriptor => parse_return_descriptor_str, can_parse_return_descriptor_str;
    MethodDescriptor => parse_method_descriptor_str, can_parse_method_descriptor_str;
}

/// Parses all of `text` as a field descriptor.
///
/// # Errors
///
/// See [`Parse::parse_str_with`].
pub fn parse_field_descriptor_str(text: &str) -> Result<FieldType, Error> {
    parse_role(text, Nonterminal::FieldDescriptor)
}

pub fn can_parse_field_descriptor_str(text: &str) -> bool {
    FieldType::can_parse_str(text)
}

/// Parses all of `text` as a parameter descriptor.
///
/// # Errors
///
/// See [`Parse::parse_str_with`].
pub fn parse_parameter_descriptor_str(text: &str) -> Result<FieldType, Error> {
    parse_role(text, Nonterminal::ParameterDescriptor)
}

pub fn can_parse_parameter_descriptor_str(text: &str) -> bool {
    FieldType::can_parse_str(text)
}

/// Parses all of `text` as an array component type.
///
/// # Errors
///
/// See [`Parse::parse_str_with`].
pub fn parse_component_type_str(text: &str) -> Result<FieldType, Error> {
    parse_role(text, Nonterminal::ComponentType)
}

pub fn can_parse_component_type_str(text: &str) -> bool {
    FieldType::can_parse_str(text)
}
