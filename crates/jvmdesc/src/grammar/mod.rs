//! Recursive-descent parser for the descriptor grammar.
//!
//! ```text
//! ClassName           := Identifier ('/' Identifier)*
//! BaseType            := 'B' | 'C' | 'D' | 'F' | 'I' | 'J' | 'S' | 'Z'
//! ObjectType          := 'L' ClassName ';'
//! ComponentType       := FieldType
//! ArrayType           := '[' ComponentType
//! FieldType           := BaseType | ObjectType | ArrayType
//! FieldDescriptor     := FieldType
//! ParameterDescriptor := FieldType
//! ReturnDescriptor    := FieldType | 'V'
//! MethodDescriptor    := '(' ParameterDescriptor* ')' ReturnDescriptor
//! ```
//!
//! Each nonterminal `x` has a pair of functions over a [`CharScanner`]:
//!
//! - `can_parse_x` looks ahead and reports whether `parse_x` would succeed.
//!   It never moves the cursor.
//! - `parse_x` extends the scanner's window over one `x` and returns its
//!   value. On failure it returns a [`GrammarError`] and leaves the cursor
//!   where it was; there is no partial result.
//!
//! Text-level entry points that also require the whole input to be consumed
//! live in [`text`](self::text) and are re-exported at the crate root.
use std::num::NonZeroUsize;

use tracing::debug;

use crate::{
    descriptor::{
        ArrayType, BaseType, ClassName, ComponentType, FieldDescriptor, FieldType,
        MethodDescriptor, ObjectType, ParameterDescriptor, ReturnDescriptor,
    },
    error::{GrammarError, Nonterminal},
    scanner::CharScanner,
};

pub(crate) mod patterns;
pub mod text;

pub(crate) fn reject(s: &CharScanner, start: usize, expected: Nonterminal) -> GrammarError {
    let remainder = &s.text()[start..];
    debug!(%expected, offset = start, remainder, "grammar rejected input");
    GrammarError::new(expected, start, remainder)
}

fn relabel(mut error: GrammarError, expected: Nonterminal) -> GrammarError {
    error.expected = expected;
    error
}

/// Runs `f`, rolling the cursor back if it fails.
fn atomic<R>(
    s: &mut CharScanner,
    f: impl FnOnce(&mut CharScanner) -> Result<R, GrammarError>,
) -> Result<R, GrammarError> {
    let mut guard = s.speculate();
    let value = f(&mut *guard)?;
    guard.commit();
    Ok(value)
}

pub fn can_parse_class_name(s: &mut CharScanner) -> bool {
    s.test_next_regex(&patterns::CLASS_NAME)
}

pub fn parse_class_name(s: &mut CharScanner) -> Result<ClassName, GrammarError> {
    let start = s.cursor().end();
    let mut name = None;
    s.next_regex_with(&patterns::CLASS_NAME, |m| {
        name = Some(ClassName::new_unchecked(&m[0]));
    });
    name.ok_or_else(|| reject(s, start, Nonterminal::ClassName))
}

pub fn can_parse_base_type(s: &mut CharScanner) -> bool {
    s.test_next_character_alternation(&BaseType::TERM_CODES)
}

pub fn parse_base_type(s: &mut CharScanner) -> Result<BaseType, GrammarError> {
    let start = s.cursor().end();
    match s.peek_char().and_then(BaseType::from_term_code) {
        Some(base) if s.next_character_eq(base.term_code()) => Ok(base),
        _ => Err(reject(s, start, Nonterminal::BaseType)),
    }
}

pub fn can_parse_object_type(s: &mut CharScanner) -> bool {
    s.test_next_regex(&patterns::OBJECT_TYPE)
}

pub fn parse_object_type(s: &mut CharScanner) -> Result<ObjectType, GrammarError> {
    let start = s.cursor().end();
    atomic(s, |s| {
        if !s.next_character_eq('L') {
            return Err(reject(s, start, Nonterminal::ObjectType));
        }
        let class_name = parse_class_name(s)?;
        if !s.next_character_eq(';') {
            return Err(reject(s, start, Nonterminal::ObjectType));
        }
        Ok(ObjectType::new(class_name))
    })
}

pub fn can_parse_array_type(s: &mut CharScanner) -> bool {
    s.test_next_regex(&patterns::ARRAY_TYPE)
}

/// Parses `[`-prefixed types into a chain of single-dimension wrappers.
///
/// The prefix is counted in a loop rather than by recursion, so the stack
/// depth does not grow with the number of dimensions.
pub fn parse_array_type(s: &mut CharScanner) -> Result<ArrayType, GrammarError> {
    let start = s.cursor().end();
    atomic(s, |s| {
        let mut dimensions = 0;
        while s.next_character_eq('[') {
            dimensions += 1;
        }
        let Some(dimensions) = NonZeroUsize::new(dimensions) else {
            return Err(reject(s, start, Nonterminal::ArrayType));
        };
        let element = parse_component_type(s)?;
        Ok(ArrayType::with_dimensions(element, dimensions))
    })
}

pub fn can_parse_component_type(s: &mut CharScanner) -> bool {
    can_parse_field_type(s)
}

pub fn parse_component_type(s: &mut CharScanner) -> Result<ComponentType, GrammarError> {
    parse_field_type(s).map_err(|e| relabel(e, Nonterminal::ComponentType))
}

pub fn can_parse_field_type(s: &mut CharScanner) -> bool {
    s.test_next_regex(&patterns::FIELD_TYPE)
}

/// Tries base type, then object type, then array type. Each alternative is
/// probed before it is parsed.
pub fn parse_field_type(s: &mut CharScanner) -> Result<FieldType, GrammarError> {
    if can_parse_base_type(s) {
        return parse_base_type(s).map(FieldType::Base);
    }
    if can_parse_object_type(s) {
        return parse_object_type(s).map(FieldType::Object);
    }
    if can_parse_array_type(s) {
        return parse_array_type(s).map(FieldType::Array);
    }
    let start = s.cursor().end();
    Err(reject(s, start, Nonterminal::FieldType))
}

pub fn can_parse_field_descriptor(s: &mut CharScanner) -> bool {
    can_parse_field_type(s)
}

pub fn parse_field_descriptor(s: &mut CharScanner) -> Result<FieldDescriptor, GrammarError> {
    parse_field_type(s).map_err(|e| relabel(e, Nonterminal::FieldDescriptor))
}

pub fn can_parse_parameter_descriptor(s: &mut CharScanner) -> bool {
    can_parse_field_type(s)
}

pub fn parse_parameter_descriptor(
    s: &mut CharScanner,
) -> Result<ParameterDescriptor, GrammarError> {
    parse_field_type(s).map_err(|e| relabel(e, Nonterminal::ParameterDescriptor))
}

pub fn can_parse_return_descriptor(s: &mut CharScanner) -> bool {
    s.test_next_regex(&patterns::RETURN_DESCRIPTOR)
}

pub fn parse_return_descriptor(s: &mut CharScanner) -> Result<ReturnDescriptor, GrammarError> {
    if s.next_character_eq('V') {
        return Ok(ReturnDescriptor::Void);
    }
    parse_field_type(s)
        .map(ReturnDescriptor::Field)
        .map_err(|e| relabel(e, Nonterminal::ReturnDescriptor))
}

pub fn can_parse_method_descriptor(s: &mut CharScanner) -> bool {
    s.test_next_regex(&patterns::METHOD_DESCRIPTOR)
}

pub fn parse_method_descriptor(s: &mut CharScanner) -> Result<MethodDescriptor, GrammarError> {
    let start = s.cursor().end();
    atomic(s, |s| {
        if !s.next_character_eq('(') {
            return Err(reject(s, start, Nonterminal::MethodDescriptor));
        }
        let mut parameters = Vec::new();
        while !s.next_character_eq(')') {
            parameters.push(parse_parameter_descriptor(s)?);
        }
        let return_type = parse_return_descriptor(s)?;
        Ok(MethodDescriptor::new(parameters, return_type))
    })
}
