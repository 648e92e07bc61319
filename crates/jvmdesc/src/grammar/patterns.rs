//! Anchored recognizers for each nonterminal.
//!
//! The descriptor grammar is regular (arrays are a `[` prefix, never a
//! nesting), so each nonterminal has one pattern that recognizes exactly the
//! strings its parser accepts. Probes use these to look ahead in linear time.
use std::sync::LazyLock;

use crate::scanner::Pattern;

const IDENTIFIER: &str = r"[\p{XID_Start}_$][\p{XID_Continue}$]*";
const BASE_TYPE: &str = "[BCDFIJSZ]";

fn class_name() -> String {
    format!("{IDENTIFIER}(?:/{IDENTIFIER})*")
}

fn object_type() -> String {
    format!("L{};", class_name())
}

fn field_type() -> String {
    format!(r"\[*(?:{BASE_TYPE}|{})", object_type())
}

fn compile(source: &str) -> Pattern {
    Pattern::new(source).expect("descriptor patterns are valid")
}

pub(crate) static CLASS_NAME: LazyLock<Pattern> = LazyLock::new(|| compile(&class_name()));

pub(crate) static OBJECT_TYPE: LazyLock<Pattern> = LazyLock::new(|| compile(&object_type()));

pub(crate) static ARRAY_TYPE: LazyLock<Pattern> =
    LazyLock::new(|| compile(&format!(r"\[{}", field_type())));

pub(crate) static FIELD_TYPE: LazyLock<Pattern> = LazyLock::new(|| compile(&field_type()));

pub(crate) static RETURN_DESCRIPTOR: LazyLock<Pattern> =
    LazyLock::new(|| compile(&format!("{}|V", field_type())));

pub(crate) static METHOD_DESCRIPTOR: LazyLock<Pattern> = LazyLock::new(|| {
    let field = field_type();
    compile(&format!(r"\((?:{field})*\)(?:{field}|V)"))
});
