#![no_main]

use arbitrary::Arbitrary;
use jvmdesc::{
    ArrayType, BaseType, ClassName, Descriptor, ExcludePackageName, FieldType, MethodDescriptor,
    ObjectType, Parse, ParseOptions, ReturnDescriptor, ScannerOptions,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input<'a> {
    text: &'a str,
    resolve_unicode_escapes: bool,
    allow_trailing_input: bool,
    package: &'a str,
}

/// Probe and parse must agree, and whatever parses must render back to the
/// consumed text.
fn check<T: Parse + Descriptor>(input: &Input<'_>, options: ParseOptions) -> Option<T> {
    let probed = T::can_parse_str_with(input.text, options);
    let parsed = T::parse_str_with(input.text, options);
    assert_eq!(probed, parsed.is_ok(), "{:?}", input.text);

    let value = parsed.ok()?;
    if !options.allow_trailing_input {
        let rendered = value.to_internal_form();
        let reparsed = T::parse_str_with(&rendered, ParseOptions::default());
        assert!(reparsed.is_ok(), "{rendered:?} does not parse");
    }
    Some(value)
}

fuzz_target!(|input: Input<'_>| {
    let options = ParseOptions {
        scanner: ScannerOptions {
            resolve_unicode_escapes: input.resolve_unicode_escapes,
        },
        allow_trailing_input: input.allow_trailing_input,
    };

    check::<ClassName>(&input, options);
    check::<BaseType>(&input, options);
    check::<ObjectType>(&input, options);
    check::<ArrayType>(&input, options);
    check::<ReturnDescriptor>(&input, options);

    if let Some(field) = check::<FieldType>(&input, options) {
        let excluded = field.exclude_package_name(input.package);
        assert_eq!(excluded.dimensions(), field.dimensions());
    }
    if let Some(method) = check::<MethodDescriptor>(&input, options) {
        let excluded = method.exclude_package_name(input.package);
        assert_eq!(excluded.parameters().len(), method.parameters().len());
    }
});
