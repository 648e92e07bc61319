use std::hash::{BuildHasher, RandomState};

use rstest::rstest;

use crate::{
    ArrayType, BaseType, ClassName, Descriptor, ExcludePackageName, FieldType, MethodDescriptor,
    ObjectType, Parse, ParseOptions, ReturnDescriptor, ScannerOptions, parse_array_type_str,
    parse_field_type_str, parse_method_descriptor_str,
};

#[test]
fn array_dimensions_are_nested_wrappers() {
    let array = parse_array_type_str("[[[I").unwrap();
    assert_eq!(array.dimensions(), 3);

    let FieldType::Array(second) = array.component() else {
        panic!("expected a nested array");
    };
    let FieldType::Array(third) = second.component() else {
        panic!("expected a nested array");
    };
    assert_eq!(third.component(), &FieldType::Base(BaseType::Int));
}

#[test]
fn very_deep_arrays_compare_exclude_and_drop() {
    let depth = 100_000;
    let text = format!("{}Ljava/lang/String;", "[".repeat(depth));
    let field = parse_field_type_str(&text).unwrap();
    let again = parse_field_type_str(&text).unwrap();
    let shallower = parse_field_type_str(&text[1..]).unwrap();

    assert_eq!(field.dimensions(), depth);
    assert_eq!(field, again);
    assert!(shallower < field);
    let hasher = RandomState::new();
    assert_eq!(hasher.hash_one(&field), hasher.hash_one(&again));
    assert!(format!("{field:?}").contains("dimensions: 100000"));

    let excluded = field.exclude_default_package();
    assert_eq!(excluded.dimensions(), depth);
    assert!(excluded.to_internal_form().ends_with("[LString;"));
    assert!(excluded.to_external_form().starts_with("String[][]"));

    drop(excluded);
    drop(field);
    drop(again);
    drop(shallower);
}

#[rstest]
#[case("Ljava/lang/String;", "java.lang.String")]
#[case("[I", "int[]")]
#[case("Z", "boolean")]
#[case("[[Ljava/util/Map$Entry;", "java.util.Map$Entry[][]")]
#[case("LFoo;", "Foo")]
fn field_type_external_form(#[case] input: &str, #[case] external: &str) {
    let field = parse_field_type_str(input).unwrap();
    assert_eq!(field.to_external_form(), external);
    assert_eq!(field.to_internal_form(), input);
}

#[test]
fn method_descriptor_end_to_end() {
    let method = parse_method_descriptor_str("(IJ)Ljava/lang/String;").unwrap();
    assert_eq!(
        method.parameters(),
        [FieldType::Base(BaseType::Int), FieldType::Base(BaseType::Long)]
    );
    let string = ObjectType::new(ClassName::from_internal("java/lang/String").unwrap());
    assert_eq!(method.return_type(), &ReturnDescriptor::Field(string.into()));
    assert_eq!(method.to_external_form(), "java.lang.String(int,long)");
    assert_eq!(method.parameter_slots(), 3);
}

#[rstest]
#[case("()V", 0)]
#[case("(Ljava/lang/Object;)Z", 1)]
#[case("([B[[C)[S", 2)]
#[case("(DFJ)V", 3)]
fn method_parameter_counts(#[case] input: &str, #[case] count: usize) {
    let method: MethodDescriptor = input.parse().unwrap();
    assert_eq!(method.parameters().len(), count);
    assert_eq!(method.to_string(), input);
}

#[test]
fn every_base_type_parses_from_its_term_code() {
    for base in BaseType::ALL {
        let parsed: BaseType = base.term_code().to_string().parse().unwrap();
        assert_eq!(parsed, base);
    }
}

#[test]
fn unicode_escapes_are_resolved_before_parsing() {
    let escaped = format!("{}u004Cjava/lang/String;", '\\');
    let field = parse_field_type_str(&escaped).unwrap();
    assert_eq!(field.to_internal_form(), "Ljava/lang/String;");
}

#[test]
fn escapes_can_be_left_alone() {
    let escaped = format!("{}u0049", '\\');
    let options = ParseOptions {
        scanner: ScannerOptions {
            resolve_unicode_escapes: false,
        },
        ..ParseOptions::default()
    };
    assert!(FieldType::parse_str_with(&escaped, options).is_err());
    assert_eq!(FieldType::parse_str(&escaped).unwrap(), FieldType::Base(BaseType::Int));
}

#[test]
fn trailing_input_can_be_allowed() {
    let options = ParseOptions {
        allow_trailing_input: true,
        ..ParseOptions::default()
    };
    let array = ArrayType::parse_str_with("[J;garbage", options).unwrap();
    assert_eq!(array.to_external_form(), "long[]");
    assert!(ArrayType::can_parse_str_with("[J;garbage", options));
    assert!(!ArrayType::can_parse_str("[J;garbage"));
}

#[test]
fn non_ascii_identifiers() {
    let field = parse_field_type_str("Lcom/ejemplo/Niño$Año;").unwrap();
    assert_eq!(field.to_external_form(), "com.ejemplo.Niño$Año");
}
