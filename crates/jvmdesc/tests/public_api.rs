#![expect(missing_docs)]

use std::{borrow::Cow, ops::Range, path::PathBuf};

use jvmdesc::{
    CharScanner, Descriptor, Error, ExcludePackageName, FieldType, MethodDescriptor, ObjectType,
    RangeError, Scanner, ScannerOptions, Tape, grammar,
};

struct TempFile(PathBuf);

impl TempFile {
    fn new(name: &str, contents: &[u8]) -> Self {
        let path = std::env::temp_dir().join(format!("jvmdesc-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).expect("write temp file");
        Self(path)
    }
}

impl Drop for TempFile {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.0);
    }
}

#[test]
fn scanner_from_file_parses_successive_descriptors() {
    let file = TempFile::new("descriptors.txt", b"(I)V\n[J");
    let mut scanner = CharScanner::from_path(&file.0, ScannerOptions::default()).unwrap();

    let method = grammar::parse_method_descriptor(&mut scanner).unwrap();
    assert_eq!(method.to_external_form(), "void(int)");
    let mut committed = String::new();
    assert!(scanner.consume_into(&mut committed));
    assert_eq!(committed, "(I)V");

    assert!(scanner.next_character_eq('\n'));
    assert!(scanner.skip());

    let field = grammar::parse_field_type(&mut scanner).unwrap();
    assert_eq!(field.to_external_form(), "long[]");
    assert!(scanner.is_at_end());
}

#[test]
fn missing_file_is_an_io_error() {
    let path = std::env::temp_dir().join("jvmdesc-definitely-missing/none.txt");
    let err = CharScanner::from_path(path, ScannerOptions::default()).unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}

#[test]
fn invalid_utf8_is_replaced() {
    let scanner = CharScanner::from_bytes(b"I\xFFJ", ScannerOptions::default()).unwrap();
    assert_eq!(scanner.text(), "I\u{FFFD}J");
}

#[test]
fn consumption_range_errors() {
    let scanner = CharScanner::raw("añb");
    assert_eq!(scanner.consumption_range(0, 3), Ok("añ"));
    assert_eq!(
        scanner.consumption_range(2, 1),
        Err(RangeError::Inverted { begin: 2, end: 1 })
    );
    assert_eq!(
        scanner.consumption_range(0, 9),
        Err(RangeError::OutOfBounds { begin: 0, end: 9, len: 4 })
    );
    assert_eq!(
        scanner.consumption_range(2, 3),
        Err(RangeError::NotCharBoundary { offset: 2 })
    );
}

#[test]
fn exclusion_keeps_unrelated_types_by_reference() {
    let list: ObjectType = "Ljava/util/List;".parse().unwrap();
    assert!(matches!(
        list.exclude_package_name("java.lang"),
        Cow::Borrowed(r) if std::ptr::eq(r, &list)
    ));

    let string: ObjectType = "Ljava/lang/String;".parse().unwrap();
    let excluded = string.exclude_package_name("java.lang");
    assert_eq!(excluded.class_name().as_internal(), "String");
}

#[test]
fn values_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<FieldType>();
    assert_send_sync::<MethodDescriptor>();
}

/// A tape of whitespace-separated words, showing that the checkpointing core
/// is independent of characters.
struct Words {
    text: String,
    bounds: Vec<Range<usize>>,
}

impl Words {
    fn new(text: &str) -> Self {
        let mut bounds = Vec::new();
        let mut start = None;
        for (i, ch) in text.char_indices().chain([(text.len(), ' ')]) {
            match (start, ch.is_whitespace()) {
                (None, false) => start = Some(i),
                (Some(s), true) => {
                    bounds.push(s..i);
                    start = None;
                }
                _ => {}
            }
        }
        Self {
            text: text.to_owned(),
            bounds,
        }
    }
}

impl Tape for Words {
    type Slice = [Range<usize>];
    type Sink = Vec<String>;

    fn len(&self) -> usize {
        self.bounds.len()
    }

    fn step(&self, at: usize) -> Option<usize> {
        (at < self.bounds.len()).then_some(at + 1)
    }

    fn slice(&self, range: Range<usize>) -> &[Range<usize>] {
        &self.bounds[range]
    }

    fn commit(&self, range: Range<usize>, sink: Option<&mut Vec<String>>) {
        if let Some(sink) = sink {
            sink.extend(self.bounds[range].iter().map(|b| self.text[b.clone()].to_owned()));
        }
    }
}

#[test]
fn custom_tape_commits_through_hook() {
    let mut scanner = Scanner::from_tape(Words::new("(I)V  [J Ljava/lang/Object;"));
    let mut sink = Vec::new();

    assert!(scanner.next());
    assert!(scanner.next());
    assert!(scanner.consume_into(&mut sink));
    assert_eq!(sink, ["(I)V", "[J"]);

    let handle = scanner.state_save();
    assert!(scanner.next());
    assert!(!scanner.next());
    assert!(scanner.state_load(handle));
    assert_eq!(scanner.cursor().end(), 2);
    assert!(scanner.test_next());
    assert_eq!(scanner.cursor().end(), 2);
    assert!(scanner.state_delete(handle));
    assert!(!scanner.state_load(handle));
}
