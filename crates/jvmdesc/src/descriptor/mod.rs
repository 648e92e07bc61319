//! Immutable values for the descriptor grammar's nonterminals.
//!
//! Every node renders two ways through [`Descriptor`]:
//!
//! | node                      | internal form          | external form             |
//! |---------------------------|------------------------|---------------------------|
//! | `ClassName`               | `java/lang/String`     | `java.lang.String`        |
//! | `BaseType`                | `I`                    | `int`                     |
//! | `ObjectType`              | `Ljava/lang/String;`   | `java.lang.String`        |
//! | `ArrayType`               | `[[I`                  | `int[][]`                 |
//! | `ReturnDescriptor::Void`  | `V`                    | `void`                    |
//! | `MethodDescriptor`        | `(IJ)Ljava/lang/String;` | `java.lang.String(int,long)` |
//!
//! `Display` writes the internal form; the alternate flag (`{:#}`) writes the
//! external form.
//!
//! Nodes are cheap to clone: class names and array components sit behind
//! `Arc`, so clones and rewritten trees share their unchanged parts.
use core::fmt;

mod base_type;
mod class_name;
mod field_type;
mod method;

pub use base_type::BaseType;
pub use class_name::ClassName;
pub use field_type::{ArrayType, ComponentType, FieldDescriptor, FieldType, ObjectType, ParameterDescriptor};
pub use method::{MethodDescriptor, ReturnDescriptor};

/// Rendering shared by all descriptor nodes.
pub trait Descriptor {
    /// Writes the exact descriptor syntax.
    fn write_internal_form(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    /// Writes the dotted, human-readable form.
    fn write_external_form(&self, out: &mut dyn fmt::Write) -> fmt::Result;

    fn to_internal_form(&self) -> String {
        let mut out = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_internal_form(&mut out);
        out
    }

    fn to_external_form(&self) -> String {
        let mut out = String::new();
        let _ = self.write_external_form(&mut out);
        out
    }
}

impl Descriptor for ClassName {
    fn write_internal_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(self.as_internal())
    }

    fn write_external_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        let mut segments = self.as_internal().split('/');
        if let Some(first) = segments.next() {
            out.write_str(first)?;
        }
        for segment in segments {
            out.write_char('.')?;
            out.write_str(segment)?;
        }
        Ok(())
    }
}

impl Descriptor for BaseType {
    fn write_internal_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_char(self.term_code())
    }

    fn write_external_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_str(self.type_name())
    }
}

impl Descriptor for ObjectType {
    fn write_internal_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_char('L')?;
        self.class_name().write_internal_form(out)?;
        out.write_char(';')
    }

    fn write_external_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.class_name().write_external_form(out)
    }
}

impl Descriptor for ArrayType {
    fn write_internal_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        for _ in 0..self.dimensions() {
            out.write_char('[')?;
        }
        self.element_type().write_internal_form(out)
    }

    fn write_external_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.element_type().write_external_form(out)?;
        for _ in 0..self.dimensions() {
            out.write_str("[]")?;
        }
        Ok(())
    }
}

impl Descriptor for FieldType {
    fn write_internal_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Self::Base(base) => base.write_internal_form(out),
            Self::Object(object) => object.write_internal_form(out),
            Self::Array(array) => array.write_internal_form(out),
        }
    }

    fn write_external_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Self::Base(base) => base.write_external_form(out),
            Self::Object(object) => object.write_external_form(out),
            Self::Array(array) => array.write_external_form(out),
        }
    }
}

impl Descriptor for ReturnDescriptor {
    fn write_internal_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Self::Field(field) => field.write_internal_form(out),
            Self::Void => out.write_char('V'),
        }
    }

    fn write_external_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        match self {
            Self::Field(field) => field.write_external_form(out),
            Self::Void => out.write_str("void"),
        }
    }
}

impl Descriptor for MethodDescriptor {
    fn write_internal_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        out.write_char('(')?;
        for parameter in self.parameters() {
            parameter.write_internal_form(out)?;
        }
        out.write_char(')')?;
        self.return_type().write_internal_form(out)
    }

    fn write_external_form(&self, out: &mut dyn fmt::Write) -> fmt::Result {
        self.return_type().write_external_form(out)?;
        out.write_char('(')?;
        for (i, parameter) in self.parameters().iter().enumerate() {
            if i > 0 {
                out.write_char(',')?;
            }
            parameter.write_external_form(out)?;
        }
        out.write_char(')')
    }
}

macro_rules! impl_display {
    ($($ty:ty),* $(,)?) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    if f.alternate() {
                        self.write_external_form(f)
                    } else {
                        self.write_internal_form(f)
                    }
                }
            }
        )*
    };
}

impl_display!(
    ClassName,
    BaseType,
    ObjectType,
    ArrayType,
    FieldType,
    ReturnDescriptor,
    MethodDescriptor,
);

#[cfg(test)]
mod tests {
    use std::num::NonZeroUsize;

    use rstest::rstest;

    use super::*;

    fn string() -> FieldType {
        FieldType::object(ClassName::from_internal("java/lang/String").unwrap())
    }

    #[rstest]
    #[case(BaseType::Boolean.into(), "Z", "boolean")]
    #[case(string(), "Ljava/lang/String;", "java.lang.String")]
    #[case(FieldType::array_of(BaseType::Int), "[I", "int[]")]
    #[case(FieldType::array_of(string()), "[Ljava/lang/String;", "java.lang.String[]")]
    #[case(
        ArrayType::with_dimensions(BaseType::Double, NonZeroUsize::new(3).unwrap()).into(),
        "[[[D",
        "double[][][]"
    )]
    fn field_type_forms(#[case] field: FieldType, #[case] internal: &str, #[case] external: &str) {
        assert_eq!(field.to_internal_form(), internal);
        assert_eq!(field.to_external_form(), external);
        assert_eq!(format!("{field}"), internal);
        assert_eq!(format!("{field:#}"), external);
    }

    #[test]
    fn method_forms() {
        let method = MethodDescriptor::new(
            vec![FieldType::from(BaseType::Int), FieldType::from(BaseType::Long)],
            string().into(),
        );
        assert_eq!(method.to_internal_form(), "(IJ)Ljava/lang/String;");
        assert_eq!(method.to_external_form(), "java.lang.String(int,long)");

        let nothing = MethodDescriptor::new(Vec::<FieldType>::new(), ReturnDescriptor::Void);
        assert_eq!(nothing.to_internal_form(), "()V");
        assert_eq!(nothing.to_external_form(), "void()");
    }

    #[test]
    fn class_name_in_unnamed_package() {
        let name = ClassName::from_internal("Foo").unwrap();
        assert_eq!(name.to_external_form(), "Foo");
        assert_eq!(format!("{name:#}"), "Foo");
    }
}
