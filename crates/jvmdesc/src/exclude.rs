//! Rewriting class names in a package to their simple names.
//!
//! The rewrite is persistent: a node with nothing to rewrite comes back as
//! `Cow::Borrowed(self)`, the very same reference, and a node that changed is
//! rebuilt only along the path to the changed class names. Untouched siblings
//! inside a rebuilt node are `Arc` clones of the originals.
//!
//! Matching looks at exactly one package level: `java/util/Map$Entry` is in
//! package `java.util`, and the enclosing type `java.util.Map` is never treated
//! as a package.
use std::borrow::Cow;

use crate::descriptor::{
    ArrayType, BaseType, ClassName, FieldType, MethodDescriptor, ObjectType, ReturnDescriptor,
};

/// Package dropped by [`ExcludePackageName::exclude_default_package`].
pub const DEFAULT_EXCLUDED_PACKAGE: &str = "java.lang";

/// Structure-sharing package exclusion.
pub trait ExcludePackageName: Clone {
    /// Returns `self` with every class name directly in `package` replaced by
    /// its simple name.
    ///
    /// `package` is dotted (`java.lang`); `/` separators are accepted too.
    fn exclude_package_name(&self, package: &str) -> Cow<'_, Self>;

    /// [`exclude_package_name`](Self::exclude_package_name) with
    /// [`DEFAULT_EXCLUDED_PACKAGE`].
    fn exclude_default_package(&self) -> Cow<'_, Self> {
        self.exclude_package_name(DEFAULT_EXCLUDED_PACKAGE)
    }
}

fn is_package(internal: &str, package: &str) -> bool {
    internal.len() == package.len()
        && internal
            .bytes()
            .zip(package.bytes())
            .all(|(a, b)| a == b || (a == b'/' && b == b'.'))
}

impl ExcludePackageName for ClassName {
    fn exclude_package_name(&self, package: &str) -> Cow<'_, Self> {
        match self.package() {
            Some(own) if is_package(own, package) => {
                Cow::Owned(ClassName::new_unchecked(self.simple_name()))
            }
            _ => Cow::Borrowed(self),
        }
    }
}

impl ExcludePackageName for BaseType {
    fn exclude_package_name(&self, _package: &str) -> Cow<'_, Self> {
        Cow::Borrowed(self)
    }
}

impl ExcludePackageName for ObjectType {
    fn exclude_package_name(&self, package: &str) -> Cow<'_, Self> {
        match self.class_name().exclude_package_name(package) {
            Cow::Borrowed(_) => Cow::Borrowed(self),
            Cow::Owned(class_name) => Cow::Owned(ObjectType::new(class_name)),
        }
    }
}

impl ExcludePackageName for ArrayType {
    fn exclude_package_name(&self, package: &str) -> Cow<'_, Self> {
        match self.element_type().exclude_package_name(package) {
            Cow::Borrowed(_) => Cow::Borrowed(self),
            Cow::Owned(element) => Cow::Owned(ArrayType::with_dimensions(element, self.rank())),
        }
    }
}

impl ExcludePackageName for FieldType {
    fn exclude_package_name(&self, package: &str) -> Cow<'_, Self> {
        let rewritten = match self {
            Self::Base(_) => None,
            Self::Object(object) => owned(object.exclude_package_name(package)).map(Self::Object),
            Self::Array(array) => owned(array.exclude_package_name(package)).map(Self::Array),
        };
        rewritten.map_or(Cow::Borrowed(self), Cow::Owned)
    }
}

impl ExcludePackageName for ReturnDescriptor {
    fn exclude_package_name(&self, package: &str) -> Cow<'_, Self> {
        match self {
            Self::Field(field) => match field.exclude_package_name(package) {
                Cow::Borrowed(_) => Cow::Borrowed(self),
                Cow::Owned(field) => Cow::Owned(Self::Field(field)),
            },
            Self::Void => Cow::Borrowed(self),
        }
    }
}

impl ExcludePackageName for MethodDescriptor {
    fn exclude_package_name(&self, package: &str) -> Cow<'_, Self> {
        let parameters: Vec<Cow<'_, FieldType>> = self
            .parameters()
            .iter()
            .map(|parameter| parameter.exclude_package_name(package))
            .collect();
        let return_type = self.return_type().exclude_package_name(package);

        let unchanged = parameters.iter().all(|p| matches!(p, Cow::Borrowed(_)))
            && matches!(return_type, Cow::Borrowed(_));
        if unchanged {
            return Cow::Borrowed(self);
        }
        let parameters: Vec<FieldType> = parameters.into_iter().map(Cow::into_owned).collect();
        Cow::Owned(MethodDescriptor::new(parameters, return_type.into_owned()))
    }
}

fn owned<T: Clone>(value: Cow<'_, T>) -> Option<T> {
    match value {
        Cow::Borrowed(_) => None,
        Cow::Owned(value) => Some(value),
    }
}
