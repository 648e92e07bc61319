use std::sync::Arc;

use crate::{
    error::{GrammarError, Nonterminal},
    grammar::patterns,
};

/// A binary class name in internal form, e.g. `java/lang/String`.
///
/// The name is validated against the class-name grammar on construction and
/// never contains `.`. Clones share the same allocation.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    any(test, feature = "serde"),
    serde(try_from = "String", into = "String")
)]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClassName(Arc<str>);

impl ClassName {
    /// Builds a class name from its internal (`/`-separated) form.
    ///
    /// # Errors
    ///
    /// Returns a [`GrammarError`] unless all of `name` is a class name.
    pub fn from_internal(name: &str) -> Result<Self, GrammarError> {
        if patterns::CLASS_NAME.match_len(name) == Some(name.len()) {
            Ok(Self::new_unchecked(name))
        } else {
            Err(GrammarError::new(Nonterminal::ClassName, 0, name))
        }
    }

    /// Builds a class name from its external (`.`-separated) form.
    ///
    /// # Errors
    ///
    /// See [`from_internal`](Self::from_internal).
    pub fn from_external(name: &str) -> Result<Self, GrammarError> {
        if name.contains('/') {
            return Err(GrammarError::new(Nonterminal::ClassName, 0, name));
        }
        Self::from_internal(&name.replace('.', "/"))
    }

    pub(crate) fn new_unchecked(name: &str) -> Self {
        debug_assert!(!name.contains('.'));
        Self(Arc::from(name))
    }

    /// The internal form, e.g. `java/util/Map$Entry`.
    #[must_use]
    pub fn as_internal(&self) -> &str {
        &self.0
    }

    /// The package in internal form, `None` for the unnamed package.
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.0.rsplit_once('/').map(|(package, _)| package)
    }

    /// The last path segment, e.g. `Map$Entry` for `java/util/Map$Entry`.
    #[must_use]
    pub fn simple_name(&self) -> &str {
        self.0.rsplit_once('/').map_or(&*self.0, |(_, simple)| simple)
    }

    /// Whether `self` and `other` share one allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl TryFrom<String> for ClassName {
    type Error = GrammarError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_internal(&name)
    }
}

impl From<ClassName> for String {
    fn from(name: ClassName) -> Self {
        name.as_internal().to_owned()
    }
}

impl AsRef<str> for ClassName {
    fn as_ref(&self) -> &str {
        self.as_internal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts() {
        let name = ClassName::from_internal("java/util/Map$Entry").unwrap();
        assert_eq!(name.package(), Some("java/util"));
        assert_eq!(name.simple_name(), "Map$Entry");

        let bare = ClassName::from_internal("Foo").unwrap();
        assert_eq!(bare.package(), None);
        assert_eq!(bare.simple_name(), "Foo");
    }

    #[test]
    fn external_form_is_converted() {
        let name = ClassName::from_external("java.lang.String").unwrap();
        assert_eq!(name.as_internal(), "java/lang/String");
        assert!(ClassName::from_external("java/lang.String").is_err());
    }

    #[test]
    fn dots_and_empty_segments_are_rejected() {
        for bad in ["java.lang.String", "", "java//String", "java/", "/String", "1abc"] {
            let err = ClassName::from_internal(bad).unwrap_err();
            assert_eq!(err.expected, Nonterminal::ClassName, "{bad:?}");
        }
    }

    #[test]
    fn deserialization_goes_through_validation() {
        use serde::{
            Deserialize,
            de::{
                IntoDeserializer,
                value::{Error as DeError, StrDeserializer},
            },
        };

        let dotted: StrDeserializer<'_, DeError> = "java.lang.String".into_deserializer();
        assert!(ClassName::deserialize(dotted).is_err());

        let slashed: StrDeserializer<'_, DeError> = "java/lang/String".into_deserializer();
        let name = ClassName::deserialize(slashed).unwrap();
        assert_eq!(name.as_internal(), "java/lang/String");
        assert_eq!(name.package(), Some("java/lang"));
    }

    #[test]
    fn equality_is_by_value_and_clones_share() {
        let a = ClassName::from_internal("a/B").unwrap();
        let b = ClassName::from_internal("a/B").unwrap();
        assert_eq!(a, b);
        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }
}
