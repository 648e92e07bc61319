use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
    mem,
    num::NonZeroUsize,
    sync::Arc,
};

use super::{BaseType, ClassName};

/// `L` *ClassName* `;`
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectType {
    class_name: ClassName,
}

impl ObjectType {
    #[must_use]
    pub fn new(class_name: ClassName) -> Self {
        Self { class_name }
    }

    #[must_use]
    pub fn class_name(&self) -> &ClassName {
        &self.class_name
    }
}

/// `[` *ComponentType*
///
/// Multi-dimensional arrays are chains of single-dimension wrappers:
/// `[[I` is an array whose component is the array `[I`.
///
/// Comparison, hashing, `Debug` and drop walk the chain in a loop, so any
/// number of dimensions is safe. Serde impls nest once per dimension.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone)]
pub struct ArrayType {
    component: Arc<FieldType>,
}

impl ArrayType {
    pub fn new(component: impl Into<FieldType>) -> Self {
        Self {
            component: Arc::new(component.into()),
        }
    }

    /// Wraps `element` in `dimensions` array levels.
    pub fn with_dimensions(element: impl Into<FieldType>, dimensions: NonZeroUsize) -> Self {
        let mut array = Self::new(element);
        for _ in 1..dimensions.get() {
            array = Self::new(array);
        }
        array
    }

    #[must_use]
    pub fn component(&self) -> &FieldType {
        &self.component
    }

    #[cfg(test)]
    pub(crate) fn shared_component(&self) -> &Arc<FieldType> {
        &self.component
    }

    /// Number of array levels: one, plus the component's if it is an array.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        self.rank().get()
    }

    pub(crate) fn rank(&self) -> NonZeroUsize {
        let mut rank = NonZeroUsize::MIN;
        let mut component = self.component();
        while let FieldType::Array(inner) = component {
            rank = rank.saturating_add(1);
            component = inner.component();
        }
        rank
    }

    /// The innermost non-array type.
    #[must_use]
    pub fn element_type(&self) -> &FieldType {
        let mut component = self.component();
        while let FieldType::Array(inner) = component {
            component = inner.component();
        }
        component
    }
}

impl Drop for ArrayType {
    fn drop(&mut self) {
        let mut next = detach_array(&mut self.component);
        while let Some(mut array) = next {
            next = detach_array(&mut array.component);
        }
    }
}

/// Moves a uniquely owned array component out, leaving a leaf in its place.
fn detach_array(component: &mut Arc<FieldType>) -> Option<ArrayType> {
    let field = Arc::get_mut(component)?;
    if !matches!(field, FieldType::Array(_)) {
        return None;
    }
    match mem::replace(field, FieldType::Base(BaseType::Int)) {
        FieldType::Array(array) => Some(array),
        FieldType::Base(_) | FieldType::Object(_) => None,
    }
}

impl Ord for ArrayType {
    fn cmp(&self, other: &Self) -> Ordering {
        let (mut left, mut right) = (self, other);
        loop {
            if Arc::ptr_eq(&left.component, &right.component) {
                return Ordering::Equal;
            }
            match (left.component(), right.component()) {
                (FieldType::Array(l), FieldType::Array(r)) => (left, right) = (l, r),
                (l, r) => return l.cmp(r),
            }
        }
    }
}

impl PartialOrd for ArrayType {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for ArrayType {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for ArrayType {}

impl Hash for ArrayType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.dimensions().hash(state);
        self.element_type().hash(state);
    }
}

impl fmt::Debug for ArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayType")
            .field("dimensions", &self.dimensions())
            .field("element", self.element_type())
            .finish()
    }
}

/// A field type: base, object or array.
///
/// Also serves as field descriptor, parameter descriptor and array component
/// type; see the aliases below.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldType {
    Base(BaseType),
    Object(ObjectType),
    Array(ArrayType),
}

pub type FieldDescriptor = FieldType;
pub type ParameterDescriptor = FieldType;
pub type ComponentType = FieldType;

impl FieldType {
    /// Shorthand for an object type.
    #[must_use]
    pub fn object(class_name: ClassName) -> Self {
        Self::Object(ObjectType::new(class_name))
    }

    /// Shorthand for a one-dimensional array.
    pub fn array_of(component: impl Into<FieldType>) -> Self {
        Self::Array(ArrayType::new(component))
    }

    /// Array dimensions, zero for non-arrays.
    #[must_use]
    pub fn dimensions(&self) -> usize {
        match self {
            Self::Array(array) => array.dimensions(),
            Self::Base(_) | Self::Object(_) => 0,
        }
    }

    /// Local-variable slots taken by a value of this type.
    #[must_use]
    pub fn slots(&self) -> usize {
        match self {
            Self::Base(base) if base.is_wide() => 2,
            _ => 1,
        }
    }

    #[must_use]
    pub fn as_base(&self) -> Option<BaseType> {
        match self {
            Self::Base(base) => Some(*base),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectType> {
        match self {
            Self::Object(object) => Some(object),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&ArrayType> {
        match self {
            Self::Array(array) => Some(array),
            _ => None,
        }
    }
}

impl From<BaseType> for FieldType {
    fn from(base: BaseType) -> Self {
        Self::Base(base)
    }
}

impl From<ObjectType> for FieldType {
    fn from(object: ObjectType) -> Self {
        Self::Object(object)
    }
}

impl From<ArrayType> for FieldType {
    fn from(array: ArrayType) -> Self {
        Self::Array(array)
    }
}

impl From<ClassName> for FieldType {
    fn from(class_name: ClassName) -> Self {
        Self::object(class_name)
    }
}
