use std::sync::Arc;

use super::FieldType;

/// A method's return type: a field type or `V`.
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ReturnDescriptor {
    Field(FieldType),
    /// `V`. Only valid as a return type.
    Void,
}

impl ReturnDescriptor {
    #[must_use]
    pub fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    #[must_use]
    pub fn as_field(&self) -> Option<&FieldType> {
        match self {
            Self::Field(field) => Some(field),
            Self::Void => None,
        }
    }
}

impl From<FieldType> for ReturnDescriptor {
    fn from(field: FieldType) -> Self {
        Self::Field(field)
    }
}

/// `(` *ParameterDescriptor** `)` *ReturnDescriptor*
#[cfg_attr(any(test, feature = "serde"), derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MethodDescriptor {
    parameters: Arc<[FieldType]>,
    return_type: ReturnDescriptor,
}

impl MethodDescriptor {
    pub fn new(parameters: impl Into<Arc<[FieldType]>>, return_type: ReturnDescriptor) -> Self {
        Self {
            parameters: parameters.into(),
            return_type,
        }
    }

    /// Parameters in declaration order.
    #[must_use]
    pub fn parameters(&self) -> &[FieldType] {
        &self.parameters
    }

    #[must_use]
    pub fn return_type(&self) -> &ReturnDescriptor {
        &self.return_type
    }

    /// Local-variable slots taken by the parameters, not counting `this`.
    #[must_use]
    pub fn parameter_slots(&self) -> usize {
        self.parameters.iter().map(FieldType::slots).sum()
    }
}
