//! Member schema of a target type.
//!
//! A type's schema is the ordered list of [`MemberDescriptor`]s produced by
//! its [`FitType::describe`] implementation, normally generated by
//! [`fit_type!`](crate::fit_type). Descriptors depend only on the static shape
//! of the type, so callers may cache them freely.

use std::any;

use serde::Serialize;

use crate::{coerce::FitType, pattern::NamingPattern};

/// Shape of a member type as far as matching is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberKind {
    /// Read from a single text value.
    Scalar,
    /// Built member-by-member from a sub-record.
    Nested,
    /// Built element-by-element from index groups.
    Collection,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberDescriptor {
    pub name: &'static str,
    pub type_name: &'static str,
    pub kind: MemberKind,
    pub pattern: NamingPattern,
}

impl MemberDescriptor {
    pub fn implicit<M: FitType>(name: &'static str) -> Self {
        Self::with_pattern::<M>(name, NamingPattern::implicit(name))
    }

    pub fn prefixed<M: FitType>(name: &'static str, annotation: &str) -> Self {
        Self::with_pattern::<M>(name, NamingPattern::prefix(annotation))
    }

    pub fn with_pattern<M: FitType>(name: &'static str, pattern: NamingPattern) -> Self {
        Self {
            name,
            type_name: any::type_name::<M>(),
            kind: M::KIND,
            pattern,
        }
    }

    pub fn is_collection(&self) -> bool {
        self.kind == MemberKind::Collection
    }
}

/// Ordered member descriptors of `T`.
pub fn describe<T: FitType>() -> Vec<MemberDescriptor> {
    T::describe()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn descriptor_kind_follows_member_type() {
        let scalar = MemberDescriptor::implicit::<u32>("Place");
        assert_eq!(scalar.kind, MemberKind::Scalar);
        assert_eq!(scalar.pattern, NamingPattern::implicit("place"));
        assert_eq!(scalar.type_name, "u32");

        let collection = MemberDescriptor::prefixed::<Vec<String>>("names", "name*");
        assert!(collection.is_collection());
        assert!(collection.pattern.is_wildcard());
    }

    #[test]
    fn scalar_types_describe_no_members() {
        assert!(describe::<String>().is_empty());
        assert!(describe::<Vec<i64>>().is_empty());
    }
}
