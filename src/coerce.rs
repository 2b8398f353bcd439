//! The coercion engine.
//!
//! [`coerce`] turns a [`FlatRecord`] into any [`FitType`]. A single-entry
//! record collapses straight into a scalar when the target has a text form;
//! everything else is built member by member through [`Fields`], recursing
//! into nested members and into every index group of a collection member.
//!
//! Dispatch is static: each target type states its shape through
//! [`FitType::KIND`] and its members through [`FitType::fit`], usually
//! generated by [`fit_type!`](crate::fit_type).

use std::{any, collections::VecDeque};

use log::{debug, trace};

use crate::{
    error::TypeFittingError,
    matcher::{self, ColumnPool},
    pattern::NamingPattern,
    record::FlatRecord,
    schema::{MemberDescriptor, MemberKind},
};

pub type Result<T> = std::result::Result<T, TypeFittingError>;

/// A type that can be fitted from a flat record.
pub trait FitType: Sized {
    const KIND: MemberKind = MemberKind::Nested;

    /// Parses the type from a single text value. `None` when the type has no
    /// text form.
    fn from_text(_raw: &str) -> Option<Result<Self>> {
        None
    }

    /// Member schema in declaration order.
    fn describe() -> Vec<MemberDescriptor> {
        Vec::new()
    }

    /// Builds the type from a record that did not collapse into a scalar.
    fn fit(fields: &mut Fields<'_>) -> Result<Self>;
}

/// Fits `record` into a fresh `T`.
pub fn coerce<T: FitType>(record: &FlatRecord) -> Result<T> {
    if let [entry] = record.entries() {
        if let Some(parsed) = T::from_text(&entry.value) {
            trace!(
                "Collapsed column '{}' into {}",
                entry.key,
                any::type_name::<T>()
            );
            return parsed;
        }
    }
    let mut fields = Fields::new(record);
    let fitted = T::fit(&mut fields)?;
    if T::KIND == MemberKind::Nested && fields.remaining() > 0 {
        debug!(
            "{} left {} column(s) unused: {:?}",
            any::type_name::<T>(),
            fields.remaining(),
            fields.pool.unconsumed_keys()
        );
    }
    Ok(fitted)
}

/// Like [`coerce`], but reports any fitting failure as `None`.
pub fn try_coerce<T: FitType>(record: &FlatRecord) -> Option<T> {
    match coerce(record) {
        Ok(value) => Some(value),
        Err(err) => {
            debug!("Record does not fit {}: {err}", any::type_name::<T>());
            None
        }
    }
}

/// The columns available to the members of one instance under construction.
#[derive(Debug)]
pub struct Fields<'r> {
    pool: ColumnPool<'r>,
}

impl<'r> Fields<'r> {
    pub fn new(record: &'r FlatRecord) -> Self {
        Self {
            pool: ColumnPool::new(record),
        }
    }

    /// Columns not yet handed to a member.
    pub fn remaining(&self) -> usize {
        self.pool.remaining()
    }

    /// Resolves one member from its descriptor.
    pub fn member<M: FitType>(&mut self, member: &MemberDescriptor) -> Result<M> {
        trace!(
            "Resolving member `{}` ({}) with pattern `{}`",
            member.name, member.type_name, member.pattern
        );
        let resolved = match &member.pattern {
            NamingPattern::Implicit { name } => {
                let entry = self
                    .pool
                    .take_first(name)
                    .ok_or_else(|| missing_column(member))?;
                convert::<M>(&entry.value)
            }
            NamingPattern::Prefix { literal } => {
                let sub = self.pool.take_prefixed(literal);
                if sub.is_empty() {
                    return Err(missing_column(member));
                }
                coerce::<M>(&sub)
            }
            NamingPattern::Wildcard { literal } => {
                if M::KIND != MemberKind::Collection {
                    return Err(TypeFittingError::NotACollection {
                        member: member.name.to_string(),
                        pattern: member.pattern.to_string(),
                        target: any::type_name::<M>(),
                    });
                }
                let sub = self.pool.take_prefixed(literal);
                coerce::<M>(&sub)
            }
        };
        resolved.map_err(|err| {
            debug!("Member `{}` failed: {err}", member.name);
            err.within(member.name)
        })
    }

    /// Builds a collection from every remaining column, one element per
    /// index group, in first-appearance order.
    pub fn elements<C, E>(&mut self) -> Result<C>
    where
        C: FromIterator<E>,
        E: FitType,
    {
        let rest = self.pool.take_all();
        matcher::group_by_index(&rest)
            .iter()
            .map(|group| {
                coerce::<E>(&group.record).map_err(|err| err.within(format!("#{}", group.index)))
            })
            .collect()
    }

    /// Reads the single value a scalar is built from.
    pub fn scalar<T: FitType>(&mut self) -> Result<T> {
        let rest = self.pool.take_all();
        match rest.entries() {
            [entry] => convert::<T>(&entry.value),
            entries => Err(TypeFittingError::ExpectedScalar {
                target: any::type_name::<T>(),
                count: entries.len(),
            }),
        }
    }
}

fn missing_column(member: &MemberDescriptor) -> TypeFittingError {
    TypeFittingError::MissingColumn {
        member: member.name.to_string(),
        pattern: member.pattern.to_string(),
    }
}

/// Converts one raw value into `T` through its text form.
pub fn convert<T: FitType>(raw: &str) -> Result<T> {
    T::from_text(raw).unwrap_or_else(|| {
        Err(TypeFittingError::NotScalar {
            value: raw.to_string(),
            target: any::type_name::<T>(),
        })
    })
}

impl<T: FitType> FitType for Vec<T> {
    const KIND: MemberKind = MemberKind::Collection;

    fn fit(fields: &mut Fields<'_>) -> Result<Self> {
        fields.elements::<Self, T>()
    }
}

impl<T: FitType> FitType for VecDeque<T> {
    const KIND: MemberKind = MemberKind::Collection;

    fn fit(fields: &mut Fields<'_>) -> Result<Self> {
        fields.elements::<Self, T>()
    }
}
