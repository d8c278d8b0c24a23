// ABOUTME: Collection-valued parameter handle with one-time materialization
// ABOUTME: Typed variants drive strategy dispatch; pending sources are drained exactly once
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use std::any::{type_name, TypeId};
use std::fmt;

use uuid::Uuid;

use crate::models::DbValue;

/// Homogeneous element sequence, possibly still backed by a single-pass source
///
/// The first call to [`Sequence::materialize`] drains the source into a
/// vector held in place, so every later reader sees the same elements.
pub struct Sequence<T> {
    values: Vec<T>,
    pending: Option<Box<dyn Iterator<Item = T> + Send>>,
}

impl<T> Sequence<T> {
    /// Sequence over already collected values
    #[must_use]
    pub const fn materialized(values: Vec<T>) -> Self {
        Self {
            values,
            pending: None,
        }
    }

    /// Sequence over a single-pass source, drained on first inspection
    pub fn pending<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: Send + 'static,
    {
        Self {
            values: Vec::new(),
            pending: Some(Box::new(source.into_iter())),
        }
    }

    /// Whether the source has been drained
    #[must_use]
    pub const fn is_materialized(&self) -> bool {
        self.pending.is_none()
    }

    /// Drain any pending source and return the stable elements
    pub fn materialize(&mut self) -> &[T] {
        if let Some(source) = self.pending.take() {
            self.values.extend(source);
        }
        &self.values
    }

    /// Elements, if already materialized
    #[must_use]
    pub fn as_slice(&self) -> Option<&[T]> {
        self.is_materialized().then_some(self.values.as_slice())
    }
}

impl<T> From<Vec<T>> for Sequence<T> {
    fn from(values: Vec<T>) -> Self {
        Self::materialized(values)
    }
}

impl<T: fmt::Debug> fmt::Debug for Sequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_slice() {
            Some(values) => f.debug_tuple("Materialized").field(&values).finish(),
            None => f.write_str("Pending(..)"),
        }
    }
}

/// A collection bound through one in-list placeholder
#[derive(Debug)]
pub enum InList {
    /// 8-bit unsigned integers
    Byte(Sequence<u8>),
    /// 16-bit integers
    Int16(Sequence<i16>),
    /// 32-bit integers
    Int32(Sequence<i32>),
    /// 64-bit integers
    Int64(Sequence<i64>),
    /// Unique identifiers
    Guid(Sequence<Uuid>),
    /// Text values
    Text(Sequence<String>),
    /// Untyped values
    Values(Sequence<DbValue>),
}

macro_rules! in_list_from {
    ($($variant:ident => $ty:ty),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for InList {
                fn from(values: Vec<$ty>) -> Self {
                    Self::$variant(Sequence::materialized(values))
                }
            }

            impl From<Sequence<$ty>> for InList {
                fn from(sequence: Sequence<$ty>) -> Self {
                    Self::$variant(sequence)
                }
            }
        )*
    };
}

in_list_from! {
    Byte => u8,
    Int16 => i16,
    Int32 => i32,
    Int64 => i64,
    Guid => Uuid,
    Text => String,
    Values => DbValue,
}

impl InList {
    /// Drain a pending source in place and return the element count
    pub fn materialize(&mut self) -> usize {
        match self {
            Self::Byte(s) => s.materialize().len(),
            Self::Int16(s) => s.materialize().len(),
            Self::Int32(s) => s.materialize().len(),
            Self::Int64(s) => s.materialize().len(),
            Self::Guid(s) => s.materialize().len(),
            Self::Text(s) => s.materialize().len(),
            Self::Values(s) => s.materialize().len(),
        }
    }

    /// Element count, if already materialized
    #[must_use]
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Byte(s) => s.as_slice().map(<[_]>::len),
            Self::Int16(s) => s.as_slice().map(<[_]>::len),
            Self::Int32(s) => s.as_slice().map(<[_]>::len),
            Self::Int64(s) => s.as_slice().map(<[_]>::len),
            Self::Guid(s) => s.as_slice().map(<[_]>::len),
            Self::Text(s) => s.as_slice().map(<[_]>::len),
            Self::Values(s) => s.as_slice().map(<[_]>::len),
        }
    }

    /// Whether the list is materialized and holds no elements
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Element type used for table-type lookup; `None` for untyped values
    #[must_use]
    pub fn element_type_id(&self) -> Option<TypeId> {
        match self {
            Self::Byte(_) => Some(TypeId::of::<u8>()),
            Self::Int16(_) => Some(TypeId::of::<i16>()),
            Self::Int32(_) => Some(TypeId::of::<i32>()),
            Self::Int64(_) => Some(TypeId::of::<i64>()),
            Self::Guid(_) => Some(TypeId::of::<Uuid>()),
            Self::Text(_) => Some(TypeId::of::<String>()),
            Self::Values(_) => None,
        }
    }

    /// Element type name for diagnostics
    #[must_use]
    pub fn element_type_name(&self) -> &'static str {
        match self {
            Self::Byte(_) => type_name::<u8>(),
            Self::Int16(_) => type_name::<i16>(),
            Self::Int32(_) => type_name::<i32>(),
            Self::Int64(_) => type_name::<i64>(),
            Self::Guid(_) => type_name::<Uuid>(),
            Self::Text(_) => type_name::<String>(),
            Self::Values(_) => type_name::<DbValue>(),
        }
    }

    /// Materialize and copy the elements as bindable values
    pub fn to_db_values(&mut self) -> Vec<DbValue> {
        match self {
            Self::Byte(s) => s.materialize().iter().copied().map(DbValue::Byte).collect(),
            Self::Int16(s) => s.materialize().iter().copied().map(DbValue::Int16).collect(),
            Self::Int32(s) => s.materialize().iter().copied().map(DbValue::Int32).collect(),
            Self::Int64(s) => s.materialize().iter().copied().map(DbValue::Int64).collect(),
            Self::Guid(s) => s.materialize().iter().copied().map(DbValue::Guid).collect(),
            Self::Text(s) => s.materialize().iter().cloned().map(DbValue::Text).collect(),
            Self::Values(s) => s.materialize().to_vec(),
        }
    }
}
