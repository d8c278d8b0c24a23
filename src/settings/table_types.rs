// ABOUTME: Table-type descriptors and the element type registry used for TVP in-lists
// ABOUTME: Maps Rust element types to the server-side structured type that carries them
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Table-valued-parameter type registry
//!
//! The server-side types are not created by this library. A typical
//! definition, without a primary key so duplicate values behave like a
//! literal `in (1, 1, 1)` list:
//!
//! ```sql
//! CREATE TYPE dbo.Dapper_Int32 AS TABLE (Id int NOT NULL)
//! ```

use std::any::{type_name, TypeId};
use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::constants::table_types;

/// Server-side structured type used to pass an in-list as a table
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InListTableType {
    /// Name of the identifier column of the table type
    pub id_column: String,
    /// Table type name
    pub type_name: String,
}

impl InListTableType {
    /// Create a descriptor
    pub fn new(id_column: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            id_column: id_column.into(),
            type_name: type_name.into(),
        }
    }

    fn builtin(type_name: &str) -> Self {
        Self::new(table_types::ID_COLUMN, type_name)
    }
}

/// Registry entry listed in settings snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableTypeEntry {
    /// Rust element type name
    pub element_type: String,
    /// Registered descriptor
    pub table_type: InListTableType,
}

#[derive(Debug, Clone)]
struct Registration {
    element_type: &'static str,
    table_type: InListTableType,
}

/// Mapping from element type to table-type descriptor
#[derive(Debug, Clone)]
pub struct TableTypeRegistry {
    entries: HashMap<TypeId, Registration>,
}

impl Default for TableTypeRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl TableTypeRegistry {
    /// Registry with no entries
    #[must_use]
    pub fn empty() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Registry holding the five built-in registrations
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::empty();
        registry.register::<u8>(InListTableType::builtin(table_types::BYTE));
        registry.register::<i16>(InListTableType::builtin(table_types::INT16));
        registry.register::<i32>(InListTableType::builtin(table_types::INT32));
        registry.register::<i64>(InListTableType::builtin(table_types::INT64));
        registry.register::<Uuid>(InListTableType::builtin(table_types::GUID));
        registry
    }

    /// Register or replace the descriptor for `T`
    pub fn register<T: 'static>(&mut self, table_type: InListTableType) -> Option<InListTableType> {
        self.entries
            .insert(
                TypeId::of::<T>(),
                Registration {
                    element_type: type_name::<T>(),
                    table_type,
                },
            )
            .map(|previous| previous.table_type)
    }

    /// Remove the descriptor for `T`
    pub fn remove<T: 'static>(&mut self) -> Option<InListTableType> {
        self.entries
            .remove(&TypeId::of::<T>())
            .map(|previous| previous.table_type)
    }

    /// Descriptor registered for an element type
    #[must_use]
    pub fn get(&self, element_type: TypeId) -> Option<&InListTableType> {
        self.entries.get(&element_type).map(|r| &r.table_type)
    }

    /// Number of registrations
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by element type name
    #[must_use]
    pub fn entries(&self) -> Vec<TableTypeEntry> {
        let mut entries: Vec<_> = self
            .entries
            .values()
            .map(|r| TableTypeEntry {
                element_type: r.element_type.to_owned(),
                table_type: r.table_type.clone(),
            })
            .collect();
        entries.sort_by(|a, b| a.element_type.cmp(&b.element_type));
        entries
    }
}
