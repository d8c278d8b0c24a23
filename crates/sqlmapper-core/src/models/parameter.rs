// ABOUTME: Bind parameters with declared type, size, and value
// ABOUTME: ParameterCollection keeps order and replaces same-named bindings

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Declared provider type of a parameter
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DbType {
    /// Single-byte, locale-invariant text (`varchar`)
    AnsiString,
    /// Unicode text (`nvarchar`)
    String,
    /// 8-bit unsigned integer
    Byte,
    /// 16-bit integer
    Int16,
    /// 32-bit integer
    Int32,
    /// 64-bit integer
    Int64,
    /// Double precision float
    Double,
    /// Boolean
    Boolean,
    /// 128-bit unique identifier
    Guid,
    /// Raw bytes
    Binary,
    /// Server-defined structured (table) type
    Structured,
}

/// Size declared for a parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterSize {
    /// Let the provider infer the size
    #[default]
    Default,
    /// Fixed maximum length
    Fixed(u32),
    /// `max`, no length limit
    Unbounded,
}

/// Scalar value bound to a parameter or held in an untyped list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DbValue {
    /// SQL `NULL`
    Null,
    /// Boolean value
    Bool(bool),
    /// 8-bit unsigned integer
    Byte(u8),
    /// 16-bit integer
    Int16(i16),
    /// 32-bit integer
    Int32(i32),
    /// 64-bit integer
    Int64(i64),
    /// Double precision float
    Double(f64),
    /// Unique identifier
    Guid(Uuid),
    /// Text
    Text(String),
    /// Raw bytes
    Binary(Vec<u8>),
}

/// A single bind parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name, without any sigil
    pub name: String,
    /// Declared provider type
    pub db_type: DbType,
    /// Declared size
    pub size: ParameterSize,
    /// Bound value
    pub value: DbValue,
}

impl Parameter {
    /// Create a parameter with the default size
    pub fn new(name: impl Into<String>, db_type: DbType, value: DbValue) -> Self {
        Self {
            name: name.into(),
            db_type,
            size: ParameterSize::Default,
            value,
        }
    }

    /// Set the declared size
    #[must_use]
    pub const fn with_size(mut self, size: ParameterSize) -> Self {
        self.size = size;
        self
    }

    /// Whether this parameter binds `name`, ignoring sigils and case
    #[must_use]
    pub fn binds(&self, name: &str) -> bool {
        normalize_name(&self.name).eq_ignore_ascii_case(normalize_name(name))
    }
}

fn normalize_name(name: &str) -> &str {
    name.trim_start_matches(['@', ':', '$', '?'])
        .trim_end_matches('?')
}

/// Ordered parameter set owned by a command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterCollection {
    items: Vec<Parameter>,
}

impl ParameterCollection {
    /// Create an empty collection
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Add a parameter, replacing any binding with the same name in place
    ///
    /// Returns the replaced parameter, if there was one.
    pub fn upsert(&mut self, parameter: Parameter) -> Option<Parameter> {
        if let Some(existing) = self.items.iter_mut().find(|p| p.binds(&parameter.name)) {
            return Some(std::mem::replace(existing, parameter));
        }
        self.items.push(parameter);
        None
    }

    /// Look up a parameter by name
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.items.iter().find(|p| p.binds(name))
    }

    /// Remove a parameter by name
    pub fn remove(&mut self, name: &str) -> Option<Parameter> {
        let index = self.items.iter().position(|p| p.binds(name))?;
        Some(self.items.remove(index))
    }

    /// Number of parameters
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate in binding order
    pub fn iter(&self) -> std::slice::Iter<'_, Parameter> {
        self.items.iter()
    }
}

impl<'a> IntoIterator for &'a ParameterCollection {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsert_replaces_same_name_ignoring_sigil_and_case() {
        let mut params = ParameterCollection::new();
        params.upsert(Parameter::new("other", DbType::Int32, DbValue::Int32(7)));
        params.upsert(Parameter::new("@IDS", DbType::Int32, DbValue::Null));

        let replaced = params.upsert(Parameter::new(
            "ids",
            DbType::AnsiString,
            DbValue::Text("1,2".into()),
        ));

        assert_eq!(replaced.map(|p| p.name), Some("@IDS".to_owned()));
        assert_eq!(params.len(), 2);
        let names: Vec<_> = params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["other", "ids"]);
    }

    #[test]
    fn test_remove_and_get() {
        let mut params = ParameterCollection::new();
        params.upsert(Parameter::new("a", DbType::Int64, DbValue::Int64(1)));
        assert!(params.get("@a").is_some());
        assert!(params.remove(":a").is_some());
        assert!(params.is_empty());
        assert!(params.remove("a").is_none());
    }
}
