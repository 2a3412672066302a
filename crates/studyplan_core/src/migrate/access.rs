//! Defaulting field access over legacy JSON records.
//!
//! # Responsibility
//! - Read one field with its documented default (string/bool/int/container).
//! - Turn container shape mismatches into located `MigrateError::Shape`.
//!
//! # Invariants
//! - Scalar accessors never fail.
//! - Absent and `null` containers read as empty; other mismatches are errors.

use super::{MigrateError, MigrateResult};
use once_cell::sync::Lazy;
use serde_json::{Map, Number, Value};

static EMPTY_OBJECT: Lazy<Map<String, Value>> = Lazy::new(Map::new);

pub(crate) const EXPECTED_OBJECT: &str = "object";
pub(crate) const EXPECTED_ARRAY: &str = "array";

/// Borrowed view of one legacy JSON object plus its location for errors.
#[derive(Debug, Clone)]
pub(crate) struct Record<'a> {
    fields: &'a Map<String, Value>,
    path: String,
}

impl<'a> Record<'a> {
    pub(crate) fn root(fields: &'a Map<String, Value>) -> Self {
        Self {
            fields,
            path: String::new(),
        }
    }

    /// Wraps a sequence element, which must be an object.
    pub(crate) fn element(value: &'a Value, path: String) -> MigrateResult<Self> {
        match value {
            Value::Object(fields) => Ok(Self { fields, path }),
            other => Err(MigrateError::shape(path, EXPECTED_OBJECT, other)),
        }
    }

    fn empty(path: String) -> Self {
        Self {
            fields: &EMPTY_OBJECT,
            path,
        }
    }

    pub(crate) fn path(&self) -> &str {
        &self.path
    }

    pub(crate) fn has(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub(crate) fn raw(&self, key: &str) -> Option<&'a Value> {
        self.fields.get(key)
    }

    /// Raw value or `null`. Used for ids, which are never defaulted.
    pub(crate) fn id(&self, key: &str) -> Value {
        self.raw(key).cloned().unwrap_or(Value::Null)
    }

    /// Present value as-is, otherwise an empty string.
    pub(crate) fn text(&self, key: &str) -> Value {
        self.passthrough(key, Value::String(String::new()))
    }

    pub(crate) fn flag(&self, key: &str) -> bool {
        self.raw(key).is_some_and(is_truthy)
    }

    pub(crate) fn count(&self, key: &str) -> i64 {
        coerce_count(self.raw(key))
    }

    /// Present value as-is (even `null`), otherwise `fallback`.
    pub(crate) fn passthrough(&self, key: &str, fallback: Value) -> Value {
        self.raw(key).cloned().unwrap_or(fallback)
    }

    /// Truthy value as-is, otherwise `fallback`.
    pub(crate) fn passthrough_truthy(&self, key: &str, fallback: Value) -> Value {
        match self.raw(key) {
            Some(value) if is_truthy(value) => value.clone(),
            _ => fallback,
        }
    }

    /// Nested object; absent or `null` reads as an empty record.
    pub(crate) fn object(&self, key: &str) -> MigrateResult<Record<'a>> {
        let path = self.child_path(key);
        match self.raw(key) {
            None | Some(Value::Null) => Ok(Self::empty(path)),
            Some(Value::Object(fields)) => Ok(Self { fields, path }),
            Some(other) => Err(MigrateError::shape(path, EXPECTED_OBJECT, other)),
        }
    }

    /// Entry of a keyed table such as `details` or `modules`.
    ///
    /// Only string keys can address a JSON object, so any other key type
    /// resolves to `None`, as does a missing or `null` entry.
    pub(crate) fn entry(&self, key: &Value) -> MigrateResult<Option<Record<'a>>> {
        let Value::String(key) = key else {
            return Ok(None);
        };
        match self.raw(key) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(fields)) => Ok(Some(Self {
                fields,
                path: self.child_path(key),
            })),
            Some(other) => Err(MigrateError::shape(
                self.child_path(key),
                EXPECTED_OBJECT,
                other,
            )),
        }
    }

    /// Like [`Record::entry`], but a miss reads as an empty record.
    pub(crate) fn entry_or_empty(&self, key: &Value) -> MigrateResult<Record<'a>> {
        let path = match key {
            Value::String(key) => self.child_path(key),
            other => self.child_path(&other.to_string()),
        };
        Ok(self.entry(key)?.unwrap_or_else(|| Self::empty(path)))
    }

    /// Nested sequence; any falsy value reads as empty.
    pub(crate) fn sequence(&self, key: &str) -> MigrateResult<&'a [Value]> {
        match self.raw(key) {
            Some(Value::Array(items)) => Ok(items.as_slice()),
            Some(value) if is_truthy(value) => Err(MigrateError::shape(
                self.child_path(key),
                EXPECTED_ARRAY,
                value,
            )),
            _ => Ok(&[]),
        }
    }

    /// Iterates the objects of a nested sequence, located for errors.
    pub(crate) fn records(&self, key: &str) -> MigrateResult<Vec<Record<'a>>> {
        let base = self.child_path(key);
        self.sequence(key)?
            .iter()
            .enumerate()
            .map(|(index, value)| Record::element(value, format!("{base}[{index}]")))
            .collect()
    }

    pub(crate) fn child_path(&self, key: &str) -> String {
        if self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }
}

/// JSON truthiness: `null`, `false`, zero, `""`, `[]` and `{}` are false.
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

/// Coerces a counter field to an integer.
///
/// Falsy and unparseable values count as zero; floats truncate toward zero.
pub(crate) fn coerce_count(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Bool(flag)) => i64::from(*flag),
        Some(Value::Number(number)) => number_to_i64(number),
        Some(Value::String(text)) => text.trim().parse::<i64>().unwrap_or(0),
        _ => 0,
    }
}

fn number_to_i64(number: &Number) -> i64 {
    if let Some(value) = number.as_i64() {
        return value;
    }
    if number.as_u64().is_some() {
        return i64::MAX;
    }
    number.as_f64().map_or(0, |value| value.trunc() as i64)
}

/// JSON type name used in shape error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
