//! # Cluster Configuration Schema
//!
//! Defines the declarative YAML schema describing configuration fields, their
//! types, example values, and cross-field constraints.
//!
//! ## Schema Format Documentation
//!
//! See the repository `README.md` for the complete YAML format, including
//! examples and usage patterns.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

#[derive(Debug, Deserialize)]
pub struct Schema {
    /// Cross-field constraint declarations, in declaration order.
    #[serde(default)]
    pub constraints: Vec<ConstraintDef>,
    #[serde(default)]
    pub schema: SchemaSection,
    /// Named reusable type definitions carrying example values.
    #[serde(default)]
    pub types: IndexMap<String, TypeDefinition>,
}

/// The `schema:` section of the document.
///
/// The extra level of nesting mirrors the on-disk format, where field
/// definitions live under `schema.mapping`.
#[derive(Debug, Default, Deserialize)]
pub struct SchemaSection {
    /// Field name → field definition, in declaration order.
    #[serde(default)]
    pub mapping: IndexMap<String, FieldDefinition>,
}

/// Single configuration field definition
#[derive(Debug, Default, Deserialize)]
pub struct FieldDefinition {
    /// Declared type: a primitive (`str`, `bool`, `int`) or a key of the
    /// document's `types` table.
    #[serde(rename = "type")]
    pub field_type: Option<String>,

    /// Default value the UI pre-fills for this field.
    #[serde(default)]
    pub default: Option<Value>,

    /// Human-readable description shown next to the field.
    #[serde(default)]
    pub desc: String,

    /// Requirement marker: empty, a plain marker such as `"yes"`, or a
    /// conditional `when(...)` expression.
    #[serde(default)]
    pub required: String,

    /// Visibility condition: empty or a `when(...)` expression.
    #[serde(default)]
    pub applicable: String,

    /// UI section heading the field is grouped under.
    #[serde(default)]
    pub section: String,

    /// Field-level example values. The first element is the canonical
    /// example used when synthesizing inputs.
    #[serde(default)]
    pub examples: Vec<Value>,
}

/// Reusable type definition from the `types:` table.
#[derive(Debug, Default, Deserialize)]
pub struct TypeDefinition {
    /// Validation regex the UI applies to fields of this type.
    #[serde(default)]
    pub pattern: String,

    /// Message the UI shows when `pattern` rejects the input.
    #[serde(rename = "errorMessage", default)]
    pub error_message: String,

    #[serde(default)]
    pub examples: TypeExamples,
}

/// Example values attached to a type definition.
#[derive(Debug, Default, Deserialize)]
pub struct TypeExamples {
    /// Values the UI's validation accepts.
    #[serde(default)]
    pub valid: Vec<Value>,
    /// Values the UI's validation rejects.
    #[serde(default)]
    pub invalid: Vec<Value>,
}

/// One constraint declaration from the `constraints:` list.
///
/// Exactly one of `mutually_exclusive` / `one_of` is populated per
/// declaration; both are kept on one struct because the YAML encodes the
/// variant as the key name.
#[derive(Debug, Default, Deserialize)]
pub struct ConstraintDef {
    /// Fields that cannot simultaneously hold truthy values.
    #[serde(default)]
    pub mutually_exclusive: Vec<String>,
    /// Fields exactly one of which must be set.
    #[serde(default)]
    pub one_of: Vec<String>,
    /// Error message the UI reports when the constraint is violated.
    #[serde(default)]
    pub error: String,
}

/// Scalar value a field can hold: boolean, integer, or string.
///
/// Untagged so that YAML scalars in `examples` lists and `default` entries
/// deserialize to their natural type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Str(String),
}

impl Value {
    /// Returns the contained string, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// True only for the empty string value.
    pub fn is_empty_str(&self) -> bool {
        matches!(self, Value::Str(s) if s.is_empty())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SchemaError {
    #[error("schema file not found; tried: {tried:?}")]
    NotFound { tried: Vec<PathBuf> },
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Schema {
    pub fn from_yaml(content: &str) -> Result<Self, SchemaError> {
        let schema: Schema = serde_yaml::from_str(content)?;
        Ok(schema)
    }

    pub fn load_from_file(path: &Path) -> Result<Self, SchemaError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Loads the schema from the first candidate path that exists.
    ///
    /// The candidate list encodes deployment-environment flexibility
    /// (container mount vs. development checkout); the caller passes every
    /// known location in preference order. Fails with
    /// [`SchemaError::NotFound`] listing all attempted paths when none
    /// exists.
    pub fn load_from_candidates(candidates: &[PathBuf]) -> Result<Self, SchemaError> {
        for path in candidates {
            if path.exists() {
                return Self::load_from_file(path);
            }
        }
        Err(SchemaError::NotFound {
            tried: candidates.to_vec(),
        })
    }

    /// Looks up a field definition by name.
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.schema.mapping.get(name)
    }

    /// Looks up a type definition by name.
    pub fn type_def(&self, name: &str) -> Option<&TypeDefinition> {
        self.types.get(name)
    }
}
