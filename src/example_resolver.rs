//! Resolves a representative valid value for a schema field.
//!
//! Used when synthesizing test inputs: a condition such as
//! `CLUSTER_DISKS != ''` needs *some* non-empty value for the field, and the
//! schema usually carries one in its example lists.

use crate::condition::Assignments;
use crate::schema::{Schema, Value};

/// Placeholder substituted when a field needs a non-empty value but the
/// schema carries no example for it.
pub const FALLBACK_EXAMPLE: &str = "test-value";

/// Resolves a valid example value for `field_name`.
///
/// Resolution order:
/// 1. the field's own `examples` list (first element);
/// 2. the `examples.valid` list of the field's declared type (first element);
/// 3. a fixed default keyed by the declared type (`bool` → `true`,
///    `int` → `1`, anything else → [`FALLBACK_EXAMPLE`]).
///
/// Returns `None` for fields absent from the schema mapping or declared
/// without a type; callers treat absence as "skip this field".
pub fn example_for(schema: &Schema, field_name: &str) -> Option<Value> {
    let field = schema.field(field_name)?;

    if let Some(example) = field.examples.first() {
        return Some(example.clone());
    }

    let field_type = field.field_type.as_deref()?;
    if let Some(type_def) = schema.type_def(field_type) {
        if let Some(example) = type_def.examples.valid.first() {
            return Some(example.clone());
        }
    }

    Some(type_default(field_type))
}

/// Resolves examples for several fields at once, omitting fields that
/// resolve to nothing.
pub fn examples_for<'a, I>(schema: &Schema, field_names: I) -> Assignments
where
    I: IntoIterator<Item = &'a str>,
{
    let mut out = Assignments::new();
    for name in field_names {
        if let Some(value) = example_for(schema, name) {
            out.insert(name.to_string(), value);
        }
    }
    out
}

// Total over all declared types: custom types without examples fall back to
// the string placeholder, same as `str`.
fn type_default(field_type: &str) -> Value {
    match field_type {
        "bool" => Value::Bool(true),
        "int" => Value::Int(1),
        _ => Value::Str(FALLBACK_EXAMPLE.to_string()),
    }
}
