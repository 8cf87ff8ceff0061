//! Projections over the schema's cross-field constraint declarations.

use crate::condition::Assignments;
use crate::example_resolver::example_for;
use crate::schema::Schema;

/// A `one_of` constraint: exactly one of `fields` must be set.
#[derive(Debug, Clone, PartialEq)]
pub struct OneOfGroup<'a> {
    pub fields: &'a [String],
    /// Error message the UI reports on violation; empty when the schema
    /// declares none.
    pub error: &'a str,
}

/// All `mutually_exclusive` groups, in declaration order.
pub fn mutually_exclusive_groups(schema: &Schema) -> Vec<&[String]> {
    schema
        .constraints
        .iter()
        .filter(|c| !c.mutually_exclusive.is_empty())
        .map(|c| c.mutually_exclusive.as_slice())
        .collect()
}

/// All `one_of` groups, in declaration order.
pub fn one_of_groups(schema: &Schema) -> Vec<OneOfGroup<'_>> {
    schema
        .constraints
        .iter()
        .filter(|c| !c.one_of.is_empty())
        .map(|c| OneOfGroup {
            fields: &c.one_of,
            error: &c.error,
        })
        .collect()
}

/// Derives a minimal valid configuration from schema metadata alone.
///
/// Takes the resolved example of every unconditionally required field (a
/// `required` marker that is not a `when(...)` conditional), then satisfies
/// each `one_of` group by assigning the first field in it that resolves to
/// an example. No search: this is a single pass over the declarations.
pub fn minimal_valid_config(schema: &Schema) -> Assignments {
    let mut config = Assignments::new();

    for (name, field) in &schema.schema.mapping {
        if !field.required.is_empty() && !field.required.starts_with("when(") {
            if let Some(value) = example_for(schema, name) {
                config.insert(name.clone(), value);
            }
        }
    }

    for group in one_of_groups(schema) {
        // Required fields may already satisfy the group.
        if group.fields.iter().any(|f| config.contains_key(f)) {
            continue;
        }
        for field in group.fields {
            if let Some(value) = example_for(schema, field) {
                config.insert(field.clone(), value);
                break;
            }
        }
    }

    config
}
