//! Flattens the schema's field mapping into per-field fixture records for
//! the external test runner.

use crate::schema::{Schema, Value};
use crate::visibility::{VisibilityStep, VisibilityTable};
use serde::Serialize;

/// Everything the test runner needs to exercise one field: its element id,
/// the values that must pass and fail validation, and the UI steps (if any)
/// that make the field visible first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldFixture {
    pub field: String,
    /// HTML element id; the UI uses the field name directly.
    #[serde(rename = "fieldId")]
    pub field_id: String,
    #[serde(rename = "type")]
    pub type_name: String,
    pub valid: Vec<Value>,
    pub invalid: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Vec<VisibilityStep>>,
}

/// Builds fixture records for every testable field, in schema declaration
/// order.
///
/// Fields are skipped when their declared type is a primitive (no entry in
/// the `types` table) or when the type carries neither valid nor invalid
/// examples; there is nothing to feed the runner for those.
pub fn field_fixtures(schema: &Schema, table: &VisibilityTable) -> Vec<FieldFixture> {
    let mut fixtures = Vec::new();

    for (name, field) in &schema.schema.mapping {
        let Some(type_name) = field.field_type.as_deref() else {
            continue;
        };
        let Some(type_def) = schema.type_def(type_name) else {
            continue;
        };

        let valid = &type_def.examples.valid;
        let invalid = &type_def.examples.invalid;
        if valid.is_empty() && invalid.is_empty() {
            continue;
        }

        fixtures.push(FieldFixture {
            field: name.clone(),
            field_id: name.clone(),
            type_name: type_name.to_string(),
            valid: valid.clone(),
            invalid: invalid.clone(),
            visibility: table.steps_for(name).map(<[VisibilityStep]>::to_vec),
        });
    }

    fixtures
}
