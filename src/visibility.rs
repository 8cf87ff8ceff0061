//! UI interaction steps required before a conditionally-shown field is
//! visible.
//!
//! Some fields only appear after another control is toggled (certificate
//! paths behind the "use existing certificate" choice, join parameters
//! behind unchecking "first node"). The mapping from field name to the step
//! sequence that reveals it is a configuration table, not logic: it can be
//! replaced wholesale (e.g. loaded from YAML) without touching the parser.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// A single UI interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Wait for the target element to appear.
    Wait,
    /// Choose `value` in the target dropdown.
    Select,
    /// Tick the target checkbox.
    Check,
    /// Untick the target checkbox.
    Uncheck,
}

/// One ordered step towards making a field visible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisibilityStep {
    pub action: Action,
    /// HTML element id of the control to act on.
    pub target: String,
    /// Value for [`Action::Select`]; absent for the other actions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
}

/// Field name → steps that reveal it. Fields absent from the table are
/// assumed always visible.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VisibilityTable(IndexMap<String, Vec<VisibilityStep>>);

impl VisibilityTable {
    /// A table with no entries: every field is treated as always visible.
    pub fn empty() -> Self {
        VisibilityTable(IndexMap::new())
    }

    /// Loads a replacement table from YAML, e.g.:
    ///
    /// ```yaml
    /// TLS_CERT:
    ///   - { action: wait, target: CERT_OPTION }
    ///   - { action: select, target: CERT_OPTION, value: existing }
    ///   - { action: wait, target: TLS_CERT }
    /// ```
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Steps needed before `field` is visible, or `None` when the field is
    /// always visible.
    pub fn steps_for(&self, field: &str) -> Option<&[VisibilityStep]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Adds or replaces the steps for one field.
    pub fn insert(&mut self, field: impl Into<String>, steps: Vec<VisibilityStep>) {
        self.0.insert(field.into(), steps);
    }
}

impl Default for VisibilityTable {
    /// The known cluster-configuration UI's table:
    /// - `TLS_CERT`, `TLS_KEY` require selecting `CERT_OPTION=existing`;
    /// - `SERVER_IP`, `JOIN_TOKEN`, `CONTROL_PLANE` require unchecking
    ///   `FIRST_NODE`;
    /// - `ROCM_BASE_URL`, `ROCM_DEB_PACKAGE` require checking `GPU_NODE`.
    fn default() -> Self {
        let mut table = VisibilityTable::empty();

        for field in ["TLS_CERT", "TLS_KEY"] {
            table.insert(
                field,
                vec![
                    wait("CERT_OPTION"),
                    select("CERT_OPTION", "existing"),
                    wait(field),
                ],
            );
        }

        for field in ["SERVER_IP", "JOIN_TOKEN", "CONTROL_PLANE"] {
            table.insert(field, vec![uncheck("FIRST_NODE"), wait(field)]);
        }

        for field in ["ROCM_BASE_URL", "ROCM_DEB_PACKAGE"] {
            table.insert(field, vec![check("GPU_NODE"), wait(field)]);
        }

        table
    }
}

fn step(action: Action, target: &str, value: Option<&str>) -> VisibilityStep {
    VisibilityStep {
        action,
        target: target.to_string(),
        value: value.map(str::to_string),
    }
}

fn wait(target: &str) -> VisibilityStep {
    step(Action::Wait, target, None)
}

fn select(target: &str, value: &str) -> VisibilityStep {
    step(Action::Select, target, Some(value))
}

fn check(target: &str) -> VisibilityStep {
    step(Action::Check, target, None)
}

fn uncheck(target: &str) -> VisibilityStep {
    step(Action::Uncheck, target, None)
}
