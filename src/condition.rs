//! Parses restricted boolean condition strings into field/value assignments.
//!
//! The grammar is deliberately small: one or more clauses joined by `&&`,
//! each clause `FIELD == value` or `FIELD != value`, where a value is `true`,
//! `false`, a quoted string, or the empty string. Conditions like
//! `FIRST_NODE == true && CLUSTER_DISKS != ''` come straight out of the
//! schema's `when(...)` annotations and constraint tests.
//!
//! Parsing is best-effort extraction: a clause with neither separator is
//! dropped rather than reported.

use crate::example_resolver::{example_for, FALLBACK_EXAMPLE};
use crate::schema::{Schema, Value};
use indexmap::{IndexMap, IndexSet};

/// Field name → assigned value, in clause order.
pub type Assignments = IndexMap<String, Value>;

/// Parses a condition string into concrete assignments usable as test input.
///
/// Interpretation per clause:
/// - `FIELD == value` assigns the literal value, with `true`/`false` coerced
///   to booleans (see [`coerce_token`]);
/// - `FIELD != ''` assigns a valid non-empty example for the field, resolved
///   from the schema ([`FALLBACK_EXAMPLE`] when none exists);
/// - `FIELD != value` with a non-empty value assigns the empty string,
///   representing "this field is unset/cleared".
///
/// Later clauses overwrite earlier assignments to the same field.
pub fn parse_condition(condition: &str, schema: &Schema) -> Assignments {
    let mut assignments = Assignments::new();

    for clause in condition.split("&&") {
        let clause = clause.trim();

        if let Some((field, raw)) = clause.split_once(" == ") {
            let token = strip_quotes(raw.trim());
            assignments.insert(field.trim().to_string(), coerce_token(token));
        } else if let Some((field, raw)) = clause.split_once(" != ") {
            let field = field.trim();
            let value = if strip_quotes(raw.trim()).is_empty() {
                // "must be non-empty": substitute a schema example, never ""
                example_for(schema, field)
                    .filter(|v| !v.is_empty_str())
                    .unwrap_or_else(|| Value::Str(FALLBACK_EXAMPLE.to_string()))
            } else {
                Value::Str(String::new())
            };
            assignments.insert(field.to_string(), value);
        }
        // No recognized separator: clause dropped.
    }

    assignments
}

/// Coerces a raw condition token to a typed value.
///
/// Total over all tokens: `true`/`false` (any case) become booleans,
/// everything else stays a string.
pub fn coerce_token(token: &str) -> Value {
    if token.eq_ignore_ascii_case("true") {
        Value::Bool(true)
    } else if token.eq_ignore_ascii_case("false") {
        Value::Bool(false)
    } else {
        Value::Str(token.to_string())
    }
}

/// Collects the set of field names referenced by a group of conditions,
/// in first-seen order.
pub fn extract_fields<I, S>(conditions: I) -> IndexSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut fields = IndexSet::new();

    for condition in conditions {
        for clause in condition.as_ref().split("&&") {
            let clause = clause.trim();
            let field = clause
                .split_once(" == ")
                .or_else(|| clause.split_once(" != "))
                .map(|(lhs, _)| lhs.trim());
            if let Some(field) = field {
                if !field.is_empty() {
                    fields.insert(field.to_string());
                }
            }
        }
    }

    fields
}

/// Merges two conditions into a single assignment set.
///
/// Returns `None` when the conditions bind the same field to different
/// values; no error is raised, callers check the result. Only pairwise
/// merging is supported.
pub fn try_merge(first: &str, second: &str, schema: &Schema) -> Option<Assignments> {
    let mut merged = parse_condition(first, schema);

    for (field, value) in parse_condition(second, schema) {
        match merged.get(&field) {
            Some(existing) if *existing != value => return None,
            _ => {
                merged.insert(field, value);
            }
        }
    }

    Some(merged)
}

// Strips one matching layer of surrounding quotes, single or double.
fn strip_quotes(raw: &str) -> &str {
    for quote in ['\'', '"'] {
        if raw.len() >= 2 && raw.starts_with(quote) && raw.ends_with(quote) {
            return &raw[1..raw.len() - 1];
        }
    }
    raw
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::from_yaml(
            r#"
            schema:
              mapping:
                NO_DISKS_FOR_CLUSTER:
                  type: bool
                CLUSTER_DISKS:
                  type: disk_list
                FIRST_NODE:
                  type: bool
                SERVER_IP:
                  type: ipv4
                CERT_OPTION:
                  type: str
            types:
              disk_list:
                examples:
                  valid: ["/dev/sdb,/dev/sdc"]
              ipv4:
                examples:
                  valid: ["192.168.1.10"]
            "#,
        )
        .unwrap()
    }

    mod parse_tests {
        use super::*;

        #[test]
        fn test_equality_with_empty_string() {
            let parsed = parse_condition(
                "NO_DISKS_FOR_CLUSTER == true && CLUSTER_DISKS == ''",
                &schema(),
            );

            assert_eq!(parsed.len(), 2);
            assert_eq!(parsed["NO_DISKS_FOR_CLUSTER"], Value::Bool(true));
            assert_eq!(parsed["CLUSTER_DISKS"], Value::Str("".into()));
        }

        #[test]
        fn test_quoted_booleans_coerce() {
            let parsed = parse_condition(
                r#"FIRST_NODE == "true" && NO_DISKS_FOR_CLUSTER == 'false'"#,
                &schema(),
            );

            assert_eq!(parsed["FIRST_NODE"], Value::Bool(true));
            assert_eq!(parsed["NO_DISKS_FOR_CLUSTER"], Value::Bool(false));
        }

        #[test]
        fn test_quoted_string_stays_a_string() {
            let parsed = parse_condition("CERT_OPTION == 'existing'", &schema());
            assert_eq!(parsed["CERT_OPTION"], Value::Str("existing".into()));
        }

        #[test]
        fn test_not_empty_substitutes_schema_example() {
            let parsed = parse_condition("CLUSTER_DISKS != ''", &schema());
            assert_eq!(
                parsed["CLUSTER_DISKS"],
                Value::Str("/dev/sdb,/dev/sdc".into())
            );
        }

        #[test]
        fn test_not_empty_on_unknown_field_uses_placeholder() {
            let parsed = parse_condition("MYSTERY_FIELD != ''", &schema());
            assert_eq!(
                parsed["MYSTERY_FIELD"],
                Value::Str(FALLBACK_EXAMPLE.into())
            );
            assert!(!parsed["MYSTERY_FIELD"].is_empty_str());
        }

        #[test]
        fn test_not_equal_literal_clears_the_field() {
            let parsed = parse_condition("CERT_OPTION != 'existing'", &schema());
            assert_eq!(parsed["CERT_OPTION"], Value::Str("".into()));
        }

        #[test]
        fn test_malformed_clause_is_dropped() {
            let parsed = parse_condition(
                "FIRST_NODE == true && THIS_IS_NOT_A_CLAUSE && SERVER_IP != ''",
                &schema(),
            );

            assert_eq!(parsed.len(), 2);
            assert_eq!(parsed["FIRST_NODE"], Value::Bool(true));
            assert_eq!(parsed["SERVER_IP"], Value::Str("192.168.1.10".into()));
        }

        #[test]
        fn test_empty_condition_yields_no_assignments() {
            assert!(parse_condition("", &schema()).is_empty());
        }
    }

    mod coerce_tests {
        use super::*;

        #[test]
        fn test_boolean_literals_any_case() {
            assert_eq!(coerce_token("true"), Value::Bool(true));
            assert_eq!(coerce_token("True"), Value::Bool(true));
            assert_eq!(coerce_token("FALSE"), Value::Bool(false));
        }

        #[test]
        fn test_everything_else_is_a_string() {
            assert_eq!(coerce_token("existing"), Value::Str("existing".into()));
            assert_eq!(coerce_token(""), Value::Str("".into()));
            assert_eq!(coerce_token("truthy"), Value::Str("truthy".into()));
        }
    }

    mod extract_tests {
        use super::*;

        #[test]
        fn test_extracts_both_sides_of_a_conjunction() {
            let fields = extract_fields(["A == true && B == false"]);
            let names: Vec<&str> = fields.iter().map(String::as_str).collect();
            assert_eq!(names, ["A", "B"]);
        }

        #[test]
        fn test_deduplicates_across_conditions() {
            let fields = extract_fields([
                "FIRST_NODE == true",
                "FIRST_NODE == false && SERVER_IP != ''",
            ]);
            let names: Vec<&str> = fields.iter().map(String::as_str).collect();
            assert_eq!(names, ["FIRST_NODE", "SERVER_IP"]);
        }

        #[test]
        fn test_ignores_clauses_without_separators() {
            let fields = extract_fields(["A == true && garbage"]);
            assert_eq!(fields.len(), 1);
        }
    }

    mod merge_tests {
        use super::*;

        #[test]
        fn test_disjoint_conditions_union() {
            let schema = schema();
            let merged = try_merge(
                "FIRST_NODE == true",
                "NO_DISKS_FOR_CLUSTER == true && CLUSTER_DISKS == ''",
                &schema,
            )
            .unwrap();

            assert_eq!(merged.len(), 3);
            assert_eq!(merged["FIRST_NODE"], Value::Bool(true));
            assert_eq!(merged["NO_DISKS_FOR_CLUSTER"], Value::Bool(true));
            assert_eq!(merged["CLUSTER_DISKS"], Value::Str("".into()));
        }

        #[test]
        fn test_direct_conflict_fails() {
            let merged = try_merge("FIRST_NODE == true", "FIRST_NODE == false", &schema());
            assert_eq!(merged, None);
        }

        #[test]
        fn test_agreeing_overlap_is_not_a_conflict() {
            let schema = schema();
            let merged = try_merge(
                "FIRST_NODE == true && SERVER_IP != ''",
                "FIRST_NODE == true",
                &schema,
            )
            .unwrap();

            assert_eq!(merged.len(), 2);
            assert_eq!(merged["FIRST_NODE"], Value::Bool(true));
        }

        #[test]
        fn test_conflict_via_example_substitution() {
            // `!= ''` resolves to the schema example, which differs from ""
            let schema = schema();
            let merged = try_merge("CLUSTER_DISKS != ''", "CLUSTER_DISKS == ''", &schema);
            assert_eq!(merged, None);
        }
    }
}
