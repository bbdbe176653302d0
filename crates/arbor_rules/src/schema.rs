//! Schema conformance rule.
//!
//! Checks that schema documents have the basic shape of a JSON Schema
//! object. Only the keywords the platform relies on are inspected:
//! `type`, `properties`, `required`, `items`, `$ref` and the
//! `definitions`/`$defs` tables. Local `$ref` pointers (`#/...`) must
//! resolve within the same document; other references are left alone.

use crate::finding::Finding;
use arbor_core::DefinitionError;
use arbor_model::{AgentDefinition, Schema};
use serde_json::{Map, Value};

const SCHEMA_TYPES: &[&str] = &[
    "object", "array", "string", "number", "integer", "boolean", "null",
];

const MAX_VALUE_LEN: usize = 80;

fn render(value: &Value) -> String {
    let text = value.to_string();
    if text.chars().count() > MAX_VALUE_LEN {
        let head: String = text.chars().take(MAX_VALUE_LEN - 3).collect();
        format!("{head}...")
    } else {
        text
    }
}

fn is_type_name(value: &Value) -> bool {
    value.as_str().is_some_and(|s| SCHEMA_TYPES.contains(&s))
}

fn invalid(path: &str, field: &str, value: &Value, expected: &str, out: &mut Vec<Finding>) {
    out.push(Finding::error(
        path,
        DefinitionError::invalid_format(field, &render(value), expected),
    ));
}

fn check_ref(reference: &Value, root: &Value, path: &str, out: &mut Vec<Finding>) {
    let Some(target) = reference.as_str() else {
        invalid(path, "schema $ref", reference, "a reference string", out);
        return;
    };
    if let Some(pointer) = target.strip_prefix('#') {
        if root.pointer(pointer).is_none() {
            invalid(path, "schema $ref", reference, "a pointer into this schema", out);
        }
    }
}

/// Check one schema document (or sub-schema of `root`) at `path`
fn check_document(value: &Value, root: &Value, path: &str, out: &mut Vec<Finding>) {
    let Value::Object(map) = value else {
        invalid(path, "schema", value, "a JSON Schema object", out);
        return;
    };

    if let Some(ty) = map.get("type") {
        let valid = match ty {
            Value::Array(items) => !items.is_empty() && items.iter().all(is_type_name),
            other => is_type_name(other),
        };
        if !valid {
            invalid(
                &format!("{path}.type"),
                "schema type",
                ty,
                "a JSON Schema type name or a list of them",
                out,
            );
        }
    }

    let properties = match map.get("properties") {
        Some(Value::Object(props)) => {
            for (key, sub) in props {
                check_document(sub, root, &format!("{path}.properties.{key}"), out);
            }
            Some(props)
        }
        Some(other) => {
            invalid(
                &format!("{path}.properties"),
                "schema properties",
                other,
                "an object of property schemas",
                out,
            );
            None
        }
        None => None,
    };

    if let Some(required) = map.get("required") {
        check_required(required, properties, &format!("{path}.required"), out);
    }

    match map.get("items") {
        Some(Value::Array(items)) => {
            for (i, sub) in items.iter().enumerate() {
                check_document(sub, root, &format!("{path}.items[{i}]"), out);
            }
        }
        Some(sub) => check_document(sub, root, &format!("{path}.items"), out),
        None => {}
    }

    if let Some(reference) = map.get("$ref") {
        check_ref(reference, root, &format!("{path}.$ref"), out);
    }

    for table in ["definitions", "$defs"] {
        match map.get(table) {
            Some(Value::Object(defs)) => {
                for (key, sub) in defs {
                    check_document(sub, root, &format!("{path}.{table}.{key}"), out);
                }
            }
            Some(other) => invalid(
                &format!("{path}.{table}"),
                "schema definitions",
                other,
                "an object of named schemas",
                out,
            ),
            None => {}
        }
    }
}

fn check_required(
    required: &Value,
    properties: Option<&Map<String, Value>>,
    path: &str,
    out: &mut Vec<Finding>,
) {
    let Value::Array(names) = required else {
        invalid(path, "schema required", required, "a list of property names", out);
        return;
    };
    for name in names {
        match name.as_str() {
            Some(key) => {
                if properties.is_some_and(|props| !props.contains_key(key)) {
                    invalid(path, "required property", name, "a declared property", out);
                }
            }
            None => invalid(path, "required property", name, "a property name string", out),
        }
    }
}

fn check_optional(schema: Option<&Schema>, path: String, out: &mut Vec<Finding>) {
    if let Some(schema) = schema {
        let root = schema.as_value();
        check_document(root, root, &path, out);
    }
}

/// Check agent, module and tool schemas
pub fn check_schemas(agent: &AgentDefinition, out: &mut Vec<Finding>) {
    check_optional(agent.input_schema(), "input_schema".to_string(), out);
    check_optional(agent.output_schema(), "output_schema".to_string(), out);

    for (i, module) in agent.modules().iter().enumerate() {
        check_optional(module.input_schema(), format!("modules[{i}].input_schema"), out);
        check_optional(module.output_schema(), format!("modules[{i}].output_schema"), out);
    }
    for (i, tool) in agent.tools().iter().enumerate() {
        check_optional(tool.input_schema(), format!("tools[{i}].input_schema"), out);
        check_optional(tool.output_schema(), format!("tools[{i}].output_schema"), out);
    }
}
