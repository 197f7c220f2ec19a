use log::debug;
use serde_json::{Map, Value};

use crate::model::{IngredientEntry, StepEntry, Unit};

/// Turn the `ingredients` field of a [`RecipeRecord`](crate::RecipeRecord)
/// into entries.
///
/// Records written by different backend versions store it as JSON text, as a
/// native array, or as plain newline-separated text. Anything unrecognized
/// becomes a single empty entry.
pub fn parse_ingredients(source: Option<&Value>) -> Vec<IngredientEntry> {
    let entries: Vec<IngredientEntry> = parse_list(source, ingredient_from_value, |line| {
        IngredientEntry {
            name: line.to_string(),
            ..Default::default()
        }
    });
    with_ids(entries, IngredientEntry::empty, |entry, id| entry.id = id)
}

/// Same as [`parse_ingredients`], for the `instructions` field
pub fn parse_instructions(source: Option<&Value>) -> Vec<StepEntry> {
    let steps: Vec<StepEntry> = parse_list(source, step_from_value, |line| StepEntry {
        description: line.to_string(),
        ..Default::default()
    });
    with_ids(steps, StepEntry::empty, |step, id| step.id = id)
}

fn parse_list<T>(
    source: Option<&Value>,
    from_value: fn(&Value) -> T,
    from_line: fn(&str) -> T,
) -> Vec<T> {
    let Some(source) = source.filter(|value| !is_falsy(value)) else {
        return Vec::new();
    };

    match source {
        Value::String(text) => match serde_json::from_str::<Value>(text) {
            Ok(Value::Array(items)) => items.iter().map(from_value).collect(),
            Ok(other) => {
                debug!("Decoded list field is not an array: {}", other);
                Vec::new()
            }
            Err(e) => {
                debug!("List field is not JSON ({}), splitting on newlines", e);
                text.lines()
                    .map(str::trim)
                    .filter(|line| !line.is_empty())
                    .map(from_line)
                    .collect()
            }
        },
        Value::Array(items) => items.iter().map(from_value).collect(),
        other => {
            debug!("Unsupported list field shape: {}", other);
            Vec::new()
        }
    }
}

/// Assign 1-based ids in order, or produce the single default entry
fn with_ids<T>(mut entries: Vec<T>, empty: fn(u32) -> T, set_id: fn(&mut T, u32)) -> Vec<T> {
    if entries.is_empty() {
        return vec![empty(1)];
    }
    for (id, entry) in (1..).zip(entries.iter_mut()) {
        set_id(entry, id);
    }
    entries
}

fn ingredient_from_value(value: &Value) -> IngredientEntry {
    match value {
        Value::Object(fields) => IngredientEntry {
            id: 0,
            name: field_text(fields, "name"),
            amount: field_text(fields, "amount"),
            unit: fields
                .get("unit")
                .and_then(Value::as_str)
                .and_then(Unit::parse)
                .unwrap_or_default(),
        },
        other => IngredientEntry {
            name: truthy_text(other),
            ..Default::default()
        },
    }
}

fn step_from_value(value: &Value) -> StepEntry {
    match value {
        Value::Object(fields) => StepEntry {
            description: field_text(fields, "description"),
            image_preview: field_text(fields, "image_url"),
            ..Default::default()
        },
        other => StepEntry {
            description: truthy_text(other),
            ..Default::default()
        },
    }
}

fn field_text(fields: &Map<String, Value>, key: &str) -> String {
    fields.get(key).map(truthy_text).unwrap_or_default()
}

/// Text of a scalar, empty for falsy values and containers
pub(crate) fn truthy_text(value: &Value) -> String {
    if is_falsy(value) {
        return String::new();
    }
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => number.to_string(),
        Value::Bool(flag) => flag.to_string(),
        _ => String::new(),
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n == 0.0),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}
