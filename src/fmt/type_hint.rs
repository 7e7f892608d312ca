//! Short type labels for the console data table.

use crate::data::Value;

/// `None`, `bool`, `int`, `float`, `str`, `list[T]`, `dict[str, T]`, or the
/// rich value's own name. Container element types are a `|`-joined union in
/// first-seen order.
#[must_use]
pub fn type_of(value: &Value) -> String {
    match value {
        Value::None => "None".to_string(),
        Value::Bool(_) => "bool".to_string(),
        Value::Int(_) | Value::UInt(_) => "int".to_string(),
        Value::Float(_) => "float".to_string(),
        Value::Str(_) => "str".to_string(),
        Value::List(items) => match union(items.iter()) {
            Some(inner) => format!("list[{inner}]"),
            None => "list".to_string(),
        },
        Value::Map(map) => match union(map.iter().map(|(_, v)| v)) {
            Some(inner) => format!("dict[str, {inner}]"),
            None => "dict".to_string(),
        },
        Value::Rich(rich) => rich.type_name(),
    }
}

fn union<'a>(values: impl Iterator<Item = &'a Value>) -> Option<String> {
    let mut seen: Vec<String> = Vec::new();
    for value in values {
        let name = type_of(value);
        if !seen.contains(&name) {
            seen.push(name);
        }
    }
    (!seen.is_empty()).then(|| seen.join(" | "))
}
