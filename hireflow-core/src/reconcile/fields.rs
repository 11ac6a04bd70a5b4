//! Lenient field access over raw JSON
//!
//! Every accessor takes a list of names, tries them in order and falls back
//! to a typed default. Null counts as absent.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Read-only view over a JSON object (or over nothing)
#[derive(Debug, Clone, Copy)]
pub(crate) struct Fields<'a> {
    map: Option<&'a Map<String, Value>>,
}

impl<'a> Fields<'a> {
    pub(crate) fn of(value: &'a Value) -> Self {
        Self {
            map: value.as_object(),
        }
    }

    pub(crate) fn is_object(&self) -> bool {
        self.map.is_some()
    }

    /// First non-null value among `names`
    pub(crate) fn lookup(&self, names: &[&str]) -> Option<&'a Value> {
        let map = self.map?;
        names
            .iter()
            .filter_map(|name| map.get(*name))
            .find(|value| !value.is_null())
    }

    pub(crate) fn has_any(&self, names: &[&str]) -> bool {
        self.lookup(names).is_some()
    }

    pub(crate) fn string(&self, names: &[&str]) -> Option<String> {
        match self.lookup(names)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub(crate) fn text(&self, names: &[&str]) -> String {
        self.string(names).unwrap_or_default()
    }

    pub(crate) fn number_opt(&self, names: &[&str]) -> Option<f64> {
        self.lookup(names).and_then(as_number)
    }

    pub(crate) fn number(&self, names: &[&str]) -> f64 {
        self.number_opt(names).unwrap_or(0.0)
    }

    pub(crate) fn count(&self, names: &[&str]) -> u64 {
        self.lookup(names).and_then(as_count).unwrap_or(0)
    }

    pub(crate) fn integer(&self, names: &[&str]) -> i64 {
        self.number_opt(names).map(|n| n as i64).unwrap_or(0)
    }

    pub(crate) fn flag(&self, names: &[&str]) -> bool {
        match self.lookup(names) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
            Some(Value::String(s)) => matches!(s.trim(), "true" | "1"),
            _ => false,
        }
    }

    pub(crate) fn list(&self, names: &[&str]) -> &'a [Value] {
        self.lookup(names)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub(crate) fn strings(&self, names: &[&str]) -> Vec<String> {
        self.list(names)
            .iter()
            .filter_map(|value| match value {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn nested(&self, names: &[&str]) -> Fields<'a> {
        Fields {
            map: self.lookup(names).and_then(Value::as_object),
        }
    }

    pub(crate) fn number_map(&self, names: &[&str]) -> BTreeMap<String, f64> {
        self.entries(names)
            .filter_map(|(key, value)| as_number(value).map(|n| (key.clone(), n)))
            .collect()
    }

    /// Key/value pairs of a nested object
    pub(crate) fn entries(&self, names: &[&str]) -> impl Iterator<Item = (&'a String, &'a Value)> {
        self.lookup(names)
            .and_then(Value::as_object)
            .into_iter()
            .flat_map(|map| map.iter())
    }
}

/// Lifts the fields of an object-valued `wrapper` key to the top level
///
/// Fields inside the wrapper win; siblings of the wrapper fill the gaps.
/// Anything that is not `{wrapper: {...}}` is returned unchanged.
pub(crate) fn flatten(value: &Value, wrapper: &str) -> Value {
    let Some(outer) = value.as_object() else {
        return value.clone();
    };
    let Some(inner) = outer.get(wrapper).and_then(Value::as_object) else {
        return value.clone();
    };

    let mut merged = inner.clone();
    for (key, sibling) in outer {
        if key != wrapper && !merged.get(key).is_some_and(|v| !v.is_null()) {
            merged.insert(key.clone(), sibling.clone());
        }
    }
    Value::Object(merged)
}

pub(crate) fn as_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

fn as_count(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f as u64)),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    }
}
