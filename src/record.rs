//! Records, the single/sequence item wrapper, and loose key comparison.

use serde_json::{Map, Value};

/// An open-ended mapping from field name to value.
pub type Record = Map<String, Value>;

/// One item or a sequence of items.
///
/// Used both for the caller's input and for the merge output, so a caller
/// passing one record gets one handle back and a caller passing a sequence
/// gets a sequence of the same length back.
#[derive(Debug, Clone, PartialEq)]
pub enum Items<T> {
    One(T),
    Many(Vec<T>),
}

impl<T> Items<T> {
    pub fn len(&self) -> usize {
        match self {
            Items::One(_) => 1,
            Items::Many(items) => items.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_many(&self) -> bool {
        matches!(self, Items::Many(_))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        match self {
            Items::One(item) => std::slice::from_ref(item).iter(),
            Items::Many(items) => items.iter(),
        }
    }

    /// Apply `f` to every element, keeping the shape.
    pub fn map<U, F>(self, mut f: F) -> Items<U>
    where
        F: FnMut(T) -> U,
    {
        match self {
            Items::One(item) => Items::One(f(item)),
            Items::Many(items) => Items::Many(items.into_iter().map(f).collect()),
        }
    }

    /// Flatten into a vector, forgetting the shape.
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Items::One(item) => vec![item],
            Items::Many(items) => items,
        }
    }
}

impl Items<Value> {
    /// Collapse into a single JSON value: the record itself for `One`, an array for `Many`.
    pub fn into_value(self) -> Value {
        match self {
            Items::One(value) => value,
            Items::Many(values) => Value::Array(values),
        }
    }
}

impl<T> From<Vec<T>> for Items<T> {
    fn from(items: Vec<T>) -> Self {
        Items::Many(items)
    }
}

/// Coercive equality for primary-key values.
///
/// A number matches its string form (`1 == "1"`, `1 == " 1 "`,
/// `16 == "0x10"`), booleans compare as `0`/`1`, `null` only matches
/// `null`. Containers compare structurally and never match a primitive.
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::String(x), Value::String(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Number(_), Value::Number(_))
        | (Value::Number(_), Value::String(_))
        | (Value::String(_), Value::Number(_))
        | (Value::Bool(_), Value::Number(_))
        | (Value::Number(_), Value::Bool(_))
        | (Value::Bool(_), Value::String(_))
        | (Value::String(_), Value::Bool(_)) => match (to_number(a), to_number(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        },
        (Value::Array(_), Value::Array(_)) | (Value::Object(_), Value::Object(_)) => a == b,
        _ => false,
    }
}

fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Some(0.0);
            }
            if let Some(n) = parse_radix(trimmed) {
                return Some(n);
            }
            trimmed.parse::<f64>().ok().filter(|n| n.is_finite())
        }
        _ => None,
    }
}

/// `0x`/`0o`/`0b` literals, unsigned only.
fn parse_radix(s: &str) -> Option<f64> {
    let radix = match s.get(..2)? {
        "0x" | "0X" => 16,
        "0o" | "0O" => 8,
        "0b" | "0B" => 2,
        _ => return None,
    };
    let digits = &s[2..];
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok().map(|n| n as f64)
}

/// Identity comparison for key values: numbers compare by value
/// (`1` and `1.0` are the same key), everything else structurally.
pub fn strict_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x.as_f64() == y.as_f64(),
        _ => a == b,
    }
}

/// Render a value the way string interpolation does in a dynamic language.
///
/// Strings are printed raw, arrays are comma-joined, objects collapse to
/// `[object Object]`. Used to echo offending values in validation errors.
pub(crate) fn display_loose(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => display_loose(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Compact JSON rendering of a record, for error messages.
pub(crate) fn to_json(record: &Record) -> String {
    serde_json::to_string(record).unwrap_or_else(|_| "{}".to_string())
}
