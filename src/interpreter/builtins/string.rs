//! String builtins. Positions are character counts, not bytes, so
//! multibyte text behaves the way scripts expect.

use super::{as_str, coerce_number};
use crate::value::Value;

/// `substring(s, start, end)`, half-open and clamped at both ends.
pub fn substring(args: &[Value]) -> Value {
    let (Some(s), Some(start), Some(end)) = (
        as_str(&args[0]),
        coerce_number(&args[1]),
        coerce_number(&args[2]),
    ) else {
        return Value::Null;
    };
    let chars: Vec<char> = s.chars().collect();
    let len = chars.len() as i64;
    let clamp = |n: f64| -> usize {
        let mut i = n.floor() as i64;
        if i < 0 {
            i += len;
        }
        i.clamp(0, len) as usize
    };
    let (start, end) = (clamp(start), clamp(end));
    if start >= end {
        return Value::str("");
    }
    Value::str(chars[start..end].iter().collect::<String>())
}

pub fn split(args: &[Value]) -> Value {
    let (Some(s), Some(sep)) = (as_str(&args[0]), as_str(&args[1])) else {
        return Value::Null;
    };
    let parts: Vec<Value> = if sep.is_empty() {
        s.chars().map(|c| Value::str(c.to_string())).collect()
    } else {
        s.split(sep).map(Value::str).collect()
    };
    Value::list(parts)
}

pub fn trim(args: &[Value]) -> Value {
    match as_str(&args[0]) {
        Some(s) => Value::str(s.trim()),
        None => Value::Null,
    }
}

pub fn upper(args: &[Value]) -> Value {
    match as_str(&args[0]) {
        Some(s) => Value::str(s.to_uppercase()),
        None => Value::Null,
    }
}

pub fn lower(args: &[Value]) -> Value {
    match as_str(&args[0]) {
        Some(s) => Value::str(s.to_lowercase()),
        None => Value::Null,
    }
}

pub fn contains(args: &[Value]) -> Value {
    match (&args[0], &args[1]) {
        (Value::Str(s), Value::Str(needle)) => Value::Bool(s.contains(needle.as_ref())),
        (Value::List(items), needle) => {
            Value::Bool(items.borrow().iter().any(|v| v == needle))
        }
        _ => Value::Null,
    }
}

pub fn starts_with(args: &[Value]) -> Value {
    match (as_str(&args[0]), as_str(&args[1])) {
        (Some(s), Some(prefix)) => Value::Bool(s.starts_with(prefix)),
        _ => Value::Null,
    }
}

pub fn ends_with(args: &[Value]) -> Value {
    match (as_str(&args[0]), as_str(&args[1])) {
        (Some(s), Some(suffix)) => Value::Bool(s.ends_with(suffix)),
        _ => Value::Null,
    }
}

/// Replaces every occurrence.
pub fn replace(args: &[Value]) -> Value {
    match (as_str(&args[0]), as_str(&args[1]), as_str(&args[2])) {
        (Some(s), Some(from), Some(to)) if !from.is_empty() => {
            Value::str(s.replace(from, to))
        }
        _ => Value::Null,
    }
}

/// First match in a string or a list, `-1` when absent.
pub fn index_of(args: &[Value]) -> Value {
    match (&args[0], &args[1]) {
        (Value::Str(s), Value::Str(needle)) => {
            let found = s
                .char_indices()
                .enumerate()
                .find(|(_, (byte, _))| s[*byte..].starts_with(needle.as_ref()))
                .map(|(char_index, _)| char_index as f64);
            Value::Number(found.unwrap_or(-1.0))
        }
        (Value::List(items), needle) => {
            let found = items.borrow().iter().position(|v| v == needle);
            Value::Number(found.map(|i| i as f64).unwrap_or(-1.0))
        }
        _ => Value::Null,
    }
}

pub fn join(args: &[Value]) -> Value {
    let (Value::List(items), Some(sep)) = (&args[0], as_str(&args[1])) else {
        return Value::Null;
    };
    let parts: Vec<String> = items
        .borrow()
        .iter()
        .map(|v| v.to_output_string())
        .collect();
    Value::str(parts.join(sep))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substring_clamps_and_counts_characters() {
        let s = Value::str("héllo");
        assert_eq!(
            substring(&[s.clone(), Value::Number(1.0), Value::Number(3.0)]),
            Value::str("él")
        );
        assert_eq!(
            substring(&[s.clone(), Value::Number(2.0), Value::Number(99.0)]),
            Value::str("llo")
        );
        assert_eq!(
            substring(&[s, Value::Number(4.0), Value::Number(2.0)]),
            Value::str("")
        );
    }

    #[test]
    fn split_on_empty_separator_yields_characters() {
        assert_eq!(
            split(&[Value::str("ab"), Value::str("")]),
            Value::list(vec![Value::str("a"), Value::str("b")])
        );
    }

    #[test]
    fn index_of_works_on_both_strings_and_lists() {
        assert_eq!(
            index_of(&[Value::str("banana"), Value::str("na")]),
            Value::Number(2.0)
        );
        let list = Value::list(vec![Value::str("a"), Value::str("b")]);
        assert_eq!(index_of(&[list, Value::str("b")]), Value::Number(1.0));
        assert_eq!(
            index_of(&[Value::str("abc"), Value::str("z")]),
            Value::Number(-1.0)
        );
    }

    #[test]
    fn join_stringifies_elements() {
        let list = Value::list(vec![Value::Number(1.0), Value::str("two")]);
        assert_eq!(join(&[list, Value::str(", ")]), Value::str("1, two"));
    }

    #[test]
    fn non_strings_yield_null() {
        assert_eq!(trim(&[Value::Number(1.0)]), Value::Null);
        assert_eq!(upper(&[Value::Null]), Value::Null);
    }
}
