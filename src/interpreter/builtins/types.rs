//! Inspection and conversion builtins.

use crate::value::Value;

pub fn len(args: &[Value]) -> Value {
    match &args[0] {
        Value::Str(s) => Value::Number(s.chars().count() as f64),
        Value::List(items) => Value::Number(items.borrow().len() as f64),
        _ => Value::Null,
    }
}

pub fn type_of(args: &[Value]) -> Value {
    Value::str(args[0].type_name())
}

pub fn to_string(args: &[Value]) -> Value {
    Value::str(args[0].to_output_string())
}

pub fn to_number(args: &[Value]) -> Value {
    match &args[0] {
        Value::Number(n) => Value::Number(*n),
        Value::Str(s) => match s.trim().parse::<f64>() {
            Ok(n) => Value::Number(n),
            Err(_) => Value::Null,
        },
        Value::Bool(true) => Value::Number(1.0),
        Value::Bool(false) => Value::Number(0.0),
        _ => Value::Null,
    }
}

pub fn to_boolean(args: &[Value]) -> Value {
    Value::Bool(args[0].is_truthy())
}

/// Strings explode into characters, lists pass through unchanged, and
/// anything else becomes a one-element list.
pub fn to_list(args: &[Value]) -> Value {
    match &args[0] {
        Value::Str(s) => Value::list(s.chars().map(|c| Value::str(c.to_string())).collect()),
        Value::List(_) => args[0].clone(),
        other => Value::list(vec![other.clone()]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn len_counts_characters_and_elements() {
        assert_eq!(len(&[Value::str("héllo")]), Value::Number(5.0));
        assert_eq!(
            len(&[Value::list(vec![Value::Null, Value::Null])]),
            Value::Number(2.0)
        );
        assert_eq!(len(&[Value::Number(3.0)]), Value::Null);
    }

    #[test]
    fn type_reports_canonical_names() {
        assert_eq!(type_of(&[Value::Number(1.0)]), Value::str("number"));
        assert_eq!(type_of(&[Value::Null]), Value::str("null"));
        assert_eq!(type_of(&[Value::list(vec![])]), Value::str("list"));
    }

    #[test]
    fn to_number_parses_and_maps_booleans() {
        assert_eq!(to_number(&[Value::str(" 2.5 ")]), Value::Number(2.5));
        assert_eq!(to_number(&[Value::Bool(true)]), Value::Number(1.0));
        assert_eq!(to_number(&[Value::str("two")]), Value::Null);
    }

    #[test]
    fn to_list_explodes_strings() {
        assert_eq!(
            to_list(&[Value::str("ab")]),
            Value::list(vec![Value::str("a"), Value::str("b")])
        );
        assert_eq!(
            to_list(&[Value::Number(1.0)]),
            Value::list(vec![Value::Number(1.0)])
        );
    }
}
