//! List builtins. `append` and `removeAt` mutate the shared list and
//! hand it back; `sort` and `reverse` build fresh lists.

use std::cmp::Ordering;

use super::coerce_number;
use crate::value::Value;

pub fn append(args: &[Value]) -> Value {
    let Value::List(items) = &args[0] else {
        return Value::Null;
    };
    items.borrow_mut().push(args[1].clone());
    args[0].clone()
}

pub fn remove_at(args: &[Value]) -> Value {
    let (Value::List(items), Some(index)) = (&args[0], coerce_number(&args[1])) else {
        return Value::Null;
    };
    let mut items_ref = items.borrow_mut();
    let len = items_ref.len() as i64;
    let mut i = index.floor() as i64;
    if i < 0 {
        i += len;
    }
    if i < 0 || i >= len {
        return Value::Null;
    }
    items_ref.remove(i as usize);
    drop(items_ref);
    args[0].clone()
}

/// Ascending sort over all-number or all-string lists; a mixed list is
/// unusable and answers `null`.
pub fn sort(args: &[Value]) -> Value {
    let Value::List(items) = &args[0] else {
        return Value::Null;
    };
    let items = items.borrow();
    if items.iter().all(|v| matches!(v, Value::Number(_))) {
        let mut sorted = items.clone();
        sorted.sort_by(|a, b| match (a, b) {
            (Value::Number(x), Value::Number(y)) => {
                x.partial_cmp(y).unwrap_or(Ordering::Equal)
            }
            _ => Ordering::Equal,
        });
        return Value::list(sorted);
    }
    if items.iter().all(|v| matches!(v, Value::Str(_))) {
        let mut sorted = items.clone();
        sorted.sort_by(|a, b| match (a, b) {
            (Value::Str(x), Value::Str(y)) => x.cmp(y),
            _ => Ordering::Equal,
        });
        return Value::list(sorted);
    }
    Value::Null
}

pub fn reverse(args: &[Value]) -> Value {
    let Value::List(items) = &args[0] else {
        return Value::Null;
    };
    let reversed: Vec<Value> = items.borrow().iter().rev().cloned().collect();
    Value::list(reversed)
}
