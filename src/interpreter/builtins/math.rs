//! Numeric builtins. All of them coerce numeric strings and answer
//! `null` for anything unusable.

use rand::Rng;

use super::coerce_number;
use crate::value::Value;

macro_rules! unary_math {
    ($name:ident, $op:ident) => {
        pub fn $name(args: &[Value]) -> Value {
            match coerce_number(&args[0]) {
                Some(n) => Value::Number(n.$op()),
                None => Value::Null,
            }
        }
    };
}

unary_math!(abs, abs);
unary_math!(floor, floor);
unary_math!(ceil, ceil);
unary_math!(round, round);

pub fn sqrt(args: &[Value]) -> Value {
    match coerce_number(&args[0]) {
        Some(n) if n >= 0.0 => Value::Number(n.sqrt()),
        _ => Value::Null,
    }
}

pub fn pow(args: &[Value]) -> Value {
    match (coerce_number(&args[0]), coerce_number(&args[1])) {
        (Some(base), Some(exp)) => Value::Number(base.powf(exp)),
        _ => Value::Null,
    }
}

/// `max(a, b, ...)` or `max(list)`.
pub fn max(args: &[Value]) -> Value {
    fold_extremum(args, f64::max)
}

pub fn min(args: &[Value]) -> Value {
    fold_extremum(args, f64::min)
}

fn fold_extremum(args: &[Value], pick: fn(f64, f64) -> f64) -> Value {
    let numbers: Option<Vec<f64>> = match args {
        [Value::List(items)] => items.borrow().iter().map(coerce_number).collect(),
        _ => args.iter().map(coerce_number).collect(),
    };
    match numbers {
        Some(ns) if !ns.is_empty() => {
            Value::Number(ns.into_iter().reduce(pick).unwrap_or(0.0))
        }
        _ => Value::Null,
    }
}

pub fn random(_args: &[Value]) -> Value {
    Value::Number(rand::thread_rng().gen::<f64>())
}

/// Inclusive on both ends, like rolling dice.
pub fn random_int(args: &[Value]) -> Value {
    match (coerce_number(&args[0]), coerce_number(&args[1])) {
        (Some(lo), Some(hi)) => {
            let lo = lo.floor() as i64;
            let hi = hi.floor() as i64;
            if lo > hi {
                return Value::Null;
            }
            Value::Number(rand::thread_rng().gen_range(lo..=hi) as f64)
        }
        _ => Value::Null,
    }
}

/// `range(n)` counts 0..n; `range(a, b)` counts a..b. Half-open.
pub fn range(args: &[Value]) -> Value {
    let (start, end) = match args {
        [end] => (Some(0.0), coerce_number(end)),
        [start, end] => (coerce_number(start), coerce_number(end)),
        _ => (None, None),
    };
    match (start, end) {
        (Some(start), Some(end)) => {
            let start = start.floor() as i64;
            let end = end.floor() as i64;
            let items = (start..end).map(|i| Value::Number(i as f64)).collect();
            Value::list(items)
        }
        _ => Value::Null,
    }
}
