//! The native table: the fixed, innermost tier of name resolution.
//! Builtins never raise; per the registry failure policy an argument
//! that cannot be used comes back as `null`. Arity is checked by the
//! evaluator against the declared [`Arity`].

mod list;
mod math;
mod string;
mod types;

use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::Value;

pub type BuiltinFn = fn(&[Value]) -> Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Exact(usize),
    Between(usize, usize),
    AtLeast(usize),
}

impl Arity {
    pub fn accepts(&self, count: usize) -> bool {
        match self {
            Arity::Exact(n) => count == *n,
            Arity::Between(lo, hi) => count >= *lo && count <= *hi,
            Arity::AtLeast(n) => count >= *n,
        }
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arity::Exact(n) => write!(f, "{}", n),
            Arity::Between(lo, hi) => write!(f, "{} to {}", lo, hi),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

pub struct Builtin {
    pub name: &'static str,
    pub arity: Arity,
    pub func: BuiltinFn,
}

impl fmt::Debug for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<builtin {}>", self.name)
    }
}

/// Immutable name-to-native-function table, populated once and shared
/// by every environment as the last resolution tier.
#[derive(Debug)]
pub struct BuiltinRegistry {
    table: IndexMap<&'static str, Rc<Builtin>>,
}

impl BuiltinRegistry {
    pub fn standard() -> Self {
        let mut registry = BuiltinRegistry {
            table: IndexMap::new(),
        };
        let entries: &[(&'static str, Arity, BuiltinFn)] = &[
            // Inspection and conversion
            ("len", Arity::Exact(1), types::len),
            ("type", Arity::Exact(1), types::type_of),
            ("toString", Arity::Exact(1), types::to_string),
            ("toNumber", Arity::Exact(1), types::to_number),
            ("toBoolean", Arity::Exact(1), types::to_boolean),
            ("toList", Arity::Exact(1), types::to_list),
            // Math
            ("abs", Arity::Exact(1), math::abs),
            ("floor", Arity::Exact(1), math::floor),
            ("ceil", Arity::Exact(1), math::ceil),
            ("round", Arity::Exact(1), math::round),
            ("sqrt", Arity::Exact(1), math::sqrt),
            ("pow", Arity::Exact(2), math::pow),
            ("max", Arity::AtLeast(1), math::max),
            ("min", Arity::AtLeast(1), math::min),
            ("random", Arity::Exact(0), math::random),
            ("randomInt", Arity::Exact(2), math::random_int),
            ("range", Arity::Between(1, 2), math::range),
            // Strings
            ("substring", Arity::Exact(3), string::substring),
            ("split", Arity::Exact(2), string::split),
            ("trim", Arity::Exact(1), string::trim),
            ("upper", Arity::Exact(1), string::upper),
            ("lower", Arity::Exact(1), string::lower),
            ("contains", Arity::Exact(2), string::contains),
            ("startsWith", Arity::Exact(2), string::starts_with),
            ("endsWith", Arity::Exact(2), string::ends_with),
            ("replace", Arity::Exact(3), string::replace),
            ("indexOf", Arity::Exact(2), string::index_of),
            ("join", Arity::Exact(2), string::join),
            // Lists
            ("append", Arity::Exact(2), list::append),
            ("removeAt", Arity::Exact(2), list::remove_at),
            ("sort", Arity::Exact(1), list::sort),
            ("reverse", Arity::Exact(1), list::reverse),
        ];
        for (name, arity, func) in entries {
            registry.table.insert(
                name,
                Rc::new(Builtin {
                    name,
                    arity: *arity,
                    func: *func,
                }),
            );
        }
        registry
    }

    pub fn get(&self, name: &str) -> Option<Rc<Builtin>> {
        self.table.get(name).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.table.keys().copied()
    }
}

/// Numeric coercion shared by the math builtins: numbers pass through
/// and numeric strings convert; anything else is unusable.
pub(crate) fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => Some(*n),
        Value::Str(s) => s.trim().parse().ok(),
        _ => None,
    }
}

pub(crate) fn as_str(value: &Value) -> Option<&str> {
    match value {
        Value::Str(s) => Some(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_standard_table_is_complete() {
        let registry = BuiltinRegistry::standard();
        for name in ["len", "type", "range", "substring", "append", "randomInt"] {
            assert!(registry.contains(name), "missing {}", name);
        }
        assert!(!registry.contains("eval"));
    }

    #[test]
    fn arity_shapes() {
        assert!(Arity::Exact(2).accepts(2));
        assert!(!Arity::Exact(2).accepts(1));
        assert!(Arity::Between(1, 2).accepts(1));
        assert!(!Arity::Between(1, 2).accepts(3));
        assert!(Arity::AtLeast(1).accepts(5));
    }

    #[test]
    fn numeric_coercion_accepts_numeric_strings() {
        assert_eq!(coerce_number(&Value::str(" 42 ")), Some(42.0));
        assert_eq!(coerce_number(&Value::str("nope")), None);
        assert_eq!(coerce_number(&Value::Bool(true)), None);
    }
}
