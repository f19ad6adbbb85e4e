//! The bindings every session starts with: the base types `int` and `string` and
//! arithmetic on them.
//!
//! Binary operations are curried host functions, e.g. `plus : int -> int -> int`.

use strata_lang_ast::*;

pub const INT: &str = "int";
pub const STRING: &str = "string";

/// An integer literal.
pub fn int(n: i64) -> Term {
    Term::constant(Classification::new(Universe::BASE, TypedTerm::var(INT), Value::Int(n)))
}

/// A string literal.
pub fn string(s: impl Into<String>) -> Term {
    Term::constant(Classification::new(Universe::BASE, TypedTerm::var(STRING), Value::Str(s.into())))
}

/// The prelude, outermost binding first.
pub fn bindings() -> Vec<(&'static str, Classification<Value>)> {
    let mut bindings = vec![(INT, base_type()), (STRING, base_type())];
    let arithmetic: [(&str, &str, fn(i64, i64) -> Option<i64>); 3] = [
        ("plus", "+", i64::checked_add),
        ("minus", "-", i64::checked_sub),
        ("times", "*", i64::checked_mul),
    ];
    for (name, alias, op) in arithmetic {
        let fun = binary(name, INT, move |lhs, rhs| {
            let (Some(lhs), Some(rhs)) = (lhs.as_int(), rhs.as_int()) else {
                return Err(HostError::new(format!("{name} expects integers, got {lhs} and {rhs}")));
            };
            op(lhs, rhs).map(Value::Int).ok_or_else(|| HostError::new(format!("{name}: integer overflow")))
        });
        bindings.push((name, fun.clone()));
        bindings.push((alias, fun));
    }
    let concat = binary("concat", STRING, |lhs, rhs| match (lhs.as_str(), rhs.as_str()) {
        (Some(lhs), Some(rhs)) => Ok(Value::Str(format!("{lhs}{rhs}"))),
        _ => Err(HostError::new(format!("concat expects strings, got {lhs} and {rhs}"))),
    });
    bindings.push(("concat", concat.clone()));
    bindings.push(("++", concat));
    bindings
}

pub fn environment() -> Environment<Classification<Value>> {
    bindings().into_iter().collect()
}

/// A type in the base universe. Types have no runtime value.
fn base_type() -> Classification<Value> {
    Classification::new(Universe::BASE.succ(), TypedTerm::Universe(Universe::BASE), Value::Absent)
}

/// A curried host function of type `operand -> operand -> operand`.
fn binary<F>(name: &'static str, operand: &str, op: F) -> Classification<Value>
where
    F: Fn(&Value, &Value) -> HostResult + Clone + 'static,
{
    let fun = HostFn::new(name, move |lhs: Value| {
        let op = op.clone();
        Ok(HostFn::new(format!("{name} {lhs}"), move |rhs: Value| op(&lhs, &rhs)).into())
    });
    let domain = || Classification::new(Universe::BASE, TypedTerm::var(operand), ANONYMOUS.to_owned());
    let typ = TypedTerm::quantified(
        Polarity::Forall,
        domain(),
        TypedTerm::quantified(Polarity::Forall, domain(), TypedTerm::var(operand)),
    );
    Classification::new(Universe::BASE, typ, fun.into())
}

#[cfg(test)]
mod tests {
    use strata_lang_printer::Print;

    use super::*;

    fn lookup(name: &str) -> Classification<Value> {
        environment().lookup(name).cloned().unwrap()
    }

    fn call(fun: &Value, lhs: Value, rhs: Value) -> HostResult {
        let Value::Host(fun) = fun else { panic!("expected a host function") };
        let Value::Host(partial) = fun.call(lhs)? else { panic!("expected a partial application") };
        partial.call(rhs)
    }

    #[test]
    fn arithmetic_is_curried() {
        let plus = lookup("+");
        assert_eq!(plus.typ.print_to_string(None), "int -> int -> int");
        assert_eq!(call(&plus.term, Value::Int(2), Value::Int(3)), Ok(Value::Int(5)));
        assert_eq!(call(&lookup("times").term, Value::Int(2), Value::Int(3)), Ok(Value::Int(6)));
        assert_eq!(call(&lookup("minus").term, Value::Int(2), Value::Int(3)), Ok(Value::Int(-1)));
    }

    #[test]
    fn overflow_is_an_error() {
        assert!(call(&lookup("plus").term, Value::Int(i64::MAX), Value::Int(1)).is_err());
    }

    #[test]
    fn strings_concatenate() {
        let concat = lookup("++");
        assert_eq!(concat.typ.print_to_string(None), "string -> string -> string");
        assert_eq!(call(&concat.term, "a".into(), "b".into()), Ok(Value::Str("ab".to_owned())));
        assert!(call(&concat.term, Value::Int(1), "b".into()).is_err());
    }

    #[test]
    fn base_types_have_no_value() {
        assert!(lookup(INT).term.is_absent());
        assert_eq!(lookup(STRING).universe, Universe::new(1));
    }
}
