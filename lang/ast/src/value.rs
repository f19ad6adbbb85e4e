//! Runtime values. Constants embedded in terms carry one of these as their payload.

use std::fmt;
use std::rc::Rc;

use derivative::Derivative;
use miette::Diagnostic;
use pretty::DocAllocator;
use strata_lang_printer::{
    Alloc, Builder, Precedence, Print, PrintCfg,
    theme::ThemeExt,
    tokens::{ABSENT, BACKSLASH, COMMA},
    util::sep_by,
};
use thiserror::Error;

use crate::{Environment, TypedTerm};

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Types and universes have no runtime representation
    Absent,
    Int(i64),
    Str(String),
    Record(Vec<Value>),
    Closure(Closure),
    Host(HostFn),
}

/// A lambda together with the environment it was evaluated in.
#[derive(Clone, Derivative)]
#[derivative(Debug, PartialEq)]
pub struct Closure {
    #[derivative(Debug = "ignore", PartialEq = "ignore")]
    pub env: Environment<Value>,
    pub identifier: String,
    #[derivative(PartialEq(compare_with = "Rc::ptr_eq"))]
    pub body: Rc<TypedTerm>,
}

pub type HostResult = Result<Value, HostError>;

/// A function provided by the host, such as integer addition.
#[derive(Clone, Derivative)]
#[derivative(Debug, PartialEq)]
pub struct HostFn {
    pub name: String,
    #[derivative(Debug = "ignore", PartialEq(compare_with = "same_function"))]
    pub fun: Rc<dyn Fn(Value) -> HostResult>,
}

fn same_function(lhs: &Rc<dyn Fn(Value) -> HostResult>, rhs: &Rc<dyn Fn(Value) -> HostResult>) -> bool {
    Rc::ptr_eq(lhs, rhs)
}

impl HostFn {
    pub fn new<F>(name: impl Into<String>, fun: F) -> Self
    where
        F: Fn(Value) -> HostResult + 'static,
    {
        HostFn { name: name.into(), fun: Rc::new(fun) }
    }

    pub fn call(&self, argument: Value) -> HostResult {
        (self.fun)(argument)
    }
}

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
#[diagnostic(code("H-001"))]
pub struct HostError {
    pub message: String,
}

impl HostError {
    pub fn new(message: impl Into<String>) -> Self {
        HostError { message: message.into() }
    }

    /// The argument of a host function does not have the expected shape.
    pub fn unexpected(expected: &str, got: &Value) -> Self {
        HostError::new(format!("Expected {expected}, got {got}"))
    }
}

impl Value {
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<HostFn> for Value {
    fn from(fun: HostFn) -> Self {
        Value::Host(fun)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.print_to_string(None))
    }
}

impl Print for Value {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        match self {
            Value::Absent => alloc.text(ABSENT),
            Value::Int(n) => alloc.literal(n.to_string()),
            Value::Str(s) => alloc.literal(format!("{s:?}")),
            Value::Record(members) => {
                let members = members.iter().map(|member| member.print(cfg, alloc));
                sep_by(alloc, members, COMMA).braces().group()
            }
            Value::Closure(Closure { identifier, .. }) => {
                alloc.text(format!("<closure {BACKSLASH}{identifier}>"))
            }
            Value::Host(HostFn { name, .. }) => alloc.text(format!("<host {name}>")),
        }
    }
}
