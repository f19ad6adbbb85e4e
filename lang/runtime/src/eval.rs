use log::trace;

use strata_lang_ast::*;
use strata_lang_printer::Print;

use crate::result::{RuntimeError, RuntimeResult};

/// The runtime environment maps identifiers to values.
pub type Env = Environment<Value>;

/// Evaluate the term of a classification in the base universe.
pub fn evaluate(env: &Env, classification: &Classification<TypedTerm>) -> RuntimeResult<Value> {
    if !classification.universe.is_base() {
        return Err(Box::new(RuntimeError::NotAValue {
            term: classification.term.print_trace(),
            universe: classification.universe.print_trace(),
        }));
    }
    classification.term.eval(env)
}

pub trait Eval {
    fn eval(&self, env: &Env) -> RuntimeResult<Value>;
}

impl<T: Eval> Eval for Box<T> {
    fn eval(&self, env: &Env) -> RuntimeResult<Value> {
        (**self).eval(env)
    }
}

impl Eval for TypedTerm {
    fn eval(&self, env: &Env) -> RuntimeResult<Value> {
        let value = match self {
            TypedTerm::Universe(_) | TypedTerm::Type(_) => Ok(Value::Absent),
            TypedTerm::Constructor(Constructors::Arrow(TypedLambda { identifier, body })) => {
                Ok(Value::Closure(Closure {
                    env: env.clone(),
                    identifier: identifier.clone(),
                    body: body.clone(),
                }))
            }
            TypedTerm::Constructor(Constructors::Module(TypedModule { members })) => {
                let members = members.iter().map(|member| member.eval(env)).collect::<RuntimeResult<_>>()?;
                Ok(Value::Record(members))
            }
            TypedTerm::Destructor(destructor) => destructor.eval(env),
            TypedTerm::Variable(name) => Ok(env.lookup(name)?.clone()),
            TypedTerm::Constant(value) => Ok(value.clone()),
        };
        if let Ok(value) = &value {
            trace!("{} ▷ {}", self.print_trace(), value.print_trace());
        }
        value
    }
}

impl Eval for Destructor {
    fn eval(&self, env: &Env) -> RuntimeResult<Value> {
        let Destructor { operator, content } = self;
        let operator = operator.term.eval(env)?;
        match content {
            Destructors::Arrow(TypedApply { operand }) => {
                let operand = operand.eval(env)?;
                apply(operator, operand)
            }
            Destructors::Module(TypedMemberAccess { member }) => match &operator {
                Value::Record(members) => members.get(*member).cloned().ok_or_else(|| {
                    Box::new(RuntimeError::MemberOutOfRange {
                        value: operator.print_trace(),
                        member: *member,
                    })
                }),
                _ => Err(Box::new(RuntimeError::NotARecord { value: operator.print_trace() })),
            },
        }
    }
}

/// Apply a closure or a host function to an argument.
pub fn apply(function: Value, argument: Value) -> RuntimeResult<Value> {
    match function {
        Value::Closure(Closure { env, identifier, body }) => body.eval(&env.push(identifier, argument)),
        Value::Host(fun) => Ok(fun.call(argument)?),
        other => Err(Box::new(RuntimeError::NotAFunction { value: other.print_trace() })),
    }
}
