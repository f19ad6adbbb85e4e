use miette::Diagnostic;
use thiserror::Error;

use strata_lang_ast::{HostError, Unbound};

pub type RuntimeResult<T = ()> = Result<T, Box<RuntimeError>>;

/// Errors raised while evaluating elaborated terms.
///
/// Apart from failing host functions, these errors only occur when the evaluated
/// term was not produced by a successful elaboration.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unbound(#[from] Unbound),
    #[error("Cannot evaluate {term}, it is a type in {universe}")]
    #[diagnostic(code("R-001"), help("Only terms in the base universe have a runtime value."))]
    NotAValue { term: String, universe: String },
    #[error("Cannot apply {value}, it is not a function")]
    #[diagnostic(code("R-002"))]
    NotAFunction { value: String },
    #[error("Cannot project from {value}, it is not a record")]
    #[diagnostic(code("R-003"))]
    NotARecord { value: String },
    #[error("The record {value} has no member #{member}")]
    #[diagnostic(code("R-004"))]
    MemberOutOfRange { value: String, member: usize },
    #[error(transparent)]
    #[diagnostic(transparent)]
    Host(#[from] HostError),
}

impl From<Unbound> for Box<RuntimeError> {
    fn from(err: Unbound) -> Self {
        Box::new(err.into())
    }
}

impl From<HostError> for Box<RuntimeError> {
    fn from(err: HostError) -> Self {
        Box::new(err.into())
    }
}
