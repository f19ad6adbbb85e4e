use miette::Diagnostic;
use thiserror::Error;

use strata_lang_ast::{Polarity, Unbound};
use strata_lang_printer::Print;

/// The result type specialized to type errors.
pub type TcResult<T = ()> = Result<T, Box<TypeError>>;

/// This enum contains all errors that can be emitted during elaboration, i.e. either
/// during bidirectional type inference, normalization or conversion checking.
///
/// Terms and types are stored in their printed form.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("Shadowing identifier: {identifier}")]
    #[diagnostic(
        code("T-001"),
        help("Identifiers cannot be rebound while they are in scope. Choose a different name.")
    )]
    Shadowing { identifier: String },
    #[error("{term} lives in {actual}, but {expected} was expected")]
    #[diagnostic(code("T-002"))]
    UniverseMismatch { term: String, expected: String, actual: String },
    #[error("Expected a {expected} quantifier while elaborating {context}, got {actual}")]
    #[diagnostic(code("T-003"))]
    PolarityMismatch { context: String, expected: Polarity, actual: Polarity },
    #[error("The record has {actual} members, but its signature declares {expected}")]
    #[diagnostic(code("T-004"))]
    ArityMismatch { expected: usize, actual: usize },
    #[error("Member {position} of the record is named {actual}, but its signature expects {expected}")]
    #[diagnostic(code("T-005"), help("Members must be defined in the order of the signature."))]
    MemberNameMismatch { position: usize, expected: String, actual: String },
    #[error("The signature {signature} has no member named {name}")]
    #[diagnostic(code("T-006"))]
    UnknownMember { name: String, signature: String },
    #[error("Cannot apply {operator}, its type {typ} is not a function type")]
    #[diagnostic(code("T-007"))]
    ExpectedFunction { operator: String, typ: String },
    #[error("Expected a record type for {term}, got {typ}")]
    #[diagnostic(code("T-008"))]
    ExpectedModule { term: String, typ: String },
    #[error("Expected {term} to be a type, but it is classified by {classifier}")]
    #[diagnostic(code("T-009"))]
    ExpectedType { term: String, classifier: String },
    #[error("{term} is a type and must be classified by a universe, got {expected}")]
    #[diagnostic(code("T-010"))]
    ExpectedUniverse { term: String, expected: String },
    #[error("{term} is a function and must be classified by a quantifier, got {expected}")]
    #[diagnostic(code("T-011"))]
    ExpectedQuantifier { term: String, expected: String },
    #[error("Quantifiers relate types, not terms: the codomain {codomain} has type {typ}")]
    #[diagnostic(code("T-012"))]
    QuantifierOverTerm { codomain: String, typ: String },
    #[error("Type class {class} must be a function, but has type {typ}")]
    #[diagnostic(code("T-013"))]
    ClassNotAFunction { class: String, typ: String },
    #[error("Type class {class} must map into a universe, but maps into {codomain}")]
    #[diagnostic(code("T-014"))]
    ClassNotIntoUniverse { class: String, codomain: String },
    #[error("A type class bound needs a named parameter")]
    #[diagnostic(code("T-015"))]
    ClassBoundNeedsName,
    #[error("Cannot infer the type of the unannotated parameter {identifier}")]
    #[diagnostic(code("T-016"), help("Annotate the parameter or provide a type for the function."))]
    CannotInferLambda { identifier: String },
    #[error("The return type {typ} depends on the parameter {identifier}")]
    #[diagnostic(code("T-017"), help("Annotate the function with a dependent function type."))]
    DependentReturnType { identifier: String, typ: String },
    #[error("The following terms are not equal:\n  1: {lhs}\n  2: {rhs}\n")]
    #[diagnostic(code("T-018"), help("While elaborating {while_elaborating}"))]
    NotEq { lhs: String, rhs: String, while_elaborating: String },
    #[error(transparent)]
    #[diagnostic(transparent)]
    Unbound(#[from] Unbound),
    #[error("The generic parameter {identifier} must be bound by a quantifier")]
    #[diagnostic(code("T-019"))]
    DanglingGeneric { identifier: String },
    #[error("The member access .{name} has no operator")]
    #[diagnostic(code("T-020"))]
    DanglingAccess { name: String },
    #[error("Failed to import {filename}: {message}")]
    #[diagnostic(code("T-021"))]
    Import { filename: String, message: String },
    /// This error should not occur.
    /// Some internal invariant has been violated.
    #[error("An unexpected internal error occurred: {message}")]
    #[diagnostic(code("T-XXX"))]
    Impossible { message: String },
}

impl TypeError {
    pub fn not_eq<L: Print, R: Print, E: Print>(lhs: &L, rhs: &R, while_elaborating: &E) -> Box<Self> {
        Box::new(TypeError::NotEq {
            lhs: lhs.print_trace(),
            rhs: rhs.print_trace(),
            while_elaborating: while_elaborating.print_trace(),
        })
    }

    pub fn expected_type<T: Print, C: Print>(term: &T, classifier: &C) -> Box<Self> {
        Box::new(TypeError::ExpectedType {
            term: term.print_trace(),
            classifier: classifier.print_trace(),
        })
    }

    pub fn impossible(message: impl Into<String>) -> Box<Self> {
        Box::new(TypeError::Impossible { message: message.into() })
    }
}

impl From<Unbound> for Box<TypeError> {
    fn from(err: Unbound) -> Self {
        Box::new(err.into())
    }
}
