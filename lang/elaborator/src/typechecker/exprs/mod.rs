pub mod access;
pub mod anno;
pub mod apply;
pub mod lambda;
pub mod literal;
pub mod local_let;
pub mod module;
pub mod quantified;
pub mod type_univ;
pub mod variable;

use log::trace;

use strata_lang_ast::*;
use strata_lang_printer::Print;

use super::ctx::Ctx;
use crate::conversion_checking::convert;
use crate::result::{TcResult, TypeError};

/// The CheckInfer trait for bidirectional type inference.
/// Terms which implement this trait provide both a `check` function
/// to elaborate the term against an expected type and an `infer` function
/// to synthesize the classification of the term.
pub trait CheckInfer {
    /// Checks whether the term has the given expected type. For checking we use
    /// the following syntax:
    /// ```text
    ///            Γ ⊢ e ⇐ τ
    /// ```
    /// - Γ: The context of bound identifiers.
    /// - τ: The expected type, classified by its universe: `t` is the judgement `τ : Type_u`.
    ///
    /// Returns the elaborated term, which is classified by `τ`.
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm>;
    /// Tries to synthesize a classification for the given term. For inference we use the
    /// following syntax:
    /// ```text
    ///            Γ ⊢ e ⇒ τ
    /// ```
    /// - Γ: The context of bound identifiers.
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>>;
}

impl<T: CheckInfer> CheckInfer for Box<T> {
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        (**self).check(ctx, t)
    }

    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        (**self).infer(ctx)
    }
}

// Terms
//
//

impl CheckInfer for Term {
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        trace!("{} |- {} <= {}", ctx.print_trace(), self.print_trace(), t.term.print_trace());
        match self {
            Term::Universe(e) => e.check(ctx, t),
            Term::Quantified(e) => e.check(ctx, t),
            Term::Lambda(e) => e.check(ctx, t),
            Term::Apply(e) => e.check(ctx, t),
            Term::Module(e) => e.check(ctx, t),
            Term::New(e) => e.check(ctx, t),
            Term::Access(e) => e.check(ctx, t),
            Term::Generic(e) => e.check(ctx, t),
            Term::Variable(e) => e.check(ctx, t),
            Term::Annotation(e) => e.check(ctx, t),
            Term::LetBinding(e) => e.check(ctx, t),
            Term::Constant(e) => e.check(ctx, t),
            Term::TypeOf(e) => e.check(ctx, t),
            Term::Import(e) => e.check(ctx, t),
        }
    }

    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let res = match self {
            Term::Universe(e) => e.infer(ctx),
            Term::Quantified(e) => e.infer(ctx),
            Term::Lambda(e) => e.infer(ctx),
            Term::Apply(e) => e.infer(ctx),
            Term::Module(e) => e.infer(ctx),
            Term::New(e) => e.infer(ctx),
            Term::Access(e) => e.infer(ctx),
            Term::Generic(e) => e.infer(ctx),
            Term::Variable(e) => e.infer(ctx),
            Term::Annotation(e) => e.infer(ctx),
            Term::LetBinding(e) => e.infer(ctx),
            Term::Constant(e) => e.infer(ctx),
            Term::TypeOf(e) => e.infer(ctx),
            Term::Import(e) => e.infer(ctx),
        };
        if let Ok(classification) = &res {
            trace!(
                "{} |- {} => {}",
                ctx.print_trace(),
                self.print_trace(),
                classification.typ.print_trace()
            );
        }
        res
    }
}

/// Elaborate `term`, checking it against `expected` if a type is available and
/// synthesizing its classification otherwise.
pub fn ensure(
    term: &Term,
    ctx: &Ctx,
    expected: Option<&Classification<TypedTerm>>,
) -> TcResult<Classification<TypedTerm>> {
    match expected {
        Some(t) => {
            let elaborated = term.check(ctx, t)?;
            t.shift_down(elaborated).ok_or_else(|| TypeError::expected_type(&t.term, &t.typ))
        }
        None => term.infer(ctx),
    }
}

/// Infer the classification of a type and declare `identifier` to range over it.
pub fn declare(ctx: &Ctx, typ: &Term, identifier: &str) -> TcResult<Classification<String>> {
    let classification = ctx.normalized(&typ.infer(ctx)?)?;
    classification.declared(identifier).ok_or_else(|| TypeError::expected_type(typ, &classification.typ))
}

/// The checking rule for terms whose classification can always be synthesized:
/// ```text
///            Γ ⊢ e ⇒ σ
///            Γ ⊢ σ ≃ τ
///           ───────────────
///            Γ ⊢ e ⇐ τ
/// ```
pub fn check_by_inference<T: CheckInfer>(
    term: &T,
    ctx: &Ctx,
    t: &Classification<TypedTerm>,
) -> TcResult<TypedTerm> {
    let inferred = term.infer(ctx)?;
    convert(ctx.env(), &inferred.type_of(), t)?;
    Ok(inferred.term)
}

/// Like [`check_by_inference`], but a type checked against a universe of another rank is
/// reported as a [`TypeError::UniverseMismatch`].
pub fn check_type_by_inference<T: CheckInfer + Print>(
    term: &T,
    ctx: &Ctx,
    t: &Classification<TypedTerm>,
) -> TcResult<TypedTerm> {
    let inferred = term.infer(ctx)?;
    match (ctx.normalize(&t.term)?, ctx.normalize(&inferred.typ)?) {
        (TypedTerm::Universe(expected), TypedTerm::Universe(actual)) if expected != actual => {
            return Err(Box::new(TypeError::UniverseMismatch {
                term: term.print_trace(),
                expected: expected.print_trace(),
                actual: actual.print_trace(),
            }));
        }
        _ => {}
    }
    convert(ctx.env(), &inferred.type_of(), t)?;
    Ok(inferred.term)
}

#[cfg(test)]
pub(crate) mod test_util {
    use strata_lang_ast::*;

    use crate::result::TcResult;
    use crate::typechecker::{NoImports, check_program};

    pub fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    /// A context with the opaque base type `int : Type`.
    pub fn base_env() -> Environment<Classification<TypedTerm>> {
        let int = Classification::new(Universe::new(1), TypedTerm::Universe(Universe::BASE), TypedTerm::var("int"));
        Environment::empty().push("int", int)
    }

    pub fn int() -> Term {
        Term::var("int")
    }

    pub fn lit(n: i64) -> Term {
        Term::constant(Classification::new(Universe::BASE, TypedTerm::var("int"), Value::Int(n)))
    }

    pub fn infer(term: &Term) -> TcResult<Classification<TypedTerm>> {
        init_logging();
        check_program(&NoImports, &base_env(), term)
    }
}
