//! Bidirectional type checking for lambda abstractions

use strata_lang_ast::*;
use strata_lang_printer::Print;

use super::super::ctx::Ctx;
use super::{CheckInfer, declare};
use crate::conversion_checking::convert;
use crate::result::{TcResult, TypeError};

impl CheckInfer for Lambda {
    /// The *checking* rule for lambda abstractions is:
    /// ```text
    ///            τ ▷ (y : A) -> B
    ///            x ∉ Γ
    ///            Γ, x : A ⊢ e ⇐ B[y := x]
    ///           ─────────────────────────
    ///            Γ ⊢ \x. e ⇐ τ
    /// ```
    /// If the parameter is annotated with `A'`, then `A'` must be convertible to `A`.
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        let Lambda { parameter: Declaration { identifier, typ }, body } = self;
        let expected = ctx.normalize(&t.term)?;
        let Some(TypedQuantifier { polarity, from, to }) = expected.as_quantifier() else {
            return Err(Box::new(TypeError::ExpectedQuantifier {
                term: self.print_trace(),
                expected: expected.print_trace(),
            }));
        };
        if *polarity != Polarity::Forall {
            return Err(Box::new(TypeError::PolarityMismatch {
                context: self.print_trace(),
                expected: Polarity::Forall,
                actual: *polarity,
            }));
        }
        ctx.ensure_fresh(identifier)?;
        if let Some(annotation) = typ {
            let annotation = declare(ctx, annotation, identifier)?;
            convert(ctx.env(), &annotation.type_of(), &from.type_of())?;
        }
        let inner = ctx.bind_declared(&from.with_term(identifier.clone()));
        let codomain = if from.term == ANONYMOUS || from.term == *identifier {
            (**to).clone()
        } else {
            (**to).subst(&Substitution::single(from.term.clone(), TypedTerm::var(identifier)))
        };
        let body = body.check(&inner, &t.with_term(codomain))?;
        Ok(TypedTerm::lambda(identifier, body))
    }

    /// The *inference* rule for annotated lambda abstractions is:
    /// ```text
    ///            x ∉ Γ
    ///            Γ ⊢ A ⇒ Type_m
    ///            Γ, x : A ⊢ e ⇒ B
    ///            x ∉ FV(B)
    ///           ───────────────────────
    ///            Γ ⊢ \(x : A). e ⇒ A -> B
    /// ```
    /// Dependent function types cannot be inferred and need an annotation on the lambda.
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let Lambda { parameter: Declaration { identifier, typ }, body } = self;
        let Some(annotation) = typ else {
            return Err(Box::new(TypeError::CannotInferLambda { identifier: identifier.clone() }));
        };
        ctx.ensure_fresh(identifier)?;
        let from = declare(ctx, annotation, identifier)?;
        let inner = ctx.bind_declared(&from);
        let body = body.infer(&inner)?;
        let body_typ = inner.normalize(&body.typ)?;
        if body_typ.occurs_free(identifier) {
            return Err(Box::new(TypeError::DependentReturnType {
                identifier: identifier.clone(),
                typ: body_typ.print_trace(),
            }));
        }
        let typ = TypedTerm::quantified(Polarity::Forall, from.with_term(ANONYMOUS.to_owned()), body_typ);
        Ok(Classification::new(body.universe, typ, TypedTerm::lambda(identifier, body.term)))
    }
}
