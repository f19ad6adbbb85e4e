//! Bidirectional type checking for local let bindings

use strata_lang_ast::*;

use super::super::ctx::Ctx;
use super::{CheckInfer, ensure};
use crate::result::TcResult;

impl CheckInfer for LetBinding {
    /// The *checking* rule for let bindings is:
    /// ```text
    ///            x ∉ Γ
    ///            Γ ⊢ e₁ ⇒ A
    ///            Γ, x = e₁ : A ⊢ e₂ ⇐ τ
    ///           ─────────────────────────────
    ///            Γ ⊢ let x = e₁ in e₂ ⇐ τ
    /// ```
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        let LetBinding { definition: Definition { identifier, body }, continuation } = self;
        Ok(elaborate_let(ctx, identifier, body, continuation, Some(t))?.term)
    }

    /// The *inference* rule for let bindings is:
    /// ```text
    ///            x ∉ Γ
    ///            Γ ⊢ e₁ ⇒ A
    ///            Γ, x = e₁ : A ⊢ e₂ ⇒ B
    ///            B[x := e₁] ▷ B'
    ///           ─────────────────────────────
    ///            Γ ⊢ let x = e₁ in e₂ ⇒ B'
    /// ```
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let LetBinding { definition: Definition { identifier, body }, continuation } = self;
        elaborate_let(ctx, identifier, body, continuation, None)
    }
}

/// Elaborate `let identifier = definition in continuation` to the application
/// `(\identifier. continuation) definition`.
///
/// While the continuation is elaborated, `identifier` is bound to the normal form of
/// the definition, so that types in the continuation may depend on its value.
pub fn elaborate_let(
    ctx: &Ctx,
    identifier: &str,
    definition: &Term,
    continuation: &Term,
    expected: Option<&Classification<TypedTerm>>,
) -> TcResult<Classification<TypedTerm>> {
    ctx.ensure_fresh(identifier)?;
    let defined = definition.infer(ctx)?;
    let value = ctx.normalized(&defined)?;
    let inner = ctx.bind(identifier, value);
    let continuation = ensure(continuation, &inner, expected)?;
    let result = inner.normalize(&continuation.typ)?;
    let typ = TypedTerm::quantified(
        Polarity::Forall,
        defined.with_term(ANONYMOUS.to_owned()),
        result.clone(),
    );
    let operator =
        Classification::new(continuation.universe, typ, TypedTerm::lambda(identifier, continuation.term));
    Ok(Classification::new(continuation.universe, result, TypedTerm::apply(operator, defined.term)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::TypeError;
    use crate::typechecker::exprs::test_util::*;
    use strata_lang_printer::Print;

    #[test]
    fn let_bindings_lower_to_applications() {
        let class = infer(&Term::let_in("x", lit(5), Term::var("x"))).unwrap();
        assert_eq!(class.typ.print_to_string(None), "int");
        assert_eq!(class.term.print_to_string(None), "(\\x. x) 5");
    }

    #[test]
    fn let_bound_types_are_unfolded() {
        // let T = int in (\(x : T). x)
        let term = Term::let_in("T", int(), Term::lambda_annotated("x", Term::var("T"), Term::var("x")));
        let class = infer(&term).unwrap();
        assert_eq!(class.typ.print_to_string(None), "int -> int");
    }

    #[test]
    fn unfolding_does_not_capture_bound_types() {
        // let twice = \(F : Type -> Type). \(X : Type). F X in
        // \(X : Type). let K = \(Y : Type). X in (5 : twice K int)
        let twice = Term::lambda_annotated(
            "F",
            Term::arrow(Term::universe(0), Term::universe(0)),
            Term::lambda_annotated("X", Term::universe(0), Term::apply(Term::var("F"), Term::var("X"))),
        );
        let constant = Term::lambda_annotated("Y", Term::universe(0), Term::var("X"));
        let annotated = Term::anno(Term::apply_all(Term::var("twice"), [Term::var("K"), int()]), lit(5));
        let body = Term::lambda_annotated("X", Term::universe(0), Term::let_in("K", constant, annotated));
        let err = infer(&Term::let_in("twice", twice, body)).unwrap_err();
        assert!(matches!(*err, TypeError::NotEq { .. }));
    }

    #[test]
    fn let_bindings_cannot_shadow() {
        let term = Term::let_in("x", lit(5), Term::let_in("x", lit(3), Term::var("x")));
        let err = infer(&term).unwrap_err();
        assert_eq!(*err, TypeError::Shadowing { identifier: "x".to_owned() });
    }
}
