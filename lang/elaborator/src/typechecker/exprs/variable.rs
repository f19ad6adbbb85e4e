//! Bidirectional type checking for variables

use strata_lang_ast::*;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_by_inference};
use crate::result::TcResult;

impl CheckInfer for Variable {
    /// The *checking* rule for variables is:
    /// ```text
    ///            Γ ⊢ x ⇒ τ
    ///            Γ ⊢ τ ≃ σ
    ///           ───────────────
    ///            Γ ⊢ x ⇐ σ
    /// ```
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        check_by_inference(self, ctx, t)
    }

    /// The *inference* rule for variables is:
    /// ```text
    ///            Γ(x) = τ
    ///           ───────────────
    ///            Γ ⊢ x ⇒ τ
    /// ```
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let bound = ctx.lookup(&self.name)?;
        Ok(bound.with_term(TypedTerm::var(self.name.clone())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::TypeError;
    use crate::typechecker::exprs::test_util::*;

    #[test]
    fn unbound_variables_are_reported() {
        let err = infer(&Term::var("y")).unwrap_err();
        assert_eq!(*err, TypeError::Unbound(Unbound { identifier: "y".to_owned() }));
    }

    #[test]
    fn variables_keep_their_name() {
        let class = infer(&Term::let_in("n", lit(5), Term::var("n"))).unwrap();
        let TypedTerm::Destructor(Destructor { operator, .. }) = class.term else {
            panic!("expected an application");
        };
        assert_eq!(operator.term, TypedTerm::lambda("n", TypedTerm::var("n")));
    }
}
