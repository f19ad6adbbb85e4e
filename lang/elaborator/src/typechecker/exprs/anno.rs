//! Bidirectional type checking for type annotations

use strata_lang_ast::*;

use super::super::ctx::Ctx;
use super::{CheckInfer, declare};
use crate::conversion_checking::convert;
use crate::result::TcResult;

impl CheckInfer for Annotation {
    /// The *checking* rule for type annotations is:
    /// ```text
    ///            Γ ⊢ σ ⇒ Type_n
    ///            Γ ⊢ σ ≃ τ
    ///            Γ ⊢ e ⇐ τ
    ///           ─────────────────
    ///            Γ ⊢ (e : σ) ⇐ τ
    /// ```
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        let declared = declare(ctx, &self.typ, ANONYMOUS)?;
        convert(ctx.env(), &declared.type_of(), t)?;
        self.term.check(ctx, t)
    }

    /// The *inference* rule for type annotations is:
    /// ```text
    ///            Γ ⊢ τ ⇒ Type_n
    ///            τ ▷ τ'
    ///            Γ ⊢ e ⇐ τ'
    ///           ─────────────────
    ///            Γ ⊢ (e : τ) ⇒ τ'
    /// ```
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let declared = declare(ctx, &self.typ, ANONYMOUS)?;
        let term = self.term.check(ctx, &declared.type_of())?;
        Ok(declared.with_term(term))
    }
}
