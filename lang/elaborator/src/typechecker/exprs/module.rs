//! Bidirectional type checking for record types and record values

use strata_lang_ast::*;
use strata_lang_printer::Print;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_type_by_inference, declare};
use crate::result::{TcResult, TypeError};

impl CheckInfer for ModuleType {
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        check_type_by_inference(self, ctx, t)
    }

    /// The *inference* rule for record types is:
    /// ```text
    ///            Γ ⊢ A₁ ⇒ Type_{n₁}
    ///            Γ, x₁ : A₁ ⊢ A₂ ⇒ Type_{n₂}
    ///            ...
    ///            n = max(n₁, ..., n_k)
    ///           ─────────────────────────────────────────
    ///            Γ ⊢ struct { x₁ : A₁; ...; x_k : A_k } ⇒ Type_n
    /// ```
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let mut inner = ctx.clone();
        let mut rank = Universe::BASE;
        let mut members = Vec::with_capacity(self.members.len());
        for MemberDecl { name, typ } in &self.members {
            inner.ensure_fresh(name)?;
            let declared = declare(&inner, typ, name)?;
            rank = rank.max(declared.universe);
            inner = inner.bind_declared(&declared);
            members.push(declared);
        }
        Ok(Classification::new(rank.succ(), TypedTerm::Universe(rank), TypedTerm::signature(members)))
    }
}

impl CheckInfer for NewStruct {
    /// The *checking* rule for record values is:
    /// ```text
    ///            τ ▷ struct { x₁ : A₁; ...; x_k : A_k }
    ///            Γ ⊢ e₁ ⇐ A₁
    ///            Γ, x₁ = e₁ : A₁ ⊢ e₂ ⇐ A₂
    ///            ...
    ///           ────────────────────────────────────────
    ///            Γ ⊢ new { x₁ = e₁; ...; x_k = e_k } ⇐ τ
    /// ```
    /// Members must be given in the order of the signature. Later member types see
    /// the values of earlier members.
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        let expected = ctx.normalize(&t.term)?;
        let Some(signature) = expected.as_signature() else {
            return Err(Box::new(TypeError::ExpectedModule {
                term: self.print_trace(),
                typ: expected.print_trace(),
            }));
        };
        if signature.len() != self.members.len() {
            return Err(Box::new(TypeError::ArityMismatch {
                expected: signature.len(),
                actual: self.members.len(),
            }));
        }
        let mut inner = ctx.clone();
        let mut by = Substitution::new();
        let mut members = Vec::with_capacity(self.members.len());
        for (position, (Definition { identifier, body }, declared)) in
            self.members.iter().zip(&signature.members).enumerate()
        {
            if *identifier != declared.term {
                return Err(Box::new(TypeError::MemberNameMismatch {
                    position,
                    expected: declared.term.clone(),
                    actual: identifier.clone(),
                }));
            }
            inner.ensure_fresh(identifier)?;
            let member_typ = inner.normalized(&declared.type_of())?;
            let member = body.check(&inner, &member_typ)?;
            let value = inner.normalized(&Classification::new(
                declared.universe,
                member_typ.term,
                member.clone(),
            ))?;
            members.push(member.subst(&by));
            by.insert(identifier.clone(), value.term.clone());
            inner = inner.bind(identifier.clone(), value);
        }
        Ok(TypedTerm::record(members))
    }

    /// The *inference* rule for record values is:
    /// ```text
    ///            Γ ⊢ e₁ ⇒ A₁
    ///            Γ, x₁ = e₁ : A₁ ⊢ e₂ ⇒ A₂
    ///            ...
    ///           ───────────────────────────────────────────────────────────────
    ///            Γ ⊢ new { x₁ = e₁; ...; x_k = e_k } ⇒ struct { x₁ : A₁; ...; x_k : A_k }
    /// ```
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let mut inner = ctx.clone();
        let mut rank = Universe::BASE;
        let mut by = Substitution::new();
        let mut signature = Vec::with_capacity(self.members.len());
        let mut members = Vec::with_capacity(self.members.len());
        for Definition { identifier, body } in &self.members {
            inner.ensure_fresh(identifier)?;
            let defined = body.infer(&inner)?;
            let value = inner.normalized(&defined)?;
            rank = rank.max(value.universe);
            signature.push(value.with_term(identifier.clone()));
            members.push(defined.term.subst(&by));
            by.insert(identifier.clone(), value.term.clone());
            inner = inner.bind(identifier.clone(), value);
        }
        Ok(Classification::new(rank, TypedTerm::signature(signature), TypedTerm::record(members)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typechecker::exprs::test_util::*;
    use crate::typechecker::{NoImports, ensure};

    fn pair_type() -> Term {
        Term::module([("a", int()), ("b", int())])
    }

    #[test]
    fn record_types_live_in_the_largest_member_universe() {
        let class = infer(&pair_type()).unwrap();
        assert_eq!(class.universe, Universe::new(1));
        assert_eq!(class.term.print_to_string(None), "struct { a : int; b : int }");
        let class = infer(&Term::module([("T", Term::universe(0)), ("x", Term::var("T"))])).unwrap();
        assert_eq!(*class.typ, TypedTerm::Universe(Universe::new(1)));
    }

    #[test]
    fn record_values_are_checked_positionally() {
        let ctx = Ctx::new(&NoImports, base_env());
        let typ = infer(&pair_type()).unwrap();
        let value = Term::new_struct([("a", lit(1)), ("b", lit(2))]);
        let class = ensure(&value, &ctx, Some(&typ)).unwrap();
        assert_eq!(class.term.print_to_string(None), "new { 1; 2 }");
        let swapped = Term::new_struct([("b", lit(2)), ("a", lit(1))]);
        let err = ensure(&swapped, &ctx, Some(&typ)).unwrap_err();
        assert!(matches!(*err, TypeError::MemberNameMismatch { position: 0, .. }));
        let short = Term::new_struct([("a", lit(1))]);
        let err = ensure(&short, &ctx, Some(&typ)).unwrap_err();
        assert_eq!(*err, TypeError::ArityMismatch { expected: 2, actual: 1 });
    }

    #[test]
    fn later_members_see_earlier_values() {
        // new { T = int; x = 5 } : struct { T : Type; x : T }
        let ctx = Ctx::new(&NoImports, base_env());
        let typ = infer(&Term::module([("T", Term::universe(0)), ("x", Term::var("T"))])).unwrap();
        let value = Term::new_struct([("T", int()), ("x", lit(5))]);
        assert!(ensure(&value, &ctx, Some(&typ)).is_ok());
    }

    #[test]
    fn record_values_are_closed() {
        let class = infer(&Term::new_struct([("a", lit(1)), ("b", Term::var("a"))])).unwrap();
        assert_eq!(class.term.print_to_string(None), "new { 1; 1 }");
        assert_eq!(class.typ.print_to_string(None), "struct { a : int; b : int }");
    }

    #[test]
    fn record_types_are_checked_against_their_universe() {
        let ctx = Ctx::new(&NoImports, base_env());
        let type1 = Classification::universe_of(Universe::new(1));
        let err = ensure(&pair_type(), &ctx, Some(&type1)).unwrap_err();
        assert!(matches!(*err, TypeError::UniverseMismatch { .. }));
        let type0 = Classification::universe_of(Universe::BASE);
        assert!(ensure(&pair_type(), &ctx, Some(&type0)).is_ok());
    }

    #[test]
    fn member_names_cannot_repeat() {
        let err = infer(&Term::module([("a", int()), ("a", int())])).unwrap_err();
        assert_eq!(*err, TypeError::Shadowing { identifier: "a".to_owned() });
    }
}
