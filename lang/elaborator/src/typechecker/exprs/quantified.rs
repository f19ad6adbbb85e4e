//! Bidirectional type checking for quantifiers and type class bounds

use strata_lang_ast::*;
use strata_lang_printer::Print;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_type_by_inference, declare};
use crate::result::{TcResult, TypeError};

impl CheckInfer for Quantified {
    /// The *checking* rule for quantifiers is:
    /// ```text
    ///            τ ▷ Type_n
    ///            Γ ⊢ (x : A) -> B ⇒ Type_n
    ///           ───────────────────────
    ///            Γ ⊢ (x : A) -> B ⇐ τ
    /// ```
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        let expected = ctx.normalize(&t.term)?;
        if !matches!(expected, TypedTerm::Universe(_)) {
            return Err(Box::new(TypeError::ExpectedUniverse {
                term: self.print_trace(),
                expected: expected.print_trace(),
            }));
        }
        check_type_by_inference(self, ctx, t)
    }

    /// The *inference* rule for quantifiers is:
    /// ```text
    ///            x ∉ Γ
    ///            Γ ⊢ A ⇒ Type_m
    ///            Γ, x : A ⊢ B ⇒ Type_n
    ///           ────────────────────────────
    ///            Γ ⊢ (x : A) -> B ⇒ Type_n
    /// ```
    /// An unconstrained identifier ranges over `Type`. A class bound `(x <: C) -> B`,
    /// where `C : (y : A) -> Type_k`, is elaborated to `(x : A) -> C x -> B`.
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let Quantified { polarity, constraint, identifier, body } = self;
        let name = identifier.as_deref().unwrap_or(ANONYMOUS);
        ctx.ensure_fresh(name)?;
        match constraint {
            TypeConstraint::None => {
                let from = Classification::new(
                    Universe::BASE.succ(),
                    TypedTerm::Universe(Universe::BASE),
                    name.to_owned(),
                );
                quantify(ctx, *polarity, from, body)
            }
            TypeConstraint::Type(typ) => {
                let from = declare(ctx, typ, name)?;
                quantify(ctx, *polarity, from, body)
            }
            TypeConstraint::Class(class) => {
                let Some(identifier) = identifier else {
                    return Err(Box::new(TypeError::ClassBoundNeedsName));
                };
                class_bound(ctx, *polarity, identifier, class, body)
            }
        }
    }
}

/// Bind `from` and synthesize the quantifier over the type `body`.
fn quantify(
    ctx: &Ctx,
    polarity: Polarity,
    from: Classification<String>,
    body: &Term,
) -> TcResult<Classification<TypedTerm>> {
    let inner = ctx.bind_declared(&from);
    let range = body.infer(&inner)?;
    if !matches!(*range.typ, TypedTerm::Universe(_)) {
        return Err(Box::new(TypeError::QuantifierOverTerm {
            codomain: body.print_trace(),
            typ: range.typ.print_trace(),
        }));
    }
    Ok(range.fmap(|to| TypedTerm::quantified(polarity, from, to)))
}

fn class_bound(
    ctx: &Ctx,
    polarity: Polarity,
    identifier: &str,
    class: &Term,
    body: &Term,
) -> TcResult<Classification<TypedTerm>> {
    let class = ctx.normalized(&class.infer(ctx)?)?;
    let Some(TypedQuantifier { polarity: Polarity::Forall, from, to }) = class.typ.as_quantifier()
    else {
        return Err(Box::new(TypeError::ClassNotAFunction {
            class: class.term.print_trace(),
            typ: class.typ.print_trace(),
        }));
    };
    let TypedTerm::Universe(rank) = **to else {
        return Err(Box::new(TypeError::ClassNotIntoUniverse {
            class: class.term.print_trace(),
            codomain: to.print_trace(),
        }));
    };
    let parameter = from.with_term(identifier.to_owned());
    let inner = ctx.bind_declared(&parameter);
    let instance = TypedTerm::apply(class.clone(), TypedTerm::var(identifier));
    let dictionary = Classification::new(rank, instance, ANONYMOUS.to_owned());
    let range = quantify(&inner, polarity, dictionary, body)?;
    Ok(range.fmap(|to| TypedTerm::quantified(polarity, parameter, to)))
}

impl CheckInfer for Generic {
    fn check(&self, _ctx: &Ctx, _t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        Err(Box::new(TypeError::DanglingGeneric { identifier: self.identifier.clone() }))
    }

    fn infer(&self, _ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        Err(Box::new(TypeError::DanglingGeneric { identifier: self.identifier.clone() }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typechecker::exprs::test_util::*;

    #[test]
    fn arrows_live_in_the_universe_of_their_codomain() {
        let class = infer(&Term::arrow(int(), int())).unwrap();
        assert_eq!(class.universe, Universe::new(1));
        assert_eq!(*class.typ, TypedTerm::Universe(Universe::BASE));
        assert_eq!(class.term.print_to_string(None), "int -> int");
    }

    #[test]
    fn generics_range_over_the_base_universe() {
        let class = infer(&Term::generic("A", Term::arrow(Term::var("A"), Term::var("A")))).unwrap();
        assert_eq!(class.term.print_to_string(None), "(A : Type) -> A -> A");
    }

    #[test]
    fn quantifiers_relate_types() {
        let err = infer(&Term::forall("x", int(), lit(5))).unwrap_err();
        assert!(matches!(*err, TypeError::QuantifierOverTerm { .. }));
    }

    #[test]
    fn quantified_identifiers_cannot_shadow() {
        let err = infer(&Term::forall("int", int(), int())).unwrap_err();
        assert_eq!(*err, TypeError::Shadowing { identifier: "int".to_owned() });
    }

    #[test]
    fn class_bounds_add_an_instance_parameter() {
        // let Show = \(A : Type). A -> int in (A <: Show) -> A -> int
        let show = Term::lambda_annotated("T", Term::universe(0), Term::arrow(Term::var("T"), int()));
        let bounded = Term::bounded("A", Term::var("Show"), Term::arrow(Term::var("A"), int()));
        let class = infer(&Term::let_in("Show", show, bounded)).unwrap();
        assert_eq!(*class.typ, TypedTerm::Universe(Universe::BASE));
        let ctx = Ctx::new(&crate::typechecker::NoImports, base_env());
        let typ = ctx.normalize(&class.term).unwrap();
        assert_eq!(typ.print_to_string(None), "(A : Type) -> (A -> int) -> A -> int");
    }

    #[test]
    fn class_bounds_must_map_into_a_universe() {
        let not_a_class = Term::lambda_annotated("T", Term::universe(0), lit(1));
        let bounded = Term::bounded("A", Term::var("C"), Term::var("A"));
        let err = infer(&Term::let_in("C", not_a_class, bounded)).unwrap_err();
        assert!(matches!(*err, TypeError::ClassNotIntoUniverse { .. }));
    }

    #[test]
    fn classes_must_be_functions() {
        let err = infer(&Term::bounded("A", int(), Term::var("A"))).unwrap_err();
        assert!(matches!(*err, TypeError::ClassNotAFunction { .. }));
    }

    #[test]
    fn class_bounds_need_a_name() {
        let show = Term::lambda_annotated("T", Term::universe(0), Term::arrow(Term::var("T"), int()));
        let bound = TypeConstraint::Class(Box::new(Term::var("Show")));
        let anonymous = Term::quantified(Polarity::Forall, bound, None, int());
        let err = infer(&Term::let_in("Show", show, anonymous)).unwrap_err();
        assert_eq!(*err, TypeError::ClassBoundNeedsName);
    }

    #[test]
    fn types_are_checked_against_their_universe() {
        let ctx = Ctx::new(&crate::typechecker::NoImports, base_env());
        let type1 = Classification::universe_of(Universe::new(1));
        let err = crate::typechecker::ensure(&Term::arrow(int(), int()), &ctx, Some(&type1)).unwrap_err();
        assert!(matches!(*err, TypeError::UniverseMismatch { .. }));
    }

    #[test]
    fn dangling_generics_are_rejected() {
        let generic = Term::Generic(Generic { identifier: "A".to_owned(), constraint: TypeConstraint::None });
        let err = infer(&generic).unwrap_err();
        assert!(matches!(*err, TypeError::DanglingGeneric { .. }));
    }
}
