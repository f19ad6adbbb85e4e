//! Bidirectional type checking for universes

use strata_lang_ast::*;
use strata_lang_printer::Print;

use super::super::ctx::Ctx;
use super::CheckInfer;
use crate::result::{TcResult, TypeError};

impl CheckInfer for Universe {
    /// The *checking* rule for universes is:
    /// ```text
    ///            τ ▷ Type_{n+1}
    ///           ───────────────────
    ///            Γ ⊢ Type_n ⇐ τ
    /// ```
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        match ctx.normalize(&t.term)? {
            TypedTerm::Universe(expected) if expected == self.succ() => Ok(TypedTerm::Universe(*self)),
            TypedTerm::Universe(expected) => Err(Box::new(TypeError::UniverseMismatch {
                term: self.print_trace(),
                expected: expected.print_trace(),
                actual: self.succ().print_trace(),
            })),
            other => Err(Box::new(TypeError::ExpectedUniverse {
                term: self.print_trace(),
                expected: other.print_trace(),
            })),
        }
    }

    /// The *inference* rule for universes is:
    /// ```text
    ///           ─────────────────────────
    ///            Γ ⊢ Type_n ⇒ Type_{n+1}
    /// ```
    /// where `Type_{n+1}` itself lives in `Type_{n+2}`.
    fn infer(&self, _ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        Ok(Classification::universe_of(*self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typechecker::exprs::test_util::*;
    use crate::typechecker::{NoImports, ensure};

    #[test]
    fn universes_are_stratified() {
        for rank in 0..4 {
            let class = infer(&Term::universe(rank)).unwrap();
            assert_eq!(class.universe, Universe::new(rank + 2));
            assert_eq!(*class.typ, TypedTerm::Universe(Universe::new(rank + 1)));
            assert_eq!(class.term, TypedTerm::Universe(Universe::new(rank)));
        }
    }

    #[test]
    fn universes_check_one_level_up() {
        let ctx = Ctx::new(&NoImports, base_env());
        let type1 = Classification::universe_of(Universe::new(1));
        let type2 = Classification::universe_of(Universe::new(2));
        assert!(ensure(&Term::universe(0), &ctx, Some(&type1)).is_ok());
        let err = ensure(&Term::universe(0), &ctx, Some(&type2)).unwrap_err();
        assert!(matches!(*err, TypeError::UniverseMismatch { .. }));
    }

    #[test]
    fn universes_are_not_values() {
        let ctx = Ctx::new(&NoImports, base_env());
        let int = Classification::new(Universe::new(1), TypedTerm::Universe(Universe::BASE), TypedTerm::var("int"));
        let err = Term::universe(0).check(&ctx, &int).unwrap_err();
        assert!(matches!(*err, TypeError::ExpectedUniverse { .. }));
    }
}
