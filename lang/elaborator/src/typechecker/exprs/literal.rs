//! Bidirectional type checking for host constants, `typeof` and imports

use strata_lang_ast::*;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_by_inference};
use crate::result::{TcResult, TypeError};

impl CheckInfer for Constant {
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        check_by_inference(self, ctx, t)
    }

    /// Constants carry their classification.
    fn infer(&self, _ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        Ok(self.content.clone().into())
    }
}

impl CheckInfer for TypeOf {
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        check_by_inference(self, ctx, t)
    }

    /// The *inference* rule for `typeof` is:
    /// ```text
    ///            Γ ⊢ e ⇒ τ    τ : Type_n
    ///           ──────────────────────────
    ///            Γ ⊢ typeof e ⇒ Type_n
    /// ```
    /// and the elaborated term is `τ`.
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        Ok(self.term.infer(ctx)?.type_of())
    }
}

impl CheckInfer for Import {
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        check_by_inference(self, ctx, t)
    }

    /// The classification of an import is provided by the resolver of the context.
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let Import { filename } = self;
        let imported = ctx.resolver().resolve(filename).map_err(|message| {
            Box::new(TypeError::Import { filename: filename.clone(), message })
        })?;
        Ok(imported.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typechecker::check_program;
    use crate::typechecker::exprs::test_util::*;
    use strata_lang_printer::Print;

    #[test]
    fn typeof_goes_one_level_up() {
        let class = infer(&Term::type_of(lit(5))).unwrap();
        assert_eq!(class.universe, Universe::new(1));
        assert_eq!(*class.typ, TypedTerm::Universe(Universe::BASE));
        assert_eq!(class.term.print_to_string(None), "int");
    }

    #[test]
    fn imports_are_classified_by_the_resolver() {
        let resolver = |filename: &str| {
            if filename == "five" {
                Ok(Classification::new(Universe::BASE, TypedTerm::var("int"), Value::Int(5)))
            } else {
                Err("no such file".to_owned())
            }
        };
        let class = check_program(&resolver, &base_env(), &Term::import("five")).unwrap();
        assert_eq!(class.term, TypedTerm::Constant(Value::Int(5)));
        let err = check_program(&resolver, &base_env(), &Term::import("six")).unwrap_err();
        assert_eq!(
            *err,
            TypeError::Import { filename: "six".to_owned(), message: "no such file".to_owned() }
        );
    }

    #[test]
    fn constants_check_against_their_type() {
        let typ = Term::arrow(int(), int());
        let err = infer(&Term::anno(typ, lit(5))).unwrap_err();
        assert!(matches!(*err, TypeError::NotEq { .. }));
    }
}
