//! Bidirectional type checking for function application

use strata_lang_ast::*;
use strata_lang_printer::Print;

use super::super::ctx::Ctx;
use super::CheckInfer;
use super::local_let::elaborate_let;
use crate::conversion_checking::convert;
use crate::result::{TcResult, TypeError};

impl CheckInfer for Apply {
    /// The *checking* rule for applications is:
    /// ```text
    ///            Γ ⊢ f a ⇒ σ
    ///            Γ ⊢ σ ≃ τ
    ///           ───────────────
    ///            Γ ⊢ f a ⇐ τ
    /// ```
    /// If the operator is a lambda abstraction, the argument is synthesized first and
    /// the lambda is checked against `A -> τ`:
    /// ```text
    ///            Γ ⊢ a ⇒ A
    ///            Γ ⊢ \x. e ⇐ A -> τ
    ///           ─────────────────────
    ///            Γ ⊢ (\x. e) a ⇐ τ
    /// ```
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        let Apply { operator, argument } = self;
        if let Term::Lambda(lambda) = &**operator {
            let argument = argument.infer(ctx)?;
            let domain = argument.with_term(ANONYMOUS.to_owned());
            let arrow = t.with_term(TypedTerm::quantified(Polarity::Forall, domain, t.term.clone()));
            let function = lambda.check(ctx, &arrow)?;
            let operator = arrow
                .shift_down(function)
                .ok_or_else(|| TypeError::expected_type(&t.term, &t.typ))?;
            return Ok(TypedTerm::apply(operator, argument.term));
        }
        let inferred = self.infer(ctx)?;
        convert(ctx.env(), &inferred.type_of(), t)?;
        Ok(inferred.term)
    }

    /// The *inference* rule for applications is:
    /// ```text
    ///            Γ ⊢ f ⇒ (x : A) -> B
    ///            Γ ⊢ a ⇐ A
    ///            B[x := a] ▷ B'
    ///           ───────────────────────
    ///            Γ ⊢ f a ⇒ B'
    /// ```
    /// An unannotated lambda in operator position is elaborated like a let binding.
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let Apply { operator, argument } = self;
        if let Term::Lambda(Lambda { parameter: Declaration { identifier, typ: None }, body }) =
            &**operator
        {
            return elaborate_let(ctx, identifier, argument, body, None);
        }
        let function = operator.infer(ctx)?;
        let typ = ctx.normalize(&function.typ)?;
        let function = Classification::new(function.universe, typ, function.term);
        let Some(TypedQuantifier { polarity, from, to }) = function.typ.as_quantifier() else {
            return Err(Box::new(TypeError::ExpectedFunction {
                operator: operator.print_trace(),
                typ: function.typ.print_trace(),
            }));
        };
        if *polarity != Polarity::Forall {
            return Err(Box::new(TypeError::PolarityMismatch {
                context: self.print_trace(),
                expected: Polarity::Forall,
                actual: *polarity,
            }));
        }
        let argument = argument.check(ctx, &from.type_of())?;
        let result = if from.term == ANONYMOUS {
            (**to).clone()
        } else {
            (**to).subst(&Substitution::single(from.term.clone(), argument.clone()))
        };
        let result = ctx.normalize(&result)?;
        let universe = function.universe;
        Ok(Classification::new(universe, result, TypedTerm::apply(function, argument)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typechecker::exprs::test_util::*;
    use crate::typechecker::{NoImports, ensure};

    fn id_int() -> Term {
        Term::lambda_annotated("x", int(), Term::var("x"))
    }

    #[test]
    fn application_substitutes_the_argument() {
        let class = infer(&Term::apply(id_int(), lit(5))).unwrap();
        assert_eq!(class.typ.print_to_string(None), "int");
        assert_eq!(class.universe, Universe::BASE);
    }

    #[test]
    fn non_functions_cannot_be_applied() {
        let err = infer(&Term::apply(lit(5), lit(3))).unwrap_err();
        assert!(matches!(*err, TypeError::ExpectedFunction { .. }));
    }

    #[test]
    fn existentials_cannot_be_applied() {
        // \(p : (x : int) & int). p 1
        let pair = Term::exists("x", int(), int());
        let err = infer(&Term::lambda_annotated("p", pair, Term::apply(Term::var("p"), lit(1)))).unwrap_err();
        let TypeError::PolarityMismatch { expected, actual, .. } = *err else {
            panic!("expected a polarity mismatch, got {err}");
        };
        assert_eq!((expected, actual), (Polarity::Forall, Polarity::Exists));
    }

    #[test]
    fn arguments_are_checked_against_the_domain() {
        let err = infer(&Term::apply(id_int(), int())).unwrap_err();
        assert!(matches!(*err, TypeError::NotEq { .. }));
    }

    #[test]
    fn dependent_result_types_mention_the_argument() {
        // let id = (\A. \x. x : (A : Type) -> A -> A) in id int
        let typ = Term::generic("A", Term::arrow(Term::var("A"), Term::var("A")));
        let id = Term::anno(typ, Term::lambda("A", Term::lambda("x", Term::var("x"))));
        let class = infer(&Term::let_in("id", id, Term::apply(Term::var("id"), int()))).unwrap();
        assert_eq!(class.typ.print_to_string(None), "int -> int");
    }

    #[test]
    fn unannotated_lambda_operators_behave_like_let() {
        let class = infer(&Term::apply(Term::lambda("x", Term::var("x")), lit(5))).unwrap();
        assert_eq!(class.typ.print_to_string(None), "int");
    }

    #[test]
    fn lambda_operators_check_against_the_expected_type() {
        let ctx = Ctx::new(&NoImports, base_env());
        let int = infer(&int()).unwrap();
        let class = ensure(&Term::apply(Term::lambda("x", Term::var("x")), lit(5)), &ctx, Some(&int)).unwrap();
        assert_eq!(class.typ.print_to_string(None), "int");
    }
}
