//! Bidirectional type checking for member access

use strata_lang_ast::*;
use strata_lang_printer::Print;

use super::super::ctx::Ctx;
use super::{CheckInfer, check_type_by_inference};
use crate::result::{TcResult, TypeError};

impl CheckInfer for Access {
    fn check(&self, ctx: &Ctx, t: &Classification<TypedTerm>) -> TcResult<TypedTerm> {
        check_type_by_inference(self, ctx, t)
    }

    /// The *inference* rule for member access is:
    /// ```text
    ///            Γ ⊢ e ⇒ struct { x₁ : A₁; ...; x_k : A_k }
    ///            A_i[x₁ := e.#0, ..., x_{i-1} := e.#{i-2}] ▷ A'
    ///           ─────────────────────────────────────────────
    ///            Γ ⊢ e.x_i ⇒ A'
    /// ```
    /// The access is resolved to the position of the member.
    fn infer(&self, ctx: &Ctx) -> TcResult<Classification<TypedTerm>> {
        let Access { operator, name } = self;
        let Some(operator) = operator else {
            return Err(Box::new(TypeError::DanglingAccess { name: name.clone() }));
        };
        let record = operator.infer(ctx)?;
        let typ = ctx.normalize(&record.typ)?;
        let record = Classification::new(record.universe, typ, record.term);
        let Some(signature) = record.typ.as_signature() else {
            return Err(Box::new(TypeError::ExpectedModule {
                term: operator.print_trace(),
                typ: record.typ.print_trace(),
            }));
        };
        let mut by = Substitution::new();
        for (position, member) in signature.members.iter().enumerate() {
            if member.term == *name {
                let typ = ctx.normalize(&member.typ.subst(&by))?;
                return Ok(Classification::new(
                    member.universe,
                    typ,
                    TypedTerm::project(record.clone(), position),
                ));
            }
            by.insert(member.term.clone(), TypedTerm::project(record.clone(), position));
        }
        Err(Box::new(TypeError::UnknownMember {
            name: name.clone(),
            signature: record.typ.print_trace(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::typechecker::exprs::test_util::*;

    fn pair() -> Term {
        let typ = Term::module([("a", int()), ("b", int())]);
        Term::anno(typ, Term::new_struct([("a", lit(1)), ("b", lit(2))]))
    }

    #[test]
    fn access_resolves_the_member_position() {
        let class = infer(&Term::access(pair(), "b")).unwrap();
        assert_eq!(class.typ.print_to_string(None), "int");
        let TypedTerm::Destructor(Destructor { content: Destructors::Module(access), .. }) = class.term
        else {
            panic!("expected a projection");
        };
        assert_eq!(access.member, 1);
    }

    #[test]
    fn unknown_members_are_rejected() {
        let err = infer(&Term::access(pair(), "c")).unwrap_err();
        assert!(matches!(*err, TypeError::UnknownMember { .. }));
    }

    #[test]
    fn only_records_have_members() {
        let err = infer(&Term::access(lit(1), "a")).unwrap_err();
        assert!(matches!(*err, TypeError::ExpectedModule { .. }));
    }

    #[test]
    fn member_types_see_earlier_members() {
        // let r = (new { T = int; x = 5 } : struct { T : Type; x : T }) in r.x
        let typ = Term::module([("T", Term::universe(0)), ("x", Term::var("T"))]);
        let value = Term::anno(typ, Term::new_struct([("T", int()), ("x", lit(5))]));
        let class = infer(&Term::let_in("r", value, Term::access(Term::var("r"), "x"))).unwrap();
        assert_eq!(class.typ.print_to_string(None), "int");
    }

    #[test]
    fn dangling_access_is_rejected() {
        let err = infer(&Term::Access(Access { operator: None, name: "a".to_owned() })).unwrap_err();
        assert_eq!(*err, TypeError::DanglingAccess { name: "a".to_owned() });
    }
}
