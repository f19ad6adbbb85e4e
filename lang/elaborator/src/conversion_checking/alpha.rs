//! Syntactic equality of core terms up to consistent renaming of bound identifiers.

use strata_lang_ast::*;

/// Pairs of identifiers bound at the same position on both sides.
#[derive(Debug, Default)]
pub struct Scope {
    lhs: Vec<String>,
    rhs: Vec<String>,
}

impl Scope {
    fn bind<T, F>(&mut self, lhs: &str, rhs: &str, f: F) -> T
    where
        F: FnOnce(&mut Self) -> T,
    {
        self.lhs.push(lhs.to_owned());
        self.rhs.push(rhs.to_owned());
        let res = f(self);
        self.lhs.pop();
        self.rhs.pop();
        res
    }

    /// Bound identifiers must refer to the same binder, free identifiers must be identical.
    fn same_variable(&self, lhs: &str, rhs: &str) -> bool {
        let lhs_binder = self.lhs.iter().rposition(|bound| bound == lhs);
        let rhs_binder = self.rhs.iter().rposition(|bound| bound == rhs);
        match (lhs_binder, rhs_binder) {
            (None, None) => lhs == rhs,
            (lhs_binder, rhs_binder) => lhs_binder == rhs_binder,
        }
    }
}

pub trait AlphaEq {
    fn alpha_eq_in(&self, other: &Self, scope: &mut Scope) -> bool;

    fn alpha_eq(&self, other: &Self) -> bool {
        self.alpha_eq_in(other, &mut Scope::default())
    }
}

impl<T: AlphaEq> AlphaEq for Box<T> {
    fn alpha_eq_in(&self, other: &Self, scope: &mut Scope) -> bool {
        (**self).alpha_eq_in(other, scope)
    }
}

impl AlphaEq for TypedTerm {
    fn alpha_eq_in(&self, other: &Self, scope: &mut Scope) -> bool {
        match (self, other) {
            (TypedTerm::Universe(lhs), TypedTerm::Universe(rhs)) => lhs == rhs,
            (TypedTerm::Variable(lhs), TypedTerm::Variable(rhs)) => scope.same_variable(lhs, rhs),
            (TypedTerm::Constant(lhs), TypedTerm::Constant(rhs)) => lhs == rhs,
            (
                TypedTerm::Type(TypeStruct::Quantified(lhs)),
                TypedTerm::Type(TypeStruct::Quantified(rhs)),
            ) => {
                lhs.polarity == rhs.polarity
                    && lhs.from.universe == rhs.from.universe
                    && lhs.from.typ.alpha_eq_in(&rhs.from.typ, scope)
                    && scope.bind(&lhs.from.term, &rhs.from.term, |scope| {
                        lhs.to.alpha_eq_in(&rhs.to, scope)
                    })
            }
            (TypedTerm::Type(TypeStruct::Module(lhs)), TypedTerm::Type(TypeStruct::Module(rhs))) => {
                lhs.members.len() == rhs.members.len() && members_alpha_eq(&lhs.members, &rhs.members, scope)
            }
            (
                TypedTerm::Constructor(Constructors::Arrow(lhs)),
                TypedTerm::Constructor(Constructors::Arrow(rhs)),
            ) => scope.bind(&lhs.identifier, &rhs.identifier, |scope| {
                lhs.body.alpha_eq_in(&rhs.body, scope)
            }),
            (
                TypedTerm::Constructor(Constructors::Module(lhs)),
                TypedTerm::Constructor(Constructors::Module(rhs)),
            ) => {
                lhs.members.len() == rhs.members.len()
                    && lhs.members.iter().zip(&rhs.members).all(|(l, r)| l.alpha_eq_in(r, scope))
            }
            (TypedTerm::Destructor(lhs), TypedTerm::Destructor(rhs)) => {
                lhs.operator.alpha_eq_in(&rhs.operator, scope)
                    && match (&lhs.content, &rhs.content) {
                        (Destructors::Arrow(l), Destructors::Arrow(r)) => {
                            l.operand.alpha_eq_in(&r.operand, scope)
                        }
                        (Destructors::Module(l), Destructors::Module(r)) => l == r,
                        _ => false,
                    }
            }
            _ => false,
        }
    }
}

/// Members are labels: names must agree, and each member binds its name in later members.
fn members_alpha_eq(
    lhs: &[Classification<String>],
    rhs: &[Classification<String>],
    scope: &mut Scope,
) -> bool {
    match (lhs.split_first(), rhs.split_first()) {
        (None, None) => true,
        (Some((l, lhs_rest)), Some((r, rhs_rest))) => {
            l.term == r.term
                && l.universe == r.universe
                && l.typ.alpha_eq_in(&r.typ, scope)
                && scope.bind(&l.term, &r.term, |scope| members_alpha_eq(lhs_rest, rhs_rest, scope))
        }
        _ => false,
    }
}

impl AlphaEq for Classification<TypedTerm> {
    fn alpha_eq_in(&self, other: &Self, scope: &mut Scope) -> bool {
        self.universe == other.universe
            && self.typ.alpha_eq_in(&other.typ, scope)
            && self.term.alpha_eq_in(&other.term, scope)
    }
}
