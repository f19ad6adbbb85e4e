use pretty::DocAllocator;
use strata_lang_printer::{
    Alloc, Builder, PREC_ANNO, PREC_ARROW_LHS, Precedence, Print, PrintCfg, tokens::COLON,
    util::ParensIfExt,
};

use crate::{TypedTerm, Universe, Value};

/// The judgement `term : typ`, where `typ` itself lives in `universe`.
///
/// The payload `T` varies with the use site: a [`TypedTerm`] for elaborated terms,
/// a `String` for the identifier bound by a declaration, or `()` for a type without
/// an inhabitant of interest.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification<T> {
    pub universe: Universe,
    pub typ: Box<TypedTerm>,
    pub term: T,
}

impl<T> Classification<T> {
    pub fn new(universe: Universe, typ: TypedTerm, term: T) -> Self {
        Classification { universe, typ: Box::new(typ), term }
    }

    pub fn fmap<U, F: FnOnce(T) -> U>(self, f: F) -> Classification<U> {
        let Classification { universe, typ, term } = self;
        Classification { universe, typ, term: f(term) }
    }

    /// The same universe and type, classifying a different term.
    pub fn with_term<U>(&self, term: U) -> Classification<U> {
        Classification { universe: self.universe, typ: self.typ.clone(), term }
    }

    /// Classify the type of this judgement: `(u+1, Type_u, typ)`.
    pub fn type_of(&self) -> Classification<TypedTerm> {
        Classification {
            universe: self.universe.succ(),
            typ: Box::new(TypedTerm::Universe(self.universe)),
            term: (*self.typ).clone(),
        }
    }
}

impl Classification<TypedTerm> {
    /// `Type_n : Type_{n+1}`, where `Type_{n+1}` lives in `n+2`.
    pub fn universe_of(universe: Universe) -> Self {
        Classification::new(
            universe.succ().succ(),
            TypedTerm::Universe(universe.succ()),
            TypedTerm::Universe(universe),
        )
    }

    /// The classification of the base universe `Type_0`.
    pub fn base_type() -> Self {
        Self::universe_of(Universe::BASE)
    }

    /// The inverse of [`Classification::type_of`]: a judgement `(u+1, Type_u, τ)` about a
    /// type `τ` becomes a judgement `(u, τ, term)` about an inhabitant of `τ`.
    ///
    /// Returns `None` if this judgement does not classify a type.
    pub fn shift_down<U>(&self, term: U) -> Option<Classification<U>> {
        match &*self.typ {
            TypedTerm::Universe(universe) => Some(Classification {
                universe: *universe,
                typ: Box::new(self.term.clone()),
                term,
            }),
            _ => None,
        }
    }

    /// Declare an identifier ranging over the type classified by this judgement.
    pub fn declared(&self, identifier: impl Into<String>) -> Option<Classification<String>> {
        self.shift_down(identifier.into())
    }

    pub fn as_universe(&self) -> Option<Universe> {
        match &self.term {
            TypedTerm::Universe(universe) => Some(*universe),
            _ => None,
        }
    }
}

impl Classification<String> {
    /// The bound identifier as a term.
    pub fn variable(&self) -> Classification<TypedTerm> {
        self.with_term(TypedTerm::Variable(self.term.clone()))
    }
}

impl From<Classification<Value>> for Classification<TypedTerm> {
    fn from(constant: Classification<Value>) -> Self {
        constant.fmap(TypedTerm::Constant)
    }
}

impl<T: Print> Print for Classification<T> {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Classification { universe, typ, term } = self;
        term.print_prec(cfg, alloc, PREC_ARROW_LHS)
            .append(alloc.line())
            .append(COLON)
            .append(alloc.space())
            .append(typ.print_prec(cfg, alloc, PREC_ARROW_LHS))
            .append(alloc.line())
            .append(COLON)
            .append(alloc.space())
            .append(universe.print(cfg, alloc))
            .group()
            .parens_if(prec > PREC_ANNO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn universe_of_is_two_levels_up() {
        let class = Classification::universe_of(Universe::new(1));
        assert_eq!(class.universe, Universe::new(3));
        assert_eq!(*class.typ, TypedTerm::Universe(Universe::new(2)));
        assert_eq!(class.term, TypedTerm::Universe(Universe::new(1)));
    }

    #[test]
    fn type_of_then_shift_down_is_identity() {
        let int = Classification::new(Universe::BASE, TypedTerm::var("int"), TypedTerm::var("n"));
        let back = int.type_of().shift_down(int.term.clone());
        assert_eq!(back, Some(int));
    }

    #[test]
    fn declared_requires_a_type() {
        let value = Classification::new(Universe::BASE, TypedTerm::var("int"), TypedTerm::var("n"));
        assert!(value.declared("x").is_none());
        let declared = Classification::base_type().declared("A").map(|decl| decl.variable());
        assert_eq!(
            declared,
            Some(Classification::new(
                Universe::new(1),
                TypedTerm::Universe(Universe::BASE),
                TypedTerm::var("A")
            ))
        );
    }

    #[test]
    fn prints_the_full_judgement() {
        let class = Classification::new(Universe::BASE, TypedTerm::var("int"), TypedTerm::var("n"));
        assert_eq!(class.print_to_string(None), "n : int : Type");
    }
}
