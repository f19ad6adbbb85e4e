use std::rc::Rc;

use crate::{
    ANONYMOUS, Classification, Constructors, Destructor, Destructors, FreeVars, Signature,
    TypeStruct, TypedApply, TypedLambda, TypedModule, TypedQuantifier, TypedTerm,
};

/// A simultaneous substitution of identifiers by core terms.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Substitution {
    bindings: Vec<(String, TypedTerm)>,
}

impl Substitution {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(identifier: impl Into<String>, term: TypedTerm) -> Self {
        Substitution { bindings: vec![(identifier.into(), term)] }
    }

    /// Add a binding, replacing any earlier binding of the same identifier.
    pub fn insert(&mut self, identifier: impl Into<String>, term: TypedTerm) {
        let identifier = identifier.into();
        self.bindings.retain(|(bound, _)| *bound != identifier);
        self.bindings.push((identifier, term));
    }

    pub fn get(&self, identifier: &str) -> Option<&TypedTerm> {
        self.bindings.iter().find(|(bound, _)| bound == identifier).map(|(_, term)| term)
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    fn without(&self, identifier: &str) -> Substitution {
        let bindings =
            self.bindings.iter().filter(|(bound, _)| bound != identifier).cloned().collect();
        Substitution { bindings }
    }

    /// Whether `identifier` occurs free in one of the substituted terms.
    fn captures(&self, identifier: &str) -> bool {
        self.bindings.iter().any(|(_, term)| term.occurs_free(identifier))
    }
}

/// Capture-avoiding substitution.
pub trait Subst {
    fn subst(&self, by: &Substitution) -> Self;
}

impl<T: Subst> Subst for Box<T> {
    fn subst(&self, by: &Substitution) -> Self {
        Box::new(T::subst(self, by))
    }
}

impl<T: Subst> Subst for Rc<T> {
    fn subst(&self, by: &Substitution) -> Self {
        Rc::new(T::subst(self, by))
    }
}

/// Substitute in the scope of `identifier`. The binder is renamed with trailing primes
/// if it would capture a free identifier of the substituted terms.
fn under_binder<T: Subst + FreeVars>(
    by: &Substitution,
    identifier: &str,
    body: &T,
) -> (String, T) {
    let mut inner = by.without(identifier);
    if identifier == ANONYMOUS || !inner.captures(identifier) {
        return (identifier.to_owned(), body.subst(&inner));
    }
    let mut fresh = format!("{identifier}'");
    while inner.captures(&fresh) || body.occurs_free(&fresh) {
        fresh.push('\'');
    }
    inner.insert(identifier, TypedTerm::Variable(fresh.clone()));
    let body = body.subst(&inner);
    (fresh, body)
}

impl Subst for TypedTerm {
    fn subst(&self, by: &Substitution) -> Self {
        if by.is_empty() {
            return self.clone();
        }
        match self {
            TypedTerm::Universe(_) | TypedTerm::Constant(_) => self.clone(),
            TypedTerm::Variable(name) => by.get(name).cloned().unwrap_or_else(|| self.clone()),
            TypedTerm::Type(TypeStruct::Quantified(quantifier)) => {
                TypedTerm::Type(TypeStruct::Quantified(quantifier.subst(by)))
            }
            TypedTerm::Type(TypeStruct::Module(signature)) => {
                TypedTerm::Type(TypeStruct::Module(signature.subst(by)))
            }
            TypedTerm::Constructor(Constructors::Arrow(TypedLambda { identifier, body })) => {
                let (identifier, body) = under_binder(by, identifier, body);
                TypedTerm::Constructor(Constructors::Arrow(TypedLambda { identifier, body }))
            }
            TypedTerm::Constructor(Constructors::Module(TypedModule { members })) => {
                let members = members.iter().map(|member| member.subst(by)).collect();
                TypedTerm::Constructor(Constructors::Module(TypedModule { members }))
            }
            TypedTerm::Destructor(destructor) => TypedTerm::Destructor(destructor.subst(by)),
        }
    }
}

impl Subst for TypedQuantifier {
    fn subst(&self, by: &Substitution) -> Self {
        let TypedQuantifier { polarity, from, to } = self;
        let typ = from.typ.subst(by);
        let (term, to) = under_binder(by, &from.term, to);
        TypedQuantifier {
            polarity: *polarity,
            from: Classification { universe: from.universe, typ, term },
            to,
        }
    }
}

// Member names are labels and are never renamed. Elaboration rejects member names
// that are already bound, so they cannot capture identifiers of the substituted terms.
impl Subst for Signature {
    fn subst(&self, by: &Substitution) -> Self {
        let mut by = by.clone();
        let mut members = Vec::with_capacity(self.members.len());
        for member in &self.members {
            members.push(Classification {
                universe: member.universe,
                typ: member.typ.subst(&by),
                term: member.term.clone(),
            });
            by = by.without(&member.term);
        }
        Signature { members }
    }
}

impl Subst for Destructor {
    fn subst(&self, by: &Substitution) -> Self {
        let Destructor { operator, content } = self;
        let content = match content {
            Destructors::Arrow(TypedApply { operand }) => {
                Destructors::Arrow(TypedApply { operand: operand.subst(by) })
            }
            Destructors::Module(access) => Destructors::Module(*access),
        };
        Destructor { operator: operator.subst(by), content }
    }
}

impl Subst for Classification<TypedTerm> {
    fn subst(&self, by: &Substitution) -> Self {
        Classification { universe: self.universe, typ: self.typ.subst(by), term: self.term.subst(by) }
    }
}
