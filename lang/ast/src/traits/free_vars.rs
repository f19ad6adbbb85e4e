use std::rc::Rc;

use crate::{
    Classification, Constructors, Destructor, Destructors, Signature, TypeStruct, TypedQuantifier,
    TypedTerm,
};

pub trait FreeVars {
    /// Whether `identifier` occurs syntactically free in the term.
    ///
    /// Only the term itself is inspected, not the types of the variables occurring in it.
    fn occurs_free(&self, identifier: &str) -> bool;
}

impl<T: FreeVars> FreeVars for Box<T> {
    fn occurs_free(&self, identifier: &str) -> bool {
        T::occurs_free(self, identifier)
    }
}

impl<T: FreeVars> FreeVars for Rc<T> {
    fn occurs_free(&self, identifier: &str) -> bool {
        T::occurs_free(self, identifier)
    }
}

impl FreeVars for TypedTerm {
    fn occurs_free(&self, identifier: &str) -> bool {
        match self {
            TypedTerm::Universe(_) | TypedTerm::Constant(_) => false,
            TypedTerm::Variable(name) => name == identifier,
            TypedTerm::Type(TypeStruct::Quantified(quantifier)) => {
                quantifier.occurs_free(identifier)
            }
            TypedTerm::Type(TypeStruct::Module(signature)) => signature.occurs_free(identifier),
            TypedTerm::Constructor(Constructors::Arrow(lambda)) => {
                lambda.identifier != identifier && lambda.body.occurs_free(identifier)
            }
            TypedTerm::Constructor(Constructors::Module(module)) => {
                module.members.iter().any(|member| member.occurs_free(identifier))
            }
            TypedTerm::Destructor(destructor) => destructor.occurs_free(identifier),
        }
    }
}

impl FreeVars for TypedQuantifier {
    fn occurs_free(&self, identifier: &str) -> bool {
        let TypedQuantifier { from, to, .. } = self;
        from.typ.occurs_free(identifier) || (from.term != identifier && to.occurs_free(identifier))
    }
}

impl FreeVars for Signature {
    fn occurs_free(&self, identifier: &str) -> bool {
        for member in &self.members {
            if member.typ.occurs_free(identifier) {
                return true;
            }
            // Later members refer to this member
            if member.term == identifier {
                return false;
            }
        }
        false
    }
}

impl FreeVars for Destructor {
    fn occurs_free(&self, identifier: &str) -> bool {
        let Destructor { operator, content } = self;
        operator.occurs_free(identifier)
            || match content {
                Destructors::Arrow(apply) => apply.operand.occurs_free(identifier),
                Destructors::Module(_) => false,
            }
    }
}

impl FreeVars for Classification<TypedTerm> {
    fn occurs_free(&self, identifier: &str) -> bool {
        self.typ.occurs_free(identifier) || self.term.occurs_free(identifier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Polarity, Universe};

    fn decl(identifier: &str, typ: TypedTerm) -> Classification<String> {
        Classification::new(Universe::BASE, typ, identifier.to_owned())
    }

    #[test]
    fn lambda_binds_its_parameter() {
        let id = TypedTerm::lambda("x", TypedTerm::var("x"));
        assert!(!id.occurs_free("x"));
        let konst = TypedTerm::lambda("x", TypedTerm::var("y"));
        assert!(konst.occurs_free("y"));
    }

    #[test]
    fn quantifier_domain_is_outside_the_binder() {
        let typ = TypedTerm::quantified(Polarity::Forall, decl("x", TypedTerm::var("x")), TypedTerm::var("x"));
        assert!(typ.occurs_free("x"));
        let typ = TypedTerm::quantified(Polarity::Forall, decl("x", TypedTerm::var("A")), TypedTerm::var("x"));
        assert!(!typ.occurs_free("x"));
        assert!(typ.occurs_free("A"));
    }

    #[test]
    fn signature_members_bind_later_members() {
        let signature = TypedTerm::signature(vec![
            decl("n", TypedTerm::var("int")),
            decl("v", TypedTerm::var("n")),
        ]);
        assert!(!signature.occurs_free("n"));
        assert!(signature.occurs_free("int"));
        let escaping = TypedTerm::signature(vec![
            decl("v", TypedTerm::var("n")),
            decl("n", TypedTerm::var("int")),
        ]);
        assert!(escaping.occurs_free("n"));
    }

    #[test]
    fn operator_types_are_inspected() {
        let f = Classification::new(Universe::BASE, TypedTerm::var("F"), TypedTerm::var("f"));
        let app = TypedTerm::apply(f, TypedTerm::var("x"));
        assert!(app.occurs_free("F"));
        assert!(app.occurs_free("f"));
        assert!(app.occurs_free("x"));
        assert!(!app.occurs_free("y"));
    }
}
