//! The core calculus produced by elaboration.
//!
//! Every node is fully annotated: destructors carry the classification of their
//! operator, and record projections refer to members by their resolved position.

use std::rc::Rc;

use pretty::DocAllocator;
use strata_lang_printer::{
    Alloc, Builder, PREC_APP_OPERATOR, PREC_ARROW_LHS, PREC_ATOM, PREC_BINDER, Precedence, Print,
    PrintCfg,
    theme::ThemeExt,
    tokens::{AMPERSAND, ARROW, BACKSLASH, COLON, DOT, HASH, NEW, STRUCT},
    util::{ParensIfExt, braces_block},
};

use crate::{Classification, FreeVars, Polarity, Universe, Value};

/// The name bound by non-dependent quantifiers. It never occurs in a term.
pub const ANONYMOUS: &str = "*";

#[derive(Debug, Clone, PartialEq)]
pub enum TypedTerm {
    Universe(Universe),
    Type(TypeStruct),
    Constructor(Constructors),
    Destructor(Destructor),
    Variable(String),
    Constant(Value),
}

#[derive(Debug, Clone, PartialEq)]
pub enum TypeStruct {
    Quantified(TypedQuantifier),
    Module(Signature),
}

/// `(x : A) -> B` for `Forall`, `(x : A) & B` for `Exists`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedQuantifier {
    pub polarity: Polarity,
    /// The bound identifier, classified by the domain
    pub from: Classification<String>,
    pub to: Box<TypedTerm>,
}

/// A telescope of named members: the type of member `i` may mention members `0..i`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Signature {
    pub members: Vec<Classification<String>>,
}

impl Signature {
    pub fn position(&self, name: &str) -> Option<usize> {
        self.members.iter().position(|member| member.term == name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Constructors {
    Arrow(TypedLambda),
    Module(TypedModule),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedLambda {
    pub identifier: String,
    pub body: Rc<TypedTerm>,
}

/// A record value. Member names are erased.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TypedModule {
    pub members: Vec<TypedTerm>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Destructor {
    pub operator: Box<Classification<TypedTerm>>,
    pub content: Destructors,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Destructors {
    Arrow(TypedApply),
    Module(TypedMemberAccess),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedApply {
    pub operand: Box<TypedTerm>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypedMemberAccess {
    pub member: usize,
}

impl TypedTerm {
    pub fn var(name: impl Into<String>) -> Self {
        TypedTerm::Variable(name.into())
    }

    pub fn quantified(polarity: Polarity, from: Classification<String>, to: TypedTerm) -> Self {
        TypedTerm::Type(TypeStruct::Quantified(TypedQuantifier {
            polarity,
            from,
            to: Box::new(to),
        }))
    }

    pub fn signature(members: Vec<Classification<String>>) -> Self {
        TypedTerm::Type(TypeStruct::Module(Signature { members }))
    }

    pub fn lambda(identifier: impl Into<String>, body: TypedTerm) -> Self {
        TypedTerm::Constructor(Constructors::Arrow(TypedLambda {
            identifier: identifier.into(),
            body: Rc::new(body),
        }))
    }

    pub fn record(members: Vec<TypedTerm>) -> Self {
        TypedTerm::Constructor(Constructors::Module(TypedModule { members }))
    }

    pub fn apply(operator: Classification<TypedTerm>, operand: TypedTerm) -> Self {
        TypedTerm::Destructor(Destructor {
            operator: Box::new(operator),
            content: Destructors::Arrow(TypedApply { operand: Box::new(operand) }),
        })
    }

    pub fn project(operator: Classification<TypedTerm>, member: usize) -> Self {
        TypedTerm::Destructor(Destructor {
            operator: Box::new(operator),
            content: Destructors::Module(TypedMemberAccess { member }),
        })
    }

    pub fn as_quantifier(&self) -> Option<&TypedQuantifier> {
        match self {
            TypedTerm::Type(TypeStruct::Quantified(quantifier)) => Some(quantifier),
            _ => None,
        }
    }

    pub fn as_signature(&self) -> Option<&Signature> {
        match self {
            TypedTerm::Type(TypeStruct::Module(signature)) => Some(signature),
            _ => None,
        }
    }
}

impl From<Value> for TypedTerm {
    fn from(value: Value) -> Self {
        TypedTerm::Constant(value)
    }
}

impl From<Universe> for TypedTerm {
    fn from(universe: Universe) -> Self {
        TypedTerm::Universe(universe)
    }
}

// Prettyprinting
//
//

impl Print for TypedTerm {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            TypedTerm::Universe(universe) => universe.print_prec(cfg, alloc, prec),
            TypedTerm::Type(typ) => typ.print_prec(cfg, alloc, prec),
            TypedTerm::Constructor(ctor) => ctor.print_prec(cfg, alloc, prec),
            TypedTerm::Destructor(dtor) => dtor.print_prec(cfg, alloc, prec),
            TypedTerm::Variable(name) => alloc.text(name.as_str()),
            TypedTerm::Constant(value) => value.print_prec(cfg, alloc, prec),
        }
    }
}

impl Print for TypeStruct {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            TypeStruct::Quantified(quantifier) => quantifier.print_prec(cfg, alloc, prec),
            TypeStruct::Module(signature) => signature.print_prec(cfg, alloc, prec),
        }
    }
}

impl Print for TypedQuantifier {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let TypedQuantifier { polarity, from, to } = self;
        let connective = match polarity {
            Polarity::Forall => ARROW,
            Polarity::Exists => AMPERSAND,
        };
        let non_dependent = from.term == ANONYMOUS
            || (cfg.print_function_sugar && !to.occurs_free(&from.term));
        let domain = if non_dependent {
            from.typ.print_prec(cfg, alloc, PREC_ARROW_LHS)
        } else {
            alloc
                .text(from.term.as_str())
                .append(alloc.space())
                .append(COLON)
                .append(alloc.space())
                .append(from.typ.print(cfg, alloc))
                .parens()
        };
        domain
            .append(alloc.space())
            .append(connective)
            .append(alloc.line())
            .append(to.print_prec(cfg, alloc, PREC_BINDER))
            .group()
            .parens_if(prec > PREC_BINDER)
    }
}

impl Print for Signature {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let members = self.members.iter().map(|member| {
            alloc
                .text(member.term.as_str())
                .append(alloc.space())
                .append(COLON)
                .append(alloc.space())
                .append(member.typ.print(cfg, alloc))
        });
        alloc.keyword(STRUCT).append(alloc.space()).append(braces_block(alloc, cfg, members))
    }
}

impl Print for Constructors {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            Constructors::Arrow(TypedLambda { identifier, body }) => alloc
                .text(BACKSLASH)
                .append(alloc.text(identifier.as_str()))
                .append(DOT)
                .append(alloc.line())
                .append(body.print_prec(cfg, alloc, PREC_BINDER))
                .nest(cfg.indent)
                .group()
                .parens_if(prec > PREC_BINDER),
            Constructors::Module(TypedModule { members }) => {
                let members = members.iter().map(|member| member.print(cfg, alloc));
                alloc.keyword(NEW).append(alloc.space()).append(braces_block(alloc, cfg, members))
            }
        }
    }
}

impl Print for Destructor {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Destructor { operator, content } = self;
        match content {
            Destructors::Arrow(TypedApply { operand }) => operator
                .term
                .print_prec(cfg, alloc, PREC_APP_OPERATOR)
                .append(alloc.line())
                .append(operand.print_prec(cfg, alloc, PREC_ATOM))
                .nest(cfg.indent)
                .group()
                .parens_if(prec > PREC_APP_OPERATOR),
            Destructors::Module(TypedMemberAccess { member }) => operator
                .term
                .print_prec(cfg, alloc, PREC_ATOM)
                .append(DOT)
                .append(alloc.dtor(format!("{HASH}{member}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int() -> TypedTerm {
        TypedTerm::var("int")
    }

    fn int_decl(identifier: &str) -> Classification<String> {
        Classification::new(Universe::BASE, int(), identifier.to_owned())
    }

    #[test]
    fn non_dependent_quantifier_uses_arrow_sugar() {
        let typ = TypedTerm::quantified(Polarity::Forall, int_decl("x"), int());
        assert_eq!(typ.print_to_string(None), "int -> int");
        let cfg = PrintCfg { print_function_sugar: false, ..Default::default() };
        assert_eq!(typ.print_to_string(Some(&cfg)), "(x : int) -> int");
    }

    #[test]
    fn dependent_quantifier_names_its_binder() {
        let from = Classification::new(Universe::new(1), TypedTerm::Universe(Universe::BASE), "A".to_owned());
        let typ = TypedTerm::quantified(Polarity::Exists, from, TypedTerm::var("A"));
        assert_eq!(typ.print_to_string(None), "(A : Type) & A");
    }

    #[test]
    fn arrows_associate_to_the_right() {
        let inner = TypedTerm::quantified(Polarity::Forall, int_decl(ANONYMOUS), int());
        let left = TypedTerm::quantified(
            Polarity::Forall,
            Classification::new(Universe::BASE, inner.clone(), ANONYMOUS.to_owned()),
            int(),
        );
        let right = TypedTerm::quantified(Polarity::Forall, int_decl(ANONYMOUS), inner);
        assert_eq!(left.print_to_string(None), "(int -> int) -> int");
        assert_eq!(right.print_to_string(None), "int -> int -> int");
    }

    #[test]
    fn destructors_print_positionally() {
        let record = Classification::new(Universe::BASE, TypedTerm::var("R"), TypedTerm::var("r"));
        assert_eq!(TypedTerm::project(record.clone(), 1).print_to_string(None), "r.#1");
        let f = Classification::new(Universe::BASE, TypedTerm::var("F"), TypedTerm::var("f"));
        let app = TypedTerm::apply(f.clone(), TypedTerm::apply(f, TypedTerm::var("x")));
        assert_eq!(app.print_to_string(None), "f (f x)");
    }

    #[test]
    fn signature_lookup_by_name() {
        let signature = Signature { members: vec![int_decl("a"), int_decl("b")] };
        assert_eq!(signature.position("b"), Some(1));
        assert_eq!(signature.position("c"), None);
        assert_eq!(TypedTerm::signature(signature.members).print_to_string(None), "struct { a : int; b : int }");
    }
}
