//! The surface syntax consumed by the elaborator.
//!
//! Terms are produced by an external parser (or built directly by a host) and are
//! not guaranteed to be well-typed.

use pretty::DocAllocator;
use strata_lang_printer::{
    Alloc, Builder, PREC_APP_OPERATOR, PREC_ARROW_LHS, PREC_ATOM, PREC_BINDER, Precedence, Print,
    PrintCfg,
    theme::ThemeExt,
    tokens::{
        AMPERSAND, ARROW, BACKSLASH, COLON, DOT, EQUALS, IMPORT, IN, LET, NEW, STRUCT, SUBTYPE,
        TYPEOF,
    },
    util::{ParensIfExt, braces_block},
};

use crate::{Classification, Polarity, Universe, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Term {
    Universe(Universe),
    Quantified(Quantified),
    Lambda(Lambda),
    Apply(Apply),
    Module(ModuleType),
    New(NewStruct),
    Access(Access),
    Generic(Generic),
    Variable(Variable),
    Annotation(Annotation),
    LetBinding(LetBinding),
    Constant(Constant),
    TypeOf(TypeOf),
    Import(Import),
}

/// The bound on the identifier of a quantifier.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeConstraint {
    /// Ranges over the base universe
    None,
    /// `x : A`
    Type(Box<Term>),
    /// `x <: C`: ranges over the domain of the type class `C`, with an instance of `C x`
    Class(Box<Term>),
}

/// The unified syntax for dependent functions, dependent pairs and type class bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct Quantified {
    pub polarity: Polarity,
    pub constraint: TypeConstraint,
    pub identifier: Option<String>,
    pub body: Box<Term>,
}

/// A bound identifier with an optional type annotation.
#[derive(Debug, Clone, PartialEq)]
pub struct Declaration {
    pub identifier: String,
    pub typ: Option<Box<Term>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub parameter: Declaration,
    pub body: Box<Term>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Apply {
    pub operator: Box<Term>,
    pub argument: Box<Term>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberDecl {
    pub name: String,
    pub typ: Box<Term>,
}

/// A record type `struct { a : A; b : B }`
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleType {
    pub members: Vec<MemberDecl>,
}

/// `x = e`
#[derive(Debug, Clone, PartialEq)]
pub struct Definition {
    pub identifier: String,
    pub body: Box<Term>,
}

/// A record value `new { a = e; b = e }`
#[derive(Debug, Clone, PartialEq)]
pub struct NewStruct {
    pub members: Vec<Definition>,
}

/// `e.name`. The parser produces an access without operator for a dangling `.name`.
#[derive(Debug, Clone, PartialEq)]
pub struct Access {
    pub operator: Option<Box<Term>>,
    pub name: String,
}

/// A parser-intermediate declaration that is folded into a quantifier before checking.
#[derive(Debug, Clone, PartialEq)]
pub struct Generic {
    pub identifier: String,
    pub constraint: TypeConstraint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    pub typ: Box<Term>,
    pub term: Box<Term>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LetBinding {
    pub definition: Definition,
    pub continuation: Box<Term>,
}

/// A host-provided value together with its classification.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant {
    pub content: Classification<Value>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeOf {
    pub term: Box<Term>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub filename: String,
}

macro_rules! impl_from_for_term {
    ($($variant:ident($payload:ty)),* $(,)?) => {
        $(
            impl From<$payload> for Term {
                fn from(val: $payload) -> Self {
                    Term::$variant(val)
                }
            }
        )*
    };
}

impl_from_for_term!(
    Universe(Universe),
    Quantified(Quantified),
    Lambda(Lambda),
    Apply(Apply),
    Module(ModuleType),
    New(NewStruct),
    Access(Access),
    Generic(Generic),
    Variable(Variable),
    Annotation(Annotation),
    LetBinding(LetBinding),
    Constant(Constant),
    TypeOf(TypeOf),
    Import(Import),
);

// Smart constructors
//
//

impl Term {
    pub fn universe(rank: u32) -> Term {
        Term::Universe(Universe::new(rank))
    }

    pub fn var(name: impl Into<String>) -> Term {
        Variable { name: name.into() }.into()
    }

    /// `\x. body`
    pub fn lambda(identifier: impl Into<String>, body: Term) -> Term {
        Lambda {
            parameter: Declaration { identifier: identifier.into(), typ: None },
            body: Box::new(body),
        }
        .into()
    }

    /// `\(x : typ). body`
    pub fn lambda_annotated(identifier: impl Into<String>, typ: Term, body: Term) -> Term {
        Lambda {
            parameter: Declaration { identifier: identifier.into(), typ: Some(Box::new(typ)) },
            body: Box::new(body),
        }
        .into()
    }

    pub fn apply(operator: Term, argument: Term) -> Term {
        Apply { operator: Box::new(operator), argument: Box::new(argument) }.into()
    }

    /// `f a b c`
    pub fn apply_all(operator: Term, arguments: impl IntoIterator<Item = Term>) -> Term {
        arguments.into_iter().fold(operator, Term::apply)
    }

    pub fn quantified(
        polarity: Polarity,
        constraint: TypeConstraint,
        identifier: Option<String>,
        body: Term,
    ) -> Term {
        Quantified { polarity, constraint, identifier, body: Box::new(body) }.into()
    }

    /// `A -> B`
    pub fn arrow(from: Term, to: Term) -> Term {
        Term::quantified(Polarity::Forall, TypeConstraint::Type(Box::new(from)), None, to)
    }

    /// `(x : A) -> B`
    pub fn forall(identifier: impl Into<String>, typ: Term, body: Term) -> Term {
        Term::quantified(
            Polarity::Forall,
            TypeConstraint::Type(Box::new(typ)),
            Some(identifier.into()),
            body,
        )
    }

    /// `(x : A) & B`
    pub fn exists(identifier: impl Into<String>, typ: Term, body: Term) -> Term {
        Term::quantified(
            Polarity::Exists,
            TypeConstraint::Type(Box::new(typ)),
            Some(identifier.into()),
            body,
        )
    }

    /// `forall x. body`, where `x` ranges over the base universe
    pub fn generic(identifier: impl Into<String>, body: Term) -> Term {
        Term::quantified(Polarity::Forall, TypeConstraint::None, Some(identifier.into()), body)
    }

    /// `(x <: C) -> body`
    pub fn bounded(identifier: impl Into<String>, class: Term, body: Term) -> Term {
        Term::quantified(
            Polarity::Forall,
            TypeConstraint::Class(Box::new(class)),
            Some(identifier.into()),
            body,
        )
    }

    pub fn module<S: Into<String>>(members: impl IntoIterator<Item = (S, Term)>) -> Term {
        let members = members
            .into_iter()
            .map(|(name, typ)| MemberDecl { name: name.into(), typ: Box::new(typ) })
            .collect();
        ModuleType { members }.into()
    }

    pub fn new_struct<S: Into<String>>(members: impl IntoIterator<Item = (S, Term)>) -> Term {
        let members = members
            .into_iter()
            .map(|(identifier, body)| Definition { identifier: identifier.into(), body: Box::new(body) })
            .collect();
        NewStruct { members }.into()
    }

    pub fn access(operator: Term, name: impl Into<String>) -> Term {
        Access { operator: Some(Box::new(operator)), name: name.into() }.into()
    }

    /// `term : typ`
    pub fn anno(typ: Term, term: Term) -> Term {
        Annotation { typ: Box::new(typ), term: Box::new(term) }.into()
    }

    /// `let x = definition in continuation`
    pub fn let_in(identifier: impl Into<String>, definition: Term, continuation: Term) -> Term {
        LetBinding {
            definition: Definition { identifier: identifier.into(), body: Box::new(definition) },
            continuation: Box::new(continuation),
        }
        .into()
    }

    pub fn constant(content: Classification<Value>) -> Term {
        Constant { content }.into()
    }

    pub fn type_of(term: Term) -> Term {
        TypeOf { term: Box::new(term) }.into()
    }

    pub fn import(filename: impl Into<String>) -> Term {
        Import { filename: filename.into() }.into()
    }
}

// Prettyprinting
//
//

impl Print for Term {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        match self {
            Term::Universe(universe) => universe.print_prec(cfg, alloc, prec),
            Term::Quantified(quantified) => quantified.print_prec(cfg, alloc, prec),
            Term::Lambda(lambda) => lambda.print_prec(cfg, alloc, prec),
            Term::Apply(apply) => apply.print_prec(cfg, alloc, prec),
            Term::Module(module) => module.print_prec(cfg, alloc, prec),
            Term::New(new) => new.print_prec(cfg, alloc, prec),
            Term::Access(access) => access.print_prec(cfg, alloc, prec),
            Term::Generic(generic) => generic.print_prec(cfg, alloc, prec),
            Term::Variable(Variable { name }) => alloc.text(name.as_str()),
            Term::Annotation(anno) => anno.print_prec(cfg, alloc, prec),
            Term::LetBinding(let_binding) => let_binding.print_prec(cfg, alloc, prec),
            Term::Constant(Constant { content }) => content.term.print_prec(cfg, alloc, prec),
            Term::TypeOf(TypeOf { term }) => alloc
                .keyword(TYPEOF)
                .append(alloc.space())
                .append(term.print_prec(cfg, alloc, PREC_ATOM))
                .parens_if(prec > PREC_APP_OPERATOR),
            Term::Import(Import { filename }) => alloc
                .keyword(IMPORT)
                .append(alloc.space())
                .append(alloc.literal(format!("{filename:?}")))
                .parens_if(prec > PREC_APP_OPERATOR),
        }
    }
}

/// `x : A`, `x <: C` or just `x`
fn print_bound<'a>(
    identifier: &'a str,
    constraint: &'a TypeConstraint,
    cfg: &PrintCfg,
    alloc: &'a Alloc<'a>,
) -> Builder<'a> {
    let (symbol, bound) = match constraint {
        TypeConstraint::None => return alloc.text(identifier),
        TypeConstraint::Type(bound) => (COLON, bound),
        TypeConstraint::Class(bound) => (SUBTYPE, bound),
    };
    alloc
        .text(identifier)
        .append(alloc.space())
        .append(symbol)
        .append(alloc.space())
        .append(bound.print(cfg, alloc))
}

impl Print for Quantified {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Quantified { polarity, constraint, identifier, body } = self;
        let connective = match polarity {
            Polarity::Forall => ARROW,
            Polarity::Exists => AMPERSAND,
        };
        let head = match (identifier, constraint) {
            (None, TypeConstraint::Type(from) | TypeConstraint::Class(from)) => {
                from.print_prec(cfg, alloc, PREC_ARROW_LHS).append(alloc.space()).append(connective)
            }
            (Some(identifier), TypeConstraint::None) => alloc
                .keyword(polarity.keyword())
                .append(alloc.space())
                .append(alloc.text(identifier.as_str()))
                .append(DOT),
            (None, TypeConstraint::None) => alloc.keyword(polarity.keyword()).append(DOT),
            (Some(identifier), _) => print_bound(identifier, constraint, cfg, alloc)
                .parens()
                .append(alloc.space())
                .append(connective),
        };
        head.append(alloc.line())
            .append(body.print_prec(cfg, alloc, PREC_BINDER))
            .group()
            .parens_if(prec > PREC_BINDER)
    }
}

impl Print for Lambda {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Lambda { parameter: Declaration { identifier, typ }, body } = self;
        let parameter = match typ {
            None => alloc.text(identifier.as_str()),
            Some(typ) => alloc
                .text(identifier.as_str())
                .append(alloc.space())
                .append(COLON)
                .append(alloc.space())
                .append(typ.print(cfg, alloc))
                .parens(),
        };
        alloc
            .text(BACKSLASH)
            .append(parameter)
            .append(DOT)
            .append(alloc.line())
            .append(body.print_prec(cfg, alloc, PREC_BINDER))
            .nest(cfg.indent)
            .group()
            .parens_if(prec > PREC_BINDER)
    }
}

impl Print for Apply {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let Apply { operator, argument } = self;
        operator
            .print_prec(cfg, alloc, PREC_APP_OPERATOR)
            .append(alloc.line())
            .append(argument.print_prec(cfg, alloc, PREC_ATOM))
            .nest(cfg.indent)
            .group()
            .parens_if(prec > PREC_APP_OPERATOR)
    }
}

impl Print for ModuleType {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let members = self.members.iter().map(|MemberDecl { name, typ }| {
            alloc
                .text(name.as_str())
                .append(alloc.space())
                .append(COLON)
                .append(alloc.space())
                .append(typ.print(cfg, alloc))
        });
        alloc.keyword(STRUCT).append(alloc.space()).append(braces_block(alloc, cfg, members))
    }
}

impl Print for Definition {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        alloc
            .text(self.identifier.as_str())
            .append(alloc.space())
            .append(EQUALS)
            .append(alloc.space())
            .append(self.body.print(cfg, alloc))
    }
}

impl Print for NewStruct {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let members = self.members.iter().map(|member| member.print(cfg, alloc));
        alloc.keyword(NEW).append(alloc.space()).append(braces_block(alloc, cfg, members))
    }
}

impl Print for Access {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let Access { operator, name } = self;
        let operator = match operator {
            Some(operator) => operator.print_prec(cfg, alloc, PREC_ATOM),
            None => alloc.nil(),
        };
        operator.append(DOT).append(alloc.dtor(name.as_str()))
    }
}

impl Print for Generic {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        print_bound(&self.identifier, &self.constraint, cfg, alloc).parens()
    }
}

impl Print for Annotation {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let Annotation { typ, term } = self;
        term.print_prec(cfg, alloc, PREC_ARROW_LHS)
            .append(alloc.space())
            .append(COLON)
            .append(alloc.space())
            .append(typ.print(cfg, alloc))
            .parens()
    }
}

impl Print for LetBinding {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        let LetBinding { definition, continuation } = self;
        alloc
            .keyword(LET)
            .append(alloc.space())
            .append(definition.print(cfg, alloc))
            .append(alloc.space())
            .append(alloc.keyword(IN))
            .append(alloc.line())
            .append(continuation.print_prec(cfg, alloc, PREC_BINDER))
            .group()
            .parens_if(prec > PREC_BINDER)
    }
}
