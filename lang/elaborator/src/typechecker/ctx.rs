//! Variable context
//!
//! Tracks the classification of every identifier in scope, together with the
//! substitution used to normalize terms mentioning them.

use pretty::DocAllocator;

use strata_lang_ast::*;
use strata_lang_printer::{
    Alloc, Builder, Precedence, Print, PrintCfg,
    tokens::{COLON, COMMA, EQUALS},
    util::sep_by,
};

use crate::normalizer::{FreshNames, NormEnv, Normalize};
use crate::result::{TcResult, TypeError};

use super::resolver::ImportResolver;

/// The typing context. Extending a context never modifies it, so the context of an
/// enclosing term stays valid while its subterms are checked.
#[derive(Clone)]
pub struct Ctx<'r> {
    /// Classification of bound identifiers. The term is the value of a let-bound
    /// identifier, or the identifier itself if it has no value.
    vars: Environment<Classification<TypedTerm>>,
    /// The value of every bound identifier, in normal form
    env: NormEnv,
    resolver: &'r dyn ImportResolver,
}

impl<'r> Ctx<'r> {
    pub fn new(resolver: &'r dyn ImportResolver, vars: Environment<Classification<TypedTerm>>) -> Self {
        let env = vars.fmap(|_, classification| classification.term.clone()).into();
        Ctx { vars, env, resolver }
    }

    pub fn vars(&self) -> &Environment<Classification<TypedTerm>> {
        &self.vars
    }

    pub fn env(&self) -> &NormEnv {
        &self.env
    }

    pub fn resolver(&self) -> &'r dyn ImportResolver {
        self.resolver
    }

    pub fn lookup(&self, identifier: &str) -> TcResult<&Classification<TypedTerm>> {
        Ok(self.vars.lookup(identifier)?)
    }

    /// Identifiers cannot be rebound while they are in scope.
    pub fn ensure_fresh(&self, identifier: &str) -> TcResult {
        if identifier != ANONYMOUS && self.vars.maps(identifier) {
            return Err(Box::new(TypeError::Shadowing { identifier: identifier.to_owned() }));
        }
        Ok(())
    }

    pub fn bind(&self, identifier: impl Into<String>, classification: Classification<TypedTerm>) -> Self {
        let identifier = identifier.into();
        let env = self.env.push(identifier.clone(), classification.term.clone());
        Ctx { vars: self.vars.push(identifier, classification), env, resolver: self.resolver }
    }

    /// Bind an identifier without a value.
    pub fn bind_declared(&self, declaration: &Classification<String>) -> Self {
        self.bind(declaration.term.clone(), declaration.variable())
    }

    pub fn normalize(&self, term: &TypedTerm) -> TcResult<TypedTerm> {
        term.normalize(&self.env, &mut FreshNames::new())
    }

    /// Normalize both the type and the term of a classification.
    pub fn normalized(&self, classification: &Classification<TypedTerm>) -> TcResult<Classification<TypedTerm>> {
        let typ = self.normalize(&classification.typ)?;
        let term = self.normalize(&classification.term)?;
        Ok(Classification::new(classification.universe, typ, term))
    }
}

impl Print for Ctx<'_> {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        _prec: Precedence,
    ) -> Builder<'a> {
        let mut bindings: Vec<_> = self
            .vars
            .iter()
            .map(|(identifier, classification)| {
                let binding = alloc.text(identifier);
                let binding = match &classification.term {
                    TypedTerm::Variable(name) if name == identifier => binding,
                    value => binding
                        .append(alloc.space())
                        .append(EQUALS)
                        .append(alloc.space())
                        .append(value.print(cfg, alloc)),
                };
                binding
                    .append(alloc.space())
                    .append(COLON)
                    .append(alloc.space())
                    .append(classification.typ.print(cfg, alloc))
            })
            .collect();
        bindings.reverse();
        sep_by(alloc, bindings, COMMA).group()
    }
}
