use strata_lang_ast::{ANONYMOUS, Environment, TypedTerm};
use strata_lang_printer::{Alloc, Builder, Precedence, Print, PrintCfg};

/// The substitution applied by the normalizer: every identifier in scope is mapped to
/// its value in normal form, or to a variable if it has no value.
#[derive(Debug, Clone, Default)]
pub struct NormEnv {
    terms: Environment<TypedTerm>,
}

impl NormEnv {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lookup(&self, identifier: &str) -> Option<&TypedTerm> {
        self.terms.get(identifier)
    }

    pub fn maps(&self, identifier: &str) -> bool {
        self.terms.maps(identifier)
    }

    pub fn push(&self, identifier: impl Into<String>, term: TypedTerm) -> Self {
        NormEnv { terms: self.terms.push(identifier, term) }
    }

    /// Bring the identifier of a binder into scope.
    ///
    /// If the identifier is already mapped, the binder is renamed to a fresh name
    /// and both the old and the new name are mapped to the fresh variable.
    /// The anonymous binder is never renamed.
    pub fn bind(&self, identifier: &str, fresh: &mut FreshNames) -> (String, NormEnv) {
        if identifier == ANONYMOUS || !self.maps(identifier) {
            let env = self.push(identifier, TypedTerm::var(identifier));
            return (identifier.to_owned(), env);
        }
        let renamed = fresh.next(self);
        let env = self
            .push(renamed.clone(), TypedTerm::var(renamed.clone()))
            .push(identifier, TypedTerm::var(renamed.clone()));
        (renamed, env)
    }
}

impl From<Environment<TypedTerm>> for NormEnv {
    fn from(terms: Environment<TypedTerm>) -> Self {
        NormEnv { terms }
    }
}

impl Print for NormEnv {
    fn print_prec<'a>(
        &'a self,
        cfg: &PrintCfg,
        alloc: &'a Alloc<'a>,
        prec: Precedence,
    ) -> Builder<'a> {
        self.terms.print_prec(cfg, alloc, prec)
    }
}

/// Generator for the names `_0`, `_1`, ... used when renaming binders.
///
/// A counter is owned by a single top-level normalization and must not be shared.
#[derive(Debug, Default)]
pub struct FreshNames {
    next: usize,
}

impl FreshNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// The next name that is not mapped by `env`.
    pub fn next(&mut self, env: &NormEnv) -> String {
        loop {
            let name = format!("_{}", self.next);
            self.next += 1;
            if !env.maps(&name) {
                return name;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unmapped_binders_keep_their_name() {
        let (name, env) = NormEnv::empty().bind("x", &mut FreshNames::new());
        assert_eq!(name, "x");
        assert_eq!(env.lookup("x"), Some(&TypedTerm::var("x")));
    }

    #[test]
    fn mapped_binders_are_renamed() {
        let mut fresh = FreshNames::new();
        let env = NormEnv::empty().push("x", TypedTerm::var("y")).push("_0", TypedTerm::var("_0"));
        let (name, env) = env.bind("x", &mut fresh);
        assert_eq!(name, "_1");
        assert_eq!(env.lookup("x"), Some(&TypedTerm::var("_1")));
        assert!(env.maps("_1"));
    }

    #[test]
    fn anonymous_binder_is_never_renamed() {
        let env = NormEnv::empty().push(ANONYMOUS, TypedTerm::var(ANONYMOUS));
        let (name, _) = env.bind(ANONYMOUS, &mut FreshNames::new());
        assert_eq!(name, ANONYMOUS);
    }
}
