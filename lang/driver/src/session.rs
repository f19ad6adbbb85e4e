//! A session holds the definitions made so far and the modules loaded on their behalf.
//!
//! Every term goes through the same pipeline: it is elaborated against the classified
//! values of the session, its type is normalized, and, if it lives in the base universe,
//! it is evaluated. Imports are resolved by loading modules from a [`ModuleSource`] and
//! executing them in the session. Loaded modules are cached until they, or a module they
//! import, are updated.

use std::cell::RefCell;
use std::io::{self, Write};

use log::debug;

use strata_lang_ast::*;
use strata_lang_elaborator::{Ctx, ImportResolver, NoImports, TypeError, check_program};
use strata_lang_printer::{Print, PrintExt, StandardStream};
use strata_lang_runtime::evaluate;

use crate::cache::Cache;
use crate::dependency_graph::DependencyGraph;
use crate::prelude;
use crate::result::{DriverError, DriverResult};
use crate::settings::Settings;
use crate::source::{InMemorySource, ModuleSource};

pub struct Session {
    /// Definitions, each classified with its value
    env: Environment<Classification<Value>>,
    /// Definitions as seen by the type checker
    checker_env: Environment<Classification<TypedTerm>>,
    source: Box<dyn ModuleSource>,
    modules: RefCell<Cache<Classification<Value>>>,
    deps: RefCell<DependencyGraph>,
    /// Modules currently being loaded, outermost first
    loading: RefCell<Vec<String>>,
    settings: Settings,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// An empty session without any modules.
    pub fn new() -> Self {
        Session {
            env: Environment::empty(),
            checker_env: Environment::empty(),
            source: Box::new(InMemorySource::new()),
            modules: RefCell::new(Cache::default()),
            deps: RefCell::new(DependencyGraph::default()),
            loading: RefCell::new(Vec::new()),
            settings: Settings::default(),
        }
    }

    /// A session that starts out with the bindings of the [`prelude`].
    pub fn with_prelude() -> Self {
        let env = prelude::environment();
        let checker_env = env.fmap(|name, classification| {
            let term = match &classification.term {
                Value::Absent => TypedTerm::var(name),
                value => TypedTerm::Constant(value.clone()),
            };
            classification.with_term(term)
        });
        Session { env, checker_env, ..Self::new() }
    }

    pub fn with_source(self, source: impl ModuleSource + 'static) -> Self {
        Session { source: Box::new(source), ..self }
    }

    pub fn with_settings(self, settings: Settings) -> Self {
        Session { settings, ..self }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn env(&self) -> &Environment<Classification<Value>> {
        &self.env
    }

    pub fn lookup(&self, name: &str) -> Option<&Classification<Value>> {
        self.env.get(name)
    }

    /// The definitions as seen by the type checker.
    ///
    /// Values are opaque constants. Defined types unfold to their normal form, while the
    /// base types of the prelude stay neutral variables.
    pub fn checker_env(&self) -> &Environment<Classification<TypedTerm>> {
        &self.checker_env
    }

    /// The definitions as seen by the evaluator.
    pub fn runtime_env(&self) -> Environment<Value> {
        self.env.fmap(|_, classification| classification.term.clone())
    }

    /// Elaborate a term and evaluate it if it denotes a value.
    pub fn execute(&self, term: &Term) -> DriverResult<Classification<Value>> {
        self.run(term).map(|(_, value)| value)
    }

    /// The normalized elaboration of a term, together with its value.
    fn run(&self, term: &Term) -> DriverResult<(Classification<TypedTerm>, Classification<Value>)> {
        let resolver = SessionResolver { session: self, error: RefCell::new(None) };
        let classification = match check_program(&resolver, &self.checker_env, term) {
            Ok(classification) => classification,
            Err(err) => return Err(resolver.into_error(err)),
        };
        let normalized = Ctx::new(&NoImports, self.checker_env.clone()).normalized(&classification)?;
        let value = if classification.universe.is_base() {
            evaluate(&self.runtime_env(), &classification)?
        } else {
            Value::Absent
        };
        Ok((normalized.clone(), normalized.with_term(value)))
    }

    /// Execute a term and bind the result to `name`.
    ///
    /// If an annotation is given, the term is checked against it.
    pub fn define(
        &mut self,
        name: impl Into<String>,
        annotation: Option<Term>,
        term: Term,
    ) -> DriverResult<Classification<Value>> {
        let name = name.into();
        if self.env.maps(&name) {
            return Err(DriverError::Redefinition { name });
        }
        let term = match annotation {
            Some(typ) => Term::anno(typ, term),
            None => term,
        };
        let (elaborated, classification) = self.run(&term)?;
        debug!("Defined {name} : {}", classification.typ.print_trace());
        let checked = if classification.universe.is_base() {
            elaborated.with_term(TypedTerm::Constant(classification.term.clone()))
        } else {
            elaborated
        };
        self.checker_env = self.checker_env.push(name.clone(), checked);
        self.env = self.env.push(name, classification.clone());
        Ok(classification)
    }

    /// Replace the program of a module.
    ///
    /// The module and every module importing it are reloaded on their next import.
    pub fn update_module(&mut self, name: &str, program: Term) -> DriverResult {
        self.source.write(name, program)?;
        self.invalidate(name);
        Ok(())
    }

    /// Remove a module from the source of this session.
    pub fn forget_module(&mut self, name: &str) -> bool {
        self.invalidate(name);
        self.source.forget(name)
    }

    /// Whether a module is loaded and up to date.
    pub fn is_loaded(&self, name: &str) -> bool {
        !self.modules.borrow().is_stale(name)
    }

    /// Print a result with the configured printing options.
    pub fn render(&self, classification: &Classification<Value>) -> String {
        classification.print_to_string(Some(&self.settings.print))
    }

    /// Print a result to stdout, colored as configured.
    pub fn print_result(&self, classification: &Classification<Value>) -> io::Result<()> {
        let mut stream = StandardStream::stdout(self.settings.colorize);
        classification.print_colored(&self.settings.print, &mut stream)?;
        writeln!(stream)
    }

    fn invalidate(&mut self, name: &str) {
        let stale = self.deps.get_mut().reverse_dependencies(name);
        debug!("Invalidating modules: {}", stale.join(", "));
        let modules = self.modules.get_mut();
        for module in &stale {
            modules.invalidate(module);
        }
    }

    fn load_module(&self, name: &str) -> DriverResult<Classification<Value>> {
        if let Some(importer) = self.loading.borrow().last() {
            self.deps.borrow_mut().add(importer, name);
        }
        if let Some(module) = self.modules.borrow().get_unless_stale(name) {
            debug!("Found module {name} in cache");
            return Ok(module.clone());
        }
        if let Some(cycle) = self.import_cycle(name) {
            return Err(DriverError::ImportCycle { module: name.to_owned(), cycle });
        }

        debug!("Loading module {name}");
        let program = self.source.read(name)?;
        self.deps.borrow_mut().invalidate(name);
        self.loading.borrow_mut().push(name.to_owned());
        let result = self.execute(&program);
        self.loading.borrow_mut().pop();

        let module = result?;
        self.modules.borrow_mut().insert(name.to_owned(), module.clone());
        Ok(module)
    }

    /// The chain of imports leading back to `name`, if `name` is currently being loaded.
    fn import_cycle(&self, name: &str) -> Option<Vec<String>> {
        let loading = self.loading.borrow();
        let start = loading.iter().position(|module| module == name)?;
        let mut cycle = loading[start..].to_vec();
        cycle.push(name.to_owned());
        Some(cycle)
    }
}

/// Resolves the imports of a single execution.
///
/// The checker only sees the message of a failed import. The structured error is kept
/// here so that the session can report it instead.
struct SessionResolver<'s> {
    session: &'s Session,
    error: RefCell<Option<DriverError>>,
}

impl SessionResolver<'_> {
    fn into_error(self, err: Box<TypeError>) -> DriverError {
        match (*err, self.error.into_inner()) {
            (TypeError::Import { .. }, Some(cause)) => cause,
            (err, _) => DriverError::Type(Box::new(err)),
        }
    }
}

impl ImportResolver for SessionResolver<'_> {
    fn resolve(&self, filename: &str) -> Result<Classification<Value>, String> {
        self.session.load_module(filename).map_err(|err| {
            let message = err.to_string();
            let mut error = self.error.borrow_mut();
            if error.is_none() {
                *error = Some(err);
            }
            message
        })
    }
}
