use fxhash::FxHashMap;

use strata_lang_ast::Term;

use crate::result::{DriverError, DriverResult};

/// Provides the programs of importable modules.
///
/// Modules are stored as terms. Turning source text into terms is the job of a parser
/// sitting in front of the source.
pub trait ModuleSource {
    /// Check if a module with the given name exists
    fn exists(&self, name: &str) -> bool;
    /// Read the program of a module with the given name
    fn read(&self, name: &str) -> DriverResult<Term>;
    /// Write the program of a module with the given name
    fn write(&mut self, name: &str, program: Term) -> DriverResult;
    /// Stop keeping track of a module with the given name
    ///
    /// Returns `true` if the source had the module registered.
    fn forget(&mut self, name: &str) -> bool;
    /// If a module is requested that is not managed by this source, fall back to another source
    fn fallback_to<S: ModuleSource>(self, fallback: S) -> OverlaySource<Self, S>
    where
        Self: Sized,
    {
        OverlaySource::new(self, fallback)
    }
}

/// A module source that keeps modules in memory
#[derive(Default)]
pub struct InMemorySource {
    modules: FxHashMap<String, Term>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, program: Term) {
        self.modules.insert(name.into(), program);
    }

    pub fn with(mut self, name: impl Into<String>, program: Term) -> Self {
        self.insert(name, program);
        self
    }
}

impl ModuleSource for InMemorySource {
    fn exists(&self, name: &str) -> bool {
        self.modules.contains_key(name)
    }

    fn read(&self, name: &str) -> DriverResult<Term> {
        self.modules.get(name).cloned().ok_or_else(|| DriverError::ModuleNotFound(name.to_owned()))
    }

    fn write(&mut self, name: &str, program: Term) -> DriverResult {
        self.insert(name, program);
        Ok(())
    }

    fn forget(&mut self, name: &str) -> bool {
        self.modules.remove(name).is_some()
    }
}

/// A source that first tries to access modules from the first source, and falls back to the second
pub struct OverlaySource<S1, S2> {
    first: S1,
    second: S2,
}

impl<S1, S2> OverlaySource<S1, S2> {
    pub fn new(first: S1, second: S2) -> Self {
        Self { first, second }
    }
}

impl<S1, S2> ModuleSource for OverlaySource<S1, S2>
where
    S1: ModuleSource,
    S2: ModuleSource,
{
    fn exists(&self, name: &str) -> bool {
        self.first.exists(name) || self.second.exists(name)
    }

    fn read(&self, name: &str) -> DriverResult<Term> {
        match self.first.read(name) {
            Ok(program) => Ok(program),
            Err(DriverError::ModuleNotFound(_)) => self.second.read(name),
            Err(err) => Err(err),
        }
    }

    fn write(&mut self, name: &str, program: Term) -> DriverResult {
        if self.first.exists(name) || !self.second.exists(name) {
            self.first.write(name, program)
        } else {
            self.second.write(name, program)
        }
    }

    fn forget(&mut self, name: &str) -> bool {
        self.first.forget(name) || self.second.forget(name)
    }
}
