use strata_lang_ast::{Classification, Value};

/// Resolves the filename of an `import` to the classified value of the imported program.
///
/// The elaborator calls the resolver once per `import` it encounters. Caching and the
/// detection of cyclic imports are the responsibility of the implementation.
pub trait ImportResolver {
    fn resolve(&self, filename: &str) -> Result<Classification<Value>, String>;
}

impl<F> ImportResolver for F
where
    F: Fn(&str) -> Result<Classification<Value>, String>,
{
    fn resolve(&self, filename: &str) -> Result<Classification<Value>, String> {
        self(filename)
    }
}

/// A resolver for programs that do not import anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImports;

impl ImportResolver for NoImports {
    fn resolve(&self, filename: &str) -> Result<Classification<Value>, String> {
        Err(format!("imports are not available, cannot load {filename}"))
    }
}
