use miette::Diagnostic;
use thiserror::Error;

use strata_lang_elaborator::TypeError;
use strata_lang_runtime::RuntimeError;

pub type DriverResult<T = ()> = Result<T, DriverError>;

#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
pub enum DriverError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Type(#[from] Box<TypeError>),
    #[error(transparent)]
    #[diagnostic(transparent)]
    Runtime(#[from] Box<RuntimeError>),
    #[error("{name} is already defined")]
    #[diagnostic(code("D-001"), help("Definitions cannot be replaced. Choose a different name."))]
    Redefinition { name: String },
    #[error("Import cycle detected for module {module}: {}", cycle.join(" -> "))]
    #[diagnostic(code("D-002"))]
    ImportCycle { module: String, cycle: Vec<String> },
    #[error("Module not found: {0}")]
    #[diagnostic(code("D-003"))]
    ModuleNotFound(String),
}
