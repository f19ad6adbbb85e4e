pub mod ctx;
pub mod exprs;
pub mod resolver;

use strata_lang_ast::{Classification, Environment, Term, TypedTerm};

pub use crate::result::TypeError;
pub use ctx::Ctx;
pub use exprs::{CheckInfer, ensure};
pub use resolver::{ImportResolver, NoImports};

use crate::result::TcResult;

/// Elaborate a complete program in the environment provided by the host.
pub fn check_program(
    resolver: &dyn ImportResolver,
    env: &Environment<Classification<TypedTerm>>,
    term: &Term,
) -> TcResult<Classification<TypedTerm>> {
    let ctx = Ctx::new(resolver, env.clone());
    term.infer(&ctx)
}
