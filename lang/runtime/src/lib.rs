mod eval;
mod result;

pub use eval::{Env, Eval, apply, evaluate};
pub use result::{RuntimeError, RuntimeResult};
