mod free_vars;
mod subst;

pub use free_vars::*;
pub use subst::*;
