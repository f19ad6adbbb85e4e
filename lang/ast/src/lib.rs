mod classification;
pub mod ctx;
mod term;
pub mod traits;
mod typed;
mod universe;
mod value;

pub use classification::*;
pub use ctx::{Environment, Unbound};
pub use term::*;
pub use traits::*;
pub use typed::*;
pub use universe::*;
pub use value::*;
