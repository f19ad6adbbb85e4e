mod cache;
mod dependency_graph;
pub mod prelude;
mod result;
mod session;
mod settings;
mod source;

pub use cache::*;
pub use dependency_graph::*;
pub use result::*;
pub use session::*;
pub use settings::*;
pub use source::*;
