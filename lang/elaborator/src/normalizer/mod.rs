pub mod env;
pub mod normalize;

pub use env::{FreshNames, NormEnv};
pub use normalize::{Normalize, normal};
