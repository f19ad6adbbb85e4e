pub mod conversion_checking;
pub mod normalizer;
pub mod result;
pub mod typechecker;

pub use conversion_checking::{convert, is_equal_to};
pub use normalizer::{FreshNames, NormEnv, Normalize, normal};
pub use result::{TcResult, TypeError};
pub use typechecker::{CheckInfer, Ctx, ImportResolver, NoImports, check_program, ensure};
