//! Conversion checking
//!
//! Conversion checking decides whether two classifications are definitionally equal.
//! It is used wherever an inferred classification must agree with an expected one,
//! for instance when checking a variable `x` against a type `t`, we need to check that
//! the type bound for `x` is convertible to `t`.
//!
//! Two classifications are equal if
//!
//! * they live in the same universe,
//! * their types are equal after normalization, and
//! * their terms are equal after normalization.
//!
//! Normal forms are compared up to the renaming of bound identifiers. Both sides are
//! normalized with their own supply of fresh names, so that two normal forms never
//! differ only in the names chosen when binders were renamed.
//!
//! ```text
//! (\x. x) : int -> int : Type   =   (\y. y) : int -> int : Type
//! (\x. x) 5 : int : Type        =   5 : int : Type
//! ```

use log::trace;

use strata_lang_ast::{Classification, TypedTerm};
use strata_lang_printer::Print;

use crate::normalizer::{FreshNames, NormEnv, Normalize};
use crate::result::{TcResult, TypeError};

mod alpha;

pub use alpha::{AlphaEq, Scope};

/// Whether `lhs` and `rhs` are definitionally equal under `env`.
pub fn is_equal_to(
    lhs: &Classification<TypedTerm>,
    rhs: &Classification<TypedTerm>,
    env: &NormEnv,
) -> TcResult<bool> {
    if lhs.universe != rhs.universe {
        return Ok(false);
    }
    let lhs_typ = lhs.typ.normalize(env, &mut FreshNames::new())?;
    let rhs_typ = rhs.typ.normalize(env, &mut FreshNames::new())?;
    if !lhs_typ.alpha_eq(&rhs_typ) {
        return Ok(false);
    }
    let lhs_term = lhs.term.normalize(env, &mut FreshNames::new())?;
    let rhs_term = rhs.term.normalize(env, &mut FreshNames::new())?;
    Ok(lhs_term.alpha_eq(&rhs_term))
}

/// Check that the `inferred` classification is convertible to the `expected` one.
pub fn convert(
    env: &NormEnv,
    inferred: &Classification<TypedTerm>,
    expected: &Classification<TypedTerm>,
) -> TcResult {
    trace!("{} |- {} =? {}", env.print_trace(), inferred.print_trace(), expected.print_trace());
    if is_equal_to(inferred, expected, env)? {
        return Ok(());
    }
    let lhs = normalized(inferred, env)?;
    let rhs = normalized(expected, env)?;
    Err(TypeError::not_eq(&lhs, &rhs, expected))
}

fn normalized(
    classification: &Classification<TypedTerm>,
    env: &NormEnv,
) -> TcResult<Classification<TypedTerm>> {
    let mut fresh = FreshNames::new();
    let typ = classification.typ.normalize(env, &mut fresh)?;
    let term = classification.term.normalize(env, &mut fresh)?;
    Ok(Classification::new(classification.universe, typ, term))
}
