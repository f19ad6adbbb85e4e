use log::trace;

use strata_lang_ast::*;
use strata_lang_printer::Print;

use crate::result::{TcResult, TypeError};

use super::env::{FreshNames, NormEnv};

/// Normalize the term of a classification under the substitution `env`.
///
/// Redexes are reduced by substituting the normal form of the operand for the
/// parameter of the normalized body and normalizing the result again. Binders whose
/// identifier is already mapped are renamed using `fresh`.
pub fn normal(
    classification: &Classification<TypedTerm>,
    env: &NormEnv,
    fresh: &mut FreshNames,
) -> TcResult<TypedTerm> {
    let nf = classification.term.normalize(env, fresh)?;
    trace!("{} |- {} ▷ {}", env.print_trace(), classification.term.print_trace(), nf.print_trace());
    Ok(nf)
}

pub trait Normalize {
    type Nf;

    fn normalize(&self, env: &NormEnv, fresh: &mut FreshNames) -> TcResult<Self::Nf>;
}

impl<T: Normalize> Normalize for Box<T> {
    type Nf = T::Nf;

    fn normalize(&self, env: &NormEnv, fresh: &mut FreshNames) -> TcResult<Self::Nf> {
        (**self).normalize(env, fresh)
    }
}

impl Normalize for TypedTerm {
    type Nf = TypedTerm;

    fn normalize(&self, env: &NormEnv, fresh: &mut FreshNames) -> TcResult<Self::Nf> {
        match self {
            TypedTerm::Universe(_) | TypedTerm::Constant(_) => Ok(self.clone()),
            TypedTerm::Variable(name) => Ok(env.lookup(name).cloned().unwrap_or_else(|| self.clone())),
            TypedTerm::Type(TypeStruct::Quantified(quantifier)) => {
                Ok(TypedTerm::Type(TypeStruct::Quantified(quantifier.normalize(env, fresh)?)))
            }
            TypedTerm::Type(TypeStruct::Module(signature)) => {
                Ok(TypedTerm::Type(TypeStruct::Module(signature.normalize(env, fresh)?)))
            }
            TypedTerm::Constructor(Constructors::Arrow(TypedLambda { identifier, body })) => {
                let (identifier, env) = env.bind(identifier, fresh);
                let body = body.normalize(&env, fresh)?;
                Ok(TypedTerm::lambda(identifier, body))
            }
            TypedTerm::Constructor(Constructors::Module(TypedModule { members })) => {
                let members =
                    members.iter().map(|member| member.normalize(env, fresh)).collect::<TcResult<_>>()?;
                Ok(TypedTerm::record(members))
            }
            TypedTerm::Destructor(destructor) => destructor.normalize(env, fresh),
        }
    }
}

impl Normalize for TypedQuantifier {
    type Nf = TypedQuantifier;

    fn normalize(&self, env: &NormEnv, fresh: &mut FreshNames) -> TcResult<Self::Nf> {
        let TypedQuantifier { polarity, from, to } = self;
        let domain = from.typ.normalize(env, fresh)?;
        let (identifier, env) = env.bind(&from.term, fresh);
        let to = to.normalize(&env, fresh)?;
        Ok(TypedQuantifier {
            polarity: *polarity,
            from: Classification::new(from.universe, domain, identifier),
            to: Box::new(to),
        })
    }
}

impl Normalize for Signature {
    type Nf = Signature;

    /// Member names are labels and keep their name. A member shadows outer
    /// bindings of the same name in the types of later members.
    fn normalize(&self, env: &NormEnv, fresh: &mut FreshNames) -> TcResult<Self::Nf> {
        let mut env = env.clone();
        let mut members = Vec::with_capacity(self.members.len());
        for member in &self.members {
            let typ = member.typ.normalize(&env, fresh)?;
            members.push(Classification::new(member.universe, typ, member.term.clone()));
            env = env.push(member.term.clone(), TypedTerm::var(member.term.clone()));
        }
        Ok(Signature { members })
    }
}

impl Normalize for Destructor {
    type Nf = TypedTerm;

    fn normalize(&self, env: &NormEnv, fresh: &mut FreshNames) -> TcResult<Self::Nf> {
        let Destructor { operator, content } = self;
        let operator_nf = operator.term.normalize(env, fresh)?;
        match content {
            Destructors::Arrow(TypedApply { operand }) => {
                let operand = operand.normalize(env, fresh)?;
                if let TypedTerm::Constructor(Constructors::Arrow(lambda)) = &operator_nf {
                    // The body is in normal form, so its free identifiers are already
                    // resolved and must not see the bindings of `env` again.
                    let by = Substitution::single(lambda.identifier.clone(), operand);
                    let reduct = TypedTerm::subst(&lambda.body, &by);
                    return reduct.normalize(&NormEnv::empty(), fresh);
                }
                let operator = Classification::new(
                    operator.universe,
                    operator.typ.normalize(env, fresh)?,
                    operator_nf,
                );
                Ok(TypedTerm::apply(operator, operand))
            }
            Destructors::Module(TypedMemberAccess { member }) => {
                if let TypedTerm::Constructor(Constructors::Module(module)) = &operator_nf {
                    return module.members.get(*member).cloned().ok_or_else(|| {
                        TypeError::impossible(format!(
                            "Projection #{member} out of range for {}",
                            operator_nf.print_trace()
                        ))
                    });
                }
                let operator = Classification::new(
                    operator.universe,
                    operator.typ.normalize(env, fresh)?,
                    operator_nf,
                );
                Ok(TypedTerm::project(operator, *member))
            }
        }
    }
}
