use crate::ast::{Type, TypeVar};

use super::collect::Constraint;
use super::subst::{apply, Substitution};
use super::InferError;

fn occurs_in(var: &TypeVar, ty: &Type) -> bool {
    match ty {
        Type::Primitive(_) => false,
        Type::Var(v) => v == var,
        Type::Tuple(elems) => elems.iter().any(|t| occurs_in(var, t)),
        Type::Func(arg, ret) => occurs_in(var, arg) || occurs_in(var, ret),
        Type::Ref(r) => r.arg.as_ref().map_or(false, |t| occurs_in(var, t)),
    }
}

/// Reduce a constraint list to a substitution list, or fail.
///
/// Constraints are solved right to left: the tail is solved first, its
/// substitutions are applied to the head constraint, the head is solved, and
/// the head's substitutions are concatenated in front.
pub fn unify(constraints: &[Constraint]) -> Result<Vec<Substitution>, InferError> {
    let Some((head, tail)) = constraints.split_first() else {
        return Ok(Vec::new());
    };
    let tail_subs = unify(tail)?;
    let mut subs = unify_one(
        &apply(&tail_subs, &head.left),
        &apply(&tail_subs, &head.right),
    )?;
    subs.extend(tail_subs);
    Ok(subs)
}

/// Solve a single equality between two types.
pub fn unify_one(t1: &Type, t2: &Type) -> Result<Vec<Substitution>, InferError> {
    match (t1, t2) {
        (Type::Primitive(p1), Type::Primitive(p2)) if p1 == p2 => Ok(Vec::new()),
        (Type::Var(v1), Type::Var(v2)) if v1 == v2 => Ok(Vec::new()),
        (Type::Var(var), other) | (other, Type::Var(var)) => {
            if occurs_in(var, other) {
                Err(InferError::OccursCheck {
                    var: var.clone(),
                    ty: other.clone(),
                })
            } else {
                Ok(vec![Substitution {
                    var: var.clone(),
                    ty: other.clone(),
                }])
            }
        }
        (Type::Func(arg1, ret1), Type::Func(arg2, ret2)) => unify(&[
            Constraint::new((**arg1).clone(), (**arg2).clone()),
            Constraint::new((**ret1).clone(), (**ret2).clone()),
        ]),
        (Type::Tuple(elems1), Type::Tuple(elems2)) if elems1.len() == elems2.len() => {
            let constraints: Vec<Constraint> = elems1
                .iter()
                .zip(elems2)
                .map(|(a, b)| Constraint::new(a.clone(), b.clone()))
                .collect();
            unify(&constraints)
        }
        _ => Err(InferError::Mismatch {
            left: t1.clone(),
            right: t2.clone(),
        }),
    }
}
