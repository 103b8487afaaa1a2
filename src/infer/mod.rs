mod annotate;
mod collect;
mod env;
mod subst;
mod unify;

pub use annotate::VarGen;
pub use collect::{collect, Constraint};
pub use env::Environment;
pub use subst::{apply, apply_expr, Substitution};
pub use unify::{unify, unify_one};

use std::fmt;

use crate::ast::{Expr, Type, TypeVar};

#[derive(Debug, Clone, PartialEq)]
pub enum InferError {
    UnknownIdentifier(String),
    Mismatch { left: Type, right: Type },
    OccursCheck { var: TypeVar, ty: Type },
    NotAFunction(Expr),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            InferError::UnknownIdentifier(name) => write!(f, "unknown identifier: '{}'", name),
            InferError::Mismatch { left, right } => {
                write!(f, "mismatched types: {} != {}", left, right)
            }
            InferError::OccursCheck { var, ty } => {
                write!(f, "cannot construct infinite type: {} = {}", var, ty)
            }
            InferError::NotAFunction(expr) => write!(f, "not a function: {:?}", expr),
        }
    }
}

impl std::error::Error for InferError {}

/// Infer the principal type of `expr` under `env`.
///
/// Runs the three phases in order - annotation with fresh type variables,
/// constraint collection, unification - then applies the resulting
/// substitution over the annotated tree. Every subexpression of a successful
/// result carries a type.
///
/// A fresh variable generator is created per call, so results are
/// deterministic and concurrent calls are independent.
pub fn infer(env: &Environment, expr: &Expr) -> Result<Expr, InferError> {
    let mut gen = VarGen::new();
    infer_with(&mut gen, env, expr)
}

/// Inference under an existing generator. Block elaboration re-enters here
/// for each statement so nested inferences share the outer call's generator
/// and their variables stay distinct from its own.
pub(crate) fn infer_with(
    gen: &mut VarGen,
    env: &Environment,
    expr: &Expr,
) -> Result<Expr, InferError> {
    let annotated = annotate::annotate(gen, env, expr)?;
    let constraints = collect(&annotated)?;
    let subs = unify(&constraints)?;
    Ok(apply_expr(&subs, annotated))
}

/// The type of an annotated expression.
pub(crate) fn expr_type(expr: &Expr) -> &Type {
    match &expr.ty {
        Some(ty) => ty,
        None => unreachable!("expression reached the solver without annotation"),
    }
}
