use crate::ast::{Expr, ExprNode, Type};

use super::{expr_type, InferError};

/// An equality asserted between two types, to be solved by unification.
#[derive(Debug, Clone, PartialEq)]
pub struct Constraint {
    pub left: Type,
    pub right: Type,
}

impl Constraint {
    pub fn new(left: Type, right: Type) -> Self {
        Constraint { left, right }
    }
}

/// Post-order walk over an annotated expression, producing the equalities
/// its types must satisfy.
///
/// Literals and lone identifiers impose nothing. Block statements impose
/// nothing either: each was already solved by its own nested inference
/// during annotation, so only the trailing expression contributes.
pub fn collect(expr: &Expr) -> Result<Vec<Constraint>, InferError> {
    match &expr.node {
        ExprNode::Int(_) | ExprNode::Str(_) | ExprNode::Ident(_) => Ok(Vec::new()),
        ExprNode::Tuple(elems) => {
            let mut constraints = Vec::new();
            for elem in elems {
                constraints.extend(collect(elem)?);
            }
            Ok(constraints)
        }
        ExprNode::Block(block) => match &block.expr {
            Some(e) => collect(e),
            None => Ok(Vec::new()),
        },
        ExprNode::Func(func) => match expr_type(expr) {
            Type::Func(_, ret) => {
                let mut constraints = collect(&func.body)?;
                constraints.push(Constraint::new(
                    expr_type(&func.body).clone(),
                    (**ret).clone(),
                ));
                Ok(constraints)
            }
            _ => Err(InferError::NotAFunction(expr.clone())),
        },
        ExprNode::Call(call) => {
            let mut constraints = collect(&call.func)?;
            constraints.extend(collect(&call.arg)?);
            match expr_type(expr) {
                // annotation always gives a call a fresh variable; the
                // function-typed pair is kept for uniform shape
                t @ Type::Func(arg, ret) => {
                    constraints.push(Constraint::new(t.clone(), (**ret).clone()));
                    constraints.push(Constraint::new((**arg).clone(), (**arg).clone()));
                    Ok(constraints)
                }
                t @ Type::Var(_) => {
                    constraints.push(Constraint::new(
                        expr_type(&call.func).clone(),
                        Type::func(expr_type(&call.arg).clone(), t.clone()),
                    ));
                    Ok(constraints)
                }
                other => unreachable!("call annotated with {:?}", other),
            }
        }
    }
}
