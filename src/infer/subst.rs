//! # Substitution Application
//!
//! A substitution records one type-variable assignment discovered during
//! unification. Solving an expression yields a list of them, and this module
//! applies such lists to types and to whole annotated expressions.
//!
//! ## Application Order
//!
//! Substitution lists compose right to left: the rightmost entry is the
//! oldest, and newer entries may refer to variables the older ones
//! introduce. `apply` therefore folds from the end of the list:
//!
//! ```text
//! subs = [b := int, a := b -> b]       // newest first
//!
//! apply(subs, a):
//!   a := b -> b     gives  b -> b
//!   b := int        gives  int -> int
//! ```
//!
//! The unifier produces lists in exactly this shape: it solves the tail of
//! the constraint list first and concatenates newer substitutions in front,
//! so applying right to left replays the solution in the order it was found.
//!
//! ## Expressions
//!
//! `apply_expr` maps `apply` over every node of an annotated tree without
//! changing its shape. Block statements are left alone: each was fully
//! solved by its own nested inference before the enclosing solve began, so
//! no variable in the outer substitution list can appear in them.

use crate::ast::{Block, Call, Expr, ExprNode, FuncLit, Type, TypeVar};

/// One type-variable assignment, `var := ty`.
#[derive(Debug, Clone, PartialEq)]
pub struct Substitution {
    pub var: TypeVar,
    pub ty: Type,
}

/// Apply a substitution list to a type, composing right to left.
pub fn apply(subs: &[Substitution], ty: &Type) -> Type {
    subs.iter()
        .rev()
        .fold(ty.clone(), |ty, sub| ty.substitute(&sub.var, &sub.ty))
}

/// Apply a substitution list to every type in an annotated expression,
/// preserving node shape.
pub fn apply_expr(subs: &[Substitution], expr: Expr) -> Expr {
    let Expr { ty, node } = expr;
    let ty = ty.map(|t| apply(subs, &t));
    let node = match node {
        ExprNode::Int(_) | ExprNode::Str(_) | ExprNode::Ident(_) => node,
        ExprNode::Tuple(elems) => ExprNode::Tuple(
            elems
                .into_iter()
                .map(|elem| apply_expr(subs, elem))
                .collect(),
        ),
        ExprNode::Block(block) => ExprNode::Block(Block {
            stmts: block.stmts,
            expr: block.expr.map(|e| Box::new(apply_expr(subs, *e))),
        }),
        ExprNode::Func(func) => ExprNode::Func(FuncLit {
            arg: func.arg,
            body: Box::new(apply_expr(subs, *func.body)),
        }),
        ExprNode::Call(call) => ExprNode::Call(Call {
            func: Box::new(apply_expr(subs, *call.func)),
            arg: Box::new(apply_expr(subs, *call.arg)),
        }),
    };
    Expr { ty, node }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sub(name: &str, ty: Type) -> Substitution {
        Substitution {
            var: TypeVar::new(name),
            ty,
        }
    }

    #[test]
    fn test_apply_empty_list() {
        assert_eq!(apply(&[], &Type::var("a")), Type::var("a"));
    }

    #[test]
    fn test_apply_single() {
        let subs = vec![sub("a", Type::int())];
        assert_eq!(apply(&subs, &Type::var("a")), Type::int());
        assert_eq!(apply(&subs, &Type::var("b")), Type::var("b"));
    }

    #[test]
    fn test_apply_composes_right_to_left() {
        // newest first: a := b, then the older b := int finishes the job
        let subs = vec![sub("a", Type::var("b")), sub("b", Type::int())];
        assert_eq!(apply(&subs, &Type::var("a")), Type::var("b"));

        let subs = vec![sub("b", Type::int()), sub("a", Type::var("b"))];
        assert_eq!(apply(&subs, &Type::var("a")), Type::int());
    }

    #[test]
    fn test_apply_inside_function_type() {
        let subs = vec![sub("a", Type::int())];
        let ty = Type::func(Type::var("a"), Type::var("a"));
        assert_eq!(apply(&subs, &ty), Type::func(Type::int(), Type::int()));
    }

    #[test]
    fn test_apply_expr_rewrites_every_node() {
        // (x -> x) : a -> b with body at a, under {a := b}
        let expr = Expr::typed(
            Type::func(Type::var("a"), Type::var("b")),
            ExprNode::Func(FuncLit {
                arg: "x".to_string(),
                body: Box::new(Expr::typed(
                    Type::var("a"),
                    ExprNode::Ident("x".to_string()),
                )),
            }),
        );
        let subs = vec![sub("a", Type::var("b"))];
        let wanted = Expr::typed(
            Type::func(Type::var("b"), Type::var("b")),
            ExprNode::Func(FuncLit {
                arg: "x".to_string(),
                body: Box::new(Expr::typed(
                    Type::var("b"),
                    ExprNode::Ident("x".to_string()),
                )),
            }),
        );
        assert_eq!(apply_expr(&subs, expr), wanted);
    }

    #[test]
    fn test_apply_expr_preserves_shape() {
        let expr = Expr::typed(
            Type::Tuple(vec![Type::var("a"), Type::int()]),
            ExprNode::Tuple(vec![
                Expr::typed(Type::var("a"), ExprNode::Ident("x".to_string())),
                Expr::typed(Type::int(), ExprNode::Int(2)),
            ]),
        );
        let out = apply_expr(&[sub("a", Type::string())], expr);
        assert_eq!(out.ty, Some(Type::Tuple(vec![Type::string(), Type::int()])));
        match out.node {
            ExprNode::Tuple(elems) => {
                assert_eq!(elems.len(), 2);
                assert_eq!(elems[0].ty, Some(Type::string()));
            }
            node => panic!("expected a tuple, got {:?}", node),
        }
    }
}
