use super::stmt::Stmt;
use super::ty::Type;

/// An expression: a node paired with its type. The grammar produces every
/// node with `ty = None`; the inferencer produces trees where every node has
/// `ty = Some`.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub ty: Option<Type>,
    pub node: ExprNode,
}

impl Expr {
    /// An expression fresh from the parser, before inference.
    pub fn untyped(node: ExprNode) -> Self {
        Expr { ty: None, node }
    }

    /// An expression annotated with its type.
    pub fn typed(ty: Type, node: ExprNode) -> Self {
        Expr { ty: Some(ty), node }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    Int(i64),
    Str(String),
    Ident(String),
    Tuple(Vec<Expr>),
    Func(FuncLit),
    Call(Call),
    Block(Block),
}

/// A single-parameter lambda. Multi-parameter functions are written as
/// nested lambdas.
#[derive(Debug, Clone, PartialEq)]
pub struct FuncLit {
    pub arg: String,
    pub body: Box<Expr>,
}

/// A single-argument application. `f a b` is `Call(Call(f, a), b)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub func: Box<Expr>,
    pub arg: Box<Expr>,
}

/// A brace-delimited sequence of statements with an optional trailing
/// expression. When the trailing expression is present it is the block's
/// value; otherwise the block has the unit type.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub stmts: Vec<Stmt>,
    pub expr: Option<Box<Expr>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_structural() {
        let a = Expr::untyped(ExprNode::Call(Call {
            func: Box::new(Expr::untyped(ExprNode::Ident("f".to_string()))),
            arg: Box::new(Expr::untyped(ExprNode::Int(1))),
        }));
        assert_eq!(a, a.clone());
    }

    #[test]
    fn test_equality_distinguishes_typed_from_untyped() {
        let untyped = Expr::untyped(ExprNode::Int(1));
        let typed = Expr::typed(Type::int(), ExprNode::Int(1));
        assert_ne!(untyped, typed);
        assert_eq!(typed, Expr::typed(Type::int(), ExprNode::Int(1)));
    }

    #[test]
    fn test_equality_distinguishes_block_tail_presence() {
        let with_tail = Expr::untyped(ExprNode::Block(Block {
            stmts: vec![],
            expr: Some(Box::new(Expr::untyped(ExprNode::Int(1)))),
        }));
        let without_tail = Expr::untyped(ExprNode::Block(Block {
            stmts: vec![],
            expr: None,
        }));
        assert_ne!(with_tail, without_tail);
    }

    #[test]
    fn test_unit_literal_is_the_empty_tuple() {
        let unit = Expr::untyped(ExprNode::Tuple(vec![]));
        let one = Expr::untyped(ExprNode::Tuple(vec![Expr::untyped(ExprNode::Int(1))]));
        assert_ne!(unit, one);
    }
}
