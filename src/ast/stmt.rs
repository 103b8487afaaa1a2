use super::expr::Expr;
use super::ty::{Type, TypeVar};

/// A statement, as it appears inside a block or at the top level of a file.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Let(LetDecl),
    Type(TypeDecl),
    Expr(Expr),
}

/// `let name = binding`
#[derive(Debug, Clone, PartialEq)]
pub struct LetDecl {
    pub name: String,
    pub binding: Expr,
}

/// `type name params... = ty`. The parameters are the type variables the
/// declared type abstracts over.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDecl {
    pub name: String,
    pub params: Vec<TypeVar>,
    pub ty: Type,
}
