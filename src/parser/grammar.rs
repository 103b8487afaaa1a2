//! Grammar for the language: types, expressions, statements, and files.
//!
//! Each rule is a function returning a fresh parser; recursive references
//! (an expression contains blocks, blocks contain statements, statements
//! contain expressions) go through `lazy` so construction terminates. Rules
//! rename themselves so error chains read as grammar rule names.

use crate::ast::{Block, Call, Expr, ExprNode, File, FuncLit, LetDecl, Stmt, Type, TypeDecl,
    TypeVar};

use super::combinators::{any, can_ws, eof, eos, ident, int, lazy, lit, one_or_more, opt, repeat,
    str_lit, string, ws};
use super::Parser;

/// List := p (delim p)*
fn list<T: 'static>(p: Parser<T>, delim: Parser<()>) -> Parser<Vec<T>> {
    (p.clone() + repeat(delim * p))
        .map(|(head, tail)| {
            let mut items = vec![head];
            items.extend(tail);
            items
        })
        .rename("List")
}

// === Types ===

/// Type := FuncSpec | TypeRef | TupleSpec
pub fn ty() -> Parser<Type> {
    any(vec![func_spec(), type_ref(), tuple_spec()]).rename("Type")
}

/// FuncSpec := Ident WS "->" WS Type
pub fn func_spec() -> Parser<Type> {
    ((((ident() - ws()) - str_lit("->")) - ws()) + lazy(ty))
        .map(|(arg, ret)| Type::func(Type::reference(arg, None), ret))
        .rename("FuncSpec")
}

/// TypeRef := Ident (WS Type)?
pub fn type_ref() -> Parser<Type> {
    (ident() + opt(ws() * lazy(ty)))
        .map(|(name, arg)| Type::reference(name, arg))
        .rename("TypeRef")
}

/// TupleSpec := '(' Type (CanWS ',' CanWS Type)* ')'
pub fn tuple_spec() -> Parser<Type> {
    let delim = ((can_ws() + lit(',')) + can_ws()).map(|_| ());
    ((lit('(') * list(lazy(ty), delim)) - lit(')'))
        .map(Type::Tuple)
        .rename("TupleSpec")
}

// === Expressions ===

/// Expr := Block | Call | FuncLit | Atom
pub fn expr() -> Parser<Expr> {
    any(vec![block(), call(), func_lit(), atom()]).rename("Expr")
}

/// Atom := TupleLit | Ident | IntLit | StringLit
pub fn atom() -> Parser<Expr> {
    any(vec![tuple_lit(), ident_expr(), int_lit(), string_lit()]).rename("Atom")
}

/// IntLit := Int
fn int_lit() -> Parser<Expr> {
    (int() >> |n| Expr::untyped(ExprNode::Int(n))).rename("IntLit")
}

/// StringLit := String
fn string_lit() -> Parser<Expr> {
    (string() >> |s| Expr::untyped(ExprNode::Str(s))).rename("StringLit")
}

/// Ident in expression position
fn ident_expr() -> Parser<Expr> {
    (ident() >> |name| Expr::untyped(ExprNode::Ident(name))).rename("Ident")
}

/// TupleLit := '(' CanWS ')' | '(' (CanWS Expr CanWS ',')* CanWS Expr CanWS ')'
///
/// A parenthesized expression is a one-element tuple, never grouping.
pub fn tuple_lit() -> Parser<Expr> {
    let unit = ((lit('(') + can_ws()) + lit(')'))
        .map(|_| Expr::untyped(ExprNode::Tuple(Vec::new())));
    let element = (can_ws() * lazy(expr)) - can_ws();
    let multi = (((lit('(') * repeat(element.clone() - lit(','))) + element) - lit(')'))
        .map(|(mut elems, last)| {
            elems.push(last);
            Expr::untyped(ExprNode::Tuple(elems))
        });
    any(vec![unit, multi]).rename("TupleLit")
}

/// Block := '{' CanWS (Stmt CanWS)* (Expr CanWS)? '}'
pub fn block() -> Parser<Expr> {
    ((((lit('{') * can_ws()) * repeat(stmt() - can_ws())) + opt(lazy(expr) - can_ws()))
        - lit('}'))
    .map(|(stmts, tail)| {
        Expr::untyped(ExprNode::Block(Block {
            stmts,
            expr: tail.map(Box::new),
        }))
    })
    .rename("Block")
}

/// Call := Atom (WS Atom)+
///
/// Folded left, so `f a b c` is `Call(Call(Call(f, a), b), c)`.
pub fn call() -> Parser<Expr> {
    (atom() + one_or_more(ws() * atom()))
        .map(|(func, args)| {
            args.into_iter().fold(func, |func, arg| {
                Expr::untyped(ExprNode::Call(Call {
                    func: Box::new(func),
                    arg: Box::new(arg),
                }))
            })
        })
        .rename("Call")
}

/// FuncLit := Ident WS "->" WS Expr
pub fn func_lit() -> Parser<Expr> {
    ((((ident() - ws()) - str_lit("->")) - ws()) + lazy(expr))
        .map(|(arg, body)| {
            Expr::untyped(ExprNode::Func(FuncLit {
                arg,
                body: Box::new(body),
            }))
        })
        .rename("FuncLit")
}

// === Statements ===

/// LetDecl := "let" WS Ident CanWS '=' CanWS Expr
pub fn let_decl() -> Parser<LetDecl> {
    (((((str_lit("let") * ws()) * ident()) - can_ws()) - lit('=') - can_ws()) + lazy(expr))
        .map(|(name, binding)| LetDecl { name, binding })
        .rename("LetDecl")
}

/// TypeDecl := "type" WS Ident (WS Ident)* CanWS '=' CanWS Type
pub fn type_decl() -> Parser<TypeDecl> {
    let header = (str_lit("type") * ws()) * (ident() + repeat(ws() * ident()));
    (((header - can_ws()) - lit('=') - can_ws()) + lazy(ty))
        .map(|((name, params), ty)| TypeDecl {
            name,
            params: params.into_iter().map(TypeVar).collect(),
            ty,
        })
        .rename("TypeDecl")
}

/// Decl := LetDecl | TypeDecl
pub fn decl() -> Parser<Stmt> {
    any(vec![let_decl() >> Stmt::Let, type_decl() >> Stmt::Type]).rename("Decl")
}

/// Stmt := (Decl | Expr) EOS
pub fn stmt() -> Parser<Stmt> {
    (any(vec![decl(), (lazy(expr) >> Stmt::Expr).rename("Expr")]) - eos()).rename("Stmt")
}

/// File := "package" WS Ident (CanWS Stmt)* CanWS EOF
pub fn file() -> Parser<File> {
    ((((str_lit("package") * ws()) * ident()) + repeat(can_ws() * stmt())) - can_ws() - eof())
        .map(|(package, stmts)| File { package, stmts })
        .rename("File")
}
