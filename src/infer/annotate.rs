use crate::ast::{Block, Call, Expr, ExprNode, FuncLit, LetDecl, Stmt, Type, TypeVar};

use super::{expr_type, infer_with, Environment, InferError};

/// Fresh type-variable generator, yielding `a, b, ..., z, aa, ab, ...`.
///
/// One generator is created per top-level inference and threaded by mutable
/// reference through the whole walk, nested inferences included. Variables
/// are therefore deterministic per invocation and never collide within one.
#[derive(Debug, Default)]
pub struct VarGen {
    next: usize,
}

impl VarGen {
    pub fn new() -> Self {
        VarGen::default()
    }

    pub fn fresh(&mut self) -> TypeVar {
        let mut n = self.next;
        self.next += 1;
        let mut name = String::new();
        loop {
            name.insert(0, (b'a' + (n % 26) as u8) as char);
            n /= 26;
            if n == 0 {
                break;
            }
            n -= 1;
        }
        TypeVar(name)
    }
}

/// Pre-order walk assigning a type to every subexpression.
///
/// Literals get their primitive types, identifiers the type they are bound
/// to, and anything whose type cannot be known yet gets a fresh variable for
/// unification to solve. Block statements are special: each one is solved by
/// a nested inference (sharing `gen`) and rewritten in place, and each `let`
/// extends the environment its successors see.
pub(crate) fn annotate(
    gen: &mut VarGen,
    env: &Environment,
    expr: &Expr,
) -> Result<Expr, InferError> {
    match &expr.node {
        ExprNode::Int(n) => Ok(Expr::typed(Type::int(), ExprNode::Int(*n))),
        ExprNode::Str(s) => Ok(Expr::typed(Type::string(), ExprNode::Str(s.clone()))),
        ExprNode::Ident(name) => match env.lookup(name) {
            Some(ty) => Ok(Expr::typed(ty.clone(), ExprNode::Ident(name.clone()))),
            None => Err(InferError::UnknownIdentifier(name.clone())),
        },
        ExprNode::Tuple(elems) => {
            let mut out = Vec::with_capacity(elems.len());
            let mut types = Vec::with_capacity(elems.len());
            for elem in elems {
                let annotated = annotate(gen, env, elem)?;
                types.push(expr_type(&annotated).clone());
                out.push(annotated);
            }
            Ok(Expr::typed(Type::Tuple(types), ExprNode::Tuple(out)))
        }
        ExprNode::Block(block) => {
            let mut env = env.clone();
            let mut stmts = Vec::with_capacity(block.stmts.len());
            for stmt in &block.stmts {
                match stmt {
                    Stmt::Let(decl) => {
                        let binding = infer_with(gen, &env, &decl.binding)?;
                        env = env.extend(decl.name.clone(), expr_type(&binding).clone());
                        stmts.push(Stmt::Let(LetDecl {
                            name: decl.name.clone(),
                            binding,
                        }));
                    }
                    Stmt::Expr(e) => stmts.push(Stmt::Expr(infer_with(gen, &env, e)?)),
                    Stmt::Type(decl) => stmts.push(Stmt::Type(decl.clone())),
                }
            }
            let tail = match &block.expr {
                Some(e) => Some(Box::new(annotate(gen, &env, e)?)),
                None => None,
            };
            // the block's value is its trailing expression, unit otherwise
            let ty = tail
                .as_ref()
                .map(|e| expr_type(e).clone())
                .unwrap_or_else(Type::unit);
            Ok(Expr::typed(ty, ExprNode::Block(Block { stmts, expr: tail })))
        }
        ExprNode::Func(func) => {
            let param = Type::Var(gen.fresh());
            let inner = env.extend(func.arg.clone(), param.clone());
            let body = annotate(gen, &inner, &func.body)?;
            let ret = Type::Var(gen.fresh());
            Ok(Expr::typed(
                Type::func(param, ret),
                ExprNode::Func(FuncLit {
                    arg: func.arg.clone(),
                    body: Box::new(body),
                }),
            ))
        }
        ExprNode::Call(call) => {
            let func = annotate(gen, env, &call.func)?;
            let arg = annotate(gen, env, &call.arg)?;
            Ok(Expr::typed(
                Type::Var(gen.fresh()),
                ExprNode::Call(Call {
                    func: Box::new(func),
                    arg: Box::new(arg),
                }),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_names_run_alphabetically() {
        let mut gen = VarGen::new();
        let names: Vec<String> = (0..4).map(|_| gen.fresh().0).collect();
        assert_eq!(names, ["a", "b", "c", "d"]);
    }

    #[test]
    fn test_fresh_names_continue_past_z() {
        let mut gen = VarGen::new();
        let names: Vec<String> = (0..28).map(|_| gen.fresh().0).collect();
        assert_eq!(names[25], "z");
        assert_eq!(names[26], "aa");
        assert_eq!(names[27], "ab");
    }

    #[test]
    fn test_annotate_lambda_variable_order() {
        // the parameter is assigned before the body is walked, the result
        // variable after
        let mut gen = VarGen::new();
        let expr = Expr::untyped(ExprNode::Func(FuncLit {
            arg: "x".to_string(),
            body: Box::new(Expr::untyped(ExprNode::Ident("x".to_string()))),
        }));
        let annotated = annotate(&mut gen, &Environment::empty(), &expr).unwrap();
        assert_eq!(
            annotated.ty,
            Some(Type::func(Type::var("a"), Type::var("b")))
        );
        match annotated.node {
            ExprNode::Func(func) => assert_eq!(func.body.ty, Some(Type::var("a"))),
            node => panic!("expected a lambda, got {:?}", node),
        }
    }

    #[test]
    fn test_annotate_call_gets_fresh_variable() {
        let mut gen = VarGen::new();
        let env = Environment::with_bindings([("f", Type::func(Type::int(), Type::int()))]);
        let expr = Expr::untyped(ExprNode::Call(Call {
            func: Box::new(Expr::untyped(ExprNode::Ident("f".to_string()))),
            arg: Box::new(Expr::untyped(ExprNode::Int(1))),
        }));
        let annotated = annotate(&mut gen, &env, &expr).unwrap();
        assert_eq!(annotated.ty, Some(Type::var("a")));
    }

    #[test]
    fn test_annotate_unknown_identifier() {
        let mut gen = VarGen::new();
        let expr = Expr::untyped(ExprNode::Ident("nope".to_string()));
        let result = annotate(&mut gen, &Environment::empty(), &expr);
        assert_eq!(
            result,
            Err(InferError::UnknownIdentifier("nope".to_string()))
        );
    }
}
