//! Lowering of an annotated file to Go-flavored target source.
//!
//! This is deliberately a thin renderer: one function per node kind, string
//! concatenation, no formatting passes. Tuples become anonymous structs with
//! positional fields, lambdas become function literals, and blocks become
//! immediately-invoked closures.

use std::collections::HashMap;
use std::fmt;

use crate::ast::{DeclTable, Expr, ExprNode, File, Stmt, Type, TypeRef, TypeVar};

#[derive(Debug, Clone, PartialEq)]
pub enum CodegenError {
    GenericType(TypeVar),
    GenericDecl(String),
    UnknownType(String),
    MissingType,
}

impl fmt::Display for CodegenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CodegenError::GenericType(var) => {
                write!(f, "cannot generate code for generic type: {}", var)
            }
            CodegenError::GenericDecl(name) => {
                write!(f, "cannot generate code for generic type: '{}'", name)
            }
            CodegenError::UnknownType(name) => write!(f, "unknown type: '{}'", name),
            CodegenError::MissingType => {
                write!(f, "expression was not annotated before lowering")
            }
        }
    }
}

impl std::error::Error for CodegenError {}

/// Render a file to target source.
pub fn file(file: &File) -> Result<String, CodegenError> {
    let decls = file.decls();
    let mut out = format!("package {}\n", file.package);
    for stmt in &file.stmts {
        out.push('\n');
        out.push_str(&render_stmt(stmt, &decls)?);
        out.push('\n');
    }
    Ok(out)
}

fn render_stmt(stmt: &Stmt, decls: &DeclTable) -> Result<String, CodegenError> {
    match stmt {
        Stmt::Let(decl) => Ok(format!(
            "var {} = {}",
            decl.name,
            render_expr(&decl.binding, decls)?
        )),
        Stmt::Type(decl) => {
            if !decl.params.is_empty() {
                // a generic declaration only exists through its instantiations
                return Err(CodegenError::GenericDecl(decl.name.clone()));
            }
            Ok(format!(
                "type {} {}",
                decl.name,
                render_type(&decl.ty, decls)?
            ))
        }
        Stmt::Expr(expr) => Ok(format!("var _ = {}", render_expr(expr, decls)?)),
    }
}

fn required_type(expr: &Expr) -> Result<&Type, CodegenError> {
    expr.ty.as_ref().ok_or(CodegenError::MissingType)
}

fn render_expr(expr: &Expr, decls: &DeclTable) -> Result<String, CodegenError> {
    match &expr.node {
        ExprNode::Int(n) => Ok(n.to_string()),
        ExprNode::Str(s) => Ok(format!("{:?}", s)),
        ExprNode::Ident(name) => Ok(name.clone()),
        ExprNode::Tuple(elems) => {
            let ty = render_type(required_type(expr)?, decls)?;
            let fields = elems
                .iter()
                .enumerate()
                .map(|(i, elem)| Ok(format!("_{}: {}", i, render_expr(elem, decls)?)))
                .collect::<Result<Vec<_>, CodegenError>>()?;
            Ok(format!("{}{{{}}}", ty, fields.join(", ")))
        }
        ExprNode::Func(func) => match required_type(expr)? {
            Type::Func(arg_ty, ret_ty) => Ok(format!(
                "func({} {}) {} {{ return {} }}",
                func.arg,
                render_type(arg_ty, decls)?,
                render_type(ret_ty, decls)?,
                render_expr(&func.body, decls)?
            )),
            other => unreachable!("lambda annotated with {:?}", other),
        },
        ExprNode::Call(call) => Ok(format!(
            "{}({})",
            render_expr(&call.func, decls)?,
            render_expr(&call.arg, decls)?
        )),
        ExprNode::Block(block) => {
            let ret = render_type(required_type(expr)?, decls)?;
            let mut body = String::new();
            for stmt in &block.stmts {
                body.push('\t');
                body.push_str(&render_stmt(stmt, decls)?);
                body.push('\n');
            }
            match &block.expr {
                Some(e) => {
                    body.push_str(&format!("\treturn {}\n", render_expr(e, decls)?));
                }
                None => {
                    body.push_str(&format!("\treturn {}{{}}\n", ret));
                }
            }
            Ok(format!("func() {} {{\n{}}}()", ret, body))
        }
    }
}

fn render_type(ty: &Type, decls: &DeclTable) -> Result<String, CodegenError> {
    match ty {
        Type::Primitive(name) => match name.as_str() {
            "int" | "string" | "bool" => Ok(name.clone()),
            other => Err(CodegenError::UnknownType(other.to_string())),
        },
        Type::Tuple(elems) => {
            let fields = elems
                .iter()
                .enumerate()
                .map(|(i, t)| Ok(format!("_{} {}", i, render_type(t, decls)?)))
                .collect::<Result<Vec<_>, CodegenError>>()?;
            Ok(format!("struct{{{}}}", fields.join("; ")))
        }
        Type::Func(arg, ret) => Ok(format!(
            "func({}) {}",
            render_type(arg, decls)?,
            render_type(ret, decls)?
        )),
        Type::Var(var) => Err(CodegenError::GenericType(var.clone())),
        Type::Ref(r) => render_ref(r, decls),
    }
}

/// Resolve a named reference through the declaration table and render its
/// definition, instantiating declaration parameters from the reference's
/// curried argument chain. Unresolved builtin names render as themselves.
fn render_ref(r: &TypeRef, decls: &DeclTable) -> Result<String, CodegenError> {
    match decls.resolve(&r.name) {
        Some(decl) => {
            let mut map = HashMap::new();
            let mut cursor = r.arg.as_deref();
            for param in &decl.params {
                match cursor {
                    None => return Err(CodegenError::GenericDecl(decl.name.clone())),
                    Some(Type::Ref(inner)) => {
                        map.insert(param.clone(), Type::reference(inner.name.clone(), None));
                        cursor = inner.arg.as_deref();
                    }
                    Some(other) => {
                        map.insert(param.clone(), other.clone());
                        cursor = None;
                    }
                }
            }
            render_type(&decl.ty.replace(&map), decls)
        }
        None => match (r.name.as_str(), &r.arg) {
            ("int" | "string" | "bool", None) => Ok(r.name.clone()),
            _ => Err(CodegenError::UnknownType(r.name.clone())),
        },
    }
}
