//! Interactive read-infer-print loop.
//!
//! Each line is parsed as either a let declaration or an expression. An
//! expression prints its inferred type; a declaration extends the session
//! environment so later lines can use it. Failures print and the loop
//! continues.

use std::io::{self, BufRead, Write};

use log::debug;

use crate::ast::{Stmt, Type};
use crate::infer::{expr_type, infer, Environment};
use crate::parser::{any, expr, let_decl, Parser};

/// Bindings every session starts with.
pub fn prelude() -> Environment {
    let int_op = Type::func(Type::int(), Type::func(Type::int(), Type::int()));
    let int_cmp = Type::func(Type::int(), Type::func(Type::int(), Type::bool()));
    Environment::with_bindings([
        ("add", int_op),
        ("eq", int_cmp.clone()),
        ("ne", int_cmp.clone()),
        ("lt", int_cmp.clone()),
        ("gt", int_cmp.clone()),
        ("le", int_cmp.clone()),
        ("ge", int_cmp),
    ])
}

/// Entry := LetDecl | Expr
fn entry() -> Parser<Stmt> {
    any(vec![
        (let_decl() >> Stmt::Let).rename("LetDecl"),
        (expr() >> Stmt::Expr).rename("Expr"),
    ])
}

/// Evaluate one line against the session environment. Returns the text to
/// print: the inferred type for an expression, an error rendering on
/// failure, nothing for a successful declaration.
pub fn eval_line(env: &mut Environment, line: &str) -> Option<String> {
    let parsed = match entry().parse_str(line) {
        Ok(parsed) => parsed,
        Err(e) => return Some(e.to_string()),
    };

    match parsed.value {
        Stmt::Expr(e) => match infer(env, &e) {
            Ok(annotated) => Some(expr_type(&annotated).to_string()),
            Err(e) => Some(e.to_string()),
        },
        Stmt::Let(decl) => match infer(env, &decl.binding) {
            Ok(binding) => {
                let ty = expr_type(&binding).clone();
                debug!("bound {} : {}", decl.name, ty);
                env.define(decl.name, ty);
                None
            }
            Err(e) => Some(e.to_string()),
        },
        Stmt::Type(_) => unreachable!("the entry parser only produces lets and expressions"),
    }
}

pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut env = prelude();

    loop {
        write!(stdout, " > ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        if let Some(output) = eval_line(&mut env, &line) {
            println!("{}", output);
        }
    }
    Ok(())
}
