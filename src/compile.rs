//! The file-compilation pipeline: parse, infer each top-level let
//! declaration, emit target source.

use std::fmt;

use log::{debug, info};

use crate::ast::{Stmt, Type};
use crate::codegen::{self, CodegenError};
use crate::infer::{expr_type, infer, Environment, InferError};
use crate::parser::{self, ParseError};

#[derive(Debug, Clone, PartialEq)]
pub enum CompileError {
    Parse(ParseError),
    Infer(InferError),
    Codegen(CodegenError),
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CompileError::Parse(e) => write!(f, "{}", e),
            CompileError::Infer(e) => write!(f, "{}", e),
            CompileError::Codegen(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for CompileError {}

impl From<ParseError> for CompileError {
    fn from(e: ParseError) -> Self {
        CompileError::Parse(e)
    }
}

impl From<InferError> for CompileError {
    fn from(e: InferError) -> Self {
        CompileError::Infer(e)
    }
}

impl From<CodegenError> for CompileError {
    fn from(e: CodegenError) -> Self {
        CompileError::Codegen(e)
    }
}

/// The identifiers a compiled file may assume.
fn prelude() -> Environment {
    Environment::with_bindings([
        (
            "add",
            Type::func(Type::int(), Type::func(Type::int(), Type::int())),
        ),
        ("PrintInt", Type::func(Type::int(), Type::unit())),
    ])
}

/// Compile a source file to target source.
///
/// Each top-level let declaration is inferred under the environment built up
/// by its predecessors and rewritten with its annotated binding; type
/// declarations and bare expressions pass through untouched. The first
/// failure aborts.
pub fn compile(source: &str) -> Result<String, CompileError> {
    info!("parsing");
    let mut file = parser::file().parse_str(source)?.value;
    debug!(
        "parsed package '{}' with {} statements",
        file.package,
        file.stmts.len()
    );

    info!("inferring types");
    let mut env = prelude();
    for stmt in &mut file.stmts {
        if let Stmt::Let(decl) = stmt {
            let binding = infer(&env, &decl.binding)?;
            let ty = expr_type(&binding).clone();
            debug!("let {} : {}", decl.name, ty);
            env = env.extend(decl.name.clone(), ty);
            decl.binding = binding;
        }
    }

    info!("generating target source");
    Ok(codegen::file(&file)?)
}
