use std::collections::HashMap;

use super::stmt::{Stmt, TypeDecl};

/// A source file: a package name and its top-level statements.
#[derive(Debug, Clone, PartialEq)]
pub struct File {
    pub package: String,
    pub stmts: Vec<Stmt>,
}

impl File {
    /// Index this file's type declarations by name.
    pub fn decls(&self) -> DeclTable<'_> {
        DeclTable::new(self)
    }
}

/// Name-indexed view of a file's type declarations. Type references resolve
/// through this table on demand; nothing holds a pointer back into the
/// declaration list.
#[derive(Debug)]
pub struct DeclTable<'a> {
    by_name: HashMap<&'a str, &'a TypeDecl>,
}

impl<'a> DeclTable<'a> {
    pub fn new(file: &'a File) -> Self {
        let by_name = file
            .stmts
            .iter()
            .filter_map(|stmt| match stmt {
                Stmt::Type(decl) => Some((decl.name.as_str(), decl)),
                _ => None,
            })
            .collect();
        DeclTable { by_name }
    }

    pub fn resolve(&self, name: &str) -> Option<&'a TypeDecl> {
        self.by_name.get(name).copied()
    }
}
