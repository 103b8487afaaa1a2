//! # Type Environment
//!
//! The environment maps identifiers to the types they are bound to in the
//! current lexical scope.
//!
//! ## Design
//!
//! The environment is copy-on-write: [`Environment::extend`] returns a new
//! environment and leaves the receiver untouched, so an inner scope can
//! shadow a binding without the outer scope ever observing it. Inference
//! only ever extends; the one mutating operation, [`Environment::define`],
//! exists for the REPL, which owns its environment and grows it as
//! declarations are entered.

use std::collections::HashMap;

use crate::ast::Type;

/// Map from identifier to type for the current scope.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Environment {
    bindings: HashMap<String, Type>,
}

impl Environment {
    pub fn empty() -> Self {
        Environment::default()
    }

    /// An environment seeded with the given bindings.
    pub fn with_bindings<'a>(bindings: impl IntoIterator<Item = (&'a str, Type)>) -> Self {
        Environment {
            bindings: bindings
                .into_iter()
                .map(|(name, ty)| (name.to_string(), ty))
                .collect(),
        }
    }

    pub fn lookup(&self, name: &str) -> Option<&Type> {
        self.bindings.get(name)
    }

    /// A new environment with `name` bound to `ty`, shadowing any existing
    /// binding. The receiver is unchanged.
    pub fn extend(&self, name: impl Into<String>, ty: Type) -> Environment {
        let mut bindings = self.bindings.clone();
        bindings.insert(name.into(), ty);
        Environment { bindings }
    }

    /// Bind in place. REPL use only; see the module docs.
    pub fn define(&mut self, name: impl Into<String>, ty: Type) {
        self.bindings.insert(name.into(), ty);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_env() {
        assert!(Environment::empty().lookup("x").is_none());
    }

    #[test]
    fn test_with_bindings() {
        let env = Environment::with_bindings([("x", Type::int())]);
        assert_eq!(env.lookup("x"), Some(&Type::int()));
    }

    #[test]
    fn test_extend_leaves_receiver_untouched() {
        let outer = Environment::empty();
        let inner = outer.extend("x", Type::int());
        assert!(outer.lookup("x").is_none());
        assert_eq!(inner.lookup("x"), Some(&Type::int()));
    }

    #[test]
    fn test_extend_shadows() {
        let env = Environment::empty()
            .extend("x", Type::int())
            .extend("x", Type::string());
        assert_eq!(env.lookup("x"), Some(&Type::string()));
    }

    #[test]
    fn test_define_mutates() {
        let mut env = Environment::empty();
        env.define("x", Type::bool());
        assert_eq!(env.lookup("x"), Some(&Type::bool()));
    }
}
