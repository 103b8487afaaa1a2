//! # Type Representations
//!
//! This module defines the types attached to expressions by the inferencer
//! and written in source by type declarations.
//!
//! ## Overview
//!
//! A `Type` is one of:
//!
//! - **Primitive** - A named builtin (`int`, `string`, `bool`)
//! - **Tuple** - An ordered sequence of types; the empty tuple is unit
//! - **Func** - A single-argument function type (multi-argument functions
//!   are curried: `int -> int -> int` is `Func(int, Func(int, int))`)
//! - **Ref** - A reference to a named type declaration, optionally applied
//!   to one argument
//! - **Var** - A type variable standing for a not-yet-known type
//!
//! ## Type References
//!
//! The grammar cannot distinguish a primitive from a declared type name, so
//! everything it parses in type position becomes a `Ref` that is resolved
//! lazily, by name, against the file's declaration table. A reference holds
//! no pointer to its declaration:
//!
//! ```text
//! type pair a = (a, a);
//! let swap = ...;        // mentions `pair int`
//!
//! Ref { name: "pair", arg: Some(Ref { name: "int", arg: None }) }
//! ```
//!
//! ## Type Variables
//!
//! Type variables are produced by the inferencer's fresh-variable generator
//! and by the parameter list of a generic type declaration. They are
//! identified purely by name:
//!
//! ```text
//! TypeVar("a")    // displays as: a
//! ```
//!
//! ## Substitution
//!
//! [`Type::substitute`] rewrites one variable to a type; the unifier's
//! substitution lists are applied with it, one variable at a time.
//! [`Type::replace`] rewrites many variables at once and is used when a
//! generic declaration is instantiated at its use site.

use std::collections::HashMap;
use std::fmt;

/// A type variable, identified by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeVar(pub String);

impl TypeVar {
    pub fn new(name: impl Into<String>) -> Self {
        TypeVar(name.into())
    }
}

impl fmt::Display for TypeVar {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A reference to a named type, optionally applied to one argument.
/// Resolution is lazy: the name is looked up in a [`super::DeclTable`] when
/// something actually needs the definition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeRef {
    pub name: String,
    pub arg: Option<Box<Type>>,
}

/// All possible types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    Primitive(String),
    Tuple(Vec<Type>),
    Func(Box<Type>, Box<Type>),
    Ref(TypeRef),
    Var(TypeVar),
}

impl Type {
    /// The `int` primitive.
    pub fn int() -> Self {
        Type::Primitive("int".to_string())
    }

    /// The `string` primitive.
    pub fn string() -> Self {
        Type::Primitive("string".to_string())
    }

    /// The `bool` primitive.
    pub fn bool() -> Self {
        Type::Primitive("bool".to_string())
    }

    /// The unit type, i.e. the empty tuple.
    pub fn unit() -> Self {
        Type::Tuple(Vec::new())
    }

    /// Create a function type from argument and return types.
    ///
    /// # Examples
    ///
    /// ```text
    /// Type::func(Type::int(), Type::int())               // int -> int
    /// Type::func(Type::int(), Type::func(int, int))      // int -> int -> int
    /// ```
    pub fn func(arg: Type, ret: Type) -> Self {
        Type::Func(Box::new(arg), Box::new(ret))
    }

    /// Create a type variable by name.
    pub fn var(name: impl Into<String>) -> Self {
        Type::Var(TypeVar::new(name))
    }

    /// Create a named type reference, optionally applied to an argument.
    pub fn reference(name: impl Into<String>, arg: Option<Type>) -> Self {
        Type::Ref(TypeRef {
            name: name.into(),
            arg: arg.map(Box::new),
        })
    }

    /// Rewrite every occurrence of `var` to `replacement`.
    ///
    /// This is the single step the inferencer's substitution application is
    /// built from:
    ///
    /// ```text
    /// (a -> b).substitute(a, int)   =   int -> b
    /// (a, a).substitute(a, string)  =   (string, string)
    /// ```
    pub fn substitute(&self, var: &TypeVar, replacement: &Type) -> Type {
        match self {
            Type::Primitive(_) => self.clone(),
            Type::Var(v) => {
                if v == var {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            Type::Tuple(elems) => Type::Tuple(
                elems
                    .iter()
                    .map(|t| t.substitute(var, replacement))
                    .collect(),
            ),
            Type::Func(arg, ret) => Type::func(
                arg.substitute(var, replacement),
                ret.substitute(var, replacement),
            ),
            Type::Ref(r) => Type::Ref(TypeRef {
                name: r.name.clone(),
                arg: r
                    .arg
                    .as_ref()
                    .map(|t| Box::new(t.substitute(var, replacement))),
            }),
        }
    }

    /// Rewrite every variable in `map` to its image. Used to instantiate the
    /// body of a generic type declaration with the arguments of a reference.
    pub fn replace(&self, map: &HashMap<TypeVar, Type>) -> Type {
        match self {
            Type::Primitive(_) => self.clone(),
            Type::Var(v) => map.get(v).cloned().unwrap_or_else(|| self.clone()),
            Type::Tuple(elems) => Type::Tuple(elems.iter().map(|t| t.replace(map)).collect()),
            Type::Func(arg, ret) => Type::func(arg.replace(map), ret.replace(map)),
            Type::Ref(r) => Type::Ref(TypeRef {
                name: r.name.clone(),
                arg: r.arg.as_ref().map(|t| Box::new(t.replace(map))),
            }),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Type::Primitive(name) => write!(f, "{}", name),
            Type::Tuple(elems) => {
                write!(f, "(")?;
                for (i, t) in elems.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", t)?;
                }
                write!(f, ")")
            }
            Type::Func(arg, ret) => {
                // parenthesize a function in argument position so
                // `(a -> b) -> c` reads differently from `a -> b -> c`
                if matches!(**arg, Type::Func(_, _)) {
                    write!(f, "({}) -> {}", arg, ret)
                } else {
                    write!(f, "{} -> {}", arg, ret)
                }
            }
            Type::Ref(r) => match &r.arg {
                Some(arg) => write!(f, "{} {}", r.name, arg),
                None => write!(f, "{}", r.name),
            },
            Type::Var(v) => write!(f, "{}", v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_primitives() {
        assert_eq!(Type::int().to_string(), "int");
        assert_eq!(Type::string().to_string(), "string");
        assert_eq!(Type::bool().to_string(), "bool");
    }

    #[test]
    fn test_display_unit_and_tuple() {
        assert_eq!(Type::unit().to_string(), "()");
        let pair = Type::Tuple(vec![Type::int(), Type::string()]);
        assert_eq!(pair.to_string(), "(int, string)");
    }

    #[test]
    fn test_display_function_right_associates() {
        let curried = Type::func(Type::int(), Type::func(Type::int(), Type::bool()));
        assert_eq!(curried.to_string(), "int -> int -> bool");
    }

    #[test]
    fn test_display_function_argument_parenthesized() {
        let higher = Type::func(Type::func(Type::int(), Type::int()), Type::string());
        assert_eq!(higher.to_string(), "(int -> int) -> string");
    }

    #[test]
    fn test_display_type_reference() {
        assert_eq!(Type::reference("foo", None).to_string(), "foo");
        let applied = Type::reference("pair", Some(Type::reference("int", None)));
        assert_eq!(applied.to_string(), "pair int");
    }

    #[test]
    fn test_substitute_variable() {
        let a = TypeVar::new("a");
        let ty = Type::func(Type::var("a"), Type::var("b"));
        let out = ty.substitute(&a, &Type::int());
        assert_eq!(out, Type::func(Type::int(), Type::var("b")));
    }

    #[test]
    fn test_substitute_recurses_into_tuples_and_refs() {
        let a = TypeVar::new("a");
        let ty = Type::Tuple(vec![
            Type::var("a"),
            Type::reference("list", Some(Type::var("a"))),
        ]);
        let out = ty.substitute(&a, &Type::string());
        assert_eq!(
            out,
            Type::Tuple(vec![
                Type::string(),
                Type::reference("list", Some(Type::string())),
            ])
        );
    }

    #[test]
    fn test_substitute_leaves_other_variables() {
        let a = TypeVar::new("a");
        assert_eq!(Type::var("b").substitute(&a, &Type::int()), Type::var("b"));
    }

    #[test]
    fn test_replace_many() {
        let map: HashMap<TypeVar, Type> = [
            (TypeVar::new("a"), Type::int()),
            (TypeVar::new("b"), Type::string()),
        ]
        .into_iter()
        .collect();
        let ty = Type::Tuple(vec![Type::var("a"), Type::var("b"), Type::var("c")]);
        assert_eq!(
            ty.replace(&map),
            Type::Tuple(vec![Type::int(), Type::string(), Type::var("c")])
        );
    }
}
