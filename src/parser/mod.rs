mod combinators;
mod grammar;

pub use combinators::*;
pub use grammar::*;

use std::fmt;
use std::rc::Rc;

/// How many characters of context an error sample carries.
const SAMPLE_LEN: usize = 15;

/// Immutable cursor over the source text.
///
/// An `Input` is a cheaply cloned view of shared source: advancing produces a
/// new cursor, the original stays valid. A parser that fails therefore never
/// disturbs its caller's position, which is what makes trial-and-backtrack
/// (`opt`, `any`) free.
#[derive(Debug, Clone)]
pub struct Input {
    src: Rc<str>,
    pos: usize,
}

impl Input {
    pub fn new(src: impl Into<Rc<str>>) -> Self {
        Input {
            src: src.into(),
            pos: 0,
        }
    }

    /// Split off the first character, returning it and the remaining input.
    /// `None` at end of input.
    pub fn cons(&self) -> Option<(char, Input)> {
        let mut chars = self.src[self.pos..].chars();
        let head = chars.next()?;
        Some((
            head,
            Input {
                src: Rc::clone(&self.src),
                pos: self.src.len() - chars.as_str().len(),
            },
        ))
    }

    /// The unconsumed suffix.
    pub fn as_str(&self) -> &str {
        &self.src[self.pos..]
    }

    pub fn is_empty(&self) -> bool {
        self.pos == self.src.len()
    }

    /// Advance past `prefix` if the input starts with it.
    pub fn strip_prefix(&self, prefix: &str) -> Option<Input> {
        self.as_str().strip_prefix(prefix).map(|rest| Input {
            src: Rc::clone(&self.src),
            pos: self.src.len() - rest.len(),
        })
    }

    /// Up to `n` characters of the unconsumed input, ellipsized when
    /// truncated. Only useful for error messages.
    pub fn sample(&self, n: usize) -> String {
        let rest = self.as_str();
        if rest.chars().count() <= n {
            rest.to_string()
        } else {
            let mut s: String = rest.chars().take(n).collect();
            s.push_str("...");
            s
        }
    }
}

impl PartialEq for Input {
    fn eq(&self, other: &Self) -> bool {
        self.as_str() == other.as_str()
    }
}

impl Eq for Input {}

/// A failed parse. `cause` nests the failure of an inner parser, so the chain
/// reads like a stack trace from the outermost grammar rule down to the
/// character that mismatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub parser: String,
    pub sample: String,
    pub message: String,
    pub cause: Option<Box<ParseError>>,
}

impl ParseError {
    pub fn new(parser: impl Into<String>, input: &Input, message: impl Into<String>) -> Self {
        ParseError {
            parser: parser.into(),
            sample: input.sample(SAMPLE_LEN),
            message: message.into(),
            cause: None,
        }
    }

    pub fn wrap(parser: impl Into<String>, input: &Input, cause: ParseError) -> Self {
        ParseError {
            parser: parser.into(),
            sample: input.sample(SAMPLE_LEN),
            message: String::new(),
            cause: Some(Box::new(cause)),
        }
    }

    /// Restamp the outermost frame with `name`. Used by `rename` so the
    /// chain reports grammar rule names instead of combinator names.
    pub fn renamed(mut self, name: &str) -> Self {
        self.parser = name.to_string();
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}({:?}):\n{}", self.parser, self.sample, cause),
            None => write!(f, "{}({:?}): {}", self.parser, self.sample, self.message),
        }
    }
}

impl std::error::Error for ParseError {}

/// A successful parse: the produced value and the unconsumed input.
#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub value: T,
    pub rest: Input,
}

pub type ParseResult<T> = Result<Parsed<T>, ParseError>;

pub fn ok<T>(value: T, rest: Input) -> ParseResult<T> {
    Ok(Parsed { value, rest })
}

/// A parser is a pure function from input to result. Cloning shares the
/// underlying closure.
pub struct Parser<T> {
    name: Rc<str>,
    run: Rc<dyn Fn(&Input) -> ParseResult<T>>,
}

impl<T> Clone for Parser<T> {
    fn clone(&self) -> Self {
        Parser {
            name: Rc::clone(&self.name),
            run: Rc::clone(&self.run),
        }
    }
}

impl<T: 'static> Parser<T> {
    pub fn new(name: &str, run: impl Fn(&Input) -> ParseResult<T> + 'static) -> Self {
        Parser {
            name: Rc::from(name),
            run: Rc::new(run),
        }
    }

    pub fn parse(&self, input: &Input) -> ParseResult<T> {
        (self.run)(input)
    }

    /// Parse from the start of `src`.
    pub fn parse_str(&self, src: &str) -> ParseResult<T> {
        self.parse(&Input::new(src))
    }

    /// The name reported in diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cons_advances() {
        let input = Input::new("ab");
        let (head, rest) = input.cons().unwrap();
        assert_eq!(head, 'a');
        assert_eq!(rest.as_str(), "b");
        // the original cursor is untouched
        assert_eq!(input.as_str(), "ab");
    }

    #[test]
    fn test_cons_at_end() {
        assert!(Input::new("").cons().is_none());
    }

    #[test]
    fn test_sample_short_input() {
        assert_eq!(Input::new("abc").sample(15), "abc");
    }

    #[test]
    fn test_sample_ellipsized() {
        let input = Input::new("abcdefghijklmnopqrstuvwxyz");
        assert_eq!(input.sample(15), "abcdefghijklmno...");
    }

    #[test]
    fn test_strip_prefix() {
        let input = Input::new("let x");
        assert_eq!(input.strip_prefix("let").unwrap().as_str(), " x");
        assert!(input.strip_prefix("type").is_none());
    }

    #[test]
    fn test_error_chain_display() {
        let input = Input::new("xyz");
        let leaf = ParseError::new("lit", &input, "wanted '(', got 'x'");
        let chain = ParseError::wrap("TupleLit", &input, leaf);
        let printed = chain.to_string();
        assert!(printed.starts_with("TupleLit(\"xyz\"):"));
        assert!(printed.contains("lit(\"xyz\"): wanted '(', got 'x'"));
    }
}
