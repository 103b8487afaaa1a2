use std::ops::{Add, BitOr, Mul, Shr, Sub};
use std::rc::Rc;

use super::{ok, Input, ParseError, Parser};

// === Combinators as methods ===

impl<T: 'static> Parser<T> {
    /// Sequence: parse self then other, return (T, U)
    pub fn seq<U: 'static>(self, other: Parser<U>) -> Parser<(T, U)> {
        Parser::new("seq", move |input| {
            let a = match self.parse(input) {
                Ok(a) => a,
                Err(e) => return Err(ParseError::wrap("seq", input, e)),
            };
            let b = match other.parse(&a.rest) {
                Ok(b) => b,
                Err(e) => return Err(ParseError::wrap("seq", input, e)),
            };
            ok((a.value, b.value), b.rest)
        })
    }

    /// Keep left: parse self then other, discard other's result
    pub fn skip<U: 'static>(self, other: Parser<U>) -> Parser<T> {
        Parser::new("skip", move |input| {
            let a = match self.parse(input) {
                Ok(a) => a,
                Err(e) => return Err(ParseError::wrap("skip", input, e)),
            };
            match other.parse(&a.rest) {
                Ok(b) => ok(a.value, b.rest),
                Err(e) => Err(ParseError::wrap("skip", input, e)),
            }
        })
    }

    /// Keep right: parse self then other, discard self's result
    pub fn skip_left<U: 'static>(self, other: Parser<U>) -> Parser<U> {
        Parser::new("skip_left", move |input| {
            let a = match self.parse(input) {
                Ok(a) => a,
                Err(e) => return Err(ParseError::wrap("skip_left", input, e)),
            };
            match other.parse(&a.rest) {
                Ok(b) => ok(b.value, b.rest),
                Err(e) => Err(ParseError::wrap("skip_left", input, e)),
            }
        })
    }

    /// Map: transform result
    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, f: F) -> Parser<U> {
        let name = Rc::clone(&self.name);
        Parser {
            name,
            run: Rc::new(move |input: &Input| {
                let parsed = self.parse(input)?;
                ok(f(parsed.value), parsed.rest)
            }),
        }
    }

    /// Choice: try self, if fails try other
    pub fn or(self, other: Parser<T>) -> Parser<T> {
        any(vec![self, other])
    }

    /// Stamp the parser name reported in diagnostics. Grammar rules rename
    /// themselves so error chains read as rule names, not combinator names.
    pub fn rename(self, name: &str) -> Parser<T> {
        let stamped: Rc<str> = Rc::from(name);
        let stamp = Rc::clone(&stamped);
        Parser {
            name: stamped,
            run: Rc::new(move |input: &Input| {
                self.parse(input).map_err(|e| e.renamed(&stamp))
            }),
        }
    }
}

// === Operator Overloading ===

/// `+` for sequence: A + B -> (A, B)
impl<T: 'static, U: 'static> Add<Parser<U>> for Parser<T> {
    type Output = Parser<(T, U)>;

    fn add(self, rhs: Parser<U>) -> Self::Output {
        self.seq(rhs)
    }
}

/// `-` for keep left: A - B -> A (parse B, discard result)
impl<T: 'static, U: 'static> Sub<Parser<U>> for Parser<T> {
    type Output = Parser<T>;

    fn sub(self, rhs: Parser<U>) -> Self::Output {
        self.skip(rhs)
    }
}

/// `*` for keep right: A * B -> B (parse A, discard result)
impl<T: 'static, U: 'static> Mul<Parser<U>> for Parser<T> {
    type Output = Parser<U>;

    fn mul(self, rhs: Parser<U>) -> Self::Output {
        self.skip_left(rhs)
    }
}

/// `|` for choice: A | B -> A or B
impl<T: 'static> BitOr<Parser<T>> for Parser<T> {
    type Output = Parser<T>;

    fn bitor(self, rhs: Parser<T>) -> Self::Output {
        self.or(rhs)
    }
}

/// `>>` for map: A >> fn -> B
impl<T: 'static, U: 'static, F: Fn(T) -> U + 'static> Shr<F> for Parser<T> {
    type Output = Parser<U>;

    fn shr(self, f: F) -> Self::Output {
        self.map(f)
    }
}

// === Primitive Parsers ===

/// Match exactly the character `want` and return it.
pub fn lit(want: char) -> Parser<char> {
    Parser::new("lit", move |input| match input.cons() {
        Some((head, rest)) if head == want => ok(head, rest),
        Some((head, _)) => Err(ParseError::new(
            "lit",
            input,
            format!("wanted {:?}, got {:?}", want, head),
        )),
        None => Err(ParseError::new(
            "lit",
            input,
            format!("wanted {:?}, got end of input", want),
        )),
    })
}

/// Match any character except `unwanted` and return it.
pub fn not_lit(unwanted: char) -> Parser<char> {
    Parser::new("not_lit", move |input| match input.cons() {
        Some((head, _)) if head == unwanted => Err(ParseError::new(
            "not_lit",
            input,
            format!("wanted anything but {:?}, but got it anyway", unwanted),
        )),
        Some((head, rest)) => ok(head, rest),
        None => Err(ParseError::new(
            "not_lit",
            input,
            format!("wanted anything but {:?}, got end of input", unwanted),
        )),
    })
}

/// Match the literal string prefix `want` and return it.
pub fn str_lit(want: &str) -> Parser<String> {
    let want = want.to_string();
    Parser::new("str_lit", move |input| match input.strip_prefix(&want) {
        Some(rest) => ok(want.clone(), rest),
        None => Err(ParseError::new(
            "str_lit",
            input,
            format!(
                "wanted {:?}, got {:?}",
                want,
                input.sample(want.chars().count())
            ),
        )),
    })
}

/// A class of characters a single-character parser can match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Class {
    Digit,
    Letter,
    Whitespace,
}

impl Class {
    fn contains(self, c: char) -> bool {
        match self {
            Class::Digit => c.is_numeric(),
            Class::Letter => c.is_alphabetic(),
            Class::Whitespace => c.is_whitespace(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            Class::Digit => "Digit",
            Class::Letter => "Letter",
            Class::Whitespace => "Whitespace",
        }
    }
}

/// Match one character of the given class.
pub fn is_class(class: Class) -> Parser<char> {
    Parser::new("is_class", move |input| match input.cons() {
        Some((head, rest)) if class.contains(head) => ok(head, rest),
        Some((head, _)) => Err(ParseError::new(
            "is_class",
            input,
            format!("wanted <{}>, got {:?}", class.name(), head),
        )),
        None => Err(ParseError::new(
            "is_class",
            input,
            format!("wanted <{}>, got end of input", class.name()),
        )),
    })
}

/// Try each parser in order and commit to the first that accepts. On total
/// failure the error lists every attempted parser name.
pub fn any<T: 'static>(parsers: Vec<Parser<T>>) -> Parser<T> {
    Parser::new("any", move |input| {
        let mut names = Vec::with_capacity(parsers.len());
        for parser in &parsers {
            match parser.parse(input) {
                Ok(parsed) => return Ok(parsed),
                Err(_) => names.push(parser.name().to_string()),
            }
        }
        Err(ParseError::new(
            "any",
            input,
            format!("failed to match parsers: [{}]", names.join(", ")),
        ))
    })
}

/// Zero or more occurrences. Never fails.
pub fn repeat<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    Parser::new("repeat", move |input| {
        let mut values = Vec::new();
        let mut current = input.clone();
        while let Ok(parsed) = parser.parse(&current) {
            let stalled = parsed.rest.pos == current.pos;
            values.push(parsed.value);
            current = parsed.rest;
            // a parser that consumes nothing would repeat forever
            if stalled {
                break;
            }
        }
        ok(values, current)
    })
}

/// One or more occurrences. Fails if the first attempt fails.
pub fn one_or_more<T: 'static>(parser: Parser<T>) -> Parser<Vec<T>> {
    let more = repeat(parser.clone());
    Parser::new("one_or_more", move |input| {
        let first = match parser.parse(input) {
            Ok(parsed) => parsed,
            Err(e) => return Err(ParseError::wrap("one_or_more", input, e)),
        };
        let rest = more.parse(&first.rest)?;
        let mut values = vec![first.value];
        values.extend(rest.value);
        ok(values, rest.rest)
    })
}

/// Zero or one occurrence. On failure, succeeds with `None` and consumes
/// nothing.
pub fn opt<T: 'static>(parser: Parser<T>) -> Parser<Option<T>> {
    Parser::new("opt", move |input| match parser.parse(input) {
        Ok(parsed) => ok(Some(parsed.value), parsed.rest),
        Err(_) => ok(None, input.clone()),
    })
}

/// Defer construction of a parser until it runs. Breaks the construction
/// cycles of a recursive grammar (an expression contains blocks, blocks
/// contain statements, statements contain expressions).
pub fn lazy<T: 'static>(build: fn() -> Parser<T>) -> Parser<T> {
    Parser::new("lazy", move |input| build().parse(input))
}

// === Derived Parsers ===

fn collect_string(chars: Vec<char>) -> String {
    chars.into_iter().collect()
}

/// Mandatory whitespace.
pub fn ws() -> Parser<String> {
    one_or_more(is_class(Class::Whitespace))
        .map(collect_string)
        .rename("WS")
}

/// Optional whitespace.
pub fn can_ws() -> Parser<String> {
    repeat(is_class(Class::Whitespace))
        .map(collect_string)
        .rename("CanWS")
}

pub fn digits() -> Parser<String> {
    one_or_more(is_class(Class::Digit))
        .map(collect_string)
        .rename("Digits")
}

pub fn letters() -> Parser<String> {
    one_or_more(is_class(Class::Letter))
        .map(collect_string)
        .rename("Letters")
}

/// Decimal integer literal. A literal that does not fit an `i64` is a parse
/// failure.
pub fn int() -> Parser<i64> {
    let digits = digits();
    Parser::new("Int", move |input| {
        let parsed = digits.parse(input).map_err(|e| e.renamed("Int"))?;
        match parsed.value.parse::<i64>() {
            Ok(n) => ok(n, parsed.rest),
            Err(_) => Err(ParseError::new(
                "Int",
                input,
                format!("invalid integer literal: {}", parsed.value),
            )),
        }
    })
}

/// Single-line string literal, without its surrounding quotes.
pub fn string() -> Parser<String> {
    ((lit('"') * repeat(not_lit('"'))) - lit('"'))
        .map(collect_string)
        .rename("String")
}

/// Identifier: a letter or underscore followed by letters, digits, and
/// underscores.
pub fn ident() -> Parser<String> {
    let head = any(vec![lit('_'), is_class(Class::Letter)]);
    let tail = repeat(any(vec![
        lit('_'),
        is_class(Class::Letter),
        is_class(Class::Digit),
    ]));
    (head + tail)
        .map(|(first, rest)| {
            let mut name = String::with_capacity(1 + rest.len());
            name.push(first);
            name.extend(rest);
            name
        })
        .rename("Ident")
}

/// End of input.
pub fn eof() -> Parser<()> {
    Parser::new("EOF", |input| {
        if input.is_empty() {
            ok((), input.clone())
        } else {
            Err(ParseError::new("EOF", input, "wanted end of input"))
        }
    })
}

/// End of statement: a semi-colon with optional surrounding whitespace.
pub fn eos() -> Parser<()> {
    ((can_ws() + lit(';')) + can_ws()).map(|_| ()).rename("EOS")
}
