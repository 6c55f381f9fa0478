//! Complex types parsed from YARD-style type strings.
//!
//! `Integer`, `Array<String>`, `Hash{Symbol => Integer}`, `String, nil` and
//! `Foo::Bar` are all understood. Anything else parses to
//! [`ComplexType::Undefined`]: type information is best-effort and a bad
//! string must never fail a request.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

static TYPE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(::)?[A-Za-z_][A-Za-z0-9_]*(::[A-Za-z_][A-Za-z0-9_]*)*$")
        .expect("type name pattern is valid")
});

/// Type parameters attached to a unique type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Parameters {
    None,
    /// `Array<String>`
    List(Box<ComplexType>),
    /// `Hash{Symbol => Integer}`
    Hash(Box<ComplexType>, Box<ComplexType>),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UniqueType {
    pub name: String,
    pub parameters: Parameters,
}

impl UniqueType {
    pub fn simple(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parameters: Parameters::None,
        }
    }
}

impl fmt::Display for UniqueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.parameters {
            Parameters::None => write!(f, "{}", self.name),
            Parameters::List(inner) => write!(f, "{}<{}>", self.name, inner),
            Parameters::Hash(key, value) => write!(f, "{}{{{} => {}}}", self.name, key, value),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ComplexType {
    /// Nothing could be inferred.
    #[default]
    Undefined,
    /// One or more alternatives, never empty.
    Union(Vec<UniqueType>),
}

impl ComplexType {
    pub fn simple(name: impl Into<String>) -> Self {
        ComplexType::Union(vec![UniqueType::simple(name)])
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, ComplexType::Undefined)
    }

    pub fn is_defined(&self) -> bool {
        !self.is_undefined()
    }

    pub fn items(&self) -> &[UniqueType] {
        match self {
            ComplexType::Undefined => &[],
            ComplexType::Union(items) => items,
        }
    }

    /// Parse one type string. Returns `Undefined` on any syntax error.
    pub fn parse(text: &str) -> Self {
        let mut parser = TypeParser::new(text);
        match parser.union().and_then(|ty| parser.finish().map(|_| ty)) {
            Some(ty) => ty,
            None => {
                debug!(input = text, "unparseable type string");
                ComplexType::Undefined
            }
        }
    }

    /// Parse several type strings into one union. Any unparseable entry
    /// makes the whole result `Undefined`.
    pub fn try_parse<S: AsRef<str>>(texts: &[S]) -> Self {
        let mut items: Vec<UniqueType> = Vec::new();
        for text in texts {
            match Self::parse(text.as_ref()) {
                ComplexType::Undefined => return ComplexType::Undefined,
                ComplexType::Union(parsed) => {
                    for item in parsed {
                        if !items.contains(&item) {
                            items.push(item);
                        }
                    }
                }
            }
        }
        if items.is_empty() {
            ComplexType::Undefined
        } else {
            ComplexType::Union(items)
        }
    }
}

impl fmt::Display for ComplexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComplexType::Undefined => write!(f, "undefined"),
            ComplexType::Union(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

struct TypeParser<'s> {
    rest: &'s str,
}

impl<'s> TypeParser<'s> {
    fn new(text: &'s str) -> Self {
        Self { rest: text }
    }

    fn skip_blanks(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn eat(&mut self, token: &str) -> bool {
        self.skip_blanks();
        match self.rest.strip_prefix(token) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn finish(&mut self) -> Option<()> {
        self.skip_blanks();
        self.rest.is_empty().then_some(())
    }

    fn union(&mut self) -> Option<ComplexType> {
        let mut items = vec![self.unique()?];
        while self.eat(",") {
            items.push(self.unique()?);
        }
        Some(ComplexType::Union(items))
    }

    fn unique(&mut self) -> Option<UniqueType> {
        self.skip_blanks();
        let len = self
            .rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == ':'))
            .unwrap_or(self.rest.len());
        let name = &self.rest[..len];
        if !TYPE_NAME.is_match(name) {
            return None;
        }
        self.rest = &self.rest[len..];

        let parameters = if self.eat("<") {
            let inner = self.union()?;
            if !self.eat(">") {
                return None;
            }
            Parameters::List(Box::new(inner))
        } else if self.eat("{") {
            let key = self.union()?;
            if !self.eat("=>") {
                return None;
            }
            let value = self.union()?;
            if !self.eat("}") {
                return None;
            }
            Parameters::Hash(Box::new(key), Box::new(value))
        } else {
            Parameters::None
        };

        Some(UniqueType {
            name: name.to_string(),
            parameters,
        })
    }
}
