use crate::source::RubySource;
use rubyscope_core::error::{Result, RubyscopeError};
use tree_sitter::{Language, Parser, Tree};
use tracing::warn;

mod regions;
mod scope;
pub(crate) mod utils;

pub(crate) use regions::Regions;
pub(crate) use scope::{ScopeBuilder, ScopeIndex};

#[derive(Clone)]
pub struct RubyParser {
    pub language: Language,
}

impl RubyParser {
    pub fn new() -> Result<Self> {
        let language: Language = tree_sitter_ruby::LANGUAGE.into();
        // Fail early on an ABI mismatch instead of on the first parse.
        Parser::new()
            .set_language(&language)
            .map_err(|e| RubyscopeError::Parsing(format!("Invalid language: {:?}", e)))?;
        Ok(Self { language })
    }

    pub fn parse_tree(&self, code: &str) -> Result<Tree> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| RubyscopeError::Parsing(format!("Invalid language: {:?}", e)))?;
        let tree = parser
            .parse(code, None)
            .ok_or_else(|| RubyscopeError::Parsing("parser produced no tree".to_string()))?;
        if tree.root_node().has_error() {
            warn!("source has syntax errors; regions may be incomplete");
        }
        Ok(tree)
    }

    /// Parse `code` into an immutable buffer snapshot.
    pub fn parse(&self, code: impl Into<String>) -> Result<RubySource> {
        let code = code.into();
        let tree = self.parse_tree(&code)?;
        Ok(RubySource::from_tree(code, tree))
    }
}
