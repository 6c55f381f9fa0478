//! Cursor fragment resolution.
//!
//! A [`Fragment`] answers every question the engine asks about one cursor
//! position: the signature chain before it, the word under it, the
//! enclosing namespace and scope, and whether it sits in a string or a
//! comment. Each answer is computed on first use and cached in a
//! [`OnceCell`] for the life of the fragment.
//!
//! ```ignore
//! let source = RubySource::parse(code)?;
//! let fragment = Fragment::new(&source, offset)?;
//! let receiver = fragment.base();
//! ```

mod scan;
mod word;

use crate::error::{Result, RubyscopeError};
use crate::pin::Pin;
use crate::source::{Construct, SourceBuffer};
use rubyscope_api::{ApiResult, FragmentSnapshot, Range, Scope};
use scan::SignatureData;
use std::cell::OnceCell;
use tracing::debug;

pub struct Fragment<'a, B: SourceBuffer + ?Sized> {
    source: &'a B,
    offset: usize,
    construct: OnceCell<Construct>,
    signature_data: OnceCell<SignatureData>,
    base: OnceCell<String>,
    word: OnceCell<String>,
    remainder: OnceCell<String>,
    whole_word: OnceCell<String>,
    whole_signature: OnceCell<String>,
    phrase: OnceCell<String>,
    in_string: OnceCell<bool>,
    in_comment: OnceCell<bool>,
    word_range: OnceCell<Range>,
    whole_word_range: OnceCell<Range>,
    visible_locals: OnceCell<Vec<&'a Pin>>,
}

impl<'a, B: SourceBuffer + ?Sized> Fragment<'a, B> {
    /// Fails with [`RubyscopeError::InvalidOffset`] when `offset` is past
    /// the end of the text or splits a UTF-8 character.
    pub fn new(source: &'a B, offset: usize) -> Result<Self> {
        let code = source.code();
        if offset > code.len() || !code.is_char_boundary(offset) {
            return Err(RubyscopeError::InvalidOffset {
                offset,
                len: code.len(),
            });
        }
        Ok(Self {
            source,
            offset,
            construct: OnceCell::new(),
            signature_data: OnceCell::new(),
            base: OnceCell::new(),
            word: OnceCell::new(),
            remainder: OnceCell::new(),
            whole_word: OnceCell::new(),
            whole_signature: OnceCell::new(),
            phrase: OnceCell::new(),
            in_string: OnceCell::new(),
            in_comment: OnceCell::new(),
            word_range: OnceCell::new(),
            whole_word_range: OnceCell::new(),
            visible_locals: OnceCell::new(),
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn source(&self) -> &'a B {
        self.source
    }

    fn code(&self) -> &'a str {
        self.source.code()
    }

    fn construct(&self) -> &Construct {
        self.construct
            .get_or_init(|| self.source.enclosing_construct(self.offset))
    }

    /// Fully qualified namespace at the cursor, empty at top level.
    pub fn namespace(&self) -> &str {
        &self.construct().namespace
    }

    pub fn scope(&self) -> Scope {
        self.construct().scope()
    }

    fn signature_data(&self) -> &SignatureData {
        self.signature_data.get_or_init(|| {
            let data = scan::signature_at(self.source, self.offset);
            debug!(
                offset = self.offset,
                start = data.start,
                signature = %data.signature,
                "signature scanned"
            );
            data
        })
    }

    /// The chain up to the cursor. Given `foo.bar` and offset 5 the
    /// signature is `foo.b`.
    pub fn signature(&self) -> &str {
        &self.signature_data().signature
    }

    /// Offset where the signature's source text begins.
    pub fn signature_start(&self) -> usize {
        self.signature_data().start
    }

    /// The signature without its final member. Given `String.new.split`
    /// the base is `String.new`.
    pub fn base(&self) -> &str {
        self.base.get_or_init(|| base_of(self.signature()).to_string())
    }

    /// The word before the cursor. Given `foo.bar` and offset 6 the word is
    /// `ba`.
    pub fn word(&self) -> &str {
        self.word.get_or_init(|| {
            let start = word::beginning_of_word_at(self.code().as_bytes(), self.offset);
            self.code()[start..self.offset].to_string()
        })
    }

    /// The rest of the word after the cursor. Given `foobar` and offset 3
    /// the remainder is `bar`.
    pub fn remainder(&self) -> &str {
        self.remainder.get_or_init(|| {
            let end = word::end_of_word_at(self.code().as_bytes(), self.offset);
            self.code()[self.offset..end].to_string()
        })
    }

    pub fn whole_word(&self) -> &str {
        self.whole_word
            .get_or_init(|| format!("{}{}", self.word(), self.remainder()))
    }

    pub fn whole_signature(&self) -> &str {
        self.whole_signature
            .get_or_init(|| format!("{}{}", self.signature(), self.remainder()))
    }

    /// Source text from the signature start to the cursor. Given
    /// `foo[bar].baz()` and offset 10 the phrase is `foo[bar].b`.
    pub fn phrase(&self) -> &str {
        self.phrase.get_or_init(|| {
            self.code()[self.signature_start()..self.offset].to_string()
        })
    }

    pub fn is_string(&self) -> bool {
        *self
            .in_string
            .get_or_init(|| self.source.strings().surrounds(self.offset))
    }

    /// True when the cursor falls in `(begin, end]` of a comment. Never true
    /// inside a string.
    pub fn is_comment(&self) -> bool {
        *self.in_comment.get_or_init(|| {
            !self.is_string() && self.source.comments().trails(self.offset)
        })
    }

    pub fn word_range(&self) -> Range {
        *self.word_range.get_or_init(|| self.range_of_word(false))
    }

    pub fn whole_word_range(&self) -> Range {
        *self.whole_word_range.get_or_init(|| self.range_of_word(true))
    }

    fn range_of_word(&self, whole: bool) -> Range {
        let code = self.code().as_bytes();
        let start = word::beginning_of_word_at(code, self.offset);
        let end = if whole {
            word::end_of_word_at(code, self.offset)
        } else {
            self.offset
        };
        Range::from_to(
            self.source.position_at(start),
            self.source.position_at(end.max(start)),
        )
    }

    /// Local variables of the cursor's closure whose presence covers the
    /// node at the cursor. Blocks share the closure of their method, so they
    /// see its locals; a nested `def`, `class` or `module` does not.
    pub fn visible_locals(&self) -> &[&'a Pin] {
        self.visible_locals.get_or_init(|| {
            let node_start = self.source.node_start_at(self.offset);
            let position = self.source.position_at(node_start);
            let closure_path = self.construct().closure_path.as_str();
            self.source
                .local_variable_pins()
                .iter()
                .filter(|pin| pin.closure_path() == closure_path && pin.visible_from(position))
                .collect()
        })
    }

    pub fn snapshot(&self) -> FragmentSnapshot {
        FragmentSnapshot {
            offset: self.offset,
            namespace: self.namespace().to_string(),
            scope: self.scope(),
            signature: self.signature().to_string(),
            base: self.base().to_string(),
            word: self.word().to_string(),
            remainder: self.remainder().to_string(),
            whole_word: self.whole_word().to_string(),
            whole_signature: self.whole_signature().to_string(),
            phrase: self.phrase().to_string(),
            signature_start: self.signature_start(),
            in_string: self.is_string(),
            in_comment: self.is_comment(),
            word_range: self.word_range(),
            whole_word_range: self.whole_word_range(),
            visible_locals: self
                .visible_locals()
                .iter()
                .map(|pin| pin.name().to_string())
                .collect(),
        }
    }
}

/// One-shot resolution for API callers: every field of the fragment at
/// `offset`, with offset errors mapped to [`rubyscope_api::ApiError`].
pub fn snapshot_at<B: SourceBuffer + ?Sized>(source: &B, offset: usize) -> ApiResult<FragmentSnapshot> {
    Ok(Fragment::new(source, offset)?.snapshot())
}

/// Strip the final `.member` or `::Member`; a trailing separator alone is
/// dropped. Signatures without a separator have an empty base.
fn base_of(signature: &str) -> &str {
    if signature.contains('.') {
        match signature.strip_suffix('.') {
            Some(stripped) => stripped,
            None => signature.rsplit_once('.').map_or("", |(base, _)| base),
        }
    } else if signature.contains("::") {
        match signature.strip_suffix("::") {
            Some(stripped) => stripped,
            None => signature.rsplit_once("::").map_or("", |(base, _)| base),
        }
    } else {
        ""
    }
}
