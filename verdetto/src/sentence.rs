use std::borrow::Cow;

/// Token of an analyzed sentence.
///
/// A token carries its surface form, a fine-grained tag (possibly empty for
/// trailing whitespace), and a flag marking surface forms unknown to the
/// lexicon.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    surface: String,
    tag: Cow<'static, str>,
    is_oov: bool,
}

impl Token {
    /// Creates a new token.
    pub fn new<S, T>(surface: S, tag: T, is_oov: bool) -> Self
    where
        S: Into<String>,
        T: Into<Cow<'static, str>>,
    {
        Self {
            surface: surface.into(),
            tag: tag.into(),
            is_oov,
        }
    }

    /// Gets the surface form.
    pub fn surface(&self) -> &str {
        &self.surface
    }

    /// Gets the fine-grained tag. The empty string marks trailing whitespace.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns `true` if the surface form is unknown to the lexicon.
    pub fn is_oov(&self) -> bool {
        self.is_oov
    }
}

/// Named-entity annotation of an analyzed sentence.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Entity {
    start: usize,
    end: usize,
    label: Cow<'static, str>,
}

impl Entity {
    /// Creates a new entity spanning the byte range `start..end` of the
    /// sentence text.
    pub fn new<L>(start: usize, end: usize, label: L) -> Self
    where
        L: Into<Cow<'static, str>>,
    {
        Self {
            start,
            end,
            label: label.into(),
        }
    }

    /// Gets the start byte position within the sentence text.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Gets the end byte position within the sentence text.
    pub fn end(&self) -> usize {
        self.end
    }

    /// Gets the entity category label.
    pub fn label(&self) -> &str {
        &self.label
    }
}

/// Sentence span with token and entity annotations.
///
/// Sentences are normally produced by [`Analyzer::analyze`], one per logical
/// sentence of the input text.
///
/// [`Analyzer::analyze`]: crate::Analyzer::analyze
#[derive(Debug, PartialEq, Clone)]
pub struct Sentence {
    text: String,
    tokens: Vec<Token>,
    entities: Vec<Entity>,
}

impl Sentence {
    /// Creates a sentence from its parts.
    pub fn new(text: String, tokens: Vec<Token>, entities: Vec<Entity>) -> Self {
        Self {
            text,
            tokens,
            entities,
        }
    }

    /// Gets the raw text of this span.
    pub fn to_raw_string(&self) -> &str {
        &self.text
    }

    /// Gets the tokens.
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Gets the entity annotations.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }
}
