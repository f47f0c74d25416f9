use std::borrow::Cow;

use daachorse::{DoubleArrayAhoCorasick, DoubleArrayAhoCorasickBuilder, MatchKind};
use hashbrown::{HashMap, HashSet};

use crate::errors::{Result, VerdettoError};
use crate::lexicon_model::LexiconModel;
use crate::sentence::{Entity, Sentence, Token};
use crate::tag_set::{ENTITY_LABELS, FINE_TAGS, N_ENTITY_LABELS, N_FINE_TAGS};

/// Language pipeline: sentence segmentation, tokenization, fine-grained tag
/// assignment, and gazetteer based entity annotation.
///
/// An analyzer is compiled once from a [`LexiconModel`] and is read-only
/// afterwards, so it can be shared freely between prediction calls.
pub struct Analyzer {
    words: HashMap<String, &'static str>,
    gazetteer_pma: Option<DoubleArrayAhoCorasick>,
    gazetteer_labels: Vec<&'static str>,
}

impl Analyzer {
    /// Compiles a lexicon model into an analyzer.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidModel`] is returned if a lexicon entry refers
    /// to a tag or entity index outside the frozen inventories, assigns a
    /// synthetic tag, or the gazetteer contains an empty phrase.
    pub fn new(model: LexiconModel) -> Result<Self> {
        let mut words = HashMap::with_capacity(model.words.len());
        for entry in model.words {
            let tag_idx = usize::from(entry.tag);
            // The last two inventory slots are the synthetic OOV and
            // TRAILING_SPACE tags; a lexicon must never assign those.
            if tag_idx >= N_FINE_TAGS - 2 {
                return Err(VerdettoError::invalid_model(format!(
                    "invalid tag index for {:?}: {}",
                    entry.surface, entry.tag,
                )));
            }
            words.insert(entry.surface, FINE_TAGS[tag_idx]);
        }

        let mut patterns: Vec<String> = vec![];
        let mut gazetteer_labels = vec![];
        let mut seen = HashSet::new();
        for entry in model.gazetteer {
            let label_idx = usize::from(entry.label);
            if label_idx >= N_ENTITY_LABELS {
                return Err(VerdettoError::invalid_model(format!(
                    "invalid entity label index for {:?}: {}",
                    entry.phrase, entry.label,
                )));
            }
            if entry.phrase.is_empty() {
                return Err(VerdettoError::invalid_model("empty gazetteer phrase"));
            }
            // The first assignment of a phrase wins.
            if seen.insert(entry.phrase.clone()) {
                patterns.push(entry.phrase);
                gazetteer_labels.push(ENTITY_LABELS[label_idx]);
            }
        }
        let gazetteer_pma = if patterns.is_empty() {
            None
        } else {
            Some(
                DoubleArrayAhoCorasickBuilder::new()
                    .match_kind(MatchKind::LeftmostLongest)
                    .build(&patterns)
                    .map_err(|e| VerdettoError::invalid_model(e.to_string()))?,
            )
        };

        Ok(Self {
            words,
            gazetteer_pma,
            gazetteer_labels,
        })
    }

    /// Analyzes a text, returning one annotated [`Sentence`] per logical
    /// sentence.
    ///
    /// Each sentence span is tokenized and tagged, then independently
    /// re-scanned by the gazetteer for entity annotations.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidArgument`] is returned if the text is empty.
    pub fn analyze(&self, text: &str) -> Result<Vec<Sentence>> {
        if text.is_empty() {
            return Err(VerdettoError::invalid_argument(
                "text",
                "must contain at least one character",
            ));
        }
        let mut sentences = vec![];
        for (start, end) in split_spans(text) {
            let span = &text[start..end];
            let tokens = self.tokenize(span);
            let entities = self.annotate_entities(span);
            sentences.push(Sentence::new(span.to_string(), tokens, entities));
        }
        Ok(sentences)
    }

    fn tokenize(&self, span: &str) -> Vec<Token> {
        let chars: Vec<(usize, char)> = span.char_indices().collect();
        let mut tokens = vec![];
        let mut quote_open = false;
        let mut i = 0;
        while i < chars.len() {
            let (pos, c) = chars[i];
            if c.is_whitespace() {
                let run_start = i;
                while i < chars.len() && chars[i].1.is_whitespace() {
                    i += 1;
                }
                let surface = &span[pos..byte_end(span, &chars, i)];
                if i == chars.len() {
                    // Trailing whitespace carries the empty tag.
                    tokens.push(Token::new(surface, "", false));
                } else if i - run_start > 1 {
                    tokens.push(Token::new(surface, "_SP", false));
                }
                // A single separating space is not a token.
            } else if c.is_ascii_digit() {
                while i < chars.len() && is_number_char(&chars, i) {
                    i += 1;
                }
                let surface = &span[pos..byte_end(span, &chars, i)];
                tokens.push(Token::new(surface, "CD", false));
            } else if c.is_alphanumeric() {
                while i < chars.len() && is_word_char(&chars, i) {
                    i += 1;
                }
                let surface = &span[pos..byte_end(span, &chars, i)];
                tokens.push(self.word_token(surface));
            } else {
                i += 1;
                let surface = &span[pos..byte_end(span, &chars, i)];
                let tag = punctuation_tag(c, &mut quote_open);
                tokens.push(Token::new(surface, tag, false));
            }
        }
        tokens
    }

    fn word_token(&self, surface: &str) -> Token {
        if let Some(&tag) = self.words.get(surface) {
            return Token::new(surface, tag, false);
        }
        let lowered = surface.to_lowercase();
        if let Some(&tag) = self.words.get(&lowered) {
            return Token::new(surface, tag, false);
        }
        Token::new(surface, Cow::Borrowed(""), true)
    }

    fn annotate_entities(&self, span: &str) -> Vec<Entity> {
        let pma = match &self.gazetteer_pma {
            Some(pma) => pma,
            None => return vec![],
        };
        let mut entities = vec![];
        for m in pma.leftmost_find_iter(span) {
            // Matching runs on bytes; skip anything off a character boundary.
            if !span.is_char_boundary(m.start()) || !span.is_char_boundary(m.end()) {
                continue;
            }
            let head_ok = span[..m.start()]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            let tail_ok = span[m.end()..]
                .chars()
                .next()
                .map_or(true, |c| !c.is_alphanumeric());
            if head_ok && tail_ok {
                entities.push(Entity::new(
                    m.start(),
                    m.end(),
                    self.gazetteer_labels[m.value()],
                ));
            }
        }
        entities
    }
}

// End byte position of the token ending before character index `i`.
fn byte_end(span: &str, chars: &[(usize, char)], i: usize) -> usize {
    chars.get(i).map_or(span.len(), |&(pos, _)| pos)
}

fn is_number_char(chars: &[(usize, char)], i: usize) -> bool {
    let c = chars[i].1;
    if c.is_ascii_digit() {
        return true;
    }
    // Keep decimal points and thousands separators inside a number.
    matches!(c, '.' | ',')
        && i > 0
        && chars[i - 1].1.is_ascii_digit()
        && chars.get(i + 1).map_or(false, |&(_, n)| n.is_ascii_digit())
}

fn is_word_char(chars: &[(usize, char)], i: usize) -> bool {
    let c = chars[i].1;
    if c.is_alphanumeric() {
        return true;
    }
    // Hyphens and apostrophes stay inside a word when flanked by letters,
    // as in "ring-shaped" or "don't".
    matches!(c, '-' | '\'' | '’')
        && i > 0
        && chars[i - 1].1.is_alphanumeric()
        && chars.get(i + 1).map_or(false, |&(_, n)| n.is_alphanumeric())
}

fn punctuation_tag(c: char, quote_open: &mut bool) -> &'static str {
    match c {
        '(' | '[' | '{' => "-LRB-",
        ')' | ']' | '}' => "-RRB-",
        ',' => ",",
        ':' | ';' | '…' => ":",
        '.' | '!' | '?' => ".",
        '"' => {
            *quote_open = !*quote_open;
            if *quote_open {
                "``"
            } else {
                "''"
            }
        }
        '“' | '‘' | '`' => "``",
        '”' | '’' | '\'' => "''",
        '$' | '€' | '£' | '¥' => "$",
        '#' => "#",
        '-' | '–' | '—' => "HYPH",
        '&' => "CC",
        _ => "SYM",
    }
}

// Splits a text into sentence spans. Terminators and closing quotes attach
// to the preceding span; whitespace between spans is dropped, but trailing
// whitespace at the end of the text stays attached to the last span.
fn split_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = vec![];
    let mut start = 0;
    let mut end_candidate = None;
    for (i, c) in text.char_indices() {
        if matches!(c, '.' | '!' | '?') {
            end_candidate = Some(i + c.len_utf8());
        } else if c.is_whitespace() {
            // Separator; a pending span end stays pending.
        } else if matches!(c, '"' | '\'' | ')' | '”' | '’') && end_candidate == Some(i) {
            end_candidate = Some(i + c.len_utf8());
        } else if let Some(end) = end_candidate.take() {
            if end != i {
                spans.push((start, end));
                start = i;
            }
            // A terminator glued to the next character is a decimal point
            // or an abbreviation, not a sentence end.
        }
    }
    if end_candidate.is_some() || start < text.len() {
        spans.push((start, text.len()));
    }
    spans
}
