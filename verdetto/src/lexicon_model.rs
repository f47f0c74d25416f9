use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::errors::{Result, VerdettoError};
use crate::tag_set::{entity_label_index, fine_tag_index};

/// Word lexicon entry: a surface form and the index of its fine-grained tag.
#[derive(Debug, Clone, Decode, Encode)]
pub struct WordEntry {
    pub(crate) surface: String,
    pub(crate) tag: u16,
}

impl WordEntry {
    /// Creates an entry from a surface form and a tag name.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidArgument`] is returned if the tag name is
    /// outside the fine-grained tag inventory.
    pub fn new<S>(surface: S, tag: &str) -> Result<Self>
    where
        S: Into<String>,
    {
        let tag = fine_tag_index(tag)
            .ok_or_else(|| VerdettoError::invalid_argument("tag", format!("unknown tag: {tag}")))?;
        Ok(Self {
            surface: surface.into(),
            tag: u16::try_from(tag).unwrap(),
        })
    }
}

/// Gazetteer entry: a phrase and the index of its entity category.
#[derive(Debug, Clone, Decode, Encode)]
pub struct GazetteerEntry {
    pub(crate) phrase: String,
    pub(crate) label: u16,
}

impl GazetteerEntry {
    /// Creates an entry from a phrase and an entity label name.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidArgument`] is returned if the phrase is empty
    /// or the label is outside the entity inventory.
    pub fn new<S>(phrase: S, label: &str) -> Result<Self>
    where
        S: Into<String>,
    {
        let phrase = phrase.into();
        if phrase.is_empty() {
            return Err(VerdettoError::invalid_argument(
                "phrase",
                "must not be empty",
            ));
        }
        let label = entity_label_index(label).ok_or_else(|| {
            VerdettoError::invalid_argument("label", format!("unknown entity label: {label}"))
        })?;
        Ok(Self {
            phrase,
            label: u16::try_from(label).unwrap(),
        })
    }
}

/// Serialized language resources of the analyzer: the word lexicon used for
/// tag assignment and the gazetteer used for entity annotation.
#[derive(Debug, Clone, Decode, Encode)]
pub struct LexiconModel {
    pub(crate) words: Vec<WordEntry>,
    pub(crate) gazetteer: Vec<GazetteerEntry>,
}

impl LexiconModel {
    /// Creates a lexicon model from its entries.
    pub fn new(words: Vec<WordEntry>, gazetteer: Vec<GazetteerEntry>) -> Self {
        Self { words, gazetteer }
    }

    /// Exports the lexicon data.
    ///
    /// # Errors
    ///
    /// When `wtr` generates an error, it will be returned as is.
    pub fn write<W>(&self, wtr: &mut W) -> Result<()>
    where
        W: Write,
    {
        let config = bincode::config::standard();
        bincode::encode_into_std_write(self, wtr, config)?;
        Ok(())
    }

    /// Creates a lexicon model from a reader.
    ///
    /// # Errors
    ///
    /// When `rdr` generates an error, it will be returned as is.
    pub fn read<R>(rdr: &mut R) -> Result<Self>
    where
        R: Read,
    {
        let config = bincode::config::standard();
        Ok(bincode::decode_from_std_read(rdr, config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_entry_rejects_unknown_tag() {
        assert!(WordEntry::new("donuts", "NNS").is_ok());
        assert!(WordEntry::new("donuts", "PLURAL").is_err());
    }

    #[test]
    fn test_gazetteer_entry_rejects_unknown_label() {
        assert!(GazetteerEntry::new("American", "NORP").is_ok());
        assert!(GazetteerEntry::new("American", "NATIONALITY").is_err());
        assert!(GazetteerEntry::new("", "NORP").is_err());
    }

    #[test]
    fn test_read_write_roundtrip() {
        let model = LexiconModel::new(
            vec![
                WordEntry::new("donuts", "NNS").unwrap(),
                WordEntry::new("are", "VBP").unwrap(),
            ],
            vec![GazetteerEntry::new("American", "NORP").unwrap()],
        );
        let mut buf = vec![];
        model.write(&mut buf).unwrap();
        let decoded = LexiconModel::read(&mut buf.as_slice()).unwrap();
        assert_eq!(2, decoded.words.len());
        assert_eq!("donuts", decoded.words[0].surface);
        assert_eq!(1, decoded.gazetteer.len());
        assert_eq!("American", decoded.gazetteer[0].phrase);
    }
}
