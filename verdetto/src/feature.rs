//! Feature extraction: fixed-key count maps over tags and entities, and
//! their flattening into the classifier input vector.

use crate::errors::{Result, VerdettoError};
use crate::sentence::Sentence;
use crate::tag_set::{
    entity_label_index, fine_tag_index, N_ENTITY_LABELS, N_FINE_TAGS, OOV, TRAILING_SPACE,
};

/// Dimension of the classifier input vector: entity counts followed by tag
/// counts.
pub const FEATURE_DIM: usize = N_ENTITY_LABELS + N_FINE_TAGS;

/// Counts of fine-grained tags over one sentence.
///
/// All keys of the frozen tag inventory are always present and start at
/// zero; only exact name matches increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagCountMap {
    counts: [u32; N_FINE_TAGS],
}

impl Default for TagCountMap {
    fn default() -> Self {
        Self {
            counts: [0; N_FINE_TAGS],
        }
    }
}

impl TagCountMap {
    /// Creates a zeroed map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count of a tag name.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidArgument`] is returned if the name is outside
    /// the tag inventory.
    pub fn increment(&mut self, tag: &str) -> Result<()> {
        let idx = fine_tag_index(tag)
            .ok_or_else(|| VerdettoError::invalid_argument("tag", format!("unknown tag: {tag}")))?;
        self.counts[idx] += 1;
        Ok(())
    }

    /// Gets the count of a tag name, or [`None`] for names outside the
    /// inventory.
    pub fn get(&self, tag: &str) -> Option<u32> {
        fine_tag_index(tag).map(|idx| self.counts[idx])
    }

    /// Gets the counts in inventory order.
    pub fn counts(&self) -> &[u32; N_FINE_TAGS] {
        &self.counts
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Counts of named-entity categories over one sentence, with the same
/// fixed-key contract as [`TagCountMap`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCountMap {
    counts: [u32; N_ENTITY_LABELS],
}

impl Default for EntityCountMap {
    fn default() -> Self {
        Self {
            counts: [0; N_ENTITY_LABELS],
        }
    }
}

impl EntityCountMap {
    /// Creates a zeroed map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increments the count of an entity label.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidArgument`] is returned if the label is
    /// outside the entity inventory.
    pub fn increment(&mut self, label: &str) -> Result<()> {
        let idx = entity_label_index(label).ok_or_else(|| {
            VerdettoError::invalid_argument("label", format!("unknown entity label: {label}"))
        })?;
        self.counts[idx] += 1;
        Ok(())
    }

    /// Gets the count of an entity label, or [`None`] for labels outside the
    /// inventory.
    pub fn get(&self, label: &str) -> Option<u32> {
        entity_label_index(label).map(|idx| self.counts[idx])
    }

    /// Gets the counts in inventory order.
    pub fn counts(&self) -> &[u32; N_ENTITY_LABELS] {
        &self.counts
    }

    /// Sum of all counts.
    pub fn total(&self) -> u32 {
        self.counts.iter().sum()
    }
}

/// Counts the fine-grained tags of a sentence.
///
/// Out-of-vocabulary tokens count under `OOV` whatever their tag says, and
/// tokens carrying the empty tag count under `TRAILING_SPACE`; every other
/// token counts under its literal tag name.
///
/// # Errors
///
/// [`VerdettoError::InvalidArgument`] is returned if a token carries a tag
/// name outside the inventory.
pub fn count_fine_grained_tags(sentence: &Sentence) -> Result<TagCountMap> {
    let mut counts = TagCountMap::new();
    for token in sentence.tokens() {
        if token.is_oov() {
            counts.increment(OOV)?;
        } else if token.tag().is_empty() {
            counts.increment(TRAILING_SPACE)?;
        } else {
            counts.increment(token.tag())?;
        }
    }
    Ok(counts)
}

/// Counts the entity annotations of a sentence by category.
///
/// # Errors
///
/// [`VerdettoError::InvalidArgument`] is returned if an entity carries a
/// label outside the inventory.
pub fn count_entities(sentence: &Sentence) -> Result<EntityCountMap> {
    let mut counts = EntityCountMap::new();
    for entity in sentence.entities() {
        counts.increment(entity.label())?;
    }
    Ok(counts)
}

/// Classifier input vector: the entity counts followed by the tag counts,
/// flattened in frozen inventory order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIM],
}

impl FeatureVector {
    /// Merges an entity count map and a tag count map into one vector.
    pub fn from_counts(entities: &EntityCountMap, tags: &TagCountMap) -> Self {
        let mut values = [0.0; FEATURE_DIM];
        for (v, &c) in values.iter_mut().zip(entities.counts()) {
            *v = f64::from(c);
        }
        for (v, &c) in values[N_ENTITY_LABELS..].iter_mut().zip(tags.counts()) {
            *v = f64::from(c);
        }
        Self { values }
    }

    /// Gets the vector values.
    pub fn values(&self) -> &[f64; FEATURE_DIM] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::sentence::{Entity, Token};

    fn sentence() -> Sentence {
        let tokens = vec![
            Token::new("Donuts", "NNS", false),
            Token::new("are", "VBP", false),
            Token::new("amazing", "JJ", false),
            Token::new("frobnicatory", "", true),
            Token::new(".", ".", false),
            Token::new("  ", "", false),
        ];
        let entities = vec![Entity::new(0, 6, "PRODUCT"), Entity::new(8, 11, "DATE")];
        Sentence::new("unused".to_string(), tokens, entities)
    }

    #[test]
    fn test_tag_counts_sum_to_token_count() {
        let s = sentence();
        let tags = count_fine_grained_tags(&s).unwrap();
        assert_eq!(s.tokens().len() as u32, tags.total());
    }

    #[test]
    fn test_tag_count_policy() {
        let tags = count_fine_grained_tags(&sentence()).unwrap();
        assert_eq!(Some(1), tags.get("NNS"));
        assert_eq!(Some(1), tags.get("VBP"));
        assert_eq!(Some(1), tags.get("JJ"));
        assert_eq!(Some(1), tags.get("."));
        assert_eq!(Some(1), tags.get(OOV));
        assert_eq!(Some(1), tags.get(TRAILING_SPACE));
        assert_eq!(Some(0), tags.get("NN"));
    }

    #[test]
    fn test_unknown_tag_is_an_error() {
        let mut tags = TagCountMap::new();
        assert!(tags.increment("NNS").is_ok());
        assert!(tags.increment("PLURAL_NOUN").is_err());
        let s = Sentence::new(
            "x".to_string(),
            vec![Token::new("x", "PLURAL_NOUN", false)],
            vec![],
        );
        assert!(count_fine_grained_tags(&s).is_err());
    }

    #[test]
    fn test_entity_count_policy() {
        let entities = count_entities(&sentence()).unwrap();
        assert_eq!(Some(1), entities.get("PRODUCT"));
        assert_eq!(Some(1), entities.get("DATE"));
        assert_eq!(Some(0), entities.get("PERSON"));
        assert_eq!(2, entities.total());
    }

    #[test]
    fn test_unknown_entity_label_is_an_error() {
        let mut entities = EntityCountMap::new();
        assert!(entities.increment("ANIMAL").is_err());
    }

    #[test]
    fn test_feature_vector_layout() {
        let s = sentence();
        let entities = count_entities(&s).unwrap();
        let tags = count_fine_grained_tags(&s).unwrap();
        let features = FeatureVector::from_counts(&entities, &tags);
        assert_eq!(FEATURE_DIM, features.values().len());
        assert_eq!(78, FEATURE_DIM);
        // Entity block first: PRODUCT is the 7th entity label.
        assert_eq!(1.0, features.values()[6]);
        // Tag block second: NNS is the 34th tag.
        assert_eq!(1.0, features.values()[N_ENTITY_LABELS + 33]);
    }

    #[test]
    fn test_feature_vector_zero_default() {
        let features = FeatureVector::from_counts(&EntityCountMap::new(), &TagCountMap::new());
        assert!(features.values().iter().all(|&v| v == 0.0));
    }
}
