//! Frozen tag and entity inventories.
//!
//! The orderings below are an external contract: feature vectors are
//! flattened in exactly this order, and classifiers are trained against it.
//! Entries must never be re-sorted, inserted, or removed, or every trained
//! model becomes silently incompatible.

/// Number of fine-grained tag keys, including the two synthetic ones.
pub const N_FINE_TAGS: usize = 60;

/// Number of entity category keys.
pub const N_ENTITY_LABELS: usize = 18;

/// Synthetic tag counting tokens whose surface form is unknown to the lexicon.
pub const OOV: &str = "OOV";

/// Synthetic tag counting tokens that carry only trailing whitespace.
pub const TRAILING_SPACE: &str = "TRAILING_SPACE";

/// Fine-grained part-of-speech tags, OntoNotes style, with the two synthetic
/// tags at the end.
pub const FINE_TAGS: [&str; N_FINE_TAGS] = [
    "-LRB-",
    "-RRB-",
    ",",
    ":",
    ".",
    "''",
    "\"\"",
    "#",
    "``",
    "$",
    "ADD",
    "AFX",
    "BES",
    "CC",
    "CD",
    "DT",
    "EOL",
    "EX",
    "FW",
    "GW",
    "HVS",
    "HYPH",
    "IN",
    "JJ",
    "JJR",
    "JJS",
    "LS",
    "MD",
    "NFP",
    "NIL",
    "NN",
    "NNP",
    "NNPS",
    "NNS",
    "PDT",
    "POS",
    "PRP",
    "PRP$",
    "RB",
    "RBR",
    "RBS",
    "RP",
    "_SP",
    "SP",
    "SYM",
    "TO",
    "UH",
    "VB",
    "VBD",
    "VBG",
    "VBN",
    "VBP",
    "VBZ",
    "WDT",
    "WP",
    "WP$",
    "WRB",
    "XX",
    OOV,
    TRAILING_SPACE,
];

/// Named-entity categories, OntoNotes style.
pub const ENTITY_LABELS: [&str; N_ENTITY_LABELS] = [
    "PERSON",
    "NORP",
    "FAC",
    "ORG",
    "GPE",
    "LOC",
    "PRODUCT",
    "EVENT",
    "WORK_OF_ART",
    "LAW",
    "LANGUAGE",
    "DATE",
    "TIME",
    "PERCENT",
    "MONEY",
    "QUANTITY",
    "ORDINAL",
    "CARDINAL",
];

/// Position of a tag name in [`FINE_TAGS`], or [`None`] for names outside
/// the inventory.
pub fn fine_tag_index(tag: &str) -> Option<usize> {
    FINE_TAGS.iter().position(|&t| t == tag)
}

/// Position of an entity label in [`ENTITY_LABELS`], or [`None`] for labels
/// outside the inventory.
pub fn entity_label_index(label: &str) -> Option<usize> {
    ENTITY_LABELS.iter().position(|&l| l == label)
}
