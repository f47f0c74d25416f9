//! # Verdetto
//!
//! Verdetto labels sentences as facts or opinions from linguistic surface
//! features: per-sentence counts of fine-grained part-of-speech tags and
//! named-entity categories, flattened into a fixed-order feature vector and
//! scored by a pre-trained classifier.
//!
//! ## Examples
//!
//! ```no_run
//! use std::fs::File;
//! use std::io::{prelude::*, stdin};
//!
//! use verdetto::{classify, Analyzer, LexiconModel, Model, Predictor};
//!
//! let mut f = File::open("lexicon.model").unwrap();
//! let analyzer = Analyzer::new(LexiconModel::read(&mut f).unwrap()).unwrap();
//! let mut f = File::open("svm_classifier.model").unwrap();
//! let predictor = Predictor::new(Model::read(&mut f).unwrap()).unwrap();
//!
//! for line in stdin().lock().lines() {
//!     let line = line.unwrap();
//!     let label = classify(&analyzer, &predictor, &line).unwrap();
//!     println!("{}", label.verdict(&line));
//! }
//! ```

mod analyzer;
mod errors;
mod feature;
mod lexicon_model;
mod model;
mod predictor;
mod sentence;
mod tag_set;

pub use analyzer::Analyzer;
pub use errors::{Result, VerdettoError};
pub use feature::{
    count_entities, count_fine_grained_tags, EntityCountMap, FeatureVector, TagCountMap,
    FEATURE_DIM,
};
pub use lexicon_model::{GazetteerEntry, LexiconModel, WordEntry};
pub use model::{Activation, Classifier, DenseLayer, Model, Tree, TreeNode};
pub use predictor::{classify, Label, Predictor};
pub use sentence::{Entity, Sentence, Token};
pub use tag_set::{
    ENTITY_LABELS, FINE_TAGS, N_ENTITY_LABELS, N_FINE_TAGS, OOV, TRAILING_SPACE,
};
