use crate::analyzer::Analyzer;
use crate::errors::{Result, VerdettoError};
use crate::feature::{count_entities, count_fine_grained_tags, FeatureVector, FEATURE_DIM};
use crate::model::{Activation, Classifier, DenseLayer, Model, Tree, TreeNode};

/// Class decided by a classifier.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
#[repr(u8)]
pub enum Label {
    /// Class 0: the sentence states a fact.
    Fact = 0,

    /// Class 1: the sentence expresses an opinion.
    Opinion = 1,
}

impl Label {
    /// Renders the human-readable verdict for a scored text.
    ///
    /// # Examples
    ///
    /// ```
    /// use verdetto::Label;
    ///
    /// let v = Label::Fact.verdict("Donuts are fried.");
    /// assert_eq!("Your sentence: \"Donuts are fried.\" is a FACT!", v);
    /// ```
    pub fn verdict(&self, text: &str) -> String {
        match self {
            Self::Fact => format!("Your sentence: \"{text}\" is a FACT!"),
            Self::Opinion => format!("Your sentence: \"{text}\" is an OPINION!"),
        }
    }

    fn from_score(score: f64) -> Self {
        if score >= 0.0 {
            Self::Opinion
        } else {
            Self::Fact
        }
    }
}

/// Predictor.
///
/// Compiling a [`Model`] into a predictor validates its shape against the
/// feature contract once, so that inference itself cannot fail.
pub struct Predictor {
    classifier: Classifier,
}

impl Predictor {
    /// Creates a new predictor.
    ///
    /// # Errors
    ///
    /// [`VerdettoError::InvalidModel`] is returned if the model shape does
    /// not fit a `FEATURE_DIM`-length input with a binary output.
    pub fn new(model: Model) -> Result<Self> {
        match &model.classifier {
            Classifier::Linear { weights, .. } => {
                if weights.len() != FEATURE_DIM {
                    return Err(VerdettoError::invalid_model(format!(
                        "expected {} linear weights, got {}",
                        FEATURE_DIM,
                        weights.len(),
                    )));
                }
            }
            Classifier::RandomForest { trees } => {
                if trees.is_empty() {
                    return Err(VerdettoError::invalid_model("forest has no trees"));
                }
                for tree in trees {
                    Self::validate_tree(tree)?;
                }
            }
            Classifier::NeuralNet { layers } => {
                Self::validate_layers(layers)?;
            }
        }
        Ok(Self {
            classifier: model.classifier,
        })
    }

    fn validate_tree(tree: &Tree) -> Result<()> {
        if tree.nodes.is_empty() {
            return Err(VerdettoError::invalid_model("tree has no nodes"));
        }
        for (i, node) in tree.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    left,
                    right,
                    ..
                } => {
                    if feature as usize >= FEATURE_DIM {
                        return Err(VerdettoError::invalid_model(format!(
                            "split on feature {feature} out of range",
                        )));
                    }
                    // Forward links guarantee the walk terminates.
                    if left as usize <= i
                        || right as usize <= i
                        || left as usize >= tree.nodes.len()
                        || right as usize >= tree.nodes.len()
                    {
                        return Err(VerdettoError::invalid_model(format!(
                            "invalid child links at node {i}",
                        )));
                    }
                }
                TreeNode::Leaf { label } => {
                    if label > 1 {
                        return Err(VerdettoError::invalid_model(format!(
                            "leaf label {label} is not binary",
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_layers(layers: &[DenseLayer]) -> Result<()> {
        if layers.is_empty() {
            return Err(VerdettoError::invalid_model("network has no layers"));
        }
        let mut input_dim = FEATURE_DIM;
        for (i, layer) in layers.iter().enumerate() {
            let rows = layer.rows as usize;
            let cols = layer.cols as usize;
            if cols != input_dim {
                return Err(VerdettoError::invalid_model(format!(
                    "layer {i} expects {cols} inputs, got {input_dim}",
                )));
            }
            if layer.weights.len() != rows * cols || layer.biases.len() != rows {
                return Err(VerdettoError::invalid_model(format!(
                    "layer {i} weight shape mismatch",
                )));
            }
            input_dim = rows;
        }
        if input_dim != 1 {
            return Err(VerdettoError::invalid_model(format!(
                "network must end in one output, got {input_dim}",
            )));
        }
        Ok(())
    }

    /// Predicts the class of a feature vector.
    ///
    /// Deterministic for a fixed model and input.
    pub fn predict(&self, features: &FeatureVector) -> Label {
        let x = features.values();
        match &self.classifier {
            Classifier::Linear { weights, bias } => {
                let score: f64 = weights.iter().zip(x).map(|(w, v)| w * v).sum::<f64>() + bias;
                Label::from_score(score)
            }
            Classifier::RandomForest { trees } => {
                let votes = trees.iter().filter(|t| Self::tree_class(t, x) == 1).count();
                // Ties go to class 0.
                if votes * 2 > trees.len() {
                    Label::Opinion
                } else {
                    Label::Fact
                }
            }
            Classifier::NeuralNet { layers } => {
                let mut values = x.to_vec();
                for layer in layers {
                    values = Self::forward(layer, &values);
                }
                Label::from_score(values[0])
            }
        }
    }

    fn tree_class(tree: &Tree, x: &[f64; FEATURE_DIM]) -> u8 {
        let mut i = 0;
        loop {
            match tree.nodes[i] {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    i = if x[feature as usize] <= threshold {
                        left as usize
                    } else {
                        right as usize
                    };
                }
                TreeNode::Leaf { label } => return label,
            }
        }
    }

    fn forward(layer: &DenseLayer, input: &[f64]) -> Vec<f64> {
        let cols = layer.cols as usize;
        let mut output = Vec::with_capacity(layer.rows as usize);
        for (r, &bias) in layer.biases.iter().enumerate() {
            let row = &layer.weights[r * cols..(r + 1) * cols];
            let mut y: f64 = row.iter().zip(input).map(|(w, v)| w * v).sum::<f64>() + bias;
            if layer.activation == Activation::Relu && y < 0.0 {
                y = 0.0;
            }
            output.push(y);
        }
        output
    }
}

/// Runs the whole pipeline on a raw text: analysis, feature extraction, and
/// inference.
///
/// Only the first sentence of the text is scored; any remaining sentences
/// are silently dropped.
///
/// # Errors
///
/// Analysis and counting errors are returned as is.
pub fn classify(analyzer: &Analyzer, predictor: &Predictor, text: &str) -> Result<Label> {
    let sentences = analyzer.analyze(text)?;
    let sentence = &sentences[0];
    let entities = count_entities(sentence)?;
    let tags = count_fine_grained_tags(sentence)?;
    let features = FeatureVector::from_counts(&entities, &tags);
    Ok(predictor.predict(&features))
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::feature::{EntityCountMap, TagCountMap};
    use crate::lexicon_model::{LexiconModel, WordEntry};

    fn features_with_tags(tags: &[&str]) -> FeatureVector {
        let mut tag_counts = TagCountMap::new();
        for tag in tags {
            tag_counts.increment(tag).unwrap();
        }
        FeatureVector::from_counts(&EntityCountMap::new(), &tag_counts)
    }

    // Index of a tag inside the feature vector.
    fn tag_feature(tag: &str) -> u32 {
        (crate::tag_set::fine_tag_index(tag).unwrap() + crate::tag_set::N_ENTITY_LABELS) as u32
    }

    #[test]
    fn test_linear_prediction() {
        let mut weights = vec![0.0; FEATURE_DIM];
        // One adjective outweighs the bias; plain nouns do not.
        weights[tag_feature("JJ") as usize] = 2.0;
        let predictor = Predictor::new(Model::linear(weights, -1.0)).unwrap();

        let opinionated = features_with_tags(&["NNS", "VBP", "JJ"]);
        assert_eq!(Label::Opinion, predictor.predict(&opinionated));
        let plain = features_with_tags(&["NNS", "VBP", "NN"]);
        assert_eq!(Label::Fact, predictor.predict(&plain));
    }

    #[test]
    fn test_linear_rejects_wrong_dimension() {
        assert!(Predictor::new(Model::linear(vec![0.0; 10], 0.0)).is_err());
    }

    fn adjective_stump() -> Tree {
        Tree::new(vec![
            TreeNode::Split {
                feature: tag_feature("JJ"),
                threshold: 0.5,
                left: 1,
                right: 2,
            },
            TreeNode::Leaf { label: 0 },
            TreeNode::Leaf { label: 1 },
        ])
    }

    #[test]
    fn test_forest_majority_vote() {
        let always_fact = Tree::new(vec![TreeNode::Leaf { label: 0 }]);
        let predictor = Predictor::new(Model::random_forest(vec![
            adjective_stump(),
            adjective_stump(),
            always_fact,
        ]))
        .unwrap();

        let opinionated = features_with_tags(&["JJ"]);
        assert_eq!(Label::Opinion, predictor.predict(&opinionated));
        let plain = features_with_tags(&["NN"]);
        assert_eq!(Label::Fact, predictor.predict(&plain));
    }

    #[test]
    fn test_forest_tie_breaks_toward_fact() {
        let always_fact = Tree::new(vec![TreeNode::Leaf { label: 0 }]);
        let always_opinion = Tree::new(vec![TreeNode::Leaf { label: 1 }]);
        let predictor =
            Predictor::new(Model::random_forest(vec![always_fact, always_opinion])).unwrap();
        let features = features_with_tags(&["NN"]);
        assert_eq!(Label::Fact, predictor.predict(&features));
    }

    #[test]
    fn test_forest_rejects_backward_links() {
        let looping = Tree::new(vec![TreeNode::Split {
            feature: 0,
            threshold: 0.0,
            left: 0,
            right: 0,
        }]);
        assert!(Predictor::new(Model::random_forest(vec![looping])).is_err());
    }

    #[test]
    fn test_network_prediction() {
        // One hidden unit firing on adjectives, then a positive readout
        // with a negative bias.
        let mut hidden = vec![0.0; FEATURE_DIM];
        hidden[tag_feature("JJ") as usize] = 1.0;
        let layers = vec![
            DenseLayer::new(1, FEATURE_DIM as u32, hidden, vec![0.0], Activation::Relu),
            DenseLayer::new(1, 1, vec![2.0], vec![-1.0], Activation::Identity),
        ];
        let predictor = Predictor::new(Model::neural_net(layers)).unwrap();

        let opinionated = features_with_tags(&["JJ"]);
        assert_eq!(Label::Opinion, predictor.predict(&opinionated));
        let plain = features_with_tags(&["NN", "VBZ"]);
        assert_eq!(Label::Fact, predictor.predict(&plain));
    }

    #[test]
    fn test_network_rejects_broken_chain() {
        let layers = vec![
            DenseLayer::new(
                4,
                FEATURE_DIM as u32,
                vec![0.0; 4 * FEATURE_DIM],
                vec![0.0; 4],
                Activation::Relu,
            ),
            DenseLayer::new(1, 3, vec![0.0; 3], vec![0.0], Activation::Identity),
        ];
        assert!(Predictor::new(Model::neural_net(layers)).is_err());
    }

    #[test]
    fn test_network_must_end_in_one_output() {
        let layers = vec![DenseLayer::new(
            2,
            FEATURE_DIM as u32,
            vec![0.0; 2 * FEATURE_DIM],
            vec![0.0; 2],
            Activation::Identity,
        )];
        assert!(Predictor::new(Model::neural_net(layers)).is_err());
    }

    #[test]
    fn test_verdict_strings() {
        let text = "Donuts are a kind of ring-shaped, deep fried dessert.";
        assert_eq!(
            format!("Your sentence: \"{text}\" is a FACT!"),
            Label::Fact.verdict(text),
        );
        assert_eq!(
            format!("Your sentence: \"{text}\" is an OPINION!"),
            Label::Opinion.verdict(text),
        );
    }

    #[test]
    fn test_classify_scores_first_sentence_only() {
        let words = [
            ("donuts", "NNS"),
            ("are", "VBP"),
            ("amazing", "JJ"),
            ("fried", "VBN"),
        ]
        .iter()
        .map(|&(w, t)| WordEntry::new(w, t).unwrap())
        .collect();
        let analyzer = Analyzer::new(LexiconModel::new(words, vec![])).unwrap();

        let mut weights = vec![0.0; FEATURE_DIM];
        weights[tag_feature("JJ") as usize] = 1.0;
        let predictor = Predictor::new(Model::linear(weights, -0.5)).unwrap();

        // The adjective lives in the second sentence, which must be ignored.
        let label = classify(&analyzer, &predictor, "Donuts are fried. Donuts are amazing.");
        assert_eq!(Label::Fact, label.unwrap());
        let label = classify(&analyzer, &predictor, "Donuts are amazing. Donuts are fried.");
        assert_eq!(Label::Opinion, label.unwrap());
    }

    #[test]
    fn test_classify_is_deterministic() {
        let analyzer = Analyzer::new(LexiconModel::new(
            vec![WordEntry::new("donuts", "NNS").unwrap()],
            vec![],
        ))
        .unwrap();
        let predictor = Predictor::new(Model::linear(vec![0.1; FEATURE_DIM], 0.0)).unwrap();
        let text = "Donuts are a kind of ring-shaped, deep fried dessert.";
        let first = classify(&analyzer, &predictor, text).unwrap();
        for _ in 0..5 {
            assert_eq!(first, classify(&analyzer, &predictor, text).unwrap());
        }
        let verdict = first.verdict(text);
        assert!(verdict.ends_with("is a FACT!") || verdict.ends_with("is an OPINION!"));
    }
}
