use std::io::{Read, Write};

use bincode::{Decode, Encode};

use crate::errors::Result;

/// Activation function of a dense layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Decode, Encode)]
pub enum Activation {
    /// Passes values through unchanged. Used for output layers.
    Identity,

    /// Rectified linear unit: negative values are clamped to zero.
    Relu,
}

/// Dense layer of a feed-forward network, stored as a row-major
/// `rows x cols` weight matrix plus one bias per row.
#[derive(Debug, Clone, Decode, Encode)]
pub struct DenseLayer {
    pub(crate) rows: u32,
    pub(crate) cols: u32,
    pub(crate) weights: Vec<f64>,
    pub(crate) biases: Vec<f64>,
    pub(crate) activation: Activation,
}

impl DenseLayer {
    /// Creates a layer. Weight and bias lengths are validated when the
    /// model is compiled into a [`Predictor`].
    ///
    /// [`Predictor`]: crate::Predictor
    pub fn new(
        rows: u32,
        cols: u32,
        weights: Vec<f64>,
        biases: Vec<f64>,
        activation: Activation,
    ) -> Self {
        Self {
            rows,
            cols,
            weights,
            biases,
            activation,
        }
    }
}

/// Node of a decision tree, stored in a flat array.
///
/// Child links must point forward in the array so that a walk from the root
/// always terminates.
#[derive(Debug, Clone, Decode, Encode)]
pub enum TreeNode {
    /// Branches on one feature: `left` if its value is at most `threshold`,
    /// `right` otherwise.
    Split {
        feature: u32,
        threshold: f64,
        left: u32,
        right: u32,
    },

    /// Terminal class decision, 0 or 1.
    Leaf { label: u8 },
}

/// Decision tree with the root at node 0.
#[derive(Debug, Clone, Decode, Encode)]
pub struct Tree {
    pub(crate) nodes: Vec<TreeNode>,
}

impl Tree {
    /// Creates a tree from its node array.
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }
}

/// Classifier weights, one of three trained-elsewhere model families.
///
/// A raw score at or above zero means class 1; majority voting applies to
/// forests, with ties broken toward class 0.
#[derive(Debug, Clone, Decode, Encode)]
pub enum Classifier {
    /// Linear decision function over the feature vector. Covers both the
    /// support-vector and logistic-regression trainings.
    Linear { weights: Vec<f64>, bias: f64 },

    /// Majority vote over decision trees.
    RandomForest { trees: Vec<Tree> },

    /// Feed-forward network ending in a single output score.
    NeuralNet { layers: Vec<DenseLayer> },
}

/// Classifier model data.
#[derive(Debug, Clone, Decode, Encode)]
pub struct Model {
    pub(crate) classifier: Classifier,
}

impl Model {
    /// Creates a linear model.
    pub fn linear(weights: Vec<f64>, bias: f64) -> Self {
        Self {
            classifier: Classifier::Linear { weights, bias },
        }
    }

    /// Creates a random-forest model.
    pub fn random_forest(trees: Vec<Tree>) -> Self {
        Self {
            classifier: Classifier::RandomForest { trees },
        }
    }

    /// Creates a feed-forward network model.
    pub fn neural_net(layers: Vec<DenseLayer>) -> Self {
        Self {
            classifier: Classifier::NeuralNet { layers },
        }
    }

    /// Exports the model data.
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

    /// Creates a model from a reader.
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
