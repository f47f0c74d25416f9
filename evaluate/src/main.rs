use std::fs::File;
use std::io::{prelude::*, stdin};
use std::path::PathBuf;
use std::str::FromStr;

use clap::Parser;
use verdetto::{classify, Analyzer, Label, LexiconModel, Model, Predictor};

#[derive(Debug, Clone, Copy)]
struct GoldLabel(Label);

impl FromStr for GoldLabel {
    type Err = &'static str;
    fn from_str(label: &str) -> Result<Self, Self::Err> {
        match label {
            "fact" => Ok(Self(Label::Fact)),
            "opinion" => Ok(Self(Label::Opinion)),
            _ => Err("Could not parse a label value"),
        }
    }
}

// Confusion counts with opinion as the positive class.
#[derive(Debug, Default, PartialEq, Eq)]
struct Confusion {
    n_tp: usize,
    n_tn: usize,
    n_fp: usize,
    n_fn: usize,
}

impl Confusion {
    fn add(&mut self, reference: Label, hypothesis: Label) {
        match (reference, hypothesis) {
            (Label::Opinion, Label::Opinion) => self.n_tp += 1,
            (Label::Fact, Label::Fact) => self.n_tn += 1,
            (Label::Fact, Label::Opinion) => self.n_fp += 1,
            (Label::Opinion, Label::Fact) => self.n_fn += 1,
        }
    }

    fn precision(&self) -> f64 {
        self.n_tp as f64 / (self.n_tp + self.n_fp) as f64
    }

    fn recall(&self) -> f64 {
        self.n_tp as f64 / (self.n_tp + self.n_fn) as f64
    }

    fn f1(&self) -> f64 {
        let precision = self.precision();
        let recall = self.recall();
        2. * precision * recall / (precision + recall)
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "evaluate",
    about = "A program to evaluate the accuracy of a fact/opinion classifier."
)]
struct Args {
    /// The lexicon model used to analyze text
    #[arg(long)]
    lexicon: PathBuf,

    /// The classifier model file
    #[arg(long)]
    model: PathBuf,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading model files...");
    let mut f = zstd::Decoder::new(File::open(args.lexicon)?)?;
    let analyzer = Analyzer::new(LexiconModel::read(&mut f)?)?;
    let mut f = zstd::Decoder::new(File::open(args.model)?)?;
    let predictor = Predictor::new(Model::read(&mut f)?)?;

    eprintln!("Start evaluation");

    // Lines are `label<TAB>sentence`.
    let mut confusion = Confusion::default();
    for line in stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let (label, text) = line
            .split_once('\t')
            .ok_or("Each line must be `label<TAB>sentence`")?;
        let GoldLabel(reference) = label.parse()?;
        let hypothesis = classify(&analyzer, &predictor, text)?;
        confusion.add(reference, hypothesis);
    }

    println!("Precision: {}", confusion.precision());
    println!("Recall: {}", confusion.recall());
    println!("F1: {}", confusion.f1());
    println!(
        "TP: {}, TN: {}, FP: {}, FN: {}",
        confusion.n_tp, confusion.n_tn, confusion.n_fp, confusion.n_fn
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gold_label_parsing() {
        assert_eq!(Label::Fact, "fact".parse::<GoldLabel>().unwrap().0);
        assert_eq!(Label::Opinion, "opinion".parse::<GoldLabel>().unwrap().0);
        assert!("FACT".parse::<GoldLabel>().is_err());
    }

    #[test]
    fn test_confusion_tally() {
        // Three opinions found, one missed; two facts kept, one mislabeled.
        let pairs = [
            (Label::Opinion, Label::Opinion),
            (Label::Opinion, Label::Opinion),
            (Label::Opinion, Label::Opinion),
            (Label::Opinion, Label::Fact),
            (Label::Fact, Label::Fact),
            (Label::Fact, Label::Fact),
            (Label::Fact, Label::Opinion),
        ];
        let mut confusion = Confusion::default();
        for (reference, hypothesis) in pairs {
            confusion.add(reference, hypothesis);
        }
        assert_eq!(3, confusion.n_tp);
        assert_eq!(2, confusion.n_tn);
        assert_eq!(1, confusion.n_fp);
        assert_eq!(1, confusion.n_fn);
        assert_eq!(0.75, confusion.precision());
        assert_eq!(0.75, confusion.recall());
        assert_eq!(0.75, confusion.f1());
    }

    #[test]
    fn test_empty_confusion_counts() {
        let confusion = Confusion::default();
        assert_eq!(Confusion::default(), confusion);
        assert_eq!(0, confusion.n_tp + confusion.n_tn + confusion.n_fp + confusion.n_fn);
    }
}
