use std::fs::File;
use std::path::Path;

use verdetto::{classify, Analyzer, LexiconModel, Model, Predictor};

fn load_predictor<P>(path: P) -> Result<Predictor, Box<dyn std::error::Error>>
where
    P: AsRef<Path>,
{
    let mut f = zstd::Decoder::new(File::open(path)?)?;
    Ok(Predictor::new(Model::read(&mut f)?)?)
}

fn sample(
    analyzer: &Analyzer,
    predictor: &Predictor,
    test_sent: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let label = classify(analyzer, predictor, test_sent)?;
    println!("{}", label.verdict(test_sent));
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("Loading model files...");
    let mut f = zstd::Decoder::new(File::open("models/lexicon.model.zst")?)?;
    let analyzer = Analyzer::new(LexiconModel::read(&mut f)?)?;

    let rf_classifier = load_predictor("models/rf_classifier.model.zst")?;
    let svm_classifier = load_predictor("models/svm_classifier.model.zst")?;
    let lr_classifier = load_predictor("models/lr_classifier.model.zst")?;
    let nn_classifier = load_predictor("models/nn_classifier.model.zst")?;

    // A bunch of checks with different classifiers and sentences.
    sample(
        &analyzer,
        &rf_classifier,
        "As far as I am concerned, donuts are amazing.",
    )?;
    sample(
        &analyzer,
        &svm_classifier,
        "Donuts are a kind of ring-shaped, deep fried dessert.",
    )?;
    sample(
        &analyzer,
        &lr_classifier,
        "Doughnut can also be spelled as \"Donut\", which is an American variant of the word.",
    )?;
    sample(
        &analyzer,
        &nn_classifier,
        "This new graphics card I bought recently is pretty amazing, it has no trouble rendering my 3D donuts art in high quality.",
    )?;
    sample(
        &analyzer,
        &nn_classifier,
        "I think this new graphics card is amazing, it has no trouble rendering my 3D donuts art in high quality.",
    )?;

    Ok(())
}
