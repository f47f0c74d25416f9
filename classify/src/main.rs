use std::fs::File;
use std::io::{prelude::*, stdin};
use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;
use verdetto::{classify, Analyzer, LexiconModel, Model, Predictor};

#[derive(Parser, Debug)]
#[command(
    name = "classify",
    about = "A program to label sentences as facts or opinions."
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

    eprintln!("Start classification");
    let mut n_sentences = 0;
    let start = Instant::now();
    for line in stdin().lock().lines() {
        let line = line?;
        if line.is_empty() {
            continue;
        }
        let label = classify(&analyzer, &predictor, &line)?;
        println!("{}", label.verdict(&line));
        n_sentences += 1;
    }
    let duration = start.elapsed();
    eprintln!("Elapsed: {} [sec]", duration.as_secs_f64());
    eprintln!(
        "Speed: {} [sentences/sec]",
        n_sentences as f64 / duration.as_secs_f64()
    );

    Ok(())
}
