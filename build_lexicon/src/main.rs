use std::fs;
use std::path::PathBuf;

use clap::Parser;
use serde::{Deserialize, Serialize};
use verdetto::{GazetteerEntry, LexiconModel, WordEntry};

#[derive(Parser, Debug)]
#[command(
    name = "build_lexicon",
    about = "A program to compile word and gazetteer lists into a lexicon model."
)]
struct Args {
    /// CSV file of `word,tag` rows
    #[arg(long)]
    tags: PathBuf,

    /// CSV file of `phrase,label` rows
    #[arg(long)]
    entities: PathBuf,

    /// Output path of the lexicon model file
    #[arg(long)]
    output: PathBuf,
}

#[derive(Deserialize, Serialize)]
struct TagRecord {
    word: String,
    tag: String,
}

#[derive(Deserialize, Serialize)]
struct EntityRecord {
    phrase: String,
    label: String,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Loading word list...");
    let mut rdr = csv::Reader::from_reader(fs::File::open(args.tags)?);
    let mut words = vec![];
    for result in rdr.deserialize() {
        let record: TagRecord = result?;
        words.push(WordEntry::new(record.word, &record.tag)?);
    }

    eprintln!("Loading gazetteer...");
    let mut rdr = csv::Reader::from_reader(fs::File::open(args.entities)?);
    let mut gazetteer = vec![];
    for result in rdr.deserialize() {
        let record: EntityRecord = result?;
        gazetteer.push(GazetteerEntry::new(record.phrase, &record.label)?);
    }

    eprintln!("Saving lexicon file...");
    let model = LexiconModel::new(words, gazetteer);
    let mut f = zstd::Encoder::new(fs::File::create(args.output)?, 19)?;
    model.write(&mut f)?;
    f.finish()?;

    Ok(())
}
