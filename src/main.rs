use std::path::PathBuf;

use anyhow::{anyhow, Context};
use chrono::Local;
use clap::Parser;
use log::debug;
use rand::{rngs::StdRng, SeedableRng};

use lexseed::{
    generator::{Generator, GeneratorConfig, RunOptions},
    report::{render, render_words_found, Report},
    store::Store,
};

/// Fill a LexRain database with 30 days of synthetic review history.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Database file with existing `words` and `review_history` tables.
    #[arg(long, default_value = "lexrain.db")]
    database: PathBuf,

    /// Seed the random generator for a reproducible batch.
    #[arg(long)]
    seed: Option<u64>,

    /// Delete existing review history before generating.
    #[arg(long)]
    reset: bool,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    let mut rng = args
        .seed
        .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);

    let store = Store::open(&args.database)
        .map_err(|err| anyhow!(err))
        .context("Failed to open database")?;
    let generator = Generator::new(GeneratorConfig::default()).map_err(|err| anyhow!(err))?;

    let word_ids = store
        .word_ids()
        .map_err(|err| anyhow!(err))
        .context("Failed to read words")?;
    print!("{}", render_words_found(word_ids.len(), args.json));
    if word_ids.is_empty() {
        return Ok(());
    }

    let outcome = generator
        .run_with_words(
            &store,
            &word_ids,
            RunOptions { reset: args.reset },
            Local::now().naive_local(),
            &mut rng,
        )
        .map_err(|err| anyhow!(err))
        .context("Failed to generate review history")?;
    debug!("{outcome:?}");

    let report = Report::collect(&store)
        .map_err(|err| anyhow!(err))
        .context("Failed to collect statistics")?;
    print!("{}", render(&report, args.json).map_err(|err| anyhow!(err))?);

    Ok(())
}
