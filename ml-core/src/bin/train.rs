//! Train a categorization model from a labelled CSV and write the artifact

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use txn_ml_core::constants::{self, DEFAULT_MAX_FEATURES, DEFAULT_MAX_ITER, DEFAULT_RANDOM_SEED, DEFAULT_TEST_SIZE};
use txn_ml_core::features::VectorizerConfig;
use txn_ml_core::training::{self, ClassifierConfig, Trainer, TrainingConfig};

#[derive(Debug, Parser)]
#[command(name = "train", version, about = "Train the transaction categorization model")]
struct Args {
    /// Labelled CSV (columns: date, description, amount, type, category)
    #[arg(long, default_value_t = constants::get_train_data_path())]
    data: String,

    /// Where to write the model artifact
    #[arg(long, default_value_t = constants::get_model_path())]
    output: String,

    #[arg(long, default_value_t = DEFAULT_MAX_FEATURES)]
    max_features: usize,

    #[arg(long, default_value_t = DEFAULT_MAX_ITER)]
    max_iter: usize,

    /// Held-out fraction for evaluation; 0 disables the split
    #[arg(long, default_value_t = DEFAULT_TEST_SIZE)]
    test_size: f64,

    #[arg(long, default_value_t = DEFAULT_RANDOM_SEED)]
    seed: u64,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let data = PathBuf::from(&args.data);
    let output = PathBuf::from(&args.output);

    let examples = training::load_csv(&data)
        .with_context(|| format!("failed to load training data from {}", data.display()))?;
    log::info!("Loaded {} examples from {}", examples.len(), data.display());

    let config = TrainingConfig {
        vectorizer: VectorizerConfig {
            max_features: args.max_features,
            ..Default::default()
        },
        classifier: ClassifierConfig {
            max_iter: args.max_iter,
            ..Default::default()
        },
        test_size: args.test_size,
        seed: args.seed,
        ..Default::default()
    };

    let outcome = Trainer::new(config).train(&examples).context("training failed")?;
    println!("{}", outcome.evaluation);

    outcome
        .artifact
        .save(&output)
        .with_context(|| format!("failed to write model to {}", output.display()))?;

    log::info!(
        "Model {} saved to {} ({} terms, {} categories)",
        outcome.artifact.model_id,
        output.display(),
        outcome.artifact.vectorizer.len(),
        outcome.artifact.categories().len()
    );

    Ok(())
}
