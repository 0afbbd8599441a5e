//! Trains the 784-30-10 digit classifier on MNIST.
//!
//! Usage: `cargo run --release -p gradnet-data --example mnist_mlp -- [MNIST_DIR]`
//! (defaults to `mnist`). The directory must hold the four uncompressed IDX files.

use gradnet_core::nn::{Mlp, MlpConfig};
use gradnet_core::train::{evaluate, TrainConfig, Trainer};
use gradnet_data::datasets::mnist::{self, MnistSplit};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("mnist"));
    let config = TrainConfig::from_env()?;

    let train = mnist::load_split(&dir, MnistSplit::Train)?;
    let test = mnist::load_split(&dir, MnistSplit::Test)?;

    let mut rng = StdRng::seed_from_u64(config.seed);
    let mlp_config = MlpConfig::new(mnist::NUM_FEATURES, config.layer_sizes(mnist::NUM_CLASSES));
    let mut model = Mlp::build(&mlp_config, &mut rng)?;

    let mut trainer = Trainer::new(config)?;
    trainer.fit(&mut model, train.as_slice())?;

    let result = evaluate(&mut model, test.as_slice())?;
    info!(
        "Test: {} {:.6} {}/{} {:.6}",
        test.as_slice().len(),
        result.average_cost,
        result.correct,
        result.total,
        result.accuracy()
    );
    Ok(())
}
