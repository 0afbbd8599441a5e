//! Trains a small network on two synthetic clusters, reshuffling the samples every epoch.
//!
//! Run with `RUST_LOG=info cargo run -p gradnet-data --example toy_classifier`.
//! Settings come from `GRADNET_*` environment variables (see `TrainConfig::from_env`).

use gradnet_core::nn::{Mlp, MlpConfig};
use gradnet_core::train::{evaluate, train_epoch, TrainConfig};
use gradnet_data::datasets::toy::two_blobs;
use gradnet_data::{Dataset, RandomSampler, Sampler};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::error::Error;

const PER_CLASS: usize = 200;
const SPREAD: f64 = 0.08;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let config = TrainConfig::from_env()?;
    let mut rng = StdRng::seed_from_u64(config.seed);

    let train_set = two_blobs(&mut rng, PER_CLASS, SPREAD)?;
    let test_set = two_blobs(&mut rng, PER_CLASS / 4, SPREAD)?;
    let train = match config.sample_limit {
        Some(limit) => &train_set.as_slice()[..limit.min(train_set.len())],
        None => train_set.as_slice(),
    };

    let mlp_config = MlpConfig::new(2, config.layer_sizes(2));
    let mut model = Mlp::build(&mlp_config, &mut rng)?;
    let mut sampler = RandomSampler::shuffled(StdRng::seed_from_u64(config.seed.wrapping_add(1)));

    for epoch in 0..config.epochs {
        let order = sampler.indices(train.len());
        let stats = train_epoch(&mut model, train, order, epoch, config.learning_rate)?;
        info!(
            "Epoch: {} {:.6} {}/{} {:.6}",
            epoch,
            stats.average_cost,
            stats.correct,
            stats.total,
            stats.accuracy()
        );
    }

    let result = evaluate(&mut model, test_set.as_slice())?;
    println!(
        "Test: cost {:.6}, accuracy {}/{} ({:.2}%)",
        result.average_cost,
        result.correct,
        result.total,
        100.0 * result.accuracy()
    );
    Ok(())
}
