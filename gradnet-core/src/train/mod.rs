//! The training driver: per-sample gradient descent over an [`Mlp`].
//!
//! One step is: load the sample, run the forward pass, back-propagate from the cost,
//! update the parameters. Cost and prediction are recorded from the forward pass,
//! before the update.

use crate::error::GradNetError;
use crate::nn::mlp::Mlp;
use log::{debug, info};

pub mod config;

pub use config::TrainConfig;

/// One labelled example: features already scaled for the network's inputs.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub features: Vec<f64>,
    pub label: usize,
}

impl Sample {
    pub fn new(features: Vec<f64>, label: usize) -> Self {
        Sample { features, label }
    }
}

/// Result of a single [`train_step`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepOutcome {
    pub cost: f64,
    pub correct: bool,
}

/// Summary of one epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpochStats {
    pub epoch: usize,
    pub average_cost: f64,
    pub correct: usize,
    pub total: usize,
}

impl EpochStats {
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total)
    }
}

/// Summary of a forward-only pass over a sample set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EvalStats {
    pub average_cost: f64,
    pub correct: usize,
    pub total: usize,
}

impl EvalStats {
    pub fn accuracy(&self) -> f64 {
        ratio(self.correct, self.total)
    }
}

fn ratio(correct: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        correct as f64 / total as f64
    }
}

/// Runs one forward/backward/update cycle on `sample`.
pub fn train_step(
    model: &mut Mlp,
    sample: &Sample,
    learning_rate: f64,
) -> Result<StepOutcome, GradNetError> {
    model.set_sample(&sample.features, sample.label)?;
    let cost_node = model.cost();
    let graph = model.graph_mut();
    graph.evaluate_all();
    graph.backpropagate_from(cost_node)?;

    let cost = model.cost_value()?;
    let correct = model.predicted_label()? == sample.label;
    model.graph_mut().update_parameters(learning_rate);
    Ok(StepOutcome { cost, correct })
}

/// Trains on `samples` once, visiting them in `order` (indices into `samples`).
pub fn train_epoch<I>(
    model: &mut Mlp,
    samples: &[Sample],
    order: I,
    epoch: usize,
    learning_rate: f64,
) -> Result<EpochStats, GradNetError>
where
    I: IntoIterator<Item = usize>,
{
    let mut total_cost = 0.0;
    let mut correct = 0;
    let mut total = 0;
    for index in order {
        let sample = samples.get(index).ok_or(GradNetError::IndexOutOfBounds {
            index,
            len: samples.len(),
        })?;
        let outcome = train_step(model, sample, learning_rate)?;
        total_cost += outcome.cost;
        correct += usize::from(outcome.correct);
        total += 1;
    }
    Ok(EpochStats {
        epoch,
        average_cost: if total == 0 { 0.0 } else { total_cost / total as f64 },
        correct,
        total,
    })
}

/// Forward pass only: average cost and accuracy of `model` on `samples`.
pub fn evaluate(model: &mut Mlp, samples: &[Sample]) -> Result<EvalStats, GradNetError> {
    let mut total_cost = 0.0;
    let mut correct = 0;
    for sample in samples {
        model.set_sample(&sample.features, sample.label)?;
        model.graph_mut().evaluate_all();
        total_cost += model.cost_value()?;
        if model.predicted_label()? == sample.label {
            correct += 1;
        }
    }
    let total = samples.len();
    Ok(EvalStats {
        average_cost: if total == 0 { 0.0 } else { total_cost / total as f64 },
        correct,
        total,
    })
}

/// Runs whole epochs in sample order and keeps their history.
#[derive(Debug, Clone)]
pub struct Trainer {
    config: TrainConfig,
    history: Vec<EpochStats>,
}

impl Trainer {
    pub fn new(config: TrainConfig) -> Result<Self, GradNetError> {
        config.validate()?;
        Ok(Trainer {
            config,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &TrainConfig {
        &self.config
    }

    pub fn history(&self) -> &[EpochStats] {
        &self.history
    }

    /// Trains for `config.epochs` epochs over the first `config.sample_limit` samples.
    ///
    /// Logs one line per epoch at info level and returns the stats of the run.
    pub fn fit(&mut self, model: &mut Mlp, samples: &[Sample]) -> Result<&[EpochStats], GradNetError> {
        let used = match self.config.sample_limit {
            Some(limit) => &samples[..limit.min(samples.len())],
            None => samples,
        };
        debug!(
            "Trainer::fit: {} epoch(s) over {} of {} sample(s), lr {}",
            self.config.epochs,
            used.len(),
            samples.len(),
            self.config.learning_rate
        );

        let start = self.history.len();
        for epoch in 0..self.config.epochs {
            let stats = train_epoch(model, used, 0..used.len(), epoch, self.config.learning_rate)?;
            info!(
                "Epoch: {} {:.6} {}/{} {:.6}",
                epoch,
                stats.average_cost,
                stats.correct,
                stats.total,
                stats.accuracy()
            );
            self.history.push(stats);
        }
        Ok(&self.history[start..])
    }
}

#[cfg(test)]
#[path = "train_test.rs"]
mod tests;
